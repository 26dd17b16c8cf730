//! # Reveal 策略
//!
//! 逐单元比较源文本与目标文本：
//!
//! - 已匹配的单元保持不变，不会被重新随机化
//! - 未匹配的单元在以下任一条件满足时揭示为目标单元：
//!   - 已到迭代期限（强制揭示，不受配额限制）
//!   - `random > reveal_probability` 且本次揭示数未达配额
//! - 否则替换为基础字符集中的一个随机字符
//!
//! 配额是软上限：达到后继续遍历，只是后续单元不再揭示。

use crate::action::{Action, deadline_reached};
use crate::alphabet::Alphabet;
use crate::random::RandomSource;
use crate::sizing::{DEFAULT_REVEAL_PROBABILITY, MAXIMUM_CHARACTERS_TO_REVEAL};
use crate::unit::{split_units, unit_separator};

/// 揭示请求（每个 tick 重新构造）
#[derive(Debug, Clone, PartialEq)]
pub struct RevealRequest<'a> {
    pub source_text: &'a str,
    pub target_text: &'a str,
    /// 本次最多揭示的单元数
    pub max_characters_to_reveal: usize,
    pub current_iteration: u32,
    /// `None` 表示没有强制揭示的期限
    pub max_iterations: Option<u32>,
    /// `0..=1`，越大越难揭示
    pub reveal_probability: f64,
    pub preserve_spaces: bool,
}

impl<'a> RevealRequest<'a> {
    /// 使用动作的默认期限与默认配额创建请求
    pub fn new(action: Action, source_text: &'a str, target_text: &'a str) -> Self {
        Self {
            source_text,
            target_text,
            max_characters_to_reveal: MAXIMUM_CHARACTERS_TO_REVEAL,
            current_iteration: 0,
            max_iterations: action.default_budget().max_iterations,
            reveal_probability: DEFAULT_REVEAL_PROBABILITY,
            preserve_spaces: false,
        }
    }

    pub fn with_quota(mut self, max_characters_to_reveal: usize) -> Self {
        self.max_characters_to_reveal = max_characters_to_reveal;
        self
    }

    pub fn with_iteration(mut self, current_iteration: u32, max_iterations: Option<u32>) -> Self {
        self.current_iteration = current_iteration;
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_probability(mut self, reveal_probability: f64) -> Self {
        self.reveal_probability = reveal_probability;
        self
    }

    pub fn with_preserve_spaces(mut self, preserve_spaces: bool) -> Self {
        self.preserve_spaces = preserve_spaces;
        self
    }
}

/// 揭示目标字符
///
/// 源文本中超出目标长度的单元在揭示时变为空串。
pub fn reveal(request: &RevealRequest<'_>, rng: &mut dyn RandomSource) -> String {
    let forced = deadline_reached(request.current_iteration, request.max_iterations);
    let source_units = split_units(request.source_text, request.preserve_spaces);
    let target_units = split_units(request.target_text, request.preserve_spaces);
    let separator = unit_separator(request.preserve_spaces);

    let mut revealed = 0usize;
    let mut out = String::with_capacity(request.source_text.len());

    for (i, unit) in source_units.iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }

        let target_unit = target_units.get(i).copied();
        if target_unit == Some(*unit) {
            out.push_str(unit);
            continue;
        }

        let should_reveal = forced
            || (rng.next_f64() > request.reveal_probability
                && revealed < request.max_characters_to_reveal);

        if should_reveal {
            revealed += 1;
            out.push_str(target_unit.unwrap_or(""));
        } else {
            out.push(Alphabet::base().pick(rng));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{RngSource, SequenceSource};

    #[test]
    fn test_deadline_forces_full_reveal() {
        let request = RevealRequest::new(Action::Decode, "aaaaa", "bbbbb")
            .with_quota(5)
            .with_iteration(100, Some(10));
        let mut rng = RngSource::seeded(0);
        assert_eq!(reveal(&request, &mut rng), "bbbbb");
    }

    #[test]
    fn test_deadline_ignores_quota() {
        let request = RevealRequest::new(Action::Decode, "xxxxxxxx", "abcdefgh")
            .with_quota(1)
            .with_iteration(36, Some(36));
        let mut rng = SequenceSource::constant(0.0);
        assert_eq!(reveal(&request, &mut rng), "abcdefgh");
    }

    #[test]
    fn test_fixed_point_is_identity() {
        let mut rng = RngSource::seeded(9);
        for iteration in [0, 5, 100] {
            for probability in [0.0, 0.5, 1.0] {
                let request = RevealRequest::new(Action::Decode, "signal lost", "signal lost")
                    .with_iteration(iteration, Some(10))
                    .with_probability(probability);
                assert_eq!(reveal(&request, &mut rng), "signal lost");
            }
        }
    }

    #[test]
    fn test_quota_is_soft_cap() {
        // 每个位置都想揭示，但配额只有 2
        let request = RevealRequest::new(Action::Decode, "#####", "hello")
            .with_quota(2)
            .with_iteration(0, Some(36));
        let mut rng = SequenceSource::constant(0.99);
        let result = reveal(&request, &mut rng);
        assert!(result.starts_with("he"));
        assert_eq!(result.chars().count(), 5);
        // 之后的位置被随机字符替换
        assert!(result.chars().skip(2).all(|c| Alphabet::base().contains(c)));
    }

    #[test]
    fn test_low_roll_never_reveals() {
        let request = RevealRequest::new(Action::Decode, "#####", "hello").with_quota(5);
        let mut rng = SequenceSource::constant(0.25);
        let result = reveal(&request, &mut rng);
        assert!(!result.contains('h'));
        assert_eq!(result.chars().count(), 5);
    }

    #[test]
    fn test_matched_positions_kept() {
        let request = RevealRequest::new(Action::Decode, "h#l#o", "hello").with_quota(0);
        let mut rng = SequenceSource::constant(0.99);
        let result: Vec<char> = reveal(&request, &mut rng).chars().collect();
        assert_eq!(result[0], 'h');
        assert_eq!(result[2], 'l');
        assert_eq!(result[4], 'o');
    }

    #[test]
    fn test_token_units() {
        let request = RevealRequest::new(Action::Decode, "x signal y", "lost signal now")
            .with_preserve_spaces(true)
            .with_iteration(36, Some(36));
        let mut rng = SequenceSource::constant(0.0);
        assert_eq!(reveal(&request, &mut rng), "lost signal now");
    }

    #[test]
    fn test_source_longer_than_target() {
        let request = RevealRequest::new(Action::Transform, "abcdef", "abc")
            .with_iteration(60, Some(54));
        let mut rng = SequenceSource::constant(0.0);
        assert_eq!(reveal(&request, &mut rng), "abc");
    }
}
