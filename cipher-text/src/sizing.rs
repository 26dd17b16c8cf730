//! # Sizing 模块
//!
//! 每个 tick 改动多少个字符的随机计数器。
//!
//! 四个带上下界的计数器共享同一规则（见 [`weighted_count`]）：
//!
//! ```text
//! max >= len(text) - 1  ->  min
//! 否则                   ->  min + floor(random * floor(max * weight))
//! ```
//!
//! `weight` 只缩放随机上限，不影响下限；结果始终落在 `[min, min + max)`。

use crate::random::RandomSource;
use crate::unit::char_len;

/// 默认揭示概率（也用于 scramble 的“替换还是交换”判定）
pub const DEFAULT_REVEAL_PROBABILITY: f64 = 0.5;

pub const MINIMUM_CHARACTERS_TO_REVEAL: usize = 1;
pub const MAXIMUM_CHARACTERS_TO_REVEAL: usize = 5;
pub const MINIMUM_CHARACTERS_TO_REMOVE: usize = 1;
pub const MAXIMUM_CHARACTERS_TO_REMOVE: usize = 5;
pub const MINIMUM_CHARACTERS_TO_ADD: usize = 1;
pub const MAXIMUM_CHARACTERS_TO_ADD: usize = 5;

/// 计数上下界
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountBounds {
    pub min: usize,
    pub max: usize,
}

impl CountBounds {
    pub const REVEAL: Self = Self::new(MINIMUM_CHARACTERS_TO_REVEAL, MAXIMUM_CHARACTERS_TO_REVEAL);
    pub const REMOVE: Self = Self::new(MINIMUM_CHARACTERS_TO_REMOVE, MAXIMUM_CHARACTERS_TO_REMOVE);
    pub const ADD: Self = Self::new(MINIMUM_CHARACTERS_TO_ADD, MAXIMUM_CHARACTERS_TO_ADD);
    pub const ENCODE: Self = Self::REVEAL;

    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

/// 带权重的随机计数
///
/// 文本过短（`max >= len - 1`）时直接返回 `min`。
/// `max * weight` 向下取整后截断到 `[0, max]`，NaN 与负权重视为 0。
pub fn weighted_count(
    text: &str,
    weight: f64,
    bounds: CountBounds,
    rng: &mut dyn RandomSource,
) -> usize {
    let len = char_len(text);
    if bounds.max >= len.saturating_sub(1) {
        return bounds.min;
    }

    let span = (bounds.max as f64 * weight).floor();
    let span = if span.is_nan() || span <= 0.0 {
        0
    } else if span >= bounds.max as f64 {
        bounds.max
    } else {
        span as usize
    };

    if span == 0 {
        return bounds.min;
    }
    bounds.min + rng.next_index(span)
}

/// 本次揭示的字符数
pub fn count_to_reveal(
    text: &str,
    weight: f64,
    bounds: CountBounds,
    rng: &mut dyn RandomSource,
) -> usize {
    weighted_count(text, weight, bounds, rng)
}

/// 本次删除的字符数
pub fn count_to_remove(
    text: &str,
    weight: f64,
    bounds: CountBounds,
    rng: &mut dyn RandomSource,
) -> usize {
    weighted_count(text, weight, bounds, rng)
}

/// 本次追加的字符数
pub fn count_to_add(
    text: &str,
    weight: f64,
    bounds: CountBounds,
    rng: &mut dyn RandomSource,
) -> usize {
    weighted_count(text, weight, bounds, rng)
}

/// 本次编码的字符数
pub fn count_to_encode(
    text: &str,
    weight: f64,
    bounds: CountBounds,
    rng: &mut dyn RandomSource,
) -> usize {
    weighted_count(text, weight, bounds, rng)
}

/// 本次打乱的字符数
///
/// 不受上下界约束，随文本长度增长：`floor(random * floor(len * 0.5)) + 1`。
pub fn count_to_scramble(text: &str, rng: &mut dyn RandomSource) -> usize {
    let half = char_len(text) / 2;
    1 + rng.next_index(half)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{RngSource, SequenceSource};

    #[test]
    fn test_short_text_returns_min() {
        let mut rng = SequenceSource::constant(0.99);
        assert_eq!(count_to_reveal("hi", 1.0, CountBounds::new(1, 5), &mut rng), 1);
        assert_eq!(count_to_remove("", 1.0, CountBounds::REMOVE, &mut rng), 1);
        // max == len - 1
        assert_eq!(count_to_add("abcdef", 1.0, CountBounds::ADD, &mut rng), 1);
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn test_long_text_samples_range() {
        let text = "a fairly long line of text";
        assert_eq!(
            count_to_reveal(text, 1.0, CountBounds::REVEAL, &mut SequenceSource::constant(0.0)),
            1
        );
        assert_eq!(
            count_to_reveal(text, 1.0, CountBounds::REVEAL, &mut SequenceSource::constant(0.99)),
            5
        );
        assert_eq!(
            count_to_encode(text, 1.0, CountBounds::new(2, 5), &mut SequenceSource::constant(0.5)),
            4
        );
    }

    #[test]
    fn test_weight_scales_ceiling_only() {
        let text = "a fairly long line of text";
        let mut rng = SequenceSource::constant(0.99);
        // floor(5 * 0.5) = 2 -> min + [0, 2)
        assert_eq!(count_to_remove(text, 0.5, CountBounds::REMOVE, &mut rng), 2);
        // 权重为 0 时范围收缩为 min
        assert_eq!(count_to_remove(text, 0.0, CountBounds::REMOVE, &mut rng), 1);
        assert_eq!(count_to_remove(text, f64::NAN, CountBounds::REMOVE, &mut rng), 1);
        // 权重大于 1 时不超过 max
        assert_eq!(count_to_remove(text, 10.0, CountBounds::REMOVE, &mut rng), 5);
    }

    #[test]
    fn test_counts_stay_in_bounds() {
        let mut rng = RngSource::seeded(3);
        let bounds = CountBounds::new(2, 4);
        for len in 0..40 {
            let text = "x".repeat(len);
            for weight in [0.0, 0.3, 1.0, 2.5] {
                let n = weighted_count(&text, weight, bounds, &mut rng);
                assert!(n >= bounds.min && n < bounds.min + bounds.max, "{len} {weight} {n}");
                if bounds.max >= len.saturating_sub(1) {
                    assert_eq!(n, bounds.min);
                }
            }
        }
    }

    #[test]
    fn test_unbounded_max_returns_min() {
        let mut rng = SequenceSource::constant(0.99);
        let bounds = CountBounds::new(3, usize::MAX);
        assert_eq!(weighted_count("a fairly long line of text", 1.0, bounds, &mut rng), 3);
        assert_eq!(weighted_count("", 1.0, bounds, &mut rng), 3);
    }

    #[test]
    fn test_count_to_scramble() {
        assert_eq!(count_to_scramble("", &mut SequenceSource::constant(0.7)), 1);
        assert_eq!(count_to_scramble("a", &mut SequenceSource::constant(0.7)), 1);
        assert_eq!(count_to_scramble("abcdefghij", &mut SequenceSource::constant(0.0)), 1);
        assert_eq!(count_to_scramble("abcdefghij", &mut SequenceSource::constant(0.99)), 5);
    }
}
