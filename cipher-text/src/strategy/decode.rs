//! # Decode 策略
//!
//! 从随机字符出发，逐步揭示出源文本。

use crate::random::RandomSource;
use crate::sizing::{CountBounds, DEFAULT_REVEAL_PROBABILITY, count_to_reveal};

use super::Step;
use super::reveal::{RevealRequest, reveal};

/// 解码请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeRequest<'a> {
    /// 当前文本
    pub text: &'a str,
    /// 要揭示出的源文本
    pub default_text: &'a str,
    pub current_iteration: u32,
    pub max_iterations: Option<u32>,
    pub preserve_spaces: bool,
}

/// 执行一次解码
///
/// 当前文本已等于源文本时结束；否则以 `count_to_reveal(default_text)` 为配额揭示。
pub fn decode(request: &DecodeRequest<'_>, rng: &mut dyn RandomSource) -> Step {
    if request.text == request.default_text {
        return Step::finished(request.text);
    }

    let quota = count_to_reveal(request.default_text, 1.0, CountBounds::REVEAL, rng);
    let reveal_request = RevealRequest {
        source_text: request.text,
        target_text: request.default_text,
        max_characters_to_reveal: quota,
        current_iteration: request.current_iteration,
        max_iterations: request.max_iterations,
        reveal_probability: DEFAULT_REVEAL_PROBABILITY,
        preserve_spaces: request.preserve_spaces,
    };
    Step::next(reveal(&reveal_request, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{RngSource, SequenceSource};

    fn request<'a>(text: &'a str, default_text: &'a str, iteration: u32) -> DecodeRequest<'a> {
        DecodeRequest {
            text,
            default_text,
            current_iteration: iteration,
            max_iterations: Some(36),
            preserve_spaces: false,
        }
    }

    #[test]
    fn test_matching_text_finishes() {
        let mut rng = SequenceSource::constant(0.5);
        let step = decode(&request("hello", "hello", 3), &mut rng);
        assert_eq!(step, Step::finished("hello"));
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn test_deadline_reveals_everything() {
        let mut rng = RngSource::seeded(5);
        let step = decode(&request("#$%&!", "hello", 36), &mut rng);
        assert_eq!(step, Step::next("hello"));
    }

    #[test]
    fn test_converges_within_budget() {
        let mut rng = RngSource::seeded(11);
        let mut text = "?????????????".to_string();
        let mut iteration = 0;
        loop {
            let step = decode(&request(&text, "decoded words", iteration), &mut rng);
            if step.done {
                break;
            }
            text = step.text;
            iteration += 1;
            assert!(iteration <= 37);
        }
        assert_eq!(text, "decoded words");
    }
}
