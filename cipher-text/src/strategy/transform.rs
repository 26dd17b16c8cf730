//! # Transform 策略
//!
//! 每个 tick 先调整长度，再揭示内容：
//!
//! 1. 长度差按 `weight = |len(text) - len(target)| / len(target)` 加权，
//!    从尾部删除或追加随机字符，步长不超过剩余差值
//! 2. 以 `count_to_reveal(default_text, weight)` 为配额揭示目标文本
//!
//! 两个阶段共用同一个迭代期限：到期后长度与内容都强制收敛。

use tracing::debug;

use crate::action::deadline_reached;
use crate::alphabet::Alphabet;
use crate::random::RandomSource;
use crate::sizing::{
    CountBounds, DEFAULT_REVEAL_PROBABILITY, count_to_add, count_to_remove, count_to_reveal,
};
use crate::unit::char_len;

use super::Step;
use super::reveal::{RevealRequest, reveal};

/// 变换请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformRequest<'a> {
    pub text: &'a str,
    /// 动画开始时的源文本（计数器以它的长度为准）
    pub default_text: &'a str,
    pub target_text: &'a str,
    /// 追加字符所用的字符集
    pub alphabet: &'a Alphabet,
    pub current_iteration: u32,
    pub max_iterations: Option<u32>,
    pub preserve_spaces: bool,
}

/// 执行一次变换
pub fn transform(request: &TransformRequest<'_>, rng: &mut dyn RandomSource) -> Step {
    if request.text == request.target_text {
        return Step::finished(request.text);
    }

    let forced = deadline_reached(request.current_iteration, request.max_iterations);
    let len = char_len(request.text);
    let target_len = char_len(request.target_text);
    let weight = length_weight(len, target_len);

    let resized = if len > target_len {
        let excess = len - target_len;
        let count = if forced {
            excess
        } else {
            count_to_remove(request.default_text, weight, CountBounds::REMOVE, rng).min(excess)
        };
        request.text.chars().take(len - count).collect::<String>()
    } else if len < target_len {
        let deficit = target_len - len;
        let count = if forced {
            deficit
        } else {
            count_to_add(request.default_text, weight, CountBounds::ADD, rng).min(deficit)
        };
        let mut grown = String::with_capacity(request.text.len() + count * 4);
        grown.push_str(request.text);
        for _ in 0..count {
            grown.push(request.alphabet.pick(rng));
        }
        grown
    } else {
        request.text.to_string()
    };

    let quota = count_to_reveal(request.default_text, weight, CountBounds::REVEAL, rng);
    let reveal_request = RevealRequest {
        source_text: &resized,
        target_text: request.target_text,
        max_characters_to_reveal: quota,
        current_iteration: request.current_iteration,
        max_iterations: request.max_iterations,
        reveal_probability: DEFAULT_REVEAL_PROBABILITY,
        preserve_spaces: request.preserve_spaces,
    };
    let revealed = reveal(&reveal_request, rng);

    if forced && revealed != request.target_text {
        debug!(
            iteration = request.current_iteration,
            "到达迭代期限但词元数量不一致，直接使用目标文本"
        );
        return Step::next(request.target_text);
    }

    Step::next(revealed)
}

/// 长度差权重；目标为空时取 1
fn length_weight(len: usize, target_len: usize) -> f64 {
    if target_len == 0 {
        return 1.0;
    }
    len.abs_diff(target_len) as f64 / target_len as f64
}
