//! # Encode 策略
//!
//! 把源文本逐步替换为随机字符，直到每个位置都与源文本不同。
//!
//! 每次调用在 `len(default_text)` 次随机抽样内挑选待编码位置，
//! 本次已改写的位置记录在调用内的临时集合中，调用结束即丢弃。

use std::collections::HashSet;

use crate::action::deadline_reached;
use crate::alphabet::Alphabet;
use crate::random::RandomSource;
use crate::sizing::{CountBounds, count_to_encode};

use super::Step;

/// 编码请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeRequest<'a> {
    pub text: &'a str,
    /// 被编码的源文本
    pub default_text: &'a str,
    /// 写入位置所用的字符集
    pub alphabet: &'a Alphabet,
    pub current_iteration: u32,
    pub max_iterations: Option<u32>,
    /// 为 true 时空格位置保持不变，也不参与完成判定
    pub preserve_spaces: bool,
}

/// 是否每个位置都已与源文本不同
pub fn is_fully_encoded(text: &str, default_text: &str, preserve_spaces: bool) -> bool {
    let mut current = text.chars();
    default_text.chars().all(|original| {
        let encoded = current.next();
        (preserve_spaces && original == ' ') || encoded != Some(original)
    })
}

/// 执行一次编码
pub fn encode(request: &EncodeRequest<'_>, rng: &mut dyn RandomSource) -> Step {
    let deadline = deadline_reached(request.current_iteration, request.max_iterations);
    if deadline || is_fully_encoded(request.text, request.default_text, request.preserve_spaces) {
        return Step::finished(final_text(request, rng));
    }

    let original: Vec<char> = request.default_text.chars().collect();
    let mut chars: Vec<char> = request.text.chars().collect();
    let len = original.len();
    let quota = count_to_encode(request.default_text, 1.0, CountBounds::ENCODE, rng);

    let mut touched = HashSet::with_capacity(quota);
    for _ in 0..len {
        if touched.len() >= quota || touched.len() >= len {
            break;
        }

        let index = rng.next_index(len);
        if touched.contains(&index) {
            continue;
        }
        let Some(&current) = chars.get(index) else {
            continue;
        };
        if current != original[index] || (request.preserve_spaces && current == ' ') {
            continue;
        }

        chars[index] = request.alphabet.pick(rng);
        touched.insert(index);
    }

    Step::next(chars.into_iter().collect::<String>())
}

/// 完成时输出的字符串：每个位置都避开源字符
fn final_text(request: &EncodeRequest<'_>, rng: &mut dyn RandomSource) -> String {
    request
        .default_text
        .chars()
        .map(|original| {
            if request.preserve_spaces && original == ' ' {
                ' '
            } else {
                request.alphabet.pick_excluding(original, rng)
            }
        })
        .collect()
}
