//! # Scramble 策略
//!
//! 对前 `max_characters_to_scramble` 个位置，随机挑一个交换目标：
//! 一半概率把两个位置都替换成随机字符，另一半概率直接交换。
//!
//! `preserve_spaces` 时空格既不会被选为源，也不会被选为目标，位置保持不变。

use crate::alphabet::Alphabet;
use crate::random::RandomSource;
use crate::sizing::DEFAULT_REVEAL_PROBABILITY;

/// 打乱请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrambleRequest<'a> {
    pub text: &'a str,
    pub alphabet: &'a Alphabet,
    pub max_characters_to_scramble: usize,
    pub preserve_spaces: bool,
}

/// 执行一次打乱
pub fn scramble(request: &ScrambleRequest<'_>, rng: &mut dyn RandomSource) -> String {
    let mut chars: Vec<char> = request.text.chars().collect();
    let len = chars.len();

    for i in 0..request.max_characters_to_scramble.min(len) {
        if request.preserve_spaces && chars[i] == ' ' {
            continue;
        }

        let Some(j) = swap_target(&chars, request.preserve_spaces, rng) else {
            continue;
        };

        if rng.next_f64() < DEFAULT_REVEAL_PROBABILITY {
            chars[i] = request.alphabet.pick(rng);
            chars[j] = request.alphabet.pick(rng);
        } else {
            chars.swap(i, j);
        }
    }

    chars.into_iter().collect()
}

/// 随机挑选交换目标；保留空格时最多尝试 `len` 次避开空格
fn swap_target(chars: &[char], preserve_spaces: bool, rng: &mut dyn RandomSource) -> Option<usize> {
    let len = chars.len();
    if !preserve_spaces {
        return Some(rng.next_index(len));
    }
    (0..len)
        .map(|_| rng.next_index(len))
        .find(|&j| chars[j] != ' ')
}
