//! # Alphabet 模块
//!
//! 随机替换所用的字符表，以及随机取字符、整段随机化。
//!
//! ## 设计说明
//!
//! `Alphabet` 在构造时保证非空，因此 [`Alphabet::pick`] 永远不会越界。
//! 空字符表在配置阶段就会以 [`ConfigError::EmptyAlphabet`] 报错。

use std::sync::LazyLock;

use crate::error::ConfigError;
use crate::random::RandomSource;
use crate::unit::{split_units, unit_separator};

/// 基础可打印字符集（不含空格与反引号）
pub const BASE_PRINTABLE_CHARACTERS: &str =
    "!\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_abcdefghijklmnopqrstuvwxyz{|}~";

static BASE_ALPHABET: LazyLock<Alphabet> = LazyLock::new(|| Alphabet {
    chars: BASE_PRINTABLE_CHARACTERS.chars().collect(),
});

/// 非空、不可变的有序字符表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<char>,
}

impl Alphabet {
    /// 从字符串创建字符表
    ///
    /// 重复字符会被保留（提高其被选中的概率）。
    pub fn new(characters: &str) -> Result<Self, ConfigError> {
        let chars: Vec<char> = characters.chars().collect();
        if chars.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }
        Ok(Self { chars })
    }

    /// 基础可打印字符集
    pub fn base() -> &'static Alphabet {
        &BASE_ALPHABET
    }

    /// 追加额外字符，返回新的字符表
    pub fn extended(&self, extra: &str) -> Self {
        let mut chars = self.chars.clone();
        chars.extend(extra.chars());
        Self { chars }
    }

    /// 字符个数
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// 永远为 false，保留以配合 `len`
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// 是否包含某字符
    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    /// 所有字符
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// 均匀随机选取一个字符
    pub fn pick(&self, rng: &mut dyn RandomSource) -> char {
        self.chars[rng.next_index(self.chars.len())]
    }

    /// 随机选取一个不等于 `avoid` 的字符
    ///
    /// 最多尝试 `len` 次；若字符表只含 `avoid`，返回最后一次抽到的字符。
    pub fn pick_excluding(&self, avoid: char, rng: &mut dyn RandomSource) -> char {
        let mut picked = self.pick(rng);
        for _ in 1..self.chars.len() {
            if picked != avoid {
                break;
            }
            picked = self.pick(rng);
        }
        picked
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in &self.chars {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// 将文本的每个单元替换为一个随机字符
///
/// `preserve_spaces` 时按空格切分为词元，每个词元变成一个随机字符并用单个空格拼接；
/// 否则逐字符替换。空文本原样返回。
pub fn randomize(
    text: &str,
    alphabet: &Alphabet,
    preserve_spaces: bool,
    rng: &mut dyn RandomSource,
) -> String {
    if text.is_empty() {
        return String::new();
    }

    let units = split_units(text, preserve_spaces);
    let separator = unit_separator(preserve_spaces);
    let mut out = String::with_capacity(units.len() * 2);
    for (i, _) in units.iter().enumerate() {
        if i > 0 {
            out.push_str(separator);
        }
        out.push(alphabet.pick(rng));
    }
    out
}
