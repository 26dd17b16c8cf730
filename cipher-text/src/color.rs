//! # Color 模块
//!
//! 逐字符的装饰性颜色标签。
//!
//! 同一个单词的所有字符共用一个随机标签，空格没有标签。
//! 标签总是按源文本的单词分配，标签数组与当前文本等长：
//! wave 时与文本同步旋转，文本长度或单词结构变化时按单词重新对齐。

use serde::{Deserialize, Serialize};

use crate::random::RandomSource;
use crate::strategy::wave_units;
use crate::unit::char_len;

/// 默认调色板
pub const DEFAULT_PALETTE: [&str; 5] = [
    "gray-500",
    "cyan-700",
    "emerald-800",
    "pink-300",
    "teal-500",
];

/// 逐字符颜色标签
///
/// `words` 记录源文本中每个单词的标签，文本结构变化后据此重新对齐。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTrack {
    tags: Vec<Option<String>>,
    #[serde(default)]
    words: Vec<Option<String>>,
}

impl ColorTrack {
    /// 按单词分配颜色
    ///
    /// 调色板为空时所有字符都没有标签。
    pub fn assign<S: AsRef<str>>(text: &str, palette: &[S], rng: &mut dyn RandomSource) -> Self {
        let mut words = Vec::new();
        let mut in_word = false;
        for c in text.chars() {
            if c == ' ' {
                in_word = false;
            } else if !in_word {
                in_word = true;
                let tag = (!palette.is_empty())
                    .then(|| palette[rng.next_index(palette.len())].as_ref().to_string());
                words.push(tag);
            }
        }

        let mut track = Self {
            tags: Vec::new(),
            words,
        };
        track.realign(text);
        track
    }

    pub fn tags(&self) -> &[Option<String>] {
        &self.tags
    }

    /// 每个单词的标签（按源文本顺序）
    pub fn word_tags(&self) -> &[Option<String>] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// 与 wave 同步左移一位
    pub fn rotate(&mut self) {
        wave_units(&mut self.tags);
    }

    /// 按 `text` 的单词结构重建标签
    ///
    /// 第 k 个单词使用源文本第 k 个单词的标签，超出部分沿用最后一个单词的标签；
    /// 空格没有标签。
    pub fn realign(&mut self, text: &str) {
        let mut tags = Vec::with_capacity(text.len());
        let mut word: Option<usize> = None;
        let mut in_word = false;

        for c in text.chars() {
            if c == ' ' {
                in_word = false;
                tags.push(None);
                continue;
            }
            if !in_word {
                in_word = true;
                word = Some(word.map_or(0, |k| k + 1));
            }
            let tag = word
                .and_then(|k| self.words.get(k).or(self.words.last()))
                .cloned()
                .flatten();
            tags.push(tag);
        }

        self.tags = tags;
    }

    /// 长度与 `text` 不一致时重新对齐，否则保持逐位置的标签
    pub fn fit(&mut self, text: &str) {
        if char_len(text) != self.tags.len() {
            self.realign(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceSource;

    #[test]
    fn test_words_share_tags() {
        let mut rng = SequenceSource::new(vec![0.0, 0.5]);
        let track = ColorTrack::assign("ab cd", &["red", "blue"], &mut rng);
        let tags: Vec<Option<&str>> = track.tags().iter().map(|t| t.as_deref()).collect();
        assert_eq!(
            tags,
            vec![Some("red"), Some("red"), None, Some("blue"), Some("blue")]
        );
    }

    #[test]
    fn test_empty_palette() {
        let palette: [&str; 0] = [];
        let track = ColorTrack::assign("abc", &palette, &mut SequenceSource::constant(0.1));
        assert_eq!(track.len(), 3);
        assert!(track.tags().iter().all(Option::is_none));
    }

    #[test]
    fn test_rotate_and_fit() {
        let mut rng = SequenceSource::new(vec![0.0, 0.9]);
        let mut track = ColorTrack::assign("a b", &["x", "y"], &mut rng);
        track.rotate();
        assert_eq!(track.tags()[0], None);
        assert_eq!(track.tags()[2].as_deref(), Some("x"));

        // 长度不变时保持旋转后的位置
        track.fit("xyz");
        assert_eq!(track.tags()[0], None);

        track.fit("aa b cc");
        let tags: Vec<Option<&str>> = track.tags().iter().map(|t| t.as_deref()).collect();
        assert_eq!(
            tags,
            vec![Some("x"), Some("x"), None, Some("y"), None, Some("y"), Some("y")]
        );
    }

    #[test]
    fn test_realign_collapsed_tokens() {
        let mut rng = SequenceSource::new(vec![0.0, 0.9]);
        let mut track = ColorTrack::assign("ab cd", &["x", "y"], &mut rng);
        assert_eq!(track.word_tags().len(), 2);

        track.realign("# #");
        let tags: Vec<Option<&str>> = track.tags().iter().map(|t| t.as_deref()).collect();
        assert_eq!(tags, vec![Some("x"), None, Some("y")]);

        track.realign("  ");
        assert!(track.tags().iter().all(Option::is_none));
    }
}
