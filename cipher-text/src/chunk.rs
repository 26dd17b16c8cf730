//! # Chunk 模块
//!
//! 把文本切成随机长度的连续片段，供宿主按片段渲染（例如逐段上色）。

use serde::{Deserialize, Serialize};

use crate::random::RandomSource;

/// 带颜色标签的片段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColoredChunk {
    pub text: String,
    pub color: Option<String>,
}

/// 切分为长度在 `1..=max_len` 之间的连续片段
///
/// `max_len` 为 0 或超过文本长度时按文本长度处理；空文本返回空列表。
/// 所有片段按顺序拼接后等于原文本。
pub fn chunk_text(text: &str, max_len: usize, rng: &mut dyn RandomSource) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    if len == 0 {
        return Vec::new();
    }
    let max_len = if max_len == 0 || max_len > len { len } else { max_len };

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < len {
        let size = (1 + rng.next_index(max_len)).min(len - start);
        chunks.push(chars[start..start + size].iter().collect());
        start += size;
    }
    chunks
}

/// 切分并为每个片段随机分配调色板中的颜色
pub fn chunk_text_with_colors<S: AsRef<str>>(
    text: &str,
    max_len: usize,
    palette: &[S],
    rng: &mut dyn RandomSource,
) -> Vec<ColoredChunk> {
    chunk_text(text, max_len, rng)
        .into_iter()
        .map(|text| {
            let color = (!palette.is_empty())
                .then(|| palette[rng.next_index(palette.len())].as_ref().to_string());
            ColoredChunk { text, color }
        })
        .collect()
}
