//! 变换粒度（Unit）的切分与拼接。
//!
//! - 普通模式：每个字符是一个单元，拼接符为 `""`
//! - `preserve_spaces` 模式：按空格切分出的词元是一个单元，拼接符为 `" "`

/// 切分单元（借用原文本，不分配字符串）
pub(crate) fn split_units(text: &str, preserve_spaces: bool) -> Vec<&str> {
    if preserve_spaces {
        text.split(' ').collect()
    } else {
        text.char_indices()
            .map(|(start, c)| &text[start..start + c.len_utf8()])
            .collect()
    }
}

/// 单元拼接符
pub(crate) fn unit_separator(preserve_spaces: bool) -> &'static str {
    if preserve_spaces { " " } else { "" }
}

/// 字符数（而非字节数）
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}
