//! # Event 模块
//!
//! Runtime 向宿主输出的帧与事件。

use serde::{Deserialize, Serialize};

/// 一帧输出
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// 当前文本
    pub text: String,
    /// 已应用的 tick 数
    pub iteration: u32,
    /// 逐字符颜色标签（仅 `colorize_units` 时存在）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<Option<String>>>,
}

/// `update` 产生的事件（按发生顺序）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CipherEvent {
    /// 应用了一个 tick
    Frame(Frame),
    /// 动画完成（每次完成只出现一次）
    Finished { iterations: u32 },
}
