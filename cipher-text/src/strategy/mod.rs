//! # Strategy 模块
//!
//! 每个 tick 调用一次的纯函数：输入当前文本与上下文，输出下一帧文本。
//!
//! ## 模块结构
//!
//! - [`reveal`]：按概率与配额揭示目标字符（decode 与 transform 的基础）
//! - [`decode`]：从随机字符揭示出源文本
//! - [`encode`]：把源文本逐步替换为随机字符
//! - [`transform`]：先调整长度，再揭示目标文本
//! - [`scramble`]：随机交换或替换字符
//! - [`wave`]：循环左移一位
//!
//! 所有策略都从调用方接收 [`RandomSource`](crate::random::RandomSource)，自身不持有状态。

pub mod decode;
pub mod encode;
pub mod reveal;
pub mod scramble;
pub mod transform;
pub mod wave;

pub use decode::{DecodeRequest, decode};
pub use encode::{EncodeRequest, encode, is_fully_encoded};
pub use reveal::{RevealRequest, reveal};
pub use scramble::{ScrambleRequest, scramble};
pub use transform::{TransformRequest, transform};
pub use wave::{wave, wave_units};

/// 一次策略调用的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// 下一帧文本
    pub text: String,
    /// 是否已到达终态
    pub done: bool,
}

impl Step {
    /// 动画继续
    pub fn next(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: false,
        }
    }

    /// 动画结束
    pub fn finished(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: true,
        }
    }
}
