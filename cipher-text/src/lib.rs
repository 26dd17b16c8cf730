//! # Cipher Text
//!
//! 字符级文本动画引擎：把一段文本逐 tick 变换为另一段文本。
//!
//! ## 架构概述
//!
//! `cipher-text` 是纯逻辑核心，不依赖任何 IO、定时器或渲染引擎。
//! 宿主提供配置与时间，Runtime 返回每一帧的文本：
//!
//! ```text
//! Host                                Runtime
//!   │                                    │
//!   │──── CipherConfig ────────────────►│ new()
//!   │──── schedule() ──────────────────►│
//!   │◄─── TickTicket (delay) ────────────│
//!   │──── fire(ticket) ────────────────►│ Executor -> Strategy
//!   │◄─── Frame { text, colors } ────────│
//!   │                                    │
//! ```
//!
//! ## 动作
//!
//! | 动作 | 行为 | 默认上限 | 默认间隔 |
//! |------|------|----------|----------|
//! | decode | 从随机字符揭示出源文本 | 36 | 120ms |
//! | encode | 把源文本替换为随机字符 | 36 | 120ms |
//! | transform | 调整长度并揭示目标文本 | 54 | 150ms |
//! | scramble | 持续打乱 | 无 | 60ms |
//! | wave | 循环左移 | 无 | 120ms |
//!
//! ## 使用示例
//!
//! ```ignore
//! use cipher_text::{Action, CipherConfig, CipherRuntime};
//!
//! let config = CipherConfig::new("ACCESS GRANTED")
//!     .with_action(Action::Transform)
//!     .with_target("ACCESS DENIED");
//! let mut runtime = CipherRuntime::new(config)?;
//!
//! while let Some(ticket) = runtime.schedule() {
//!     std::thread::sleep(ticket.delay());
//!     if let Some(frame) = runtime.fire(ticket) {
//!         println!("{}", frame.text);
//!     }
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`action`]：动作与 tick 预算
//! - [`alphabet`]：替换字符表与随机化
//! - [`charset`]：按路径组合的特殊字符集
//! - [`sizing`]：每个 tick 改动字符数的计数器
//! - [`strategy`]：各动作的纯函数策略
//! - [`runtime`]：动画驱动器
//! - [`config`]：配置
//! - [`state`]：可序列化的动画状态
//! - [`color`] / [`chunk`]：装饰性颜色标签与分段
//! - [`random`]：可注入的随机数来源
//! - [`error`]：错误类型定义

pub mod action;
pub mod alphabet;
pub mod charset;
pub mod chunk;
pub mod color;
pub mod config;
pub mod error;
pub mod random;
pub mod runtime;
pub mod sizing;
pub mod state;
pub mod strategy;

mod unit;

// 重导出核心类型
pub use action::{Action, TickBudget};
pub use alphabet::{Alphabet, BASE_PRINTABLE_CHARACTERS, randomize};
pub use charset::{generate_character_set, try_generate_character_set};
pub use chunk::{ColoredChunk, chunk_text, chunk_text_with_colors};
pub use color::{ColorTrack, DEFAULT_PALETTE};
pub use config::CipherConfig;
pub use error::{CipherError, CipherResult, ConfigError};
pub use random::{RandomSource, RngSource, SequenceSource};
pub use runtime::{CipherEvent, CipherRuntime, Frame, TickTicket};
pub use sizing::{
    CountBounds, count_to_add, count_to_encode, count_to_remove, count_to_reveal,
    count_to_scramble,
};
pub use state::{AnimationState, Phase};
pub use strategy::Step;
