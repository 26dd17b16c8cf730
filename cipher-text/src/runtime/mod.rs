//! # Runtime 模块
//!
//! 动画驱动核心，负责状态推进与 tick 调度。
//!
//! ## 模块结构
//!
//! - [`engine`]：动画驱动器
//! - [`executor`]：按动作分派策略
//! - [`schedule`]：tick 票据
//! - [`event`]：输出帧与事件

pub mod engine;
pub mod event;
pub mod executor;
pub mod schedule;

pub use engine::CipherRuntime;
pub use event::{CipherEvent, Frame};
pub use executor::{Executor, TickContext};
pub use schedule::TickTicket;
