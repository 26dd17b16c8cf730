//! # Schedule 模块
//!
//! 定时器驱动宿主使用的 tick 票据。
//!
//! 每个 runtime 同一时刻最多只有一张未兑现的票据。重置、完成、取消都会作废它，
//! 作废后的票据在 [`fire`](super::CipherRuntime::fire) 时被忽略。

use std::time::Duration;

/// Tick 票据
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickTicket {
    generation: u64,
    sequence: u64,
    delay: Duration,
}

impl TickTicket {
    pub(crate) fn new(generation: u64, sequence: u64, delay: Duration) -> Self {
        Self {
            generation,
            sequence,
            delay,
        }
    }

    /// 签发时的配置代数（每次重置加一）
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 签发序号
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// 距离触发的等待时间
    pub fn delay(&self) -> Duration {
        self.delay
    }
}
