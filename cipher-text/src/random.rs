//! # Random 模块
//!
//! 可注入、可设定种子的随机数来源。
//!
//! 所有策略函数都显式接收 `&mut dyn RandomSource`，不依赖全局随机数生成器，
//! 因此测试可以用固定序列或固定种子复现每一帧。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// `[0, 1)` 区间内最大的 f64
const MAX_UNIT: f64 = 1.0 - f64::EPSILON;

/// 随机数来源
pub trait RandomSource {
    /// 返回 `[0, 1)` 区间内的随机数
    fn next_f64(&mut self) -> f64;

    /// 返回 `[0, len)` 区间内的随机下标
    ///
    /// `len` 为 0 时返回 0，调用方需自行保证下标有效。
    fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let index = (self.next_f64() * len as f64).floor() as usize;
        index.min(len - 1)
    }
}

/// 基于 `rand` 的随机数来源
#[derive(Debug, Clone)]
pub struct RngSource<R>(R);

impl<R> RngSource<R> {
    /// 包装任意 `rand::Rng`
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl RngSource<StdRng> {
    /// 使用固定种子创建（结果可复现）
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// 使用系统熵创建
    pub fn from_entropy() -> Self {
        Self(StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_f64(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// 固定序列随机数来源
///
/// 循环返回给定的数值，超出 `[0, 1)` 的值会被截断到区间内。
/// 序列为空时始终返回 0。
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    /// 创建固定序列
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values = values
            .into()
            .into_iter()
            .map(|v| if v.is_nan() { 0.0 } else { v.clamp(0.0, MAX_UNIT) })
            .collect();
        Self { values, cursor: 0 }
    }

    /// 始终返回同一个值
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// 已经消耗的数值个数
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceSource {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
