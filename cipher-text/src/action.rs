//! # Action 模块
//!
//! 动画动作标签，以及每个动作默认的 tick 预算（最大迭代次数、迭代间隔）。

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 基础最大迭代次数
pub const BASE_MAX_ITERATIONS: u32 = 36;
/// 基础迭代间隔（毫秒）
pub const BASE_SPEED_MS: u64 = 120;
pub const TRANSFORM_ITERATION_MULTIPLIER: f64 = 1.5;
pub const TRANSFORM_SPEED_MULTIPLIER: f64 = 1.25;
pub const SCRAMBLE_SPEED_MODIFIER: f64 = 0.5;

/// 动画动作
///
/// 决定每个 tick 使用哪个策略，以及默认的 [`TickBudget`]。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// 从随机字符逐步揭示出源文本
    #[default]
    Decode,
    /// 将源文本逐步替换为随机字符
    Encode,
    /// 调整长度并揭示出目标文本
    Transform,
    /// 持续打乱（默认无上限）
    Scramble,
    /// 跑马灯式循环左移（默认无上限）
    Wave,
}

impl Action {
    /// 所有动作
    pub const ALL: [Action; 5] = [
        Action::Decode,
        Action::Encode,
        Action::Transform,
        Action::Scramble,
        Action::Wave,
    ];

    /// 动作名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Decode => "decode",
            Action::Encode => "encode",
            Action::Transform => "transform",
            Action::Scramble => "scramble",
            Action::Wave => "wave",
        }
    }

    /// 默认 tick 预算
    pub fn default_budget(&self) -> TickBudget {
        let base_speed = Duration::from_millis(BASE_SPEED_MS);
        let scaled_speed = |multiplier: f64| {
            Duration::from_millis((BASE_SPEED_MS as f64 * multiplier).round() as u64)
        };
        match self {
            Action::Decode | Action::Encode => TickBudget {
                max_iterations: Some(BASE_MAX_ITERATIONS),
                iteration_speed: base_speed,
            },
            Action::Transform => TickBudget {
                max_iterations: Some(
                    (BASE_MAX_ITERATIONS as f64 * TRANSFORM_ITERATION_MULTIPLIER) as u32,
                ),
                iteration_speed: scaled_speed(TRANSFORM_SPEED_MULTIPLIER),
            },
            Action::Scramble => TickBudget {
                max_iterations: None,
                iteration_speed: scaled_speed(SCRAMBLE_SPEED_MODIFIER),
            },
            Action::Wave => TickBudget {
                max_iterations: None,
                iteration_speed: base_speed,
            },
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownAction {
                name: s.to_string(),
            })
    }
}

/// Tick 预算
///
/// - `max_iterations`: 到达后策略强制收敛；`None` 表示无上限
/// - `iteration_speed`: 两次 tick 的间隔；为 0 时不调度任何 tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickBudget {
    pub max_iterations: Option<u32>,
    pub iteration_speed: Duration,
}

impl TickBudget {
    /// 当前迭代是否已到期限
    pub fn deadline_reached(&self, iteration: u32) -> bool {
        deadline_reached(iteration, self.max_iterations)
    }

    /// 是否会调度 tick
    pub fn is_schedulable(&self) -> bool {
        !self.iteration_speed.is_zero()
    }
}

/// `iteration >= max_iterations`；无上限时永远为 false
pub fn deadline_reached(iteration: u32, max_iterations: Option<u32>) -> bool {
    max_iterations.is_some_and(|max| iteration >= max)
}
