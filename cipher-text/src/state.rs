//! # State 模块
//!
//! 动画运行时状态（可序列化，用于快照与恢复）。
//!
//! 颜色标签属于状态的一部分，恢复快照时原样恢复。

use serde::{Deserialize, Serialize};

use crate::color::ColorTrack;

/// 动画阶段
///
/// `Initializing -> Animating -> Done`，`Done` 为终态，只能通过重置离开。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// 刚创建或刚重置，尚未应用任何 tick
    #[default]
    Initializing,
    /// 正在逐 tick 推进
    Animating,
    /// 已完成
    Done,
}

/// 动画状态
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnimationState {
    /// 当前显示的文本
    pub current_text: String,
    /// 已应用的 tick 数
    pub iteration: u32,
    /// 当前阶段
    #[serde(default)]
    pub phase: Phase,
    /// 颜色标签（仅 `colorize_units`）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<ColorTrack>,
}

impl AnimationState {
    /// 创建初始状态
    pub fn new(current_text: impl Into<String>) -> Self {
        Self {
            current_text: current_text.into(),
            iteration: 0,
            phase: Phase::Initializing,
            colors: None,
        }
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// 进入 Animating（仅在 Initializing 时生效）
    pub fn begin(&mut self) {
        if self.phase == Phase::Initializing {
            self.phase = Phase::Animating;
        }
    }

    /// 进入 Done
    ///
    /// 返回是否发生了状态边沿（已完成时再次调用返回 false）。
    pub fn finish(&mut self) -> bool {
        if self.is_done() {
            return false;
        }
        self.phase = Phase::Done;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_transitions() {
        let mut state = AnimationState::new("abc");
        assert_eq!(state.phase, Phase::Initializing);

        state.begin();
        assert_eq!(state.phase, Phase::Animating);

        assert!(state.finish());
        assert!(!state.finish());
        state.begin();
        assert!(state.is_done());
    }

    #[test]
    fn test_state_serialization() {
        let state = AnimationState {
            current_text: "x".to_string(),
            iteration: 3,
            phase: Phase::Animating,
            colors: None,
        };
        let json = serde_json::to_string(&state).unwrap();
        let restored: AnimationState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);

        assert!(!json.contains("colors"));

        let missing_phase: AnimationState =
            serde_json::from_str(r#"{"current_text":"y","iteration":1}"#).unwrap();
        assert_eq!(missing_phase.phase, Phase::Initializing);
        assert_eq!(missing_phase.colors, None);
    }
}
