//! # Config 模块
//!
//! 动画配置：源/目标文本、动作、字符集与 tick 预算覆盖。
//!
//! ## 字符集优先级
//!
//! 1. `charsets` 非空时，按路径组合的字符集替换 `alphabet`
//! 2. 否则使用 `alphabet`（默认为基础可打印字符集）
//! 3. 最后追加 `extra_alphabet`
//!
//! ## JSON 输入
//!
//! [`CipherConfig::from_json`] 会把数字、布尔形式的 `source_text` 转成字符串；
//! `null`、缺失、数组或对象都会被拒绝。

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::action::{Action, TickBudget};
use crate::alphabet::{Alphabet, BASE_PRINTABLE_CHARACTERS};
use crate::charset::try_generate_character_set;
use crate::color::DEFAULT_PALETTE;
use crate::error::ConfigError;

/// 动画配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CipherConfig {
    /// 源文本（必填）
    pub source_text: String,

    /// 目标文本（仅 transform 必填）
    #[serde(default)]
    pub target_text: Option<String>,

    /// 动作
    #[serde(default)]
    pub action: Action,

    /// 替换字符表
    #[serde(default = "default_alphabet")]
    pub alphabet: String,

    /// 字符集路径（如 `"matrix.katakana"`），非空时替换 `alphabet`
    #[serde(default)]
    pub charsets: Vec<String>,

    /// 追加到字符表末尾的字符
    #[serde(default)]
    pub extra_alphabet: String,

    /// 迭代间隔覆盖（毫秒）；0 表示不调度
    #[serde(default)]
    pub iteration_speed_ms: Option<u64>,

    /// 最大迭代次数覆盖
    #[serde(default)]
    pub max_iterations: Option<u32>,

    /// 以空格切分的词元为单元
    #[serde(default)]
    pub preserve_spaces: bool,

    /// 输出逐字符颜色标签
    #[serde(default)]
    pub colorize_units: bool,

    /// 颜色标签调色板
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,

    /// 暂停（不调度 tick）
    #[serde(default)]
    pub paused: bool,

    /// 随机种子；缺省时使用系统熵
    #[serde(default)]
    pub seed: Option<u64>,
}

// 默认值函数
fn default_alphabet() -> String {
    BASE_PRINTABLE_CHARACTERS.to_string()
}

fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|tag| tag.to_string()).collect()
}

impl CipherConfig {
    /// 以默认值创建配置
    pub fn new(source_text: impl Into<String>) -> Self {
        Self {
            source_text: source_text.into(),
            target_text: None,
            action: Action::default(),
            alphabet: default_alphabet(),
            charsets: Vec::new(),
            extra_alphabet: String::new(),
            iteration_speed_ms: None,
            max_iterations: None,
            preserve_spaces: false,
            colorize_units: false,
            palette: default_palette(),
            paused: false,
            seed: None,
        }
    }

    pub fn with_target(mut self, target_text: impl Into<String>) -> Self {
        self.target_text = Some(target_text.into());
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    pub fn with_alphabet(mut self, alphabet: impl Into<String>) -> Self {
        self.alphabet = alphabet.into();
        self
    }

    pub fn with_charsets<S: Into<String>>(mut self, charsets: impl IntoIterator<Item = S>) -> Self {
        self.charsets = charsets.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_extra_alphabet(mut self, extra: impl Into<String>) -> Self {
        self.extra_alphabet = extra.into();
        self
    }

    pub fn with_iteration_speed_ms(mut self, speed_ms: u64) -> Self {
        self.iteration_speed_ms = Some(speed_ms);
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn with_preserve_spaces(mut self, preserve_spaces: bool) -> Self {
        self.preserve_spaces = preserve_spaces;
        self
    }

    pub fn with_colorize_units(mut self, colorize_units: bool) -> Self {
        self.colorize_units = colorize_units;
        self
    }

    pub fn with_palette<S: Into<String>>(mut self, palette: impl IntoIterator<Item = S>) -> Self {
        self.palette = palette.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// 从 JSON 文本解析并校验
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(json).map_err(malformed)?;
        Self::from_value(value)
    }

    /// 从 JSON 值解析并校验
    pub fn from_value(mut value: Value) -> Result<Self, ConfigError> {
        let Value::Object(map) = &mut value else {
            return Err(ConfigError::Malformed {
                message: format!("配置必须是 JSON 对象，实际类型为 {}", json_type(&value)),
            });
        };

        let Some(slot) = map.get_mut("source_text") else {
            return Err(ConfigError::MissingSourceText);
        };
        match slot {
            Value::Null => return Err(ConfigError::MissingSourceText),
            Value::String(_) => {}
            Value::Number(_) | Value::Bool(_) => {
                let coerced = slot.to_string();
                *slot = Value::String(coerced);
            }
            Value::Array(_) | Value::Object(_) => {
                return Err(ConfigError::SourceTextNotString {
                    found: json_type(slot).to_string(),
                });
            }
        }

        let config: Self = serde_json::from_value(value).map_err(malformed)?;
        config.validate()?;
        Ok(config)
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.action == Action::Transform && self.target_text.is_none() {
            return Err(ConfigError::MissingTargetText);
        }
        self.character_set()?;
        Ok(())
    }

    /// 组合后的替换字符集
    pub fn character_set(&self) -> Result<Alphabet, ConfigError> {
        let mut characters = if self.charsets.is_empty() {
            self.alphabet.clone()
        } else {
            try_generate_character_set(&self.charsets)?
        };
        characters.push_str(&self.extra_alphabet);
        Alphabet::new(&characters)
    }

    /// 应用覆盖后的 tick 预算
    pub fn budget(&self) -> TickBudget {
        let mut budget = self.action.default_budget();
        if let Some(speed_ms) = self.iteration_speed_ms {
            budget.iteration_speed = Duration::from_millis(speed_ms);
        }
        if let Some(max_iterations) = self.max_iterations {
            budget.max_iterations = Some(max_iterations);
        }
        budget
    }

    /// 目标文本；未设置时为空串
    pub fn target(&self) -> &str {
        self.target_text.as_deref().unwrap_or("")
    }
}

fn malformed(err: serde_json::Error) -> ConfigError {
    ConfigError::Malformed {
        message: err.to_string(),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_json() {
        let config = CipherConfig::from_json(r#"{"source_text": "hello"}"#).unwrap();
        assert_eq!(config, CipherConfig::new("hello"));
        assert_eq!(config.action, Action::Decode);
        assert_eq!(config.palette.len(), 5);
        assert_eq!(config.character_set().unwrap(), *Alphabet::base());
    }

    #[test]
    fn test_source_text_coercion() {
        let config = CipherConfig::from_json(r#"{"source_text": 404}"#).unwrap();
        assert_eq!(config.source_text, "404");
        let config = CipherConfig::from_json(r#"{"source_text": 1.5}"#).unwrap();
        assert_eq!(config.source_text, "1.5");
        let config = CipherConfig::from_json(r#"{"source_text": false}"#).unwrap();
        assert_eq!(config.source_text, "false");
    }

    #[test]
    fn test_source_text_rejected() {
        assert_eq!(
            CipherConfig::from_json(r#"{"action": "wave"}"#),
            Err(ConfigError::MissingSourceText)
        );
        assert_eq!(
            CipherConfig::from_json(r#"{"source_text": null}"#),
            Err(ConfigError::MissingSourceText)
        );
        assert_eq!(
            CipherConfig::from_json(r#"{"source_text": ["a"]}"#),
            Err(ConfigError::SourceTextNotString {
                found: "array".to_string()
            })
        );
        assert_eq!(
            CipherConfig::from_json(r#"{"source_text": {"a": 1}}"#),
            Err(ConfigError::SourceTextNotString {
                found: "object".to_string()
            })
        );
    }

    #[test]
    fn test_transform_requires_target() {
        assert_eq!(
            CipherConfig::from_json(r#"{"source_text": "a", "action": "transform"}"#),
            Err(ConfigError::MissingTargetText)
        );
        let config = CipherConfig::from_json(
            r#"{"source_text": "a", "action": "transform", "target_text": ""}"#,
        )
        .unwrap();
        assert_eq!(config.target(), "");
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            CipherConfig::from_json("{"),
            Err(ConfigError::Malformed { .. })
        ));
        assert!(matches!(
            CipherConfig::from_json(r#"{"source_text": "a", "action": "spin"}"#),
            Err(ConfigError::Malformed { .. })
        ));
        assert!(matches!(
            CipherConfig::from_json("[]"),
            Err(ConfigError::Malformed { .. })
        ));
    }

    #[test]
    fn test_character_set_precedence() {
        let config = CipherConfig::new("x").with_alphabet("ab").with_extra_alphabet("c");
        assert_eq!(config.character_set().unwrap().to_string(), "abc");

        let config = config.with_charsets(["matrix.numbers"]);
        let set = config.character_set().unwrap();
        assert!(!set.contains('a'));
        assert!(set.contains('c'));

        let config = CipherConfig::new("x").with_charsets(["nope"]);
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnknownCharset {
                path: "nope".to_string()
            })
        );

        let config = CipherConfig::new("x").with_alphabet("");
        assert_eq!(config.validate(), Err(ConfigError::EmptyAlphabet));
    }

    #[test]
    fn test_budget_overrides() {
        let config = CipherConfig::new("x").with_action(Action::Scramble);
        assert_eq!(config.budget().max_iterations, None);

        let config = config.with_max_iterations(12).with_iteration_speed_ms(0);
        let budget = config.budget();
        assert_eq!(budget.max_iterations, Some(12));
        assert!(!budget.is_schedulable());
    }
}
