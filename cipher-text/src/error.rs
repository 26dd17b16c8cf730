//! # Error 模块
//!
//! 定义 cipher-text 中使用的错误类型。
//!
//! 只有配置阶段会失败：配置合法时，每个 tick 都是必然成功的纯计算。
//! 空文本、目标与源相同等退化输入不是错误，由各策略自行兜底。

use thiserror::Error;

/// 配置错误（即 InvalidConfiguration）
///
/// 在构造动画时立即报告，不重试，动画不会启动。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 缺少源文本
    #[error("缺少必需字段 'source_text'")]
    MissingSourceText,

    /// 源文本无法转换为字符串
    #[error("'source_text' 必须是字符串，实际类型为 {found}")]
    SourceTextNotString { found: String },

    /// transform 动作缺少目标文本
    #[error("动作 'transform' 需要提供 'target_text'")]
    MissingTargetText,

    /// 字符集为空
    #[error("字符集不能为空")]
    EmptyAlphabet,

    /// 未知的动作名称
    #[error("未知动作 '{name}'，可选值为 decode/encode/transform/scramble/wave")]
    UnknownAction { name: String },

    /// 未知的字符集路径
    #[error("未知字符集 '{path}'")]
    UnknownCharset { path: String },

    /// 配置格式错误
    #[error("配置格式错误 - {message}")]
    Malformed { message: String },
}

/// cipher-text 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CipherError {
    /// 配置错误
    #[error("无效配置: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}

/// Result 类型别名
pub type CipherResult<T> = Result<T, CipherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        insta::assert_snapshot!(
            ConfigError::MissingTargetText.to_string(),
            @"动作 'transform' 需要提供 'target_text'"
        );
        insta::assert_snapshot!(
            ConfigError::SourceTextNotString { found: "array".to_string() }.to_string(),
            @"'source_text' 必须是字符串，实际类型为 array"
        );
    }

    #[test]
    fn test_cipher_error_from_config_error() {
        let err: CipherError = ConfigError::EmptyAlphabet.into();
        assert_eq!(
            err,
            CipherError::InvalidConfiguration(ConfigError::EmptyAlphabet)
        );
        assert_eq!(err.to_string(), "无效配置: 字符集不能为空");
    }
}
