//! 解码器错误定义
//!
//! 帧组装状态机本身不会失败，错误只出现在配置加载和输入适配的边界上

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StreletzError {
    /// 选项取值非法
    #[error("Invalid option `{name}`: {reason}")]
    InvalidOption { name: String, reason: String },

    /// 采集输入格式错误
    #[error("Invalid input at line {line}: {reason}")]
    InvalidInput { line: usize, reason: String },

    /// 读写错误
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON解析错误
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StreletzError {
    pub fn invalid_option(name: &str, reason: impl Into<String>) -> Self {
        StreletzError::InvalidOption {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    pub fn invalid_input(line: usize, reason: impl Into<String>) -> Self {
        StreletzError::InvalidInput {
            line,
            reason: reason.into(),
        }
    }
}
