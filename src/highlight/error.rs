//! 高亮模块统一错误处理
//!
//! 提供结构化错误类型和错误处理机制

use std::fmt;

use thiserror::Error;

/// 高亮错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HighlightError {
    /// 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),

    /// 输入验证错误
    #[error("输入无效: {0}")]
    InvalidInput(String),

    /// 解析错误
    #[error("解析错误: {0}")]
    ParseError(String),

    /// 序列化错误
    #[error("序列化错误: {0}")]
    SerializationError(String),

    /// 读写错误
    #[error("读写错误: {0}")]
    IoError(String),

    /// 匹配器构建失败
    #[error("匹配器构建失败: {0}")]
    MatcherError(String),

    /// 节点已脱离文档
    #[error("节点已脱离文档: {0}")]
    DetachedNode(String),

    /// DOM 操作错误
    #[error("DOM操作错误: {0}")]
    DomError(String),
}

impl HighlightError {
    /// 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            HighlightError::ConfigError(_) => ErrorSeverity::Critical,
            HighlightError::InvalidInput(_) => ErrorSeverity::Info,
            HighlightError::ParseError(_) => ErrorSeverity::Error,
            HighlightError::SerializationError(_) => ErrorSeverity::Error,
            HighlightError::IoError(_) => ErrorSeverity::Error,
            HighlightError::MatcherError(_) => ErrorSeverity::Critical,
            HighlightError::DetachedNode(_) => ErrorSeverity::Warning,
            HighlightError::DomError(_) => ErrorSeverity::Warning,
        }
    }

    /// 获取错误类别
    pub fn category(&self) -> ErrorCategory {
        match self {
            HighlightError::ConfigError(_) => ErrorCategory::Configuration,
            HighlightError::InvalidInput(_) => ErrorCategory::Input,
            HighlightError::ParseError(_) => ErrorCategory::Parsing,
            HighlightError::SerializationError(_) => ErrorCategory::Serialization,
            HighlightError::IoError(_) => ErrorCategory::Io,
            HighlightError::MatcherError(_) => ErrorCategory::Matching,
            HighlightError::DetachedNode(_) | HighlightError::DomError(_) => ErrorCategory::Document,
        }
    }

    /// 是否为文档变更导致的错误（可在下一次更新时自动修正）
    pub fn is_document_error(&self) -> bool {
        self.category() == ErrorCategory::Document
    }

    /// 创建带上下文的错误
    pub fn with_context<T: fmt::Display>(mut self, context: T) -> Self {
        let new_msg = format!("{} (上下文: {})", self.message(), context);

        match &mut self {
            HighlightError::ConfigError(ref mut msg)
            | HighlightError::InvalidInput(ref mut msg)
            | HighlightError::ParseError(ref mut msg)
            | HighlightError::SerializationError(ref mut msg)
            | HighlightError::IoError(ref mut msg)
            | HighlightError::MatcherError(ref mut msg)
            | HighlightError::DetachedNode(ref mut msg)
            | HighlightError::DomError(ref mut msg) => *msg = new_msg,
        }

        self
    }

    fn message(&self) -> &str {
        match self {
            HighlightError::ConfigError(msg)
            | HighlightError::InvalidInput(msg)
            | HighlightError::ParseError(msg)
            | HighlightError::SerializationError(msg)
            | HighlightError::IoError(msg)
            | HighlightError::MatcherError(msg)
            | HighlightError::DetachedNode(msg)
            | HighlightError::DomError(msg) => msg,
        }
    }
}

/// 错误严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Parsing,
    Serialization,
    Io,
    Matching,
    Document,
}

/// 标准错误转换
impl From<std::io::Error> for HighlightError {
    fn from(error: std::io::Error) -> Self {
        HighlightError::IoError(error.to_string())
    }
}

impl From<serde_json::Error> for HighlightError {
    fn from(error: serde_json::Error) -> Self {
        if error.is_syntax() || error.is_eof() {
            HighlightError::ParseError(format!("JSON解析错误: {}", error))
        } else {
            HighlightError::SerializationError(format!("JSON序列化错误: {}", error))
        }
    }
}

impl From<toml::de::Error> for HighlightError {
    fn from(error: toml::de::Error) -> Self {
        HighlightError::ParseError(format!("TOML解析错误: {}", error))
    }
}

impl From<regex::Error> for HighlightError {
    fn from(error: regex::Error) -> Self {
        HighlightError::MatcherError(error.to_string())
    }
}

/// 错误结果类型别名
pub type HighlightResult<T> = Result<T, HighlightError>;

/// 按严重程度记录错误
pub fn log_error(error: &HighlightError) {
    match error.severity() {
        ErrorSeverity::Info => tracing::info!("高亮信息: {}", error),
        ErrorSeverity::Warning => tracing::warn!("高亮警告: {}", error),
        ErrorSeverity::Error => tracing::error!("高亮错误: {}", error),
        ErrorSeverity::Critical => tracing::error!("高亮严重错误: {}", error),
    }
}
