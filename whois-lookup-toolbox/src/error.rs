//! 统一错误类型定义

use serde::Serialize;
use thiserror::Error;

/// WHOIS 工具箱错误类型
///
/// `Display` 文本直接展示给终端用户。
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum ToolboxError {
    /// 输入校验错误
    #[error("{0}")]
    ValidationError(String),

    /// 配置错误（如缺少 API key）
    #[error("{0}")]
    ConfigError(String),

    /// 网络错误
    #[error("API request failed: {0}")]
    NetworkError(String),

    /// 请求超时
    #[error("API request timed out: {0}")]
    Timeout(String),

    /// API 返回了非 `ok` 状态
    #[error("{0}")]
    ApiError(String),

    /// 响应无法解析
    #[error("Invalid response: {0}")]
    ParseError(String),
}

/// 工具箱 Result 类型别名
pub type ToolboxResult<T> = std::result::Result<T, ToolboxError>;
