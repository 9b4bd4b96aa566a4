//! 错误处理模块
//!
//! 定义应用程序的统一错误类型

use thiserror::Error;

/// wapi-notify 的主要错误类型
#[derive(Error, Debug)]
pub enum WapiNotifyError {
    /// 配置相关错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 通知投递相关错误
    #[error("通知错误: {0}")]
    Notification(#[from] NotificationError),

    /// IO错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    /// JSON序列化/反序列化错误
    #[error("JSON错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 其他错误
    #[error("其他错误: {0}")]
    Other(#[from] anyhow::Error),
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 配置文件解析错误
    #[error("配置文件解析失败: {0}")]
    ParseError(String),

    /// 配置验证错误
    #[error("配置验证失败: {0}")]
    ValidationError(String),

    /// 配置文件不存在
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    /// 环境变量替换错误
    #[error("环境变量替换失败: {var}")]
    EnvVarError { var: String },

    /// 缺少必填配置项
    #[error("缺少必填配置项: {key}")]
    MissingKey { key: String },
}

/// 通知投递错误类型
///
/// 这些错误只在发送器内部流转，由 `send_message` 记录日志后吞掉。
#[derive(Error, Debug)]
pub enum NotificationError {
    /// 网络或连接失败
    #[error("HTTP请求失败: {0}")]
    Transport(#[from] reqwest::Error),

    /// 非2xx响应
    #[error("HTTP状态异常: {status} - {body}")]
    HttpStatus { status: u16, body: String },

    /// HTTP客户端创建失败
    #[error("创建HTTP客户端失败: {0}")]
    ClientBuild(String),
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, WapiNotifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_message_names_the_key() {
        let err: WapiNotifyError = ConfigError::MissingKey {
            key: "session".to_string(),
        }
        .into();
        assert!(err.to_string().contains("session"));
        assert!(matches!(err, WapiNotifyError::Config(_)));
    }

    #[test]
    fn test_http_status_error_display() {
        let err = NotificationError::HttpStatus {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP状态异常: 502 - bad gateway");
    }
}
