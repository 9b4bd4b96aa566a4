//! 配置数据结构定义
//!
//! 定义应用程序的配置结构体和验证逻辑

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// 配置文件结构
///
/// 必填项 `url`、`session` 以 `Option` 形式读取，缺失时由
/// [`validate_config`] 报告为缺少配置项，而不是笼统的解析失败。
/// 未知字段会被忽略。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// API基础地址
    pub url: Option<String>,
    /// 会话标识，作为请求路径的最后一段
    pub session: Option<String>,
    /// API密钥，通过 `x-api-key` 请求头发送
    pub token: Option<String>,
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// 请求超时时间（秒），未设置时使用HTTP客户端默认值
    pub request_timeout_seconds: Option<u64>,
}

/// 目标端点配置
///
/// 构造后不可变，由发送器独占持有。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    base_url: String,
    session: String,
    token: Option<String>,
}

impl EndpointConfig {
    /// 创建端点配置
    ///
    /// 只检查必填项是否存在，URL格式错误要到真正发送时才会暴露。
    ///
    /// # 参数
    /// * `base_url` - API基础地址
    /// * `session` - 会话标识
    /// * `token` - 可选的API密钥，空字符串视为未设置
    pub fn new(
        base_url: impl Into<String>,
        session: impl Into<String>,
        token: Option<String>,
    ) -> Result<Self, ConfigError> {
        let base_url = base_url.into();
        let session = session.into();

        if base_url.trim().is_empty() {
            return Err(ConfigError::MissingKey {
                key: "url".to_string(),
            });
        }
        if session.trim().is_empty() {
            return Err(ConfigError::MissingKey {
                key: "session".to_string(),
            });
        }

        Ok(Self {
            base_url,
            session,
            token: token.filter(|t| !t.is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &str {
        &self.session
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// 请求地址：`{base_url}/{session}`
    pub fn endpoint_url(&self) -> String {
        format!("{}/{}", self.base_url, self.session)
    }
}

impl Config {
    /// 提取端点配置
    pub fn endpoint(&self) -> Result<EndpointConfig, ConfigError> {
        let url = self.url.clone().ok_or_else(|| ConfigError::MissingKey {
            key: "url".to_string(),
        })?;
        let session = self.session.clone().ok_or_else(|| ConfigError::MissingKey {
            key: "session".to_string(),
        })?;
        EndpointConfig::new(url, session, self.token.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: None,
            session: None,
            token: None,
            log_level: default_log_level(),
            request_timeout_seconds: None,
        }
    }
}

// 默认值函数
fn default_log_level() -> String {
    "info".to_string()
}

/// 配置验证函数
///
/// # 参数
/// * `config` - 要验证的配置
///
/// # 返回
/// * `Result<(), ConfigError>` - 验证结果
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // 必填项
    config.endpoint()?;

    // 验证日志级别
    let valid_log_levels = ["debug", "info", "warn", "error"];
    if !valid_log_levels.contains(&config.log_level.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "无效的日志级别: {}，支持的级别: {:?}",
            config.log_level, valid_log_levels
        )));
    }

    if config.request_timeout_seconds == Some(0) {
        return Err(ConfigError::ValidationError(
            "请求超时时间不能为0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> Config {
        Config {
            url: Some("http://localhost:3000/client/sendMessage".to_string()),
            session: Some("default".to_string()),
            token: Some("secret".to_string()),
            log_level: "info".to_string(),
            request_timeout_seconds: None,
        }
    }

    #[test]
    fn test_valid_config() {
        let config = create_test_config();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_missing_url() {
        let mut config = create_test_config();
        config.url = None;
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { ref key } if key == "url"));
    }

    #[test]
    fn test_blank_session_counts_as_missing() {
        let mut config = create_test_config();
        config.session = Some("  ".to_string());
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { ref key } if key == "session"));
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = create_test_config();
        config.log_level = "verbose".to_string();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = create_test_config();
        config.request_timeout_seconds = Some(0);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_endpoint_url_concatenation() {
        let endpoint = create_test_config().endpoint().unwrap();
        assert_eq!(
            endpoint.endpoint_url(),
            "http://localhost:3000/client/sendMessage/default"
        );
        assert_eq!(endpoint.token(), Some("secret"));
    }

    #[test]
    fn test_empty_token_treated_as_absent() {
        let endpoint = EndpointConfig::new("http://api", "s1", Some(String::new())).unwrap();
        assert_eq!(endpoint.token(), None);
    }
}
