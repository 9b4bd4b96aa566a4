//! 配置加载器实现
//!
//! 提供TOML配置文件解析、环境变量替换和错误处理功能

use crate::config::types::{validate_config, Config};
use crate::error::{ConfigError, Result};
use async_trait::async_trait;
use regex::Regex;
use std::path::{Path, PathBuf};

/// 配置加载器trait，定义配置加载接口
#[async_trait]
pub trait ConfigLoader: Send + Sync {
    /// 从文件加载配置
    ///
    /// # 参数
    /// * `path` - 配置文件路径
    ///
    /// # 返回
    /// * `Result<Config>` - 加载的配置或错误
    async fn load_from_file<P: AsRef<Path> + Send>(&self, path: P) -> Result<Config>;

    /// 从字符串加载配置
    async fn load_from_string(&self, content: &str) -> Result<Config>;

    /// 验证配置
    fn validate(&self, config: &Config) -> Result<()>;
}

/// TOML配置加载器实现
#[derive(Debug, Clone)]
pub struct TomlConfigLoader {
    /// 是否启用环境变量替换
    enable_env_substitution: bool,
}

impl Default for TomlConfigLoader {
    fn default() -> Self {
        Self::new(true)
    }
}

impl TomlConfigLoader {
    /// 创建新的TOML配置加载器
    ///
    /// # 参数
    /// * `enable_env_substitution` - 是否启用环境变量替换
    pub fn new(enable_env_substitution: bool) -> Self {
        Self {
            enable_env_substitution,
        }
    }

    /// 替换字符串中的 `${VAR_NAME}` 环境变量
    ///
    /// 以 `#` 开头的注释行保持原样。
    fn substitute_env_vars(&self, content: &str) -> Result<String> {
        if !self.enable_env_substitution {
            return Ok(content.to_string());
        }

        let env_var_regex = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}")
            .map_err(|e| ConfigError::ParseError(format!("正则表达式错误: {e}")))?;

        let mut result = String::with_capacity(content.len());

        for raw_line in content.split_inclusive('\n') {
            if raw_line.trim_start().starts_with('#') {
                result.push_str(raw_line);
                continue;
            }

            let mut line = raw_line.to_string();
            for captures in env_var_regex.captures_iter(raw_line) {
                let value = std::env::var(&captures[1]).map_err(|_| ConfigError::EnvVarError {
                    var: captures[1].to_string(),
                })?;
                line = line.replace(&captures[0], &value);
            }
            result.push_str(&line);
        }

        Ok(result)
    }

    /// 解析TOML内容，不做验证
    ///
    /// 供需要先合并其他来源（如命令行参数）再验证的调用方使用。
    pub fn parse_unvalidated(&self, content: &str) -> Result<Config> {
        let processed_content = self.substitute_env_vars(content)?;

        let config: Config = toml::from_str(&processed_content)
            .map_err(|e| ConfigError::ParseError(format!("TOML解析失败: {e}")))?;

        Ok(config)
    }
}

#[async_trait]
impl ConfigLoader for TomlConfigLoader {
    async fn load_from_file<P: AsRef<Path> + Send>(&self, path: P) -> Result<Config> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            }
            .into());
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::ParseError(format!("读取文件失败: {e}")))?;

        let config = self.parse_unvalidated(&content)?;
        self.validate(&config)?;

        tracing::info!("成功加载配置文件: {}", path.display());
        // token 不写入日志
        tracing::debug!(
            url = ?config.url,
            session = ?config.session,
            has_token = config.token.is_some(),
            "配置内容"
        );

        Ok(config)
    }

    async fn load_from_string(&self, content: &str) -> Result<Config> {
        let config = self.parse_unvalidated(content)?;
        self.validate(&config)?;

        tracing::debug!("成功解析配置字符串");

        Ok(config)
    }

    fn validate(&self, config: &Config) -> Result<()> {
        validate_config(config).map_err(Into::into)
    }
}

/// 获取默认配置文件路径
///
/// 当前目录存在 `wapi-notify.toml` 时优先使用，否则使用
/// 用户配置目录下的 `wapi-notify/config.toml`。
pub fn get_default_config_path() -> PathBuf {
    let local = PathBuf::from("wapi-notify.toml");
    if local.exists() {
        return local;
    }

    dirs::config_dir()
        .map(|config_dir| config_dir.join("wapi-notify").join("config.toml"))
        .unwrap_or(local)
}
