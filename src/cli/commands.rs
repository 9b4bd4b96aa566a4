//! 命令处理逻辑
//!
//! 实现各种CLI命令的处理逻辑

use crate::cli::args::{Args, Commands, OutputFormat};
use crate::config::{Config, ConfigLoader, TomlConfigLoader};
use crate::error::{ConfigError, Result};
use crate::notification::{
    build_payloads, create_service, NotificationData, NotificationRequest, NotificationService,
};
use async_trait::async_trait;
use std::path::Path;

/// 示例配置文件
const SAMPLE_CONFIG: &str = include_str!("../../templates/config.toml");

/// 命令处理器trait
#[async_trait]
pub trait Command: Send + Sync {
    /// 执行命令
    async fn execute(&self, args: &Args) -> Result<()>;
}

/// 版本命令
pub struct VersionCommand;

#[async_trait]
impl Command for VersionCommand {
    async fn execute(&self, args: &Args) -> Result<()> {
        if let Commands::Version { format } = &args.command {
            match format {
                OutputFormat::Json => {
                    let version_info = serde_json::json!({
                        "name": crate::APP_NAME,
                        "version": crate::VERSION,
                        "description": crate::APP_DESCRIPTION
                    });
                    println!("{}", serde_json::to_string_pretty(&version_info)?);
                }
                OutputFormat::Text => {
                    println!("{} v{}", crate::APP_NAME, crate::VERSION);
                    println!("{}", crate::APP_DESCRIPTION);
                }
            }
        }
        Ok(())
    }
}

/// 初始化命令
pub struct InitCommand;

#[async_trait]
impl Command for InitCommand {
    async fn execute(&self, args: &Args) -> Result<()> {
        if let Commands::Init { config_path, force } = &args.command {
            self.create_config_file(config_path, *force).await
        } else {
            Ok(())
        }
    }
}

impl InitCommand {
    /// 创建配置文件
    async fn create_config_file(&self, config_path: &Path, force: bool) -> Result<()> {
        if config_path.exists() && !force {
            eprintln!("配置文件已存在: {}", config_path.display());
            eprintln!("使用 --force 参数覆盖现有文件");
            return Ok(());
        }

        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        tokio::fs::write(config_path, SAMPLE_CONFIG).await?;

        println!("配置文件已创建: {}", config_path.display());
        println!("请编辑配置文件填写 url 和 session");

        Ok(())
    }
}

/// 验证命令
pub struct ValidateCommand;

#[async_trait]
impl Command for ValidateCommand {
    async fn execute(&self, args: &Args) -> Result<()> {
        if let Commands::Validate {
            config_path,
            verbose,
        } = &args.command
        {
            let config_file = config_path
                .clone()
                .unwrap_or_else(|| args.get_config_path());

            println!("验证配置文件: {}", config_file.display());

            let loader = TomlConfigLoader::new(true);
            let config = loader.load_from_file(&config_file).await?;

            println!("✅ 配置文件验证通过");
            if *verbose || args.is_verbose() {
                println!("  url: {}", config.url.as_deref().unwrap_or_default());
                println!("  session: {}", config.session.as_deref().unwrap_or_default());
                println!(
                    "  token: {}",
                    if config.token.is_some() { "已设置" } else { "未设置" }
                );
                println!("  log_level: {}", config.log_level);
                match config.request_timeout_seconds {
                    Some(secs) => println!("  request_timeout_seconds: {secs}"),
                    None => println!("  request_timeout_seconds: 默认"),
                }
            }
        }
        Ok(())
    }
}

/// 发送命令
pub struct SendCommand;

#[async_trait]
impl Command for SendCommand {
    async fn execute(&self, args: &Args) -> Result<()> {
        if let Commands::Send {
            message,
            title,
            target,
            media_url,
            ascaption,
            data,
            url,
            session,
            token,
            dry_run,
        } = &args.command
        {
            let request = Self::build_request(
                message,
                title.as_deref(),
                target.as_deref(),
                media_url,
                *ascaption,
                data.as_deref(),
            )?;

            if *dry_run {
                for payload in build_payloads(&request) {
                    println!("{}", serde_json::to_string_pretty(&payload)?);
                }
                return Ok(());
            }

            let config = Self::resolve_config(
                args,
                url.as_deref(),
                session.as_deref(),
                token.as_deref(),
            )
            .await?;
            let service = create_service(&config)?;
            tracing::debug!(endpoint = %service.endpoint_url(), "使用通知端点");

            service.send_message(&request).await;
        }
        Ok(())
    }
}

impl SendCommand {
    /// 根据命令行参数构建通知请求
    ///
    /// `--data` 先解析，显式的 `--media-url`、`--ascaption` 再覆盖其中的同名字段。
    pub fn build_request(
        message: &str,
        title: Option<&str>,
        target: Option<&str>,
        media_urls: &[String],
        ascaption: bool,
        data: Option<&str>,
    ) -> Result<NotificationRequest> {
        let data = match data {
            Some(raw) => NotificationData::from_value(serde_json::from_str(raw)?)?,
            None => NotificationData::default(),
        };

        let mut request = NotificationRequest::new(message).with_data(data);
        if let Some(title) = title {
            request = request.with_title(title);
        }
        if let Some(target) = target {
            request = request.with_target(target);
        }
        if !media_urls.is_empty() {
            request = request.with_media_urls(media_urls);
        }
        if ascaption {
            request = request.as_caption(true);
        }

        Ok(request)
    }

    /// 加载配置文件并应用命令行覆盖
    ///
    /// 命令行同时提供了 url 和 session 时，默认配置文件可以不存在。
    async fn resolve_config(
        args: &Args,
        url: Option<&str>,
        session: Option<&str>,
        token: Option<&str>,
    ) -> Result<Config> {
        let config_path = args.get_config_path();
        let overrides_complete = url.is_some() && session.is_some();

        let mut config = if args.config.is_none() && overrides_complete && !config_path.exists() {
            Config::default()
        } else {
            Self::load_unvalidated(&config_path).await?
        };

        if let Some(url) = url {
            config.url = Some(url.to_string());
        }
        if let Some(session) = session {
            config.session = Some(session.to_string());
        }
        if let Some(token) = token {
            config.token = Some(token.to_string());
        }

        Ok(config)
    }

    /// 读取配置文件，必填项留到覆盖之后再验证
    async fn load_unvalidated(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            }
            .into());
        }

        let content = tokio::fs::read_to_string(path).await?;
        let loader = TomlConfigLoader::new(true);
        loader.parse_unvalidated(&content)
    }
}
