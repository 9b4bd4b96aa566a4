//! 命令行参数定义
//!
//! 使用clap定义应用程序的命令行接口

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// wapi-notify - WAPI通知投递工具
#[derive(Parser, Debug, Clone)]
#[command(
    name = "wapi-notify",
    version = crate::VERSION,
    about = crate::APP_DESCRIPTION,
    long_about = None
)]
pub struct Args {
    /// 配置文件路径
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "配置文件路径",
        env = "WAPI_NOTIFY_CONFIG"
    )]
    pub config: Option<PathBuf>,

    /// 日志级别，未指定时使用配置文件中的 log_level
    #[arg(
        short,
        long,
        value_enum,
        help = "日志级别",
        env = "WAPI_NOTIFY_LOG_LEVEL"
    )]
    pub log_level: Option<LogLevel>,

    /// 是否启用详细输出，未指定 `--log-level` 时日志级别为 debug
    #[arg(short, long, help = "启用详细输出（debug日志）")]
    pub verbose: bool,

    /// 以JSON格式输出日志
    #[arg(long, help = "以JSON格式输出日志")]
    pub json_logs: bool,

    /// 子命令
    #[command(subcommand)]
    pub command: Commands,
}

/// 日志级别枚举
#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum LogLevel {
    /// 调试级别
    Debug,
    /// 信息级别
    Info,
    /// 警告级别
    Warn,
    /// 错误级别
    Error,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// 子命令定义
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// 发送一条通知
    Send {
        /// 消息正文
        #[arg(value_name = "MESSAGE", default_value = "", help = "消息正文")]
        message: String,

        /// 消息标题
        #[arg(short, long, help = "消息标题")]
        title: Option<String>,

        /// 目标会话ID
        #[arg(long, help = "目标会话ID，例如 12345@c.us")]
        target: Option<String>,

        /// 媒体地址，可重复指定
        #[arg(short, long = "media-url", value_name = "URL", help = "媒体地址，可重复指定")]
        media_url: Vec<String>,

        /// 把文本作为第一个媒体的说明文字
        #[arg(long, help = "把文本作为第一个媒体的说明文字")]
        ascaption: bool,

        /// 附加数据（JSON对象）
        #[arg(long, value_name = "JSON", help = "附加数据，JSON对象，例如 '{\"media_url\": \"...\"}'")]
        data: Option<String>,

        /// 覆盖配置文件中的 url
        #[arg(long, help = "API基础地址", env = "WAPI_NOTIFY_URL")]
        url: Option<String>,

        /// 覆盖配置文件中的 session
        #[arg(long, help = "会话标识", env = "WAPI_NOTIFY_SESSION")]
        session: Option<String>,

        /// 覆盖配置文件中的 token
        #[arg(long, help = "API密钥", env = "WAPI_NOTIFY_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// 只打印消息体，不发送
        #[arg(long, help = "只打印消息体，不发送")]
        dry_run: bool,
    },

    /// 初始化配置文件
    Init {
        /// 配置文件路径
        #[arg(
            value_name = "FILE",
            help = "配置文件路径",
            default_value = "wapi-notify.toml"
        )]
        config_path: PathBuf,

        /// 是否覆盖现有文件
        #[arg(short, long, help = "覆盖现有文件")]
        force: bool,
    },

    /// 验证配置文件
    Validate {
        /// 配置文件路径
        #[arg(value_name = "FILE", help = "配置文件路径")]
        config_path: Option<PathBuf>,

        /// 是否显示详细信息
        #[arg(short, long, help = "显示详细信息")]
        verbose: bool,
    },

    /// 显示版本信息
    Version {
        /// 输出格式
        #[arg(short, long, value_enum, default_value = "text", help = "输出格式")]
        format: OutputFormat,
    },
}

/// 输出格式枚举
#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum OutputFormat {
    /// 文本格式
    Text,
    /// JSON格式
    Json,
}

impl Args {
    /// 获取配置文件路径
    pub fn get_config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::loader::get_default_config_path)
    }

    /// 是否启用详细输出
    pub fn is_verbose(&self) -> bool {
        self.verbose || matches!(self.log_level, Some(LogLevel::Debug))
    }
}
