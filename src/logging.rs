//! 日志系统模块
//!
//! 初始化全局 tracing subscriber，并把 `log` crate 的记录桥接过来。
//! 日志统一写到标准错误，标准输出留给命令结果（如 `send --dry-run`）。

use log::LevelFilter;
use std::sync::OnceLock;
use tracing_subscriber::filter::{Directive, LevelFilter as TracingLevelFilter};
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter, Layer};

/// 全局初始化结果，整个进程只初始化一次
static INIT_RESULT: OnceLock<Result<(), String>> = OnceLock::new();

/// 日志配置结构
#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    /// 日志级别
    pub level: LevelFilter,
    /// 是否使用JSON格式
    pub json_format: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            json_format: false,
        }
    }
}

impl LogConfig {
    /// 从配置文件中的级别字符串构造，无法识别时回退到 info
    pub fn from_level_str(level: &str) -> Self {
        Self {
            level: level.parse().unwrap_or(LevelFilter::Info),
            ..Default::default()
        }
    }

    /// 按优先级确定日志级别
    ///
    /// 顺序：显式的 `--log-level`，`--verbose`（debug），配置文件的
    /// `log_level`，最后是 info。
    pub fn resolve(
        cli_level: Option<LevelFilter>,
        verbose: bool,
        file_level: Option<&str>,
    ) -> Self {
        if let Some(level) = cli_level {
            return Self {
                level,
                ..Default::default()
            };
        }
        if verbose {
            return Self {
                level: LevelFilter::Debug,
                ..Default::default()
            };
        }
        file_level.map(Self::from_level_str).unwrap_or_default()
    }
}

/// 日志系统管理器
#[derive(Debug)]
pub struct LoggingSystem {
    config: LogConfig,
}

impl LoggingSystem {
    /// 初始化日志系统
    ///
    /// 只有第一次调用的配置生效；第一次失败时后续调用返回同一个错误。
    pub fn setup_logging(config: LogConfig) -> anyhow::Result<Self> {
        INIT_RESULT
            .get_or_init(|| Self::perform_initialization(&config).map_err(|e| e.to_string()))
            .as_ref()
            .map_err(|e| anyhow::anyhow!("日志系统初始化失败: {}", e))?;

        Ok(Self { config })
    }

    fn perform_initialization(config: &LogConfig) -> anyhow::Result<()> {
        tracing_log::LogTracer::init().map_err(|e| anyhow::anyhow!("LogTracer初始化失败: {}", e))?;

        let env_filter =
            EnvFilter::from_default_env().add_directive(Self::level_directive(config.level));

        let fmt_layer = if config.json_format {
            fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_timer(fmt::time::ChronoUtc::rfc_3339())
                .with_current_span(true)
                .boxed()
        } else {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_timer(fmt::time::ChronoUtc::rfc_3339())
                .with_target(true)
                .boxed()
        };

        match registry().with(env_filter).with(fmt_layer).try_init() {
            Ok(()) => {
                tracing::debug!(level = %config.level, json = config.json_format, "日志系统已初始化");
                Ok(())
            }
            // 测试进程中可能已经有全局 subscriber
            Err(e) if e.to_string().contains("already been set") => Ok(()),
            Err(e) => Err(anyhow::anyhow!("tracing subscriber初始化失败: {}", e)),
        }
    }

    /// 将 log::LevelFilter 转换为 tracing 的过滤指令
    fn level_directive(level: LevelFilter) -> Directive {
        let level = match level {
            LevelFilter::Off => TracingLevelFilter::OFF,
            LevelFilter::Error => TracingLevelFilter::ERROR,
            LevelFilter::Warn => TracingLevelFilter::WARN,
            LevelFilter::Info => TracingLevelFilter::INFO,
            LevelFilter::Debug => TracingLevelFilter::DEBUG,
            LevelFilter::Trace => TracingLevelFilter::TRACE,
        };
        Directive::from(level)
    }

    /// 当前实例使用的配置
    pub fn config(&self) -> &LogConfig {
        &self.config
    }
}
