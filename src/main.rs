//! wapi-notify 主程序入口
//!
//! 从命令行发送WAPI通知

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error};
use wapi_notify::cli::args::{Args, Commands};
use wapi_notify::cli::commands::{
    Command, InitCommand, SendCommand, ValidateCommand, VersionCommand,
};
use wapi_notify::config::TomlConfigLoader;
use wapi_notify::logging::{LogConfig, LoggingSystem};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _logging_system =
        LoggingSystem::setup_logging(resolve_log_config(&args)).context("初始化日志系统失败")?;

    debug!("wapi-notify v{} 启动", wapi_notify::VERSION);

    if let Err(e) = execute_command(&args).await {
        error!("命令执行失败: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// 确定日志配置：`--log-level`，`--verbose`，配置文件，最后默认 info
///
/// 日志系统尚未初始化，读取配置文件失败时静默回退。
fn resolve_log_config(args: &Args) -> LogConfig {
    let file_level = if args.log_level.is_none() && !args.verbose {
        std::fs::read_to_string(args.get_config_path())
            .ok()
            .and_then(|content| {
                TomlConfigLoader::new(true)
                    .parse_unvalidated(&content)
                    .ok()
            })
            .map(|config| config.log_level)
    } else {
        None
    };

    LogConfig {
        json_format: args.json_logs,
        ..LogConfig::resolve(
            args.log_level.clone().map(Into::into),
            args.verbose,
            file_level.as_deref(),
        )
    }
}

/// 执行CLI命令
async fn execute_command(args: &Args) -> Result<()> {
    let command: Box<dyn Command> = match &args.command {
        Commands::Send { .. } => Box::new(SendCommand),
        Commands::Init { .. } => Box::new(InitCommand),
        Commands::Validate { .. } => Box::new(ValidateCommand),
        Commands::Version { .. } => Box::new(VersionCommand),
    };

    command.execute(args).await.map_err(|e| anyhow::anyhow!(e))
}
