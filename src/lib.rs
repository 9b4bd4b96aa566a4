//! wapi-notify - WAPI通知投递适配器
//!
//! 把一条通知（正文、标题、目标会话、可选媒体地址）翻译成一个或多个
//! JSON消息体，逐条POST到 `{url}/{session}`：
//! - 文本、媒体、带说明文字的媒体三种消息体
//! - 可选的 `x-api-key` 认证
//! - 尽力而为的投递，失败只记录日志
//! - TOML配置与环境变量替换
//! - 结构化日志记录

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod notification;

// 重新导出主要类型
pub use config::{Config, EndpointConfig};
pub use error::WapiNotifyError;
pub use notification::{
    create_service, NotificationData, NotificationRequest, NotificationService, OutboundPayload,
    WapiNotificationService,
};

/// 应用程序版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 应用程序名称
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// 应用程序描述
pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
