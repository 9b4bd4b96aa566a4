//! 通知模块
//!
//! 提供消息体构建和WAPI通知发送功能

pub mod payload;
pub mod request;
pub mod sender;
pub mod wapi;

// 重新导出主要类型
pub use payload::{build_payloads, format_text, MediaOptions, OutboundPayload};
pub use request::{NotificationData, NotificationRequest};
pub use sender::NotificationService;
pub use wapi::{create_service, WapiNotificationService, API_KEY_HEADER};
