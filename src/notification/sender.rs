//! 通知服务trait
//!
//! 宿主平台调用的通知服务接口

use crate::notification::request::NotificationRequest;
use async_trait::async_trait;

/// 通知服务trait
///
/// 投递是尽力而为的：实现方自行记录失败，调用方永远不会收到错误。
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// 发送一条通知
    ///
    /// # 参数
    /// * `request` - 通知请求
    async fn send_message(&self, request: &NotificationRequest);

    /// 服务名称
    fn name(&self) -> &str;
}
