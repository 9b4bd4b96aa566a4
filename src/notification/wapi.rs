//! WAPI通知发送器模块
//!
//! 把通知请求逐条POST到 `{url}/{session}`

use crate::config::types::{Config, EndpointConfig};
use crate::error::{NotificationError, Result};
use crate::notification::payload::{build_payloads, OutboundPayload};
use crate::notification::request::NotificationRequest;
use crate::notification::sender::NotificationService;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, info, info_span, Instrument};
use uuid::Uuid;

/// API密钥请求头
pub const API_KEY_HEADER: &str = "x-api-key";

/// WAPI通知发送器
///
/// 构造后只持有只读状态，可在多个任务间共享。
#[derive(Debug, Clone)]
pub struct WapiNotificationService {
    /// HTTP客户端
    client: Client,
    /// 目标端点
    endpoint: EndpointConfig,
}

/// 根据配置创建通知服务
///
/// 只检查 `url` 和 `session` 是否存在，缺少时返回配置错误；
/// `log_level` 等其他配置项不影响服务创建。`request_timeout_seconds`
/// 为 0 时按未设置处理。
///
/// # 参数
/// * `config` - 配置
///
/// # 返回
/// * `Result<WapiNotificationService>` - 服务实例
pub fn create_service(config: &Config) -> Result<WapiNotificationService> {
    let endpoint = config.endpoint()?;
    let timeout = config
        .request_timeout_seconds
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs);
    WapiNotificationService::with_timeout(endpoint, timeout)
}

impl WapiNotificationService {
    /// 创建发送器，使用HTTP客户端默认超时
    pub fn new(endpoint: EndpointConfig) -> Result<Self> {
        Self::with_timeout(endpoint, None)
    }

    /// 创建发送器
    ///
    /// # 参数
    /// * `endpoint` - 目标端点
    /// * `timeout` - 单个请求的超时时间，`None` 表示不设置
    pub fn with_timeout(endpoint: EndpointConfig, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| NotificationError::ClientBuild(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &EndpointConfig {
        &self.endpoint
    }

    pub fn endpoint_url(&self) -> String {
        self.endpoint.endpoint_url()
    }

    /// 发送单个消息体
    async fn post_payload(
        &self,
        url: &str,
        payload: &OutboundPayload,
    ) -> std::result::Result<(), NotificationError> {
        let mut request = self.client.post(url).json(payload);
        if let Some(token) = self.endpoint.token() {
            request = request.header(API_KEY_HEADER, token);
        }

        let response = request.send().await?;
        let status = response.status();
        info!(kind = payload.kind(), status = %status, "消息已发送");

        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(NotificationError::HttpStatus {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl NotificationService for WapiNotificationService {
    async fn send_message(&self, request: &NotificationRequest) {
        let url = self.endpoint_url();
        let span = info_span!(
            "wapi_dispatch",
            dispatch_id = %Uuid::new_v4(),
            payloads = tracing::field::Empty
        );
        let payloads = span.in_scope(|| build_payloads(request));
        span.record("payloads", payloads.len());

        async {
            debug!(url = %url, "开始投递通知");
            for (index, payload) in payloads.iter().enumerate() {
                if let Err(e) = self.post_payload(&url, payload).await {
                    error!(index, kind = payload.kind(), "使用wapi发送通知失败: {}", e);
                }
            }
        }
        .instrument(span)
        .await
    }

    fn name(&self) -> &str {
        "wapi"
    }
}
