//! 消息体构建模块
//!
//! 把一次通知请求翻译成按顺序发送的JSON消息体

use crate::notification::request::NotificationRequest;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// 媒体附加选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaOptions {
    /// 说明文字
    pub caption: String,
}

/// 发往API的单个消息体
///
/// `contentType` 作为标签字段；`chatId` 始终出现在JSON中，未设置目标时为 `null`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "contentType")]
pub enum OutboundPayload {
    /// 纯文本消息
    #[serde(rename = "string")]
    Text {
        content: String,
        #[serde(rename = "chatId")]
        chat_id: Option<String>,
    },
    /// 通过URL发送的媒体，可带说明文字
    #[serde(rename = "MessageMediaFromURL")]
    Media {
        /// 媒体URL
        content: String,
        #[serde(rename = "chatId")]
        chat_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        options: Option<MediaOptions>,
    },
}

impl OutboundPayload {
    pub fn text(content: impl Into<String>, chat_id: Option<String>) -> Self {
        Self::Text {
            content: content.into(),
            chat_id,
        }
    }

    pub fn media(url: impl Into<String>, chat_id: Option<String>) -> Self {
        Self::Media {
            content: url.into(),
            chat_id,
            options: None,
        }
    }

    pub fn captioned_media(
        url: impl Into<String>,
        chat_id: Option<String>,
        caption: impl Into<String>,
    ) -> Self {
        Self::Media {
            content: url.into(),
            chat_id,
            options: Some(MediaOptions {
                caption: caption.into(),
            }),
        }
    }

    /// 消息种类，用于日志
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Media { options: None, .. } => "media",
            Self::Media {
                options: Some(_), ..
            } => "media_caption",
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Self::Text { content, .. } | Self::Media { content, .. } => content,
        }
    }

    pub fn caption(&self) -> Option<&str> {
        match self {
            Self::Media {
                options: Some(options),
                ..
            } => Some(&options.caption),
            _ => None,
        }
    }
}

/// 组合标题与正文
///
/// 标题非空时以 `*标题*` 开头，正文非空时再接换行和正文；
/// 标题为空时只返回正文。
pub fn format_text(title: &str, message: &str) -> String {
    if title.is_empty() {
        return message.to_string();
    }

    let mut text = format!("*{title}*");
    if !message.is_empty() {
        text.push('\n');
        text.push_str(message);
    }
    text
}

/// 根据请求构建消息体序列
///
/// 结果只取决于请求本身：
/// - 无媒体：一条文本消息（内容可能为空）
/// - 有媒体且 `ascaption`：第一个媒体带说明文字，其余媒体不带
/// - 有媒体且不 `ascaption`：标题或正文非空时先发一条文本，再逐个发媒体
pub fn build_payloads(request: &NotificationRequest) -> Vec<OutboundPayload> {
    let title = request.title_or_empty();
    let message = request.normalized_message();
    let chat_id = request.target.clone();
    let media_urls = request.data.media_urls();

    if request.data.ascaption && media_urls.len() > 1 {
        warn!(
            media_count = media_urls.len(),
            "提供了多个媒体地址且 ascaption 为 true，只有第一个媒体会带说明文字"
        );
    }

    let text = format_text(title, message);

    let Some((first, rest)) = media_urls.split_first() else {
        return vec![OutboundPayload::text(text, chat_id)];
    };

    let mut payloads = Vec::with_capacity(media_urls.len() + 1);
    let remaining = if request.data.ascaption {
        payloads.push(OutboundPayload::captioned_media(
            first.as_str(),
            chat_id.clone(),
            text,
        ));
        rest
    } else {
        if !title.is_empty() || !message.is_empty() {
            payloads.push(OutboundPayload::text(text, chat_id.clone()));
        }
        media_urls.as_slice()
    };

    payloads.extend(
        remaining
            .iter()
            .map(|url| OutboundPayload::media(url.as_str(), chat_id.clone())),
    );

    payloads
}
