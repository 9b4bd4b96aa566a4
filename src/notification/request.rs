//! 通知请求模块
//!
//! 定义宿主平台传入的一次通知调用

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// 判定为换行的字符，`\r\n` 作为一个整体处理
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}',
];

/// 通知附加数据
///
/// 对应宿主平台的 `data` 字典，只识别 `media_url` 和 `ascaption`，
/// 其他键忽略。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationData {
    /// 媒体地址，多个地址以换行分隔
    #[serde(default)]
    pub media_url: Option<String>,
    /// 是否把文本作为第一个媒体的说明文字
    #[serde(default, deserialize_with = "deserialize_truthy")]
    pub ascaption: bool,
}

/// 按真值解析：`null`、`false`、`0`、空字符串、空数组和空对象为假，其余为真
fn deserialize_truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    })
}

impl NotificationData {
    /// 从宿主平台的松散JSON结构解析
    ///
    /// `null` 视为空数据。
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value)
    }

    /// 拆分媒体地址
    ///
    /// 每行原样作为一个地址，不去空白也不跳过空行；末尾换行不产生空地址。
    pub fn media_urls(&self) -> Vec<String> {
        let mut urls = Vec::new();
        let mut rest = self.media_url.as_deref().unwrap_or_default();

        while !rest.is_empty() {
            match rest.find(LINE_BREAKS) {
                Some(index) => {
                    urls.push(rest[..index].to_string());
                    let tail = &rest[index..];
                    let break_len = if tail.starts_with("\r\n") {
                        2
                    } else {
                        tail.chars().next().map_or(1, char::len_utf8)
                    };
                    rest = &tail[break_len..];
                }
                None => {
                    urls.push(rest.to_string());
                    break;
                }
            }
        }

        urls
    }
}

/// 一次通知调用
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationRequest {
    /// 消息正文
    pub message: String,
    /// 消息标题
    pub title: Option<String>,
    /// 目标会话ID，原样透传
    pub target: Option<String>,
    /// 附加数据
    pub data: NotificationData,
}

impl NotificationRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_data(mut self, data: NotificationData) -> Self {
        self.data = data;
        self
    }

    /// 设置媒体地址列表（内部以换行拼接）
    pub fn with_media_urls<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = urls
            .into_iter()
            .map(|u| u.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        self.data.media_url = if joined.is_empty() { None } else { Some(joined) };
        self
    }

    pub fn as_caption(mut self, ascaption: bool) -> Self {
        self.data.ascaption = ascaption;
        self
    }

    /// 归一化后的正文：单个空格视为空
    pub fn normalized_message(&self) -> &str {
        if self.message == " " {
            ""
        } else {
            &self.message
        }
    }

    /// 标题，未设置时为空字符串
    pub fn title_or_empty(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}
