//! 通知投递测试
//!
//! 使用本地mock服务器验证请求地址、请求头、消息体以及失败后继续投递

use mockito::{Matcher, Server};
use serde_json::json;
use std::time::Duration;
use wapi_notify::config::{Config, EndpointConfig};
use wapi_notify::notification::{
    create_service, NotificationRequest, NotificationService, WapiNotificationService,
};

fn service_for(base_url: String, token: Option<&str>) -> WapiNotificationService {
    let endpoint = EndpointConfig::new(base_url, "home", token.map(str::to_string)).unwrap();
    WapiNotificationService::new(endpoint).unwrap()
}

#[tokio::test]
async fn test_text_message_with_token() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/home")
        .match_header("x-api-key", "secret")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "content": "*Alarm*\nFront door opened",
            "chatId": "123@c.us",
            "contentType": "string"
        })))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let service = service_for(server.url(), Some("secret"));
    let request = NotificationRequest::new("Front door opened")
        .with_title("Alarm")
        .with_target("123@c.us");

    service.send_message(&request).await;

    mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_message_still_sends_one_text_payload() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/home")
        .match_body(Matcher::Json(json!({
            "content": "",
            "chatId": null,
            "contentType": "string"
        })))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let service = service_for(server.url(), None);
    service.send_message(&NotificationRequest::new(" ")).await;

    mock.assert_async().await;
}

#[tokio::test]
async fn test_captioned_media_without_token() {
    let mut server = Server::new_async().await;

    let first = server
        .mock("POST", "/home")
        .match_header("x-api-key", Matcher::Missing)
        .match_body(Matcher::Json(json!({
            "chatId": "g1@g.us",
            "contentType": "MessageMediaFromURL",
            "content": "https://cam/1.jpg",
            "options": { "caption": "*Motion*\nGarden" }
        })))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let mut rest = Vec::new();
    for url in ["https://cam/2.jpg", "https://cam/3.jpg"] {
        let mock = server
            .mock("POST", "/home")
            .match_header("x-api-key", Matcher::Missing)
            .match_body(Matcher::Json(json!({
                "chatId": "g1@g.us",
                "contentType": "MessageMediaFromURL",
                "content": url
            })))
            .with_status(200)
            .expect(1)
            .create_async()
            .await;
        rest.push(mock);
    }

    let service = service_for(server.url(), None);
    let request = NotificationRequest::new("Garden")
        .with_title("Motion")
        .with_target("g1@g.us")
        .with_media_urls(["https://cam/1.jpg", "https://cam/2.jpg", "https://cam/3.jpg"])
        .as_caption(true);

    service.send_message(&request).await;

    first.assert_async().await;
    for mock in rest {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_media_only_sends_no_text_payload() {
    let mut server = Server::new_async().await;

    let text = server
        .mock("POST", "/home")
        .match_body(Matcher::PartialJson(json!({ "contentType": "string" })))
        .with_status(200)
        .expect(0)
        .create_async()
        .await;
    let media = server
        .mock("POST", "/home")
        .match_body(Matcher::PartialJson(
            json!({ "contentType": "MessageMediaFromURL" }),
        ))
        .with_status(200)
        .expect(2)
        .create_async()
        .await;

    let service = service_for(server.url(), None);
    let request = NotificationRequest::new("").with_media_urls(["u1", "u2"]);

    service.send_message(&request).await;

    text.assert_async().await;
    media.assert_async().await;
}

#[tokio::test]
async fn test_token_sent_on_every_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/home")
        .match_header("x-api-key", "k-1")
        .with_status(201)
        .expect(3)
        .create_async()
        .await;

    let service = service_for(server.url(), Some("k-1"));
    let request = NotificationRequest::new("hi").with_media_urls(["u1", "u2"]);

    service.send_message(&request).await;

    mock.assert_async().await;
}

#[tokio::test]
async fn test_failed_payload_does_not_stop_remaining() {
    let mut server = Server::new_async().await;

    let text = server
        .mock("POST", "/home")
        .match_body(Matcher::PartialJson(json!({ "contentType": "string" })))
        .with_status(500)
        .with_body("boom")
        .expect(1)
        .create_async()
        .await;
    let media = server
        .mock("POST", "/home")
        .match_body(Matcher::PartialJson(json!({ "content": "u1" })))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let service = service_for(server.url(), None);
    let request = NotificationRequest::new("hi").with_media_urls(["u1"]);

    service.send_message(&request).await;

    text.assert_async().await;
    media.assert_async().await;
}

#[tokio::test]
async fn test_transport_failure_is_swallowed() {
    // 端口 9 (discard) 在测试环境中通常没有监听
    let endpoint = EndpointConfig::new("http://127.0.0.1:9", "home", None).unwrap();
    let service =
        WapiNotificationService::with_timeout(endpoint, Some(Duration::from_secs(2))).unwrap();

    let request = NotificationRequest::new("hi").with_media_urls(["u1", "u2"]);
    service.send_message(&request).await;
}

#[tokio::test]
async fn test_create_service_posts_to_base_url_and_session() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/client/sendMessage/living-room")
        .match_header("x-api-key", "tok")
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let config = Config {
        url: Some(format!("{}/client/sendMessage", server.url())),
        session: Some("living-room".to_string()),
        token: Some("tok".to_string()),
        request_timeout_seconds: Some(5),
        ..Default::default()
    };
    let service = create_service(&config).unwrap();

    service.send_message(&NotificationRequest::new("hello")).await;

    mock.assert_async().await;
}

#[tokio::test]
async fn test_shared_service_across_tasks() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/home")
        .with_status(200)
        .expect(4)
        .create_async()
        .await;

    let service = std::sync::Arc::new(service_for(server.url(), None));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .send_message(&NotificationRequest::new(format!("msg {i}")))
                    .await;
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }

    mock.assert_async().await;
}
