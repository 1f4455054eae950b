use std::time::Duration;

use reqwest::Client;

use super::types::{ApiResponse, SendMessageRequest};
use crate::error::{ConfigError, DeliveryError};

/// Delivers text to one fixed chat.
#[allow(async_fn_in_trait)]
pub trait ChatSender {
    async fn send_message(&self, text: &str) -> Result<(), DeliveryError>;
}

pub struct TelegramClient {
    token: String,
    chat_id: String,
    client: Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(token: String, chat_id: String, base_url: String) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(ConfigError::Client)?;
        Ok(Self {
            token,
            chat_id,
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{method}", self.base_url, self.token)
    }
}

impl ChatSender for TelegramClient {
    async fn send_message(&self, text: &str) -> Result<(), DeliveryError> {
        let req = SendMessageRequest {
            chat_id: self.chat_id.clone(),
            text: text.to_string(),
        };

        // The request URL embeds the bot token, so it is stripped from errors.
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&req)
            .send()
            .await
            .map_err(|e| DeliveryError::Network(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DeliveryError::Network(e.without_url()))?;
        let parsed = serde_json::from_str::<ApiResponse>(&body).ok();

        if !status.is_success() {
            let description = parsed
                .and_then(|r| r.description)
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(DeliveryError::Api {
                status: status.as_u16(),
                description,
            });
        }

        match parsed {
            Some(ApiResponse { ok: true, .. }) => Ok(()),
            Some(ApiResponse { description, .. }) => Err(DeliveryError::Rejected(
                description.unwrap_or_else(|| "unknown error".to_string()),
            )),
            None => Err(DeliveryError::Rejected(format!("unreadable response: {body}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> TelegramClient {
        TelegramClient::new("123:ABC".into(), "42".into(), format!("{}/", server.uri())).unwrap()
    }

    #[tokio::test]
    async fn send_message_posts_chat_and_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bot123:ABC/sendMessage"))
            .and(body_json(json!({"chat_id": "42", "text": "hello"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": {}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).send_message("hello").await.unwrap();
    }

    #[tokio::test]
    async fn http_error_carries_description() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).send_message("hello").await.unwrap_err();
        match err {
            DeliveryError::Api {
                status,
                description,
            } => {
                assert_eq!(status, 400);
                assert_eq!(description, "Bad Request: chat not found");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn ok_false_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"ok": false, "description": "Forbidden"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).send_message("hello").await.unwrap_err();
        assert!(matches!(err, DeliveryError::Rejected(ref d) if d == "Forbidden"));
    }

    #[tokio::test]
    async fn network_error_hides_token() {
        let client =
            TelegramClient::new("secret:TOKEN".into(), "42".into(), "http://127.0.0.1:1".into())
                .unwrap();
        let err = client.send_message("hello").await.unwrap_err();
        assert!(matches!(err, DeliveryError::Network(_)));
        assert!(!err.to_string().contains("secret:TOKEN"), "{err}");
    }
}
