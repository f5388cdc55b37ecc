use anyhow::{anyhow, bail, Context};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::prompt::{SYSTEM_PROMPT, USER_PROMPT};
use crate::config::OpenAiConfig;

/// Something that looks at a plate photo and answers with the model's raw text.
#[async_trait]
pub trait ImageAnalyzer: Send + Sync {
    async fn analyze_image(&self, image: &[u8]) -> anyhow::Result<String>;
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// OpenAI-compatible chat-completion client (the default base URL points at piapi.ai).
#[derive(Clone)]
pub struct OpenAiVisionClient {
    config: OpenAiConfig,
    client: reqwest::Client,
}

impl OpenAiVisionClient {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    fn build_request(&self, image: &[u8]) -> ChatRequest {
        let data_url = format!(
            "data:image/jpeg;base64,{}",
            general_purpose::STANDARD.encode(image)
        );
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(SYSTEM_PROMPT.to_string()),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Parts(vec![
                        ContentPart::Text {
                            text: USER_PROMPT.to_string(),
                        },
                        ContentPart::ImageUrl {
                            image_url: ImageUrl { url: data_url },
                        },
                    ]),
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }
}

fn first_choice_text(resp: ChatResponse) -> anyhow::Result<String> {
    resp.choices
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("chat completion returned no choices"))?
        .message
        .content
        .ok_or_else(|| anyhow!("chat completion returned an empty message"))
}

#[async_trait]
impl ImageAnalyzer for OpenAiVisionClient {
    async fn analyze_image(&self, image: &[u8]) -> anyhow::Result<String> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            bail!("OPENAI_API_KEY is not configured");
        };

        let request = self.build_request(image);
        info!(model = %self.config.model, image_bytes = image.len(), "sending chat completion");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .context("chat completion request")?;

        let status = response.status();
        debug!(%status, "chat completion responded");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, body = %body, "chat completion api error");
            bail!("chat completion api error ({}): {}", status, body);
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .with_context(|| format!("decode chat completion response ({})", status))?;
        first_choice_text(parsed)
    }
}

#[cfg(test)]
mod client_tests {
    use super::*;
    use serde_json::{json, Value};

    fn config(api_key: Option<&str>) -> OpenAiConfig {
        OpenAiConfig {
            api_key: api_key.map(String::from),
            base_url: "http://127.0.0.1:9/v1".into(),
            model: "gpt-4o".into(),
            max_tokens: 1000,
            temperature: 0.1,
        }
    }

    #[test]
    fn request_embeds_image_as_jpeg_data_url() {
        let client = OpenAiVisionClient::new(config(Some("k")));
        let req = serde_json::to_value(client.build_request(b"\x01\x02\x03")).unwrap();

        assert_eq!(req["model"], "gpt-4o");
        assert_eq!(req["max_tokens"], 1000);
        assert_eq!(req["messages"][0]["role"], "system");
        assert_eq!(req["messages"][0]["content"], Value::from(SYSTEM_PROMPT));
        assert_eq!(req["messages"][1]["role"], "user");
        assert_eq!(
            req["messages"][1]["content"][0],
            json!({ "type": "text", "text": USER_PROMPT })
        );
        assert_eq!(
            req["messages"][1]["content"][1],
            json!({ "type": "image_url", "image_url": { "url": "data:image/jpeg;base64,AQID" } })
        );
    }

    #[test]
    fn endpoint_appends_chat_completions() {
        let client = OpenAiVisionClient::new(config(None));
        assert_eq!(client.endpoint(), "http://127.0.0.1:9/v1/chat/completions");
    }

    #[test]
    fn first_choice_text_handles_envelopes() {
        let ok: ChatResponse = serde_json::from_value(json!({
            "choices": [{ "message": { "role": "assistant", "content": "{\"a\":1}" } }]
        }))
        .unwrap();
        assert_eq!(first_choice_text(ok).unwrap(), "{\"a\":1}");

        let empty: ChatResponse = serde_json::from_value(json!({ "choices": [] })).unwrap();
        assert!(first_choice_text(empty).is_err());

        let null: ChatResponse =
            serde_json::from_value(json!({ "choices": [{ "message": { "content": null } }] }))
                .unwrap();
        assert!(first_choice_text(null).is_err());
    }

    /// Serves one canned HTTP response on a local port and hands back the raw request it saw.
    async fn stub_upstream(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/v1", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut chunk = [0u8; 8192];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&chunk[..n]);
                let Some(end) = raw.windows(4).position(|w| w == b"\r\n\r\n") else {
                    continue;
                };
                let head = String::from_utf8_lossy(&raw[..end]).to_ascii_lowercase();
                let len = head
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if raw.len() >= end + 4 + len {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&raw).into_owned()
        });

        (base_url, handle)
    }

    fn client_for(base_url: String) -> OpenAiVisionClient {
        OpenAiVisionClient::new(OpenAiConfig {
            base_url,
            ..config(Some("sk-test"))
        })
    }

    #[tokio::test]
    async fn returns_first_choice_and_sends_bearer_key() {
        let (base_url, upstream) = stub_upstream(
            "200 OK",
            r#"{"choices":[{"message":{"role":"assistant","content":"{\"total_calories\": \"500\"}"}}]}"#,
        )
        .await;

        let text = client_for(base_url).analyze_image(b"img").await.unwrap();
        assert_eq!(text, r#"{"total_calories": "500"}"#);

        let request = upstream.await.unwrap();
        let lower = request.to_ascii_lowercase();
        assert!(lower.starts_with("post /v1/chat/completions "), "{}", request);
        assert!(lower.contains("authorization: bearer sk-test"), "{}", request);
        assert!(request.contains("data:image/jpeg;base64,aW1n"), "{}", request);
    }

    #[tokio::test]
    async fn upstream_error_status_is_an_error_with_status_and_body() {
        let (base_url, upstream) =
            stub_upstream("401 Unauthorized", r#"{"error":"invalid api key"}"#).await;

        let err = client_for(base_url).analyze_image(b"img").await.unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("401"), "{}", msg);
        assert!(msg.contains("invalid api key"), "{}", msg);
        upstream.await.unwrap();
    }

    #[tokio::test]
    async fn undecodable_envelope_is_an_error_with_status() {
        let (base_url, upstream) = stub_upstream("200 OK", "<html>gateway hiccup</html>").await;

        let err = client_for(base_url).analyze_image(b"img").await.unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("decode chat completion response"), "{}", msg);
        assert!(msg.contains("200"), "{}", msg);
        upstream.await.unwrap();
    }

    #[tokio::test]
    async fn missing_api_key_fails_before_any_network_call() {
        let client = OpenAiVisionClient::new(config(None));
        let err = client.analyze_image(b"img").await.unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }
}
