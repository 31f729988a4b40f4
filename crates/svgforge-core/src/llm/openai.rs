use crate::config::ApiConfig;
use crate::constants::endpoints::CHAT_COMPLETIONS_PATH;
use crate::error::ForgeError;
use crate::llm::traits::*;
use serde::{Deserialize, Serialize};

/// Client for any OpenAI-compatible `/v1/chat/completions` endpoint.
pub struct OpenAIClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: Option<f32>,
}

impl OpenAIClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: crate::constants::models::DEFAULT_MODEL.to_string(),
            base_url: crate::constants::endpoints::DEFAULT_BASE_URL.to_string(),
            temperature: None,
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.api_key.clone())
            .with_model(config.model.clone())
            .with_base_url(config.base_url.clone())
            .with_temperature(config.temperature)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", normalize_base_url(&self.base_url), CHAT_COMPLETIONS_PATH)
    }
}

/// Strip one trailing slash and make sure the URL ends in `/v1`.
pub fn normalize_base_url(base_url: &str) -> String {
    let mut url = base_url.strip_suffix('/').unwrap_or(base_url).to_string();
    if !url.ends_with("/v1") {
        url.push_str("/v1");
    }
    url
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[async_trait::async_trait]
impl LlmClient for OpenAIClient {
    async fn chat(&self, system: &str, messages: &[Message]) -> Result<String, ForgeError> {
        let url = self.endpoint();

        let mut wire = Vec::with_capacity(messages.len() + 1);
        wire.push(Message::system(system));
        wire.extend(messages.iter().cloned());

        let request_body = OpenAIRequest {
            model: &self.model,
            messages: wire,
            temperature: self.temperature,
        };

        tracing::debug!(%url, model = %self.model, turns = messages.len(), "sending chat completion");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            return Err(ForgeError::request(Some(status.as_u16()), response_text));
        }

        parse_completion(&response_text)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Pull `choices[0].message.content` out of a completion body; an absent
/// choice or null content is an empty reply.
fn parse_completion(body: &str) -> Result<String, ForgeError> {
    let api_response: OpenAIResponse = serde_json::from_str(body)
        .map_err(|e| ForgeError::Other(format!("Failed to parse response: {e}")))?;

    Ok(api_response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    /// Answer one HTTP request with `status_line` and `body`; the handle
    /// yields the raw request that was received.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });
        (format!("http://{addr}"), handle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
                let content_length = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Client pointed at a local test server, ignoring any proxy settings.
    fn local_client(api_key: &str, base_url: String) -> OpenAIClient {
        let mut client = OpenAIClient::new(api_key).with_base_url(base_url);
        client.client = reqwest::Client::builder().no_proxy().build().unwrap();
        client
    }

    fn request_body(raw: &str) -> serde_json::Value {
        let (_, body) = raw.split_once("\r\n\r\n").unwrap();
        serde_json::from_str(body).unwrap()
    }

    #[tokio::test]
    async fn test_chat_sends_bearer_and_system_first() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"choices":[{"message":{"role":"assistant","content":"<svg></svg>"}}]}"#,
        )
        .await;
        let client = local_client("test-key", base_url)
            .with_model("icon-model")
            .with_temperature(Some(0.5));

        let reply = client
            .chat("be an artist", &[Message::user("draw a gear")])
            .await
            .unwrap();
        assert_eq!(reply, "<svg></svg>");

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /v1/chat/completions "));
        assert!(raw
            .lines()
            .any(|line| line.eq_ignore_ascii_case("authorization: Bearer test-key")));

        let body = request_body(&raw);
        assert_eq!(body["model"], "icon-model");
        assert_eq!(body["temperature"], 0.5);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "be an artist");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "draw a gear");
    }

    #[tokio::test]
    async fn test_error_status_keeps_raw_body() {
        let (base_url, server) = serve_once("429 Too Many Requests", r#"{"error":"quota"}"#).await;
        let client = local_client("k", base_url);

        let err = client.chat("sys", &[Message::user("draw")]).await.unwrap_err();
        server.await.unwrap();

        match &err {
            ForgeError::Request { status, body } => {
                assert_eq!(*status, Some(429));
                assert_eq!(body, r#"{"error":"quota"}"#);
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(err.to_string(), r#"API Request Failed: 429 - {"error":"quota"}"#);
        assert!(err.is_rate_limited());
    }

    #[tokio::test]
    async fn test_server_error_is_not_rate_limited() {
        let (base_url, server) = serve_once("500 Internal Server Error", "upstream exploded").await;
        let client = local_client("k", base_url);

        let err = client.chat("sys", &[]).await.unwrap_err();
        server.await.unwrap();

        assert_eq!(err.status(), Some(500));
        assert!(!err.is_rate_limited());
    }

    #[tokio::test]
    async fn test_refused_connection_has_no_status() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = local_client("k", format!("http://{addr}"));
        let err = client.chat("sys", &[Message::user("hi")]).await.unwrap_err();

        assert!(matches!(err, ForgeError::Request { status: None, .. }));
        assert!(err.to_string().starts_with("API Request Failed: transport - "));
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("http://127.0.0.1:8045/v1"), "http://127.0.0.1:8045/v1");
        assert_eq!(normalize_base_url("http://127.0.0.1:8045/v1/"), "http://127.0.0.1:8045/v1");
        assert_eq!(normalize_base_url("https://api.example.com"), "https://api.example.com/v1");
        assert_eq!(normalize_base_url("https://api.example.com/"), "https://api.example.com/v1");
    }

    #[test]
    fn test_endpoint_appends_completions_path() {
        let client = OpenAIClient::new("k").with_base_url("https://proxy.local/");
        assert_eq!(client.endpoint(), "https://proxy.local/v1/chat/completions");
    }

    #[test]
    fn test_parse_completion_content() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"hi"}}]}"#;
        assert_eq!(parse_completion(body).unwrap(), "hi");
    }

    #[test]
    fn test_parse_completion_missing_content_is_empty() {
        assert_eq!(parse_completion(r#"{"choices":[]}"#).unwrap(), "");
        assert_eq!(parse_completion("{}").unwrap(), "");
        let null_content = r#"{"choices":[{"message":{"content":null}}]}"#;
        assert_eq!(parse_completion(null_content).unwrap(), "");
    }

    #[test]
    fn test_parse_completion_rejects_garbage() {
        assert!(parse_completion("not json").is_err());
    }

    #[test]
    fn test_request_serializes_system_first() {
        let request = OpenAIRequest {
            model: "m",
            messages: vec![Message::system("sys"), Message::user("hello")],
            temperature: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert!(json.get("temperature").is_none());
    }
}
