use crate::config::Config;
use crate::error::{ApiError, UPSTREAM_FALLBACK};
use crate::prompt::Prompt;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

pub const MODEL: &str = "gpt-4o";
pub const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatRequest<'a> {
    pub model: &'static str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f32,
}

impl<'a> ChatRequest<'a> {
    pub fn from_prompt(prompt: &'a Prompt) -> Self {
        Self {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: TEMPERATURE,
        }
    }
}

pub fn build_client(cfg: &Config) -> anyhow::Result<Client> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(USER_AGENT, HeaderValue::from_str(&cfg.user_agent)?);
    // Authorization is injected per request; every caller brings its own key.
    let client = Client::builder()
        .default_headers(default_headers)
        .use_rustls_tls()
        .build()?;
    Ok(client)
}

/// `Bearer <credential>` where the credential is the caller's raw header bytes.
pub fn auth_header(credential: &[u8]) -> Result<HeaderValue, ApiError> {
    let mut raw = b"Bearer ".to_vec();
    raw.extend_from_slice(credential);
    HeaderValue::from_bytes(&raw)
        .map_err(|e| ApiError::Internal(format!("authorization header: {}", e)))
}

/// Pull the generated text out of a 2xx completion body.
pub fn extract_content(body: &Value) -> Result<String, ApiError> {
    body.pointer("/choices/0/message/content")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| ApiError::Internal("completion response missing choices[0].message.content".into()))
}

/// Message reported back to the caller for a non-2xx completion body.
pub fn extract_error_message(body: &Value) -> String {
    body.pointer("/error/message")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(UPSTREAM_FALLBACK)
        .to_string()
}

/// One chat-completions round trip. No retries: the first outcome is final.
pub async fn chat_completion(
    client: &Client,
    cfg: &Config,
    credential: &[u8],
    prompt: &Prompt,
) -> Result<String, ApiError> {
    let body = ChatRequest::from_prompt(prompt);
    let res = client
        .post(&cfg.completions_url)
        .header(AUTHORIZATION, auth_header(credential)?)
        .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
        .json(&body)
        .send()
        .await
        .map_err(|e| ApiError::Internal(format!("sending completion request: {}", e)))?;

    let status = res.status();
    let text = res
        .text()
        .await
        .map_err(|e| ApiError::Internal(format!("reading completion response: {}", e)))?;
    let data: Value = serde_json::from_str(&text)
        .map_err(|e| ApiError::Internal(format!("completion response is not JSON: {}", e)))?;
    debug!("completion status={} bytes={}", status, text.len());

    if !status.is_success() {
        let message = extract_error_message(&data);
        warn!("completion API rejected request (status {}): {}", status, message);
        return Err(ApiError::Upstream {
            status: status.as_u16(),
            message,
        });
    }
    extract_content(&data)
}
