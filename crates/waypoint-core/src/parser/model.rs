//! Model-backed plan parsing.
//!
//! The parser sends the rendered prompt to an OpenAI-compatible chat
//! completions endpoint and turns the reply into a [`ParsedPlanRecord`].
//! Two bounded loops wrap the call:
//!
//! * **transport retry** re-sends a request that failed at the provider
//!   (rate limits, rejected requests, server errors, network failures) with
//!   randomized exponential backoff, and
//! * **content repair** re-asks the model when its reply cannot be decoded
//!   as a JSON object, appending [`JSON_ONLY_REMINDER`] to the prompt each
//!   time.
//!
//! Waiting goes through the [`Delay`] trait so tests can replace real sleeps
//! with [`NoDelay`].

use std::{sync::Arc, time::Duration};
#[cfg(any(test, feature = "testing"))]
use std::{collections::VecDeque, sync::Mutex};

use async_trait::async_trait;
use log::{debug, info, warn};
use rand::Rng;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::{
    json::extract_json_object,
    prompt::{build_prompt, JSON_ONLY_REMINDER, SYSTEM_PROMPT},
    record::ParsedPlanRecord,
    ParseStrategy,
};
use crate::{config::ModelConfig, error::ParseError};

/// Sampling temperature for plan parsing requests.
pub const PARSE_TEMPERATURE: f32 = 0.2;

/// Total number of model calls made for a single parse when replies keep
/// failing to decode.
pub const CONTENT_REPAIR_ATTEMPTS: u32 = 3;

/// Single-turn chat request.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmRequest {
    pub system: String,
    pub user: String,
    pub model: String,
    pub temperature: f32,
    /// Ask the provider for a JSON object reply
    pub json_output: bool,
}

/// Failures reported by a language model provider.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("rate limited by provider: {0}")]
    RateLimited(String),
    #[error("provider rejected the request: {0}")]
    BadRequest(String),
    #[error("provider returned HTTP {status}: {message}")]
    Api { status: u16, message: String },
    #[error("http error: {0}")]
    Http(String),
    #[error("response error: {0}")]
    Response(String),
}

/// Chat completion client.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: LlmRequest) -> Result<String, LlmError>;
}

#[async_trait]
impl LlmClient for Arc<dyn LlmClient> {
    async fn complete(&self, request: LlmRequest) -> Result<String, LlmError> {
        (**self).complete(request).await
    }
}

/// Client for OpenAI-compatible `/chat/completions` endpoints.
pub struct HttpLlmClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpLlmClient {
    /// Builds a client from the model configuration.
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Http` if no API key is configured or the HTTP
    /// client cannot be built.
    pub fn new(config: &ModelConfig) -> Result<Self, LlmError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| LlmError::Http("no API key configured".to_string()))?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Http(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.chat_endpoint(),
            api_key,
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl LlmClient for HttpLlmClient {
    async fn complete(&self, request: LlmRequest) -> Result<String, LlmError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|e| LlmError::Http(format!("invalid API key header: {e}")))?;
        headers.insert(AUTHORIZATION, bearer);

        let body = ChatRequest {
            model: &request.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
            response_format: request.json_output.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited(message),
                StatusCode::BAD_REQUEST => LlmError::BadRequest(message),
                _ => LlmError::Api {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| LlmError::Http(e.to_string()))?;
        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| LlmError::Response(format!("unexpected response body: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::Response("No content in response".to_string()))
    }
}

/// Client replaying a fixed script of replies. Only built for tests and
/// with the `testing` feature.
///
/// Every request is recorded; once the script runs out further calls fail
/// with `LlmError::Response`.
#[cfg(any(test, feature = "testing"))]
#[derive(Default)]
pub struct ScriptedLlmClient {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    requests: Mutex<Vec<LlmRequest>>,
}

#[cfg(any(test, feature = "testing"))]
impl ScriptedLlmClient {
    pub fn new(replies: impl IntoIterator<Item = Result<String, LlmError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests().len()
    }
}

#[cfg(any(test, feature = "testing"))]
#[async_trait]
impl LlmClient for ScriptedLlmClient {
    async fn complete(&self, request: LlmRequest) -> Result<String, LlmError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        self.replies
            .lock()
            .ok()
            .and_then(|mut replies| replies.pop_front())
            .unwrap_or_else(|| Err(LlmError::Response("script exhausted".to_string())))
    }
}

/// Waiting strategy between retry attempts.
#[async_trait]
pub trait Delay: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Returns immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay;

#[async_trait]
impl Delay for NoDelay {
    async fn sleep(&self, _duration: Duration) {}
}

/// Bounded retry with randomized exponential backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Upper bound of the wait after failed attempt `attempt` (1-based).
    pub fn ceiling(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay
            .saturating_mul(factor)
            .min(self.max_delay)
            .max(self.base_delay)
    }

    /// Random wait after failed attempt `attempt`, uniform in
    /// `[base_delay, ceiling(attempt)]`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let low = self.base_delay.as_millis() as u64;
        let high = self.ceiling(attempt).as_millis() as u64;
        if high <= low {
            return self.base_delay;
        }
        Duration::from_millis(rand::rng().random_range(low..=high))
    }
}

/// Parser that asks a language model to structure plan text.
pub struct ModelParser {
    client: Option<Arc<dyn LlmClient>>,
    model: String,
    retry: RetryPolicy,
    delay: Arc<dyn Delay>,
}

impl ModelParser {
    pub fn new(client: Option<Arc<dyn LlmClient>>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            retry: RetryPolicy::default(),
            delay: Arc::new(TokioDelay),
        }
    }

    /// Builds a parser backed by [`HttpLlmClient`] when the configuration
    /// carries a credential, or an unavailable parser otherwise.
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Http` if the HTTP client cannot be built.
    pub fn from_config(config: &ModelConfig) -> Result<Self, LlmError> {
        let client: Option<Arc<dyn LlmClient>> = if config.is_configured() {
            Some(Arc::new(HttpLlmClient::new(config)?))
        } else {
            None
        };
        Ok(Self::new(client, config.model.clone()))
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_delay(mut self, delay: Arc<dyn Delay>) -> Self {
        self.delay = delay;
        self
    }

    pub fn is_available(&self) -> bool {
        self.client.is_some()
    }

    /// Parses plan text through the model.
    ///
    /// # Errors
    ///
    /// * `ParseError::Unavailable` if no client is configured
    /// * `ParseError::TransientProvider` with the last provider error once
    ///   transport retries are exhausted
    /// * `ParseError::UnparsableResponse` with the last reply once content
    ///   repair is exhausted
    pub async fn parse_text(
        &self,
        text: &str,
        name: Option<&str>,
    ) -> Result<ParsedPlanRecord, ParseError> {
        let client = self.client.as_ref().ok_or(ParseError::Unavailable)?;
        let mut prompt = build_prompt(text, name);
        let mut last_content = String::new();

        for attempt in 1..=CONTENT_REPAIR_ATTEMPTS {
            info!(
                "Parsing plan text with model {} (attempt {attempt}/{CONTENT_REPAIR_ATTEMPTS})",
                self.model
            );
            let request = LlmRequest {
                system: SYSTEM_PROMPT.to_string(),
                user: prompt.clone(),
                model: self.model.clone(),
                temperature: PARSE_TEMPERATURE,
                json_output: true,
            };
            let content = self.complete_with_retry(client.as_ref(), request).await?;

            if let Some(object) = extract_json_object(&content) {
                debug!("Model reply decoded with keys {:?}", object.keys().collect::<Vec<_>>());
                if let Some(record) = ParsedPlanRecord::from_value(Value::Object(object)) {
                    return Ok(record);
                }
            }

            warn!("Model reply was not a JSON object (attempt {attempt}/{CONTENT_REPAIR_ATTEMPTS})");
            last_content = content;
            prompt.push_str(JSON_ONLY_REMINDER);
        }

        Err(ParseError::UnparsableResponse {
            attempts: CONTENT_REPAIR_ATTEMPTS,
            content: last_content,
        })
    }

    async fn complete_with_retry(
        &self,
        client: &dyn LlmClient,
        request: LlmRequest,
    ) -> Result<String, LlmError> {
        let attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match client.complete(request.clone()).await {
                Ok(content) => return Ok(content),
                Err(error) if attempt < attempts => {
                    let wait = self.retry.backoff(attempt);
                    warn!(
                        "Model request failed (attempt {attempt}/{attempts}): {error}; retrying in {}ms",
                        wait.as_millis()
                    );
                    self.delay.sleep(wait).await;
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }
}

#[async_trait]
impl ParseStrategy for ModelParser {
    fn name(&self) -> &'static str {
        "model"
    }

    async fn parse(&self, text: &str, name: Option<&str>) -> Result<ParsedPlanRecord, ParseError> {
        self.parse_text(text, name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser(client: Arc<ScriptedLlmClient>) -> ModelParser {
        let client: Arc<dyn LlmClient> = client;
        ModelParser::new(Some(client), "test-model").with_delay(Arc::new(NoDelay))
    }

    fn ok(body: &str) -> Result<String, LlmError> {
        Ok(body.to_string())
    }

    #[tokio::test]
    async fn test_unavailable_without_client() {
        let parser = ModelParser::new(None, "test-model");
        assert!(!parser.is_available());
        assert!(matches!(
            parser.parse_text("anything", None).await,
            Err(ParseError::Unavailable)
        ));
    }

    #[tokio::test]
    async fn test_request_shape() {
        let client = Arc::new(ScriptedLlmClient::new([ok(r#"{"name": "Plan"}"#)]));
        parser(client.clone()).parse_text("1. Task", Some("Plan")).await.unwrap();

        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].system, SYSTEM_PROMPT);
        assert_eq!(requests[0].user, build_prompt("1. Task", Some("Plan")));
        assert_eq!(requests[0].model, "test-model");
        assert_eq!(requests[0].temperature, PARSE_TEMPERATURE);
        assert!(requests[0].json_output);
    }

    #[tokio::test]
    async fn test_fenced_reply_decodes_like_bare_reply() {
        let body = r#"{"name": "Launch", "notes": ["n"], "tasks": [{"title": "Ship", "order": 1}]}"#;
        let bare = parser(Arc::new(ScriptedLlmClient::new([ok(body)])))
            .parse_text("x", None)
            .await
            .unwrap();
        let fenced = parser(Arc::new(ScriptedLlmClient::new([ok(&format!(
            "```json\n{body}\n```"
        ))])))
        .parse_text("x", None)
        .await
        .unwrap();

        assert_eq!(bare, fenced);
        assert_eq!(bare.tasks[0].title, "Ship");
    }

    #[tokio::test]
    async fn test_transport_retry_recovers() {
        let client = Arc::new(ScriptedLlmClient::new([
            Err(LlmError::RateLimited("slow down".into())),
            Err(LlmError::Api {
                status: 503,
                message: "unavailable".into(),
            }),
            ok(r#"{"name": "Recovered"}"#),
        ]));
        let record = parser(client.clone()).parse_text("x", None).await.unwrap();

        assert_eq!(record.name, "Recovered");
        assert_eq!(client.call_count(), 3);
    }

    #[tokio::test]
    async fn test_transport_retry_surfaces_last_error() {
        let client = Arc::new(ScriptedLlmClient::new([
            Err(LlmError::RateLimited("first".into())),
            Err(LlmError::Http("second".into())),
            Err(LlmError::BadRequest("third".into())),
            ok(r#"{"name": "never reached"}"#),
        ]));
        let result = parser(client.clone()).parse_text("x", None).await;

        assert!(matches!(
            result,
            Err(ParseError::TransientProvider(LlmError::BadRequest(ref message))) if message == "third"
        ));
        assert_eq!(client.call_count(), 3);
    }

    #[tokio::test]
    async fn test_content_repair_appends_reminder() {
        let client = Arc::new(ScriptedLlmClient::new([
            ok("I cannot do that"),
            ok(r#"{"name": "Fixed"}"#),
        ]));
        let record = parser(client.clone()).parse_text("x", None).await.unwrap();

        assert_eq!(record.name, "Fixed");
        let requests = client.requests();
        assert_eq!(requests.len(), 2);
        assert!(!requests[0].user.contains(JSON_ONLY_REMINDER));
        assert!(requests[1].user.ends_with(JSON_ONLY_REMINDER));
    }

    #[tokio::test]
    async fn test_content_repair_gives_up_after_three_calls() {
        let client = Arc::new(ScriptedLlmClient::new([
            ok("not json"),
            ok("[1, 2]"),
            ok("still not json"),
            ok(r#"{"name": "too late"}"#),
        ]));
        let result = parser(client.clone()).parse_text("x", None).await;

        match result {
            Err(ParseError::UnparsableResponse { attempts, content }) => {
                assert_eq!(attempts, 3);
                assert_eq!(content, "still not json");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(client.call_count(), 3);
        assert_eq!(client.requests()[2].user.matches(JSON_ONLY_REMINDER).count(), 2);
    }

    #[test]
    fn test_backoff_bounds() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.ceiling(1), Duration::from_secs(1));
        assert_eq!(policy.ceiling(2), Duration::from_secs(2));
        assert_eq!(policy.ceiling(4), Duration::from_secs(8));
        assert_eq!(policy.ceiling(5), Duration::from_secs(10));
        assert_eq!(policy.ceiling(40), Duration::from_secs(10));

        for attempt in 1..=6 {
            let wait = policy.backoff(attempt);
            assert!(wait >= policy.base_delay);
            assert!(wait <= policy.ceiling(attempt));
        }
    }
}
