//! Gemini Provider Implementation
//!
//! Provides integration with Google's generative-language API
//! (`models/{model}:generateContent`).
//!
//! # Features
//!
//! - Async HTTP communication with the REST API
//! - API key from configuration or the `GEMINI_API_KEY` environment variable
//! - Retry logic with exponential backoff for transport and server errors
//! - Timeout handling
//! - Classification of failures into [`GenerationError`]
//!
//! # Examples
//!
//! ```no_run
//! use entheogen_llm::GeminiProvider;
//!
//! // Reads GEMINI_API_KEY; a missing key is reported on the first call
//! let provider = GeminiProvider::from_env("gemini-2.5-flash-lite-latest");
//! ```

use entheogen_domain::{GenerationError, GenerationRequest, TextGenerator};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite-latest";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default timeout for generation requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Gemini API provider
///
/// Credential problems and quota rejections are reported immediately;
/// transport failures and 5xx responses are retried with exponential backoff
/// before the provider gives up with [`GenerationError::Unavailable`].
pub struct GeminiProvider {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
    max_retries: u32,
    retry_delay: Duration,
}

/// Request body for the generateContent API
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Response from the generateContent API
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiProvider {
    /// Create a new provider
    ///
    /// # Parameters
    ///
    /// - `api_key`: API key; `None` or blank makes every call fail with
    ///   `MissingCredential`
    /// - `model`: Model to use (e.g., "gemini-2.5-flash-lite-latest")
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: model.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            client: build_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: Duration::from_secs(1),
        }
    }

    /// Create a provider whose key comes from `GEMINI_API_KEY`
    pub fn from_env(model: impl Into<String>) -> Self {
        Self::new(std::env::var(API_KEY_ENV).ok(), model)
    }

    /// Use a different API endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the maximum number of attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = build_client(timeout);
        self
    }

    /// Set the first backoff delay (doubled on every retry)
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Whether an API key is configured
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate text for a prompt
    ///
    /// # Errors
    ///
    /// - `MissingCredential` if no API key is configured (no request is sent)
    /// - `QuotaExceeded` on HTTP 429 or a quota error body
    /// - `EmptyResponse` if the model returned no text
    /// - `Unavailable` on network failures, other HTTP errors, or an
    ///   unparseable body
    pub async fn generate_content(
        &self,
        prompt: &str,
        system_instruction: &str,
    ) -> Result<String, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingCredential)?;

        let url = format!("{}/v1beta/models/{}:generateContent", self.endpoint, self.model);
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
            system_instruction: (!system_instruction.is_empty()).then(|| Content {
                role: None,
                parts: vec![Part {
                    text: system_instruction,
                }],
            }),
        };

        // Retry logic with exponential backoff
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self
                .client
                .post(&url)
                .header("x-goog-api-key", api_key)
                .json(&body)
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let parsed = response
                            .json::<GenerateContentResponse>()
                            .await
                            .map_err(|e| {
                                GenerationError::Unavailable(format!(
                                    "Failed to parse response: {}",
                                    e
                                ))
                            })?;
                        return extract_text(parsed);
                    }

                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    let error = classify_failure(status, &error_text);
                    if !status.is_server_error() {
                        return Err(error);
                    }
                    warn!("Gemini attempt {} failed: {}", attempts + 1, error);
                    last_error = Some(error);
                }
                Err(e) => {
                    warn!("Gemini attempt {} failed: {}", attempts + 1, e);
                    last_error = Some(GenerationError::Unavailable(format!(
                        "Request failed: {}",
                        e
                    )));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1x, 2x, 4x, etc.
                let delay = backoff_delay(self.retry_delay, attempts);
                debug!("Retrying in {:?}", delay);
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| GenerationError::Unavailable("Max retries exceeded".to_string())))
    }
}

impl TextGenerator for GeminiProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        self.generate_content(&request.prompt, &request.system_instruction)
            .await
    }
}

/// Delay before the next attempt, saturating instead of overflowing
fn backoff_delay(base: Duration, attempts: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempts.saturating_sub(1)))
}

fn build_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Map a non-success response to a classified failure
fn classify_failure(status: StatusCode, body: &str) -> GenerationError {
    let lowered = body.to_lowercase();
    if status == StatusCode::TOO_MANY_REQUESTS
        || lowered.contains("quota")
        || lowered.contains("resource_exhausted")
    {
        return GenerationError::QuotaExceeded;
    }
    GenerationError::Unavailable(format!("HTTP {}: {}", status, body.trim()))
}

/// Concatenate the text parts of the first candidate
fn extract_text(response: GenerateContentResponse) -> Result<String, GenerationError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    Ok(text)
}
