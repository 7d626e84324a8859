//! EntheoGen Text-Generation Providers
//!
//! Implementations of the `TextGenerator` trait from `entheogen-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `GeminiProvider`: Google generative-language API
//!
//! Every provider reports failures as one of the four classified
//! [`GenerationError`] variants so callers can fall back uniformly.
//!
//! # Examples
//!
//! ```
//! use entheogen_llm::MockProvider;
//! use entheogen_domain::{GenerationRequest, RiskContext, TextGenerator};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let provider = MockProvider::new("Hello from the model!");
//! let request = GenerationRequest {
//!     subject: "Kambo".to_string(),
//!     second_subject: None,
//!     context: RiskContext::default(),
//!     prompt: "test prompt".to_string(),
//!     system_instruction: String::new(),
//! };
//! assert_eq!(provider.generate(&request).await.unwrap(), "Hello from the model!");
//! # }
//! ```

#![warn(missing_docs)]

pub mod gemini;

use entheogen_domain::{GenerationError, GenerationRequest, TextGenerator};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

pub use gemini::GeminiProvider;

/// Mock provider for deterministic testing
///
/// Returns pre-configured responses or failures without making any network
/// calls. Responses are keyed by the request's subject (the first substance
/// name); anything else gets the default response. Clones share state.
///
/// # Examples
///
/// ```
/// use entheogen_llm::MockProvider;
/// use entheogen_domain::GenerationError;
///
/// let mut provider = MockProvider::default();
/// provider.add_response("Ayahuasca", "MAOI-mediated.");
/// provider.add_failure("Kambo", GenerationError::QuotaExceeded);
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_outcome: Result<String, GenerationError>,
    outcomes: Arc<Mutex<HashMap<String, Result<String, GenerationError>>>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
    delay: Option<Duration>,
}

impl MockProvider {
    /// Create a provider with a fixed response for all requests
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_default(Ok(response.into()))
    }

    /// Create a provider that fails every request with `error`
    pub fn failing(error: GenerationError) -> Self {
        Self::with_default(Err(error))
    }

    fn with_default(default_outcome: Result<String, GenerationError>) -> Self {
        Self {
            default_outcome,
            outcomes: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    /// Wait this long before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Add a specific response for a subject
    pub fn add_response(&mut self, subject: impl Into<String>, response: impl Into<String>) {
        lock(&self.outcomes).insert(subject.into(), Ok(response.into()));
    }

    /// Configure a failure for a subject
    pub fn add_failure(&mut self, subject: impl Into<String>, error: GenerationError) {
        lock(&self.outcomes).insert(subject.into(), Err(error));
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// The most recent request, if any
    pub fn last_request(&self) -> Option<GenerationRequest> {
        lock(&self.requests).last().cloned()
    }

    /// Forget recorded requests
    pub fn reset(&self) {
        lock(&self.requests).clear();
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl TextGenerator for MockProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let outcome = {
            lock(&self.requests).push(request.clone());
            lock(&self.outcomes)
                .get(&request.subject)
                .cloned()
                .unwrap_or_else(|| self.default_outcome.clone())
        };

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        outcome
    }
}

// A panic in another test thread must not cascade into every later call
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use entheogen_domain::RiskContext;

    fn request(subject: &str) -> GenerationRequest {
        GenerationRequest {
            subject: subject.to_string(),
            second_subject: None,
            context: RiskContext::default(),
            prompt: format!("Tell me about {}", subject),
            system_instruction: "Be careful.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate(&request("LSD")).await;
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("LSD", "lysergic");
        provider.add_response("Kambo", "frog");

        assert_eq!(provider.generate(&request("LSD")).await.unwrap(), "lysergic");
        assert_eq!(provider.generate(&request("Kambo")).await.unwrap(), "frog");
        assert_eq!(
            provider.generate(&request("Yopo")).await.unwrap(),
            "Default mock response"
        );
    }

    #[tokio::test]
    async fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");
        assert_eq!(provider.call_count(), 0);

        provider.generate(&request("a")).await.unwrap();
        provider.generate(&request("b")).await.unwrap();
        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.last_request().unwrap().subject, "b");

        provider.reset();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_provider_failures() {
        let mut provider = MockProvider::default();
        provider.add_failure("Kambo", GenerationError::EmptyResponse);
        assert_eq!(
            provider.generate(&request("Kambo")).await,
            Err(GenerationError::EmptyResponse)
        );

        let provider = MockProvider::failing(GenerationError::MissingCredential);
        assert_eq!(
            provider.generate(&request("LSD")).await,
            Err(GenerationError::MissingCredential)
        );
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate(&request("x")).await.unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
