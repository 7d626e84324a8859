//! Core Narrator implementation

use crate::config::NarratorConfig;
use crate::error::NarratorError;
use crate::prompt::PromptBuilder;
use crate::types::{Narrative, PairNarrative};
use entheogen_domain::{GenerationError, GenerationRequest, Substance, TextGenerator};
use entheogen_resolver::{render_profile, Resolver};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Pairs deterministic resolution with generated explanations
///
/// The generator is optional in effect: every failure it reports, and every
/// call that outlives the configured timeout, degrades to the rule-based
/// readout instead of surfacing as an error.
pub struct Narrator<G>
where
    G: TextGenerator,
{
    generator: G,
    resolver: Resolver,
    prompts: PromptBuilder,
    config: NarratorConfig,
}

impl<G> Narrator<G>
where
    G: TextGenerator + Send + Sync,
{
    /// Create a new Narrator
    ///
    /// # Errors
    ///
    /// `Config` if the configuration fails validation.
    pub fn new(generator: G, resolver: Resolver, config: NarratorConfig) -> Result<Self, NarratorError> {
        config.validate().map_err(NarratorError::Config)?;
        Ok(Self {
            generator,
            resolver,
            prompts: PromptBuilder::new(config.max_words),
            config,
        })
    }

    /// The resolver used for deterministic results
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// The active configuration
    pub fn config(&self) -> &NarratorConfig {
        &self.config
    }

    /// Resolve a pair and explain it
    ///
    /// Unknown ids resolve to the `UNKNOWN` record like any unmapped pair and
    /// are named by their id in the prompt.
    pub async fn explain_pair(&self, a: &str, b: &str) -> Result<PairNarrative, NarratorError> {
        let check = self.resolver.check(a, b)?;

        if check.key.is_self_pair() && !self.config.generate_for_self_pairs {
            debug!("Skipping generation for self-pair {}", check.key);
            return Ok(PairNarrative {
                check,
                narrative: None,
            });
        }

        let request = self
            .prompts
            .interaction(self.display_name(a), self.display_name(b), &check);
        let narrative = self.narrate(&request, check.readout.clone()).await;

        Ok(PairNarrative {
            check,
            narrative: Some(narrative),
        })
    }

    /// Summarize one substance, or two together
    ///
    /// # Errors
    ///
    /// `UnknownSubstance` if either id is not in the catalogue.
    pub async fn summarize(&self, a: &str, b: Option<&str>) -> Result<Narrative, NarratorError> {
        let first = self.substance(a)?;
        let second = b.map(|id| self.substance(id)).transpose()?;

        let (request, fallback) = match second {
            Some(second) => {
                let check = self.resolver.check(first.id.as_str(), second.id.as_str())?;
                let request = self.prompts.summary(first, Some((second, &check)));
                (request, check.readout)
            }
            None => (self.prompts.summary(first, None), render_profile(first)),
        };

        Ok(self.narrate(&request, fallback).await)
    }

    async fn narrate(&self, request: &GenerationRequest, fallback: String) -> Narrative {
        match self.generate(request).await {
            Ok(text) => {
                info!(
                    "Generated {} characters for {}{}",
                    text.len(),
                    request.subject,
                    request
                        .second_subject
                        .as_deref()
                        .map(|s| format!(" + {}", s))
                        .unwrap_or_default()
                );
                Narrative::Generated(text)
            }
            Err(reason) => {
                warn!("Generation failed for {}: {}; using fallback", request.subject, reason);
                Narrative::Fallback {
                    reason,
                    text: fallback,
                }
            }
        }
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let limit = self.config.generation_timeout();
        let text = match timeout(limit, self.generator.generate(request)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(GenerationError::Unavailable(format!(
                    "timed out after {}s",
                    limit.as_secs()
                )))
            }
        };

        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(text)
    }

    fn substance(&self, id: &str) -> Result<&Substance, NarratorError> {
        self.resolver
            .dataset()
            .find_substance(id)
            .ok_or_else(|| NarratorError::UnknownSubstance(id.to_string()))
    }

    fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.resolver
            .dataset()
            .find_substance(id)
            .map(|s| s.name.as_str())
            .unwrap_or(id)
    }
}
