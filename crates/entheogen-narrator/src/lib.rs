//! EntheoGen Narrator
//!
//! Adds generated explanations on top of deterministic pair resolution.
//!
//! # Architecture
//!
//! ```text
//! ids → Resolver → InteractionCheck → PromptBuilder → TextGenerator
//!                        │                                 │
//!                        └──── readout (fallback) ◄────────┘ on failure
//! ```
//!
//! The resolution is always computed first and is never affected by the
//! generator. A missing credential, empty response, quota rejection,
//! transport failure or timeout all yield [`Narrative::Fallback`] carrying
//! the classified reason and the rule-based text.
//!
//! # Example Usage
//!
//! ```
//! use entheogen_dataset::builtin;
//! use entheogen_narrator::{Narrator, NarratorConfig};
//! use entheogen_resolver::Resolver;
//! # use entheogen_domain::{GenerationError, GenerationRequest, TextGenerator};
//! # struct Offline;
//! # impl TextGenerator for Offline {
//! #     async fn generate(&self, _: &GenerationRequest) -> Result<String, GenerationError> {
//! #         Err(GenerationError::MissingCredential)
//! #     }
//! # }
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = Resolver::new(Arc::new(builtin::ceremonial()?));
//! let narrator = Narrator::new(Offline, resolver, NarratorConfig::default())?;
//!
//! let result = narrator.explain_pair("ayahuasca", "ssri").await?;
//! let narrative = result.narrative.unwrap();
//! assert!(!narrative.is_generated());
//! assert_eq!(narrative.text(), result.check.readout);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod narrator;
mod prompt;
mod types;

#[cfg(test)]
mod tests;

pub use config::NarratorConfig;
pub use error::NarratorError;
pub use narrator::Narrator;
pub use prompt::{PromptBuilder, INTERACTION_SYSTEM_INSTRUCTION, SUMMARY_SYSTEM_INSTRUCTION};
pub use types::{Narrative, PairNarrative};
