//! EntheoGen Domain Layer
//!
//! This crate contains the value types and boundary traits shared by every
//! other EntheoGen crate. It holds no data and performs no I/O.
//!
//! ## Key Concepts
//!
//! - **Substance**: a catalogue entry (a substance or a medication class)
//! - **Risk classification**: one entry of the closed legend, ranked by severity
//! - **Pair key**: the order-independent identifier of two substance ids
//! - **Pair evidence**: classification code, summary, confidence and sources
//!   produced for one pair
//! - **Favorites**: the user's saved pairs, keyed by pair key
//!
//! ## Architecture
//!
//! - Pure value types only
//! - The dataset, resolver, generators and stores live in other crates
//! - Trait definitions for the two external collaborators (text generation and
//!   favorites persistence)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod confidence;
pub mod evidence;
pub mod favorite;
pub mod guidance;
pub mod pair;
pub mod risk;
pub mod substance;
pub mod traits;

// Re-exports for convenience
pub use confidence::Confidence;
pub use evidence::PairEvidence;
pub use favorite::{FavoriteEntry, Favorites, ToggleOutcome};
pub use guidance::action_for;
pub use pair::PairKey;
pub use risk::{RiskClassification, RiskCode};
pub use substance::{Substance, SubstanceId};
pub use traits::{FavoritesStore, GenerationError, GenerationRequest, RiskContext, TextGenerator};
