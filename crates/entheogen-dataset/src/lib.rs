//! EntheoGen Interaction Dataset
//!
//! Immutable catalogue of substances, the classification legend, the pair
//! rule table and the special-pair overlay.
//!
//! # Overview
//!
//! Datasets are loaded from a [`DatasetDocument`] (TOML or JSON) and checked
//! once at construction: every code a rule uses must be in the legend, the
//! legend must carry the `SELF` and `UNKNOWN` sentinels, and every severity
//! must have an action sentence. A dataset that loads is never checked again.
//!
//! Rules are stored under the canonical [`PairKey`], so lookups are
//! order-independent. The dataset performs no fallback: an absent pair is
//! `None` here and becomes `UNKNOWN` in the resolver.
//!
//! # Example Usage
//!
//! ```
//! use entheogen_dataset::builtin;
//!
//! let dataset = builtin::ceremonial().unwrap();
//! let rule = dataset.raw_entry("ayahuasca", "alcohol").unwrap();
//! assert_eq!(rule.code, "DAN");
//! assert!(dataset.raw_entry("salvia", "belladonna").is_none());
//! ```
//!
//! [`PairKey`]: entheogen_domain::PairKey

#![warn(missing_docs)]

pub mod builtin;
mod dataset;
mod document;
mod error;

pub use dataset::InteractionDataset;
pub use document::{DatasetDocument, NoteRecord, RuleRecord};
pub use error::DatasetError;
