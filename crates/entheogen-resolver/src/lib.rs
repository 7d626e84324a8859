//! EntheoGen Interaction Resolver
//!
//! Turns two substance ids into an evidence record, a legend entry, a
//! recommended action and a rule-based readout.
//!
//! # Algorithm
//!
//! ```text
//! (a, b) ─┬─ a == b ──────────────→ SELF record
//!         └─ PairKey(a, b) → table ─┬─ hit  → curated record
//!                                   └─ miss → UNKNOWN record (source-gap)
//! ```
//!
//! The special-pair overlay is consulted separately and only adds text.
//!
//! # Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use entheogen_dataset::builtin;
//! use entheogen_resolver::Resolver;
//!
//! let resolver = Resolver::new(Arc::new(builtin::ceremonial().unwrap()));
//!
//! let evidence = resolver.resolve("psilocybin", "ssri");
//! assert_eq!(evidence.code, "LOW_MOD");
//!
//! let check = resolver.check("ayahuasca", "ssri").unwrap();
//! assert!(check.readout.contains("Consensus note"));
//! ```

#![warn(missing_docs)]

mod readout;
mod resolver;

pub use readout::{render_profile, render_readout};
pub use resolver::{InteractionCheck, Resolver};
