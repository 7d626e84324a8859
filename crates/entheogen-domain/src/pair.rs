//! Pair module - canonical keys for unordered substance pairs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between the two ids of a pair key
///
/// Valid substance ids never contain it.
pub const PAIR_SEPARATOR: char = '|';

/// Order-independent key for two substance ids
///
/// The ids are sorted lexicographically and joined with [`PAIR_SEPARATOR`],
/// so `PairKey::new(a, b) == PairKey::new(b, a)` for any `a` and `b`. Tables
/// keyed by `PairKey` are symmetric without storing both orders.
///
/// # Examples
///
/// ```
/// use entheogen_domain::PairKey;
///
/// let key = PairKey::new("ayahuasca", "alcohol");
/// assert_eq!(key.as_str(), "alcohol|ayahuasca");
/// assert_eq!(key, PairKey::new("alcohol", "ayahuasca"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairKey(String);

impl PairKey {
    /// Build the canonical key for two ids
    pub fn new(a: &str, b: &str) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        let mut key = String::with_capacity(first.len() + second.len() + 1);
        key.push_str(first);
        key.push(PAIR_SEPARATOR);
        key.push_str(second);
        Self(key)
    }

    /// Parse a key previously produced by [`PairKey::new`]
    ///
    /// Returns `None` if the string does not split into exactly two
    /// non-empty parts. The parts are re-sorted, so a hand-written key in
    /// the wrong order still yields the canonical form.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.split(PAIR_SEPARATOR);
        let a = parts.next()?;
        let b = parts.next()?;
        if parts.next().is_some() || a.is_empty() || b.is_empty() {
            return None;
        }
        Some(Self::new(a, b))
    }

    /// Borrow the key string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The two ids in canonical (sorted) order
    pub fn parts(&self) -> (&str, &str) {
        // Construction guarantees exactly one separator
        match self.0.split_once(PAIR_SEPARATOR) {
            Some((a, b)) => (a, b),
            None => (self.0.as_str(), ""),
        }
    }

    /// Whether both ids are the same
    pub fn is_self_pair(&self) -> bool {
        let (a, b) = self.parts();
        a == b
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
