//! Action sentences keyed by severity rank

use std::ops::RangeInclusive;

/// Every severity rank that has an action sentence
pub const SEVERITY_DOMAIN: RangeInclusive<i32> = -1..=5;

/// Recommended action for a severity rank
///
/// Caution escalates with the rank. Returns `None` outside
/// [`SEVERITY_DOMAIN`]; a loaded dataset never contains such a rank because
/// the legend is checked against this mapping at load time.
///
/// # Examples
///
/// ```
/// use entheogen_domain::action_for;
///
/// assert!(action_for(5).unwrap().starts_with("Avoid"));
/// assert!(action_for(9).is_none());
/// ```
pub fn action_for(severity: i32) -> Option<&'static str> {
    let action = match severity {
        5 => "Avoid this combination; seek urgent medical help if already combined.",
        4 => "Generally avoid; high adverse-event risk even with precautions.",
        3 => "Combine only with caution, spacing and monitoring, ideally under supervision.",
        2 => "Low acute risk; expect blunted, reduced or intensified effects.",
        1 => "Low risk in source context; keep standard harm-reduction precautions.",
        0 => "Unknown: treat with default caution and consult a professional.",
        -1 => "Same entity selected; there is no interaction to assess.",
        _ => return None,
    };
    Some(action)
}
