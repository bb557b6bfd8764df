//! Mapping of free-text status tokens onto [`TaskStatus`].

use crate::models::TaskStatus;

/// Keyword table consulted after exact matching fails. Order is priority.
pub const STATUS_FALLBACKS: [(&str, TaskStatus); 5] = [
    ("pending", TaskStatus::Pending),
    ("working", TaskStatus::Working),
    ("review", TaskStatus::PendingForReview),
    ("complete", TaskStatus::Complete),
    ("fixed", TaskStatus::NeedFixed),
];

/// Resolves a raw status string to a canonical status. Never fails.
///
/// Exact labels (`"Pending For Review"`) and variant names
/// (`"PendingForReview"`) win first. Otherwise the first keyword of
/// [`STATUS_FALLBACKS`] contained in the lowercased input decides, and
/// anything unmatched is `Pending`.
///
/// # Examples
///
/// ```rust
/// use waypoint_core::{models::TaskStatus, parser::normalize::normalize_status};
///
/// assert_eq!(normalize_status("Need Fixed"), TaskStatus::NeedFixed);
/// assert_eq!(normalize_status("completed yesterday"), TaskStatus::Complete);
/// assert_eq!(normalize_status("Done!"), TaskStatus::Pending);
/// ```
pub fn normalize_status(raw: &str) -> TaskStatus {
    let raw = raw.trim();

    if let Some(status) = TaskStatus::ALL
        .into_iter()
        .find(|status| status.as_str() == raw || status.variant_name() == raw)
    {
        return status;
    }

    let lowered = raw.to_lowercase();
    STATUS_FALLBACKS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, status)| *status)
        .unwrap_or_default()
}
