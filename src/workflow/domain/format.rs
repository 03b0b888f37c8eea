//! Compact display formatting for a resolved workflow position.

/// Renders a resolved stage as `"<position>/<total> <owner_name>"`, for
/// example `"3/5 Alwin"`.
///
/// No validation is performed here; callers pass an already-resolved
/// position. The absent-gate cases (empty sequence, all gates complete)
/// must be special-cased by the caller before formatting.
#[must_use]
pub fn stage_label(position: usize, total: usize, owner_name: &str) -> String {
    format!("{position}/{total} {owner_name}")
}
