//! Audit text truncation rule

/// Maximum character budget for persisted prompt/response text.
/// Storage-compatibility constraint, applied identically on every audit
/// write path.
pub const AUDIT_TEXT_MAX: usize = 2000;

/// Ellipsis marker appended to truncated values.
pub const AUDIT_ELLIPSIS: &str = "...";

/// Cap text at [`AUDIT_TEXT_MAX`] characters for audit persistence.
///
/// Values over the budget are cut to `AUDIT_TEXT_MAX - 3` characters and
/// marked with an ellipsis; shorter values are returned unchanged.
/// Counts characters, not bytes, so multi-byte text never splits a code
/// point.
pub fn truncate_for_audit(text: &str) -> String {
    if text.chars().count() <= AUDIT_TEXT_MAX {
        return text.to_string();
    }

    let keep = AUDIT_TEXT_MAX - AUDIT_ELLIPSIS.len();
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(AUDIT_ELLIPSIS);
    truncated
}
