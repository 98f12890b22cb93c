//! Stage name validation
//!
//! A stage name becomes a file name (local tier) and a parameter path segment
//! (remote tier), so it must stay a single path component.

/// Why a stage name was rejected, or `None` when it is usable.
pub fn stage_name_problem(stage: &str) -> Option<&'static str> {
    if stage.trim().is_empty() {
        return Some("stage name is empty");
    }
    if stage != stage.trim() {
        return Some("stage name has leading or trailing whitespace");
    }
    if stage.contains('/') || stage.contains('\\') {
        return Some("stage name contains a path separator");
    }
    if stage == "." || stage.contains("..") {
        return Some("stage name contains a relative path component");
    }
    if stage.chars().any(|c| c.is_control()) {
        return Some("stage name contains control characters");
    }
    None
}
