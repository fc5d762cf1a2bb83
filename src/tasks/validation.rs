//! Field validation applied by the store before any write.
//!
//! # Design Decisions
//! - Text is trimmed before it is checked and stored
//! - Validation only checks presence of text; nothing else is enforced

use thiserror::Error;

/// A task field failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Task validation failed: text is required")]
    MissingText,

    #[error("Task validation failed: text must not be empty")]
    EmptyText,
}

/// Trim `text` and reject it when nothing is left.
pub fn normalize_text(text: &str) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyText);
    }
    Ok(trimmed.to_string())
}

/// Validate the text of a create request, which must be present.
pub fn require_text(text: Option<&str>) -> Result<String, ValidationError> {
    match text {
        Some(text) => normalize_text(text),
        None => Err(ValidationError::MissingText),
    }
}
