use thiserror::Error;

/// Reasons a draft can be rejected by [`crate::validate`].
///
/// The `Display` output is the message shown inline beneath the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One of name, age or grade is empty or whitespace-only. Which one is
    /// deliberately not reported.
    #[error("Please fill in all fields.")]
    MissingField,
    /// Age did not parse as a finite number greater than zero.
    #[error("Please enter a valid age.")]
    InvalidAge,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_inline_copy() {
        assert_eq!(ValidationError::MissingField.to_string(), "Please fill in all fields.");
        assert_eq!(ValidationError::InvalidAge.to_string(), "Please enter a valid age.");
    }
}
