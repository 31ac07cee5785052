//! Generation request and response types.
//!
//! Pure types only: no I/O, no async.

use std::fmt;

use crate::domain::error::InputError;

/// System instruction sent with every generation request.
pub const SYSTEM_INSTRUCTION: &str = "You are a Terraform expert. \
    Respond ONLY with valid Terraform HCL. \
    No comments, no markdown, no explanations. \
    If not Terraform-related, respond with empty string.";

/// A deployment prompt, non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    /// Trim and accept a raw prompt.
    ///
    /// # Errors
    ///
    /// Returns `InputError::EmptyPrompt` if nothing is left after trimming.
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InputError::EmptyPrompt);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The user turn sent to the model.
    #[must_use]
    pub fn user_message(&self) -> String {
        format!("Write Terraform HCL for: {}", self.0)
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw configuration text returned by the generator. Never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedConfig(String);

impl GeneratedConfig {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
