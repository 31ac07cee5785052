//! Pre-flight sanity check for generated configuration text: no I/O, no async.
//!
//! All functions in this module are synchronous and take data in, returning
//! data out. Zero imports from `tokio`, `crate::infra`, or
//! `crate::application`.
//!
//! This is a heuristic gate, not an HCL parser: it checks gross shape and a
//! shell-injection denylist. Text that evades the four checks passes, and
//! with the `auto` run policy it can reach a real apply.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::domain::error::ValidationError;
use crate::domain::prompt::GeneratedConfig;

/// Minimum number of characters (after trimming) a configuration must have.
pub const MIN_CONFIG_CHARS: usize = 30;

/// Case-insensitive shell-danger denylist.
pub static UNSAFE_CONTENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Safety: this is a compile-time constant pattern and cannot fail.
    #[allow(clippy::expect_used)]
    Regex::new(r"(?i)(bash|curl|sudo|rm\s+-rf)").expect("valid regex")
});

/// Which rule decided a [`ValidationResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    TooShort,
    NoResourceBlock,
    NoProviderBlock,
    UnsafeContent,
    Ok,
}

impl ValidationReason {
    /// Human-readable reason. Callers and tests match on these exact strings.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TooShort => "too short or empty",
            Self::NoResourceBlock => "no resource block found",
            Self::NoProviderBlock => "no provider block found",
            Self::UnsafeContent => "unsafe content found",
            Self::Ok => "OK",
        }
    }
}

impl Serialize for ValidationReason {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of [`validate_config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub ok: bool,
    pub reason: ValidationReason,
}

impl ValidationResult {
    fn reject(reason: ValidationReason) -> Self {
        Self { ok: false, reason }
    }

    fn accept() -> Self {
        Self {
            ok: true,
            reason: ValidationReason::Ok,
        }
    }
}

/// Validate generated configuration text.
///
/// Checks run in a fixed order and the first failure wins:
/// 1. fewer than [`MIN_CONFIG_CHARS`] characters after trimming
/// 2. no literal `resource`
/// 3. no literal `provider`
/// 4. a case-insensitive denylist hit (`bash`, `curl`, `sudo`, `rm -rf`)
///
/// Pure function: no I/O, no async.
#[must_use]
pub fn validate_config(text: &str) -> ValidationResult {
    if text.trim().chars().count() < MIN_CONFIG_CHARS {
        return ValidationResult::reject(ValidationReason::TooShort);
    }
    if !text.contains("resource") {
        return ValidationResult::reject(ValidationReason::NoResourceBlock);
    }
    if !text.contains("provider") {
        return ValidationResult::reject(ValidationReason::NoProviderBlock);
    }
    if UNSAFE_CONTENT_RE.is_match(text) {
        return ValidationResult::reject(ValidationReason::UnsafeContent);
    }
    ValidationResult::accept()
}

/// Configuration text that has passed [`validate_config`].
///
/// The only way to obtain one is [`ValidatedConfig::new`], so anything that
/// uploads or plans can demand this type instead of raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedConfig(GeneratedConfig);

impl ValidatedConfig {
    /// Gate a generated configuration.
    ///
    /// # Errors
    ///
    /// Returns the failing rule's reason when the text is rejected.
    pub fn new(config: GeneratedConfig) -> Result<Self, ValidationError> {
        let result = validate_config(config.as_str());
        if result.ok {
            Ok(Self(config))
        } else {
            Err(ValidationError {
                reason: result.reason,
            })
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[must_use]
    pub fn into_inner(self) -> GeneratedConfig {
        self.0
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
