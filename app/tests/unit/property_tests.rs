//! Property-based tests for configuration validation and name rules.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use tfdeploy::domain::validate::MIN_CONFIG_CHARS;
use tfdeploy::domain::workspace::{validate_variable_key, validate_workspace_name};
use tfdeploy::domain::{ValidationReason, validate_config};

const SKELETON: &str = "provider \"aws\" {}\nresource \"aws_s3_bucket\" \"b\" {}\n";

proptest! {
    /// Anything shorter than the minimum after trimming is rejected as too short,
    /// whatever else it contains.
    #[test]
    fn prop_short_text_is_too_short(text in "[ -~]{0,29}") {
        prop_assume!(text.trim().chars().count() < MIN_CONFIG_CHARS);
        let result = validate_config(&text);
        prop_assert!(!result.ok);
        prop_assert_eq!(result.reason, ValidationReason::TooShort);
    }

    /// Surrounding whitespace never changes the verdict.
    #[test]
    fn prop_whitespace_padding_is_irrelevant(pad_l in "[ \t\n]{0,8}", pad_r in "[ \t\n]{0,8}") {
        let padded = format!("{pad_l}{SKELETON}{pad_r}");
        prop_assert_eq!(validate_config(&padded), validate_config(SKELETON));
    }

    /// Any denylisted word in any casing is rejected once the shape checks pass.
    #[test]
    fn prop_denylisted_word_any_case_is_unsafe(
        word in prop::sample::select(vec!["bash", "curl", "sudo"]),
        upper in prop::collection::vec(any::<bool>(), 4),
    ) {
        let cased: String = word
            .chars()
            .zip(upper.iter())
            .map(|(c, up)| if *up { c.to_ascii_uppercase() } else { c })
            .collect();
        let text = format!("{SKELETON}# {cased}\n");
        let result = validate_config(&text);
        prop_assert!(!result.ok);
        prop_assert_eq!(result.reason, ValidationReason::UnsafeContent);
    }

    /// Long enough text with neither keyword fails on the resource check first.
    #[test]
    fn prop_no_keywords_is_no_resource_block(filler in "[d-k ]{28,80}") {
        let text = format!("x{filler}x");
        let result = validate_config(&text);
        prop_assert!(!result.ok);
        prop_assert_eq!(result.reason, ValidationReason::NoResourceBlock);
    }

    /// `rm -rf` is caught in any casing and with any run of blanks after `rm`.
    #[test]
    fn prop_rm_rf_any_case_and_spacing_is_unsafe(
        gap in "[ \t]{1,4}",
        upper in prop::collection::vec(any::<bool>(), 4),
    ) {
        let cased: Vec<char> = "rmrf"
            .chars()
            .zip(upper.iter())
            .map(|(c, up)| if *up { c.to_ascii_uppercase() } else { c })
            .collect();
        let text = format!("{SKELETON}# {}{}{gap}-{}{}\n", cased[0], cased[1], cased[2], cased[3]);
        let result = validate_config(&text);
        prop_assert!(!result.ok);
        prop_assert_eq!(result.reason, ValidationReason::UnsafeContent);
    }

    /// Text built only from safe lowercase letters passes once it has both keywords.
    #[test]
    fn prop_safe_filler_passes(filler in "[d-k ]{0,64}") {
        let text = format!("{SKELETON}{filler}");
        let first = validate_config(&text);
        prop_assert!(first.ok);
        prop_assert_eq!(first, validate_config(&text));
    }

    #[test]
    fn prop_workspace_name_charset_accepted(name in "[A-Za-z0-9_-]{1,90}") {
        prop_assert!(validate_workspace_name(&name).is_ok());
    }

    #[test]
    fn prop_workspace_name_with_separator_rejected(
        head in "[a-z]{0,10}",
        sep in prop::sample::select(vec!['/', ' ', '.', ':']),
        tail in "[a-z]{0,10}",
    ) {
        let name = format!("{head}{sep}{tail}");
        prop_assert!(validate_workspace_name(&name).is_err());
    }

    #[test]
    fn prop_variable_key_identifier_accepted(key in "[A-Za-z_][A-Za-z0-9_]{0,100}") {
        prop_assert!(validate_variable_key(&key).is_ok());
    }
}
