//! Unit tests for domain error types

use crate::errors::{mask_token, DomainError, TokenError};

#[test]
fn test_expected_outcomes() {
    assert!(DomainError::token_not_found("abc").is_expected());
    assert!(DomainError::already_active("abc").is_expected());
    assert!(DomainError::deleted("abc").is_expected());

    let unavailable = DomainError::BackingStoreUnavailable {
        message: "connection refused".to_string(),
    };
    assert!(!unavailable.is_expected());
    assert!(unavailable.is_unavailable());
}

#[test]
fn test_token_error_conversion() {
    let error: DomainError = TokenError::TokenGenerationFailed.into();
    assert_eq!(error, DomainError::Token(TokenError::TokenGenerationFailed));
    assert_eq!(error.to_string(), "Token generation failed");
    assert!(!error.is_expected());
}

#[test]
fn test_json_error_becomes_corrupt_record() {
    let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let error: DomainError = parse_err.into();
    assert!(matches!(
        error,
        DomainError::Token(TokenError::CorruptRecord { .. })
    ));
}

#[test]
fn test_not_found_message_masks_token() {
    let token = "0123456789abcdef0123456789abcdef";
    let message = DomainError::token_not_found(token).to_string();
    assert!(message.contains("01234567"));
    assert!(!message.contains(token));
}

#[test]
fn test_mask_token_short_input() {
    assert_eq!(mask_token("abc"), "abc");
    assert_eq!(mask_token(""), "");
    assert_eq!(mask_token("0123456789"), "01234567…");
}

#[test]
fn test_lifecycle_errors_mask_token() {
    let token = "cae5f5da0123456789abcdef0123456789abcdef0123456789abcdef01234567";

    for error in [DomainError::already_active(token), DomainError::deleted(token)] {
        let message = error.to_string();
        assert!(message.contains("cae5f5da…"));
        assert!(!message.contains(token));
    }
}
