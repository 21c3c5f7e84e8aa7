//! Error handling and conversion tests.
//!
//! These tests verify that error types implement the correct traits,
//! have proper Display implementations, and convert correctly between types.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::error::Error;

use txforge::cli::commands::{BuildCommandError, ConfigCommandError, ParseCommandError};
use txforge::logging::LogError;
use txforge_core::error::{BuildError, ConfigError, ParseError};

/// Test that all error types implement the Error trait.
#[test]
fn test_error_trait_implementation() {
    let err = LogError::InvalidConfig("level".to_string());
    assert!(err.source().is_none());

    let err = ConfigCommandError::AlreadyExists("/tmp/config.toml".to_string());
    assert!(err.source().is_none());

    let err = ParseCommandError::ReadInput {
        path: "tx.json".to_string(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
    };
    assert!(err.source().is_some());

    let err = BuildCommandError::Message {
        index: 2,
        source: ParseError::invalid_argument("validator_address must be a string"),
    };
    assert!(err.source().is_some());
}

#[test]
fn test_display_messages() {
    assert_eq!(
        LogError::DirectoryCreation("/nope".to_string()).to_string(),
        "Failed to create log directory: /nope"
    );
    assert_eq!(
        ParseCommandError::InvalidHex("odd number of digits".to_string()).to_string(),
        "Invalid hex input: odd number of digits"
    );
    assert!(ParseCommandError::UnknownCurrency("dogecoin".to_string())
        .to_string()
        .contains("txforge currencies"));
    assert_eq!(
        BuildCommandError::UnsupportedMessage {
            index: 0,
            msg_type: "cosmos-sdk/MsgFancy".to_string(),
        }
        .to_string(),
        "Message 0 has unsupported type 'cosmos-sdk/MsgFancy'"
    );
    assert!(BuildCommandError::InvalidJson {
        index: 1,
        reason: "EOF".to_string(),
    }
    .to_string()
    .starts_with("Message 1 is not valid JSON"));
}

#[test]
fn test_transparent_conversions_keep_message() {
    let parse = ParseError::invalid_argument("memo must be a string");
    let expected = parse.to_string();
    let err: ParseCommandError = parse.into();
    assert!(matches!(err, ParseCommandError::Parse(_)));
    assert_eq!(err.to_string(), expected);

    let config = ConfigError::invalid_value("logging.level", "loud");
    let expected = config.to_string();
    let err: ConfigCommandError = config.into();
    assert_eq!(err.to_string(), expected);

    let build = BuildError::missing_field("gas");
    let expected = build.to_string();
    let err: BuildCommandError = build.into();
    assert!(matches!(err, BuildCommandError::Build(_)));
    assert_eq!(err.to_string(), expected);

    let input: BuildCommandError = ParseCommandError::InvalidHex("x".to_string()).into();
    assert!(matches!(input, BuildCommandError::Input(_)));
}

#[test]
fn test_errors_are_send_sync() {
    fn assert_send_sync<T: Send + Sync + 'static>() {}
    assert_send_sync::<LogError>();
    assert_send_sync::<ConfigCommandError>();
    assert_send_sync::<ParseCommandError>();
    assert_send_sync::<BuildCommandError>();
}

#[test]
fn test_errors_box_into_dyn_error() {
    let boxed: Box<dyn Error + Send + Sync> =
        Box::new(ParseCommandError::UnknownCurrency("x".to_string()));
    assert!(boxed.to_string().contains('x'));
}
