//! Unit tests for error classification and display.

use anyhow::{Result, ensure};
use rstest::rstest;
use serde::de::Error as _;

use super::{EnvmapError, InvalidField, ValidationFailure};

#[rstest]
#[case::bare("missing field `attr2`", "attr2")]
#[case::nested_name("missing field `attr1_name`", "attr1_name")]
fn classifies_serde_missing_field_messages(
    #[case] message: &str,
    #[case] expected: &str,
) -> Result<()> {
    let failure = ValidationFailure::from_figment(figment::Error::from(message.to_owned()));
    ensure!(
        failure.missing == vec![expected.to_owned()],
        "expected missing [{expected}], got {failure:?}"
    );
    ensure!(failure.invalid.is_empty(), "expected no invalid fields");
    Ok(())
}

#[test]
fn classifies_missing_field_kind() -> Result<()> {
    let error = figment::Error::missing_field("attr2");
    let failure = ValidationFailure::from_figment(error);
    ensure!(
        failure.missing == vec!["attr2".to_owned()],
        "expected missing [attr2], got {failure:?}"
    );
    Ok(())
}

#[test]
fn other_messages_are_recorded_as_invalid() -> Result<()> {
    let failure =
        ValidationFailure::from_figment(figment::Error::from("unexpected token".to_owned()));
    ensure!(failure.missing.is_empty(), "expected no missing fields");
    ensure!(
        failure.invalid
            == vec![InvalidField {
                path: String::new(),
                message: "unexpected token".to_owned(),
            }],
        "unexpected invalid fields {failure:?}"
    );
    Ok(())
}

#[test]
fn display_lists_every_recorded_failure() -> Result<()> {
    let failure = ValidationFailure {
        missing: vec!["attr2".to_owned()],
        invalid: vec![InvalidField {
            path: "inner".to_owned(),
            message: "expected a map".to_owned(),
        }],
    };
    let rendered = failure.to_string();
    ensure!(
        rendered.contains("missing field `attr2`"),
        "missing field absent from {rendered:?}"
    );
    ensure!(
        rendered.contains("invalid field `inner`: expected a map"),
        "invalid field absent from {rendered:?}"
    );
    Ok(())
}

#[test]
fn empty_failure_reports_itself() -> Result<()> {
    let failure = ValidationFailure::default();
    ensure!(failure.is_empty(), "default failure should be empty");
    ensure!(
        failure.to_string() == "no errors recorded",
        "unexpected display {failure}"
    );
    Ok(())
}

#[test]
fn policy_errors_carry_their_message() -> Result<()> {
    let error = EnvmapError::policy("prefix must not be empty");
    ensure!(
        error.to_string() == "invalid policy: prefix must not be empty",
        "unexpected display {error}"
    );
    Ok(())
}
