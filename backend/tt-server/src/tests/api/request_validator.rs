use crate::{ApiError, RequestValidator};

use tt_config::ValidationConfig;

use googletest::prelude::*;

fn field_of(error: ApiError) -> Option<String> {
    match error {
        ApiError::Validation { field, .. } => field,
        _ => None,
    }
}

#[test]
fn given_padded_title_when_validated_then_trimmed() {
    let title = RequestValidator::title("  Ship it  ", &ValidationConfig::default());

    assert_that!(title, ok(eq("Ship it")));
}

#[test]
fn given_blank_title_when_validated_then_title_field_rejected() {
    let error = RequestValidator::title("   ", &ValidationConfig::default()).unwrap_err();

    assert_that!(field_of(error), some(eq("title")));
}

#[test]
fn given_title_over_limit_when_validated_then_rejected() {
    let config = ValidationConfig {
        max_title_length: 5,
        ..Default::default()
    };

    assert_that!(RequestValidator::title("abcde", &config), ok(anything()));
    assert_that!(RequestValidator::title("abcdef", &config), err(anything()));
}

#[test]
fn given_multibyte_title_when_validated_then_counts_characters() {
    let config = ValidationConfig {
        max_title_length: 3,
        ..Default::default()
    };

    assert_that!(RequestValidator::title("äöü", &config), ok(anything()));
}

#[test]
fn given_no_description_when_validated_then_none() {
    let description = RequestValidator::description(None, &ValidationConfig::default());

    assert_that!(description, ok(none()));
}

#[test]
fn given_description_over_limit_when_validated_then_description_field_rejected() {
    let config = ValidationConfig {
        max_description_length: 4,
        ..Default::default()
    };

    let error = RequestValidator::description(Some("12345"), &config).unwrap_err();

    assert_that!(field_of(error), some(eq("description")));
}

#[test]
fn given_mixed_case_email_when_validated_then_lowercased() {
    let email = RequestValidator::email(" Alice@Example.COM ");

    assert_that!(email, ok(eq("alice@example.com")));
}

#[test]
fn given_malformed_emails_when_validated_then_all_rejected() {
    for email in [
        "",
        "alice",
        "@example.com",
        "alice@",
        "alice@example",
        "alice@@example.com",
        "al ice@example.com",
        "alice@.com",
    ] {
        let result = RequestValidator::email(email);
        assert!(result.is_err(), "{email:?} should be rejected");
    }
}

#[test]
fn given_empty_password_when_validated_then_rejected() {
    let error = RequestValidator::password("").unwrap_err();

    assert_that!(field_of(error), some(eq("password")));
    assert_that!(RequestValidator::password("x"), ok(anything()));
}

#[test]
fn given_blank_tenant_name_when_validated_then_tenant_name_field_rejected() {
    let error = RequestValidator::tenant_name("", &ValidationConfig::default()).unwrap_err();

    assert_that!(field_of(error), some(eq("tenant_name")));
}
