//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper returns an `invalid_request` error whose `details` carry the
//! offending `field` and a machine-readable `code`.

use serde_json::json;

use crate::domain::{
    Error, IngredientId, IngredientName, IngredientValidationError, PasswordValidationError,
    UserValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    BlankField,
    InvalidEmail,
    PasswordTooShort,
    TooLong,
    InvalidUuid,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::BlankField => "blank_field",
            ErrorCode::InvalidEmail => "invalid_email",
            ErrorCode::PasswordTooShort => "password_too_short",
            ErrorCode::TooLong => "too_long",
            ErrorCode::InvalidUuid => "invalid_uuid",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

pub(crate) const EMAIL: FieldName = FieldName::new("email");
pub(crate) const PASSWORD: FieldName = FieldName::new("password");
pub(crate) const NAME: FieldName = FieldName::new("name");
pub(crate) const ID: FieldName = FieldName::new("id");

pub(crate) fn field_error(field: FieldName, code: ErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {name}"),
    )
}

/// Unwrap an optional payload field or report it as missing.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn map_user_validation_error(err: UserValidationError, field: FieldName) -> Error {
    let code = match err {
        UserValidationError::EmptyEmail => ErrorCode::BlankField,
        UserValidationError::InvalidEmail => ErrorCode::InvalidEmail,
        UserValidationError::EmailTooLong { .. } | UserValidationError::DisplayNameTooLong { .. } => {
            ErrorCode::TooLong
        }
        UserValidationError::EmptyId | UserValidationError::InvalidId => ErrorCode::InvalidUuid,
    };
    field_error(field, code, err.to_string())
}

pub(crate) fn map_password_error(err: PasswordValidationError) -> Error {
    field_error(PASSWORD, ErrorCode::PasswordTooShort, err.to_string())
}

pub(crate) fn parse_ingredient_name(raw: Option<String>) -> Result<IngredientName, Error> {
    let raw = require(raw, NAME)?;
    IngredientName::new(raw).map_err(|err| {
        let code = match err {
            IngredientValidationError::NameTooLong { .. } => ErrorCode::TooLong,
            _ => ErrorCode::BlankField,
        };
        field_error(NAME, code, err.to_string())
    })
}

pub(crate) fn parse_ingredient_id(raw: &str) -> Result<IngredientId, Error> {
    IngredientId::new(raw).map_err(|_| {
        Error::invalid_request("id must be a valid UUID").with_details(json!({
            "field": ID.as_str(),
            "value": raw,
            "code": ErrorCode::InvalidUuid.as_str(),
        }))
    })
}
