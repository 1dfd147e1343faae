// --- File: crates/slotbook_common/src/error.rs ---
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by the HTTP client adapter.
///
/// Sources are shared behind `Arc` so the error can be both kept as the
/// flow's notice and returned to the caller.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    /// The API answered with a non-success status.
    ///
    /// `message` comes from the body's `message` or `error` field, or is
    /// `HTTP <status>`; `details` holds the whole parsed body.
    #[error("{message}")]
    Status {
        message: String,
        status: u16,
        details: Value,
    },

    /// The request never produced a response (connect, TLS, timeout, body read).
    #[error("Booking API request failed: {0}")]
    Transport(#[source] Arc<reqwest::Error>),

    /// The body was valid but did not have the expected shape.
    #[error("Failed to parse booking API response: {0}")]
    Decode(#[source] Arc<serde_json::Error>),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(Arc::new(err))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(Arc::new(err))
    }
}

impl ApiError {
    /// HTTP status of a non-success response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status().map(|s| s.as_u16()),
            ApiError::Decode(_) => None,
        }
    }

    /// Parsed error body, kept for diagnostics.
    pub fn details(&self) -> Option<&Value> {
        match self {
            ApiError::Status { details, .. } => Some(details),
            _ => None,
        }
    }
}

/// A single failed contact-form or selection check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldError {
    NoSlotSelected,
    NameTooShort,
    InvalidEmail,
    ContactTooShort,
    AgreementMissing,
}

impl FieldError {
    /// Stable identifier of the field the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::NoSlotSelected => "slot",
            FieldError::NameTooShort => "name",
            FieldError::InvalidEmail => "email",
            FieldError::ContactTooShort => "telegram",
            FieldError::AgreementMissing => "agree",
        }
    }
}

/// The closed set of failures that cross the booking flow boundary.
///
/// `Display` is meant for logs. Text shown to users is produced by the
/// flow crate's presentation layer.
#[derive(Error, Debug, Clone)]
pub enum WidgetError {
    /// Required configuration (the API base URL) is absent.
    #[error("Configuration error: {0}")]
    ConfigMissing(String),

    /// No bearer token could be resolved. `None` means the page URL carried
    /// no practitioner id at all.
    #[error("No credential for practitioner {}", .practitioner_id.as_deref().unwrap_or("<missing id>"))]
    CredentialMissing { practitioner_id: Option<String> },

    /// The booking API failed or could not be reached.
    #[error("Transport failure: {0}")]
    TransportFailure(#[from] ApiError),

    /// The form or selection is incomplete; no request was made.
    #[error("Validation failed: {}", field_list(.0))]
    ValidationFailure(Vec<FieldError>),

    /// Booking succeeded but the host could not navigate to the payment page.
    #[error("Payment redirect required: {url}")]
    PaymentRedirectRequired { url: String },
}

fn field_list(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(FieldError::field)
        .collect::<Vec<_>>()
        .join(", ")
}

// Utility functions for error handling
pub fn config_missing<T: std::fmt::Display>(message: T) -> WidgetError {
    WidgetError::ConfigMissing(message.to_string())
}

pub fn credential_missing(practitioner_id: Option<&str>) -> WidgetError {
    WidgetError::CredentialMissing {
        practitioner_id: practitioner_id
            .filter(|id| !id.is_empty())
            .map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_error_displays_message_only() {
        let err = ApiError::Status {
            message: "Slot already taken".to_string(),
            status: 409,
            details: json!({"message": "Slot already taken"}),
        };
        assert_eq!(err.to_string(), "Slot already taken");
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.details(), Some(&json!({"message": "Slot already taken"})));
    }

    #[test]
    fn test_credential_missing_treats_empty_id_as_absent() {
        let err = credential_missing(Some(""));
        assert!(matches!(
            err,
            WidgetError::CredentialMissing {
                practitioner_id: None
            }
        ));
        assert_eq!(err.to_string(), "No credential for practitioner <missing id>");

        let err = credential_missing(Some("124"));
        assert_eq!(err.to_string(), "No credential for practitioner 124");
    }

    #[test]
    fn test_validation_failure_lists_fields() {
        let err = WidgetError::ValidationFailure(vec![
            FieldError::NameTooShort,
            FieldError::AgreementMissing,
        ]);
        assert_eq!(err.to_string(), "Validation failed: name, agree");
    }
}
