use std::collections::BTreeMap;

use thiserror::Error;

/// Backend-reported per-field validation messages, keyed by field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Errors surfaced by the REST client.
///
/// Identity problems (missing or corrupt stored session) are deliberately NOT
/// represented here: the authorization gate degrades those to the default
/// unauthorized session instead of erroring.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (DNS, connect, timeout, interrupted body).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success status without a usable field-error payload.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Backend-reported validation errors, surfaced verbatim per field.
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(FieldErrors),

    /// The response body did not match the expected shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("invalid endpoint url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// True for failures where nothing reached the backend (or nothing came
    /// back). Callers use this to keep a quiz question in its answerable
    /// state so the user may resubmit.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    /// The HTTP status the backend answered with, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Validation(fields) => Some(fields),
            _ => None,
        }
    }
}

/// Convert client-side `validator` output into the same shape the backend
/// reports, so forms render both identically.
pub fn field_errors_from_validator(errors: &validator::ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    for (field, kinds) in errors.field_errors() {
        let messages: Vec<String> = kinds
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("invalid value for {}", field))
            })
            .collect();
        out.insert(field.to_string(), messages);
    }
    out
}

pub type ApiResult<T> = Result<T, ApiError>;
