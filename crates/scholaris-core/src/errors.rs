//! Client-side error taxonomy.
//!
//! Every failure the dashboard core can observe is one of five kinds:
//!
//! | Variant | Raised by | Surfaced as |
//! |---|---|---|
//! | [`ClientError::Validation`] | form checks before any request, HTTP 400/422 | toast + inline banner |
//! | [`ClientError::Authorization`] | HTTP 401/403, role pre-checks | redirect, never a toast |
//! | [`ClientError::NotFound`] | HTTP 404, unknown local ids | toast + inline banner |
//! | [`ClientError::Conflict`] | HTTP 409, membership pre-checks | toast + inline banner |
//! | [`ClientError::Transport`] | network failures, other HTTP statuses | toast + inline banner |
//!
//! Response bodies follow the API's `{"error": "..."}` shape (a `message`
//! field is accepted too). Conflicts may carry a machine-readable `code`.

use serde_json::Value;
use thiserror::Error;
use validator::ValidationErrors;

/// Message shown when the server gave us nothing better.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Specific reasons a request conflicts with current server state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictKind {
    /// An APPROVED or PENDING membership already exists for the academy.
    AlreadyMember,
    /// The caller reached the role-specific academy cap.
    LimitExceeded { limit: Option<u32> },
    /// The membership is REJECTED or REVOKED and cannot be withdrawn.
    InactiveMembership,
    Other(String),
}

impl std::fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictKind::AlreadyMember => {
                write!(f, "You already have an active or pending membership for this academy")
            }
            ConflictKind::LimitExceeded { limit: Some(limit) } => {
                write!(f, "Academy limit reached (maximum {limit})")
            }
            ConflictKind::LimitExceeded { limit: None } => write!(f, "Academy limit reached"),
            ConflictKind::InactiveMembership => {
                write!(f, "Only pending or approved memberships can be withdrawn")
            }
            ConflictKind::Other(message) => write!(f, "{message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Authorization(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(ConflictKind),

    #[error("{message}")]
    Transport {
        /// HTTP status, `None` when the request never got a response.
        status: Option<u16>,
        message: String,
    },
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        Self::Authorization(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(kind: ConflictKind) -> Self {
        Self::Conflict(kind)
    }

    /// A failure with no HTTP response at all (DNS, refused connection, decode failure).
    pub fn network(message: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// Maps a non-success HTTP response onto the taxonomy.
    ///
    /// `body` is the raw response text; it is parsed leniently and only used
    /// for the message and the optional conflict `code`.
    pub fn from_status(status: u16, body: &str) -> Self {
        let json: Option<Value> = serde_json::from_str(body).ok();
        let message = json
            .as_ref()
            .and_then(extract_message)
            .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());

        match status {
            400 | 422 => Self::Validation(message),
            401 | 403 => Self::Authorization(message),
            404 => Self::NotFound(message),
            409 => {
                let code = json
                    .as_ref()
                    .and_then(|v| v.get("code"))
                    .and_then(Value::as_str)
                    .map(str::to_ascii_uppercase);
                let limit = json
                    .as_ref()
                    .and_then(|v| v.get("limit"))
                    .and_then(Value::as_u64)
                    .and_then(|l| u32::try_from(l).ok());
                let kind = match code.as_deref() {
                    Some("ALREADY_MEMBER") => ConflictKind::AlreadyMember,
                    Some("LIMIT_EXCEEDED") => ConflictKind::LimitExceeded { limit },
                    Some("INACTIVE_MEMBERSHIP") => ConflictKind::InactiveMembership,
                    _ => ConflictKind::Other(message),
                };
                Self::Conflict(kind)
            }
            _ => Self::Transport {
                status: Some(status),
                message,
            },
        }
    }

    /// Authorization failures are turned into redirects and never toasted.
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Authorization(_))
    }

    /// Short title used when the error is shown as a toast.
    pub fn toast_title(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Please check the form",
            Self::Authorization(_) => "Access denied",
            Self::NotFound(_) => "Not found",
            Self::Conflict(ConflictKind::AlreadyMember) => "Already a member",
            Self::Conflict(ConflictKind::LimitExceeded { .. }) => "Limit reached",
            Self::Conflict(_) => "Request rejected",
            Self::Transport { .. } => "Request failed",
        }
    }
}

fn extract_message(body: &Value) -> Option<String> {
    ["error", "message"]
        .iter()
        .filter_map(|key| body.get(key))
        .find_map(|v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Array(items) => {
                let joined = items
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                (!joined.is_empty()).then_some(joined)
            }
            _ => None,
        })
}

/// Joins field errors into one sentence, preferring the rule's own message.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<ValidationErrors> for ClientError {
    fn from(errors: ValidationErrors) -> Self {
        ClientError::Validation(format_validation_errors(&errors))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::network(format!("Unexpected response from server: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Profile {
        #[validate(length(min = 1, message = "First name is required"))]
        first_name: String,
        #[validate(email)]
        email: String,
    }

    #[test]
    fn test_from_status_uses_error_field() {
        let err = ClientError::from_status(404, r#"{"error":"Class not found"}"#);
        assert_eq!(err, ClientError::NotFound("Class not found".into()));
    }

    #[test]
    fn test_from_status_uses_message_field() {
        let err = ClientError::from_status(400, r#"{"message":"name is required"}"#);
        assert_eq!(err, ClientError::Validation("name is required".into()));
    }

    #[test]
    fn test_from_status_joins_message_array() {
        let err = ClientError::from_status(422, r#"{"message":["a is bad","b is bad"]}"#);
        assert_eq!(err, ClientError::Validation("a is bad, b is bad".into()));
    }

    #[test]
    fn test_from_status_falls_back_to_generic_message() {
        let err = ClientError::from_status(502, "<html>bad gateway</html>");
        assert_eq!(
            err,
            ClientError::Transport {
                status: Some(502),
                message: GENERIC_FAILURE_MESSAGE.into()
            }
        );
    }

    #[test]
    fn test_from_status_authorization() {
        assert!(ClientError::from_status(401, "").is_authorization());
        assert!(ClientError::from_status(403, "{}").is_authorization());
        assert!(!ClientError::from_status(500, "{}").is_authorization());
    }

    #[test]
    fn test_from_status_conflict_codes() {
        let err = ClientError::from_status(409, r#"{"error":"dup","code":"ALREADY_MEMBER"}"#);
        assert_eq!(err, ClientError::Conflict(ConflictKind::AlreadyMember));

        let err = ClientError::from_status(409, r#"{"error":"cap","code":"limit_exceeded","limit":3}"#);
        assert_eq!(
            err,
            ClientError::Conflict(ConflictKind::LimitExceeded { limit: Some(3) })
        );

        let err = ClientError::from_status(409, r#"{"error":"stale"}"#);
        assert_eq!(err, ClientError::Conflict(ConflictKind::Other("stale".into())));
    }

    #[test]
    fn test_validation_errors_conversion() {
        let profile = Profile {
            first_name: String::new(),
            email: "not-an-email".into(),
        };
        let err: ClientError = profile.validate().unwrap_err().into();
        assert_eq!(
            err,
            ClientError::Validation("email is invalid, First name is required".into())
        );
    }

    #[test]
    fn test_toast_titles() {
        assert_eq!(
            ClientError::Conflict(ConflictKind::LimitExceeded { limit: None }).toast_title(),
            "Limit reached"
        );
        assert_eq!(ClientError::network("offline").toast_title(), "Request failed");
    }

    #[test]
    fn test_conflict_display() {
        let err = ClientError::Conflict(ConflictKind::LimitExceeded { limit: Some(3) });
        assert_eq!(err.to_string(), "Academy limit reached (maximum 3)");
    }
}
