//!
//! # Error handling
//!
//! This module defines the application error type used throughout the service.
//! Every failure carries an explicit [`ErrorKind`] so callers (and tests) can
//! distinguish causes without matching on response text, and the wire format
//! stays decoupled from the cause.
//!
//! `AppError` implements `actix_web::error::ResponseError` so handlers can
//! return `Result<_, AppError>` and have failures rendered as JSON bodies of
//! the form `{"error": <kind code>, "message": <text>}` with the right status.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::db::StorageError;

/// The failure taxonomy of the service.
///
/// The first seven kinds are the domain taxonomy; `Internal` covers faults
/// that should never happen in normal operation (e.g. a hashing failure) and
/// is never used for a domain outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Registration hit an already-taken username.
    DuplicateIdentity,
    /// Login failed. Deliberately collapses "no such user" and "wrong
    /// password" into one signal so accounts cannot be enumerated.
    InvalidCredentials,
    /// A task operation named a username that does not resolve.
    UnknownOwner,
    /// A share named a recipient username that does not resolve.
    UnknownRecipient,
    /// A task id did not resolve.
    TaskNotFound,
    /// The backing store could not be reached or failed mid-query. The
    /// caller may retry; the service never retries on its own.
    StoreUnavailable,
    /// A required field was missing or empty. Rejected before any store
    /// access.
    MalformedRequest,
    /// Unexpected internal fault.
    Internal,
}

impl ErrorKind {
    /// Stable machine-readable code carried in error bodies.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::DuplicateIdentity => "duplicate_identity",
            ErrorKind::InvalidCredentials => "invalid_credentials",
            ErrorKind::UnknownOwner => "unknown_owner",
            ErrorKind::UnknownRecipient => "unknown_recipient",
            ErrorKind::TaskNotFound => "task_not_found",
            ErrorKind::StoreUnavailable => "store_unavailable",
            ErrorKind::MalformedRequest => "malformed_request",
            ErrorKind::Internal => "internal",
        }
    }

    fn status(self) -> StatusCode {
        match self {
            ErrorKind::DuplicateIdentity => StatusCode::CONFLICT,
            ErrorKind::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ErrorKind::UnknownOwner => StatusCode::BAD_REQUEST,
            ErrorKind::UnknownRecipient => StatusCode::BAD_REQUEST,
            ErrorKind::TaskNotFound => StatusCode::NOT_FOUND,
            ErrorKind::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::MalformedRequest => StatusCode::BAD_REQUEST,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// An application failure: a kind from the taxonomy plus a human-readable
/// message. For the 5xx kinds the message holds internal detail that is
/// logged but never sent to clients.
#[derive(Debug)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The single collapsed login failure. Both the unknown-username and the
    /// wrong-password paths MUST return this exact value.
    pub fn invalid_credentials() -> Self {
        Self::new(
            ErrorKind::InvalidCredentials,
            "invalid username or password",
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.kind.code(), self.message)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.kind.status()
    }

    fn error_response(&self) -> HttpResponse {
        // Internal detail stays in the log; the body stays generic for the
        // 5xx kinds.
        let message = match self.kind {
            ErrorKind::StoreUnavailable => {
                log::error!("storage failure: {}", self.message);
                "storage temporarily unavailable, try again"
            }
            ErrorKind::Internal => {
                log::error!("internal error: {}", self.message);
                "internal error"
            }
            _ => self.message.as_str(),
        };

        HttpResponse::build(self.status_code()).json(json!({
            "error": self.kind.code(),
            "message": message,
        }))
    }
}

/// Storage failures map onto the taxonomy: a unique-constraint violation is
/// only ever produced by registration, everything else is the "try again"
/// class.
impl From<StorageError> for AppError {
    fn from(error: StorageError) -> AppError {
        match error {
            StorageError::Duplicate => {
                AppError::new(ErrorKind::DuplicateIdentity, "username already exists")
            }
            StorageError::Unavailable(detail) => {
                AppError::new(ErrorKind::StoreUnavailable, detail)
            }
        }
    }
}

/// Failed input validation is a malformed request; the field messages are
/// preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::new(ErrorKind::MalformedRequest, error.to_string())
    }
}
