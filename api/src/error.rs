//! Unified error types for the Todo API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Storage/business errors raised below the HTTP layer
//! - `AppError`: Structured HTTP error (status, message, optional field errors)
//! - `Fault`: The rendered form of an `AppError`, picked up by the fault handler

use std::backtrace::{Backtrace, BacktraceStatus};
use std::collections::BTreeMap;

use axum::{
    extract::rejection::{FormRejection, JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Category of an `AppError`, which fixes its HTTP status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    UnprocessableEntity,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn default_message(self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "Resource not found",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::UnprocessableEntity => "Validation failed",
            ErrorKind::Internal => "Internal server error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::BadRequest => write!(f, "BadRequest"),
            ErrorKind::Unauthorized => write!(f, "Unauthorized"),
            ErrorKind::Forbidden => write!(f, "Forbidden"),
            ErrorKind::NotFound => write!(f, "NotFound"),
            ErrorKind::Conflict => write!(f, "Conflict"),
            ErrorKind::UnprocessableEntity => write!(f, "UnprocessableEntity"),
            ErrorKind::Internal => write!(f, "InternalServerError"),
        }
    }
}

/// Field name -> ordered list of violation messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more message against a field
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok(value)` when nothing was recorded, otherwise the collected errors
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// Extra error payload for validation-style faults
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorDetails {
    Fields(FieldErrors),
    Messages(Vec<String>),
}

impl From<FieldErrors> for ErrorDetails {
    fn from(errors: FieldErrors) -> Self {
        ErrorDetails::Fields(errors)
    }
}

impl From<Vec<String>> for ErrorDetails {
    fn from(messages: Vec<String>) -> Self {
        ErrorDetails::Messages(messages)
    }
}

/// Application layer error - the single channel for every fault a client sees
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AppError {
    kind: ErrorKind,
    message: String,
    errors: Option<ErrorDetails>,
    trace: Option<String>,
}

impl AppError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: kind.default_message().to_string(),
            errors: None,
            trace: capture_trace(),
        }
    }

    pub fn bad_request() -> Self {
        Self::new(ErrorKind::BadRequest)
    }

    // No route raises this status yet.
    #[allow(dead_code)]
    pub fn unauthorized() -> Self {
        Self::new(ErrorKind::Unauthorized)
    }

    // No route raises this status yet.
    #[allow(dead_code)]
    pub fn forbidden() -> Self {
        Self::new(ErrorKind::Forbidden)
    }

    // No route raises this status yet.
    #[allow(dead_code)]
    pub fn not_found() -> Self {
        Self::new(ErrorKind::NotFound)
    }

    // No route raises this status yet.
    #[allow(dead_code)]
    pub fn conflict() -> Self {
        Self::new(ErrorKind::Conflict)
    }

    pub fn unprocessable_entity(errors: impl Into<ErrorDetails>) -> Self {
        Self::new(ErrorKind::UnprocessableEntity).with_errors(errors)
    }

    pub fn internal() -> Self {
        Self::new(ErrorKind::Internal)
    }

    /// Override the default message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_errors(mut self, errors: impl Into<ErrorDetails>) -> Self {
        self.errors = Some(errors.into());
        self
    }

    #[cfg(test)]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    #[cfg(test)]
    pub fn errors(&self) -> Option<&ErrorDetails> {
        self.errors.as_ref()
    }
}

/// Stack trace text, only when `RUST_BACKTRACE` enables capture
fn capture_trace() -> Option<String> {
    let backtrace = Backtrace::capture();
    match backtrace.status() {
        BacktraceStatus::Captured => Some(backtrace.to_string()),
        _ => None,
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Storage(msg) => AppError::internal().with_message(msg),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request().with_message(rejection.body_text())
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::bad_request().with_message(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::bad_request().with_message(rejection.body_text())
    }
}

/// A rendered fault
///
/// Attached to the response extensions so the fault handler can log it and
/// re-render it with the stack in development mode.
#[derive(Debug, Clone)]
pub struct Fault {
    pub status: StatusCode,
    pub message: String,
    pub errors: Option<ErrorDetails>,
    pub stack: String,
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse<'a> {
    success: bool,
    status: u16,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a ErrorDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stack: Option<&'a str>,
}

impl Fault {
    pub fn render(&self, include_stack: bool) -> Response {
        let body = Json(ErrorResponse {
            success: false,
            status: self.status.as_u16(),
            message: &self.message,
            errors: self.errors.as_ref(),
            stack: include_stack.then_some(self.stack.as_str()),
        });

        (self.status, body).into_response()
    }
}

impl From<AppError> for Fault {
    fn from(e: AppError) -> Self {
        let status = e.status();
        let mut stack = format!("{}: {}", e.kind, e.message());
        if let Some(trace) = &e.trace {
            stack.push('\n');
            stack.push_str(trace);
        }

        Fault {
            status,
            message: e.message,
            errors: e.errors,
            stack,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let fault = Fault::from(self);
        let mut response = fault.render(false);
        response.extensions_mut().insert(fault);
        response
    }
}
