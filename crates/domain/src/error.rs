//! Failure type shared by every port and service.
//!
//! Business conditions never panic: they travel as a [`Failure`] carrying a
//! [`Status`] classification, a human-readable message and, optionally, the
//! identifier of the application that produced it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Result alias returned by every fallible operation in the workspace.
pub type Outcome<T> = Result<T, Failure>;

/// Classification of a [`Failure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// The request was rejected by a business rule or a tenant check.
    BadRequest,
    /// The targeted model or tenant does not exist.
    NotFound,
    /// The caller is not allowed to perform the operation.
    Forbidden,
    /// The operation collides with existing state.
    Conflict,
    /// The operation was cancelled before completing.
    Cancelled,
    /// An unexpected downstream failure.
    Internal,
}

impl Status {
    /// Stable lowercase name of the classification.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BadRequest => "bad request",
            Self::NotFound => "not found",
            Self::Forbidden => "forbidden",
            Self::Conflict => "conflict",
            Self::Cancelled => "cancelled",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified, non-panicking failure.
#[derive(Debug, thiserror::Error)]
#[error("{status}: {message}")]
pub struct Failure {
    status: Status,
    message: String,
    application_id: Option<String>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Failure {
    /// Build a failure with an explicit classification.
    pub fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            application_id: None,
            source: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(Status::BadRequest, message)
    }

    /// A missing model, named by its kind and identifier.
    pub fn not_found(entity: &str, id: impl fmt::Debug) -> Self {
        Self::new(Status::NotFound, format!("{entity} {id:?} not found"))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(Status::Forbidden, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(Status::Conflict, message)
    }

    #[must_use]
    pub fn cancelled() -> Self {
        Self::new(Status::Cancelled, "operation cancelled")
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(Status::Internal, message)
    }

    /// Attach the application identifier reported alongside the failure.
    #[must_use]
    pub fn with_application_id(mut self, application_id: Option<String>) -> Self {
        self.application_id = application_id;
        self
    }

    /// Attach the underlying error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn application_id(&self) -> Option<&str> {
        self.application_id.as_deref()
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status == Status::NotFound
    }
}
