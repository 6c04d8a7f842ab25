//! Persistence collaborator consumed by the list controller.

use async_trait::async_trait;
use thiserror::Error;

use crate::record::ListRecord;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("{operation} rejected with status {status}: {message}")]
    Rejected {
        operation: &'static str,
        status: u16,
        message: String,
    },
    #[error("failed to decode {operation} response: {message}")]
    Decode {
        operation: &'static str,
        message: String,
    },
    #[error("{0}")]
    Unavailable(String),
}

impl SourceError {
    /// Message suitable for a user-facing notice.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[async_trait]
pub trait DataSource<R: ListRecord>: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<R>, SourceError>;

    /// Persists a new record and returns it with its server-assigned identifier.
    async fn create(&self, record: R) -> Result<R, SourceError>;

    async fn update(&self, id: &R::Id, record: R) -> Result<R, SourceError>;

    /// Soft delete (`active == false`) or restore.
    async fn set_status(&self, id: &R::Id, active: bool) -> Result<(), SourceError>;
}

/// Data source for views that have no backend configured.
pub struct UnavailableDataSource;

#[async_trait]
impl<R: ListRecord> DataSource<R> for UnavailableDataSource {
    async fn fetch_all(&self) -> Result<Vec<R>, SourceError> {
        Err(SourceError::Unavailable(format!(
            "{} backend is unavailable",
            R::KIND
        )))
    }

    async fn create(&self, _record: R) -> Result<R, SourceError> {
        Err(SourceError::Unavailable(format!(
            "cannot create {}: backend is unavailable",
            R::KIND
        )))
    }

    async fn update(&self, id: &R::Id, _record: R) -> Result<R, SourceError> {
        Err(SourceError::Unavailable(format!(
            "cannot update {} {id}: backend is unavailable",
            R::KIND
        )))
    }

    async fn set_status(&self, id: &R::Id, _active: bool) -> Result<(), SourceError> {
        Err(SourceError::Unavailable(format!(
            "cannot change status of {} {id}: backend is unavailable",
            R::KIND
        )))
    }
}
