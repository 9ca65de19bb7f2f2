use thiserror::Error;

use crate::reference::ReferenceKind;

/// Failures of a single request. None of them affect other requests.
///
/// Display strings are the messages clients see in `{"error": ...}`.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    MissingField(&'static str),
    #[error("{}", .0.missing_message())]
    ReferenceNotFound(ReferenceKind),
    #[error("Falha ao contactar gerenciamento")]
    UpstreamUnreachable,
    #[error("{0}")]
    NotFound(&'static str),
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn storage(e: impl std::fmt::Display) -> Self { Self::Storage(e.to_string()) }
}
