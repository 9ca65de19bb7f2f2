//! Cross-service existence checks.
//!
//! Dependent services never cache management records: every write path asks
//! the management service again with `GET /{kind}/{id}`. No retries.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use models::Id;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::errors::ServiceError;
use crate::observability::{REFERENCE_CHECKS_TOTAL, WRITE_REJECTIONS_TOTAL};

/// Kind of record owned by the management service that another record may point at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReferenceKind {
    Class,
    Teacher,
}

impl ReferenceKind {
    /// Route prefix on the management service.
    pub fn path(self) -> &'static str {
        match self {
            ReferenceKind::Class => "turmas",
            ReferenceKind::Teacher => "professores",
        }
    }

    pub fn field(self) -> &'static str {
        match self {
            ReferenceKind::Class => "turma_id",
            ReferenceKind::Teacher => "professor_id",
        }
    }

    pub fn missing_message(self) -> &'static str {
        match self {
            ReferenceKind::Class => "Turma inexistente",
            ReferenceKind::Teacher => "Professor inexistente",
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of one existence check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Validation {
    Exists,
    NotFound,
    Unreachable,
}

impl Validation {
    fn label(self) -> &'static str {
        match self {
            Validation::Exists => "exists",
            Validation::NotFound => "not_found",
            Validation::Unreachable => "unreachable",
        }
    }
}

/// Answers "does this class/teacher exist right now?".
#[async_trait]
pub trait ReferenceValidator: Send + Sync {
    async fn validate(&self, kind: ReferenceKind, id: Id) -> Validation;
}

/// Asks the management service over HTTP.
#[derive(Clone)]
pub struct HttpReferenceValidator {
    client: reqwest::Client,
    base_url: String,
}

impl HttpReferenceValidator {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ReferenceValidator for HttpReferenceValidator {
    async fn validate(&self, kind: ReferenceKind, id: Id) -> Validation {
        let url = format!("{}/{}/{}", self.base_url, kind.path(), id);
        match self.client.get(&url).send().await {
            Ok(resp) if resp.status() == StatusCode::OK => Validation::Exists,
            Ok(resp) => {
                debug!(%url, status = %resp.status(), "reference lookup returned non-200");
                Validation::NotFound
            }
            Err(e) => {
                warn!(%url, error = %e, timeout = e.is_timeout(), "management service unreachable");
                Validation::Unreachable
            }
        }
    }
}

/// Run one check and turn anything but `Exists` into the matching error.
pub async fn ensure_exists(
    validator: &dyn ReferenceValidator,
    kind: ReferenceKind,
    id: Id,
) -> Result<(), ServiceError> {
    let outcome = validator.validate(kind, id).await;
    REFERENCE_CHECKS_TOTAL.with_label_values(&[kind.path(), outcome.label()]).inc();
    debug!(%kind, id, outcome = outcome.label(), "reference checked");
    match outcome {
        Validation::Exists => Ok(()),
        Validation::NotFound => {
            WRITE_REJECTIONS_TOTAL.with_label_values(&["reference_not_found"]).inc();
            Err(ServiceError::ReferenceNotFound(kind))
        }
        Validation::Unreachable => {
            WRITE_REJECTIONS_TOTAL.with_label_values(&["upstream_unreachable"]).inc();
            Err(ServiceError::UpstreamUnreachable)
        }
    }
}
