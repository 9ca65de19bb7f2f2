//! Activities: writes are gated on the class and teacher existing in the
//! management service. Checks run one after another, class first; the first
//! failure stops the request before anything else is sent or written.

use std::sync::Arc;

use models::{Activity, ActivityPatch, Id, NewActivity};
use tracing::{info, warn};

use crate::crud::CrudService;
use crate::errors::ServiceError;
use crate::observability::WRITE_REJECTIONS_TOTAL;
use crate::reference::{ensure_exists, ReferenceKind, ReferenceValidator};
use crate::storage::EntityStore;

pub const MISSING_REFERENCES: &str = "turma_id e professor_id obrigatórios";

#[derive(Clone)]
pub struct ActivityService {
    crud: CrudService<Activity>,
    references: Arc<dyn ReferenceValidator>,
}

impl ActivityService {
    pub fn new(store: Arc<dyn EntityStore<Activity>>, references: Arc<dyn ReferenceValidator>) -> Self {
        Self { crud: CrudService::new(store), references }
    }

    pub async fn list(&self) -> Result<Vec<Activity>, ServiceError> {
        self.crud.list().await
    }

    pub async fn get(&self, id: Id) -> Result<Activity, ServiceError> {
        self.crud.get(id).await
    }

    pub async fn create(&self, input: NewActivity) -> Result<Activity, ServiceError> {
        let Some((class_id, teacher_id)) = input.references() else {
            WRITE_REJECTIONS_TOTAL.with_label_values(&["missing_field"]).inc();
            warn!("activity create rejected: missing turma_id/professor_id");
            return Err(ServiceError::MissingField(MISSING_REFERENCES));
        };

        ensure_exists(self.references.as_ref(), ReferenceKind::Class, class_id).await?;
        ensure_exists(self.references.as_ref(), ReferenceKind::Teacher, teacher_id).await?;

        let created = self.crud.create(input.into_activity(class_id, teacher_id)).await?;
        info!(id = created.id, class_id, teacher_id, "activity created");
        Ok(created)
    }

    /// References are optional here; only the ones present are checked.
    /// The checks run before the target lookup, so a bad reference wins over a missing target.
    pub async fn update(&self, id: Id, patch: ActivityPatch) -> Result<Activity, ServiceError> {
        if let Some(class_id) = patch.class_ref() {
            ensure_exists(self.references.as_ref(), ReferenceKind::Class, class_id).await?;
        }
        if let Some(teacher_id) = patch.teacher_ref() {
            ensure_exists(self.references.as_ref(), ReferenceKind::Teacher, teacher_id).await?;
        }
        self.crud.update(id, patch).await
    }

    pub async fn delete(&self, id: Id) -> Result<(), ServiceError> {
        self.crud.delete(id).await
    }
}
