use std::sync::Arc;

use models::{Entity, Id};
use tracing::info;

use crate::errors::ServiceError;
use crate::storage::EntityStore;

/// Plain CRUD over one entity type: no cross-service calls.
pub struct CrudService<E: Entity> {
    store: Arc<dyn EntityStore<E>>,
}

impl<E: Entity> Clone for CrudService<E> {
    fn clone(&self) -> Self {
        Self { store: Arc::clone(&self.store) }
    }
}

impl<E: Entity> CrudService<E> {
    pub fn new(store: Arc<dyn EntityStore<E>>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<E>, ServiceError> {
        self.store.list().await
    }

    pub async fn get(&self, id: Id) -> Result<E, ServiceError> {
        self.store.get(id).await?.ok_or(ServiceError::NotFound(E::NOT_FOUND))
    }

    pub async fn create(&self, record: E) -> Result<E, ServiceError> {
        let created = self.store.insert(record).await?;
        info!(table = E::TABLE, id = created.id(), "record created");
        Ok(created)
    }

    /// Merge-patch; `NotFound` if the target does not exist.
    pub async fn update(&self, id: Id, patch: E::Patch) -> Result<E, ServiceError> {
        let updated = self.store.update(id, patch).await?.ok_or(ServiceError::NotFound(E::NOT_FOUND))?;
        info!(table = E::TABLE, id, "record updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: Id) -> Result<(), ServiceError> {
        if !self.store.delete(id).await? {
            return Err(ServiceError::NotFound(E::NOT_FOUND));
        }
        info!(table = E::TABLE, id, "record deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{JsonFileDb, Table};
    use models::{Grade, GradePatch, NewGrade, NewTeacher, Teacher, TeacherPatch};

    fn teachers() -> CrudService<Teacher> {
        CrudService::new(Table::<Teacher>::new(JsonFileDb::in_memory()))
    }

    #[tokio::test]
    async fn teacher_lifecycle() -> Result<(), anyhow::Error> {
        let svc = teachers();
        assert!(svc.list().await?.is_empty());

        let created = svc
            .create(Teacher::from(NewTeacher {
                name: Some("Marta".into()),
                age: Some(41),
                subject: Some("Física".into()),
            }))
            .await?;
        assert_eq!(created.id, 1);

        let patch = TeacherPatch { subject: Some(Some("Química".into())), ..Default::default() };
        let updated = svc.update(created.id, patch).await?;
        assert_eq!(updated.subject.as_deref(), Some("Química"));
        assert_eq!(updated.name.as_deref(), Some("Marta"));
        assert_eq!(updated.age, Some(41));

        svc.delete(created.id).await?;
        assert!(matches!(svc.get(created.id).await, Err(ServiceError::NotFound("Professor não encontrado"))));
        assert!(matches!(svc.delete(created.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let svc = teachers();
        let res = svc.update(42, TeacherPatch::default()).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn grades_store_dangling_references() -> Result<(), anyhow::Error> {
        let svc: CrudService<Grade> = CrudService::new(Table::<Grade>::new(JsonFileDb::in_memory()));
        let g = svc
            .create(Grade::from(NewGrade { score: Some(7.5), student_id: Some(999), activity_id: Some(888) }))
            .await?;
        assert_eq!(g.student_id, Some(999));

        let g = svc.update(g.id, GradePatch { score: Some(Some(9.0)), ..Default::default() }).await?;
        assert_eq!(g.score, Some(9.0));
        assert_eq!(g.activity_id, Some(888));
        Ok(())
    }
}
