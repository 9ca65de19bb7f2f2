//! Room reservations: the class reference must exist in the management
//! service when the reservation is written.

use std::sync::Arc;

use models::{Id, NewReservation, Reservation, ReservationPatch};
use tracing::{info, warn};

use crate::crud::CrudService;
use crate::errors::ServiceError;
use crate::observability::WRITE_REJECTIONS_TOTAL;
use crate::reference::{ensure_exists, ReferenceKind, ReferenceValidator};
use crate::storage::EntityStore;

pub const MISSING_CLASS: &str = "turma_id obrigatório";

#[derive(Clone)]
pub struct ReservationService {
    crud: CrudService<Reservation>,
    references: Arc<dyn ReferenceValidator>,
}

impl ReservationService {
    pub fn new(store: Arc<dyn EntityStore<Reservation>>, references: Arc<dyn ReferenceValidator>) -> Self {
        Self { crud: CrudService::new(store), references }
    }

    pub async fn list(&self) -> Result<Vec<Reservation>, ServiceError> {
        self.crud.list().await
    }

    pub async fn get(&self, id: Id) -> Result<Reservation, ServiceError> {
        self.crud.get(id).await
    }

    pub async fn create(&self, input: NewReservation) -> Result<Reservation, ServiceError> {
        let Some(class_id) = input.class_ref() else {
            WRITE_REJECTIONS_TOTAL.with_label_values(&["missing_field"]).inc();
            warn!("reservation create rejected: missing turma_id");
            return Err(ServiceError::MissingField(MISSING_CLASS));
        };
        ensure_exists(self.references.as_ref(), ReferenceKind::Class, class_id).await?;

        let created = self.crud.create(input.into_reservation(class_id)).await?;
        info!(id = created.id, class_id, room = ?created.room, "reservation created");
        Ok(created)
    }

    pub async fn update(&self, id: Id, patch: ReservationPatch) -> Result<Reservation, ServiceError> {
        if let Some(class_id) = patch.class_ref() {
            ensure_exists(self.references.as_ref(), ReferenceKind::Class, class_id).await?;
        }
        self.crud.update(id, patch).await
    }

    pub async fn delete(&self, id: Id) -> Result<(), ServiceError> {
        self.crud.delete(id).await
    }
}
