use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::patch::{merge, nullable, overwrite};
use crate::{reference, Entity, Id};

/// Reserva de sala.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Id,
    #[serde(rename = "num_sala")]
    pub room: Option<String>,
    pub lab: bool,
    #[serde(rename = "data")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "turma_id")]
    pub class_id: Id,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewReservation {
    #[serde(default, rename = "num_sala")]
    pub room: Option<String>,
    #[serde(default)]
    pub lab: Option<bool>,
    #[serde(default, rename = "data")]
    pub date: Option<NaiveDate>,
    #[serde(default, rename = "turma_id")]
    pub class_id: Option<Id>,
}

impl NewReservation {
    pub fn class_ref(&self) -> Option<Id> { reference(self.class_id) }

    pub fn into_reservation(self, class_id: Id) -> Reservation {
        Reservation {
            id: 0,
            room: self.room,
            lab: self.lab.unwrap_or(false),
            date: self.date,
            class_id,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ReservationPatch {
    #[serde(default, rename = "num_sala", deserialize_with = "nullable")]
    pub room: Option<Option<String>>,
    #[serde(default)]
    pub lab: Option<bool>,
    #[serde(default, rename = "data", deserialize_with = "nullable")]
    pub date: Option<Option<NaiveDate>>,
    #[serde(default, rename = "turma_id")]
    pub class_id: Option<Id>,
}

impl ReservationPatch {
    pub fn class_ref(&self) -> Option<Id> { reference(self.class_id) }
}

impl Entity for Reservation {
    const TABLE: &'static str = "reservas";
    const NOT_FOUND: &'static str = "Reserva não encontrada";
    type Patch = ReservationPatch;

    fn id(&self) -> Id { self.id }
    fn assign_id(&mut self, id: Id) { self.id = id; }

    fn apply(&mut self, patch: ReservationPatch) {
        let class_ref = patch.class_ref();
        merge(&mut self.room, patch.room);
        overwrite(&mut self.lab, patch.lab);
        merge(&mut self.date, patch.date);
        overwrite(&mut self.class_id, class_ref);
    }
}
