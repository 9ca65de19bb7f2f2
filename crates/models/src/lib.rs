//! Records exchanged by the school services.
//!
//! Every entity carries an auto-increment `id` assigned by the store, a create
//! input (all fields optional, defaults applied on construction) and a
//! merge-patch input used by `PUT`.

use serde::{de::DeserializeOwned, Serialize};

pub mod patch;
pub mod student;
pub mod teacher;
pub mod class;
pub mod activity;
pub mod grade;
pub mod reservation;

pub use activity::{Activity, ActivityPatch, NewActivity};
pub use class::{Class, ClassPatch, NewClass};
pub use grade::{Grade, GradePatch, NewGrade};
pub use reservation::{NewReservation, Reservation, ReservationPatch};
pub use student::{NewStudent, Student, StudentPatch};
pub use teacher::{NewTeacher, Teacher, TeacherPatch};

/// Row identity. Assigned once on insert, never reused.
pub type Id = i64;

/// A persisted record type.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Table name inside the service database.
    const TABLE: &'static str;
    /// Message returned when a lookup by id misses.
    const NOT_FOUND: &'static str;

    type Patch: Send + 'static;

    fn id(&self) -> Id;
    fn assign_id(&mut self, id: Id);
    fn apply(&mut self, patch: Self::Patch);
}

/// Falsy ids (`0`) count as "not provided", same as an absent field.
pub fn reference(id: Option<Id>) -> Option<Id> {
    id.filter(|v| *v != 0)
}
