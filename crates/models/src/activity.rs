use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::patch::{merge, nullable, overwrite};
use crate::{reference, Entity, Id};

/// Atividade. Both references were checked against the management service
/// when the record was written; nothing re-checks them afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: Id,
    #[serde(rename = "titulo")]
    pub title: Option<String>,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "peso_porcento")]
    pub weight_percent: Option<f64>,
    #[serde(rename = "data_entrega")]
    pub due_date: Option<NaiveDate>,
    #[serde(rename = "turma_id")]
    pub class_id: Id,
    #[serde(rename = "professor_id")]
    pub teacher_id: Id,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewActivity {
    #[serde(default, rename = "titulo")]
    pub title: Option<String>,
    #[serde(default, rename = "descricao")]
    pub description: Option<String>,
    #[serde(default, rename = "peso_porcento")]
    pub weight_percent: Option<f64>,
    #[serde(default, rename = "data_entrega")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, rename = "turma_id")]
    pub class_id: Option<Id>,
    #[serde(default, rename = "professor_id")]
    pub teacher_id: Option<Id>,
}

impl NewActivity {
    /// Both references, or `None` if either is missing.
    pub fn references(&self) -> Option<(Id, Id)> {
        Some((reference(self.class_id)?, reference(self.teacher_id)?))
    }

    pub fn into_activity(self, class_id: Id, teacher_id: Id) -> Activity {
        Activity {
            id: 0,
            title: self.title,
            description: self.description,
            weight_percent: self.weight_percent,
            due_date: self.due_date,
            class_id,
            teacher_id,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ActivityPatch {
    #[serde(default, rename = "titulo", deserialize_with = "nullable")]
    pub title: Option<Option<String>>,
    #[serde(default, rename = "descricao", deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, rename = "peso_porcento", deserialize_with = "nullable")]
    pub weight_percent: Option<Option<f64>>,
    #[serde(default, rename = "data_entrega", deserialize_with = "nullable")]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(default, rename = "turma_id")]
    pub class_id: Option<Id>,
    #[serde(default, rename = "professor_id")]
    pub teacher_id: Option<Id>,
}

impl ActivityPatch {
    pub fn class_ref(&self) -> Option<Id> { reference(self.class_id) }
    pub fn teacher_ref(&self) -> Option<Id> { reference(self.teacher_id) }
}

impl Entity for Activity {
    const TABLE: &'static str = "atividades";
    const NOT_FOUND: &'static str = "Atividade não encontrada";
    type Patch = ActivityPatch;

    fn id(&self) -> Id { self.id }
    fn assign_id(&mut self, id: Id) { self.id = id; }

    fn apply(&mut self, patch: ActivityPatch) {
        let class_ref = patch.class_ref();
        let teacher_ref = patch.teacher_ref();
        merge(&mut self.title, patch.title);
        merge(&mut self.description, patch.description);
        merge(&mut self.weight_percent, patch.weight_percent);
        merge(&mut self.due_date, patch.due_date);
        overwrite(&mut self.class_id, class_ref);
        overwrite(&mut self.teacher_id, teacher_ref);
    }
}
