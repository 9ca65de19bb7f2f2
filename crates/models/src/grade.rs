use serde::{Deserialize, Serialize};

use crate::patch::{merge, nullable};
use crate::{Entity, Id};

/// Nota. `aluno_id` and `atividade_id` are stored without any existence check.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub id: Id,
    #[serde(rename = "nota")]
    pub score: Option<f64>,
    #[serde(rename = "aluno_id")]
    pub student_id: Option<Id>,
    #[serde(rename = "atividade_id")]
    pub activity_id: Option<Id>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewGrade {
    #[serde(default, rename = "nota")]
    pub score: Option<f64>,
    #[serde(default, rename = "aluno_id")]
    pub student_id: Option<Id>,
    #[serde(default, rename = "atividade_id")]
    pub activity_id: Option<Id>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct GradePatch {
    #[serde(default, rename = "nota", deserialize_with = "nullable")]
    pub score: Option<Option<f64>>,
    #[serde(default, rename = "aluno_id", deserialize_with = "nullable")]
    pub student_id: Option<Option<Id>>,
    #[serde(default, rename = "atividade_id", deserialize_with = "nullable")]
    pub activity_id: Option<Option<Id>>,
}

impl From<NewGrade> for Grade {
    fn from(input: NewGrade) -> Self {
        Self { id: 0, score: input.score, student_id: input.student_id, activity_id: input.activity_id }
    }
}

impl Entity for Grade {
    const TABLE: &'static str = "notas";
    const NOT_FOUND: &'static str = "Nota não encontrada";
    type Patch = GradePatch;

    fn id(&self) -> Id { self.id }
    fn assign_id(&mut self, id: Id) { self.id = id; }

    fn apply(&mut self, patch: GradePatch) {
        merge(&mut self.score, patch.score);
        merge(&mut self.student_id, patch.student_id);
        merge(&mut self.activity_id, patch.activity_id);
    }
}
