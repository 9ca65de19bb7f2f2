use serde::{Deserialize, Serialize};

use crate::patch::{merge, nullable, overwrite};
use crate::{Entity, Id};

/// Turma.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Class {
    pub id: Id,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "professor_id")]
    pub teacher_id: Option<Id>,
    #[serde(rename = "ativo")]
    pub active: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewClass {
    #[serde(default, rename = "descricao")]
    pub description: Option<String>,
    #[serde(default, rename = "professor_id")]
    pub teacher_id: Option<Id>,
    #[serde(default, rename = "ativo")]
    pub active: Option<bool>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ClassPatch {
    #[serde(default, rename = "descricao", deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, rename = "professor_id", deserialize_with = "nullable")]
    pub teacher_id: Option<Option<Id>>,
    #[serde(default, rename = "ativo")]
    pub active: Option<bool>,
}

impl From<NewClass> for Class {
    fn from(input: NewClass) -> Self {
        Self {
            id: 0,
            description: input.description,
            teacher_id: input.teacher_id,
            active: input.active.unwrap_or(true),
        }
    }
}

impl Entity for Class {
    const TABLE: &'static str = "turmas";
    const NOT_FOUND: &'static str = "Turma não encontrada";
    type Patch = ClassPatch;

    fn id(&self) -> Id { self.id }
    fn assign_id(&mut self, id: Id) { self.id = id; }

    fn apply(&mut self, patch: ClassPatch) {
        merge(&mut self.description, patch.description);
        merge(&mut self.teacher_id, patch.teacher_id);
        overwrite(&mut self.active, patch.active);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn active_defaults_to_true() {
        let input: NewClass = serde_json::from_value(json!({"descricao": "3A"})).unwrap();
        let class = Class::from(input);
        assert!(class.active);
        assert_eq!(class.teacher_id, None);
    }

    #[test]
    fn null_active_keeps_previous_value() {
        let mut class = Class { id: 1, description: None, teacher_id: Some(2), active: false };
        class.apply(serde_json::from_value(json!({"ativo": null})).unwrap());
        assert!(!class.active);
        class.apply(serde_json::from_value(json!({"ativo": true})).unwrap());
        assert!(class.active);
    }
}
