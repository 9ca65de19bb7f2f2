use serde::{Deserialize, Serialize};

use crate::patch::{merge, nullable};
use crate::{Entity, Id};

/// Professor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: Id,
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "idade")]
    pub age: Option<i32>,
    #[serde(rename = "materia")]
    pub subject: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewTeacher {
    #[serde(default, rename = "nome")]
    pub name: Option<String>,
    #[serde(default, rename = "idade")]
    pub age: Option<i32>,
    #[serde(default, rename = "materia")]
    pub subject: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct TeacherPatch {
    #[serde(default, rename = "nome", deserialize_with = "nullable")]
    pub name: Option<Option<String>>,
    #[serde(default, rename = "idade", deserialize_with = "nullable")]
    pub age: Option<Option<i32>>,
    #[serde(default, rename = "materia", deserialize_with = "nullable")]
    pub subject: Option<Option<String>>,
}

impl From<NewTeacher> for Teacher {
    fn from(input: NewTeacher) -> Self {
        Self { id: 0, name: input.name, age: input.age, subject: input.subject }
    }
}

impl Entity for Teacher {
    const TABLE: &'static str = "professores";
    const NOT_FOUND: &'static str = "Professor não encontrado";
    type Patch = TeacherPatch;

    fn id(&self) -> Id { self.id }
    fn assign_id(&mut self, id: Id) { self.id = id; }

    fn apply(&mut self, patch: TeacherPatch) {
        merge(&mut self.name, patch.name);
        merge(&mut self.age, patch.age);
        merge(&mut self.subject, patch.subject);
    }
}
