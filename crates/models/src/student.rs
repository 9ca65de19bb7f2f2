use serde::{Deserialize, Serialize};

use crate::patch::{merge, nullable};
use crate::{Entity, Id};

/// Aluno. `turma_id` is stored as given; nothing checks that the class exists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: Id,
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "idade")]
    pub age: Option<i32>,
    #[serde(rename = "turma_id")]
    pub class_id: Option<Id>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewStudent {
    #[serde(default, rename = "nome")]
    pub name: Option<String>,
    #[serde(default, rename = "idade")]
    pub age: Option<i32>,
    #[serde(default, rename = "turma_id")]
    pub class_id: Option<Id>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct StudentPatch {
    #[serde(default, rename = "nome", deserialize_with = "nullable")]
    pub name: Option<Option<String>>,
    #[serde(default, rename = "idade", deserialize_with = "nullable")]
    pub age: Option<Option<i32>>,
    #[serde(default, rename = "turma_id", deserialize_with = "nullable")]
    pub class_id: Option<Option<Id>>,
}

impl From<NewStudent> for Student {
    fn from(input: NewStudent) -> Self {
        Self { id: 0, name: input.name, age: input.age, class_id: input.class_id }
    }
}

impl Entity for Student {
    const TABLE: &'static str = "alunos";
    const NOT_FOUND: &'static str = "Aluno não encontrado";
    type Patch = StudentPatch;

    fn id(&self) -> Id { self.id }
    fn assign_id(&mut self, id: Id) { self.id = id; }

    fn apply(&mut self, patch: StudentPatch) {
        merge(&mut self.name, patch.name);
        merge(&mut self.age, patch.age);
        merge(&mut self.class_id, patch.class_id);
    }
}
