#![cfg(test)]
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use models::Id;

use crate::reference::{ReferenceKind, ReferenceValidator, Validation};

/// Scripted validator: answers from a table (default `NotFound`) and records every call in order.
#[derive(Default)]
pub struct ScriptedValidator {
    answers: HashMap<(&'static str, Id), Validation>,
    unreachable: AtomicBool,
    calls: Mutex<Vec<(ReferenceKind, Id)>>,
}

impl ScriptedValidator {
    pub fn with(mut self, kind: ReferenceKind, id: Id, outcome: Validation) -> Self {
        self.answers.insert((kind.path(), id), outcome);
        self
    }

    pub fn down() -> Self {
        Self { unreachable: AtomicBool::new(true), ..Default::default() }
    }

    /// From now on every call answers `Unreachable`.
    pub fn go_down(&self) {
        self.unreachable.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<(ReferenceKind, Id)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ReferenceValidator for ScriptedValidator {
    async fn validate(&self, kind: ReferenceKind, id: Id) -> Validation {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((kind, id));
        }
        if self.unreachable.load(Ordering::SeqCst) {
            return Validation::Unreachable;
        }
        self.answers.get(&(kind.path(), id)).copied().unwrap_or(Validation::NotFound)
    }
}
