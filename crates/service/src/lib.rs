//! Service layer for the school services.
//! - `storage`: the JSON-file entity store and its `EntityStore` trait.
//! - `reference`: existence checks against the management service.
//! - `crud`, `activities`, `reservations`: business operations used by the HTTP handlers.

pub mod errors;
pub mod observability;
pub mod storage;
pub mod reference;
pub mod crud;
pub mod activities;
pub mod reservations;
#[cfg(test)]
pub mod test_support;
