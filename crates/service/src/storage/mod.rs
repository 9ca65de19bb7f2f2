//! Storage abstractions for service layer
//!
//! `JsonFileDb` keeps every table of one service in a single JSON file;
//! `Table<E>` is the typed handle handed to the business services.

pub mod json_file_db;
pub mod store;

pub use json_file_db::JsonFileDb;
pub use store::{EntityStore, Table};
