pub mod routes;
pub mod startup;
pub mod bootstrap;
pub mod errors;

pub use startup::{run, ServiceKind};
