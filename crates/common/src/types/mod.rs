use serde::{Deserialize, Serialize};

/// Body of `GET /status`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub service: String,
    pub status: String,
}

impl Status {
    pub fn ok(service: &str) -> Self {
        Self { service: service.to_string(), status: "ok".to_string() }
    }
}

/// Body of `GET /`: service name plus the routes it serves.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ServiceIndex {
    pub service: String,
    pub endpoints: Vec<String>,
}
