//! Read-only introspection surface

use super::registry::ProviderState;
use super::status::Status;
use serde::Serialize;

/// Point-in-time view of the engine: current status plus every provider's
/// state, in insertion order. Built by `App::snapshot()`.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub status: Status,
    pub providers: Vec<ProviderSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProviderSnapshot {
    pub id: String,
    pub state: ProviderState,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
