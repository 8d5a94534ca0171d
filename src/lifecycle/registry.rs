use crate::error::{BootflowError, Result};
use crate::provider::ServiceProvider;
use serde::Serialize;
use strum_macros::Display;

/// Per-provider lifecycle state. Transitions only move forward:
/// `Pending -> Registered -> Booted`, with `Failed` reachable from any
/// state. A failed provider is never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProviderState {
    Pending,
    Registered,
    Booted,
    Failed,
}

pub(crate) struct ProviderEntry {
    pub(crate) provider: Box<dyn ServiceProvider>,
    pub(crate) state: ProviderState,
    pub(crate) deferred: bool,
}

/// Ordered collection of providers with per-provider state.
///
/// Insertion order is processing order. The registry is safe to append to
/// while an index-based traversal is in progress — new entries are visited
/// within the same pass — which is what makes reentrant provider additions
/// work.
#[derive(Default)]
pub struct ProviderRegistry {
    entries: Vec<ProviderEntry>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a provider, rejecting a previously used id.
    ///
    /// Returns the index of the new entry.
    pub fn push(&mut self, provider: Box<dyn ServiceProvider>) -> Result<usize> {
        let id = provider.id().to_string();
        if self.contains(&id) {
            return Err(BootflowError::DuplicateProvider { id });
        }
        let deferred = !provider.is_bootable();
        self.entries.push(ProviderEntry {
            provider,
            state: ProviderState::Pending,
            deferred,
        });
        Ok(self.entries.len() - 1)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.provider.id() == id)
    }

    pub fn state_of(&self, id: &str) -> Option<ProviderState> {
        self.entries
            .iter()
            .find(|entry| entry.provider.id() == id)
            .map(|entry| entry.state)
    }

    /// Insertion-ordered `(id, state)` view, used by the snapshot surface.
    pub fn states(&self) -> impl Iterator<Item = (&str, ProviderState)> {
        self.entries
            .iter()
            .map(|entry| (entry.provider.id(), entry.state))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entry(&self, index: usize) -> &ProviderEntry {
        &self.entries[index]
    }

    pub(crate) fn entry_mut(&mut self, index: usize) -> &mut ProviderEntry {
        &mut self.entries[index]
    }
}
