//! Lifecycle notifications
//!
//! The engine publishes [`AppEvent`]s synchronously to listeners registered
//! per [`EventKind`]. Every listener receives `&mut App` alongside the event,
//! which is the reentrancy seam: a listener may add providers (or packages)
//! to the engine mid-dispatch. Provider failures travel on a separate error
//! channel whose listeners decide between continuing and aborting the boot.

use super::app::App;
use super::status::Status;
use crate::container::Container;
use crate::error::BootflowError;
use std::sync::Arc;
use strum_macros::EnumDiscriminants;

/// Notification published by the engine.
#[derive(Debug, Clone, EnumDiscriminants)]
#[strum_discriminants(name(EventKind), derive(Hash))]
pub enum AppEvent {
    /// Emitted before a phase's register/boot passes. Listeners may add
    /// providers; they are processed within the same phase.
    ProvidersRequested { status: Status },
    /// A provider was appended to the registry, before any register attempt.
    ProviderAdded { id: String },
    /// A provider's `register` succeeded.
    ProviderRegistered { id: String },
    /// A provider's `boot` succeeded (deferred-pass boots included).
    ProviderBooted { id: String },
    /// The final registration pass completed. Fired once per boot.
    Registered,
    /// Terminal success. Fired exactly once per boot, carrying a shared
    /// handle to the container the providers populated.
    Booted { container: Container },
}

impl AppEvent {
    pub fn kind(&self) -> EventKind {
        EventKind::from(self)
    }
}

/// Outcome an error listener reports back to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Skip the failed provider and keep processing the rest.
    Continue,
    /// Treat the failure as fatal to the whole boot.
    Abort,
}

pub type EventListener = Arc<dyn Fn(&mut App, &AppEvent) + Send + Sync>;

pub type ErrorListener = Arc<dyn Fn(&mut App, &BootflowError) -> ErrorPolicy + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_maps_variants() {
        let event = AppEvent::ProviderAdded {
            id: "cache".to_string(),
        };
        assert_eq!(event.kind(), EventKind::ProviderAdded);
        let booted = AppEvent::Booted {
            container: Container::new(),
        };
        assert_eq!(booted.kind(), EventKind::Booted);
        assert_ne!(EventKind::Registered, EventKind::ProviderRegistered);
    }
}
