//! Lifecycle State Machine
//!
//! The heart of bootflow: a fixed, host-driven sequence of phases that
//! carries every service provider through `register` -> `boot`.
//!
//! # Lifecycle Phases
//!
//! ```text
//! 1. Idle
//!    |  boot()
//! 2. BootingEarly        <- register/boot pass, inline
//!    |  host signal ("plugins-ready")
//! 3. BootingPlugins      <- register/boot pass
//!    |  host signal (configurable, default "themes-ready")
//! 4. BootingThemes       <- register/boot pass, then deferred boots
//!    |
//! 5. Booted              <- terminal success
//!
//! any of 2-4 --fatal failure--> Failed (terminal)
//! ```
//!
//! Providers may be added at any point except from the failed state; once
//! boot has started, additions take the reentrant path and are registered
//! and booted in place.

mod app;
mod events;
mod inspect;
mod registry;
mod status;

pub use app::{App, AppBuilder};
pub use events::{AppEvent, ErrorListener, ErrorPolicy, EventKind, EventListener};
pub use inspect::{ProviderSnapshot, Snapshot};
pub use registry::{ProviderRegistry, ProviderState};
pub use status::Status;
