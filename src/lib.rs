//! # bootflow
//!
//! A host-driven bootstrap lifecycle engine for plugin/application hosts.
//!
//! bootflow accepts **service providers** — units of registration and boot
//! logic — sequences them through fixed lifecycle phases, resolves the
//! resulting service graph into a shared key-value container, and exposes
//! resolved services to callers.
//!
//! ## Features
//!
//! - **Two-phase providers**: every provider's `register` runs before its
//!   `boot`, and each runs at most once per boot.
//! - **Reentrant registration**: notification listeners receive the engine
//!   itself and may add providers mid-boot — even from inside another
//!   provider's callbacks — while a second `boot()` is rejected.
//! - **Host-gated phases**: the plugins and themes phases only advance when
//!   the host fires the corresponding signal.
//! - **Deferred boot**: a provider can opt out of the normal boot pass and
//!   run after every other provider has registered and booted.
//! - **Partial-failure tolerance**: a failing provider is marked and
//!   skipped; the error channel decides whether the boot continues.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bootflow::{App, Container, ServiceProvider, PLUGINS_READY, THEMES_READY};
//!
//! struct GreeterProvider;
//!
//! impl ServiceProvider for GreeterProvider {
//!     fn id(&self) -> &str {
//!         "greeter"
//!     }
//!
//!     fn register(&mut self, container: &Container) -> bool {
//!         container.set("greeting", String::from("hello"));
//!         true
//!     }
//!
//!     fn boot(&mut self, container: &Container) -> bool {
//!         container.has("greeting")
//!     }
//! }
//!
//! fn main() -> bootflow::Result<()> {
//!     let mut app = App::new();
//!     app.add_provider(Box::new(GreeterProvider))?;
//!
//!     app.boot()?;
//!     // normally fired by the host adapter:
//!     app.deliver_signal(PLUGINS_READY)?;
//!     app.deliver_signal(THEMES_READY)?;
//!
//!     let greeting = app.container().get::<String>("greeting")?;
//!     assert_eq!(&*greeting, "hello");
//!     Ok(())
//! }
//! ```

pub mod container;
pub mod engine;
pub mod error;
pub mod host;
pub mod lifecycle;
pub mod provider;

// Re-export core types
pub use container::Container;
pub use error::{BootflowError, Result};
pub use host::{HostAdapter, NullHost, PLUGINS_READY, THEMES_READY};
pub use lifecycle::{
    App, AppBuilder, AppEvent, ErrorPolicy, EventKind, ProviderRegistry, ProviderSnapshot,
    ProviderState, Snapshot, Status,
};
pub use provider::{ProviderPackage, ServiceProvider};

/// Prelude module for convenient imports
///
/// ```
/// use bootflow::prelude::*;
/// ```
pub mod prelude {
    pub use crate::container::Container;
    pub use crate::error::{BootflowError, Result};
    pub use crate::host::{HostAdapter, NullHost, PLUGINS_READY, THEMES_READY};
    pub use crate::lifecycle::{
        App, AppBuilder, AppEvent, ErrorPolicy, EventKind, ProviderState, Snapshot, Status,
    };
    pub use crate::provider::{ProviderPackage, ServiceProvider};
    pub use std::sync::Arc;
}
