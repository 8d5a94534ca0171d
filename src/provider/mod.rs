//! Service provider contracts
//!
//! A [`ServiceProvider`] is the unit of registration/boot logic the engine
//! sequences through the lifecycle phases. A [`ProviderPackage`] is a named
//! grouping that expands into an ordered list of providers.

use crate::container::Container;

/// A unit of registration and boot logic.
///
/// The engine drives every provider through two passes, in this order:
///
/// 1. `register` — bind factories/values into the shared container. Must not
///    depend on other providers having run.
/// 2. `boot` — wire behavior that depends on *other* providers'
///    registrations already being in place.
///
/// Both return `bool`: `false` signals a recoverable failure — the engine
/// marks the provider failed, never retries it, and routes the failure
/// through the error channel. Hard contract violations are surfaced as
/// engine errors instead, so providers never need to panic to report an
/// ordinary failure.
///
/// # Example
///
/// ```rust,ignore
/// struct CacheProvider;
///
/// impl ServiceProvider for CacheProvider {
///     fn id(&self) -> &str {
///         "cache"
///     }
///
///     fn register(&mut self, container: &Container) -> bool {
///         container.set("cache", Cache::new());
///         true
///     }
///
///     fn boot(&mut self, container: &Container) -> bool {
///         // other providers have registered by now
///         container.get::<Config>("config").is_ok()
///     }
/// }
/// ```
pub trait ServiceProvider: Send {
    /// Stable identity, used for logging, duplicate detection and
    /// notification payloads. Adding two providers with the same id is a
    /// logic error.
    fn id(&self) -> &str;

    /// Perform idempotent writes into the container.
    fn register(&mut self, container: &Container) -> bool;

    /// Perform logic that depends on other providers' registrations.
    fn boot(&mut self, container: &Container) -> bool;

    /// Deferred-boot flag. When `false`, `boot` is skipped during the normal
    /// synchronous pass and queued for a final pass after the last phase,
    /// by which point every other provider has both registered and booted.
    fn is_bootable(&self) -> bool {
        true
    }
}

/// A named grouping of providers.
///
/// Adding a package is a pure expansion step: it is equivalent to adding
/// each of its providers, in the order returned, at the point the package
/// is added.
pub trait ProviderPackage {
    fn name(&self) -> &str;

    /// Yield the providers, consumed exactly once.
    fn providers(self: Box<Self>) -> Vec<Box<dyn ServiceProvider>>;
}
