//! Host adapter boundary
//!
//! The engine never owns an event loop. The host fires phase-transition
//! signals at points of its own choosing; the engine announces which signal
//! names it is waiting for through [`HostAdapter::subscribe_once`] and the
//! host later pushes each firing back in via `App::deliver_signal` (or the
//! `engine::deliver_signal` facade). Signals carry no arguments and are
//! assumed to fire at most once per boot.

/// Default signal gating the `BootingPlugins` phase.
pub const PLUGINS_READY: &str = "plugins-ready";

/// Default signal gating the final `BootingThemes` phase. Overridable with
/// `App::run_last_boot_at`.
pub const THEMES_READY: &str = "themes-ready";

/// Capability the host supplies so the engine can register one-shot
/// listeners for named signals.
///
/// An implementation typically hooks `signal` into the host's own event
/// system with a callback that invokes `engine::deliver_signal(signal)`.
pub trait HostAdapter: Send {
    fn subscribe_once(&mut self, signal: &str);
}

/// Inert adapter for embedded and test use: subscriptions are dropped and
/// the caller drives `deliver_signal` directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHost;

impl HostAdapter for NullHost {
    fn subscribe_once(&mut self, _signal: &str) {}
}
