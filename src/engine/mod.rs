//! Process-wide engine facade
//!
//! Exactly one lifecycle engine exists per process. There is no ambient
//! construction: [`create`] installs an engine, [`reset`] tears it down
//! (test/teardown hook), and everything in between goes through the
//! installed instance.
//!
//! [`make`] is the resolution facade. Its three failure modes are distinct
//! error variants so callers can tell them apart programmatically:
//! no engine installed (`NotInitialized`), engine not yet booted
//! (`NotBooted`), and key absent from the container (`ServiceNotFound`).
//!
//! Notification listeners run while the engine lock is held: inside a
//! listener, use the `&mut App` it receives, not these facade functions.

use crate::error::{BootflowError, Result};
use crate::lifecycle::App;
use std::sync::{Arc, Mutex, MutexGuard};

static ENGINE: Mutex<Option<App>> = Mutex::new(None);

fn slot() -> MutexGuard<'static, Option<App>> {
    match ENGINE.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Install the process-wide engine. Fails if one is already installed;
/// call [`reset`] first to replace it.
pub fn create(app: App) -> Result<()> {
    let mut engine = slot();
    if engine.is_some() {
        return Err(BootflowError::AlreadyInitialized);
    }
    *engine = Some(app);
    Ok(())
}

/// Drop the process-wide engine, if any.
pub fn reset() {
    *slot() = None;
}

pub fn is_initialized() -> bool {
    slot().is_some()
}

/// Run `f` against the installed engine.
pub fn with<R>(f: impl FnOnce(&mut App) -> R) -> Result<R> {
    let mut engine = slot();
    let app = engine.as_mut().ok_or(BootflowError::NotInitialized)?;
    Ok(f(app))
}

/// Start the installed engine's boot sequence.
pub fn boot() -> Result<()> {
    with(App::boot)?
}

/// Forward a host signal to the installed engine.
pub fn deliver_signal(signal: &str) -> Result<()> {
    with(|app| app.deliver_signal(signal))?
}

/// Resolve a service from the booted engine's container.
pub fn make<T: Send + Sync + 'static>(key: &str) -> Result<Arc<T>> {
    let engine = slot();
    let app = engine.as_ref().ok_or(BootflowError::NotInitialized)?;
    if !app.status().is_booted() {
        return Err(BootflowError::NotBooted {
            status: app.status(),
        });
    }
    app.container().get::<T>(key)
}
