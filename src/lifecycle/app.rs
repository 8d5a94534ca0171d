//! Lifecycle state machine
//!
//! [`App`] owns the current phase, the provider registry and the shared
//! container, and drives every provider through `register` -> `boot` at the
//! correct phase. Phase transitions are host-driven: `boot()` runs the early
//! phase inline, then subscribes to two host signals and stays quiescent
//! until [`App::deliver_signal`] pushes each one back in.
//!
//! Everything here is synchronous and reentrant: notification listeners are
//! invoked with `&mut App` and may add providers mid-pass. Traversals are
//! index-based over growable sequences so those additions are visited within
//! the same pass.

use super::events::{AppEvent, ErrorListener, ErrorPolicy, EventKind, EventListener};
use super::inspect::{ProviderSnapshot, Snapshot};
use super::registry::{ProviderRegistry, ProviderState};
use super::status::Status;
use crate::container::Container;
use crate::error::{BootflowError, Result};
use crate::host::{HostAdapter, NullHost, PLUGINS_READY, THEMES_READY};
use crate::provider::{ProviderPackage, ServiceProvider};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// The bootstrap lifecycle engine.
///
/// # Example
///
/// ```rust,ignore
/// let mut app = App::builder()
///     .host(WordpressHost::new())
///     .on(EventKind::ProviderBooted, |_, event| {
///         tracing::debug!(?event, "provider up");
///     })
///     .build();
///
/// app.add_provider(Box::new(CacheProvider))?;
/// app.boot()?;
/// // the host later fires:
/// app.deliver_signal(PLUGINS_READY)?;
/// app.deliver_signal(THEMES_READY)?;
/// assert!(app.status().is_booted());
/// ```
pub struct App {
    status: Status,
    is_booting: bool,
    container: Container,
    registry: ProviderRegistry,
    listeners: HashMap<EventKind, Vec<EventListener>>,
    error_listeners: Vec<ErrorListener>,
    host: Box<dyn HostAdapter>,
    last_boot_signal: String,
    /// Signals the engine is waiting on, each gating one phase.
    awaiting: Vec<(String, Status)>,
    /// Which providers were added while each phase was current.
    added_by_phase: BTreeMap<Status, Vec<String>>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create an engine with the inert [`NullHost`] adapter. Use
    /// [`App::builder`] to inject a real host.
    pub fn new() -> Self {
        Self::with_host(Box::new(NullHost))
    }

    pub fn with_host(host: Box<dyn HostAdapter>) -> Self {
        Self {
            status: Status::Idle,
            is_booting: false,
            container: Container::new(),
            registry: ProviderRegistry::new(),
            listeners: HashMap::new(),
            error_listeners: Vec::new(),
            host,
            last_boot_signal: THEMES_READY.to_string(),
            awaiting: Vec::new(),
            added_by_phase: BTreeMap::new(),
        }
    }

    pub fn builder() -> AppBuilder {
        AppBuilder::new()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_booting(&self) -> bool {
        self.is_booting
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Ids of the providers that were added while `status` was the current
    /// phase, in the order they arrived.
    pub fn added_during(&self, status: Status) -> &[String] {
        self.added_by_phase
            .get(&status)
            .map_or(&[], |ids| ids.as_slice())
    }

    /// Read-only view of the engine state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            status: self.status,
            providers: self
                .registry
                .states()
                .map(|(id, state)| ProviderSnapshot {
                    id: id.to_string(),
                    state,
                })
                .collect(),
        }
    }

    /// Subscribe a listener to one kind of lifecycle notification.
    ///
    /// Listeners run synchronously, in registration order, and receive the
    /// engine itself: adding providers from inside a listener is the
    /// supported reentrant path.
    pub fn on<F>(&mut self, kind: EventKind, listener: F)
    where
        F: Fn(&mut App, &AppEvent) + Send + Sync + 'static,
    {
        self.listeners
            .entry(kind)
            .or_default()
            .push(Arc::new(listener));
    }

    /// Subscribe to the error channel.
    ///
    /// Provider failures are routed here. When no error listener is
    /// registered a failure is fatal to the whole boot; with listeners, the
    /// boot continues unless any of them returns [`ErrorPolicy::Abort`].
    pub fn on_error<F>(&mut self, listener: F)
    where
        F: Fn(&mut App, &BootflowError) -> ErrorPolicy + Send + Sync + 'static,
    {
        self.error_listeners.push(Arc::new(listener));
    }

    /// Select which host signal gates the final phase.
    ///
    /// Only effective before `boot()`; afterwards the subscription is
    /// already placed and the call is ignored.
    pub fn run_last_boot_at(&mut self, signal: impl Into<String>) {
        if self.status != Status::Idle {
            tracing::warn!(
                status = %self.status,
                "last-boot signal can only be changed before boot; ignoring"
            );
            return;
        }
        self.last_boot_signal = signal.into();
    }

    /// Add a provider to the engine.
    ///
    /// Fails fast when the engine is in the failed state or the id is
    /// already taken. Emits `ProviderAdded` before any register attempt.
    /// When boot has already started (status past `Idle`) the provider is
    /// registered and booted immediately, in place, honoring the
    /// deferred-boot flag.
    pub fn add_provider(&mut self, provider: Box<dyn ServiceProvider>) -> Result<()> {
        if self.status.is_failed() {
            return Err(BootflowError::EngineFailed);
        }
        let id = provider.id().to_string();
        let index = self.registry.push(provider)?;
        self.added_by_phase
            .entry(self.status)
            .or_default()
            .push(id.clone());
        tracing::debug!(%id, status = %self.status, "provider added");
        self.emit(AppEvent::ProviderAdded { id });

        if self.status > Status::Idle {
            if let Err(err) = self.activate(index) {
                self.fail(&err);
                return Err(err);
            }
        }
        Ok(())
    }

    /// Add every provider a package yields, in order. The first error
    /// aborts the expansion.
    pub fn add_package(&mut self, package: Box<dyn ProviderPackage>) -> Result<()> {
        tracing::debug!(package = package.name(), "expanding package");
        for provider in package.providers() {
            self.add_provider(provider)?;
        }
        Ok(())
    }

    /// Start the boot sequence. The only transition out of `Idle`.
    ///
    /// Runs the `BootingEarly` phase inline, then subscribes to the
    /// plugins-ready signal and the configured last-boot signal and returns.
    /// The remaining phases run when the host delivers those signals.
    ///
    /// Calling this again mid-boot — including from inside a notification
    /// listener — fails without side effects.
    pub fn boot(&mut self) -> Result<()> {
        if self.is_booting {
            return Err(BootflowError::BootInProgress);
        }
        if self.status != Status::Idle {
            return Err(BootflowError::NotIdle {
                status: self.status,
            });
        }

        self.is_booting = true;
        tracing::info!(providers = self.registry.len(), "boot sequence starting");

        if let Err(err) = self.run_phase(Status::BootingEarly) {
            self.fail(&err);
            return Err(err);
        }

        self.host.subscribe_once(PLUGINS_READY);
        self.awaiting
            .push((PLUGINS_READY.to_string(), Status::BootingPlugins));

        let last = self.last_boot_signal.clone();
        self.host.subscribe_once(&last);
        self.awaiting.push((last, Status::BootingThemes));
        Ok(())
    }

    /// Inbound entry point for host signals.
    ///
    /// Unknown or already-consumed signals are ignored. When a later signal
    /// arrives while an earlier gated phase is still pending, the earlier
    /// phase runs first so phase order stays deterministic.
    pub fn deliver_signal(&mut self, signal: &str) -> Result<()> {
        if self.status.is_failed() {
            return Err(BootflowError::EngineFailed);
        }
        let Some(position) = self.awaiting.iter().position(|(name, _)| name == signal) else {
            tracing::debug!(signal, "no pending phase for signal; ignoring");
            return Ok(());
        };
        let (_, target) = self.awaiting.remove(position);

        let mut due = vec![target];
        self.awaiting.retain(|(_, phase)| {
            if *phase < target {
                due.push(*phase);
                false
            } else {
                true
            }
        });
        due.sort();

        for phase in due {
            if let Err(err) = self.advance(phase) {
                self.fail(&err);
                return Err(err);
            }
        }
        Ok(())
    }

    fn advance(&mut self, phase: Status) -> Result<()> {
        self.run_phase(phase)?;
        if phase.is_themes_step() {
            self.finish()?;
        }
        Ok(())
    }

    /// One phase: announce it, then run the registration and boot passes.
    fn run_phase(&mut self, phase: Status) -> Result<()> {
        if self.status.is_failed() {
            return Err(BootflowError::EngineFailed);
        }
        self.status = phase;
        tracing::info!(phase = %phase, "entering phase");
        self.emit(AppEvent::ProvidersRequested { status: phase });
        self.register_pass()?;
        self.boot_pass()?;
        // A listener may have failed the engine on the reentrant add path
        // without a way to propagate the error; the phase must not report
        // success past that.
        if self.status.is_failed() {
            return Err(BootflowError::EngineFailed);
        }
        Ok(())
    }

    /// Call `register` on every pending provider, in insertion order.
    /// Entries appended mid-pass are visited too.
    fn register_pass(&mut self) -> Result<()> {
        let mut index = 0;
        while index < self.registry.len() {
            if self.status.is_failed() {
                break;
            }
            if self.registry.entry(index).state == ProviderState::Pending {
                self.register_at(index)?;
            }
            index += 1;
        }
        Ok(())
    }

    /// Call `boot` on every registered, non-deferred provider.
    fn boot_pass(&mut self) -> Result<()> {
        let mut index = 0;
        while index < self.registry.len() {
            if self.status.is_failed() {
                break;
            }
            let entry = self.registry.entry(index);
            if entry.state == ProviderState::Registered && !entry.deferred {
                self.boot_at(index)?;
            }
            index += 1;
        }
        Ok(())
    }

    /// Boot the deferred providers, in the order they were added. By now
    /// every non-deferred provider has both registered and booted.
    fn deferred_pass(&mut self) -> Result<()> {
        let mut index = 0;
        while index < self.registry.len() {
            if self.status.is_failed() {
                break;
            }
            let entry = self.registry.entry(index);
            if entry.state == ProviderState::Registered && entry.deferred {
                self.boot_at(index)?;
            }
            index += 1;
        }
        Ok(())
    }

    /// Immediate register/boot for a provider added after boot started.
    fn activate(&mut self, index: usize) -> Result<()> {
        if self.registry.entry(index).state == ProviderState::Pending {
            self.register_at(index)?;
        }
        let entry = self.registry.entry(index);
        if entry.state != ProviderState::Registered {
            return Ok(());
        }
        // A deferred provider waits for the deferred pass; once the engine
        // is booted that pass has already run, so it boots right away.
        if entry.deferred && !self.status.is_booted() {
            return Ok(());
        }
        self.boot_at(index)
    }

    fn register_at(&mut self, index: usize) -> Result<()> {
        let entry = self.registry.entry_mut(index);
        let id = entry.provider.id().to_string();
        tracing::debug!(%id, "registering provider");
        if entry.provider.register(&self.container) {
            entry.state = ProviderState::Registered;
            self.emit(AppEvent::ProviderRegistered { id });
            Ok(())
        } else {
            entry.state = ProviderState::Failed;
            self.dispatch_error(BootflowError::RegisterFailed { id })
        }
    }

    fn boot_at(&mut self, index: usize) -> Result<()> {
        let entry = self.registry.entry_mut(index);
        let id = entry.provider.id().to_string();
        tracing::debug!(%id, "booting provider");
        if entry.provider.boot(&self.container) {
            entry.state = ProviderState::Booted;
            self.emit(AppEvent::ProviderBooted { id });
            Ok(())
        } else {
            entry.state = ProviderState::Failed;
            self.dispatch_error(BootflowError::BootFailed { id })
        }
    }

    /// After the final phase: bulk `Registered`, deferred boots, `Booted`.
    fn finish(&mut self) -> Result<()> {
        self.emit(AppEvent::Registered);
        self.deferred_pass()?;
        if self.status.is_failed() {
            return Err(BootflowError::EngineFailed);
        }
        self.status = Status::Booted;
        self.is_booting = false;
        tracing::info!(providers = self.registry.len(), "boot complete");
        let container = self.container.clone();
        self.emit(AppEvent::Booted { container });
        Ok(())
    }

    /// Dispatch a notification to its listeners.
    ///
    /// Index-based so listeners registered mid-dispatch for the same kind
    /// are invoked in this dispatch as well.
    fn emit(&mut self, event: AppEvent) {
        let kind = event.kind();
        let mut index = 0;
        loop {
            let listener = match self.listeners.get(&kind).and_then(|set| set.get(index)) {
                Some(listener) => Arc::clone(listener),
                None => break,
            };
            (listener.as_ref())(self, &event);
            index += 1;
        }
    }

    /// Route a provider failure through the error channel.
    ///
    /// With no listeners the failure propagates and the boot fails; with
    /// listeners, any `Abort` verdict propagates, otherwise processing
    /// continues.
    fn dispatch_error(&mut self, err: BootflowError) -> Result<()> {
        tracing::error!(error = %err, "provider failure");
        if self.error_listeners.is_empty() {
            return Err(err);
        }
        let mut verdict = ErrorPolicy::Continue;
        let mut index = 0;
        loop {
            let listener = match self.error_listeners.get(index) {
                Some(listener) => Arc::clone(listener),
                None => break,
            };
            if (listener.as_ref())(self, &err) == ErrorPolicy::Abort {
                verdict = ErrorPolicy::Abort;
            }
            index += 1;
        }
        match verdict {
            ErrorPolicy::Continue => Ok(()),
            ErrorPolicy::Abort => Err(err),
        }
    }

    fn fail(&mut self, err: &BootflowError) {
        if self.status.is_failed() {
            // Already failed deeper in the call stack; nothing left to unwind.
            self.is_booting = false;
            return;
        }
        tracing::error!(error = %err, "boot failed; engine entering failed state");
        self.status = Status::Failed;
        self.is_booting = false;
        self.awaiting.clear();
    }
}

/// Fluent construction for [`App`], mirroring the usual builder shape:
///
/// ```rust,ignore
/// let app = App::builder()
///     .host(MyHost::default())
///     .last_boot_signal("setup-complete")
///     .on(EventKind::Booted, |app, _| { /* ... */ })
///     .build();
/// ```
pub struct AppBuilder {
    host: Box<dyn HostAdapter>,
    last_boot_signal: String,
    listeners: Vec<(EventKind, EventListener)>,
    error_listeners: Vec<ErrorListener>,
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            host: Box::new(NullHost),
            last_boot_signal: THEMES_READY.to_string(),
            listeners: Vec::new(),
            error_listeners: Vec::new(),
        }
    }

    pub fn host(mut self, host: impl HostAdapter + 'static) -> Self {
        self.host = Box::new(host);
        self
    }

    pub fn last_boot_signal(mut self, signal: impl Into<String>) -> Self {
        self.last_boot_signal = signal.into();
        self
    }

    pub fn on<F>(mut self, kind: EventKind, listener: F) -> Self
    where
        F: Fn(&mut App, &AppEvent) + Send + Sync + 'static,
    {
        self.listeners.push((kind, Arc::new(listener)));
        self
    }

    pub fn on_error<F>(mut self, listener: F) -> Self
    where
        F: Fn(&mut App, &BootflowError) -> ErrorPolicy + Send + Sync + 'static,
    {
        self.error_listeners.push(Arc::new(listener));
        self
    }

    pub fn build(self) -> App {
        let mut app = App::with_host(self.host);
        app.last_boot_signal = self.last_boot_signal;
        for (kind, listener) in self.listeners {
            app.listeners.entry(kind).or_default().push(listener);
        }
        app.error_listeners = self.error_listeners;
        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct CallLog(Arc<Mutex<Vec<String>>>);

    impl CallLog {
        fn push(&self, entry: impl Into<String>) {
            self.0.lock().unwrap().push(entry.into());
        }

        fn entries(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    struct Recorder {
        id: &'static str,
        bootable: bool,
        register_ok: bool,
        boot_ok: bool,
        log: CallLog,
    }

    impl Recorder {
        fn new(id: &'static str, log: CallLog) -> Self {
            Self {
                id,
                bootable: true,
                register_ok: true,
                boot_ok: true,
                log,
            }
        }

        fn deferred(mut self) -> Self {
            self.bootable = false;
            self
        }

        fn failing_register(mut self) -> Self {
            self.register_ok = false;
            self
        }

        fn failing_boot(mut self) -> Self {
            self.boot_ok = false;
            self
        }
    }

    impl ServiceProvider for Recorder {
        fn id(&self) -> &str {
            self.id
        }

        fn register(&mut self, _container: &Container) -> bool {
            self.log.push(format!("register:{}", self.id));
            self.register_ok
        }

        fn boot(&mut self, _container: &Container) -> bool {
            self.log.push(format!("boot:{}", self.id));
            self.boot_ok
        }

        fn is_bootable(&self) -> bool {
            self.bootable
        }
    }

    fn drive(app: &mut App) {
        app.boot().unwrap();
        app.deliver_signal(PLUGINS_READY).unwrap();
        app.deliver_signal(THEMES_READY).unwrap();
    }

    #[test]
    fn test_register_runs_before_boot() {
        let log = CallLog::default();
        let mut app = App::new();
        app.add_provider(Box::new(Recorder::new("a", log.clone())))
            .unwrap();
        app.add_provider(Box::new(Recorder::new("b", log.clone())))
            .unwrap();
        drive(&mut app);

        assert_eq!(
            log.entries(),
            vec!["register:a", "register:b", "boot:a", "boot:b"]
        );
        assert!(app.status().is_booted());
        assert!(!app.is_booting());
    }

    #[test]
    fn test_boot_requires_idle() {
        let mut app = App::new();
        drive(&mut app);
        let err = app.boot().unwrap_err();
        assert!(matches!(err, BootflowError::NotIdle { status } if status.is_booted()));
    }

    #[test]
    fn test_reentrant_boot_rejected() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_in_listener = Arc::clone(&seen);
        let mut app = App::builder()
            .on(EventKind::ProvidersRequested, move |app, _| {
                seen_in_listener
                    .lock()
                    .unwrap()
                    .push(app.boot().unwrap_err());
            })
            .build();

        let log = CallLog::default();
        app.add_provider(Box::new(Recorder::new("a", log.clone())))
            .unwrap();
        drive(&mut app);

        // One rejection per phase announcement, none of them destructive.
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert!(
            seen.iter()
                .all(|err| matches!(err, BootflowError::BootInProgress))
        );
        assert!(app.status().is_booted());
        assert_eq!(log.entries(), vec!["register:a", "boot:a"]);
    }

    #[test]
    fn test_provider_added_mid_boot_is_processed_immediately() {
        let log = CallLog::default();
        let log_for_listener = log.clone();
        let mut app = App::builder()
            .on(EventKind::ProvidersRequested, move |app, event| {
                if let AppEvent::ProvidersRequested { status } = event {
                    if status.is_plugins_step() {
                        app.add_provider(Box::new(Recorder::new(
                            "late",
                            log_for_listener.clone(),
                        )))
                        .unwrap();
                    }
                }
            })
            .build();

        app.add_provider(Box::new(Recorder::new("early", log.clone())))
            .unwrap();
        drive(&mut app);

        // "late" arrives at the plugins announcement and is fully processed
        // within that phase, after the early phase finished.
        assert_eq!(
            log.entries(),
            vec!["register:early", "boot:early", "register:late", "boot:late"]
        );
        assert_eq!(app.added_during(Status::BootingPlugins), ["late"]);
    }

    #[test]
    fn test_deferred_provider_boots_last() {
        let log = CallLog::default();
        let mut app = App::new();
        app.add_provider(Box::new(Recorder::new("deferred", log.clone()).deferred()))
            .unwrap();
        app.add_provider(Box::new(Recorder::new("normal", log.clone())))
            .unwrap();
        drive(&mut app);

        let entries = log.entries();
        assert_eq!(entries.last().unwrap(), "boot:deferred");
        assert_eq!(
            entries,
            vec!["register:deferred", "register:normal", "boot:normal", "boot:deferred"]
        );
    }

    #[test]
    fn test_deferred_provider_added_after_booted_boots_immediately() {
        let log = CallLog::default();
        let mut app = App::new();
        drive(&mut app);

        app.add_provider(Box::new(Recorder::new("late", log.clone()).deferred()))
            .unwrap();
        assert_eq!(log.entries(), vec!["register:late", "boot:late"]);
    }

    #[test]
    fn test_duplicate_id_fails_fast() {
        let log = CallLog::default();
        let mut app = App::new();
        app.add_provider(Box::new(Recorder::new("a", log.clone())))
            .unwrap();
        let err = app
            .add_provider(Box::new(Recorder::new("a", log.clone())))
            .unwrap_err();
        assert!(matches!(err, BootflowError::DuplicateProvider { .. }));
    }

    #[test]
    fn test_register_failure_without_error_listener_is_fatal() {
        let log = CallLog::default();
        let mut app = App::new();
        app.add_provider(Box::new(Recorder::new("bad", log.clone()).failing_register()))
            .unwrap();
        app.add_provider(Box::new(Recorder::new("good", log.clone())))
            .unwrap();

        let err = app.boot().unwrap_err();
        assert!(matches!(err, BootflowError::RegisterFailed { id } if id == "bad"));
        assert!(app.status().is_failed());
        assert!(!app.is_booting());

        // Nothing can be added to a failed engine.
        let err = app
            .add_provider(Box::new(Recorder::new("more", log.clone())))
            .unwrap_err();
        assert!(matches!(err, BootflowError::EngineFailed));
    }

    #[test]
    fn test_register_failure_with_listener_continues() {
        let log = CallLog::default();
        let mut app = App::builder()
            .on_error(|_, _| ErrorPolicy::Continue)
            .build();
        app.add_provider(Box::new(Recorder::new("bad", log.clone()).failing_register()))
            .unwrap();
        app.add_provider(Box::new(Recorder::new("good", log.clone())))
            .unwrap();
        drive(&mut app);

        // "bad" is never retried and never booted; "good" is unaffected.
        assert_eq!(
            log.entries(),
            vec!["register:bad", "register:good", "boot:good"]
        );
        assert_eq!(
            app.snapshot()
                .providers
                .iter()
                .map(|p| p.state)
                .collect::<Vec<_>>(),
            vec![ProviderState::Failed, ProviderState::Booted]
        );
        assert!(app.status().is_booted());
    }

    #[test]
    fn test_error_listener_abort_fails_boot() {
        let log = CallLog::default();
        let mut app = App::builder().on_error(|_, _| ErrorPolicy::Abort).build();
        app.add_provider(Box::new(Recorder::new("bad", log.clone()).failing_boot()))
            .unwrap();

        let err = app.boot().unwrap_err();
        assert!(matches!(err, BootflowError::BootFailed { id } if id == "bad"));
        assert!(app.status().is_failed());
    }

    #[test]
    fn test_swallowed_fatal_failure_keeps_engine_failed() {
        let log = CallLog::default();
        let log_for_listener = log.clone();
        let mut app = App::builder()
            .on(EventKind::ProvidersRequested, move |app, event| {
                if let AppEvent::ProvidersRequested { status } = event {
                    if status.is_early() {
                        // A careless listener swallowing the fatal error.
                        let _ = app.add_provider(Box::new(
                            Recorder::new("bad", log_for_listener.clone()).failing_register(),
                        ));
                    }
                }
            })
            .build();
        app.add_provider(Box::new(Recorder::new("good", log.clone())))
            .unwrap();

        let err = app.boot().unwrap_err();
        assert!(matches!(err, BootflowError::EngineFailed));
        assert!(app.status().is_failed());
        assert!(!app.is_booting());

        // The failure hit before any other provider was processed, and the
        // engine stays failed: signals cannot advance it.
        assert_eq!(log.entries(), vec!["register:bad"]);
        assert!(matches!(
            app.deliver_signal(PLUGINS_READY),
            Err(BootflowError::EngineFailed)
        ));
        assert!(matches!(
            app.deliver_signal(THEMES_READY),
            Err(BootflowError::EngineFailed)
        ));
        assert!(app.status().is_failed());
        assert_eq!(log.entries(), vec!["register:bad"]);
    }

    #[test]
    fn test_run_last_boot_at_only_before_boot() {
        let log = CallLog::default();
        let mut app = App::new();
        app.run_last_boot_at("setup-complete");
        app.add_provider(Box::new(Recorder::new("a", log.clone())))
            .unwrap();
        app.boot().unwrap();

        // Changing the gate mid-boot has no effect.
        app.run_last_boot_at("too-late");
        app.deliver_signal("too-late").unwrap();
        assert!(!app.status().is_booted());

        app.deliver_signal(PLUGINS_READY).unwrap();
        app.deliver_signal("setup-complete").unwrap();
        assert!(app.status().is_booted());
    }

    #[test]
    fn test_late_signal_catches_up_earlier_phase() {
        let log = CallLog::default();
        let requested = Arc::new(Mutex::new(Vec::new()));
        let requested_in_listener = Arc::clone(&requested);
        let mut app = App::builder()
            .on(EventKind::ProvidersRequested, move |_, event| {
                if let AppEvent::ProvidersRequested { status } = event {
                    requested_in_listener.lock().unwrap().push(*status);
                }
            })
            .build();
        app.add_provider(Box::new(Recorder::new("a", log.clone())))
            .unwrap();
        app.boot().unwrap();

        // The final signal arrives first; the plugins phase still runs
        // before the themes phase.
        app.deliver_signal(THEMES_READY).unwrap();
        assert!(app.status().is_booted());
        assert_eq!(
            requested.lock().unwrap().clone(),
            vec![
                Status::BootingEarly,
                Status::BootingPlugins,
                Status::BootingThemes
            ]
        );

        // The now-consumed plugins signal is ignored.
        app.deliver_signal(PLUGINS_READY).unwrap();
        assert!(app.status().is_booted());
    }

    #[test]
    fn test_snapshot_tracks_states() {
        let log = CallLog::default();
        let mut app = App::new();
        app.add_provider(Box::new(Recorder::new("a", log.clone())))
            .unwrap();

        let snapshot = app.snapshot();
        assert_eq!(snapshot.status, Status::Idle);
        assert_eq!(snapshot.providers[0].state, ProviderState::Pending);

        drive(&mut app);
        let snapshot = app.snapshot();
        assert_eq!(snapshot.status, Status::Booted);
        assert_eq!(snapshot.providers[0].state, ProviderState::Booted);
        assert_eq!(app.added_during(Status::Idle), ["a"]);
    }

    struct RecordingHost(Arc<Mutex<Vec<String>>>);

    impl HostAdapter for RecordingHost {
        fn subscribe_once(&mut self, signal: &str) {
            self.0.lock().unwrap().push(signal.to_string());
        }
    }

    #[test]
    fn test_boot_subscribes_host_signals() {
        let subscribed = Arc::new(Mutex::new(Vec::new()));
        let mut app = App::builder()
            .host(RecordingHost(Arc::clone(&subscribed)))
            .last_boot_signal("setup-complete")
            .build();
        app.boot().unwrap();
        assert_eq!(
            subscribed.lock().unwrap().clone(),
            vec![PLUGINS_READY.to_string(), "setup-complete".to_string()]
        );
    }

    struct Bundle(&'static str, CallLog);

    impl ProviderPackage for Bundle {
        fn name(&self) -> &str {
            self.0
        }

        fn providers(self: Box<Self>) -> Vec<Box<dyn ServiceProvider>> {
            vec![
                Box::new(Recorder::new("bundle.first", self.1.clone())),
                Box::new(Recorder::new("bundle.second", self.1.clone())),
            ]
        }
    }

    #[test]
    fn test_package_expands_in_order() {
        let log = CallLog::default();
        let mut app = App::new();
        app.add_package(Box::new(Bundle("bundle", log.clone())))
            .unwrap();
        drive(&mut app);
        assert_eq!(
            log.entries(),
            vec![
                "register:bundle.first",
                "register:bundle.second",
                "boot:bundle.first",
                "boot:bundle.second"
            ]
        );
    }
}
