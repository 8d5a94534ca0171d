use crate::lifecycle::Status;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BootflowError>;

/// Every way a bootflow operation can fail.
///
/// The variants fall into three classes callers can match on programmatically:
///
/// - **Logic errors** (contract misuse): `AlreadyInitialized`,
///   `NotInitialized`, `NotBooted`, `BootInProgress`, `NotIdle`,
///   `EngineFailed`, `DuplicateProvider`. Fatal to the offending call,
///   never retried.
/// - **Recoverable provider failures**: `RegisterFailed`, `BootFailed`.
///   The provider is marked failed and the error channel decides whether
///   the boot continues.
/// - **Container lookup failures**: `ServiceNotFound`,
///   `ServiceTypeMismatch`. Only raised once the engine is booted, which
///   keeps them distinguishable from the not-created / not-booted logic
///   errors.
#[derive(Debug, Error)]
pub enum BootflowError {
    #[error("engine already created; reset it before creating another")]
    AlreadyInitialized,

    #[error("engine has not been created")]
    NotInitialized,

    #[error("engine is not booted yet (status: {status})")]
    NotBooted { status: Status },

    #[error("boot is already in progress")]
    BootInProgress,

    #[error("boot can only start from idle (status: {status})")]
    NotIdle { status: Status },

    #[error("engine is in the failed state")]
    EngineFailed,

    #[error("duplicate provider id: {id}")]
    DuplicateProvider { id: String },

    #[error("provider '{id}' failed to register")]
    RegisterFailed { id: String },

    #[error("provider '{id}' failed to boot")]
    BootFailed { id: String },

    #[error("service not found: {key}")]
    ServiceNotFound { key: String },

    #[error("service '{key}' has a different type than requested")]
    ServiceTypeMismatch { key: String },
}

impl BootflowError {
    /// Whether this error came from a provider's own register/boot result
    /// rather than from engine misuse.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            BootflowError::RegisterFailed { .. } | BootflowError::BootFailed { .. }
        )
    }
}
