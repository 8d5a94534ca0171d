use crate::error::{BootflowError, Result};
use dashmap::DashMap;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// String-keyed service container shared by all providers.
///
/// The engine treats the container as opaque storage: providers are the only
/// ones who know what the keys mean. Values are type-erased and recovered
/// with a typed downcast on [`get`](Container::get).
///
/// A `Container` is a handle: clones share the same underlying storage, so
/// the one carried by the booted notification reads the same services the
/// providers wrote.
#[derive(Clone, Default)]
pub struct Container {
    services: Arc<DashMap<String, Arc<dyn Any + Send + Sync>>>,
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("services", &self.len())
            .finish()
    }
}

impl Container {
    pub fn new() -> Self {
        Self {
            services: Arc::new(DashMap::new()),
        }
    }

    /// Bind a value under `key`, replacing any previous binding.
    pub fn set<T: Send + Sync + 'static>(&self, key: impl Into<String>, value: T) {
        self.services.insert(key.into(), Arc::new(value));
    }

    /// Fetch the value bound under `key`.
    ///
    /// Fails with `ServiceNotFound` when the key is absent and with
    /// `ServiceTypeMismatch` when the stored value is not a `T`.
    pub fn get<T: Send + Sync + 'static>(&self, key: &str) -> Result<Arc<T>> {
        let entry = self
            .services
            .get(key)
            .ok_or_else(|| BootflowError::ServiceNotFound {
                key: key.to_string(),
            })?;
        entry
            .value()
            .clone()
            .downcast::<T>()
            .map_err(|_| BootflowError::ServiceTypeMismatch {
                key: key.to_string(),
            })
    }

    pub fn has(&self, key: &str) -> bool {
        self.services.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
