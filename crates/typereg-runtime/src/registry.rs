//! The registration table and its process-wide instance
//!
//! The global table has two phases. While pending, `register` appends to
//! it. The first call to `registry` freezes it: the entries move into an
//! immutable `Registry` and later registrations fail.

use std::any::Any;
use std::fmt;
use std::sync::OnceLock;

use parking_lot::{const_mutex, Mutex};
use tracing::{debug, trace};

use crate::RegistryError;

/// One registered type
pub struct Registration {
    owner: String,
    type_name: String,
    instance: Box<dyn Any + Send + Sync>,
}

impl Registration {
    pub fn new(
        owner: impl Into<String>,
        type_name: impl Into<String>,
        instance: Box<dyn Any + Send + Sync>,
    ) -> Self {
        Self {
            owner: owner.into(),
            type_name: type_name.into(),
            instance,
        }
    }

    /// Import path of the module declaring the type
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn instance_any(&self) -> &(dyn Any + Send + Sync) {
        self.instance.as_ref()
    }

    /// Downcast the registered instance
    pub fn instance<T: Any>(&self) -> Option<&T> {
        self.instance.downcast_ref::<T>()
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("owner", &self.owner)
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Read-only set of registrations, in registration order
///
/// Registrations are not deduplicated; lookups return the first match.
#[derive(Debug, Default)]
pub struct Registry {
    entries: Vec<Registration>,
}

impl Registry {
    pub fn get(&self, owner: &str, type_name: &str) -> Option<&Registration> {
        self.entries
            .iter()
            .find(|entry| entry.owner == owner && entry.type_name == type_name)
    }

    pub fn by_owner<'a>(&'a self, owner: &'a str) -> impl Iterator<Item = &'a Registration> + 'a {
        self.entries.iter().filter(move |entry| entry.owner == owner)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Registration> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Explicit table for building a `Registry` outside the global lifecycle
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: Vec<Registration>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        owner: impl Into<String>,
        type_name: impl Into<String>,
        instance: Box<dyn Any + Send + Sync>,
    ) -> &mut Self {
        self.entries
            .push(Registration::new(owner, type_name, instance));
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            entries: self.entries,
        }
    }
}

struct Pending {
    entries: Vec<Registration>,
    frozen: bool,
}

static PENDING: Mutex<Pending> = const_mutex(Pending {
    entries: Vec::new(),
    frozen: false,
});

static FROZEN: OnceLock<Registry> = OnceLock::new();

/// Record a type in the process-wide registry.
///
/// Called by generated registration functions before the registry is first
/// read. Fails once [`registry`] has been called.
pub fn register(
    owner: &str,
    type_name: &str,
    instance: Box<dyn Any + Send + Sync>,
) -> Result<(), RegistryError> {
    let mut pending = PENDING.lock();
    if pending.frozen {
        return Err(RegistryError::Frozen {
            owner: owner.to_string(),
            type_name: type_name.to_string(),
        });
    }

    trace!("registering {} from {}", type_name, owner);
    pending
        .entries
        .push(Registration::new(owner, type_name, instance));
    Ok(())
}

/// The process-wide registry; the first call freezes it
pub fn registry() -> &'static Registry {
    FROZEN.get_or_init(|| {
        let mut pending = PENDING.lock();
        pending.frozen = true;
        let entries = std::mem::take(&mut pending.entries);
        debug!("registry frozen with {} registration(s)", entries.len());
        Registry { entries }
    })
}
