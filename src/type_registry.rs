//! Process-wide assignment of small integer ids to service identifiers.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::key::ServiceKey;

static GLOBAL: Lazy<Arc<TypeRegistry>> = Lazy::new(|| Arc::new(TypeRegistry::new()));

/// Dense integer id of a [`ServiceKey`].
///
/// Ids are handed out in first-seen order starting at zero, which makes
/// them the natural sort key for graph output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServiceId(u32);

impl ServiceId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Registry mapping service identifiers to stable [`ServiceId`]s.
///
/// Containers share [`TypeRegistry::global`] by default, so the same
/// identifier maps to the same id in every container of the process. Tests
/// that need a predictable id space construct their own registry and pass
/// it to [`Container::with_registry`](crate::Container::with_registry).
///
/// # Examples
///
/// ```rust
/// use diydi::{ServiceKey, TypeRegistry};
///
/// let registry = TypeRegistry::new();
/// let a = registry.id_of(&ServiceKey::of::<u8>());
/// let b = registry.id_of(&ServiceKey::of::<u16>());
///
/// assert_eq!(a.index(), 0);
/// assert_eq!(b.index(), 1);
/// assert_eq!(registry.id_of(&ServiceKey::of::<u8>()), a);
/// assert_eq!(registry.key_of(b), Some(ServiceKey::of::<u16>()));
/// ```
#[derive(Default)]
pub struct TypeRegistry {
    inner: RwLock<RegistryInner>,
}

#[derive(Default)]
struct RegistryInner {
    ids: HashMap<ServiceKey, ServiceId>,
    keys: Vec<ServiceKey>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry used by [`Container::new`](crate::Container::new).
    pub fn global() -> Arc<TypeRegistry> {
        GLOBAL.clone()
    }

    /// Returns the id of `key`, allocating the next one on first sight.
    pub fn id_of(&self, key: &ServiceKey) -> ServiceId {
        if let Some(id) = self.inner.read().ids.get(key) {
            return *id;
        }

        let mut inner = self.inner.write();
        // Another thread may have allocated between the two locks
        if let Some(id) = inner.ids.get(key) {
            return *id;
        }
        let id = ServiceId(inner.keys.len() as u32);
        inner.keys.push(*key);
        inner.ids.insert(*key, id);
        id
    }

    /// Looks up an id without allocating.
    pub fn lookup(&self, key: &ServiceKey) -> Option<ServiceId> {
        self.inner.read().ids.get(key).copied()
    }

    pub fn key_of(&self, id: ServiceId) -> Option<ServiceKey> {
        self.inner.read().keys.get(id.index()).copied()
    }

    pub fn len(&self) -> usize {
        self.inner.read().keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("len", &self.len())
            .finish()
    }
}
