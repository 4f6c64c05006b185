//! Binding storage: one construction recipe per service id.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread::{self, ThreadId};

use once_cell::sync::OnceCell;
use parking_lot::Mutex;

use crate::container::ResolverContext;
use crate::error::{DiError, DiResult};
use crate::key::ServiceKey;
use crate::lifetime::Lifetime;
use crate::type_registry::ServiceId;

/// Type-erased instance handle.
///
/// A binding of interface `I` stores an `Arc<I>` inside this handle; the
/// [`Resolver`](crate::Resolver) downcasts it back once the caller names `I`.
pub type AnyArc = Arc<dyn Any + Send + Sync>;

pub(crate) type Ctor = Box<dyn for<'a> Fn(&ResolverContext<'a>) -> DiResult<AnyArc> + Send + Sync>;

/// Service binding with lifetime and constructor
pub(crate) struct Binding {
    pub(crate) key: ServiceKey,
    pub(crate) lifetime: Lifetime,
    pub(crate) implementation: &'static str,
    ctor: Ctor,
    /// Singleton cache, owned by the binding so it lives as long as the container
    single_runtime: Option<OnceCell<AnyArc>>,
    /// Thread currently running the singleton constructor
    builder: Mutex<Option<ThreadId>>,
}

impl Binding {
    pub(crate) fn new(
        key: ServiceKey,
        lifetime: Lifetime,
        implementation: &'static str,
        ctor: Ctor,
    ) -> Self {
        let single_runtime = match lifetime {
            Lifetime::Singleton => Some(OnceCell::new()),
            Lifetime::Transient => None,
        };

        Self {
            key,
            lifetime,
            implementation,
            ctor,
            single_runtime,
            builder: Mutex::new(None),
        }
    }

    /// Produces a handle according to the binding's lifetime.
    pub(crate) fn instantiate(&self, ctx: &ResolverContext<'_>) -> DiResult<AnyArc> {
        match &self.single_runtime {
            Some(cell) => {
                if let Some(value) = cell.get() {
                    return Ok(value.clone());
                }

                // Re-entering the cell from its own constructor would deadlock;
                // only reachable with bind-time cycle detection turned off.
                let current = thread::current().id();
                if *self.builder.lock() == Some(current) {
                    let name = self.key.to_string();
                    return Err(DiError::Circular(vec![name.clone(), name]));
                }

                // Other threads block until the first constructor finishes
                cell.get_or_try_init(|| {
                    let _building = BuilderGuard::enter(&self.builder, current);
                    (self.ctor)(ctx)
                })
                .map(Arc::clone)
            }
            None => (self.ctor)(ctx),
        }
    }

    pub(crate) fn is_cached(&self) -> bool {
        self.single_runtime
            .as_ref()
            .map_or(false, |cell| cell.get().is_some())
    }
}

/// Marks the constructing thread for the duration of a singleton build.
struct BuilderGuard<'a> {
    slot: &'a Mutex<Option<ThreadId>>,
}

impl<'a> BuilderGuard<'a> {
    fn enter(slot: &'a Mutex<Option<ThreadId>>, thread: ThreadId) -> Self {
        *slot.lock() = Some(thread);
        Self { slot }
    }
}

impl Drop for BuilderGuard<'_> {
    fn drop(&mut self) {
        *self.slot.lock() = None;
    }
}

/// All bindings of one container, keyed by service id.
#[derive(Default)]
pub(crate) struct BindingStore {
    bindings: HashMap<ServiceId, Binding>,
}

impl BindingStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub(crate) fn get(&self, id: ServiceId) -> Option<&Binding> {
        self.bindings.get(&id)
    }

    #[inline(always)]
    pub(crate) fn contains(&self, id: ServiceId) -> bool {
        self.bindings.contains_key(&id)
    }

    /// Inserts a binding for an id that the caller has checked is free.
    pub(crate) fn insert(&mut self, id: ServiceId, binding: Binding) {
        debug_assert!(!self.bindings.contains_key(&id), "{} bound twice", binding.key);
        self.bindings.insert(id, binding);
    }

    pub(crate) fn len(&self) -> usize {
        self.bindings.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (ServiceId, &Binding)> {
        self.bindings.iter().map(|(id, binding)| (*id, binding))
    }
}
