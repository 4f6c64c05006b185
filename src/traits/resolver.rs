//! Resolver traits for service resolution.

use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::key::ServiceKey;
use crate::registration::AnyArc;
use crate::traits::Dependency;

/// Core resolver trait for object-safe service resolution.
///
/// Produces the type-erased handle stored for a key. Most callers use the
/// generic methods of [`Resolver`] instead, which perform the one downcast
/// back to the interface type.
pub trait ResolverCore: Send + Sync {
    /// Resolves the handle bound under `key`, constructing it (and its
    /// dependencies) as the binding's lifetime requires.
    fn resolve_any(&self, key: &ServiceKey) -> DiResult<AnyArc>;
}

/// High-level resolver interface with generic methods for type-safe service resolution.
///
/// Implemented for every [`ResolverCore`], so both the
/// [`Container`](crate::Container) and the
/// [`ResolverContext`](crate::ResolverContext) handed to nested
/// constructions expose the same API.
///
/// # Examples
///
/// ```
/// use diydi::{implements, Container, DiError, Injectable, Resolver};
///
/// trait Name: Send + Sync {
///     fn name(&self) -> String;
/// }
///
/// struct Universe;
/// impl Name for Universe {
///     fn name(&self) -> String { "universe".into() }
/// }
/// impl Injectable for Universe {
///     type Deps = ();
///     type Args = ();
///     fn inject(_: (), _: ()) -> Self { Universe }
/// }
/// implements!(Universe => dyn Name);
///
/// let mut container = Container::new();
/// container.bind_named::<dyn Name, Universe>("primary", ()).unwrap();
///
/// assert_eq!(container.get_named::<dyn Name>("primary").unwrap().name(), "universe");
/// assert!(matches!(
///     container.get_instance::<dyn Name>(),
///     Err(DiError::DependencyResolution(_))
/// ));
/// ```
pub trait Resolver: ResolverCore {
    /// Resolves `key` and downcasts the handle to `Arc<I>`.
    fn get_keyed<I: ?Sized + Send + Sync + 'static>(&self, key: &ServiceKey) -> DiResult<Arc<I>> {
        let any = self.resolve_any(key)?;
        // Handles are stored as Arc<Arc<I>> so unsized interfaces can pass through Any
        any.downcast::<Arc<I>>()
            .map(|handle| (*handle).clone())
            .map_err(|_| DiError::TypeMismatch(key.to_string()))
    }

    /// Resolves the untagged binding of `I`.
    fn get_instance<I: ?Sized + Send + Sync + 'static>(&self) -> DiResult<Arc<I>> {
        self.get_keyed::<I>(&ServiceKey::of::<I>())
    }

    /// Resolves the binding of `I` registered under `tag`.
    fn get_named<I: ?Sized + Send + Sync + 'static>(&self, tag: &'static str) -> DiResult<Arc<I>> {
        self.get_keyed::<I>(&ServiceKey::named::<I>(tag))
    }

    /// Resolves any dependency declaration, e.g. `Arc<dyn Name>` or
    /// `Named<dyn Name, Primary>`.
    fn resolve<D: Dependency>(&self) -> DiResult<D> {
        D::resolve(self)
    }
}

impl<R: ResolverCore + ?Sized> Resolver for R {}
