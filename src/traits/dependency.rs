//! Dependency declarations for injectable implementations.

use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::Arc;

use crate::error::DiResult;
use crate::key::{Qualifier, ServiceKey};
use crate::traits::Resolver;

/// A single declared dependency.
///
/// `Arc<I>` declares the untagged identifier of `I`; [`Named<I, Q>`]
/// declares `I` qualified by the tag `Q::NAME`.
pub trait Dependency: Sized + Send + Sync + 'static {
    /// Identifier the dependency is resolved under.
    fn key() -> ServiceKey;

    fn resolve<R: Resolver + ?Sized>(resolver: &R) -> DiResult<Self>;
}

impl<I: ?Sized + Send + Sync + 'static> Dependency for Arc<I> {
    #[inline]
    fn key() -> ServiceKey {
        ServiceKey::of::<I>()
    }

    fn resolve<R: Resolver + ?Sized>(resolver: &R) -> DiResult<Self> {
        resolver.get_keyed::<I>(&Self::key())
    }
}

/// A dependency on `I` bound under the tag `Q`.
///
/// Dereferences to `I`, so a `Named<dyn Name, Primary>` field is used
/// exactly like an `Arc<dyn Name>`.
///
/// # Examples
///
/// ```
/// use diydi::{implements, qualifier, Container, Injectable, Named, Resolver};
/// use std::sync::Arc;
///
/// qualifier!(Primary = "primary");
/// qualifier!(Secondary = "secondary");
///
/// trait Name: Send + Sync {
///     fn name(&self) -> String;
/// }
///
/// struct Fixed(&'static str);
/// impl Name for Fixed {
///     fn name(&self) -> String { self.0.to_string() }
/// }
/// impl Injectable for Fixed {
///     type Deps = ();
///     type Args = &'static str;
///     fn inject(_: (), value: &'static str) -> Self { Fixed(value) }
/// }
/// implements!(Fixed => dyn Name);
///
/// struct Pair {
///     first: Named<dyn Name, Primary>,
///     second: Named<dyn Name, Secondary>,
/// }
/// impl Injectable for Pair {
///     type Deps = (Named<dyn Name, Primary>, Named<dyn Name, Secondary>);
///     type Args = ();
///     fn inject((first, second): Self::Deps, _: ()) -> Self {
///         Pair { first, second }
///     }
/// }
///
/// let mut container = Container::new();
/// container.bind_named::<dyn Name, Fixed>("primary", "world").unwrap();
/// container.bind_named::<dyn Name, Fixed>("secondary", "universe").unwrap();
/// container.bind::<Pair, Pair>(()).unwrap();
///
/// let pair = container.get_instance::<Pair>().unwrap();
/// assert_eq!(pair.first.name(), "world");
/// assert_eq!(pair.second.name(), "universe");
/// ```
pub struct Named<I: ?Sized, Q> {
    inner: Arc<I>,
    _qualifier: PhantomData<fn() -> Q>,
}

impl<I: ?Sized, Q> Named<I, Q> {
    pub fn new(inner: Arc<I>) -> Self {
        Self {
            inner,
            _qualifier: PhantomData,
        }
    }

    pub fn as_arc(&self) -> &Arc<I> {
        &self.inner
    }

    pub fn into_inner(self) -> Arc<I> {
        self.inner
    }
}

impl<I: ?Sized, Q> Deref for Named<I, Q> {
    type Target = I;

    fn deref(&self) -> &I {
        &self.inner
    }
}

impl<I: ?Sized, Q> Clone for Named<I, Q> {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone())
    }
}

impl<I: ?Sized, Q: Qualifier> fmt::Debug for Named<I, Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Named")
            .field("interface", &crate::key::display_type_name(std::any::type_name::<I>()))
            .field("tag", &Q::NAME)
            .finish()
    }
}

impl<I, Q> Dependency for Named<I, Q>
where
    I: ?Sized + Send + Sync + 'static,
    Q: Qualifier,
{
    #[inline]
    fn key() -> ServiceKey {
        ServiceKey::qualified::<I, Q>()
    }

    fn resolve<R: Resolver + ?Sized>(resolver: &R) -> DiResult<Self> {
        resolver.get_keyed::<I>(&Self::key()).map(Self::new)
    }
}

/// Ordered list of dependency declarations.
///
/// Implemented for `()` and for tuples of up to eight [`Dependency`]
/// values. Elements resolve left to right.
pub trait Dependencies: Sized + Send + Sync + 'static {
    fn keys() -> Vec<ServiceKey>;

    fn resolve_all<R: Resolver + ?Sized>(resolver: &R) -> DiResult<Self>;
}

impl Dependencies for () {
    fn keys() -> Vec<ServiceKey> {
        Vec::new()
    }

    fn resolve_all<R: Resolver + ?Sized>(_resolver: &R) -> DiResult<Self> {
        Ok(())
    }
}

macro_rules! impl_dependencies {
    ($($dep:ident),+) => {
        impl<$($dep: Dependency),+> Dependencies for ($($dep,)+) {
            fn keys() -> Vec<ServiceKey> {
                vec![$($dep::key()),+]
            }

            fn resolve_all<R: Resolver + ?Sized>(resolver: &R) -> DiResult<Self> {
                Ok(($($dep::resolve(resolver)?,)+))
            }
        }
    };
}

impl_dependencies!(A);
impl_dependencies!(A, B);
impl_dependencies!(A, B, C);
impl_dependencies!(A, B, C, D);
impl_dependencies!(A, B, C, D, E);
impl_dependencies!(A, B, C, D, E, F);
impl_dependencies!(A, B, C, D, E, F, G);
impl_dependencies!(A, B, C, D, E, F, G, H);

#[cfg(test)]
mod tests {
    use super::*;

    trait Name: Send + Sync {}

    crate::qualifier!(Primary = "primary");

    #[test]
    fn test_keys_follow_declaration_order() {
        type Deps = (Arc<dyn Name>, Arc<String>, Named<dyn Name, Primary>);

        let keys = <Deps as Dependencies>::keys();
        assert_eq!(
            keys,
            vec![
                ServiceKey::of::<dyn Name>(),
                ServiceKey::of::<String>(),
                ServiceKey::named::<dyn Name>("primary"),
            ]
        );
    }

    #[test]
    fn test_unit_has_no_keys() {
        assert!(<() as Dependencies>::keys().is_empty());
    }
}
