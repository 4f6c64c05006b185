//! Construction recipes for bound implementations.

use std::sync::Arc;

use crate::traits::Dependencies;

/// An implementation the container knows how to construct.
///
/// `Deps` is the ordered list of dependency declarations; the container
/// resolves it (in order, depth-first) before calling [`inject`] and also
/// records it in the dependency graph at bind time. `Args` are literal
/// values captured when the binding is declared and handed to every
/// construction after the resolved dependencies. Use `()` for either when
/// there is nothing to supply.
///
/// # Examples
///
/// ```
/// use diydi::{implements, Container, Injectable, Resolver};
/// use std::sync::Arc;
///
/// trait Name: Send + Sync {
///     fn name(&self) -> String;
/// }
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
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
///
/// struct Polite {
///     name: Arc<dyn Name>,
///     punctuation: &'static str,
/// }
/// impl Greeter for Polite {
///     fn greet(&self) -> String {
///         format!("hello, {}{}", self.name.name(), self.punctuation)
///     }
/// }
/// impl Injectable for Polite {
///     type Deps = (Arc<dyn Name>,);
///     type Args = &'static str;
///     fn inject((name,): Self::Deps, punctuation: &'static str) -> Self {
///         Polite { name, punctuation }
///     }
/// }
///
/// implements!(Universe => dyn Name);
/// implements!(Polite => dyn Greeter);
///
/// let mut container = Container::new();
/// container.bind::<dyn Name, Universe>(()).unwrap();
/// container.bind::<dyn Greeter, Polite>("!").unwrap();
///
/// let greeter = container.get_instance::<dyn Greeter>().unwrap();
/// assert_eq!(greeter.greet(), "hello, universe!");
/// ```
///
/// [`inject`]: Injectable::inject
pub trait Injectable: Sized + Send + Sync + 'static {
    /// Declared dependencies, resolved left to right.
    type Deps: Dependencies;
    /// Literal arguments supplied at bind time.
    type Args: Clone + Send + Sync + 'static;

    fn inject(deps: Self::Deps, args: Self::Args) -> Self;
}

/// Capability check: the implementing type can stand in for `I`.
///
/// `bind::<I, T>` requires `T: Implements<I>`, so binding an implementation
/// to an interface it does not satisfy is rejected by the compiler. Every
/// type implements itself; trait-object interfaces are declared with
/// [`implements!`](crate::implements).
pub trait Implements<I: ?Sized>: Send + Sync + 'static {
    fn upcast(self: Arc<Self>) -> Arc<I>;
}

impl<T: Send + Sync + 'static> Implements<T> for T {
    #[inline]
    fn upcast(self: Arc<Self>) -> Arc<T> {
        self
    }
}

/// Declares that an implementation satisfies one or more trait-object
/// interfaces.
///
/// ```
/// use diydi::{implements, Implements};
/// use std::sync::Arc;
///
/// trait Name: Send + Sync {}
/// trait Label: Send + Sync {}
///
/// struct Universe;
/// impl Name for Universe {}
/// impl Label for Universe {}
///
/// implements!(Universe => dyn Name, dyn Label);
///
/// let name: Arc<dyn Name> = Implements::<dyn Name>::upcast(Arc::new(Universe));
/// # let _ = name;
/// ```
#[macro_export]
macro_rules! implements {
    ($implementation:ty => $($interface:ty),+ $(,)?) => {
        $(
            impl $crate::Implements<$interface> for $implementation {
                #[inline]
                fn upcast(self: ::std::sync::Arc<Self>) -> ::std::sync::Arc<$interface> {
                    self
                }
            }
        )+
    };
}
