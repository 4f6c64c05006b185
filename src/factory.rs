//! Factories: dependencies resolved once, literal arguments per call.
//!
//! A [`Factory<I, T>`] is itself injectable. Its declared dependencies are
//! exactly `T`'s, so they are resolved once when the factory is built.
//! Each [`create`](Factory::create) call then constructs a fresh `T` from
//! those captured dependencies and the call's literal arguments, returned
//! as the interface `I`.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::traits::{Implements, Injectable};

/// Interface through which a bound factory is resolved.
///
/// `A` is the literal-argument type of the product (a tuple for several
/// arguments).
pub trait AbstractFactory<I: ?Sized, A>: Send + Sync {
    fn create(&self, args: A) -> Arc<I>;
}

/// Service identifier under which [`Container::bind_factory`] binds a
/// factory producing `I` from arguments `A`.
///
/// [`Container::bind_factory`]: crate::Container::bind_factory
pub type FactoryOf<I, A> = dyn AbstractFactory<I, A>;

/// Factory producing `T` as `I`.
///
/// # Examples
///
/// ```
/// use diydi::{implements, Container, FactoryOf, Injectable, Resolver};
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
/// struct Decorated {
///     name: Arc<dyn Name>,
///     prefix: String,
///     suffix: String,
/// }
/// impl Greeter for Decorated {
///     fn greet(&self) -> String {
///         format!("{}hello, {}{}", self.prefix, self.name.name(), self.suffix)
///     }
/// }
/// impl Injectable for Decorated {
///     type Deps = (Arc<dyn Name>,);
///     type Args = (String, String);
///     fn inject((name,): Self::Deps, (prefix, suffix): Self::Args) -> Self {
///         Decorated { name, prefix, suffix }
///     }
/// }
///
/// implements!(Universe => dyn Name);
/// implements!(Decorated => dyn Greeter);
///
/// let mut container = Container::new();
/// container.bind::<dyn Name, Universe>(()).unwrap();
/// container.bind_factory::<dyn Greeter, Decorated>().unwrap();
///
/// let factory = container
///     .get_instance::<FactoryOf<dyn Greeter, (String, String)>>()
///     .unwrap();
/// let greeter = factory.create(("* ".to_string(), "!".to_string()));
/// assert_eq!(greeter.greet(), "* hello, universe!");
/// ```
pub struct Factory<I: ?Sized, T: Injectable> {
    deps: T::Deps,
    _interface: PhantomData<fn() -> Arc<I>>,
}

impl<I, T> Factory<I, T>
where
    I: ?Sized + Send + Sync + 'static,
    T: Injectable + Implements<I>,
    T::Deps: Clone,
{
    pub fn new(deps: T::Deps) -> Self {
        Self {
            deps,
            _interface: PhantomData,
        }
    }

    /// Builds a fresh `T` from the captured dependencies and `args`.
    pub fn create(&self, args: T::Args) -> Arc<I> {
        let instance = Arc::new(T::inject(self.deps.clone(), args));
        <T as Implements<I>>::upcast(instance)
    }
}

impl<I, T> Injectable for Factory<I, T>
where
    I: ?Sized + Send + Sync + 'static,
    T: Injectable + Implements<I>,
    T::Deps: Clone,
{
    type Deps = T::Deps;
    type Args = ();

    fn inject(deps: T::Deps, _args: ()) -> Self {
        Self::new(deps)
    }
}

impl<I, T> AbstractFactory<I, T::Args> for Factory<I, T>
where
    I: ?Sized + Send + Sync + 'static,
    T: Injectable + Implements<I>,
    T::Deps: Clone,
{
    fn create(&self, args: T::Args) -> Arc<I> {
        Factory::<I, T>::create(self, args)
    }
}

impl<I, T> Implements<FactoryOf<I, T::Args>> for Factory<I, T>
where
    I: ?Sized + Send + Sync + 'static,
    T: Injectable + Implements<I>,
    T::Deps: Clone,
{
    fn upcast(self: Arc<Self>) -> Arc<FactoryOf<I, T::Args>> {
        self
    }
}

impl<I: ?Sized, T: Injectable> fmt::Debug for Factory<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("interface", &crate::key::display_type_name(std::any::type_name::<I>()))
            .field("implementation", &crate::key::display_type_name(std::any::type_name::<T>()))
            .finish()
    }
}
