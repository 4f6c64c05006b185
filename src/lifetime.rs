//! Service lifetime definitions.

/// Service lifetimes controlling instance caching behavior
///
/// # Examples
///
/// ```rust
/// use diydi::{implements, Container, Injectable, Resolver};
/// use std::sync::Arc;
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
/// let mut transient = Container::new();
/// transient.bind::<dyn Name, Universe>(()).unwrap();
/// let a = transient.get_instance::<dyn Name>().unwrap();
/// let b = transient.get_instance::<dyn Name>().unwrap();
/// assert!(!Arc::ptr_eq(&a, &b)); // Always different
///
/// let mut singleton = Container::new();
/// singleton.bind_singleton::<dyn Name, Universe>(()).unwrap();
/// let a = singleton.get_instance::<dyn Name>().unwrap();
/// let b = singleton.get_instance::<dyn Name>().unwrap();
/// assert!(Arc::ptr_eq(&a, &b)); // Same instance
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifetime {
    /// New instance per resolution, never cached
    ///
    /// Every resolution runs the constructor again, including the
    /// resolution of all of the implementation's own dependencies.
    Transient,
    /// Single instance per container, cached forever
    ///
    /// The first successful construction is cached in the binding and
    /// returned for every later resolution. The cache is dropped together
    /// with the container.
    Singleton,
}

impl Lifetime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lifetime::Transient => "Transient",
            Lifetime::Singleton => "Singleton",
        }
    }
}

impl std::fmt::Display for Lifetime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
