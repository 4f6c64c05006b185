//! Service descriptors for introspection and diagnostics.

use crate::key::ServiceKey;
use crate::lifetime::Lifetime;
use crate::type_registry::ServiceId;

/// Service descriptor for introspection and diagnostics
///
/// One descriptor per binding, as returned by
/// [`Container::descriptors`](crate::Container::descriptors) in ascending
/// id order.
///
/// # Examples
///
/// ```rust
/// use diydi::{implements, Container, Injectable, Lifetime};
///
/// trait Name: Send + Sync {}
///
/// struct Universe;
/// impl Name for Universe {}
/// impl Injectable for Universe {
///     type Deps = ();
///     type Args = ();
///     fn inject(_: (), _: ()) -> Self { Universe }
/// }
/// implements!(Universe => dyn Name);
///
/// let mut container = Container::new();
/// container.bind_singleton::<dyn Name, Universe>(()).unwrap();
/// container.bind_named::<dyn Name, Universe>("backup", ()).unwrap();
///
/// let descriptors = container.descriptors();
/// assert_eq!(descriptors.len(), 2);
///
/// let singleton = descriptors.iter().find(|d| !d.is_named()).unwrap();
/// assert_eq!(singleton.lifetime, Lifetime::Singleton);
/// assert_eq!(singleton.type_name(), "Name");
/// assert_eq!(singleton.implementation_name, "Universe");
///
/// let named = descriptors.iter().find(|d| d.is_named()).unwrap();
/// assert_eq!(named.service_name(), Some("backup"));
/// ```
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    pub id: ServiceId,
    /// The service key (interface with optional tag)
    pub key: ServiceKey,
    pub lifetime: Lifetime,
    /// Display name of the implementation
    pub implementation_name: String,
    /// Number of declared dependencies
    pub dependency_count: usize,
    /// Whether a singleton instance has been built already
    pub is_cached: bool,
}

impl ServiceDescriptor {
    /// Tag of a named binding, or None for untagged ones
    pub fn service_name(&self) -> Option<&'static str> {
        self.key.tag()
    }

    /// Display name of the interface
    pub fn type_name(&self) -> String {
        self.key.display_name()
    }

    pub fn is_named(&self) -> bool {
        self.key.is_named()
    }
}
