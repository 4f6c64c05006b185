//! # diydi
//!
//! A small dependency injection container with lazy object-graph resolution.
//!
//! ## Features
//!
//! - **Interface bindings**: bind an implementation to a trait object or to itself
//! - **Two lifetimes**: transient (fresh per resolution) and singleton (built once)
//! - **Named bindings**: several bindings of one interface told apart by a tag
//! - **Factories**: dependencies injected by the container, arguments supplied per call
//! - **Graph export**: the binding graph as Graphviz DOT, available before anything is built
//! - **Cycle detection**: bindings that would close a dependency cycle are rejected
//!
//! ## Quick Start
//!
//! ```rust
//! use diydi::{implements, Container, Injectable, Resolver};
//! use std::sync::Arc;
//!
//! trait Name: Send + Sync {
//!     fn name(&self) -> String;
//! }
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! struct Universe;
//!
//! impl Name for Universe {
//!     fn name(&self) -> String {
//!         "universe".to_string()
//!     }
//! }
//!
//! impl Injectable for Universe {
//!     type Deps = ();
//!     type Args = ();
//!     fn inject(_: (), _: ()) -> Self {
//!         Universe
//!     }
//! }
//!
//! struct Generic {
//!     name: Arc<dyn Name>,
//! }
//!
//! impl Greeter for Generic {
//!     fn greet(&self) -> String {
//!         format!("hello, {}", self.name.name())
//!     }
//! }
//!
//! impl Injectable for Generic {
//!     type Deps = (Arc<dyn Name>,);
//!     type Args = ();
//!     fn inject((name,): Self::Deps, _: ()) -> Self {
//!         Generic { name }
//!     }
//! }
//!
//! implements!(Universe => dyn Name);
//! implements!(Generic => dyn Greeter);
//!
//! let mut container = Container::new();
//! container.bind_singleton::<dyn Name, Universe>(()).unwrap();
//! container.bind::<dyn Greeter, Generic>(()).unwrap();
//!
//! let greeter = container.get_instance::<dyn Greeter>().unwrap();
//! assert_eq!(greeter.greet(), "hello, universe");
//! ```
//!
//! ## Lifetimes
//!
//! - **Transient**: a new instance on every resolution, the default for `bind`
//! - **Singleton**: created on first resolution and shared for the container's lifetime
//!
//! A lifetime applies to the binding it is declared on. A transient service
//! depending on a singleton gets a fresh outer instance holding the shared
//! inner one.
//!
//! ## Named Bindings
//!
//! ```rust
//! use diydi::{implements, qualifier, Container, Injectable, Named, Resolver};
//!
//! qualifier!(Primary = "primary");
//!
//! trait Name: Send + Sync {
//!     fn name(&self) -> String;
//! }
//!
//! struct World;
//! impl Name for World {
//!     fn name(&self) -> String { "world".to_string() }
//! }
//! impl Injectable for World {
//!     type Deps = ();
//!     type Args = ();
//!     fn inject(_: (), _: ()) -> Self { World }
//! }
//! implements!(World => dyn Name);
//!
//! let mut container = Container::new();
//! container.bind_named::<dyn Name, World>("primary", ()).unwrap();
//!
//! let name = container.resolve::<Named<dyn Name, Primary>>().unwrap();
//! assert_eq!(name.name(), "world");
//! assert!(container.get_instance::<dyn Name>().is_err());
//! ```

// Module declarations
pub mod container;
pub mod descriptors;
pub mod error;
pub mod factory;
pub mod graph_export;
pub mod key;
pub mod lifetime;
pub mod observer;
pub mod options;
pub mod traits;
pub mod type_registry;

// Internal modules
mod internal;
mod registration;

// Re-export core types
pub use container::{Container, ResolverContext};
pub use descriptors::ServiceDescriptor;
pub use error::{DiError, DiResult};
pub use factory::{AbstractFactory, Factory, FactoryOf};
pub use key::{display_type_name, short_type_name, Qualifier, ServiceKey};
pub use lifetime::Lifetime;
pub use observer::{DiObserver, MetricsObserver, TracingObserver};
pub use options::ContainerOptions;
pub use registration::AnyArc;
pub use traits::{Dependencies, Dependency, Implements, Injectable, Named, Resolver, ResolverCore};
pub use type_registry::{ServiceId, TypeRegistry};

#[cfg(feature = "graph-export")]
pub use graph_export::JsonExporter;
pub use graph_export::{exports, DependencyGraph, DotExporter, ExportFormat, GraphExporter, GraphNode};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    trait Counter: Send + Sync {
        fn id(&self) -> usize;
    }

    impl std::fmt::Debug for dyn Counter {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("dyn Counter")
        }
    }

    static NEXT: AtomicUsize = AtomicUsize::new(0);

    struct Numbered(usize);

    impl Counter for Numbered {
        fn id(&self) -> usize {
            self.0
        }
    }

    impl Injectable for Numbered {
        type Deps = ();
        type Args = ();

        fn inject(_: (), _: ()) -> Self {
            Numbered(NEXT.fetch_add(1, Ordering::SeqCst))
        }
    }

    implements!(Numbered => dyn Counter);

    fn isolated() -> Container {
        Container::with_registry(Arc::new(TypeRegistry::new()))
    }

    #[test]
    fn test_singleton_resolution() {
        let mut container = isolated();
        container.bind_singleton::<dyn Counter, Numbered>(()).unwrap();

        let a = container.get_instance::<dyn Counter>().unwrap();
        let b = container.get_instance::<dyn Counter>().unwrap();

        assert_eq!(a.id(), b.id());
        assert!(Arc::ptr_eq(&a, &b)); // Same instance
    }

    #[test]
    fn test_transient_resolution() {
        let mut container = isolated();
        container.bind::<dyn Counter, Numbered>(()).unwrap();

        let a = container.get_instance::<dyn Counter>().unwrap();
        let b = container.get_instance::<dyn Counter>().unwrap();

        assert_ne!(a.id(), b.id());
        assert!(!Arc::ptr_eq(&a, &b)); // Different instances
    }

    #[test]
    fn test_named_and_untagged_are_independent() {
        let mut container = isolated();
        container.bind_singleton_named::<dyn Counter, Numbered>("left", ()).unwrap();
        container.bind_singleton_named::<dyn Counter, Numbered>("right", ()).unwrap();

        let left = container.get_named::<dyn Counter>("left").unwrap();
        let right = container.get_named::<dyn Counter>("right").unwrap();

        assert!(!Arc::ptr_eq(&left, &right));
        assert!(container.is_bound_named::<dyn Counter>("left"));
        assert!(!container.is_bound::<dyn Counter>());
        assert_eq!(
            container.get_instance::<dyn Counter>().unwrap_err(),
            DiError::DependencyResolution("Counter".to_string())
        );
    }

    #[test]
    fn test_concrete_self_binding() {
        let mut container = isolated();
        container.bind::<Numbered, Numbered>(()).unwrap();

        assert!(container.get_instance::<Numbered>().is_ok());
        assert!(container.get_instance::<dyn Counter>().is_err());
    }

    #[test]
    fn test_empty_container() {
        let container = isolated();
        assert!(container.is_empty());
        assert_eq!(container.to_dot(), "digraph diydi {\n}");
        assert!(container.descriptors().is_empty());
    }
}
