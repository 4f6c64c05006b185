//! The dependency injection container.
//!
//! A [`Container`] owns three views of every bind call, populated together:
//! the construction recipe, its lifetime, and the graph node describing the
//! binding's static dependency shape. Resolution walks the recipes
//! depth-first, dependencies before dependents, in a single call stack.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::descriptors::ServiceDescriptor;
use crate::error::{DiError, DiResult};
use crate::factory::{Factory, FactoryOf};
use crate::graph_export::{DependencyGraph, DotExporter, GraphNode};
use crate::internal::find_cycle;
use crate::key::{display_type_name, ServiceKey};
use crate::lifetime::Lifetime;
use crate::observer::{DiObserver, Observers};
use crate::options::ContainerOptions;
use crate::registration::{AnyArc, Binding, BindingStore, Ctor};
use crate::traits::{Dependencies, Implements, Injectable, ResolverCore};
use crate::type_registry::{ServiceId, TypeRegistry};

mod context;
pub use context::ResolverContext;

/// Binding registry and lazy object-graph resolver.
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
/// struct Generic {
///     name: Arc<dyn Name>,
/// }
/// impl Greeter for Generic {
///     fn greet(&self) -> String { format!("hello, {}", self.name.name()) }
/// }
/// impl Injectable for Generic {
///     type Deps = (Arc<dyn Name>,);
///     type Args = ();
///     fn inject((name,): Self::Deps, _: ()) -> Self { Generic { name } }
/// }
///
/// implements!(Universe => dyn Name);
/// implements!(Generic => dyn Greeter);
///
/// let mut container = Container::new();
/// container.bind::<dyn Name, Universe>(()).unwrap();
/// container.bind::<dyn Greeter, Generic>(()).unwrap();
///
/// let greeter = container.get_instance::<dyn Greeter>().unwrap();
/// assert_eq!(greeter.greet(), "hello, universe");
///
/// assert_eq!(
///     container.to_dot(),
///     "digraph diydi {\n    \"Universe\" -> {};\n    \"Generic\" -> {\"Universe\"};\n}"
/// );
/// ```
pub struct Container {
    registry: Arc<TypeRegistry>,
    options: ContainerOptions,
    bindings: BindingStore,
    graph: BTreeMap<ServiceId, GraphNode>,
    observers: Observers,
}

impl Container {
    /// Creates an empty container on the process-wide type registry.
    pub fn new() -> Self {
        Self::with_registry_and_options(TypeRegistry::global(), ContainerOptions::default())
    }

    /// Creates an empty container with its own id space.
    pub fn with_registry(registry: Arc<TypeRegistry>) -> Self {
        Self::with_registry_and_options(registry, ContainerOptions::default())
    }

    pub fn with_options(options: ContainerOptions) -> Self {
        Self::with_registry_and_options(TypeRegistry::global(), options)
    }

    pub fn with_registry_and_options(registry: Arc<TypeRegistry>, options: ContainerOptions) -> Self {
        Self {
            registry,
            options,
            bindings: BindingStore::new(),
            graph: BTreeMap::new(),
            observers: Observers::new(),
        }
    }

    pub fn options(&self) -> &ContainerOptions {
        &self.options
    }

    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    /// Registers an observer for bind and resolution events.
    ///
    /// Observers only see events that happen after they are added.
    pub fn add_observer(&mut self, observer: Arc<dyn DiObserver>) -> &mut Self {
        self.observers.add(observer);
        self
    }

    // ----- Binding -----

    /// Binds `T` to the interface `I` with a fresh instance per resolution.
    ///
    /// `args` are the literal arguments handed to every construction after
    /// the resolved dependencies.
    ///
    /// # Errors
    ///
    /// [`DiError::AlreadyBound`] if `I` already has a binding, and
    /// [`DiError::Circular`] if `T`'s dependencies lead back to `I`. The
    /// container is unchanged in both cases.
    pub fn bind<I, T>(&mut self, args: T::Args) -> DiResult<()>
    where
        I: ?Sized + Send + Sync + 'static,
        T: Injectable + Implements<I>,
    {
        self.insert_binding::<I, T>(ServiceKey::of::<I>(), Lifetime::Transient, args)
    }

    /// Binds `T` to `I`, building it once and sharing it afterwards.
    pub fn bind_singleton<I, T>(&mut self, args: T::Args) -> DiResult<()>
    where
        I: ?Sized + Send + Sync + 'static,
        T: Injectable + Implements<I>,
    {
        self.insert_binding::<I, T>(ServiceKey::of::<I>(), Lifetime::Singleton, args)
    }

    /// Transient binding of `I` qualified by `tag`.
    pub fn bind_named<I, T>(&mut self, tag: &'static str, args: T::Args) -> DiResult<()>
    where
        I: ?Sized + Send + Sync + 'static,
        T: Injectable + Implements<I>,
    {
        self.insert_binding::<I, T>(ServiceKey::named::<I>(tag), Lifetime::Transient, args)
    }

    /// Singleton binding of `I` qualified by `tag`.
    pub fn bind_singleton_named<I, T>(&mut self, tag: &'static str, args: T::Args) -> DiResult<()>
    where
        I: ?Sized + Send + Sync + 'static,
        T: Injectable + Implements<I>,
    {
        self.insert_binding::<I, T>(ServiceKey::named::<I>(tag), Lifetime::Singleton, args)
    }

    /// Binds a [`Factory`] producing `T` as `I` under
    /// [`FactoryOf<I, T::Args>`](FactoryOf).
    ///
    /// The factory's dependencies are `T`'s and are resolved each time the
    /// factory itself is resolved; its literal arguments are supplied per
    /// [`create`](crate::AbstractFactory::create) call.
    pub fn bind_factory<I, T>(&mut self) -> DiResult<()>
    where
        I: ?Sized + Send + Sync + 'static,
        T: Injectable + Implements<I>,
        T::Deps: Clone,
    {
        self.bind::<FactoryOf<I, T::Args>, Factory<I, T>>(())
    }

    fn insert_binding<I, T>(&mut self, key: ServiceKey, lifetime: Lifetime, args: T::Args) -> DiResult<()>
    where
        I: ?Sized + Send + Sync + 'static,
        T: Injectable + Implements<I>,
    {
        let id = self.registry.id_of(&key);
        if self.bindings.contains(id) {
            tracing::debug!(service = %key, "rejected duplicate binding");
            return Err(DiError::AlreadyBound(key.to_string()));
        }

        let dependencies: Vec<ServiceId> = <T::Deps as Dependencies>::keys()
            .iter()
            .map(|dependency| self.registry.id_of(dependency))
            .collect();

        if self.options.detect_cycles {
            if let Some(path) = find_cycle(id, &dependencies, &self.graph) {
                let path: Vec<String> = path.into_iter().map(|id| self.name_of(id)).collect();
                tracing::debug!(service = %key, path = %path.join(" -> "), "rejected cyclic binding");
                return Err(DiError::Circular(path));
            }
        }

        let implementation = std::any::type_name::<T>();
        let node = GraphNode {
            interface_name: key.to_string(),
            implementation_name: display_type_name(implementation),
            dependencies,
        };

        let ctor: Ctor = Box::new(move |ctx: &ResolverContext<'_>| -> DiResult<AnyArc> {
            let deps = <T::Deps as Dependencies>::resolve_all(ctx)?;
            let instance = <T as Implements<I>>::upcast(Arc::new(T::inject(deps, args.clone())));
            Ok(Arc::new(instance) as AnyArc)
        });

        tracing::debug!(
            service = %key,
            implementation = %node.implementation_name,
            %lifetime,
            dependencies = node.dependencies.len(),
            "bound"
        );

        self.bindings.insert(id, Binding::new(key, lifetime, implementation, ctor));
        self.graph.insert(id, node);
        self.observers.bound(&key, lifetime);
        Ok(())
    }

    // ----- Introspection -----

    pub fn is_bound<I: ?Sized + 'static>(&self) -> bool {
        self.is_key_bound(&ServiceKey::of::<I>())
    }

    pub fn is_bound_named<I: ?Sized + 'static>(&self, tag: &'static str) -> bool {
        self.is_key_bound(&ServiceKey::named::<I>(tag))
    }

    pub fn is_key_bound(&self, key: &ServiceKey) -> bool {
        self.registry
            .lookup(key)
            .map_or(false, |id| self.bindings.contains(id))
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.len() == 0
    }

    /// Snapshot of the recorded binding graph.
    ///
    /// The graph reflects declared dependencies only; it is complete
    /// whether or not anything has been resolved yet.
    pub fn get_graph(&self) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for (id, node) in &self.graph {
            for dependency in &node.dependencies {
                if !self.graph.contains_key(dependency) {
                    graph.insert_unbound(*dependency, self.name_of(*dependency));
                }
            }
            graph.insert_node(*id, node.clone());
        }
        graph
    }

    /// The binding graph in DOT format.
    pub fn to_dot(&self) -> String {
        DotExporter::render(&self.get_graph())
    }

    /// One descriptor per binding, ascending id.
    pub fn descriptors(&self) -> Vec<ServiceDescriptor> {
        let mut descriptors: Vec<ServiceDescriptor> = self
            .bindings
            .iter()
            .map(|(id, binding)| ServiceDescriptor {
                id,
                key: binding.key,
                lifetime: binding.lifetime,
                implementation_name: display_type_name(binding.implementation),
                dependency_count: self.graph.get(&id).map_or(0, |node| node.dependencies.len()),
                is_cached: binding.is_cached(),
            })
            .collect();
        descriptors.sort_by_key(|descriptor| descriptor.id);
        descriptors
    }

    fn name_of(&self, id: ServiceId) -> String {
        self.registry
            .key_of(id)
            .map(|key| key.to_string())
            .unwrap_or_else(|| id.to_string())
    }

    // ----- Resolution -----

    pub(crate) fn resolve_at(&self, key: &ServiceKey, depth: usize) -> DiResult<AnyArc> {
        if depth >= self.options.max_depth {
            let error = DiError::DepthExceeded(depth);
            self.observers.resolution_failed(key, &error);
            return Err(error);
        }

        // Resolution counts as first sight, same as binding
        let id = self.registry.id_of(key);
        let Some(binding) = self.bindings.get(id) else {
            tracing::trace!(service = %key, depth, "no binding");
            let error = DiError::DependencyResolution(key.to_string());
            self.observers.resolution_failed(key, &error);
            return Err(error);
        };

        tracing::trace!(service = %key, depth, lifetime = %binding.lifetime, "resolving");
        let ctx = ResolverContext::new(self, depth);

        if !self.observers.has_observers() {
            return binding.instantiate(&ctx);
        }

        let start = Instant::now();
        self.observers.resolving(key);
        let result = binding.instantiate(&ctx);
        match &result {
            Ok(_) => self.observers.resolved(key, start.elapsed()),
            Err(error) => self.observers.resolution_failed(key, error),
        }
        result
    }
}

impl ResolverCore for Container {
    fn resolve_any(&self, key: &ServiceKey) -> DiResult<AnyArc> {
        self.resolve_at(key, 0)
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("bindings", &self.bindings.len())
            .field("options", &self.options)
            .finish()
    }
}
