use diydi::{implements, Container, Injectable, Lifetime, Resolver, TypeRegistry};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

trait Session: Send + Sync {
    fn id(&self) -> usize;
}

trait Handler: Send + Sync {
    fn session(&self) -> &Arc<dyn Session>;
}

struct NumberedSession(usize);

static SESSIONS: AtomicUsize = AtomicUsize::new(0);

impl Session for NumberedSession {
    fn id(&self) -> usize {
        self.0
    }
}

impl Injectable for NumberedSession {
    type Deps = ();
    type Args = ();

    fn inject(_: (), _: ()) -> Self {
        NumberedSession(SESSIONS.fetch_add(1, Ordering::SeqCst))
    }
}

struct RequestHandler {
    session: Arc<dyn Session>,
}

impl Handler for RequestHandler {
    fn session(&self) -> &Arc<dyn Session> {
        &self.session
    }
}

impl Injectable for RequestHandler {
    type Deps = (Arc<dyn Session>,);
    type Args = ();

    fn inject((session,): Self::Deps, _: ()) -> Self {
        RequestHandler { session }
    }
}

implements!(NumberedSession => dyn Session);
implements!(RequestHandler => dyn Handler);

fn container() -> Container {
    Container::with_registry(Arc::new(TypeRegistry::new()))
}

#[test]
fn test_transient_returns_distinct_instances() {
    let mut c = container();
    c.bind::<dyn Session, NumberedSession>(()).unwrap();

    let a = c.get_instance::<dyn Session>().unwrap();
    let b = c.get_instance::<dyn Session>().unwrap();

    assert!(!Arc::ptr_eq(&a, &b));
    assert_ne!(a.id(), b.id());
}

#[test]
fn test_singleton_returns_identical_instance() {
    let mut c = container();
    c.bind_singleton::<dyn Session, NumberedSession>(()).unwrap();

    let a = c.get_instance::<dyn Session>().unwrap();
    let b = c.get_instance::<dyn Session>().unwrap();

    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(a.id(), b.id());
}

#[test]
fn test_transient_over_singleton_shares_inner() {
    let mut c = container();
    c.bind_singleton::<dyn Session, NumberedSession>(()).unwrap();
    c.bind::<dyn Handler, RequestHandler>(()).unwrap();

    let first = c.get_instance::<dyn Handler>().unwrap();
    let second = c.get_instance::<dyn Handler>().unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(first.session(), second.session()));
}

#[test]
fn test_singleton_over_transient_captures_once() {
    let mut c = container();
    c.bind::<dyn Session, NumberedSession>(()).unwrap();
    c.bind_singleton::<dyn Handler, RequestHandler>(()).unwrap();

    let first = c.get_instance::<dyn Handler>().unwrap();
    let second = c.get_instance::<dyn Handler>().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(first.session(), second.session()));

    // Direct resolution of the transient still builds a fresh instance
    let direct = c.get_instance::<dyn Session>().unwrap();
    assert!(!Arc::ptr_eq(first.session(), &direct));
}

#[test]
fn test_singletons_are_per_container() {
    let registry = Arc::new(TypeRegistry::new());
    let mut first = Container::with_registry(registry.clone());
    let mut second = Container::with_registry(registry);
    first.bind_singleton::<dyn Session, NumberedSession>(()).unwrap();
    second.bind_singleton::<dyn Session, NumberedSession>(()).unwrap();

    let a = first.get_instance::<dyn Session>().unwrap();
    let b = second.get_instance::<dyn Session>().unwrap();
    assert!(!Arc::ptr_eq(&a, &b));
}

#[test]
fn test_descriptor_reports_cache_state() {
    let mut c = container();
    c.bind_singleton::<dyn Session, NumberedSession>(()).unwrap();
    c.bind::<dyn Handler, RequestHandler>(()).unwrap();

    let before = c.descriptors();
    assert_eq!(before[0].lifetime, Lifetime::Singleton);
    assert!(!before[0].is_cached);
    assert_eq!(before[1].lifetime, Lifetime::Transient);

    c.get_instance::<dyn Handler>().unwrap();

    let after = c.descriptors();
    assert!(after[0].is_cached);
    assert!(!after[1].is_cached);
    assert_eq!(after[1].dependency_count, 1);
}
