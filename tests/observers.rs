use diydi::{
    implements, Container, DiError, DiObserver, Injectable, Lifetime, MetricsObserver, Resolver,
    ServiceKey, TracingObserver, TypeRegistry,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

trait Name: Send + Sync {}
trait Greeter: Send + Sync {}

struct Universe;
impl Name for Universe {}

impl Injectable for Universe {
    type Deps = ();
    type Args = ();

    fn inject(_: (), _: ()) -> Self {
        Universe
    }
}

struct Generic;
impl Greeter for Generic {}

impl Injectable for Generic {
    type Deps = (Arc<dyn Name>,);
    type Args = ();

    fn inject(_: Self::Deps, _: ()) -> Self {
        Generic
    }
}

implements!(Universe => dyn Name);
implements!(Generic => dyn Greeter);

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<String>>,
}

impl Recorder {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl DiObserver for Recorder {
    fn bound(&self, key: &ServiceKey, lifetime: Lifetime) {
        self.events.lock().unwrap().push(format!("bound {} {}", key, lifetime));
    }

    fn resolving(&self, key: &ServiceKey) {
        self.events.lock().unwrap().push(format!("resolving {}", key));
    }

    fn resolved(&self, key: &ServiceKey, _duration: Duration) {
        self.events.lock().unwrap().push(format!("resolved {}", key));
    }

    fn resolution_failed(&self, key: &ServiceKey, error: &DiError) {
        self.events.lock().unwrap().push(format!("failed {}: {}", key, error));
    }
}

fn container() -> Container {
    Container::with_registry(Arc::new(TypeRegistry::new()))
}

#[test]
fn test_nested_events_in_order() {
    let recorder = Arc::new(Recorder::default());
    let mut c = container();
    c.add_observer(recorder.clone());

    c.bind_singleton::<dyn Name, Universe>(()).unwrap();
    c.bind::<dyn Greeter, Generic>(()).unwrap();
    c.get_instance::<dyn Greeter>().unwrap();

    assert_eq!(
        recorder.events(),
        vec![
            format!("bound Name {}", Lifetime::Singleton),
            format!("bound Greeter {}", Lifetime::Transient),
            "resolving Greeter".to_string(),
            "resolving Name".to_string(),
            "resolved Name".to_string(),
            "resolved Greeter".to_string(),
        ]
    );
}

#[test]
fn test_failure_reported_along_chain() {
    let recorder = Arc::new(Recorder::default());
    let mut c = container();
    c.add_observer(recorder.clone());
    c.bind::<dyn Greeter, Generic>(()).unwrap();

    assert!(c.get_instance::<dyn Greeter>().is_err());
    assert_eq!(
        recorder.events()[1..],
        [
            "resolving Greeter".to_string(),
            "failed Name: Name not found".to_string(),
            "failed Greeter: Name not found".to_string(),
        ]
    );
}

#[test]
fn test_metrics_observer() {
    let metrics = Arc::new(MetricsObserver::new());
    let mut c = container();
    c.add_observer(metrics.clone());

    c.bind::<dyn Name, Universe>(()).unwrap();
    c.bind::<dyn Greeter, Generic>(()).unwrap();
    assert_eq!(metrics.binding_count(), 2);

    c.get_instance::<dyn Greeter>().unwrap();
    assert_eq!(metrics.resolution_count(), 2);
    assert!(metrics.average_resolution_time().is_some());

    assert!(c.get_named::<dyn Name>("missing").is_err());
    assert_eq!(metrics.failure_count(), 1);

    metrics.reset();
    assert_eq!(metrics.resolution_count(), 0);
    assert_eq!(metrics.average_resolution_time(), None);
}

#[test]
fn test_tracing_observer_with_subscriber() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("trace"))
        .with_test_writer()
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let mut c = container();
        c.add_observer(Arc::new(TracingObserver::with_label("test")));
        c.bind::<dyn Name, Universe>(()).unwrap();
        c.bind::<dyn Greeter, Generic>(()).unwrap();

        assert!(c.get_instance::<dyn Greeter>().is_ok());
        assert!(c.get_named::<dyn Greeter>("missing").is_err());
    });
}
