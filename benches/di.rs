use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use diydi::*;
use std::sync::Arc;

trait Name: Send + Sync {
    fn name(&self) -> &str;
}

trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

struct Universe;

impl Name for Universe {
    fn name(&self) -> &str {
        "universe"
    }
}

impl Injectable for Universe {
    type Deps = ();
    type Args = ();

    fn inject(_: (), _: ()) -> Self {
        Universe
    }
}

struct Generic {
    name: Arc<dyn Name>,
}

impl Greeter for Generic {
    fn greet(&self) -> String {
        format!("hello, {}", self.name.name())
    }
}

impl Injectable for Generic {
    type Deps = (Arc<dyn Name>,);
    type Args = ();

    fn inject((name,): Self::Deps, _: ()) -> Self {
        Generic { name }
    }
}

implements!(Universe => dyn Name);
implements!(Generic => dyn Greeter);

fn container() -> Container {
    Container::with_registry(Arc::new(TypeRegistry::new()))
}

// ===== Micro Benchmarks =====

fn bench_singleton_hit(c: &mut Criterion) {
    let mut container = container();
    container.bind_singleton::<dyn Name, Universe>(()).unwrap();

    // Prime the singleton
    let _ = container.get_instance::<dyn Name>().unwrap();

    c.bench_function("singleton_hit", |b| {
        b.iter(|| {
            let v = container.get_instance::<dyn Name>().unwrap();
            black_box(v);
        })
    });
}

fn bench_transient_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("transient_chain");

    for singleton_leaf in [false, true] {
        let mut container = container();
        if singleton_leaf {
            container.bind_singleton::<dyn Name, Universe>(()).unwrap();
        } else {
            container.bind::<dyn Name, Universe>(()).unwrap();
        }
        container.bind::<dyn Greeter, Generic>(()).unwrap();

        group.bench_with_input(
            BenchmarkId::new("singleton_leaf", singleton_leaf),
            &container,
            |b, container| {
                b.iter(|| black_box(container.get_instance::<dyn Greeter>().unwrap()))
            },
        );
    }

    group.finish();
}

fn bench_bind(c: &mut Criterion) {
    c.bench_function("bind_two", |b| {
        b.iter_batched(
            container,
            |mut container| {
                container.bind::<dyn Name, Universe>(()).unwrap();
                container.bind::<dyn Greeter, Generic>(()).unwrap();
                black_box(container)
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_observed_resolution(c: &mut Criterion) {
    let mut container = container();
    container.add_observer(Arc::new(MetricsObserver::new()));
    container.bind::<dyn Name, Universe>(()).unwrap();
    container.bind::<dyn Greeter, Generic>(()).unwrap();

    c.bench_function("observed_transient_chain", |b| {
        b.iter(|| black_box(container.get_instance::<dyn Greeter>().unwrap()))
    });
}

// ===== Graph Benchmarks =====

fn bench_to_dot(c: &mut Criterion) {
    let mut container = container();
    container.bind::<dyn Name, Universe>(()).unwrap();
    container.bind::<dyn Greeter, Generic>(()).unwrap();

    c.bench_function("to_dot", |b| b.iter(|| black_box(container.to_dot())));
}

criterion_group!(
    micro_benches,
    bench_singleton_hit,
    bench_transient_chain,
    bench_bind,
    bench_observed_resolution
);

criterion_group!(graph_benches, bench_to_dot);

criterion_main!(micro_benches, graph_benches);
