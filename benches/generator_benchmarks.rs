use clueforge::{
    store::EntityStore,
    synth::{controller::generate_puzzle, GeneratorConfig},
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_generation(c: &mut Criterion) {
    let store = EntityStore::builtin();

    let mut group = c.benchmark_group("generate_puzzle");
    for persons in [3usize, 4] {
        let config = GeneratorConfig {
            min_persons: persons,
            max_persons: persons,
            ..GeneratorConfig::default()
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(persons),
            &config,
            |b, config| {
                b.iter(|| {
                    let record = generate_puzzle(&store, config, black_box(17)).unwrap();
                    black_box(record)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_generation);
criterion_main!(benches);
