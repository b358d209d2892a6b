use criterion::{Criterion, black_box, criterion_group, criterion_main};
use luminara_core::{Body, Engine, EngineConfig, Ephemeris};
use luminara_time::Epoch;

fn longitude_bench(c: &mut Criterion) {
    let engine = Engine::new(EngineConfig::default()).expect("default config is valid");
    let epoch = Epoch::from_utc(2024, 3, 20, 12, 0, 0.0);

    let mut group = c.benchmark_group("apparent_longitude");
    for body in [Body::Sun, Body::Moon, Body::Mars, Body::Pluto] {
        group.bench_function(body.name(), |b| {
            b.iter(|| {
                engine
                    .apparent_longitude(black_box(body), black_box(epoch))
                    .expect("epoch is in range")
            })
        });
    }
    group.finish();
}

criterion_group!(benches, longitude_bench);
criterion_main!(benches);
