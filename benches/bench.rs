mod models;
use models::*;

use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use vector_map::VectorMap;

const COUNTS: [usize; 2] = [1000, 10000];
const RAND_SEED: u64 = 123;

fn shuffled_keys<K: TestKey>(count: usize) -> Vec<K> {
    let mut keys = (0..count).map(K::from_i).collect::<Vec<_>>();
    keys.shuffle(&mut StdRng::seed_from_u64(RAND_SEED));
    keys
}

fn bench_vector_map<K: TestKey>(c: &mut Criterion) {
    let name = K::name();

    for count in COUNTS {
        c.bench_function(
            format!("vector_map<{name}> ordered_insert {count}").as_str(),
            |b| {
                b.iter(|| {
                    let mut map = VectorMap::new();
                    for i in 0..count {
                        map.insert(K::from_i(i), Value::default());
                    }
                    map
                });
            },
        );

        c.bench_function(
            format!("vector_map<{name}> hinted_insert {count}").as_str(),
            |b| {
                b.iter(|| {
                    let mut map = VectorMap::with_capacity(count);
                    let mut hint = map.end();
                    for i in 0..count {
                        hint = map.insert_hint(hint, K::from_i(i), Value::default()).next();
                    }
                    map
                });
            },
        );

        let keys = shuffled_keys::<K>(count);

        c.bench_function(
            format!("vector_map<{name}> random_insert {count}").as_str(),
            |b| {
                b.iter(|| {
                    let mut map = VectorMap::new();
                    for k in keys.iter() {
                        map.insert(k.clone(), Value::default());
                    }
                    map
                });
            },
        );

        c.bench_function(
            format!("vector_map<{name}> bulk_load {count}").as_str(),
            |b| {
                b.iter(|| {
                    keys.iter()
                        .map(|k| (k.clone(), Value::default()))
                        .collect::<VectorMap<K, Value>>()
                });
            },
        );

        let map: VectorMap<K, Value> = keys.iter().map(|k| (k.clone(), Value::default())).collect();

        c.bench_function(
            format!("vector_map<{name}> random_get {count}").as_str(),
            |b| {
                b.iter(|| {
                    for k in keys.iter() {
                        black_box(map.get(k));
                    }
                });
            },
        );

        c.bench_function(
            format!("vector_map<{name}> random_remove {count}").as_str(),
            |b| {
                b.iter_batched(
                    || map.clone(),
                    |mut map| {
                        for k in keys.iter() {
                            map.remove(k);
                        }
                        map
                    },
                    criterion::BatchSize::LargeInput,
                );
            },
        );

        c.bench_function(format!("vector_map<{name}> iter {count}").as_str(), |b| {
            b.iter(|| {
                let c = map.iter().fold(0, |a, _i| a + black_box(1));
                assert_eq!(c, map.len());
            });
        });
    }
}

fn bench_btree<K: TestKey>(c: &mut Criterion) {
    let name = K::name();

    for count in COUNTS {
        c.bench_function(format!("btree<{name}> ordered_insert {count}").as_str(), |b| {
            b.iter(|| {
                let mut map = BTreeMap::new();
                for i in 0..count {
                    map.insert(K::from_i(i), Value::default());
                }
                map
            });
        });

        let keys = shuffled_keys::<K>(count);

        c.bench_function(format!("btree<{name}> random_insert {count}").as_str(), |b| {
            b.iter(|| {
                let mut map = BTreeMap::new();
                for k in keys.iter() {
                    map.insert(k.clone(), Value::default());
                }
                map
            });
        });

        let map: BTreeMap<K, Value> = keys.iter().map(|k| (k.clone(), Value::default())).collect();

        c.bench_function(format!("btree<{name}> random_get {count}").as_str(), |b| {
            b.iter(|| {
                for k in keys.iter() {
                    black_box(map.get(k));
                }
            });
        });

        c.bench_function(format!("btree<{name}> random_remove {count}").as_str(), |b| {
            b.iter_batched(
                || map.clone(),
                |mut map| {
                    for k in keys.iter() {
                        map.remove(k);
                    }
                    map
                },
                criterion::BatchSize::LargeInput,
            );
        });

        c.bench_function(format!("btree<{name}> iter {count}").as_str(), |b| {
            b.iter(|| {
                let c = map.iter().fold(0, |a, _i| a + black_box(1));
                assert_eq!(c, map.len());
            });
        });
    }
}

fn benchmark_vector_map(c: &mut Criterion) {
    bench_vector_map::<u64>(c);
    bench_vector_map::<Point>(c);
    bench_vector_map::<String>(c);
}

fn benchmark_btree(c: &mut Criterion) {
    bench_btree::<u64>(c);
    bench_btree::<Point>(c);
    bench_btree::<String>(c);
}

criterion_group!(benches, benchmark_vector_map, benchmark_btree);
criterion_main!(benches);
