use core::hash::BuildHasher;
use core::hash::Hash;
use core::hint::black_box;

use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use hashbrown::HashMap as HashbrownMap;
use quad_hash::HashMap as QuadMap;
use rand::Rng;
use rand::SeedableRng;
use rand::TryRngCore;
use rand::rngs::OsRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand_distr::Zipf;
use siphasher::sip::SipHasher;
use std::collections::HashMap as StdMap;

#[derive(Clone, Copy)]
struct SipHashBuilder {
    k1: u64,
    k2: u64,
}

impl BuildHasher for SipHashBuilder {
    type Hasher = SipHasher;

    fn build_hasher(&self) -> Self::Hasher {
        SipHasher::new_with_keys(self.k1, self.k2)
    }
}

impl SipHashBuilder {
    fn random() -> Self {
        let mut rng = OsRng;
        Self {
            k1: rng.try_next_u64().unwrap(),
            k2: rng.try_next_u64().unwrap(),
        }
    }
}

trait BenchKey: Clone + Hash + Eq {
    fn new(key: u64) -> Self;
}

#[derive(Clone, PartialEq, Eq, Hash)]
struct SmallKey(u64);

impl BenchKey for SmallKey {
    fn new(key: u64) -> Self {
        black_box(Self(key))
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
struct StringKey(String);

impl BenchKey for StringKey {
    fn new(key: u64) -> Self {
        black_box(Self(format!("key_{:016X}", key)))
    }
}

const SIZES: &[usize] = &[
    (1 << 10),
    (1 << 12),
    (1 << 14),
    (1 << 16),
    (1 << 18),
];

fn random_keys<K: BenchKey>(count: usize) -> Vec<K> {
    let mut rng = OsRng;
    (0..count)
        .map(|_| K::new(rng.try_next_u64().unwrap()))
        .collect()
}

fn quad_map<K: BenchKey>(keys: &[K], hasher: SipHashBuilder) -> QuadMap<K, u64, SipHashBuilder> {
    let mut map = QuadMap::with_hasher(hasher);
    for (i, key) in keys.iter().enumerate() {
        map.insert(key.clone(), i as u64);
    }
    map
}

fn hashbrown_map<K: BenchKey>(
    keys: &[K],
    hasher: SipHashBuilder,
) -> HashbrownMap<K, u64, SipHashBuilder> {
    let mut map = HashbrownMap::with_hasher(hasher);
    for (i, key) in keys.iter().enumerate() {
        map.insert(key.clone(), i as u64);
    }
    map
}

fn std_map<K: BenchKey>(keys: &[K], hasher: SipHashBuilder) -> StdMap<K, u64, SipHashBuilder> {
    let mut map = StdMap::with_hasher(hasher);
    for (i, key) in keys.iter().enumerate() {
        map.insert(key.clone(), i as u64);
    }
    map
}

fn bench_insert_random<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("insert_random_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    let hasher = SipHashBuilder::random();

    for &size in SIZES[..=MAX_SIZE].iter() {
        let keys = random_keys::<K>(size);
        group.throughput(Throughput::Elements(size as u64));

        let shuffled = || {
            let mut keys = keys.clone();
            keys.shuffle(&mut SmallRng::from_os_rng());
            keys
        };

        group.bench_function(format!("quad_hash/{size}"), |b| {
            b.iter_batched(
                shuffled,
                |keys| black_box(quad_map(&keys, hasher)),
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                shuffled,
                |keys| black_box(hashbrown_map(&keys, hasher)),
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("std/{size}"), |b| {
            b.iter_batched(
                shuffled,
                |keys| black_box(std_map(&keys, hasher)),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_find_hit<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("find_hit_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    let hasher = SipHashBuilder::random();

    for &size in SIZES[..=MAX_SIZE].iter() {
        let keys = random_keys::<K>(size);
        let mut lookups = keys.clone();
        lookups.shuffle(&mut SmallRng::from_os_rng());
        group.throughput(Throughput::Elements(size as u64));

        let quad = quad_map(&keys, hasher);
        group.bench_function(format!("quad_hash/{size}"), |b| {
            b.iter(|| {
                for key in &lookups {
                    black_box(quad.get(key));
                }
            })
        });

        let brown = hashbrown_map(&keys, hasher);
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                for key in &lookups {
                    black_box(brown.get(key));
                }
            })
        });

        let std = std_map(&keys, hasher);
        group.bench_function(format!("std/{size}"), |b| {
            b.iter(|| {
                for key in &lookups {
                    black_box(std.get(key));
                }
            })
        });
    }

    group.finish();
}

fn bench_find_miss<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("find_miss_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    let hasher = SipHashBuilder::random();

    for &size in SIZES[..=MAX_SIZE].iter() {
        let keys = random_keys::<K>(size);
        let misses = random_keys::<K>(size);
        group.throughput(Throughput::Elements(size as u64));

        let quad = quad_map(&keys, hasher);
        group.bench_function(format!("quad_hash/{size}"), |b| {
            b.iter(|| {
                for key in &misses {
                    black_box(quad.get(key));
                }
            })
        });

        let brown = hashbrown_map(&keys, hasher);
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                for key in &misses {
                    black_box(brown.get(key));
                }
            })
        });

        let std = std_map(&keys, hasher);
        group.bench_function(format!("std/{size}"), |b| {
            b.iter(|| {
                for key in &misses {
                    black_box(std.get(key));
                }
            })
        });
    }

    group.finish();
}

fn bench_remove<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("remove_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    let hasher = SipHashBuilder::random();

    for &size in SIZES[..=MAX_SIZE].iter() {
        let keys = random_keys::<K>(size);
        group.throughput(Throughput::Elements(size as u64));

        let quad = quad_map(&keys, hasher);
        group.bench_function(format!("quad_hash/{size}"), |b| {
            b.iter_batched(
                || quad.clone(),
                |mut map| {
                    for key in &keys {
                        black_box(map.remove(key));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });

        let brown = hashbrown_map(&keys, hasher);
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || brown.clone(),
                |mut map| {
                    for key in &keys {
                        black_box(map.remove(key));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });

        let std = std_map(&keys, hasher);
        group.bench_function(format!("std/{size}"), |b| {
            b.iter_batched(
                || std.clone(),
                |mut map| {
                    for key in &keys {
                        black_box(map.remove(key));
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_iteration<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("iteration_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    let hasher = SipHashBuilder::random();

    for &size in SIZES[..=MAX_SIZE].iter() {
        let keys = random_keys::<K>(size);
        group.throughput(Throughput::Elements(size as u64));

        let quad = quad_map(&keys, hasher);
        group.bench_function(format!("quad_hash/{size}"), |b| {
            b.iter(|| black_box(quad.iter().map(|(_, v)| *v).sum::<u64>()))
        });

        let brown = hashbrown_map(&keys, hasher);
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| black_box(brown.iter().map(|(_, v)| *v).sum::<u64>()))
        });

        let std = std_map(&keys, hasher);
        group.bench_function(format!("std/{size}"), |b| {
            b.iter(|| black_box(std.iter().map(|(_, v)| *v).sum::<u64>()))
        });
    }

    group.finish();
}

/// Inserts and removes with Zipf-skewed key choice, so a few keys churn far
/// more often than the rest and tombstones pile up on their probe paths.
fn bench_churn_zipf<K: BenchKey, const MAX_SIZE: usize>(c: &mut Criterion) {
    const OPERATIONS: usize = 10_000;

    let mut group = c.benchmark_group(format!("churn_zipf_{}", core::any::type_name::<K>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));
    group.throughput(Throughput::Elements(OPERATIONS as u64));

    let hasher = SipHashBuilder::random();

    for &size in SIZES[..=MAX_SIZE].iter() {
        let keys = random_keys::<K>(size);
        let distr = Zipf::new(size as f32, 1.0).unwrap();
        let mut rng = SmallRng::from_os_rng();
        let ops: Vec<(bool, usize)> = (0..OPERATIONS)
            .map(|_| {
                let index = rng.sample(distr) as usize - 1;
                (rng.random_bool(0.5), index)
            })
            .collect();

        group.bench_function(format!("quad_hash/{size}"), |b| {
            b.iter_batched(
                || QuadMap::<K, u64, _>::with_hasher(hasher),
                |mut map| {
                    for &(insert, index) in &ops {
                        if insert {
                            black_box(map.insert(keys[index].clone(), index as u64));
                        } else {
                            black_box(map.remove(&keys[index]));
                        }
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || HashbrownMap::<K, u64, _>::with_hasher(hasher),
                |mut map| {
                    for &(insert, index) in &ops {
                        if insert {
                            black_box(map.insert(keys[index].clone(), index as u64));
                        } else {
                            black_box(map.remove(&keys[index]));
                        }
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("std/{size}"), |b| {
            b.iter_batched(
                || StdMap::<K, u64, _>::with_hasher(hasher),
                |mut map| {
                    for &(insert, index) in &ops {
                        if insert {
                            black_box(map.insert(keys[index].clone(), index as u64));
                        } else {
                            black_box(map.remove(&keys[index]));
                        }
                    }
                    black_box(map)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_random::<SmallKey, 4>,
    bench_insert_random::<StringKey, 3>,
    bench_find_hit::<SmallKey, 4>,
    bench_find_hit::<StringKey, 3>,
    bench_find_miss::<SmallKey, 4>,
    bench_find_miss::<StringKey, 3>,
    bench_remove::<SmallKey, 4>,
    bench_remove::<StringKey, 3>,
    bench_iteration::<SmallKey, 4>,
    bench_iteration::<StringKey, 3>,
    bench_churn_zipf::<SmallKey, 4>,
    bench_churn_zipf::<StringKey, 3>,
);

criterion_main!(benches);
