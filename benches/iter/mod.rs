use std::hint::black_box;

use criterion::{measurement::Measurement, BenchmarkGroup, BenchmarkId, Criterion, Throughput};
use splaydex::SplayTree;

use crate::Lfsr;

#[derive(Debug, Clone, Copy)]
struct BenchName {
    n_values: usize,
    bench_name: &'static str,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new(v.bench_name, v.n_values)
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("iter");

    for n_values in [100, 1_000, 10_000] {
        // Generate the tree.
        let mut rand = Lfsr::default();
        let mut t = SplayTree::default();

        for _i in 0..n_values {
            t.insert(rand.next()).unwrap();
        }

        bench_iter(n_values, &mut g, &t);
        bench_leaf_values(n_values, &mut g, &t);
    }
}

/// Measure the time needed to walk all values of the tree in order.
fn bench_iter<M>(n_values: usize, g: &mut BenchmarkGroup<'_, M>, t: &SplayTree<u16>)
where
    M: Measurement,
{
    let bench_name = BenchName {
        n_values,
        bench_name: "ordered",
    };

    g.throughput(Throughput::Elements(n_values as _));
    // Values per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter(|| {
            for v in t.iter() {
                black_box(v);
            }
        })
    });
}

/// Measure the time needed to collect the leaf values of the tree.
fn bench_leaf_values<M>(n_values: usize, g: &mut BenchmarkGroup<'_, M>, t: &SplayTree<u16>)
where
    M: Measurement,
{
    let bench_name = BenchName {
        n_values,
        bench_name: "leaf_values",
    };

    g.throughput(Throughput::Elements(n_values as _));
    g.bench_function(BenchmarkId::from(bench_name), |b| b.iter(|| black_box(t.leaf_values())));
}
