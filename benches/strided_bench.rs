use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};
use slab_matrix::{s, transpose, Matrix, MatrixRef, Slice};
use std::hint::black_box;

fn random_matrix(size: usize, seed: u64) -> Matrix<f64, 2> {
    let mut rng = StdRng::seed_from_u64(seed);
    Matrix::from_fn([size, size], |_| rng.gen::<f64>())
}

fn bench_materialize_transposed(c: &mut Criterion) {
    let mut group = c.benchmark_group("materialize_transposed");
    for size in [100usize, 500, 1000] {
        group.throughput(Throughput::Elements((size * size) as u64));
        let a = random_matrix(size, 1);

        group.bench_with_input(BenchmarkId::new("view_t", size), &size, |b, _| {
            b.iter(|| a.view().t().to_matrix());
        });

        group.bench_with_input(BenchmarkId::new("transpose", size), &size, |b, _| {
            b.iter(|| transpose(black_box(&a)));
        });
    }
    group.finish();
}

fn bench_strided_sum(c: &mut Criterion) {
    let mut group = c.benchmark_group("strided_sum");
    for size in [256usize, 1024] {
        let a = random_matrix(size, 2);
        let every_other: MatrixRef<'_, f64, 2> = match a.slice(s![.., Slice::ALL.step_by(2)]) {
            Ok(v) => v,
            Err(err) => panic!("slice failed: {err}"),
        };
        group.throughput(Throughput::Elements(every_other.size() as u64));

        group.bench_with_input(BenchmarkId::new("contiguous", size), &size, |b, _| {
            b.iter(|| a.iter().sum::<f64>());
        });

        group.bench_with_input(BenchmarkId::new("step2_view", size), &size, |b, _| {
            b.iter(|| every_other.iter().sum::<f64>());
        });

        group.bench_with_input(BenchmarkId::new("column_view", size), &size, |b, _| {
            b.iter(|| {
                let mut total = 0.0;
                for j in 0..size {
                    let col: MatrixRef<'_, f64, 1> = match a.col(j) {
                        Ok(v) => v,
                        Err(err) => panic!("col failed: {err}"),
                    };
                    total += col.iter().sum::<f64>();
                }
                total
            });
        });
    }
    group.finish();
}

fn bench_compound_assign(c: &mut Criterion) {
    let mut group = c.benchmark_group("compound_assign");
    for size in [256usize, 1024] {
        group.throughput(Throughput::Elements((size * size) as u64));
        let b_mat = random_matrix(size, 3);

        group.bench_with_input(BenchmarkId::new("scalar", size), &size, |b, _| {
            let mut a = random_matrix(size, 4);
            b.iter(|| {
                a += 1.0;
                a -= 1.0;
            });
        });

        group.bench_with_input(BenchmarkId::new("array_transposed", size), &size, |b, _| {
            let mut a = random_matrix(size, 5);
            let bt = b_mat.view().t();
            b.iter(|| {
                a += bt;
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_materialize_transposed,
    bench_strided_sum,
    bench_compound_assign
);
criterion_main!(benches);
