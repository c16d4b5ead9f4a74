use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use jordan_linalg::{EigenOptions, LinearSystem, Matrix};

fn bench_rref(c: &mut Criterion) {
    let mut group = c.benchmark_group("rref");

    for size in [4, 16, 64].iter() {
        let m = Matrix::empty(*size, *size + 1);
        group.bench_with_input(BenchmarkId::from_parameter(size), &m, |b, m| {
            b.iter(|| black_box(m).rref())
        });
    }
    group.finish();
}

fn bench_determinant(c: &mut Criterion) {
    let mut group = c.benchmark_group("determinant");

    for size in [3, 5, 7].iter() {
        let m = Matrix::empty(*size, *size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &m, |b, m| {
            b.iter(|| black_box(m).determinant().unwrap())
        });
    }
    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let m = Matrix::empty(32, 40);

    c.bench_function("solve 32x39", |b| {
        b.iter(|| {
            let mut system = LinearSystem::new(black_box(&m).clone()).unwrap();
            system.solve().unwrap().consistent
        })
    });
}

fn bench_eigenvalues(c: &mut Criterion) {
    let mut group = c.benchmark_group("eigenvalues");
    let m = Matrix::new(vec![
        vec![4.0, -1.0, 6.0],
        vec![2.0, 1.0, 6.0],
        vec![2.0, -1.0, 8.0],
    ])
    .unwrap();

    for iterations in [10, 100, 1000].iter() {
        let options = EigenOptions::default().with_iterations(*iterations);
        group.bench_with_input(
            BenchmarkId::from_parameter(iterations),
            &options,
            |b, options| b.iter(|| black_box(&m).eigenvalues(options).unwrap()),
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_rref,
    bench_determinant,
    bench_solve,
    bench_eigenvalues
);
criterion_main!(benches);
