use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jordan_tensor::{ops, Backend, CpuBackend, Tensor2};

fn sample_tensor(value: f64) -> Tensor2<f64> {
    Tensor2::from_shape_fn([64, 64], |[i, j]| value + (i * 64 + j) as f64)
}

fn benchmark_tensor_clone(c: &mut Criterion) {
    let tensor = sample_tensor(1.0);

    c.bench_function("tensor clone", |b| {
        b.iter(|| {
            let _clone = black_box(&tensor).clone();
        })
    });
}

fn benchmark_add(c: &mut Criterion) {
    let tensor1 = sample_tensor(1.0);
    let tensor2 = sample_tensor(2.0);

    c.bench_function("add", |b| {
        b.iter(|| {
            let _result = ops::add(black_box(&tensor1), black_box(&tensor2)).unwrap();
        })
    });
}

fn benchmark_matmul(c: &mut Criterion) {
    let tensor1 = sample_tensor(1.0);
    let tensor2 = sample_tensor(2.0);

    let mut group = c.benchmark_group("matmul");
    group.bench_function("naive", |b| {
        b.iter(|| {
            let _result = ops::matmul(black_box(&tensor1), black_box(&tensor2)).unwrap();
        })
    });
    group.bench_function("faer", |b| {
        b.iter(|| {
            let _result = CpuBackend
                .matmul(black_box(&tensor1), black_box(&tensor2))
                .unwrap();
        })
    });
    group.finish();
}

fn benchmark_qr(c: &mut Criterion) {
    let tensor = sample_tensor(1.0);

    c.bench_function("qr", |b| {
        b.iter(|| {
            let _result = CpuBackend.qr(black_box(&tensor)).unwrap();
        })
    });
}

criterion_group!(
    benches,
    benchmark_tensor_clone,
    benchmark_add,
    benchmark_matmul,
    benchmark_qr
);
criterion_main!(benches);
