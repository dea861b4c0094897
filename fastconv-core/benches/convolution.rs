use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use fastconv_core::{Backend, CompressedStructuredMatrix, Engine, EngineConfig};
use fastconv_hal::source::Source;

fn bench_convolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("convolve");

    fn runner_f64(n: usize) -> impl FnMut() {
        let mut source: Source = Source::new([0u8; 32]);
        let engine: Engine = Engine::default();
        let mut x: Vec<f64> = vec![0.0; n];
        let mut y: Vec<f64> = vec![0.0; n];
        source.fill_f64(&mut x, -1.0, 1.0);
        source.fill_f64(&mut y, -1.0, 1.0);
        move || {
            black_box(engine.convolve(&x, &y).unwrap());
        }
    }

    fn runner_i64(n: usize, backend: Backend) -> impl FnMut() {
        let mut source: Source = Source::new([0u8; 32]);
        let engine: Engine = Engine::new(EngineConfig::default().with_integer_backend(backend)).unwrap();
        let mut x: Vec<i64> = vec![0; n];
        let mut y: Vec<i64> = vec![0; n];
        source.fill_i64(&mut x, 1 << 16);
        source.fill_i64(&mut y, 1 << 16);
        move || {
            black_box(engine.convolve_integers(&x, &y).ok());
        }
    }

    for log_n in [8, 10, 12, 14] {
        let n: usize = 1 << log_n;

        let mut runner = runner_f64(n);
        group.bench_with_input(BenchmarkId::new("f64", n), &(), |b, _| b.iter(&mut runner));

        for backend in [Backend::Fft, Backend::Ntt] {
            let mut runner = runner_i64(n, backend);
            let id: BenchmarkId = BenchmarkId::new(format!("i64/{backend:?}"), n);
            group.bench_with_input(id, &(), |b, _| b.iter(&mut runner));
        }
    }

    group.finish();
}

fn bench_structured(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiply_structured");

    fn runner(n: usize, direct_threshold: usize) -> impl FnMut() {
        let mut source: Source = Source::new([1u8; 32]);
        let engine: Engine = Engine::new(EngineConfig::default().with_direct_threshold(direct_threshold)).unwrap();
        let mut backing: Vec<f64> = vec![0.0; 2 * n - 1];
        let mut v: Vec<f64> = vec![0.0; n];
        source.fill_f64(&mut backing, -1.0, 1.0);
        source.fill_f64(&mut v, -1.0, 1.0);
        let matrix: CompressedStructuredMatrix<f64> = CompressedStructuredMatrix::toeplitz(backing).unwrap();
        move || {
            black_box(engine.multiply(&matrix, &v).unwrap());
        }
    }

    for log_n in [4, 6, 8, 10] {
        let n: usize = 1 << log_n;
        for (label, direct_threshold) in [("direct", usize::MAX), ("fft", 0)] {
            let mut runner = runner(n, direct_threshold);
            group.bench_with_input(BenchmarkId::new(label, n), &(), |b, _| b.iter(&mut runner));
        }
    }

    group.finish();
}

criterion_group!(benches, bench_convolve, bench_structured);
criterion_main!(benches);
