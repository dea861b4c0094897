use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use fastconv_core::{
    Backend, EngineConfig,
    wildcard::{WildcardPattern, match_encoded},
};
use fastconv_hal::source::Source;

fn bench_match_encoded(c: &mut Criterion) {
    let mut group = c.benchmark_group("match_wildcards");

    fn runner(n: usize, m: usize, backend: Backend) -> impl FnMut() {
        let mut source: Source = Source::new([0u8; 32]);
        let config: EngineConfig = EngineConfig::default().with_integer_backend(backend);
        let alphabet: Vec<u64> = (1..=26).collect();
        let text: Vec<u64> = source.sample_symbols(&alphabet, n);
        let codes: Vec<u64> = text[..m]
            .iter()
            .map(|c| if source.next_bool(0.2) { 0 } else { *c })
            .collect();
        let pattern: WildcardPattern = WildcardPattern::from_codes(codes).unwrap();
        move || {
            black_box(match_encoded(&text, &pattern, &config).ok());
        }
    }

    for log_n in [10, 12, 14, 16] {
        let n: usize = 1 << log_n;
        let m: usize = n >> 4;
        for backend in [Backend::Fft, Backend::Ntt] {
            let mut runner = runner(n, m, backend);
            let id: BenchmarkId = BenchmarkId::new(format!("{backend:?}"), format!("{n}x{m}"));
            group.bench_with_input(id, &(), |b, _| b.iter(&mut runner));
        }
    }

    group.finish();
}

criterion_group!(benches, bench_match_encoded);
criterion_main!(benches);
