//! Detection and redaction throughput.
//!
//! Run with: `cargo bench --bench detection_throughput`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use phi_guard::{ChatInterceptor, PIIDetector, PIISanitizer};

const CLEAN_LINE: &str = "Qual é o tratamento mais recente para diabetes tipo 2 em adultos? ";
const DIRTY_LINE: &str = "Paciente João Silva, CPF 123.456.789-10, nascido em 15/05/1980, \
    email joao@example.com, telefone (11) 98765-4321, cartão 4111 1111 1111 1111. ";

fn corpus() -> Vec<(&'static str, String)> {
    vec![
        ("clean_short", CLEAN_LINE.to_string()),
        ("clean_long", CLEAN_LINE.repeat(64)),
        ("dirty_short", DIRTY_LINE.to_string()),
        ("dirty_long", DIRTY_LINE.repeat(64)),
    ]
}

fn bench_detect(c: &mut Criterion) {
    let detector = PIIDetector::new();
    let mut group = c.benchmark_group("pii_detect");
    for (label, text) in corpus() {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(label), &text, |b, text| {
            b.iter(|| detector.detect(black_box(text)))
        });
    }
    group.finish();
}

fn bench_sanitize(c: &mut Criterion) {
    let sanitizer = PIISanitizer::default_sanitizer();
    let mut group = c.benchmark_group("pii_sanitize");
    for (label, text) in corpus() {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(label), &text, |b, text| {
            b.iter(|| sanitizer.sanitize(black_box(text)))
        });
    }
    group.finish();
}

fn bench_intercept(c: &mut Criterion) {
    let interceptor = ChatInterceptor::default();
    let body = serde_json::json!({
        "model": "llama3",
        "messages": [
            { "role": "system", "content": "You are helpful." },
            { "role": "user", "content": DIRTY_LINE }
        ]
    })
    .to_string()
    .into_bytes();

    c.bench_function("chat_intercept", |b| b.iter(|| interceptor.intercept(black_box(&body))));
}

criterion_group!(benches, bench_detect, bench_sanitize, bench_intercept);
criterion_main!(benches);
