//! 레코드 디코더 벤치마크

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use leakcheck_audit::RecordDecoder;

fn bench_decode_write(c: &mut Criterion) {
    let decoder = RecordDecoder::new();
    let line = r#"{"event":"memory_write","key":"auth.token","user_id":"alice","trace_id":"t1","value_preview":"eyJhbGciOiJIUzI1NiJ9"}"#;

    c.bench_function("decode_write_line", |b| {
        b.iter(|| decoder.decode(black_box(line)));
    });
}

fn bench_decode_minimal(c: &mut Criterion) {
    let decoder = RecordDecoder::new();
    let line = r#"{"event":"memory_read","key":"k"}"#;

    c.bench_function("decode_minimal_line", |b| {
        b.iter(|| decoder.decode(black_box(line)));
    });
}

fn bench_decode_malformed(c: &mut Criterion) {
    let decoder = RecordDecoder::new();
    let line = r#"{"event":"memory_read","key":"#;

    c.bench_function("decode_malformed_line", |b| {
        b.iter(|| decoder.decode(black_box(line)));
    });
}

fn bench_decode_long_preview(c: &mut Criterion) {
    let decoder = RecordDecoder::new();
    let long = "x".repeat(2000);
    let line = format!(r#"{{"event":"memory_read","key":"k","value_preview":"{long}"}}"#);

    c.bench_function("decode_long_preview", |b| {
        b.iter(|| decoder.decode(black_box(&line)));
    });
}

criterion_group!(
    benches,
    bench_decode_write,
    bench_decode_minimal,
    bench_decode_malformed,
    bench_decode_long_preview
);
criterion_main!(benches);
