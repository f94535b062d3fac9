use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image_tpc::swizzle::deswizzle_rgba8;

fn criterion_benchmark(c: &mut Criterion) {
    let data = vec![0u8; 512 * 512 * 4];
    c.bench_function("deswizzle_rgba8", |b| {
        b.iter(|| deswizzle_rgba8(black_box(512), black_box(512), black_box(&data)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
