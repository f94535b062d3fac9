use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image_tpc::{Attributes, Encoding, Header, Texture};

fn criterion_benchmark(c: &mut Criterion) {
    // Overestimate the data size to avoid errors.
    let header = Header {
        data_size: 512 * 512,
        unknown1: 1.0,
        width: 512,
        height: 512,
        encoding: Encoding::Rgba,
        mipmaps: 10,
    };
    let pixel_data = vec![0u8; 512 * 512 * 2];
    c.bench_function("decode_texture", |b| {
        b.iter(|| {
            Texture::decode(
                black_box(header),
                black_box(&pixel_data),
                black_box(Attributes::new()),
            )
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
