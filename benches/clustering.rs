use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::prelude::*;
use swatch::{ColorClusterer, Init, PixelExtractor};

fn bench_quantize(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantize");

    // Synthetic 128x128 RGBA image
    let mut rng = StdRng::seed_from_u64(42);
    let (w, h) = (128u32, 128u32);
    let raw: Vec<u8> = (0..w * h * 4).map(|_| rng.random::<u8>()).collect();
    let pixels = PixelExtractor::extract(&raw, w, h, 4).unwrap();

    group.bench_function("cluster_128x128_rgba_k8_plusplus", |b| {
        b.iter(|| {
            let clusterer = ColorClusterer::new(8).with_max_iter(10).with_seed(42);
            clusterer.cluster(black_box(&pixels)).unwrap();
        })
    });

    group.bench_function("cluster_128x128_rgba_k8_random", |b| {
        b.iter(|| {
            let clusterer = ColorClusterer::new(8)
                .with_init(Init::Random)
                .with_max_iter(10)
                .with_seed(42);
            clusterer.cluster(black_box(&pixels)).unwrap();
        })
    });

    group.finish();
}

criterion_group!(benches, bench_quantize);
criterion_main!(benches);
