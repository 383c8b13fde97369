use criterion::{criterion_group, criterion_main, Criterion};
use gauss5::{
    gaussian_blur_1x5_separable, gaussian_blur_5x5, gaussian_blur_5x5_expand, AccumulatorStrategy,
    Gauss5Params, GaussImage, GaussImageMut, PixelLayout, SeparablePrecision, ThreadingPolicy,
};

fn synthetic(width: u32, height: u32) -> Vec<u8> {
    let mut state = 0x2545_f491u32;
    (0..width as usize * height as usize * 3)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut c = c.benchmark_group("Gauss5");
    c.sample_size(10);

    let (width, height) = (1920u32, 1080u32);
    let data = synthetic(width, height);
    let src_image = GaussImage::borrow(&data, width, height, PixelLayout::Rgb);

    for strategy in AccumulatorStrategy::ALL {
        for (name, policy) in [
            ("single", ThreadingPolicy::Single),
            ("adaptive", ThreadingPolicy::Adaptive),
        ] {
            c.bench_function(format!("RGB 5x5 {strategy:?} {name}"), |b| {
                let mut dst_bytes = GaussImageMut::alloc(width, height, PixelLayout::Rgb);
                let params = Gauss5Params::new(strategy, policy);
                b.iter(|| {
                    gaussian_blur_5x5(&src_image, &mut dst_bytes, params).unwrap();
                })
            });
        }
    }

    c.bench_function("RGB 5x5 expand", |b| {
        let mut dst_bytes = GaussImageMut::alloc(width, height, PixelLayout::Rgb);
        b.iter(|| {
            gaussian_blur_5x5_expand(&src_image, &mut dst_bytes).unwrap();
        })
    });

    for precision in [SeparablePrecision::Integer, SeparablePrecision::Float] {
        c.bench_function(format!("RGB 1x5 separable {precision:?}"), |b| {
            let mut dst_bytes = GaussImageMut::alloc(width, height, PixelLayout::Rgb);
            b.iter(|| {
                gaussian_blur_1x5_separable(&src_image, &mut dst_bytes, precision).unwrap();
            })
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
