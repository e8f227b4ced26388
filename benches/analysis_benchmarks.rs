use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{DynamicImage, Rgba, RgbaImage};
use image_brightness::{
    analysis::{partition, relative_luminance_rec709, sum_segment},
    AnalyzerConfig, BrightnessAnalyzer,
};
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::runtime::Runtime;

const BENCH_WIDTH: u32 = 1920;
const BENCH_HEIGHT: u32 = 1080;

fn gradient_image() -> Arc<DynamicImage> {
    let image = RgbaImage::from_fn(BENCH_WIDTH, BENCH_HEIGHT, |x, y| {
        let value = ((x + y) % 256) as u8;
        Rgba([value, value / 2, 255 - value, 255])
    });
    Arc::new(DynamicImage::ImageRgba8(image))
}

fn benchmark_sequential(c: &mut Criterion) {
    let image = gradient_image();
    let analyzer = BrightnessAnalyzer::default();

    let mut group = c.benchmark_group("sequential");
    group.sample_size(20);

    group.bench_function("full_hd_rgba8", |b| {
        b.iter(|| analyzer.analyze_sequential(black_box(&*image)).unwrap());
    });

    group.bench_function("single_column", |b| {
        b.iter(|| {
            sum_segment(black_box(&*image), 0, 1, relative_luminance_rec709).unwrap()
        });
    });

    group.finish();
}

fn benchmark_parallel(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let image = gradient_image();

    let mut group = c.benchmark_group("parallel");
    group.sample_size(20);

    for splits in [2usize, 4, 8, 16] {
        let config = AnalyzerConfig::builder().parallelism(splits).build();
        let analyzer = BrightnessAnalyzer::new(config);

        group.bench_with_input(BenchmarkId::from_parameter(splits), &splits, |b, _| {
            b.iter(|| {
                rt.block_on(async { analyzer.analyze(Arc::clone(black_box(&image))).await.unwrap() })
            });
        });
    }

    group.finish();
}

fn benchmark_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition");

    for splits in [1usize, 64, 1024] {
        let split_count = NonZeroUsize::new(splits).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(splits), &split_count, |b, &n| {
            b.iter(|| partition(black_box(BENCH_WIDTH), n));
        });
    }

    group.finish();
}

criterion_group!(
    analysis_benches,
    benchmark_sequential,
    benchmark_parallel,
    benchmark_partition
);
criterion_main!(analysis_benches);
