//! Benchmarks for the avatar pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, ImageBuffer, Rgb, RgbImage};

use retro_avatar::registry;
use retro_avatar::render::{encode_png, pixel_grid, quantize_buffer, render_avatar};

/// A photo-like gradient with plenty of distinct colours.
fn gradient(width: u32, height: u32) -> RgbImage {
    ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([
            ((x * 255) / width.max(1)) as u8,
            ((y * 255) / height.max(1)) as u8,
            (((x + y) * 3) % 256) as u8,
        ])
    })
}

// -- Quantization benchmarks --

fn bench_quantization(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantization");

    // 128x128 is the largest grid the pipeline quantizes
    let grid = gradient(128, 128);

    for style in ["1bit", "2bit", "4bit", "8bit", "16bit", "notion"] {
        let palette = registry::style(style).unwrap();
        group.bench_function(format!("quantize_{}", style), |b| {
            b.iter(|| {
                let mut pixels = grid.as_raw().clone();
                quantize_buffer(black_box(&mut pixels), 128, 128, palette).unwrap();
                pixels
            })
        });
    }

    group.finish();
}

// -- Pipeline benchmarks --

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    let photo = DynamicImage::ImageRgb8(gradient(1024, 768));
    let nes = registry::style("8bit").unwrap();
    let notion = registry::style("notion").unwrap();

    group.bench_function("pixel_grid_32", |b| {
        b.iter(|| pixel_grid(black_box(&photo), 32))
    });

    group.bench_function("render_default", |b| {
        b.iter(|| render_avatar(black_box(&photo), nes, 32, 512).unwrap())
    });

    group.bench_function("render_smooth", |b| {
        b.iter(|| render_avatar(black_box(&photo), notion, 32, 512).unwrap())
    });

    let avatar = render_avatar(&photo, nes, 32, 512).unwrap();
    group.bench_function("encode_png_512", |b| {
        b.iter(|| encode_png(black_box(&avatar)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_quantization, bench_pipeline);
criterion_main!(benches);
