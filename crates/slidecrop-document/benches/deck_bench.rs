// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for slide deck assembly: encoding region crops and
// serialising a twenty-slide package.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgba, RgbaImage};

use slidecrop_core::AppConfig;
use slidecrop_document::{ImageProcessor, SlideDeck, SlideGeometry};

/// A 400x300 crop with some structure so PNG encoding is not trivial.
fn sample_crop() -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(400, 300, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x ^ y) % 256) as u8, 255])
    }))
}

fn bench_png_encode(c: &mut Criterion) {
    let crop = sample_crop();
    c.bench_function("png_encode (400x300)", |b| {
        b.iter(|| {
            let png = ImageProcessor::from_dynamic(black_box(crop.clone())).to_png_bytes();
            black_box(png.ok());
        });
    });
}

fn bench_deck_to_bytes(c: &mut Criterion) {
    let png = match ImageProcessor::from_dynamic(sample_crop()).to_png_bytes() {
        Ok(png) => png,
        Err(err) => panic!("sample crop failed to encode: {err}"),
    };
    let geometry = SlideGeometry::from_config(&AppConfig::default());
    let mut deck = SlideDeck::new("bench", geometry);
    for _ in 0..20 {
        deck.add_picture_slide(png.clone(), 400, 300);
    }

    c.bench_function("deck_to_bytes (20 slides)", |b| {
        b.iter(|| black_box(deck.to_bytes().ok()));
    });
}

criterion_group!(benches, bench_png_encode, bench_deck_to_bytes);
criterion_main!(benches);
