// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Test fixtures: tiny PDFs built with lopdf and a fake page renderer.

use image::{DynamicImage, Rgba, RgbaImage};
use lopdf::{Document, Object, dictionary};
use slidecrop_core::PageSize;
use slidecrop_core::error::{Result, SlidecropError};

use crate::pdf::render::PageRenderer;

/// One page of a fixture PDF.
#[derive(Clone, Copy)]
pub struct PageFixture {
    size: Option<(i64, i64)>,
    rotate: Option<i64>,
}

impl PageFixture {
    pub fn new(width: i64, height: i64) -> Self {
        Self {
            size: Some((width, height)),
            rotate: None,
        }
    }

    /// A page without its own MediaBox; it inherits A4 from the page tree.
    pub fn inherited() -> Self {
        Self {
            size: None,
            rotate: None,
        }
    }

    pub fn rotated(mut self, degrees: i64) -> Self {
        self.rotate = Some(degrees);
        self
    }
}

/// Build a PDF with the given pages and return its bytes.
pub fn sample_pdf(pages: &[PageFixture]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for fixture in pages {
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
        };
        if let Some((w, h)) = fixture.size {
            page.set(
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(w),
                    Object::Integer(h),
                ]),
            );
        }
        if let Some(degrees) = fixture.rotate {
            page.set("Rotate", Object::Integer(degrees));
        }
        kids.push(Object::Reference(doc.add_object(page)));
    }

    let tree = dictionary! {
        "Type" => "Pages",
        "Kids" => Object::Array(kids),
        "Count" => Object::Integer(pages.len() as i64),
        "MediaBox" => Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(595),
            Object::Integer(842),
        ]),
    };
    doc.objects.insert(pages_id, Object::Dictionary(tree));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut out = Vec::new();
    doc.save_to(&mut out).expect("serialise fixture PDF");
    out
}

/// Renders each page as a flat colour so crops can be checked by size and pixel.
pub struct FakeRenderer {
    pub sizes: Vec<PageSize>,
}

impl FakeRenderer {
    pub fn new(sizes: &[(f64, f64)]) -> Self {
        Self {
            sizes: sizes.iter().map(|&(w, h)| PageSize::new(w, h)).collect(),
        }
    }

    /// Colour used for page `index`.
    pub fn colour(index: usize) -> Rgba<u8> {
        Rgba([(index * 40 % 256) as u8, 100, 200, 255])
    }
}

impl PageRenderer for FakeRenderer {
    fn page_count(&self) -> usize {
        self.sizes.len()
    }

    fn page_size(&self, index: usize) -> Result<PageSize> {
        self.sizes
            .get(index)
            .copied()
            .ok_or(SlidecropError::PageOutOfRange {
                index,
                count: self.sizes.len(),
            })
    }

    fn render_page(&self, index: usize, scale: f64) -> Result<DynamicImage> {
        let size = self.page_size(index)?;
        let w = (size.width * scale).round() as u32;
        let h = (size.height * scale).round() as u32;
        Ok(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            w,
            h,
            Self::colour(index),
        )))
    }
}
