// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page rasterisation.
//
// `PageRenderer` is the seam between the capture/export logic and the PDF
// engine. `PdfiumRenderer` is the production implementation on top of
// `pdfium-render`; tests substitute a synthetic renderer.

use image::{DynamicImage, RgbaImage};
use pdfium_render::prelude::*;
use slidecrop_core::error::{Result, SlidecropError};
use slidecrop_core::{DocRect, PageSize};
use tracing::{debug, info, instrument, warn};

use crate::image::processor::ImageProcessor;

/// Renders pages of one open document to bitmaps.
pub trait PageRenderer {
    fn page_count(&self) -> usize;

    /// Visible page size in points.
    fn page_size(&self, index: usize) -> Result<PageSize>;

    /// Render a whole page at `scale` pixels per point.
    fn render_page(&self, index: usize, scale: f64) -> Result<DynamicImage>;

    /// Render only `rect` (document space) of page `index` at `scale`.
    ///
    /// The rectangle is clipped to the page first; `Ok(None)` means nothing of
    /// it lies on this page.
    fn render_region(
        &self,
        index: usize,
        rect: &DocRect,
        scale: f64,
    ) -> Result<Option<DynamicImage>> {
        let page = self.page_size(index)?;
        let Some(clipped) = rect.clip_to_page(&page) else {
            return Ok(None);
        };

        let rendered = self.render_page(index, scale)?;
        Ok(ImageProcessor::from_dynamic(rendered)
            .crop(clipped.to_pixel_box(scale))
            .map(ImageProcessor::into_dynamic))
    }
}

/// Bind to the pdfium shared library.
///
/// Tries `library_dir` when given, then `./lib`, then the system library.
pub fn bind_pdfium(library_dir: Option<&str>) -> Result<Pdfium> {
    let mut candidates: Vec<&str> = Vec::new();
    if let Some(dir) = library_dir {
        candidates.push(dir);
    }
    candidates.push("./lib");

    for dir in candidates {
        let lib_name = Pdfium::pdfium_platform_library_name_at_path(dir);
        match Pdfium::bind_to_library(&lib_name) {
            Ok(bindings) => {
                info!(path = %lib_name.display(), "bound to pdfium");
                return Ok(Pdfium::new(bindings));
            }
            Err(err) => debug!(path = %lib_name.display(), %err, "pdfium not found here"),
        }
    }

    match Pdfium::bind_to_system_library() {
        Ok(bindings) => {
            info!("bound to system pdfium");
            Ok(Pdfium::new(bindings))
        }
        Err(err) => {
            warn!(%err, "no pdfium library available");
            Err(SlidecropError::RendererUnavailable(err.to_string()))
        }
    }
}

/// pdfium-backed renderer over a document held in memory.
pub struct PdfiumRenderer {
    pdfium: Pdfium,
    bytes: Vec<u8>,
    sizes: Vec<PageSize>,
}

impl PdfiumRenderer {
    /// Load `bytes` and record every page's size.
    #[instrument(skip_all, fields(bytes_len = bytes.len()))]
    pub fn new(pdfium: Pdfium, bytes: Vec<u8>) -> Result<Self> {
        let sizes = {
            let document = pdfium
                .load_pdf_from_byte_slice(&bytes, None)
                .map_err(pdf_err)?;
            document
                .pages()
                .iter()
                .map(|page| PageSize::new(page.width().value as f64, page.height().value as f64))
                .collect::<Vec<_>>()
        };
        debug!(pages = sizes.len(), "document ready for rendering");

        Ok(Self {
            pdfium,
            bytes,
            sizes,
        })
    }

    fn document(&self) -> Result<PdfDocument<'_>> {
        self.pdfium
            .load_pdf_from_byte_slice(&self.bytes, None)
            .map_err(pdf_err)
    }
}

impl PageRenderer for PdfiumRenderer {
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

    #[instrument(skip(self))]
    fn render_page(&self, index: usize, scale: f64) -> Result<DynamicImage> {
        let count = self.sizes.len();
        let out_of_range = SlidecropError::PageOutOfRange { index, count };
        if index >= count {
            return Err(out_of_range);
        }

        let document = self.document()?;
        let page_index: PdfPageIndex = index.try_into().map_err(|_| out_of_range)?;
        let page = document.pages().get(page_index).map_err(pdf_err)?;

        let config = PdfRenderConfig::new().scale_page_by_factor(scale as f32);
        let bitmap = page.render_with_config(&config).map_err(pdf_err)?;

        let width = bitmap.width() as u32;
        let height = bitmap.height() as u32;
        let rgba = RgbaImage::from_raw(width, height, bitmap.as_rgba_bytes().to_vec())
            .ok_or_else(|| {
                SlidecropError::ImageError(format!(
                    "bitmap of {width}x{height} did not match its buffer"
                ))
            })?;

        debug!(width, height, "page rendered");
        Ok(DynamicImage::ImageRgba8(rgba))
    }
}

fn pdf_err(err: PdfiumError) -> SlidecropError {
    SlidecropError::PdfError(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::FakeRenderer;
    use image::GenericImageView;

    #[test]
    fn region_is_cropped_at_scale() {
        let renderer = FakeRenderer::new(&[(200.0, 100.0)]);
        let rect = DocRect { x0: 10.0, y0: 20.0, x1: 60.0, y1: 45.0 };
        let img = renderer.render_region(0, &rect, 2.0).unwrap().unwrap();
        assert_eq!(img.dimensions(), (100, 50));
        assert_eq!(img.get_pixel(0, 0), FakeRenderer::colour(0));
    }

    #[test]
    fn region_overhanging_page_is_clipped() {
        let renderer = FakeRenderer::new(&[(100.0, 100.0)]);
        let rect = DocRect { x0: 80.0, y0: 80.0, x1: 150.0, y1: 150.0 };
        let img = renderer.render_region(0, &rect, 1.0).unwrap().unwrap();
        assert_eq!(img.dimensions(), (20, 20));
    }

    #[test]
    fn region_off_page_renders_nothing() {
        let renderer = FakeRenderer::new(&[(100.0, 100.0)]);
        let rect = DocRect { x0: 120.0, y0: 0.0, x1: 150.0, y1: 50.0 };
        assert!(renderer.render_region(0, &rect, 1.0).unwrap().is_none());
    }

    #[test]
    fn missing_page_is_an_error() {
        let renderer = FakeRenderer::new(&[(100.0, 100.0)]);
        let rect = DocRect { x0: 0.0, y0: 0.0, x1: 10.0, y1: 10.0 };
        assert!(matches!(
            renderer.render_region(3, &rect, 1.0),
            Err(SlidecropError::PageOutOfRange { index: 3, count: 1 })
        ));
    }
}
