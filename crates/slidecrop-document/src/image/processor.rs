// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster handling for rendered pages: cropping to a pixel box and encoding
// to PNG for slides or to a data URI for the webview preview.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, ImageFormat};
use slidecrop_core::PixelBox;
use slidecrop_core::error::SlidecropError;
use tracing::{debug, instrument};

/// Owns one rendered bitmap.
///
/// ```ignore
/// let slide_png = ImageProcessor::from_dynamic(page)
///     .crop(region.to_pixel_box(scale))
///     .map(|crop| crop.to_png_bytes());
/// ```
pub struct ImageProcessor {
    bitmap: DynamicImage,
}

impl ImageProcessor {
    pub fn from_dynamic(bitmap: DynamicImage) -> Self {
        Self { bitmap }
    }

    /// Decode PNG (or any format `image` recognises).
    pub fn from_bytes(encoded: &[u8]) -> Result<Self, SlidecropError> {
        image::load_from_memory(encoded)
            .map(Self::from_dynamic)
            .map_err(|err| SlidecropError::ImageError(format!("cannot decode image: {err}")))
    }

    pub fn width(&self) -> u32 {
        self.bitmap.width()
    }

    pub fn height(&self) -> u32 {
        self.bitmap.height()
    }

    pub fn into_dynamic(self) -> DynamicImage {
        self.bitmap
    }

    /// Cut `area` out of the bitmap, clamped to its edges.
    ///
    /// `None` when the box lies entirely outside the bitmap or clamps to zero size.
    #[instrument(skip(self), fields(bitmap_w = self.width(), bitmap_h = self.height()))]
    pub fn crop(self, area: PixelBox) -> Option<Self> {
        let visible = area.clamp_to(self.width(), self.height())?;
        debug!(?visible, "cropping");
        let bitmap = self
            .bitmap
            .crop_imm(visible.x, visible.y, visible.width, visible.height);
        Some(Self { bitmap })
    }

    pub fn to_png_bytes(&self) -> Result<Vec<u8>, SlidecropError> {
        let mut png = Cursor::new(Vec::new());
        self.bitmap
            .write_to(&mut png, ImageFormat::Png)
            .map_err(|err| SlidecropError::ImageError(format!("PNG encoding failed: {err}")))?;
        Ok(png.into_inner())
    }

    /// `data:image/png;base64,...` for an `<img src>`.
    pub fn to_data_uri(&self) -> Result<String, SlidecropError> {
        Ok(format!(
            "data:image/png;base64,{}",
            STANDARD.encode(self.to_png_bytes()?)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};

    fn gradient(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(w, h, |x, y| {
            Rgba([x as u8, y as u8, 0, 255])
        }))
    }

    fn area(x: u32, y: u32, width: u32, height: u32) -> PixelBox {
        PixelBox {
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn crop_keeps_the_selected_pixels() {
        let out = ImageProcessor::from_dynamic(gradient(50, 40))
            .crop(area(10, 5, 20, 10))
            .unwrap()
            .into_dynamic();
        assert_eq!(out.dimensions(), (20, 10));
        assert_eq!(out.get_pixel(0, 0), Rgba([10, 5, 0, 255]));
    }

    #[test]
    fn crop_is_clamped_to_bounds() {
        let out = ImageProcessor::from_dynamic(gradient(50, 40))
            .crop(area(30, 30, 100, 100))
            .unwrap();
        assert_eq!((out.width(), out.height()), (20, 10));
    }

    #[test]
    fn crop_outside_bitmap_is_none() {
        let out = ImageProcessor::from_dynamic(gradient(50, 40)).crop(area(60, 0, 10, 10));
        assert!(out.is_none());
    }

    #[test]
    fn png_bytes_decode_back_to_same_size() {
        let png = ImageProcessor::from_dynamic(gradient(17, 9))
            .to_png_bytes()
            .unwrap();
        assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
        let decoded = ImageProcessor::from_bytes(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (17, 9));
    }

    #[test]
    fn garbage_bytes_are_an_image_error() {
        assert!(matches!(
            ImageProcessor::from_bytes(b"not an image"),
            Err(SlidecropError::ImageError(_))
        ));
    }

    #[test]
    fn data_uri_has_png_prefix() {
        let uri = ImageProcessor::from_dynamic(gradient(2, 2))
            .to_data_uri()
            .unwrap();
        assert!(uri.starts_with("data:image/png;base64,iVBOR"));
    }
}
