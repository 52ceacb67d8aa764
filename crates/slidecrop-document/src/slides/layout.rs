// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Picture placement on a slide, in EMU (English Metric Units).

use slidecrop_core::AppConfig;

/// 1 inch = 914400 EMU.
pub const EMU_PER_INCH: i64 = 914_400;

/// Default 4:3 slide, 10in x 7.5in.
pub const SLIDE_WIDTH_EMU: i64 = 9_144_000;
pub const SLIDE_HEIGHT_EMU: i64 = 6_858_000;

/// Vertical gap between stacked pictures.
const STACK_GAP_EMU: i64 = EMU_PER_INCH / 4;

/// Position and size of a picture on a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

/// Converts rendered pixel sizes into slide frames.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideGeometry {
    pub slide_width: i64,
    pub slide_height: i64,
    /// Left/top margin of the first picture.
    pub offset: i64,
    /// Pixels of the rendered image per slide inch.
    pub pixels_per_inch: f64,
    pub fit_to_slide: bool,
}

impl SlideGeometry {
    /// Geometry for images rendered at `config.export_scale`.
    ///
    /// A region renders to `points * export_scale` pixels; dividing by
    /// `pixels_per_inch * export_scale` gives the same on-slide size at any
    /// export resolution.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            slide_width: SLIDE_WIDTH_EMU,
            slide_height: SLIDE_HEIGHT_EMU,
            offset: inches_to_emu(config.slide_offset_inches),
            pixels_per_inch: (config.pixels_per_inch * config.export_scale).max(1.0),
            fit_to_slide: config.fit_to_slide,
        }
    }

    fn natural_size(&self, width_px: u32, height_px: u32) -> (i64, i64) {
        let to_emu = |px: u32| (px as f64 / self.pixels_per_inch * EMU_PER_INCH as f64).round() as i64;
        (to_emu(width_px).max(1), to_emu(height_px).max(1))
    }

    /// Area pictures may occupy when fitting: the slide minus the offset on every side.
    fn available(&self) -> (i64, i64) {
        let w = (self.slide_width - 2 * self.offset).max(EMU_PER_INCH);
        let h = (self.slide_height - 2 * self.offset).max(EMU_PER_INCH);
        (w, h)
    }

    /// Place one picture at the offset.
    pub fn place_single(&self, width_px: u32, height_px: u32) -> Frame {
        self.place_stacked(&[(width_px, height_px)])[0]
    }

    /// Place pictures top to bottom, all starting at the left offset.
    ///
    /// With `fit_to_slide` the whole stack shrinks by one common factor so it
    /// fits the available area and keeps every aspect ratio.
    pub fn place_stacked(&self, sizes: &[(u32, u32)]) -> Vec<Frame> {
        if sizes.is_empty() {
            return Vec::new();
        }
        let natural: Vec<(i64, i64)> = sizes
            .iter()
            .map(|&(w, h)| self.natural_size(w, h))
            .collect();

        let gaps = STACK_GAP_EMU * (natural.len() as i64 - 1);
        let total_w = natural.iter().map(|&(w, _)| w).max().unwrap_or(1);
        let total_h = natural.iter().map(|&(_, h)| h).sum::<i64>() + gaps;

        let factor = if self.fit_to_slide {
            let (avail_w, avail_h) = self.available();
            (avail_w as f64 / total_w as f64)
                .min(avail_h as f64 / total_h as f64)
                .min(1.0)
        } else {
            1.0
        };

        let mut y = self.offset;
        natural
            .into_iter()
            .map(|(w, h)| {
                let cx = ((w as f64 * factor).round() as i64).max(1);
                let cy = ((h as f64 * factor).round() as i64).max(1);
                let frame = Frame {
                    x: self.offset,
                    y,
                    cx,
                    cy,
                };
                y += cy + (STACK_GAP_EMU as f64 * factor).round() as i64;
                frame
            })
            .collect()
    }
}

pub fn inches_to_emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH as f64).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(fit: bool) -> SlideGeometry {
        SlideGeometry {
            slide_width: SLIDE_WIDTH_EMU,
            slide_height: SLIDE_HEIGHT_EMU,
            offset: EMU_PER_INCH,
            pixels_per_inch: 96.0,
            fit_to_slide: fit,
        }
    }

    #[test]
    fn natural_size_is_pixels_over_ppi() {
        // 192px at 96 ppi is two inches.
        let frame = geometry(false).place_single(192, 96);
        assert_eq!(
            frame,
            Frame { x: EMU_PER_INCH, y: EMU_PER_INCH, cx: 2 * EMU_PER_INCH, cy: EMU_PER_INCH }
        );
    }

    #[test]
    fn oversized_picture_shrinks_to_fit() {
        // 16in x 4in must fit in 8in x 5.5in: limited by width, factor 0.5.
        let frame = geometry(true).place_single(16 * 96, 4 * 96);
        assert_eq!(frame.cx, 8 * EMU_PER_INCH);
        assert_eq!(frame.cy, 2 * EMU_PER_INCH);
    }

    #[test]
    fn small_picture_is_not_enlarged() {
        let frame = geometry(true).place_single(96, 96);
        assert_eq!(frame.cx, EMU_PER_INCH);
    }

    #[test]
    fn stacked_pictures_do_not_overlap() {
        let frames = geometry(true).place_stacked(&[(384, 192), (384, 192)]);
        assert_eq!(frames.len(), 2);
        assert!(frames[1].y >= frames[0].y + frames[0].cy);
        assert!(frames[1].y + frames[1].cy <= SLIDE_HEIGHT_EMU - EMU_PER_INCH);
    }

    #[test]
    fn export_scale_does_not_change_slide_size() {
        let config = AppConfig {
            export_scale: 3.0,
            ..AppConfig::default()
        };
        let geometry = SlideGeometry::from_config(&config);
        // A 96pt region rendered at 3x is 288px: still one inch on the slide.
        assert_eq!(geometry.place_single(288, 288).cx, EMU_PER_INCH);
    }
}
