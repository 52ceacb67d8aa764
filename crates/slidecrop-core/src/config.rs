// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use serde::{Deserialize, Serialize};

/// Which page's regions are applied to every page on export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemplatePolicy {
    /// Regions must be drawn on the first page.
    FirstPage,
    /// Use the lowest-numbered page that has any region.
    EarliestPage,
}

/// How exported images are laid out into slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportLayout {
    /// One slide per cropped region per page.
    SlidePerRegion,
    /// One slide per page, regions stacked top to bottom.
    SlidePerPage,
}

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Width in pixels the page preview is fitted to at 100% zoom.
    pub display_width: f64,
    /// Height of the preview viewport in pixels.
    pub viewport_height: f64,
    /// Multiplier applied per zoom-in / zoom-out step.
    pub zoom_step: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Regions narrower or shorter than this (in points) are treated as stray clicks.
    pub min_region_extent: f64,
    /// Render scale (pixels per point) used for exported images.
    pub export_scale: f64,
    /// Left/top offset of pictures on a slide.
    pub slide_offset_inches: f64,
    /// Pixel density used to convert image size to slide size at scale 1.
    pub pixels_per_inch: f64,
    /// Shrink pictures that would overflow the slide.
    pub fit_to_slide: bool,
    pub template_policy: TemplatePolicy,
    pub export_layout: ExportLayout,
    /// Directory containing the pdfium shared library, if not on the system path.
    pub pdfium_library_dir: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            display_width: 800.0,
            viewport_height: 1000.0,
            zoom_step: 1.25,
            min_zoom: 0.25,
            max_zoom: 4.0,
            min_region_extent: 2.0,
            export_scale: 2.0,
            slide_offset_inches: 1.0,
            pixels_per_inch: 96.0,
            fit_to_slide: true,
            template_policy: TemplatePolicy::FirstPage,
            export_layout: ExportLayout::SlidePerRegion,
            pdfium_library_dir: None,
        }
    }
}
