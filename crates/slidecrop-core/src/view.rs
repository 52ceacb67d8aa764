// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Screen <-> document coordinate mapping for a zoomed and panned page preview.
//
// screen = doc * scale - pan
// doc    = (screen + pan) / scale
//
// where scale = base_scale * zoom and base_scale fits the page width to the
// configured display width. Stored capture rectangles are always in document
// space, so zoom and pan only ever change their projection.

use crate::config::AppConfig;
use crate::geometry::{DocPoint, DocRect, PageSize, ScreenPoint};

#[derive(Debug, Clone, PartialEq)]
pub struct ViewTransform {
    page: PageSize,
    display_width: f64,
    base_scale: f64,
    zoom: f64,
    pan: ScreenPoint,
    viewport_width: f64,
    viewport_height: f64,
    zoom_step: f64,
    min_zoom: f64,
    max_zoom: f64,
}

impl ViewTransform {
    /// Fit `page` to the configured display width at 100% zoom.
    pub fn new(page: PageSize, config: &AppConfig) -> Self {
        let mut view = Self {
            page,
            display_width: config.display_width,
            base_scale: fit_scale(config.display_width, page.width),
            zoom: 1.0,
            pan: ScreenPoint::default(),
            viewport_width: config.display_width,
            viewport_height: config.viewport_height,
            zoom_step: config.zoom_step.max(1.01),
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom.max(config.min_zoom),
        };
        view.zoom = view.clamp_zoom(1.0);
        view
    }

    /// Rebind to another page, keeping the zoom level.
    pub fn for_page(&self, page: PageSize) -> Self {
        let mut view = self.clone();
        view.page = page;
        view.base_scale = fit_scale(self.display_width, page.width);
        view.clamp_pan();
        view
    }

    // -- Accessors ------------------------------------------------------------

    pub fn page(&self) -> PageSize {
        self.page
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> ScreenPoint {
        self.pan
    }

    /// Pixels per document point.
    pub fn scale(&self) -> f64 {
        self.base_scale * self.zoom
    }

    /// Viewport size in pixels (width, height).
    pub fn viewport(&self) -> (f64, f64) {
        (self.viewport_width, self.viewport_height)
    }

    /// Size of the rendered page image in pixels.
    pub fn content_size(&self) -> (f64, f64) {
        (self.page.width * self.scale(), self.page.height * self.scale())
    }

    /// Zoom level as a rounded percentage for display.
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom * 100.0).round() as u32
    }

    // -- Mapping --------------------------------------------------------------

    pub fn screen_to_doc(&self, p: ScreenPoint) -> DocPoint {
        let s = self.scale();
        DocPoint::new((p.x + self.pan.x) / s, (p.y + self.pan.y) / s)
    }

    pub fn doc_to_screen(&self, p: DocPoint) -> ScreenPoint {
        let s = self.scale();
        ScreenPoint::new(p.x * s - self.pan.x, p.y * s - self.pan.y)
    }

    /// Map a screen-space drag to a normalized document rectangle.
    pub fn screen_rect_to_doc(&self, a: ScreenPoint, b: ScreenPoint) -> DocRect {
        DocRect::from_corners(self.screen_to_doc(a), self.screen_to_doc(b))
    }

    /// Project a document rectangle to its top-left and bottom-right screen corners.
    pub fn doc_rect_to_screen(&self, r: &DocRect) -> (ScreenPoint, ScreenPoint) {
        (
            self.doc_to_screen(DocPoint::new(r.x0, r.y0)),
            self.doc_to_screen(DocPoint::new(r.x1, r.y1)),
        )
    }

    // -- Zoom and pan ---------------------------------------------------------

    /// Set the zoom level, keeping the document point under `anchor` fixed.
    pub fn set_zoom(&mut self, zoom: f64, anchor: ScreenPoint) {
        let pinned = self.screen_to_doc(anchor);
        self.zoom = self.clamp_zoom(zoom);
        let s = self.scale();
        self.pan = ScreenPoint::new(pinned.x * s - anchor.x, pinned.y * s - anchor.y);
        self.clamp_pan();
    }

    pub fn zoom_in(&mut self) {
        let z = self.zoom * self.zoom_step;
        self.set_zoom(z, self.viewport_centre());
    }

    pub fn zoom_out(&mut self) {
        let z = self.zoom / self.zoom_step;
        self.set_zoom(z, self.viewport_centre());
    }

    pub fn reset_zoom(&mut self) {
        self.set_zoom(1.0, self.viewport_centre());
    }

    /// Scroll the content by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan.x += dx;
        self.pan.y += dy;
        self.clamp_pan();
    }

    fn viewport_centre(&self) -> ScreenPoint {
        ScreenPoint::new(self.viewport_width / 2.0, self.viewport_height / 2.0)
    }

    fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    fn clamp_pan(&mut self) {
        let (content_w, content_h) = self.content_size();
        let max_x = (content_w - self.viewport_width).max(0.0);
        let max_y = (content_h - self.viewport_height).max(0.0);
        self.pan.x = self.pan.x.clamp(0.0, max_x);
        self.pan.y = self.pan.y.clamp(0.0, max_y);
    }
}

fn fit_scale(display_width: f64, page_width: f64) -> f64 {
    if page_width > 0.0 && display_width > 0.0 {
        display_width / page_width
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn letter() -> ViewTransform {
        // 612pt wide fits 800px at scale 800/612.
        ViewTransform::new(PageSize::new(612.0, 792.0), &AppConfig::default())
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn base_scale_fits_display_width() {
        let view = letter();
        assert!((view.scale() - 800.0 / 612.0).abs() < EPS);
        assert!(close(view.content_size().0, 800.0));
    }

    #[test]
    fn screen_doc_round_trip_under_zoom_and_pan() {
        let mut view = letter();
        view.set_zoom(2.0, ScreenPoint::new(400.0, 300.0));
        view.pan_by(35.0, 120.0);

        let doc = DocPoint::new(123.4, 456.7);
        let back = view.screen_to_doc(view.doc_to_screen(doc));
        assert!(close(back.x, doc.x) && close(back.y, doc.y));
    }

    #[test]
    fn drag_maps_to_same_doc_rect_at_different_zoom() {
        let mut view = letter();
        let target = DocRect { x0: 50.0, y0: 60.0, x1: 300.0, y1: 200.0 };

        let (a, b) = view.doc_rect_to_screen(&target);
        let at_100 = view.screen_rect_to_doc(b, a);

        view.set_zoom(3.0, ScreenPoint::new(100.0, 100.0));
        let (a, b) = view.doc_rect_to_screen(&target);
        let at_300 = view.screen_rect_to_doc(a, b);

        for (l, r) in [
            (at_100.x0, at_300.x0),
            (at_100.y0, at_300.y0),
            (at_100.x1, at_300.x1),
            (at_100.y1, at_300.y1),
        ] {
            assert!(close(l, r));
        }
        assert!(close(at_300.x0, 50.0) && close(at_300.y1, 200.0));
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let mut view = letter();
        let anchor = ScreenPoint::new(400.0, 500.0);
        let before = view.screen_to_doc(anchor);
        view.set_zoom(2.0, anchor);
        let after = view.screen_to_doc(anchor);
        assert!(close(before.x, after.x) && close(before.y, after.y));
    }

    #[test]
    fn zoom_is_clamped() {
        let mut view = letter();
        for _ in 0..50 {
            view.zoom_in();
        }
        assert_eq!(view.zoom(), 4.0);
        for _ in 0..50 {
            view.zoom_out();
        }
        assert_eq!(view.zoom(), 0.25);
        view.reset_zoom();
        assert_eq!(view.zoom_percent(), 100);
    }

    #[test]
    fn pan_is_clamped_to_content() {
        let mut view = letter();
        // At 100% the page is 800 x ~1035 in an 800 x 1000 viewport.
        view.pan_by(500.0, 500.0);
        assert_eq!(view.pan().x, 0.0);
        let (_, content_h) = view.content_size();
        assert!(close(view.pan().y, content_h - 1000.0));

        view.pan_by(-10_000.0, -10_000.0);
        assert_eq!(view.pan(), ScreenPoint::new(0.0, 0.0));
    }

    #[test]
    fn for_page_keeps_zoom_and_refits_width() {
        let mut view = letter();
        view.set_zoom(2.0, ScreenPoint::new(0.0, 0.0));
        let a4 = view.for_page(PageSize::new(595.0, 842.0));
        assert_eq!(a4.zoom(), 2.0);
        assert!((a4.scale() - 2.0 * 800.0 / 595.0).abs() < EPS);
    }
}
