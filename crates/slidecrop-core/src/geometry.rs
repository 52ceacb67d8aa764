// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Geometric primitives in document space (PDF points, top-left origin, y down)
// and screen space (viewport pixels).

/// A point in document space, measured in PDF points.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DocPoint {
    pub x: f64,
    pub y: f64,
}

impl DocPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point in viewport space, measured in on-screen pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The whole page as a rectangle.
    pub fn bounds(&self) -> DocRect {
        DocRect {
            x0: 0.0,
            y0: 0.0,
            x1: self.width,
            y1: self.height,
        }
    }
}

/// A normalized rectangle in document space (`x0 < x1`, `y0 < y1` unless empty).
///
/// Construct through [`DocRect::from_corners`] so the ordering invariant holds
/// regardless of drag direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl DocRect {
    /// Build a rectangle from any two opposite corners.
    pub fn from_corners(a: DocPoint, b: DocPoint) -> Self {
        Self {
            x0: a.x.min(b.x),
            y0: a.y.min(b.y),
            x1: a.x.max(b.x),
            y1: a.y.max(b.y),
        }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// True when the rectangle covers no area.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Intersection with another rectangle, or `None` when they do not overlap.
    pub fn intersect(&self, other: &DocRect) -> Option<DocRect> {
        let clipped = DocRect {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        };
        if clipped.is_empty() { None } else { Some(clipped) }
    }

    /// Clip to the bounds of a page.
    pub fn clip_to_page(&self, page: &PageSize) -> Option<DocRect> {
        self.intersect(&page.bounds())
    }

    /// Multiply every coordinate by `factor`.
    pub fn scaled(&self, factor: f64) -> DocRect {
        DocRect {
            x0: self.x0 * factor,
            y0: self.y0 * factor,
            x1: self.x1 * factor,
            y1: self.y1 * factor,
        }
    }

    /// Integer pixel box covering this rectangle when the page is rendered at
    /// `scale` pixels per point. The origin is floored and the far edge ceiled
    /// so no selected content is lost to rounding.
    pub fn to_pixel_box(&self, scale: f64) -> PixelBox {
        let s = self.scaled(scale);
        let x = s.x0.floor().max(0.0);
        let y = s.y0.floor().max(0.0);
        let right = s.x1.ceil().max(x);
        let bottom = s.y1.ceil().max(y);
        PixelBox {
            x: x as u32,
            y: y as u32,
            width: (right - x) as u32,
            height: (bottom - y) as u32,
        }
    }
}

/// A rectangle in raster pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelBox {
    /// Clamp to an image of `width` x `height`. Returns `None` if nothing is left.
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<PixelBox> {
        if self.x >= width || self.y >= height {
            return None;
        }
        let w = self.width.min(width - self.x);
        let h = self.height.min(height - self.y);
        if w == 0 || h == 0 {
            return None;
        }
        Some(PixelBox {
            x: self.x,
            y: self.y,
            width: w,
            height: h,
        })
    }
}
