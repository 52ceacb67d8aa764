// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// SlideCrop core types shared across all crates: document-space geometry,
// the screen/document view transform, drag tracking, and the capture model.

pub mod capture;
pub mod config;
pub mod error;
pub mod geometry;
pub mod human_errors;
pub mod selection;
pub mod view;
pub mod viewer;

pub use capture::{CaptureProgress, CaptureRegion, CaptureSet, CaptureSlot};
pub use config::{AppConfig, ExportLayout, TemplatePolicy};
pub use error::SlidecropError;
pub use geometry::{DocPoint, DocRect, PageSize, PixelBox, ScreenPoint};
pub use selection::DragTracker;
pub use view::ViewTransform;
pub use viewer::ViewerState;
