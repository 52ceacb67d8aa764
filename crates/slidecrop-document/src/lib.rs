// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// slidecrop-document: document processing for SlideCrop.
//
// Provides PDF inspection and page rendering, image cropping and encoding,
// a PowerPoint (.pptx) writer, and the export pipeline that applies the
// captured regions to every page.

pub mod export;
pub mod image;
pub mod pdf;
pub mod slides;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export the primary structs so callers can use `slidecrop_document::PdfReader` etc.
pub use export::{ExportReport, Exporter, SkippedRegion};
pub use crate::image::processor::ImageProcessor;
pub use pdf::reader::PdfReader;
pub use pdf::render::{PageRenderer, PdfiumRenderer};
pub use slides::deck::SlideDeck;
pub use slides::layout::{Frame, SlideGeometry};
