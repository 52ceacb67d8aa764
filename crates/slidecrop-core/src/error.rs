// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for SlideCrop.

use thiserror::Error;

/// Top-level error type for all SlideCrop operations.
#[derive(Debug, Error)]
pub enum SlidecropError {
    // -- Document errors --
    #[error("no document is open")]
    NoDocument,

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("PDF renderer unavailable: {0}")]
    RendererUnavailable(String),

    #[error("page {index} out of range (document has {count} pages)")]
    PageOutOfRange { index: usize, count: usize },

    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- Capture errors --
    #[error("invalid capture region: {0}")]
    InvalidRegion(String),

    #[error("no capture regions recorded")]
    NoCaptures,

    #[error("no capture region recorded on the first page")]
    NoTemplateRegion,

    // -- Export --
    #[error("slide deck error: {0}")]
    SlideDeck(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SlidecropError>;
