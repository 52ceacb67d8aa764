// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the status line.
//
// Every technical error is mapped to plain English with a clear suggestion.
// Severity drives the colour the UI uses.

use crate::error::SlidecropError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Worth trying again as-is (file locked, disk busy).
    Transient,
    /// User must do something first (draw a region, pick another page).
    ActionRequired,
    /// Retrying won't help: damaged file or missing renderer.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary.
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    pub retriable: bool,
    pub severity: Severity,
}

impl HumanError {
    fn new(message: &str, suggestion: impl Into<String>, retriable: bool, severity: Severity) -> Self {
        Self {
            message: message.into(),
            suggestion: suggestion.into(),
            retriable,
            severity,
        }
    }

    /// Single-line form for the status bar.
    pub fn status_line(&self) -> String {
        format!("{} {}", self.message, self.suggestion)
    }
}

/// Convert a `SlidecropError` into a `HumanError`.
pub fn humanize_error(err: &SlidecropError) -> HumanError {
    match err {
        SlidecropError::NoDocument => HumanError::new(
            "No PDF is open.",
            "Choose Open PDF first.",
            false,
            Severity::ActionRequired,
        ),

        SlidecropError::PdfError(_) => HumanError::new(
            "There's a problem with this PDF file.",
            "The file may be damaged or password-protected. Try a different file.",
            false,
            Severity::Permanent,
        ),

        SlidecropError::RendererUnavailable(_) => HumanError::new(
            "The PDF renderer could not be loaded.",
            "Install pdfium or set its folder in Settings, then restart.",
            false,
            Severity::Permanent,
        ),

        SlidecropError::PageOutOfRange { count, .. } => HumanError::new(
            "That page doesn't exist.",
            format!("This document has {count} pages."),
            false,
            Severity::ActionRequired,
        ),

        SlidecropError::ImageError(_) => HumanError::new(
            "A page image couldn't be produced.",
            "Try a lower export scale in Settings.",
            true,
            Severity::Transient,
        ),

        SlidecropError::InvalidRegion(detail) => HumanError::new(
            "That selection can't be used.",
            format!("Drag a larger box inside the page. ({detail})"),
            false,
            Severity::ActionRequired,
        ),

        SlidecropError::NoCaptures => HumanError::new(
            "No region selected.",
            "Drag a box on the page to choose what to capture.",
            false,
            Severity::ActionRequired,
        ),

        SlidecropError::NoTemplateRegion => HumanError::new(
            "No region on the first page.",
            "Go to page 1 and drag a box there; it is applied to every page.",
            false,
            Severity::ActionRequired,
        ),

        SlidecropError::SlideDeck(_) => HumanError::new(
            "The slide deck couldn't be written.",
            "Try saving again to a different folder.",
            true,
            Severity::Transient,
        ),

        SlidecropError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::NotFound => HumanError::new(
                "The file couldn't be found.",
                "It may have been moved or deleted. Try choosing the file again.",
                false,
                Severity::ActionRequired,
            ),
            std::io::ErrorKind::PermissionDenied => HumanError::new(
                "The app doesn't have permission to use that file.",
                "Check the file permissions, or choose a different location.",
                false,
                Severity::ActionRequired,
            ),
            _ => HumanError::new(
                "There was a problem reading or writing a file.",
                "Try again. If this keeps happening, your disk may be full.",
                true,
                Severity::Transient,
            ),
        },

        SlidecropError::Serialization(_) => HumanError::new(
            "The settings file couldn't be read.",
            "Default settings are being used.",
            false,
            Severity::Permanent,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_first_page_region_is_action_required() {
        let human = humanize_error(&SlidecropError::NoTemplateRegion);
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(!human.retriable);
        assert!(human.status_line().contains("first page"));
    }

    #[test]
    fn renderer_missing_is_permanent() {
        let human = humanize_error(&SlidecropError::RendererUnavailable("dlopen".into()));
        assert_eq!(human.severity, Severity::Permanent);
    }

    #[test]
    fn not_found_io_is_action_required() {
        let err = SlidecropError::Io(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert_eq!(humanize_error(&err).severity, Severity::ActionRequired);
    }

    #[test]
    fn page_count_is_reported() {
        let err = SlidecropError::PageOutOfRange { index: 9, count: 4 };
        assert!(humanize_error(&err).suggestion.contains("4 pages"));
    }
}
