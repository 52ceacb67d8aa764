// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global application state, held in a Dioxus `Signal` context.

use slidecrop_core::error::Result;
use slidecrop_core::human_errors::{Severity, humanize_error};
use slidecrop_core::{
    AppConfig, CaptureProgress, CaptureRegion, CaptureSet, DragTracker, PageSize, ScreenPoint,
    SlidecropError, ViewTransform, ViewerState,
};

use crate::services::app_services::{AppServices, OpenDocument};

/// Tone of the status line message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub tone: Tone,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Info,
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Warning,
        }
    }

    pub fn from_error(err: &SlidecropError) -> Self {
        let human = humanize_error(err);
        let tone = match human.severity {
            Severity::Transient => Tone::Warning,
            Severity::ActionRequired | Severity::Permanent => Tone::Error,
        };
        Self {
            text: human.status_line(),
            tone,
        }
    }
}

/// Shared state accessible to all pages via `use_context`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    /// File name of the open document.
    pub document_name: Option<String>,
    pub save_name: String,
    pub page_sizes: Vec<PageSize>,
    pub viewer: ViewerState,
    /// Present once a document is open.
    pub view: Option<ViewTransform>,
    pub captures: CaptureSet,
    pub drag: DragTracker,
    /// Bumped on every open so the preview re-renders even at an unchanged zoom.
    pub revision: u64,
    pub status: Option<StatusMessage>,
}

impl AppState {
    pub fn new(svc: &AppServices) -> Self {
        Self {
            config: svc.config(),
            ..Self::default()
        }
    }

    /// Reset everything document-related for a newly opened file.
    pub fn load_document(&mut self, doc: OpenDocument) {
        let first = doc.page_sizes.first().copied();
        self.viewer = ViewerState::new(doc.page_sizes.len());
        self.view = first.map(|page| ViewTransform::new(page, &self.config));
        self.captures.clear();
        self.drag.cancel();
        self.revision += 1;
        self.status = Some(StatusMessage::info(format!(
            "Opened {} ({} pages)",
            doc.name,
            doc.page_sizes.len()
        )));
        self.document_name = Some(doc.name);
        self.save_name = doc.save_name;
        self.page_sizes = doc.page_sizes;
    }

    /// What the preview depends on: document, page, and render scale.
    pub fn preview_key(&self) -> Option<(u64, usize, f64)> {
        self.view
            .as_ref()
            .map(|view| (self.revision, self.viewer.current_page(), view.scale()))
    }

    /// Size of the page currently shown.
    pub fn current_page_size(&self) -> Option<PageSize> {
        self.page_sizes.get(self.viewer.current_page()).copied()
    }

    /// Rebind the view after navigation, keeping the zoom level.
    pub fn sync_view_to_page(&mut self) {
        if let (Some(view), Some(page)) = (self.view.as_ref(), self.current_page_size()) {
            self.view = Some(view.for_page(page));
        }
        self.drag.cancel();
    }

    /// Finish the drag at `p` and record it into the active slot, then move
    /// the active slot to the next free one. `None` when nothing was being dragged.
    pub fn finish_drag(&mut self, p: ScreenPoint) -> Option<Result<CaptureRegion>> {
        let (a, b) = self.drag.release(p)?;
        let rect = self.view.as_ref()?.screen_rect_to_doc(a, b);
        let page = self.current_page_size()?;
        let page_index = self.viewer.current_page();
        let slot = self.viewer.active_slot();

        let recorded =
            self.captures
                .record(page_index, slot, rect, &page, self.config.min_region_extent);
        if recorded.is_ok() {
            let next = self.captures.next_slot(page_index, slot);
            self.viewer.set_active_slot(next);
        }
        Some(recorded)
    }

    /// Rebuild the view from the current config, e.g. after settings change.
    pub fn apply_config(&mut self, config: AppConfig) {
        self.config = config;
        if let Some(page) = self.current_page_size() {
            self.view = Some(ViewTransform::new(page, &self.config));
        }
    }

    pub fn progress_label(&self) -> &'static str {
        match self.captures.progress() {
            CaptureProgress::Empty => "No region on page 1",
            CaptureProgress::One => "1 region on page 1",
            CaptureProgress::Two => "2 regions on page 1",
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            document_name: None,
            save_name: "presentation.pptx".into(),
            page_sizes: Vec::new(),
            viewer: ViewerState::new(0),
            view: None,
            captures: CaptureSet::new(),
            drag: DragTracker::new(),
            revision: 0,
            status: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidecrop_core::{CaptureSlot, DocPoint, DocRect};

    fn document(pages: &[(f64, f64)]) -> OpenDocument {
        OpenDocument {
            name: "talk.pdf".into(),
            save_name: "talk.pptx".into(),
            page_sizes: pages.iter().map(|&(w, h)| PageSize::new(w, h)).collect(),
        }
    }

    #[test]
    fn opening_resets_captures_and_fits_first_page() {
        let mut state = AppState::default();
        let page = PageSize::new(400.0, 400.0);
        let rect = DocRect::from_corners(DocPoint::new(0.0, 0.0), DocPoint::new(50.0, 50.0));
        state
            .captures
            .record(0, CaptureSlot::Primary, rect, &page, 2.0)
            .unwrap();

        state.load_document(document(&[(400.0, 600.0), (800.0, 600.0)]));
        assert!(state.captures.is_empty());
        assert_eq!(state.viewer.page_count(), 2);
        assert_eq!(state.save_name, "talk.pptx");
        // 800 px display width over a 400 pt page.
        assert_eq!(state.view.as_ref().map(|v| v.scale()), Some(2.0));
    }

    #[test]
    fn navigation_refits_the_view() {
        let mut state = AppState::default();
        state.load_document(document(&[(400.0, 600.0), (800.0, 600.0)]));
        assert!(state.viewer.next_page());
        state.sync_view_to_page();
        assert_eq!(state.view.as_ref().map(|v| v.scale()), Some(1.0));
        assert_eq!(state.preview_key(), Some((1, 1, 1.0)));
    }

    #[test]
    fn reopening_changes_the_preview_key() {
        let mut state = AppState::default();
        assert_eq!(state.preview_key(), None);
        state.load_document(document(&[(400.0, 600.0)]));
        let first = state.preview_key();
        state.load_document(document(&[(400.0, 600.0)]));
        assert_ne!(state.preview_key(), first);
    }

    #[test]
    fn drag_is_recorded_in_document_space() {
        let mut state = AppState::default();
        state.load_document(document(&[(400.0, 600.0)]));
        state.drag.press(ScreenPoint::new(20.0, 20.0));
        state.drag.drag(ScreenPoint::new(150.0, 90.0));

        let region = state
            .finish_drag(ScreenPoint::new(220.0, 120.0))
            .unwrap()
            .unwrap();
        assert_eq!(region.slot, CaptureSlot::Primary);
        assert_eq!(
            region.rect,
            DocRect::from_corners(DocPoint::new(10.0, 10.0), DocPoint::new(110.0, 60.0))
        );
        assert_eq!(state.viewer.active_slot(), CaptureSlot::Secondary);
        assert_eq!(state.progress_label(), "1 region on page 1");
    }

    #[test]
    fn click_without_drag_is_rejected() {
        let mut state = AppState::default();
        state.load_document(document(&[(400.0, 600.0)]));
        state.drag.press(ScreenPoint::new(50.0, 50.0));
        let result = state.finish_drag(ScreenPoint::new(50.0, 50.0)).unwrap();
        assert!(matches!(result, Err(SlidecropError::InvalidRegion(_))));
        assert!(state.captures.is_empty());
        assert_eq!(state.viewer.active_slot(), CaptureSlot::Primary);
    }

    #[test]
    fn release_without_press_does_nothing() {
        let mut state = AppState::default();
        state.load_document(document(&[(400.0, 600.0)]));
        assert!(state.finish_drag(ScreenPoint::new(5.0, 5.0)).is_none());
    }

    #[test]
    fn errors_become_status_lines() {
        let status = StatusMessage::from_error(&SlidecropError::NoCaptures);
        assert_eq!(status.tone, Tone::Error);
        assert!(status.text.starts_with("No region selected."));
    }
}
