// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rubber-band drag tracking in screen space.

use crate::geometry::ScreenPoint;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum DragState {
    #[default]
    Idle,
    Dragging {
        start: ScreenPoint,
        current: ScreenPoint,
    },
}

/// Tracks a single press-drag-release gesture on the page preview.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragTracker {
    state: DragState,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new drag. Any rectangle still being drawn is discarded.
    pub fn press(&mut self, p: ScreenPoint) {
        self.state = DragState::Dragging {
            start: p,
            current: p,
        };
    }

    /// Update the moving corner. Ignored unless a drag is in progress.
    pub fn drag(&mut self, p: ScreenPoint) {
        if let DragState::Dragging { current, .. } = &mut self.state {
            *current = p;
        }
    }

    /// Finish the drag and return its two corners.
    pub fn release(&mut self, p: ScreenPoint) -> Option<(ScreenPoint, ScreenPoint)> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging { start, .. } => Some((start, p)),
            DragState::Idle => None,
        }
    }

    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Corners of the in-progress rectangle, for redraw.
    pub fn preview(&self) -> Option<(ScreenPoint, ScreenPoint)> {
        match self.state {
            DragState::Dragging { start, current } => Some((start, current)),
            DragState::Idle => None,
        }
    }
}
