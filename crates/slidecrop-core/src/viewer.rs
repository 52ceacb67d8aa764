// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page navigation and the active capture slot.

use crate::capture::CaptureSlot;
use crate::error::{Result, SlidecropError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerState {
    page_count: usize,
    current_page: usize,
    active_slot: CaptureSlot,
}

impl ViewerState {
    pub fn new(page_count: usize) -> Self {
        Self {
            page_count,
            current_page: 0,
            active_slot: CaptureSlot::Primary,
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn active_slot(&self) -> CaptureSlot {
        self.active_slot
    }

    pub fn set_active_slot(&mut self, slot: CaptureSlot) {
        self.active_slot = slot;
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 0
    }

    pub fn has_next(&self) -> bool {
        self.current_page + 1 < self.page_count
    }

    /// Move back one page. Returns `false` on the first page.
    pub fn prev_page(&mut self) -> bool {
        if self.has_prev() {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Move forward one page. Returns `false` on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.has_next() {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    pub fn go_to(&mut self, index: usize) -> Result<()> {
        if index >= self.page_count {
            return Err(SlidecropError::PageOutOfRange {
                index,
                count: self.page_count,
            });
        }
        self.current_page = index;
        Ok(())
    }

    /// One-based label such as "Page 3 / 10".
    pub fn page_label(&self) -> String {
        if self.page_count == 0 {
            return "No pages".into();
        }
        format!("Page {} / {}", self.current_page + 1, self.page_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_is_clamped() {
        let mut v = ViewerState::new(3);
        assert!(!v.prev_page());
        assert!(v.next_page());
        assert!(v.next_page());
        assert!(!v.next_page());
        assert_eq!(v.current_page(), 2);
        assert_eq!(v.page_label(), "Page 3 / 3");
    }

    #[test]
    fn go_to_out_of_range() {
        let mut v = ViewerState::new(2);
        assert!(matches!(
            v.go_to(2),
            Err(SlidecropError::PageOutOfRange { index: 2, count: 2 })
        ));
        v.go_to(1).unwrap();
        assert_eq!(v.current_page(), 1);
    }
}
