// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capture model: the user's selected regions, stored in document space.
//
// Each page holds at most one region per slot, so at most two regions per page.
// The set is rebuilt whenever a document is opened and is never persisted.

use crate::config::TemplatePolicy;
use crate::error::{Result, SlidecropError};
use crate::geometry::{DocRect, PageSize};

/// One of the two capture slots available on each page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CaptureSlot {
    Primary,
    Secondary,
}

impl CaptureSlot {
    pub const ALL: [CaptureSlot; 2] = [CaptureSlot::Primary, CaptureSlot::Secondary];

    /// Zero-based position, used for ordering slides.
    pub fn index(&self) -> usize {
        match self {
            Self::Primary => 0,
            Self::Secondary => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Primary => "Region 1",
            Self::Secondary => "Region 2",
        }
    }

    pub fn other(&self) -> Self {
        match self {
            Self::Primary => Self::Secondary,
            Self::Secondary => Self::Primary,
        }
    }
}

/// A recorded region on a specific page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureRegion {
    pub page_index: usize,
    pub slot: CaptureSlot,
    pub rect: DocRect,
}

/// How many regions the first page carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureProgress {
    Empty,
    One,
    Two,
}

/// All regions recorded for the open document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptureSet {
    regions: Vec<CaptureRegion>,
}

impl CaptureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `rect` into `(page_index, slot)`, replacing what was there.
    ///
    /// The rectangle is clipped to the page first. Regions with a side shorter
    /// than `min_extent` points are rejected as accidental clicks.
    pub fn record(
        &mut self,
        page_index: usize,
        slot: CaptureSlot,
        rect: DocRect,
        page: &PageSize,
        min_extent: f64,
    ) -> Result<CaptureRegion> {
        let clipped = rect.clip_to_page(page).ok_or_else(|| {
            SlidecropError::InvalidRegion("selection lies outside the page".into())
        })?;
        if clipped.width() < min_extent || clipped.height() < min_extent {
            return Err(SlidecropError::InvalidRegion(format!(
                "selection {:.1} x {:.1} pt is smaller than {min_extent} pt",
                clipped.width(),
                clipped.height()
            )));
        }

        let region = CaptureRegion {
            page_index,
            slot,
            rect: clipped,
        };
        match self
            .regions
            .iter_mut()
            .find(|r| r.page_index == page_index && r.slot == slot)
        {
            Some(existing) => *existing = region,
            None => self.regions.push(region),
        }
        Ok(region)
    }

    pub fn region(&self, page_index: usize, slot: CaptureSlot) -> Option<&CaptureRegion> {
        self.regions
            .iter()
            .find(|r| r.page_index == page_index && r.slot == slot)
    }

    /// Regions on one page, in slot order.
    pub fn regions_on_page(&self, page_index: usize) -> Vec<CaptureRegion> {
        let mut found: Vec<CaptureRegion> = self
            .regions
            .iter()
            .filter(|r| r.page_index == page_index)
            .copied()
            .collect();
        found.sort_by_key(|r| r.slot);
        found
    }

    /// First free slot on `page_index`, or `active` when both are taken.
    pub fn next_slot(&self, page_index: usize, active: CaptureSlot) -> CaptureSlot {
        if self.region(page_index, active).is_none() {
            return active;
        }
        let other = active.other();
        if self.region(page_index, other).is_none() {
            other
        } else {
            active
        }
    }

    pub fn clear_page(&mut self, page_index: usize) {
        self.regions.retain(|r| r.page_index != page_index);
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn progress(&self) -> CaptureProgress {
        match self.regions_on_page(0).len() {
            0 => CaptureProgress::Empty,
            1 => CaptureProgress::One,
            _ => CaptureProgress::Two,
        }
    }

    /// The regions applied to every page on export, in slot order.
    pub fn template_regions(&self, policy: TemplatePolicy) -> Result<Vec<CaptureRegion>> {
        if self.regions.is_empty() {
            return Err(SlidecropError::NoCaptures);
        }
        let page = match policy {
            TemplatePolicy::FirstPage => 0,
            TemplatePolicy::EarliestPage => self
                .regions
                .iter()
                .map(|r| r.page_index)
                .min()
                .unwrap_or(0),
        };
        let template = self.regions_on_page(page);
        if template.is_empty() {
            return Err(SlidecropError::NoTemplateRegion);
        }
        Ok(template)
    }
}
