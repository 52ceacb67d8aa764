// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader: open and inspect existing PDF documents using the `lopdf` crate.
//
// Used to validate a file and learn its page geometry before the (heavier)
// renderer is involved.

use std::path::Path;

use lopdf::{Dictionary, Document, Object, ObjectId};
use slidecrop_core::PageSize;
use slidecrop_core::error::SlidecropError;
use tracing::{debug, info, instrument};

/// Page tree nesting deeper than this is treated as malformed.
const MAX_INHERITANCE_DEPTH: usize = 32;

/// US Letter, used when a page carries no usable box at all.
const FALLBACK_PAGE: PageSize = PageSize {
    width: 612.0,
    height: 792.0,
};

/// Page structure of one PDF, inspected with lopdf.
pub struct PdfReader {
    document: Document,
    /// File the document came from; `None` for in-memory input.
    source_path: Option<String>,
}

impl PdfReader {
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SlidecropError> {
        let path = path.as_ref();
        let document = Document::load(path).map_err(|err| {
            SlidecropError::PdfError(format!("cannot read {}: {err}", path.display()))
        })?;
        info!(pages = document.get_pages().len(), "PDF parsed");
        Ok(Self {
            document,
            source_path: Some(path.display().to_string()),
        })
    }

    #[instrument(skip_all, fields(bytes_len = bytes.len()))]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SlidecropError> {
        let document = Document::load_mem(bytes)
            .map_err(|err| SlidecropError::PdfError(format!("not a readable PDF: {err}")))?;
        debug!(pages = document.get_pages().len(), "PDF parsed from memory");
        Ok(Self {
            document,
            source_path: None,
        })
    }

    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    /// Visible size of a page (0-indexed) in points, after `/Rotate`.
    ///
    /// Uses `/CropBox` when present, otherwise `/MediaBox`; both may be
    /// inherited from an ancestor in the page tree.
    pub fn page_size(&self, index: usize) -> Result<PageSize, SlidecropError> {
        let page_id = self.page_id(index)?;

        let bbox = self
            .inherited(page_id, b"CropBox")
            .and_then(|obj| self.read_box(obj))
            .or_else(|| {
                self.inherited(page_id, b"MediaBox")
                    .and_then(|obj| self.read_box(obj))
            });

        let mut size = match bbox {
            Some([x0, y0, x1, y1]) => PageSize::new((x1 - x0).abs(), (y1 - y0).abs()),
            None => {
                debug!(index, "page has no usable box, assuming Letter");
                FALLBACK_PAGE
            }
        };

        let rotation = self
            .inherited(page_id, b"Rotate")
            .and_then(|obj| obj.as_i64().ok())
            .unwrap_or(0)
            .rem_euclid(360);
        if rotation == 90 || rotation == 270 {
            size = PageSize::new(size.height, size.width);
        }

        Ok(size)
    }

    /// Sizes of every page, in page order.
    pub fn page_sizes(&self) -> Result<Vec<PageSize>, SlidecropError> {
        (0..self.page_count()).map(|i| self.page_size(i)).collect()
    }

    fn page_id(&self, index: usize) -> Result<ObjectId, SlidecropError> {
        // Keys are 1-based page numbers.
        let pages = self.document.get_pages();
        u32::try_from(index + 1)
            .ok()
            .and_then(|number| pages.get(&number).copied())
            .ok_or(SlidecropError::PageOutOfRange {
                index,
                count: pages.len(),
            })
    }

    /// Look up `key` on the page, walking `/Parent` links for inherited attributes.
    fn inherited(&self, page_id: ObjectId, key: &[u8]) -> Option<&Object> {
        let mut dict: &Dictionary = self.document.get_dictionary(page_id).ok()?;
        for _ in 0..MAX_INHERITANCE_DEPTH {
            if let Ok(value) = dict.get(key) {
                return Some(self.resolve(value));
            }
            let parent = dict.get(b"Parent").ok()?.as_reference().ok()?;
            dict = self.document.get_dictionary(parent).ok()?;
        }
        None
    }

    fn resolve<'a>(&'a self, object: &'a Object) -> &'a Object {
        match object {
            Object::Reference(id) => self.document.get_object(*id).unwrap_or(object),
            other => other,
        }
    }

    fn read_box(&self, object: &Object) -> Option<[f64; 4]> {
        let items = object.as_array().ok()?;
        if items.len() != 4 {
            return None;
        }
        let mut coords = [0.0f64; 4];
        for (slot, item) in coords.iter_mut().zip(items) {
            *slot = self.resolve(item).as_float().ok()? as f64;
        }
        Some(coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{PageFixture, sample_pdf};

    #[test]
    fn counts_pages_and_reads_media_boxes() {
        let bytes = sample_pdf(&[PageFixture::new(612, 792), PageFixture::new(842, 595)]);
        let reader = PdfReader::from_bytes(&bytes).unwrap();
        assert_eq!(reader.page_count(), 2);
        assert_eq!(reader.page_size(0).unwrap(), PageSize::new(612.0, 792.0));
        assert_eq!(reader.page_size(1).unwrap(), PageSize::new(842.0, 595.0));
        assert!(reader.source_path().is_none());
    }

    #[test]
    fn rotation_swaps_dimensions() {
        let bytes = sample_pdf(&[PageFixture::new(612, 792).rotated(90)]);
        let reader = PdfReader::from_bytes(&bytes).unwrap();
        assert_eq!(reader.page_size(0).unwrap(), PageSize::new(792.0, 612.0));
    }

    #[test]
    fn inherited_media_box_is_used() {
        let bytes = sample_pdf(&[PageFixture::inherited()]);
        let reader = PdfReader::from_bytes(&bytes).unwrap();
        assert_eq!(reader.page_sizes().unwrap(), vec![PageSize::new(595.0, 842.0)]);
    }

    #[test]
    fn out_of_range_page_is_an_error() {
        let bytes = sample_pdf(&[PageFixture::new(100, 100)]);
        let reader = PdfReader::from_bytes(&bytes).unwrap();
        assert!(matches!(
            reader.page_size(1),
            Err(SlidecropError::PageOutOfRange { index: 1, count: 1 })
        ));
    }

    #[test]
    fn garbage_is_a_pdf_error() {
        assert!(matches!(
            PdfReader::from_bytes(b"not a pdf"),
            Err(SlidecropError::PdfError(_))
        ));
    }

    #[test]
    fn open_records_source_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.pdf");
        std::fs::write(&path, sample_pdf(&[PageFixture::new(300, 400)])).unwrap();
        let reader = PdfReader::open(&path).unwrap();
        assert_eq!(reader.page_count(), 1);
        assert!(reader.source_path().unwrap().ends_with("deck.pdf"));
    }
}
