// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Export pipeline: apply the template regions to every page and collect the
// crops into a slide deck.
//
// Pages are walked in order, and within a page the regions follow slot
// order, so with two regions the deck reads p1r1, p1r2, p2r1, p2r2, ...

use slidecrop_core::error::Result;
use slidecrop_core::{AppConfig, CaptureSet, CaptureSlot, ExportLayout};
use tracing::{debug, info, instrument, warn};

use crate::image::processor::ImageProcessor;
use crate::pdf::render::PageRenderer;
use crate::slides::deck::{PlacedPicture, SlideDeck};
use crate::slides::layout::SlideGeometry;

/// A template region that could not be applied to a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedRegion {
    pub page_index: usize,
    pub slot: CaptureSlot,
}

/// Result of an export run.
#[derive(Debug)]
pub struct ExportReport {
    pub deck: SlideDeck,
    pub slides: usize,
    pub skipped: Vec<SkippedRegion>,
}

struct Crop {
    png: Vec<u8>,
    width: u32,
    height: u32,
}

/// Builds slide decks from captured regions.
pub struct Exporter;

impl Exporter {
    /// Crop every page of `renderer` by the template regions of `captures`.
    ///
    /// Fails with `NoCaptures` or `NoTemplateRegion` before rendering anything
    /// when there is nothing to apply.
    #[instrument(skip_all, fields(pages = renderer.page_count(), regions = captures.len()))]
    pub fn export(
        renderer: &dyn PageRenderer,
        captures: &CaptureSet,
        config: &AppConfig,
        title: &str,
    ) -> Result<ExportReport> {
        let template = captures.template_regions(config.template_policy)?;
        let geometry = SlideGeometry::from_config(config);
        let mut deck = SlideDeck::new(title, geometry.clone());
        let mut skipped = Vec::new();

        for page_index in 0..renderer.page_count() {
            let mut crops = Vec::with_capacity(template.len());

            for region in &template {
                let rendered = renderer.render_region(page_index, &region.rect, config.export_scale)?;
                let Some(image) = rendered else {
                    warn!(
                        page = page_index + 1,
                        slot = region.slot.label(),
                        "region lies outside this page, skipping"
                    );
                    skipped.push(SkippedRegion {
                        page_index,
                        slot: region.slot,
                    });
                    continue;
                };

                let processor = ImageProcessor::from_dynamic(image);
                crops.push(Crop {
                    width: processor.width(),
                    height: processor.height(),
                    png: processor.to_png_bytes()?,
                });
            }

            if crops.is_empty() {
                continue;
            }
            debug!(page = page_index + 1, crops = crops.len(), "page cropped");

            match config.export_layout {
                ExportLayout::SlidePerRegion => {
                    for crop in crops {
                        deck.add_picture_slide(crop.png, crop.width, crop.height);
                    }
                }
                ExportLayout::SlidePerPage => {
                    let sizes: Vec<(u32, u32)> =
                        crops.iter().map(|c| (c.width, c.height)).collect();
                    let pictures = crops
                        .into_iter()
                        .zip(geometry.place_stacked(&sizes))
                        .map(|(crop, frame)| PlacedPicture {
                            png: crop.png,
                            frame,
                        })
                        .collect();
                    deck.add_picture_slide_with(pictures);
                }
            }
        }

        let slides = deck.slide_count();
        info!(slides, skipped = skipped.len(), "export complete");
        Ok(ExportReport {
            deck,
            slides,
            skipped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::FakeRenderer;
    use slidecrop_core::error::SlidecropError;
    use slidecrop_core::{DocPoint, DocRect, PageSize, TemplatePolicy};
    use std::io::{Cursor, Read};

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> DocRect {
        DocRect::from_corners(DocPoint::new(x0, y0), DocPoint::new(x1, y1))
    }

    fn captures(regions: &[(usize, CaptureSlot, DocRect)]) -> CaptureSet {
        let page = PageSize::new(600.0, 800.0);
        let mut set = CaptureSet::new();
        for &(page_index, slot, r) in regions {
            set.record(page_index, slot, r, &page, 2.0).unwrap();
        }
        set
    }

    fn config(layout: ExportLayout) -> AppConfig {
        AppConfig {
            export_scale: 1.0,
            export_layout: layout,
            ..AppConfig::default()
        }
    }

    fn slide_xml(deck: &SlideDeck, number: usize) -> String {
        let bytes = deck.to_bytes().unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive
            .by_name(&format!("ppt/slides/slide{number}.xml"))
            .unwrap();
        let mut xml = String::new();
        file.read_to_string(&mut xml).unwrap();
        xml
    }

    #[test]
    fn one_slide_per_page_for_a_single_region() {
        let renderer = FakeRenderer::new(&[(600.0, 800.0); 3]);
        let set = captures(&[(0, CaptureSlot::Primary, rect(10.0, 10.0, 106.0, 58.0))]);
        let report =
            Exporter::export(&renderer, &set, &config(ExportLayout::SlidePerRegion), "deck")
                .unwrap();
        assert_eq!(report.slides, 3);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn two_regions_give_two_slides_per_page() {
        let renderer = FakeRenderer::new(&[(600.0, 800.0); 2]);
        let set = captures(&[
            (0, CaptureSlot::Primary, rect(0.0, 0.0, 96.0, 96.0)),
            (0, CaptureSlot::Secondary, rect(0.0, 400.0, 192.0, 496.0)),
        ]);
        let report =
            Exporter::export(&renderer, &set, &config(ExportLayout::SlidePerRegion), "deck")
                .unwrap();
        assert_eq!(report.slides, 4);

        // Page-major order: slide 2 is page 1's second region, 2in wide at 96 ppi.
        assert!(slide_xml(&report.deck, 2).contains(r#"cx="1828800""#));
        assert!(slide_xml(&report.deck, 3).contains(r#"cx="914400""#));
    }

    #[test]
    fn slide_per_page_stacks_both_regions() {
        let renderer = FakeRenderer::new(&[(600.0, 800.0); 2]);
        let set = captures(&[
            (0, CaptureSlot::Primary, rect(0.0, 0.0, 96.0, 96.0)),
            (0, CaptureSlot::Secondary, rect(0.0, 400.0, 96.0, 496.0)),
        ]);
        let report =
            Exporter::export(&renderer, &set, &config(ExportLayout::SlidePerPage), "deck").unwrap();
        assert_eq!(report.slides, 2);
        assert_eq!(slide_xml(&report.deck, 1).matches("<p:pic>").count(), 2);
    }

    #[test]
    fn region_missing_from_smaller_page_is_skipped() {
        let renderer = FakeRenderer::new(&[(600.0, 800.0), (300.0, 300.0)]);
        let set = captures(&[
            (0, CaptureSlot::Primary, rect(10.0, 10.0, 100.0, 100.0)),
            (0, CaptureSlot::Secondary, rect(400.0, 500.0, 500.0, 600.0)),
        ]);
        let report =
            Exporter::export(&renderer, &set, &config(ExportLayout::SlidePerRegion), "deck")
                .unwrap();
        assert_eq!(report.slides, 3);
        assert_eq!(
            report.skipped,
            vec![SkippedRegion {
                page_index: 1,
                slot: CaptureSlot::Secondary
            }]
        );
    }

    #[test]
    fn nothing_recorded_is_an_error() {
        let renderer = FakeRenderer::new(&[(600.0, 800.0)]);
        let result = Exporter::export(
            &renderer,
            &CaptureSet::new(),
            &config(ExportLayout::SlidePerRegion),
            "deck",
        );
        assert!(matches!(result, Err(SlidecropError::NoCaptures)));
    }

    #[test]
    fn first_page_policy_needs_a_region_on_page_one() {
        let renderer = FakeRenderer::new(&[(600.0, 800.0); 3]);
        let set = captures(&[(2, CaptureSlot::Primary, rect(10.0, 10.0, 100.0, 100.0))]);

        let first = Exporter::export(&renderer, &set, &config(ExportLayout::SlidePerRegion), "d");
        assert!(matches!(first, Err(SlidecropError::NoTemplateRegion)));

        let earliest = AppConfig {
            template_policy: TemplatePolicy::EarliestPage,
            ..config(ExportLayout::SlidePerRegion)
        };
        let report = Exporter::export(&renderer, &set, &earliest, "d").unwrap();
        assert_eq!(report.slides, 3);
    }
}
