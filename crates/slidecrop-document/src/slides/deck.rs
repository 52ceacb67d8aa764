// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Slide deck builder: collects picture slides and serialises them as a
// .pptx package (a zip of PresentationML parts).

use std::io::{Cursor, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use slidecrop_core::error::SlidecropError;
use tracing::{debug, info, instrument};
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use super::layout::{Frame, SlideGeometry};
use super::parts;

/// A PNG image and where it sits on its slide.
#[derive(Debug, Clone)]
pub struct PlacedPicture {
    pub png: Vec<u8>,
    pub frame: Frame,
}

/// An in-memory slide deck of picture-only slides on the blank layout.
#[derive(Debug, Clone)]
pub struct SlideDeck {
    title: String,
    created: DateTime<Utc>,
    geometry: SlideGeometry,
    slides: Vec<Vec<PlacedPicture>>,
}

impl SlideDeck {
    pub fn new(title: impl Into<String>, geometry: SlideGeometry) -> Self {
        Self {
            title: title.into(),
            created: Utc::now(),
            geometry,
            slides: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn geometry(&self) -> &SlideGeometry {
        &self.geometry
    }

    /// Append a slide holding one picture of `width_px` x `height_px`,
    /// placed by the deck geometry.
    pub fn add_picture_slide(&mut self, png: Vec<u8>, width_px: u32, height_px: u32) {
        let frame = self.geometry.place_single(width_px, height_px);
        self.slides.push(vec![PlacedPicture { png, frame }]);
    }

    /// Append a slide holding already placed pictures.
    pub fn add_picture_slide_with(&mut self, pictures: Vec<PlacedPicture>) {
        self.slides.push(pictures);
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Serialise the deck to .pptx bytes.
    #[instrument(skip(self), fields(slides = self.slides.len()))]
    pub fn to_bytes(&self) -> Result<Vec<u8>, SlidecropError> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let xml = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        // PNG data is already compressed.
        let media = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

        let count = self.slides.len();
        let timestamp = self.created.format("%Y-%m-%dT%H:%M:%SZ").to_string();

        let fixed_parts = [
            ("[Content_Types].xml", parts::content_types(count)),
            ("_rels/.rels", parts::package_rels()),
            ("docProps/core.xml", parts::core_properties(&self.title, &timestamp)),
            ("docProps/app.xml", parts::app_properties(count)),
            (
                "ppt/presentation.xml",
                parts::presentation(
                    count,
                    self.geometry.slide_width,
                    self.geometry.slide_height,
                ),
            ),
            ("ppt/_rels/presentation.xml.rels", parts::presentation_rels(count)),
            ("ppt/slideMasters/slideMaster1.xml", parts::slide_master()),
            (
                "ppt/slideMasters/_rels/slideMaster1.xml.rels",
                parts::slide_master_rels(),
            ),
            ("ppt/slideLayouts/slideLayout1.xml", parts::blank_layout()),
            (
                "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
                parts::blank_layout_rels(),
            ),
            ("ppt/theme/theme1.xml", parts::theme()),
        ];
        for (name, body) in fixed_parts {
            write_entry(&mut zip, name, body.as_bytes(), xml)?;
        }

        let mut image_number = 0usize;
        for (index, pictures) in self.slides.iter().enumerate() {
            let slide_number = index + 1;
            let mut media_names = Vec::with_capacity(pictures.len());

            for picture in pictures {
                image_number += 1;
                let name = format!("image{image_number}.png");
                write_entry(&mut zip, &format!("ppt/media/{name}"), &picture.png, media)?;
                media_names.push(name);
            }

            let frames: Vec<Frame> = pictures.iter().map(|p| p.frame).collect();
            write_entry(
                &mut zip,
                &format!("ppt/slides/slide{slide_number}.xml"),
                parts::picture_slide(&frames).as_bytes(),
                xml,
            )?;
            write_entry(
                &mut zip,
                &format!("ppt/slides/_rels/slide{slide_number}.xml.rels"),
                parts::picture_slide_rels(&media_names).as_bytes(),
                xml,
            )?;
        }

        let cursor = zip
            .finish()
            .map_err(|err| SlidecropError::SlideDeck(format!("failed to finish package: {err}")))?;
        let bytes = cursor.into_inner();
        debug!(bytes = bytes.len(), images = image_number, "deck serialised");
        Ok(bytes)
    }

    /// Serialise and write the deck to `path`.
    #[instrument(skip(self), fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SlidecropError> {
        let bytes = self.to_bytes()?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!(
            slides = self.slides.len(),
            bytes = bytes.len(),
            "slide deck saved"
        );
        Ok(())
    }
}

fn write_entry(
    zip: &mut ZipWriter<Cursor<Vec<u8>>>,
    name: &str,
    data: &[u8],
    options: SimpleFileOptions,
) -> Result<(), SlidecropError> {
    zip.start_file(name, options)
        .map_err(|err| SlidecropError::SlideDeck(format!("cannot add {name}: {err}")))?;
    zip.write_all(data)?;
    Ok(())
}
