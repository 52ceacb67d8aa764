// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer: configuration, the open document and its renderer,
// preview rendering, and export.
//
// pdfium handles are neither `Send` nor `Sync`, so the loaded document lives
// behind `Rc<RefCell<>>` and is only touched from the UI thread. The config
// is shared the same way the rest of the app shares it, behind `Arc<Mutex<>>`.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Arc, Mutex, MutexGuard};

use slidecrop_core::error::{Result, SlidecropError};
use slidecrop_core::{AppConfig, CaptureSet, PageSize};
use slidecrop_document::pdf::render::bind_pdfium;
use slidecrop_document::{
    ExportReport, Exporter, ImageProcessor, PageRenderer, PdfReader, PdfiumRenderer,
};
use tracing::{info, instrument, warn};

use super::data_dir;

const CONFIG_FILE: &str = "config.json";
const FALLBACK_SAVE_NAME: &str = "presentation.pptx";

/// What the UI needs to know about a freshly opened document.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenDocument {
    /// File name shown in the toolbar.
    pub name: String,
    /// Proposed file name for the exported deck.
    pub save_name: String,
    pub page_sizes: Vec<PageSize>,
}

struct LoadedDocument {
    title: String,
    renderer: PdfiumRenderer,
}

/// Shared application services, provided to every page via
/// `use_context::<AppServices>()`.
#[derive(Clone)]
pub struct AppServices {
    data_dir: PathBuf,
    config: Arc<Mutex<AppConfig>>,
    document: Rc<RefCell<Option<LoadedDocument>>>,
}

impl AppServices {
    /// Load the persisted config from the platform data directory.
    pub fn init() -> Self {
        let dir = data_dir::data_dir();
        info!(path = %dir.display(), "initialising app services");
        Self::with_data_dir(dir)
    }

    pub fn with_data_dir(dir: PathBuf) -> Self {
        let config = load_config(&dir).unwrap_or_default();
        Self {
            data_dir: dir,
            config: Arc::new(Mutex::new(config)),
            document: Rc::new(RefCell::new(None)),
        }
    }

    // -- Config --------------------------------------------------------------

    pub fn config(&self) -> AppConfig {
        self.lock_config().clone()
    }

    /// Update and persist the config.
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        *self.lock_config() = config.clone();
        persist_config(&self.data_dir, config)
    }

    fn lock_config(&self) -> MutexGuard<'_, AppConfig> {
        self.config.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // -- Document ------------------------------------------------------------

    /// Open `path`, replacing any document already open.
    ///
    /// The file is checked with lopdf before pdfium is bound, so a damaged
    /// file reports a PDF error even when the renderer is missing.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn open_document(&self, path: &Path) -> Result<OpenDocument> {
        let bytes = std::fs::read(path)?;
        let reader = PdfReader::from_bytes(&bytes)?;
        if reader.page_count() == 0 {
            return Err(SlidecropError::PdfError("the document has no pages".into()));
        }

        let config = self.config();
        let pdfium = bind_pdfium(config.pdfium_library_dir.as_deref())?;
        let renderer = PdfiumRenderer::new(pdfium, bytes)?;
        if renderer.page_count() != reader.page_count() {
            warn!(
                lopdf = reader.page_count(),
                pdfium = renderer.page_count(),
                "page counts disagree, using the renderer's"
            );
        }

        let page_sizes = (0..renderer.page_count())
            .map(|index| renderer.page_size(index))
            .collect::<Result<Vec<_>>>()?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.pdf".into());
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.clone());

        info!(file = %name, pages = page_sizes.len(), "PDF opened");
        *self.document.borrow_mut() = Some(LoadedDocument { title, renderer });

        Ok(OpenDocument {
            name,
            save_name: default_save_name(path),
            page_sizes,
        })
    }

    pub fn has_document(&self) -> bool {
        self.document.borrow().is_some()
    }

    /// Render page `index` at `scale` pixels per point as a data URI for `<img>`.
    pub fn render_preview(&self, index: usize, scale: f64) -> Result<String> {
        let guard = self.document.borrow();
        let document = guard.as_ref().ok_or(SlidecropError::NoDocument)?;
        let page = document.renderer.render_page(index, scale)?;
        ImageProcessor::from_dynamic(page).to_data_uri()
    }

    /// Crop every page by the captured regions and write the deck to `path`.
    #[instrument(skip(self, captures), fields(path = %path.display()))]
    pub fn export_to(&self, path: &Path, captures: &CaptureSet) -> Result<ExportReport> {
        let guard = self.document.borrow();
        let document = guard.as_ref().ok_or(SlidecropError::NoDocument)?;
        let config = self.config();

        let report = Exporter::export(&document.renderer, captures, &config, &document.title)?;
        report.deck.save(path)?;
        info!(slides = report.slides, skipped = report.skipped.len(), "deck exported");
        Ok(report)
    }
}

/// `<pdf-stem>.pptx`, or `presentation.pptx` when the path has no stem.
pub fn default_save_name(pdf_path: &Path) -> String {
    match pdf_path.file_stem() {
        Some(stem) if !stem.is_empty() => format!("{}.pptx", stem.to_string_lossy()),
        _ => FALLBACK_SAVE_NAME.into(),
    }
}

fn load_config(data_dir: &Path) -> Option<AppConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&data) {
        Ok(config) => Some(config),
        Err(err) => {
            warn!(path = %path.display(), %err, "ignoring unreadable config");
            None
        }
    }
}

fn persist_config(data_dir: &Path, config: &AppConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}
