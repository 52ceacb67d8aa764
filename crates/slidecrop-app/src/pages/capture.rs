// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capture page: page preview with rubber-band region selection, navigation,
// zoom and pan, and export to a slide deck.
//
// The viewport's children ignore pointer events, so mouse coordinates are
// always relative to the viewport's top-left corner.

use dioxus::prelude::*;

use slidecrop_core::{CaptureRegion, CaptureSlot, ScreenPoint, ViewTransform};

use crate::services::app_services::AppServices;
use crate::state::{AppState, StatusMessage, Tone};

/// Screen pixels scrolled per pan button press.
const PAN_STEP: f64 = 100.0;

/// An outline drawn over the preview, in viewport pixels.
#[derive(Debug, Clone, PartialEq)]
struct Overlay {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    colour: &'static str,
    label: &'static str,
}

impl Overlay {
    fn between(a: ScreenPoint, b: ScreenPoint, slot: CaptureSlot) -> Self {
        Self {
            left: a.x.min(b.x),
            top: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
            colour: slot_colour(slot),
            label: slot.label(),
        }
    }
}

fn slot_colour(slot: CaptureSlot) -> &'static str {
    match slot {
        CaptureSlot::Primary => "red",
        CaptureSlot::Secondary => "blue",
    }
}

/// Project recorded regions through the current view.
fn region_overlays(view: &ViewTransform, regions: &[CaptureRegion]) -> Vec<Overlay> {
    regions
        .iter()
        .map(|region| {
            let (a, b) = view.doc_rect_to_screen(&region.rect);
            Overlay::between(a, b, region.slot)
        })
        .collect()
}

fn tone_colour(tone: Tone) -> &'static str {
    match tone {
        Tone::Info => "#2e7d32",
        Tone::Warning => "#b26a00",
        Tone::Error => "#c62828",
    }
}

fn mouse_point(evt: &MouseEvent) -> ScreenPoint {
    let p = evt.element_coordinates();
    ScreenPoint::new(p.x, p.y)
}

#[component]
pub fn Capture() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut preview = use_signal(|| Option::<String>::None);

    // Re-render the page bitmap only when the document, page, or scale changes.
    let preview_key = use_memo(move || state.read().preview_key());
    let preview_svc = svc.clone();
    use_effect(move || {
        let Some((_, page, scale)) = preview_key() else {
            preview.set(None);
            return;
        };
        match preview_svc.render_preview(page, scale) {
            Ok(uri) => preview.set(Some(uri)),
            Err(err) => {
                tracing::warn!(page, error = %err, "preview render failed");
                preview.set(None);
                state.write().status = Some(StatusMessage::from_error(&err));
            }
        }
    });

    let open_svc = svc.clone();
    let on_open = move |_: MouseEvent| {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PDF", &["pdf"])
            .pick_file()
        else {
            return;
        };
        match open_svc.open_document(&path) {
            Ok(doc) => state.write().load_document(doc),
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "failed to open PDF");
                state.write().status = Some(StatusMessage::from_error(&err));
            }
        }
    };

    let save_svc = svc.clone();
    let on_save = move |_: MouseEvent| {
        let (captures, save_name, policy) = {
            let s = state.read();
            (s.captures.clone(), s.save_name.clone(), s.config.template_policy)
        };
        // Report a missing selection before asking where to save.
        if let Err(err) = captures.template_regions(policy) {
            state.write().status = Some(StatusMessage::from_error(&err));
            return;
        }
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PowerPoint", &["pptx"])
            .set_file_name(save_name)
            .save_file()
        else {
            return;
        };
        let status = match save_svc.export_to(&path, &captures) {
            Ok(report) if report.skipped.is_empty() => StatusMessage::info(format!(
                "Saved {} slides to {}",
                report.slides,
                path.display()
            )),
            Ok(report) => StatusMessage::warning(format!(
                "Saved {} slides to {}; {} region(s) fell outside smaller pages",
                report.slides,
                path.display(),
                report.skipped.len()
            )),
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "export failed");
                StatusMessage::from_error(&err)
            }
        };
        state.write().status = Some(status);
    };

    let s = state.read().clone();
    let has_doc = s.view.is_some();
    let active = s.viewer.active_slot();
    let zoom_label = s
        .view
        .as_ref()
        .map(|v| format!("{}%", v.zoom_percent()))
        .unwrap_or_else(|| "100%".into());
    let doc_label = s
        .document_name
        .clone()
        .unwrap_or_else(|| "No document".into());
    let page_label = s.viewer.page_label();
    let progress = s.progress_label();
    let active_colour = slot_colour(active);
    let active_label = active.label();

    rsx! {
        div {
            // Toolbar
            div { style: "display: flex; gap: 6px; flex-wrap: wrap; align-items: center; margin-bottom: 8px;",
                ToolButton { label: "Open PDF", disabled: false, onclick: on_open }
                span { style: "color: #666; font-size: 13px; margin-right: 8px;", "{doc_label}" }

                ToolButton {
                    label: "\u{25C0} Prev",
                    disabled: !s.viewer.has_prev(),
                    onclick: move |_| {
                        let mut s = state.write();
                        if s.viewer.prev_page() {
                            s.sync_view_to_page();
                        }
                    },
                }
                ToolButton {
                    label: "Next \u{25B6}",
                    disabled: !s.viewer.has_next(),
                    onclick: move |_| {
                        let mut s = state.write();
                        if s.viewer.next_page() {
                            s.sync_view_to_page();
                        }
                    },
                }

                ToolButton {
                    label: "\u{2212}",
                    disabled: !has_doc,
                    onclick: move |_| {
                        if let Some(view) = state.write().view.as_mut() {
                            view.zoom_out();
                        }
                    },
                }
                span { style: "min-width: 48px; text-align: center; font-size: 13px;", "{zoom_label}" }
                ToolButton {
                    label: "+",
                    disabled: !has_doc,
                    onclick: move |_| {
                        if let Some(view) = state.write().view.as_mut() {
                            view.zoom_in();
                        }
                    },
                }
                ToolButton {
                    label: "100%",
                    disabled: !has_doc,
                    onclick: move |_| {
                        if let Some(view) = state.write().view.as_mut() {
                            view.reset_zoom();
                        }
                    },
                }

                for (label, dx, dy) in [
                    ("\u{2190}", -PAN_STEP, 0.0),
                    ("\u{2191}", 0.0, -PAN_STEP),
                    ("\u{2193}", 0.0, PAN_STEP),
                    ("\u{2192}", PAN_STEP, 0.0),
                ] {
                    ToolButton {
                        key: "{label}",
                        label: label,
                        disabled: !has_doc,
                        onclick: move |_| {
                            if let Some(view) = state.write().view.as_mut() {
                                view.pan_by(dx, dy);
                            }
                        },
                    }
                }

                for slot in CaptureSlot::ALL {
                    SlotButton {
                        key: "{slot.index()}",
                        slot: slot,
                        active: slot == active,
                        onclick: move |_| state.write().viewer.set_active_slot(slot),
                    }
                }

                ToolButton {
                    label: "Clear page",
                    disabled: !has_doc,
                    onclick: move |_| {
                        let mut s = state.write();
                        let page = s.viewer.current_page();
                        s.captures.clear_page(page);
                        s.viewer.set_active_slot(CaptureSlot::Primary);
                    },
                }
                ToolButton {
                    label: "Clear all",
                    disabled: s.captures.is_empty(),
                    onclick: move |_| {
                        let mut s = state.write();
                        s.captures.clear();
                        s.viewer.set_active_slot(CaptureSlot::Primary);
                    },
                }
                ToolButton { label: "Save PPT", disabled: s.captures.is_empty(), onclick: on_save }
            }

            if let Some(view) = s.view.as_ref() {
                Canvas {
                    view: view.clone(),
                    preview: preview(),
                    overlays: region_overlays(view, &s.captures.regions_on_page(s.viewer.current_page())),
                    band: s.drag.preview().map(|(a, b)| Overlay::between(a, b, active)),
                    on_press: move |p: ScreenPoint| state.write().drag.press(p),
                    on_move: move |p: ScreenPoint| {
                        if state.read().drag.is_dragging() {
                            state.write().drag.drag(p);
                        }
                    },
                    on_release: move |p: ScreenPoint| {
                        let recorded = state.write().finish_drag(p);
                        let status = match recorded {
                            Some(Ok(region)) => {
                                tracing::info!(
                                    page = region.page_index + 1,
                                    slot = region.slot.label(),
                                    x0 = region.rect.x0,
                                    y0 = region.rect.y0,
                                    x1 = region.rect.x1,
                                    y1 = region.rect.y1,
                                    "region recorded"
                                );
                                StatusMessage::info(format!(
                                    "{} set on page {}",
                                    region.slot.label(),
                                    region.page_index + 1
                                ))
                            }
                            Some(Err(err)) => StatusMessage::from_error(&err),
                            None => return,
                        };
                        state.write().status = Some(status);
                    },
                    on_cancel: move |_| {
                        if state.read().drag.is_dragging() {
                            state.write().drag.cancel();
                        }
                    },
                    on_scroll: move |(dx, dy): (f64, f64)| {
                        if let Some(view) = state.write().view.as_mut() {
                            view.pan_by(dx, dy);
                        }
                    },
                }
            } else {
                div { style: "padding: 48px; text-align: center; color: #666; border: 1px dashed #ccc;",
                    "Open a PDF, then drag a box on the first page to choose what goes on each slide."
                }
            }

            // Status line
            div { style: "display: flex; gap: 16px; margin-top: 8px; font-size: 13px;",
                span { "{page_label}" }
                span { "{progress}" }
                span { style: "color: {active_colour};", "Drawing {active_label}" }
                if let Some(status) = s.status.as_ref() {
                    span { style: "color: {tone_colour(status.tone)};", "{status.text}" }
                }
            }
        }
    }
}

/// Fixed-size viewport showing the page translated by the pan offset.
#[component]
fn Canvas(
    view: ViewTransform,
    preview: Option<String>,
    overlays: Vec<Overlay>,
    band: Option<Overlay>,
    on_press: EventHandler<ScreenPoint>,
    on_move: EventHandler<ScreenPoint>,
    on_release: EventHandler<ScreenPoint>,
    on_cancel: EventHandler<()>,
    on_scroll: EventHandler<(f64, f64)>,
) -> Element {
    let (viewport_w, viewport_h) = view.viewport();
    let (content_w, content_h) = view.content_size();
    let pan = view.pan();
    let img_left = -pan.x;
    let img_top = -pan.y;

    rsx! {
        div {
            style: "position: relative; width: {viewport_w}px; height: {viewport_h}px; overflow: hidden; border: 1px solid #ccc; background: #e8e8e8; cursor: crosshair; user-select: none;",
            onmousedown: move |evt: MouseEvent| on_press.call(mouse_point(&evt)),
            onmousemove: move |evt: MouseEvent| on_move.call(mouse_point(&evt)),
            onmouseup: move |evt: MouseEvent| on_release.call(mouse_point(&evt)),
            onmouseleave: move |_| on_cancel.call(()),
            onwheel: move |evt: WheelEvent| {
                let delta = evt.delta().strip_units();
                on_scroll.call((delta.x, delta.y));
            },

            if let Some(uri) = preview {
                img {
                    src: "{uri}",
                    draggable: "false",
                    style: "position: absolute; left: {img_left}px; top: {img_top}px; width: {content_w}px; height: {content_h}px; pointer-events: none;",
                }
            }

            for overlay in overlays {
                OverlayBox { key: "{overlay.label}", overlay: overlay, dashed: false }
            }
            if let Some(band) = band {
                OverlayBox { overlay: band, dashed: true }
            }
        }
    }
}

#[component]
fn OverlayBox(overlay: Overlay, dashed: bool) -> Element {
    let line = if dashed { "dashed" } else { "solid" };
    rsx! {
        div {
            style: "position: absolute; left: {overlay.left}px; top: {overlay.top}px; width: {overlay.width}px; height: {overlay.height}px; border: 2px {line} {overlay.colour}; box-sizing: border-box; pointer-events: none;",
            if !dashed {
                span { style: "position: absolute; top: -18px; left: 0; font-size: 11px; color: {overlay.colour};",
                    "{overlay.label}"
                }
            }
        }
    }
}

#[component]
fn ToolButton(label: &'static str, disabled: bool, onclick: EventHandler<MouseEvent>) -> Element {
    let opacity = if disabled { "0.5" } else { "1" };
    rsx! {
        button {
            style: "padding: 6px 10px; border-radius: 6px; border: 1px solid #ccc; background: white; font-size: 13px; opacity: {opacity};",
            disabled: disabled,
            onclick: move |evt| onclick.call(evt),
            "{label}"
        }
    }
}

#[component]
fn SlotButton(slot: CaptureSlot, active: bool, onclick: EventHandler<MouseEvent>) -> Element {
    let colour = slot_colour(slot);
    let background = if active { colour } else { "white" };
    let text = if active { "white" } else { colour };
    rsx! {
        button {
            style: "padding: 6px 10px; border-radius: 6px; border: 1px solid {colour}; background: {background}; color: {text}; font-size: 13px;",
            onclick: move |evt| onclick.call(evt),
            "{slot.label()}"
        }
    }
}
