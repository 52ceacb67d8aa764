// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Settings page: persistent preview, export, and renderer configuration.

use dioxus::prelude::*;

use slidecrop_core::{AppConfig, ExportLayout, TemplatePolicy};

use crate::services::app_services::AppServices;
use crate::state::AppState;

#[component]
pub fn Settings() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    // Edited locally; applied to the app state only on save.
    let mut draft = use_signal(|| state.read().config.clone());
    let mut save_msg = use_signal(|| Option::<String>::None);

    let config = draft.read().clone();
    let library_dir = config.pdfium_library_dir.clone().unwrap_or_default();

    rsx! {
        div { style: "max-width: 560px;",
            h1 { "Settings" }

            section { style: "margin: 16px 0;",
                h3 { "Preview" }
                NumberRow {
                    label: "Display width (px)",
                    value: config.display_width,
                    on_change: move |v: f64| {
                        if v >= 100.0 {
                            draft.write().display_width = v;
                        }
                    },
                }
                NumberRow {
                    label: "Viewport height (px)",
                    value: config.viewport_height,
                    on_change: move |v: f64| {
                        if v >= 100.0 {
                            draft.write().viewport_height = v;
                        }
                    },
                }
                NumberRow {
                    label: "Zoom step",
                    value: config.zoom_step,
                    on_change: move |v: f64| {
                        if v > 1.0 {
                            draft.write().zoom_step = v;
                        }
                    },
                }
                NumberRow {
                    label: "Smallest region (pt)",
                    value: config.min_region_extent,
                    on_change: move |v: f64| {
                        if v >= 0.0 {
                            draft.write().min_region_extent = v;
                        }
                    },
                }
            }

            section { style: "margin: 16px 0;",
                h3 { "Export" }
                NumberRow {
                    label: "Export scale (px per pt)",
                    value: config.export_scale,
                    on_change: move |v: f64| {
                        if v > 0.0 && v <= 8.0 {
                            draft.write().export_scale = v;
                        }
                    },
                }
                NumberRow {
                    label: "Pixels per inch",
                    value: config.pixels_per_inch,
                    on_change: move |v: f64| {
                        if v > 0.0 {
                            draft.write().pixels_per_inch = v;
                        }
                    },
                }
                NumberRow {
                    label: "Slide offset (in)",
                    value: config.slide_offset_inches,
                    on_change: move |v: f64| {
                        if v >= 0.0 && v < 3.75 {
                            draft.write().slide_offset_inches = v;
                        }
                    },
                }
                SettingRow {
                    label: "Shrink pictures to fit the slide",
                    checked: config.fit_to_slide,
                    on_toggle: move |v: bool| { draft.write().fit_to_slide = v; },
                }
                div { style: ROW_STYLE,
                    span { "Regions come from" }
                    select {
                        style: INPUT_STYLE,
                        value: policy_label(config.template_policy),
                        onchange: move |evt| {
                            if let Some(policy) = policy_from_label(&evt.value()) {
                                draft.write().template_policy = policy;
                            }
                        },
                        option { value: "first", "First page" }
                        option { value: "earliest", "Earliest page with a region" }
                    }
                }
                div { style: ROW_STYLE,
                    span { "Slides" }
                    select {
                        style: INPUT_STYLE,
                        value: layout_label(config.export_layout),
                        onchange: move |evt| {
                            if let Some(layout) = layout_from_label(&evt.value()) {
                                draft.write().export_layout = layout;
                            }
                        },
                        option { value: "region", "One slide per region" }
                        option { value: "page", "One slide per page" }
                    }
                }
            }

            section { style: "margin: 16px 0;",
                h3 { "Renderer" }
                div { style: ROW_STYLE,
                    span { "pdfium library folder" }
                    input {
                        r#type: "text",
                        style: "{INPUT_STYLE} width: 240px;",
                        placeholder: "system default",
                        value: "{library_dir}",
                        onchange: move |evt| {
                            let dir = evt.value().trim().to_string();
                            draft.write().pdfium_library_dir = (!dir.is_empty()).then_some(dir);
                        },
                    }
                }
                p { style: "color: #666; font-size: 13px;",
                    "Takes effect the next time a PDF is opened."
                }
            }

            div { style: "display: flex; gap: 8px;",
                button {
                    style: "flex: 1; padding: 10px; border-radius: 8px; border: none; background: #007aff; color: white; font-size: 15px;",
                    onclick: {
                        let svc = svc.clone();
                        move |_| {
                            let config = draft.read().clone();
                            match svc.save_config(&config) {
                                Ok(()) => {
                                    tracing::info!("settings saved");
                                    state.write().apply_config(config);
                                    save_msg.set(Some("Settings saved.".into()));
                                }
                                Err(e) => {
                                    tracing::error!(error = %e, "failed to save settings");
                                    save_msg.set(Some(format!("Save failed: {e}")));
                                }
                            }
                        }
                    },
                    "Save Settings"
                }
                button {
                    style: "padding: 10px; border-radius: 8px; border: 1px solid #ccc; background: white; font-size: 15px;",
                    onclick: move |_| {
                        draft.set(AppConfig::default());
                        save_msg.set(Some("Defaults restored. Save to keep them.".into()));
                    },
                    "Defaults"
                }
            }
            if let Some(ref msg) = *save_msg.read() {
                p { style: "color: #34c759; font-size: 14px; text-align: center; margin-top: 8px;",
                    "{msg}"
                }
            }

            section { style: "margin: 24px 0;",
                h3 { "About" }
                p { style: "color: #666; font-size: 14px;",
                    "SlideCrop v{VERSION}"
                    br {}
                    "PMPL-1.0-or-later"
                }
            }
        }
    }
}

const VERSION: &str = env!("CARGO_PKG_VERSION");
const ROW_STYLE: &str = "display: flex; justify-content: space-between; align-items: center; padding: 10px 0; border-bottom: 1px solid #f0f0f0;";
const INPUT_STYLE: &str = "padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px;";

#[component]
fn SettingRow(label: &'static str, checked: bool, on_toggle: EventHandler<bool>) -> Element {
    rsx! {
        div { style: ROW_STYLE,
            span { "{label}" }
            input {
                r#type: "checkbox",
                checked: checked,
                onchange: move |evt| {
                    on_toggle.call(evt.checked());
                },
            }
        }
    }
}

/// Numeric input; unparsable entries are ignored.
#[component]
fn NumberRow(label: &'static str, value: f64, on_change: EventHandler<f64>) -> Element {
    rsx! {
        div { style: ROW_STYLE,
            span { "{label}" }
            input {
                r#type: "number",
                step: "any",
                style: "{INPUT_STYLE} width: 90px; text-align: right;",
                value: "{value}",
                onchange: move |evt| {
                    if let Ok(v) = evt.value().trim().parse::<f64>()
                        && v.is_finite()
                    {
                        on_change.call(v);
                    }
                },
            }
        }
    }
}

fn policy_label(policy: TemplatePolicy) -> &'static str {
    match policy {
        TemplatePolicy::FirstPage => "first",
        TemplatePolicy::EarliestPage => "earliest",
    }
}

fn policy_from_label(label: &str) -> Option<TemplatePolicy> {
    match label {
        "first" => Some(TemplatePolicy::FirstPage),
        "earliest" => Some(TemplatePolicy::EarliestPage),
        _ => None,
    }
}

fn layout_label(layout: ExportLayout) -> &'static str {
    match layout {
        ExportLayout::SlidePerRegion => "region",
        ExportLayout::SlidePerPage => "page",
    }
}

fn layout_from_label(label: &str) -> Option<ExportLayout> {
    match label {
        "region" => Some(ExportLayout::SlidePerRegion),
        "page" => Some(ExportLayout::SlidePerPage),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_labels_round_trip() {
        for policy in [TemplatePolicy::FirstPage, TemplatePolicy::EarliestPage] {
            assert_eq!(policy_from_label(policy_label(policy)), Some(policy));
        }
        for layout in [ExportLayout::SlidePerRegion, ExportLayout::SlidePerPage] {
            assert_eq!(layout_from_label(layout_label(layout)), Some(layout));
        }
        assert_eq!(policy_from_label("last"), None);
    }
}
