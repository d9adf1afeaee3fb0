//! Small egui building blocks shared by the pages.

use eframe::egui;
use egui::{Color32, RichText, Ui};

use crate::render::Rendered;
use crate::session::Session;

pub const ERROR_RED: Color32 = Color32::from_rgb(0xff, 0x44, 0x44);
pub const ACCENT_GREEN: Color32 = Color32::from_rgb(0x39, 0xff, 0x14);

pub fn difficulty_color(difficulty: &str) -> Color32 {
    match difficulty {
        "intermediate" => Color32::from_rgb(0xff, 0xd7, 0x00),
        "advanced" => Color32::from_rgb(0xff, 0x6b, 0x6b),
        _ => ACCENT_GREEN,
    }
}

pub fn tag(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).small().background_color(ui.visuals().faint_bg_color));
}

pub fn colored_tag(ui: &mut Ui, text: &str, color: Color32) {
    ui.label(RichText::new(text).small().color(color));
}

pub fn card<R>(ui: &mut Ui, width: f32, add_contents: impl FnOnce(&mut Ui) -> R) -> R {
    egui::Frame::group(ui.style())
        .show(ui, |ui| {
            ui.set_width(width);
            ui.vertical(add_contents).inner
        })
        .inner
}

/// Draws the cards of a render pass, or its spinner/placeholder/error text.
pub fn show_rendered<V>(ui: &mut Ui, rendered: &Rendered<V>, mut card: impl FnMut(&mut Ui, &V)) {
    match rendered {
        Rendered::Loading => {
            ui.add_space(20.0);
            ui.vertical_centered(|ui| {
                ui.spinner();
                ui.label(RichText::new("Loading…").weak());
            });
        }
        Rendered::Cards(cards) => {
            ui.horizontal_wrapped(|ui| {
                for view in cards {
                    card(ui, view);
                }
            });
        }
        Rendered::Empty(text) => {
            ui.add_space(20.0);
            ui.vertical_centered(|ui| ui.label(RichText::new(*text).weak()));
        }
        Rendered::Error(text) => {
            ui.add_space(20.0);
            ui.vertical_centered(|ui| ui.label(RichText::new(*text).color(ERROR_RED)));
        }
    }
}

/// Choice box over string options where the empty string means "All".
pub fn select(ui: &mut Ui, label: &str, value: &mut String, options: &[&str]) {
    let shown = if value.is_empty() { "All" } else { value.as_str() }.to_string();
    egui::ComboBox::from_label(label)
        .selected_text(shown)
        .show_ui(ui, |ui| {
            ui.selectable_value(value, String::new(), "All");
            for option in options {
                ui.selectable_value(value, option.to_string(), *option);
            }
        });
}

/// Alert windows, one per pending notice.
pub fn show_notices(ctx: &egui::Context, session: &mut Session) {
    let mut dismissed = None;
    for (i, notice) in session.notices().iter().enumerate() {
        egui::Window::new("Notice")
            .id(egui::Id::new(("notice", i)))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_TOP, [0.0, 40.0 + i as f32 * 10.0])
            .show(ctx, |ui| {
                ui.label(notice);
                if ui.button("OK").clicked() {
                    dismissed = Some(i);
                }
            });
    }
    if let Some(i) = dismissed {
        session.dismiss(i);
    }
}
