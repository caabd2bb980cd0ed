//! Shared UI components.

use eframe::egui::{self, Color32, Response, RichText, Ui};

use crate::registry::{MessageKind, StatusMessage};

/// Status indicator colors.
pub mod colors {
    use super::Color32;

    pub const SUCCESS: Color32 = Color32::from_rgb(100, 200, 100);
    pub const ERROR: Color32 = Color32::from_rgb(255, 100, 100);
    pub const WARNING: Color32 = Color32::from_rgb(255, 200, 100);
    pub const NEUTRAL: Color32 = Color32::from_rgb(150, 150, 150);
}

/// Render a panel header with title.
pub fn panel_header(ui: &mut Ui, title: &str) {
    ui.heading(RichText::new(title).size(24.0));
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(20.0);
}

/// Render a tab button; `selected` draws it highlighted.
pub fn tab_button(ui: &mut Ui, icon: &str, label: &str, selected: bool) -> Response {
    let text = RichText::new(format!("{icon}  {label}")).size(16.0);
    ui.add(egui::Button::new(text).selected(selected).min_size(egui::vec2(180.0, 32.0)))
}

/// Render a button with an icon that can be disabled.
pub fn icon_button(ui: &mut Ui, icon: &str, label: &str, enabled: bool) -> Response {
    let text = RichText::new(format!("{icon}  {label}")).size(14.0);
    ui.add_enabled(enabled, egui::Button::new(text).min_size(egui::vec2(160.0, 30.0)))
}

/// Render the success/error banner above the form.
pub fn status_banner(ui: &mut Ui, message: &StatusMessage) {
    let color = match message.kind() {
        MessageKind::Success => colors::SUCCESS,
        MessageKind::Error => colors::ERROR,
    };

    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(1.0, color))
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.colored_label(color, message.text());
        });
}

/// Render a `Label: value` line inside a card.
pub fn detail_row(ui: &mut Ui, icon: &str, label: &str, value: &str) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(icon).color(colors::NEUTRAL));
        ui.strong(format!("{label}:"));
        ui.label(value);
    });
}
