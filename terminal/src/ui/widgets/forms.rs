//! # Form Components
//!
//! Reusable form elements for the create-stream panel

use crate::ui::theme::Theme;
use egui;

/// Render a labelled single-line text input
pub fn render_text_input(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut String,
    hint: &str,
    size: [f32; 2],
) -> egui::Response {
    ui.label(egui::RichText::new(label).size(14.0));
    ui.add_sized(
        size,
        egui::TextEdit::singleline(value).hint_text(hint).font(egui::TextStyle::Monospace),
    )
}

/// Render a styled button, greyed out when `enabled` is false
pub fn render_button(
    ui: &mut egui::Ui,
    text: &str,
    enabled: bool,
    fill_color: Option<egui::Color32>,
    min_size: Option<egui::Vec2>,
) -> egui::Response {
    let mut button = egui::Button::new(egui::RichText::new(text).size(16.0));

    if let Some(color) = fill_color {
        button = button.fill(color);
    }

    if let Some(size) = min_size {
        button = button.min_size(size);
    }

    ui.add_enabled(enabled, button)
}

/// Render a form heading
pub fn render_form_heading(ui: &mut egui::Ui, text: &str, theme: &Theme) {
    let heading = egui::RichText::new(text).size(20.0).strong().color(theme.selected);
    ui.label(heading);
    ui.add_space(12.0);
}

/// Render an error message
pub fn render_error(ui: &mut egui::Ui, error: &str, theme: &Theme) {
    ui.label(egui::RichText::new(error).size(14.0).color(theme.error));
    ui.add_space(6.0);
}

/// Render a help/hint text
pub fn render_hint(ui: &mut egui::Ui, hint: &str, theme: &Theme) {
    ui.label(egui::RichText::new(hint).size(12.0).color(theme.dim));
}
