//! Date plus hour/minute picker for stream start and stop times.

use crate::app::DateTimeInput;
use egui_extras::DatePickerButton;

/// Render a labelled picker. Returns the new value only when the user changed it.
pub fn render_datetime_picker(
    ui: &mut egui::Ui,
    id_salt: &str,
    label: &str,
    value: &DateTimeInput,
) -> Option<DateTimeInput> {
    let mut edited = *value;

    ui.label(egui::RichText::new(label).size(14.0));
    ui.horizontal(|ui| {
        ui.add(DatePickerButton::new(&mut edited.date).id_salt(id_salt));
        ui.add(
            egui::DragValue::new(&mut edited.hour)
                .range(0..=23)
                .custom_formatter(|n, _| format!("{:02}", n as u32)),
        );
        ui.label(":");
        ui.add(
            egui::DragValue::new(&mut edited.minute)
                .range(0..=59)
                .custom_formatter(|n, _| format!("{:02}", n as u32)),
        );

        match edited.to_local() {
            Some(time) => ui.weak(time.format("%Z").to_string()),
            None => ui.weak("invalid local time"),
        };
    });

    if edited != *value {
        Some(edited)
    } else {
        None
    }
}
