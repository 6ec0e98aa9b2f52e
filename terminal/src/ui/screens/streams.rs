//! # Streams Screen
//!
//! The single page: create-stream form on the left, the account's streams on the right.
//! Inputs are edited as local copies of the frame's state snapshot and every change is
//! dispatched to the [`App`] handlers. The form stays editable without a wallet; only the
//! submit button waits for a connection.

use crate::app::{App, AppState};
use crate::ui::theme::Theme;
use crate::ui::widgets::datetime_picker::render_datetime_picker;
use crate::ui::widgets::forms;
use crate::ui::widgets::stream_list::render_stream_table;
use lib_core::StreamRole;
use lib_evm::CreateStreamStage;

pub fn render(ui: &mut egui::Ui, state: &AppState, app: &mut App) {
    let theme = Theme::default();

    ui.columns(2, |columns| {
        render_create_form(&mut columns[0], state, app, &theme);
        render_streams(&mut columns[1], state, app, &theme);
    });
}

fn render_create_form(ui: &mut egui::Ui, state: &AppState, app: &mut App, theme: &Theme) {
    forms::render_form_heading(ui, "Create Stream", theme);

    let running = state.create_stage.is_running();
    let connected = state.account().is_some();

    ui.add_enabled_ui(!running, |ui| {
        let mut deposit = state.form.deposit.clone();
        if forms::render_text_input(ui, "Deposit", &mut deposit, "0.0", [280.0, 28.0]).changed() {
            app.handle_deposit_change(deposit);
        }
        ui.add_space(8.0);

        let mut recipient = state.form.recipient.clone();
        if forms::render_text_input(ui, "Recipient", &mut recipient, "0x...", [420.0, 28.0]).changed() {
            app.handle_recipient_change(recipient);
        }
        ui.add_space(8.0);

        if let Some(start) = render_datetime_picker(ui, "stream_start", "Start", &state.form.start) {
            app.handle_start_time_change(start);
        }
        ui.add_space(8.0);

        if let Some(stop) = render_datetime_picker(ui, "stream_stop", "Stop", &state.form.stop) {
            app.handle_stop_time_change(stop);
        }
    });
    ui.add_space(16.0);

    if let Some(error) = &state.form.error {
        forms::render_error(ui, error, theme);
    }

    let fill = Some(theme.colors.accent_dark);
    let size = Some(egui::vec2(160.0, 32.0));
    if forms::render_button(ui, "Create Stream", state.can_create_stream(), fill, size).clicked() {
        app.handle_create_stream_click();
    }
    if !connected {
        forms::render_hint(ui, "Connect a wallet to create a stream", theme);
    }
    ui.add_space(8.0);

    render_stage(ui, &state.create_stage, theme);
}

/// Progress of the approve/create flow
fn render_stage(ui: &mut egui::Ui, stage: &CreateStreamStage, theme: &Theme) {
    match stage {
        CreateStreamStage::Idle => {}
        CreateStreamStage::Approving | CreateStreamStage::Approved { .. } | CreateStreamStage::Creating => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.colored_label(theme.info, stage.label());
            });
        }
        CreateStreamStage::Confirmed { create_tx, .. } => {
            ui.colored_label(theme.success, stage.label());
            forms::render_hint(ui, &format!("tx {}", create_tx), theme);
        }
        CreateStreamStage::Failed { step, message } => {
            ui.colored_label(theme.error, format!("{:?} step failed", step));
            forms::render_hint(ui, message, theme);
        }
    }
}

fn render_streams(ui: &mut egui::Ui, state: &AppState, app: &mut App, theme: &Theme) {
    if state.account().is_none() {
        forms::render_form_heading(ui, "Streams", theme);
        forms::render_hint(ui, "Connect a wallet to see the streams you are part of.", theme);
        return;
    }

    ui.horizontal(|ui| {
        forms::render_form_heading(ui, "Streams", theme);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
            if forms::render_button(ui, "Refresh", !state.streams.loading, None, None).clicked() {
                app.refresh_streams();
            }
            if state.streams.loading {
                ui.spinner();
            }
        });
    });

    if let Some(error) = &state.streams.error {
        forms::render_error(ui, error, theme);
    }

    let Some(lists) = &state.streams.data else {
        if state.streams.loading {
            forms::render_hint(ui, "Loading streams...", theme);
        }
        return;
    };

    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.label(egui::RichText::new("Streams I created").strong());
        ui.separator();
        render_stream_table(ui, StreamRole::Sender, &lists.sent, state, app, theme);
        ui.add_space(20.0);

        ui.label(egui::RichText::new("Streams to Me").strong());
        ui.separator();
        render_stream_table(ui, StreamRole::Recipient, &lists.received, state, app, theme);
    });
}
