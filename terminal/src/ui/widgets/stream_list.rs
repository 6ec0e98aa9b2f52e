//! # Stream Tables
//!
//! Grid rendering for the "created by me" and "streaming to me" lists.

use crate::app::{App, AppState, StreamAction};
use crate::ui::theme::Theme;
use lib_core::{Stream, StreamRole};
use lib_utils::time::format_unix_local;
use shared::utils::truncate_address;

const HEADERS_SENT: [&str; 7] = ["ID", "Recipient", "Deposit", "Start", "Stop", "Status", ""];
const HEADERS_RECEIVED: [&str; 7] = ["ID", "Sender", "Deposit", "Start", "Stop", "Status", ""];

/// Configuration for table styling
pub struct TableConfig {
    pub num_columns: usize,
    pub spacing: [f32; 2],
    pub striped: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            num_columns: 7,
            spacing: [14.0, 6.0],
            striped: true,
        }
    }
}

/// Render a grid with a header row; rows are drawn by the callback
pub fn render_table<F>(ui: &mut egui::Ui, id: &str, config: TableConfig, headers: &[&str], theme: &Theme, render_rows: F)
where
    F: FnOnce(&mut egui::Ui),
{
    egui::Grid::new(id)
        .num_columns(config.num_columns)
        .spacing(config.spacing)
        .striped(config.striped)
        .show(ui, |ui| {
            for header in headers {
                ui.colored_label(theme.selected, *header);
            }
            ui.end_row();

            render_rows(ui);
        });
}

pub fn render_empty_state(ui: &mut egui::Ui, primary_text: &str, theme: &Theme) {
    ui.vertical_centered(|ui| {
        ui.add_space(8.0);
        ui.colored_label(theme.dim, primary_text);
        ui.add_space(8.0);
    });
}

/// Render one list of streams with the action matching the account's role.
///
/// Senders get a cancel button, recipients a withdraw button; both are disabled while the
/// same action on the same stream is in flight.
pub fn render_stream_table(
    ui: &mut egui::Ui,
    role: StreamRole,
    streams: &[Stream],
    state: &AppState,
    app: &mut App,
    theme: &Theme,
) {
    let (id, headers, action, empty) = match role {
        StreamRole::Sender => ("streams_sent", HEADERS_SENT, StreamAction::Cancel, "No streams created yet"),
        StreamRole::Recipient => (
            "streams_received",
            HEADERS_RECEIVED,
            StreamAction::Withdraw,
            "Nobody is streaming to this account",
        ),
    };

    if streams.is_empty() {
        render_empty_state(ui, empty, theme);
        return;
    }

    let now = lib_utils::time::now_utc().timestamp().max(0) as u64;

    render_table(ui, id, TableConfig::default(), &headers, theme, |ui| {
        for stream in streams {
            let counterparty = stream.counterparty(role).to_string();
            let status = stream.status_at(now);

            ui.monospace(format!("#{}", stream.id));
            ui.monospace(truncate_address(&counterparty)).on_hover_text(counterparty.as_str());
            ui.monospace(stream.deposit_display());
            ui.label(format_unix_local(stream.start_time as i64));
            ui.label(format_unix_local(stream.stop_time as i64));
            ui.colored_label(theme.status_color(status), format!("{:?}", status));

            let pending = state.is_action_pending(stream.id, action);
            let text = if pending { "Waiting for wallet..." } else { action.label() };
            if ui.add_enabled(!pending, egui::Button::new(text)).clicked() {
                match action {
                    StreamAction::Cancel => app.handle_cancel_stream_click(stream.id),
                    StreamAction::Withdraw => app.handle_withdraw_click(stream.id),
                }
            }
            ui.end_row();
        }
    });
}
