//! # Header Widget
//!
//! Title bar with the wallet connection control.

use crate::app::{App, AppState};
use crate::ui::theme::Theme;
use crate::ui::widgets::forms::render_button;
use shared::utils::truncate_address;

pub fn render_header(ui: &mut egui::Ui, state: &AppState, app: &mut App, theme: &Theme) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("STREAM TERMINAL").size(22.0).strong().color(theme.selected));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            match state.account() {
                Some(account) => {
                    if render_button(ui, "Disconnect", true, None, None).clicked() {
                        app.handle_wallet_disconnect_click();
                    }
                    if let Some(chain_id) = state.connection.chain_id {
                        ui.colored_label(theme.dim, format!("chain {}", chain_id));
                    }
                    ui.label(format!("Wallet Connected: {}", truncate_address(&account.to_string())))
                        .on_hover_text(account.to_string());
                }
                None => {
                    let label = if state.connecting { "Connecting..." } else { "Connect Wallet" };
                    let fill = Some(theme.colors.accent_dark);
                    if render_button(ui, label, !state.connecting, fill, None).clicked() {
                        app.handle_wallet_connect_click();
                    }
                    if state.connecting {
                        ui.spinner();
                    }
                }
            }
        });
    });
}
