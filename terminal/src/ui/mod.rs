//! # GUI Rendering
//!
//! Each frame takes a snapshot of [`AppState`](crate::app::AppState), renders the
//! header and the streams screen from it, and dispatches user input back to the
//! [`App`]. The lock is never held while widgets are drawn.

pub mod screens;
pub mod theme;
pub mod widgets;

use crate::app::App;
use std::time::Duration;
use widgets::notifications::NotificationManager;

/// Background events arrive between frames; keep repainting so they show up.
const REPAINT_INTERVAL: Duration = Duration::from_millis(250);

/// Main render function, called every frame
pub fn render(ctx: &egui::Context, app: &mut App) {
    let state = match app.state.try_read() {
        Some(guard) => guard.clone(),
        // A task holds the lock; skip this frame
        None => return,
    };

    let theme = theme::Theme::default();

    egui::TopBottomPanel::top("header").show(ctx, |ui| {
        ui.add_space(6.0);
        widgets::header::render_header(ui, &state, app, &theme);
        ui.add_space(6.0);
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        screens::streams::render(ui, &state, app);
    });
}

/// The eframe application: owns the [`App`] and the toast queue.
pub struct TerminalWindow {
    app: App,
    notifications: NotificationManager,
}

impl TerminalWindow {
    pub fn new(cc: &eframe::CreationContext<'_>, app: App) -> Self {
        theme::Theme::apply(&cc.egui_ctx);
        Self {
            app,
            notifications: NotificationManager::new(),
        }
    }
}

impl eframe::App for TerminalWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.app.on_tick();
        self.notifications.push_all(self.app.take_notifications());

        render(ctx, &mut self.app);

        self.notifications.show(ctx);
        ctx.request_repaint_after(REPAINT_INTERVAL);
    }
}
