//! # Notifications Widget
//!
//! Toast notifications (egui-notify) for wallet, query and transaction outcomes.

use crate::app::{Notification, NotificationLevel};
use egui_notify::Toasts;
use std::time::Duration;

/// Notification manager for the application
pub struct NotificationManager {
    /// Toast notification system
    pub toasts: Toasts,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self { toasts: Toasts::default() }
    }
}

impl NotificationManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: String) {
        self.toasts.success(message).duration(Some(Duration::from_secs(5)));
    }

    /// Errors stay up longer; they usually need reading.
    pub fn error(&mut self, message: String) {
        self.toasts.error(message).duration(Some(Duration::from_secs(10)));
    }

    pub fn warning(&mut self, message: String) {
        self.toasts.warning(message).duration(Some(Duration::from_secs(6)));
    }

    pub fn info(&mut self, message: String) {
        self.toasts.info(message).duration(Some(Duration::from_secs(4)));
    }

    /// Show every queued app notification as a toast
    pub fn push_all(&mut self, notifications: Vec<Notification>) {
        for notification in notifications {
            match notification.level {
                NotificationLevel::Info => self.info(notification.message),
                NotificationLevel::Success => self.success(notification.message),
                NotificationLevel::Warning => self.warning(notification.message),
                NotificationLevel::Error => self.error(notification.message),
            }
        }
    }

    /// Render notifications in the UI context
    pub fn show(&mut self, ctx: &egui::Context) {
        self.toasts.show(ctx);
    }
}
