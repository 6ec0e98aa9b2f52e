//! # GUI Theme
//!
//! Dark terminal theme for egui: black panels, white text, one accent colour and the
//! usual status colours. Stream rows are tinted by [`StreamStatus`].

use egui::Theme as EguiTheme;
use egui::{Color32, Context, Stroke, Visuals};
use lib_core::StreamStatus;

/// Colour palette
#[derive(Debug, Clone)]
pub struct Palette {
    /// Pure black background
    pub background: Color32,
    /// Bright white text
    pub text: Color32,
    /// Primary accent (buttons, headings)
    pub accent: Color32,
    /// Darker accent for hovered/pressed fills
    pub accent_dark: Color32,
    /// Dark gray borders
    pub border: Color32,
    pub success: Color32,
    pub error: Color32,
    pub warning: Color32,
    pub info: Color32,
    /// Dark gray for inactive widgets
    pub inactive: Color32,
    /// Medium gray for secondary text
    pub secondary: Color32,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            background: Color32::from_rgb(0, 0, 0),       // #000000
            text: Color32::from_rgb(255, 255, 255),       // #FFFFFF
            accent: Color32::from_rgb(0, 184, 148),       // #00B894
            accent_dark: Color32::from_rgb(0, 61, 49),    // #003D31
            border: Color32::from_rgb(51, 51, 51),        // #333333
            success: Color32::from_rgb(0, 230, 118),      // #00E676
            error: Color32::from_rgb(255, 64, 64),        // #FF4040
            warning: Color32::from_rgb(255, 170, 0),      // #FFAA00
            info: Color32::from_rgb(100, 150, 255),       // #6496FF
            inactive: Color32::from_rgb(26, 26, 26),      // #1A1A1A
            secondary: Color32::from_rgb(150, 150, 150),  // #969696
        }
    }
}

/// Application theme
pub struct Theme {
    pub colors: Palette,
    /// Normal text color
    pub normal: Color32,
    /// Selected/highlighted items
    pub selected: Color32,
    pub border: Color32,
    /// Dimmed/secondary text
    pub dim: Color32,
    pub success: Color32,
    pub error: Color32,
    pub warning: Color32,
    pub info: Color32,
    pub background: Color32,
}

impl Default for Theme {
    fn default() -> Self {
        let colors = Palette::default();
        Theme {
            normal: colors.text,
            selected: colors.accent,
            border: colors.border,
            dim: colors.secondary,
            success: colors.success,
            error: colors.error,
            warning: colors.warning,
            info: colors.info,
            background: colors.background,
            colors,
        }
    }
}

impl Theme {
    /// Colour for a stream's lifetime stage
    pub fn status_color(&self, status: StreamStatus) -> Color32 {
        match status {
            StreamStatus::Scheduled => self.info,
            StreamStatus::Streaming => self.success,
            StreamStatus::Ended => self.dim,
        }
    }

    pub fn visuals(&self) -> Visuals {
        let colors = &self.colors;
        let mut visuals = Visuals::dark();

        visuals.override_text_color = Some(colors.text);
        visuals.faint_bg_color = colors.background;
        visuals.extreme_bg_color = colors.background;
        visuals.panel_fill = colors.background;
        visuals.window_fill = colors.background;
        visuals.window_stroke = Stroke::new(1.0, colors.border);

        visuals.widgets.noninteractive.bg_fill = colors.inactive;
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, colors.border);
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, colors.text);

        visuals.widgets.inactive.bg_fill = colors.inactive;
        visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, colors.border);
        visuals.widgets.inactive.weak_bg_fill = Color32::from_rgb(30, 30, 30);

        visuals.widgets.hovered.bg_fill = colors.accent_dark;
        visuals.widgets.hovered.bg_stroke = Stroke::new(2.0, colors.accent);
        visuals.widgets.hovered.weak_bg_fill = colors.accent_dark;

        visuals.widgets.active.bg_fill = colors.accent_dark;
        visuals.widgets.active.bg_stroke = Stroke::new(2.0, colors.accent);
        visuals.widgets.active.weak_bg_fill = colors.accent_dark;

        visuals.widgets.open.bg_fill = colors.accent_dark;
        visuals.widgets.open.bg_stroke = Stroke::new(2.0, colors.accent);

        visuals.selection.bg_fill = Color32::from_rgba_unmultiplied(0, 184, 148, 76);
        visuals.selection.stroke = Stroke::new(2.0, colors.accent);
        visuals.hyperlink_color = colors.info;

        visuals
    }

    /// Apply the theme to an egui context.
    ///
    /// Uses `style_mut_of` for both egui themes so a system theme switch keeps the look.
    pub fn apply(ctx: &Context) {
        let visuals = Theme::default().visuals();
        for egui_theme in [EguiTheme::Dark, EguiTheme::Light] {
            ctx.style_mut_of(egui_theme, |style| {
                style.visuals = visuals.clone();
                style.spacing.item_spacing = egui::Vec2::new(6.0, 4.0);
                style.spacing.button_padding = egui::Vec2::new(8.0, 4.0);
                style.spacing.interact_size = egui::Vec2::new(32.0, 24.0);
            });
        }
        tracing::debug!("Applied terminal theme");
    }
}
