//! Light and dark palettes, applied whenever the theme preference changes.

use super::UserDeckApp;
use eframe::egui::{
    self, style::WidgetVisuals, Color32, CornerRadius, FontFamily, FontId, Margin, Stroke,
    TextStyle, Visuals,
};
use userdeck_core::Theme;

pub(super) const COLOR_ACCENT: Color32 = Color32::from_rgb(0xE5, 0x70, 0x00);
pub(super) const COLOR_ACCENT_HOVER: Color32 = Color32::from_rgb(0xCE, 0x42, 0x2B);
pub(super) const COLOR_ERROR: Color32 = Color32::from_rgb(0xE0, 0x4F, 0x4F);
pub(super) const COLOR_SELECTION_STROKE: Color32 = Color32::from_rgb(0x3B, 0x82, 0xF6);

/// Surface and text colors for one theme.
#[derive(Debug, Clone, Copy)]
pub(super) struct Palette {
    pub(super) bg_primary: Color32,
    pub(super) bg_secondary: Color32,
    pub(super) bg_tertiary: Color32,
    pub(super) text_primary: Color32,
    pub(super) text_secondary: Color32,
    pub(super) text_muted: Color32,
    pub(super) border: Color32,
}

const DARK: Palette = Palette {
    bg_primary: Color32::from_rgb(0x0d, 0x11, 0x17),
    bg_secondary: Color32::from_rgb(0x16, 0x1b, 0x22),
    bg_tertiary: Color32::from_rgb(0x21, 0x26, 0x29),
    text_primary: Color32::from_rgb(0xc9, 0xd1, 0xd9),
    text_secondary: Color32::from_rgb(0x8b, 0x94, 0x9e),
    text_muted: Color32::from_rgb(0x6e, 0x76, 0x81),
    border: Color32::from_rgb(0x30, 0x36, 0x3d),
};

const LIGHT: Palette = Palette {
    bg_primary: Color32::from_rgb(0xff, 0xff, 0xff),
    bg_secondary: Color32::from_rgb(0xf6, 0xf8, 0xfa),
    bg_tertiary: Color32::from_rgb(0xea, 0xee, 0xf2),
    text_primary: Color32::from_rgb(0x1f, 0x23, 0x28),
    text_secondary: Color32::from_rgb(0x59, 0x63, 0x6e),
    text_muted: Color32::from_rgb(0x8c, 0x95, 0x9f),
    border: Color32::from_rgb(0xd0, 0xd7, 0xde),
};

pub(super) fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => LIGHT,
        Theme::Dark => DARK,
    }
}

fn widget(bg: Color32, stroke: Color32, fg: Color32, expansion: f32) -> WidgetVisuals {
    WidgetVisuals {
        bg_fill: bg,
        weak_bg_fill: bg,
        bg_stroke: Stroke::new(1.0, stroke),
        corner_radius: CornerRadius::same(6),
        fg_stroke: Stroke::new(1.0, fg),
        expansion,
    }
}

fn visuals_for(theme: Theme) -> Visuals {
    let colors = palette(theme);
    let mut visuals = if theme.is_dark() {
        Visuals::dark()
    } else {
        Visuals::light()
    };
    visuals.override_text_color = Some(colors.text_primary);
    visuals.window_fill = colors.bg_primary;
    visuals.panel_fill = colors.bg_secondary;
    visuals.extreme_bg_color = colors.bg_primary;
    visuals.faint_bg_color = colors.bg_tertiary;
    visuals.window_stroke = Stroke::new(1.0, colors.border);
    visuals.hyperlink_color = COLOR_ACCENT;
    visuals.selection.bg_fill = COLOR_SELECTION_STROKE.gamma_multiply(0.35);
    visuals.selection.stroke = Stroke::new(1.0, COLOR_SELECTION_STROKE);
    visuals.text_edit_bg_color = Some(colors.bg_tertiary);

    visuals.widgets.noninteractive = widget(
        colors.bg_secondary,
        colors.border,
        colors.text_secondary,
        0.0,
    );
    visuals.widgets.inactive = widget(
        colors.bg_tertiary,
        colors.border,
        colors.text_primary,
        0.0,
    );
    visuals.widgets.hovered = widget(COLOR_ACCENT_HOVER, COLOR_ACCENT_HOVER, Color32::WHITE, 0.5);
    visuals.widgets.active = widget(COLOR_ACCENT, COLOR_ACCENT, Color32::WHITE, 0.5);
    visuals.widgets.open = widget(COLOR_ACCENT, COLOR_ACCENT, Color32::WHITE, 0.0);
    visuals
}

impl UserDeckApp {
    pub(super) fn palette(&self) -> Palette {
        palette(self.theme.theme())
    }

    pub(super) fn ensure_style(&mut self, ctx: &egui::Context) {
        let theme = self.theme.theme();
        if self.style_applied == Some(theme) {
            return;
        }

        let mut style = (*ctx.style()).clone();
        style.visuals = visuals_for(theme);

        style.spacing.window_margin = Margin::same(12);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
        style.spacing.item_spacing = egui::vec2(10.0, 8.0);
        style.spacing.interact_size.y = 30.0;
        style.spacing.text_edit_width = 280.0;

        style.text_styles.insert(
            TextStyle::Heading,
            FontId::new(22.0, FontFamily::Proportional),
        );
        style
            .text_styles
            .insert(TextStyle::Body, FontId::new(15.0, FontFamily::Proportional));
        style.text_styles.insert(
            TextStyle::Button,
            FontId::new(14.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            TextStyle::Small,
            FontId::new(12.0, FontFamily::Proportional),
        );

        ctx.set_style(style);
        self.style_applied = Some(theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palettes_match_theme_brightness() {
        assert!(visuals_for(Theme::Dark).dark_mode);
        assert!(!visuals_for(Theme::Light).dark_mode);
        assert_ne!(palette(Theme::Dark).bg_primary, palette(Theme::Light).bg_primary);
    }
}
