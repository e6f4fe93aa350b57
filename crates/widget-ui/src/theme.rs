//! UI theme derived from the host's primary colour

use egui::{Color32, CornerRadius, Stroke, Vec2};

pub const BACKGROUND: Color32 = Color32::WHITE;
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(0, 0, 0);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(140, 140, 140);
pub const OFFSET: Color32 = Color32::from_rgb(240, 240, 240);
pub const BOT_BUBBLE: Color32 = Color32::from_rgb(242, 242, 242);
pub const BORDER: Color32 = Color32::from_rgb(230, 230, 230);
pub const ERROR: Color32 = Color32::from_rgb(245, 34, 45);
pub const ERROR_BG: Color32 = Color32::from_rgb(255, 241, 240);
pub const DEFAULT_PRIMARY: Color32 = Color32::from_rgb(0x18, 0x90, 0xff);

pub const BUBBLE_ROUNDING: CornerRadius = CornerRadius::same(4);
pub const PANEL_PADDING: Vec2 = Vec2::new(16.0, 12.0);
pub const MOBILE_PANEL_PADDING: Vec2 = Vec2::new(20.0, 16.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetTheme {
    pub primary: Color32,
    pub is_mobile: bool,
}

impl WidgetTheme {
    /// Falls back to the default blue when `hex` does not parse.
    pub fn new(hex: &str, is_mobile: bool) -> Self {
        let primary = parse_hex_color(hex).unwrap_or_else(|| {
            log::warn!("Invalid primary colour {:?}, using default", hex);
            DEFAULT_PRIMARY
        });
        Self { primary, is_mobile }
    }

    pub fn padding(&self) -> Vec2 {
        if self.is_mobile {
            MOBILE_PANEL_PADDING
        } else {
            PANEL_PADDING
        }
    }

    pub fn body_size(&self) -> f32 {
        if self.is_mobile {
            16.0
        } else {
            14.0
        }
    }
}

/// Accepts `1890ff`, `#1890ff`, or the short form `#19f`.
pub fn parse_hex_color(hex: &str) -> Option<Color32> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color32::from_rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            let mut rgb = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                rgb[i] = channel(&c.to_string())? * 17;
            }
            Some(Color32::from_rgb(rgb[0], rgb[1], rgb[2]))
        }
        _ => None,
    }
}

/// Apply the light widget theme to an egui context
pub fn apply_theme(ctx: &egui::Context, theme: &WidgetTheme) {
    let mut style = (*ctx.style()).clone();

    style.visuals.dark_mode = false;
    style.visuals.panel_fill = BACKGROUND;
    style.visuals.window_fill = BACKGROUND;
    style.visuals.extreme_bg_color = BACKGROUND;

    style.visuals.widgets.inactive.bg_fill = OFFSET;
    style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    style.visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, theme.primary);
    style.visuals.widgets.active.bg_fill = theme.primary;

    style.visuals.selection.bg_fill = theme.primary.linear_multiply(0.3);
    style.visuals.selection.stroke = Stroke::new(1.0, theme.primary);

    style.spacing.item_spacing = Vec2::new(8.0, 6.0);

    ctx.set_style(style);
}
