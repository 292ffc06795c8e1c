// FuelWiseLog - ui/theme.rs
//
// Theme switching, vehicle colour parsing, and layout constants.
// No dependencies on app state or business logic.

use crate::core::model::ThemeMode;
use egui::Color32;

/// Apply the light/dark/system preference to the egui context.
pub fn apply_theme(ctx: &egui::Context, mode: ThemeMode) {
    let preference = match mode {
        ThemeMode::Light => egui::ThemePreference::Light,
        ThemeMode::Dark => egui::ThemePreference::Dark,
        ThemeMode::System => egui::ThemePreference::System,
    };
    ctx.set_theme(preference);
}

/// Scale every text style from the configured body size.
pub fn apply_font_size(ctx: &egui::Context, body_size: f32) {
    ctx.all_styles_mut(|style| {
        for (text_style, font_id) in style.text_styles.iter_mut() {
            font_id.size = match text_style {
                egui::TextStyle::Heading => body_size * 1.45,
                egui::TextStyle::Small => body_size * 0.8,
                egui::TextStyle::Monospace => body_size * 0.92,
                _ => body_size,
            };
        }
    });
}

/// Parse a `#RRGGBB` vehicle colour. Anything else maps to the first
/// palette colour.
pub fn vehicle_colour(hex: &str) -> Color32 {
    parse_hex(hex)
        .or_else(|| parse_hex(crate::util::constants::VEHICLE_COLOURS[0]))
        .unwrap_or(Color32::GRAY)
}

fn parse_hex(hex: &str) -> Option<Color32> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Field error text.
pub const ERROR_TEXT: Color32 = Color32::from_rgb(220, 38, 38); // Red 600

/// Positive figures (efficiency cells).
pub const GOOD_TEXT: Color32 = Color32::from_rgb(22, 163, 74); // Green 600

/// Layout constants.
pub const NAV_BAR_HEIGHT: f32 = 34.0;
pub const FORM_LABEL_WIDTH: f32 = 120.0;
pub const FORM_FIELD_WIDTH: f32 = 220.0;
pub const CARD_SPACING: f32 = 10.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_colour_parses_hex() {
        assert_eq!(vehicle_colour("#A7C7E7"), Color32::from_rgb(0xA7, 0xC7, 0xE7));
        assert_eq!(vehicle_colour("#a7c7e7"), Color32::from_rgb(0xA7, 0xC7, 0xE7));
    }

    #[test]
    fn test_vehicle_colour_falls_back_to_palette() {
        let fallback = Color32::from_rgb(0xB4, 0xA7, 0xD6);
        assert_eq!(vehicle_colour("purple"), fallback);
        assert_eq!(vehicle_colour("#12345"), fallback);
        assert_eq!(vehicle_colour("#GGGGGG"), fallback);
    }
}
