use egui::{Color32, Pos2, ecolor::Hsva};
use uuid::Uuid;

use crate::config::SketchConfig;
use crate::element::sticker::STICKER_INK;
use crate::surface::Surface;

/// Marker thickness presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Thickness {
    Thin,
    Thick,
}

impl Thickness {
    pub const ALL: [Thickness; 2] = [Thickness::Thin, Thickness::Thick];

    pub fn label(self) -> &'static str {
        match self {
            Thickness::Thin => "Thin",
            Thickness::Thick => "Thick",
        }
    }

    /// Line width for this preset
    pub fn width(self, config: &SketchConfig) -> f32 {
        match self {
            Thickness::Thin => config.thin_width,
            Thickness::Thick => config.thick_width,
        }
    }
}

/// What the next pointer-down will do, drawn at the cursor while idle
#[derive(Debug, Clone, PartialEq)]
pub enum ToolPreview {
    /// A circle the size of the marker tip
    Marker { radius: f32, color: Color32 },
    /// A translucent copy of the armed sticker
    Sticker { glyph: String, size: f32 },
}

impl ToolPreview {
    /// Draw the preview centered on `at`
    pub fn draw(&self, surface: &mut dyn Surface, at: Pos2) {
        match self {
            ToolPreview::Marker { radius, color } => {
                surface.circle_outline(at, *radius, 1.0, *color);
            }
            ToolPreview::Sticker { glyph, size } => {
                surface.glyph(glyph, at, *size, STICKER_INK.gamma_multiply(0.5));
            }
        }
    }
}

/// A fully saturated color with a random hue
pub fn random_marker_color() -> Color32 {
    let bytes = Uuid::new_v4().into_bytes();
    let hue = u16::from_le_bytes([bytes[0], bytes[1]]) as f32 / u16::MAX as f32;
    Hsva::new(hue, 0.85, 0.85, 1.0).into()
}

/// Marker settings, the sticker palette and the armed sticker
#[derive(Debug, Clone)]
pub struct ToolState {
    thickness: Thickness,
    color: Color32,
    stickers: Vec<String>,
    armed_sticker: Option<String>,
    /// Last idle pointer position over the canvas
    preview_position: Option<Pos2>,
}

impl ToolState {
    pub fn new(config: &SketchConfig) -> Self {
        Self {
            thickness: Thickness::Thin,
            color: Color32::BLACK,
            stickers: config.stickers.clone(),
            armed_sticker: None,
            preview_position: None,
        }
    }

    pub fn thickness(&self) -> Thickness {
        self.thickness
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn stickers(&self) -> &[String] {
        &self.stickers
    }

    pub fn armed_sticker(&self) -> Option<&str> {
        self.armed_sticker.as_deref()
    }

    pub fn preview_position(&self) -> Option<Pos2> {
        self.preview_position
    }

    /// Select a marker preset; this also disarms any sticker
    pub fn select_thickness(&mut self, thickness: Thickness, color: Option<Color32>) {
        self.thickness = thickness;
        if let Some(color) = color {
            self.color = color;
        }
        self.armed_sticker = None;
    }

    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    pub fn arm_sticker(&mut self, glyph: impl Into<String>) {
        self.armed_sticker = Some(glyph.into());
    }

    /// Take the armed sticker, leaving the marker selected
    pub fn disarm_sticker(&mut self) -> Option<String> {
        self.armed_sticker.take()
    }

    /// Add a glyph to the palette. Returns the trimmed glyph, or `None` for empty text.
    pub fn add_sticker(&mut self, text: &str) -> Option<String> {
        let glyph = text.trim();
        if glyph.is_empty() {
            return None;
        }
        if !self.stickers.iter().any(|existing| existing == glyph) {
            self.stickers.push(glyph.to_owned());
        }
        Some(glyph.to_owned())
    }

    pub fn set_preview_position(&mut self, position: Option<Pos2>) {
        self.preview_position = position;
    }

    /// The preview for the currently selected tool
    pub fn preview(&self, config: &SketchConfig) -> ToolPreview {
        match &self.armed_sticker {
            Some(glyph) => ToolPreview::Sticker {
                glyph: glyph.clone(),
                size: config.sticker_size,
            },
            None => ToolPreview::Marker {
                radius: self.thickness.width(config) / 2.0 * config.preview_radius_scale,
                color: self.color,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_follows_armed_sticker() {
        let config = SketchConfig::default();
        let mut tools = ToolState::new(&config);

        assert_eq!(
            tools.preview(&config),
            ToolPreview::Marker {
                radius: config.thin_width / 2.0,
                color: Color32::BLACK
            }
        );

        tools.arm_sticker("🎉");
        assert_eq!(
            tools.preview(&config),
            ToolPreview::Sticker {
                glyph: "🎉".to_owned(),
                size: config.sticker_size
            }
        );

        tools.select_thickness(Thickness::Thick, None);
        assert!(tools.armed_sticker().is_none());
        assert!(matches!(tools.preview(&config), ToolPreview::Marker { radius, .. } if radius == config.thick_width / 2.0));
    }

    #[test]
    fn test_preview_radius_scale_is_configurable() {
        let config = SketchConfig {
            preview_radius_scale: 2.0,
            ..SketchConfig::default()
        };
        let tools = ToolState::new(&config);
        assert!(matches!(tools.preview(&config), ToolPreview::Marker { radius, .. } if radius == config.thin_width));
    }

    #[test]
    fn test_add_sticker_trims_and_deduplicates() {
        let config = SketchConfig::default();
        let mut tools = ToolState::new(&config);
        let before = tools.stickers().len();

        assert_eq!(tools.add_sticker("  🐸 "), Some("🐸".to_owned()));
        assert_eq!(tools.add_sticker("🐸"), Some("🐸".to_owned()));
        assert_eq!(tools.add_sticker("   "), None);
        assert_eq!(tools.stickers().len(), before + 1);
    }

    #[test]
    fn test_random_marker_color_is_opaque() {
        for _ in 0..8 {
            assert_eq!(random_marker_color().a(), 255);
        }
    }
}
