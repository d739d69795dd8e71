use egui::Color32;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::SketchResult;

/// Environment variable naming a JSON file with a [`SketchConfig`]
pub const CONFIG_ENV_VAR: &str = "SKETCHPAD_CONFIG";

/// Largest accepted canvas side, in logical pixels
pub const MAX_CANVAS_SIDE: u32 = 4096;
/// Largest accepted export upscale factor
pub const MAX_EXPORT_SCALE: u32 = 16;

/// Settings for the canvas, the tools and the export.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing keys fall back to the defaults below
pub struct SketchConfig {
    /// Logical size of the canvas in pixels
    pub canvas_size: [u32; 2],
    /// Upscale factor applied when exporting
    pub export_scale: u32,
    /// Line width of the thin marker
    pub thin_width: f32,
    /// Line width of the thick marker
    pub thick_width: f32,
    /// Preview circle radius as a multiple of half the line width
    pub preview_radius_scale: f32,
    /// Glyph height of placed stickers
    pub sticker_size: f32,
    /// Built-in sticker palette
    pub stickers: Vec<String>,
    /// Canvas background, as unmultiplied RGBA
    pub background: [u8; 4],
    /// Pick a random marker color whenever a thickness preset is selected
    pub randomize_color_on_tool_switch: bool,
    /// File name offered for exports
    pub export_file_name: String,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            canvas_size: [256, 256],
            export_scale: 4,
            thin_width: 2.0,
            thick_width: 6.0,
            preview_radius_scale: 1.0,
            sticker_size: 24.0,
            stickers: ["😀", "🎉", "⭐", "🌮"].iter().map(|s| s.to_string()).collect(),
            background: [255, 255, 255, 255],
            randomize_color_on_tool_switch: true,
            export_file_name: "sketchpad.png".to_owned(),
        }
    }
}

impl SketchConfig {
    /// Parse a config from JSON text
    pub fn from_json(text: &str) -> SketchResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        Ok(config.validated())
    }

    /// Read a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> SketchResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Load the config named by [`CONFIG_ENV_VAR`], falling back to defaults
    pub fn from_env_or_default() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR) else {
            return Self::default();
        };

        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", Path::new(&path).display());
                config
            }
            Err(err) => {
                log::warn!(
                    "Ignoring config {}: {}",
                    Path::new(&path).display(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Clamp values that would make the canvas or the tools unusable
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        if self.canvas_size[0] == 0 || self.canvas_size[1] == 0 {
            self.canvas_size = defaults.canvas_size;
        }
        for side in &mut self.canvas_size {
            *side = (*side).min(MAX_CANVAS_SIDE);
        }
        self.export_scale = self.export_scale.clamp(1, MAX_EXPORT_SCALE);
        if !(self.thin_width > 0.0) {
            self.thin_width = defaults.thin_width;
        }
        if !(self.thick_width > 0.0) {
            self.thick_width = defaults.thick_width;
        }
        if !(self.preview_radius_scale > 0.0) {
            self.preview_radius_scale = defaults.preview_radius_scale;
        }
        if !(self.sticker_size > 0.0) {
            self.sticker_size = defaults.sticker_size;
        }
        self.stickers.retain(|glyph| !glyph.trim().is_empty());
        self
    }

    pub fn background_color(&self) -> Color32 {
        let [r, g, b, a] = self.background;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }

    /// Canvas size as an egui vector
    pub fn canvas_vec(&self) -> egui::Vec2 {
        egui::vec2(self.canvas_size[0] as f32, self.canvas_size[1] as f32)
    }

    /// Pixel size of an export, or `None` if it does not fit in `u32`
    pub fn export_size(&self) -> Option<[u32; 2]> {
        Some([
            self.canvas_size[0].checked_mul(self.export_scale)?,
            self.canvas_size[1].checked_mul(self.export_scale)?,
        ])
    }
}
