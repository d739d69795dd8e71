use egui::{Color32, Pos2};

use super::{DrawableId, Element};
use crate::surface::Surface;

/// Stickers render with the monochrome emoji font, so they need an ink color
pub const STICKER_INK: Color32 = Color32::from_rgb(40, 40, 40);

/// An emoji or short text placed once at a fixed position
#[derive(Clone, Debug, PartialEq)]
pub struct StickerPlacement {
    id: DrawableId,
    glyph: String,
    position: Pos2,
    size: f32,
}

impl StickerPlacement {
    pub fn new(glyph: impl Into<String>, position: Pos2, size: f32) -> Self {
        Self {
            id: DrawableId::new(),
            glyph: glyph.into(),
            position,
            size,
        }
    }

    pub fn glyph(&self) -> &str {
        &self.glyph
    }

    /// Center of the glyph
    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn size(&self) -> f32 {
        self.size
    }
}

impl Element for StickerPlacement {
    fn id(&self) -> DrawableId {
        self.id
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.glyph(&self.glyph, self.position, self.size, STICKER_INK);
    }
}
