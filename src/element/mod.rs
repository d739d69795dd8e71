use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::surface::Surface;

pub(crate) mod sticker;
pub(crate) mod stroke;

pub use sticker::StickerPlacement;
pub use stroke::Stroke;

/// Stable identity of a drawable, preserved across undo and redo
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DrawableId(Uuid);

impl DrawableId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DrawableId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DrawableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Common trait that everything on the canvas implements
pub trait Element {
    /// Get the unique identifier for this element
    fn id(&self) -> DrawableId;

    /// Draw the element onto the surface
    fn draw(&self, surface: &mut dyn Surface);
}

/// Everything that can be committed to the canvas history
#[derive(Clone, Debug, PartialEq)]
pub enum Drawable {
    Stroke(Stroke),
    Sticker(StickerPlacement),
}

impl Drawable {
    pub fn as_stroke(&self) -> Option<&Stroke> {
        match self {
            Drawable::Stroke(stroke) => Some(stroke),
            Drawable::Sticker(_) => None,
        }
    }

    pub(crate) fn as_stroke_mut(&mut self) -> Option<&mut Stroke> {
        match self {
            Drawable::Stroke(stroke) => Some(stroke),
            Drawable::Sticker(_) => None,
        }
    }

    pub fn as_sticker(&self) -> Option<&StickerPlacement> {
        match self {
            Drawable::Sticker(sticker) => Some(sticker),
            Drawable::Stroke(_) => None,
        }
    }
}

impl Element for Drawable {
    fn id(&self) -> DrawableId {
        match self {
            Drawable::Stroke(s) => s.id(),
            Drawable::Sticker(s) => s.id(),
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        match self {
            Drawable::Stroke(s) => s.draw(surface),
            Drawable::Sticker(s) => s.draw(surface),
        }
    }
}

impl From<Stroke> for Drawable {
    fn from(stroke: Stroke) -> Self {
        Drawable::Stroke(stroke)
    }
}

impl From<StickerPlacement> for Drawable {
    fn from(sticker: StickerPlacement) -> Self {
        Drawable::Sticker(sticker)
    }
}
