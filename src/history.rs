use egui::{Color32, Pos2};

use crate::element::{Drawable, DrawableId, Element, StickerPlacement, Stroke};

/// The canvas contents plus undo/redo history.
///
/// `committed` is drawn in order (first = bottom). Undo moves the top drawable
/// onto `redo_buffer`, redo moves it back. Any new drawable invalidates the
/// redo buffer.
#[derive(Debug, Default)]
pub struct HistoryStore {
    /// Drawables on the canvas, in z-order
    committed: Vec<Drawable>,
    /// Undone drawables, last undone on top
    redo_buffer: Vec<Drawable>,
    /// Index into `committed` of the stroke still being drawn
    pending: Option<usize>,
    /// Bumped on every mutation that changes what is drawn
    revision: u64,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a new stroke with its first point and keep it open for extension
    pub fn begin_stroke(&mut self, pos: Pos2, thickness: f32, color: Color32) -> DrawableId {
        self.end_pending();

        let stroke = Stroke::new(pos, thickness, color);
        let id = stroke.id();
        self.committed.push(Drawable::Stroke(stroke));
        self.pending = Some(self.committed.len() - 1);
        self.redo_buffer.clear();
        self.bump();
        id
    }

    /// Append a point to the pending stroke. Returns false if nothing is pending.
    pub fn extend_pending(&mut self, pos: Pos2) -> bool {
        let Some(stroke) = self
            .pending
            .and_then(|index| self.committed.get_mut(index))
            .and_then(Drawable::as_stroke_mut)
        else {
            return false;
        };

        stroke.add_point(pos);
        self.bump();
        true
    }

    /// Finish the pending stroke. It stays committed.
    pub fn end_pending(&mut self) -> Option<DrawableId> {
        let index = self.pending.take()?;
        self.committed.get(index).map(Element::id)
    }

    /// Commit a sticker. Rejected (returns `None`) while a stroke is pending.
    pub fn place_sticker(
        &mut self,
        glyph: impl Into<String>,
        pos: Pos2,
        size: f32,
    ) -> Option<DrawableId> {
        if self.pending.is_some() {
            log::debug!("Sticker placement rejected: a stroke is still being drawn");
            return None;
        }

        let sticker = StickerPlacement::new(glyph, pos, size);
        let id = sticker.id();
        self.committed.push(Drawable::Sticker(sticker));
        self.redo_buffer.clear();
        self.bump();
        Some(id)
    }

    /// Move the top drawable to the redo buffer
    pub fn undo(&mut self) -> Option<DrawableId> {
        self.end_pending();

        let drawable = self.committed.pop()?;
        let id = drawable.id();
        self.redo_buffer.push(drawable);
        self.bump();
        Some(id)
    }

    /// Move the last undone drawable back onto the canvas
    pub fn redo(&mut self) -> Option<DrawableId> {
        let drawable = self.redo_buffer.pop()?;
        let id = drawable.id();
        self.committed.push(drawable);
        self.bump();
        Some(id)
    }

    /// Drop everything, including the redo buffer. Returns true if anything changed.
    pub fn clear(&mut self) -> bool {
        let changed = !self.committed.is_empty() || !self.redo_buffer.is_empty();
        self.committed.clear();
        self.redo_buffer.clear();
        self.pending = None;
        if changed {
            self.bump();
        }
        changed
    }

    pub fn committed(&self) -> &[Drawable] {
        &self.committed
    }

    pub fn redo_buffer(&self) -> &[Drawable] {
        &self.redo_buffer
    }

    /// The stroke currently being drawn, if any
    pub fn pending(&self) -> Option<&Stroke> {
        self.pending
            .and_then(|index| self.committed.get(index))
            .and_then(Drawable::as_stroke)
    }

    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_buffer.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
