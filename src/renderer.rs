use ab_glyph::FontArc;
use egui::{Pos2, TextureHandle, TextureOptions};

use crate::config::SketchConfig;
use crate::element::{Drawable, Element};
use crate::history::HistoryStore;
use crate::surface::{RasterSurface, Surface};
use crate::tool::ToolPreview;

/// Highest display scale; denser screens get a downsampled texture
pub const MAX_DISPLAY_SCALE: u32 = 4;

/// Replays the history onto a retained raster surface and keeps the
/// egui texture showing it up to date.
pub struct Renderer {
    surface: Option<RasterSurface>,
    texture: Option<TextureHandle>,
    /// The surface changed since the last upload
    dirty: bool,
    frames: u64,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("surface", &self.surface)
            .field("has_texture", &self.texture.is_some())
            .field("dirty", &self.dirty)
            .field("frames", &self.frames)
            .finish()
    }
}

impl Renderer {
    /// Creates a renderer with a display surface sized from the config
    ///
    /// Args:
    ///     config (SketchConfig): canvas size and background
    ///     fonts (Vec<FontArc>): fonts used to draw stickers
    ///
    /// Falls back to a detached renderer if the surface cannot be allocated.
    pub fn new(config: &SketchConfig, fonts: Vec<FontArc>) -> Self {
        match RasterSurface::new(config.canvas_size, 1, config.background_color()) {
            Ok(surface) => Self {
                surface: Some(surface.with_fonts(fonts)),
                texture: None,
                dirty: true,
                frames: 0,
            },
            Err(err) => {
                log::error!("Canvas unavailable, drawing is disabled: {}", err);
                Self::detached()
            }
        }
    }

    /// A renderer without a surface; every redraw is a no-op
    pub fn detached() -> Self {
        Self {
            surface: None,
            texture: None,
            dirty: false,
            frames: 0,
        }
    }

    /// Clear `surface`, draw `committed` in order, then the preview on top.
    ///
    /// The output depends only on the arguments.
    pub fn replay(
        surface: &mut dyn Surface,
        committed: &[Drawable],
        preview: Option<(&ToolPreview, Pos2)>,
    ) {
        surface.clear();
        for drawable in committed {
            drawable.draw(surface);
        }
        if let Some((preview, at)) = preview {
            preview.draw(surface, at);
        }
    }

    /// Rasterize the display at `scale` physical pixels per logical pixel.
    ///
    /// Returns true if the surface was replaced; it is blank until the next redraw.
    pub fn set_scale(&mut self, scale: u32) -> bool {
        let Some(surface) = self.surface.as_ref() else {
            return false;
        };
        let scale = scale.clamp(1, MAX_DISPLAY_SCALE);
        if surface.scale() == scale as f32 {
            return false;
        }

        match surface.rescaled(scale) {
            Ok(rescaled) => {
                log::debug!("Display surface rescaled to {}x", scale);
                self.surface = Some(rescaled);
                self.dirty = true;
                true
            }
            Err(err) => {
                log::warn!("Keeping the current display scale: {}", err);
                false
            }
        }
    }

    /// Replay the history into the display surface
    pub fn redraw(&mut self, history: &HistoryStore, preview: Option<(&ToolPreview, Pos2)>) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        Self::replay(surface, history.committed(), preview);
        self.dirty = true;
        self.frames += 1;
    }

    /// Upload the surface if it changed and return the texture to paint
    pub fn texture(&mut self, ctx: &egui::Context) -> Option<&TextureHandle> {
        let surface = self.surface.as_ref()?;

        if let Some(texture) = &mut self.texture {
            if self.dirty {
                texture.set(surface.to_color_image(), TextureOptions::LINEAR);
            }
        } else {
            log::debug!("Creating canvas texture");
            self.texture = Some(ctx.load_texture(
                "sketch_canvas",
                surface.to_color_image(),
                TextureOptions::LINEAR,
            ));
        }
        self.dirty = false;
        self.texture.as_ref()
    }

    pub fn surface(&self) -> Option<&RasterSurface> {
        self.surface.as_ref()
    }

    /// Number of replays into the display surface so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Color32, Vec2};

    /// Records draw calls instead of rasterizing them
    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<String>,
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> Vec2 {
            Vec2::new(256.0, 256.0)
        }

        fn clear(&mut self) {
            self.calls.push("clear".to_owned());
        }

        fn polyline(&mut self, points: &[Pos2], _width: f32, _color: Color32) {
            self.calls.push(format!("polyline:{}", points.len()));
        }

        fn circle_outline(&mut self, _center: Pos2, _radius: f32, _width: f32, _color: Color32) {
            self.calls.push("circle".to_owned());
        }

        fn glyph(&mut self, text: &str, _center: Pos2, _size: f32, _color: Color32) {
            self.calls.push(format!("glyph:{}", text));
        }
    }

    #[test]
    fn test_replay_clears_then_draws_in_order_with_preview_last() {
        let mut history = HistoryStore::new();
        history.begin_stroke(Pos2::new(1.0, 1.0), 2.0, Color32::BLACK);
        history.extend_pending(Pos2::new(2.0, 2.0));
        history.end_pending();
        history.place_sticker("⭐", Pos2::new(10.0, 10.0), 24.0);

        let preview = ToolPreview::Marker {
            radius: 1.0,
            color: Color32::BLACK,
        };
        let mut surface = RecordingSurface::default();
        Renderer::replay(
            &mut surface,
            history.committed(),
            Some((&preview, Pos2::new(5.0, 5.0))),
        );

        assert_eq!(surface.calls, vec!["clear", "polyline:2", "glyph:⭐", "circle"]);
    }

    #[test]
    fn test_detached_renderer_ignores_redraw() {
        let mut renderer = Renderer::detached();
        let history = HistoryStore::new();
        renderer.redraw(&history, None);
        assert_eq!(renderer.frames(), 0);
        assert!(renderer.surface().is_none());
    }

    #[test]
    fn test_unallocatable_canvas_detaches_renderer() {
        let config = SketchConfig {
            canvas_size: [100_000, 100_000],
            ..SketchConfig::default()
        };
        let mut renderer = Renderer::new(&config, Vec::new());
        assert!(renderer.surface().is_none());
        assert!(!renderer.set_scale(2));
    }

    #[test]
    fn test_set_scale_replaces_surface_once() {
        let config = SketchConfig::default();
        let mut renderer = Renderer::new(&config, Vec::new());

        assert!(!renderer.set_scale(1));
        assert!(renderer.set_scale(2));
        assert!(!renderer.set_scale(2));
        assert_eq!(renderer.surface().unwrap().image().dimensions(), (512, 512));

        assert!(renderer.set_scale(100));
        assert_eq!(renderer.surface().unwrap().scale(), MAX_DISPLAY_SCALE as f32);
    }

    #[test]
    fn test_redraw_updates_display_surface() {
        let config = SketchConfig::default();
        let mut renderer = Renderer::new(&config, Vec::new());
        let mut history = HistoryStore::new();
        history.begin_stroke(Pos2::new(20.0, 20.0), 6.0, Color32::RED);

        renderer.redraw(&history, None);
        assert_eq!(renderer.frames(), 1);
        let surface = renderer.surface().unwrap();
        assert_eq!(surface.pixel_at(Pos2::new(20.0, 20.0)), Some([255, 0, 0, 255]));
    }
}
