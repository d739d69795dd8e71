use ab_glyph::FontArc;
use egui::{Color32, Pos2};

use crate::config::SketchConfig;
use crate::error::SketchResult;
use crate::export;
use crate::history::HistoryStore;
use crate::input::InputEvent;
use crate::renderer::Renderer;
use crate::state::PointerState;
use crate::surface::glyph_fonts;
use crate::tool::{Thickness, ToolPreview, ToolState, random_marker_color};

/// Discrete UI actions, as opposed to pointer input
#[derive(Debug, Clone, PartialEq)]
pub enum SketchAction {
    Undo,
    Redo,
    Clear,
    SelectThickness(Thickness),
    /// Arm a sticker from the palette for the next click
    SelectSticker(String),
    /// Add free text to the palette and arm it
    AddCustomSticker(String),
    SetColor(Color32),
}

/// Turns pointer events and UI actions into history mutations.
///
/// Owns all application state. Every mutation is followed by a synchronous
/// redraw, so the display surface always shows the latest history.
pub struct InputTranslator {
    config: SketchConfig,
    history: HistoryStore,
    tools: ToolState,
    pointer: PointerState,
    renderer: Renderer,
    /// Fonts for stickers, shared with exports
    fonts: Vec<FontArc>,
}

impl InputTranslator {
    /// Creates a translator drawing into a display surface, with egui's bundled glyph fonts
    pub fn new(config: SketchConfig) -> Self {
        let fonts = glyph_fonts();
        if fonts.is_empty() {
            log::warn!("No glyph fonts available; stickers will not be drawn");
        }
        let renderer = Renderer::new(&config, fonts.clone());
        Self::with_renderer(config, renderer, fonts)
    }

    pub fn with_renderer(config: SketchConfig, renderer: Renderer, fonts: Vec<FontArc>) -> Self {
        let tools = ToolState::new(&config);
        let mut translator = Self {
            config,
            history: HistoryStore::new(),
            tools,
            pointer: PointerState::Idle,
            renderer,
            fonts,
        };
        translator.redraw();
        translator
    }

    /// A translator without a display surface or fonts
    pub fn headless(config: SketchConfig) -> Self {
        Self::with_renderer(config, Renderer::detached(), Vec::new())
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { position } => self.pointer_down(position),
            InputEvent::PointerMove { position } => match self.pointer {
                PointerState::Drawing { .. } => {
                    self.history.extend_pending(position);
                    self.redraw();
                }
                PointerState::Idle => {
                    self.tools.set_preview_position(Some(position));
                    self.redraw();
                }
            },
            InputEvent::PointerUp { position } => {
                self.finish_stroke();
                self.tools.set_preview_position(Some(position));
                self.redraw();
            }
            InputEvent::PointerLeave => {
                self.finish_stroke();
                self.tools.set_preview_position(None);
                self.redraw();
            }
        }
    }

    pub fn apply(&mut self, action: SketchAction) {
        match action {
            SketchAction::Undo => {
                self.pointer = PointerState::Idle;
                if self.history.undo().is_none() {
                    log::debug!("Nothing to undo");
                }
            }
            SketchAction::Redo => {
                if self.history.redo().is_none() {
                    log::debug!("Nothing to redo");
                }
            }
            SketchAction::Clear => {
                self.pointer = PointerState::Idle;
                self.history.clear();
            }
            SketchAction::SelectThickness(thickness) => {
                let color = self
                    .config
                    .randomize_color_on_tool_switch
                    .then(random_marker_color);
                self.tools.select_thickness(thickness, color);
                log::info!("Tool selected: {} marker", thickness.label());
            }
            SketchAction::SelectSticker(glyph) => self.arm_sticker(glyph),
            SketchAction::AddCustomSticker(text) => match self.tools.add_sticker(&text) {
                Some(glyph) => self.arm_sticker(glyph),
                None => log::debug!("Ignoring empty custom sticker"),
            },
            SketchAction::SetColor(color) => self.tools.set_color(color),
        }
        self.redraw();
    }

    /// Match the display surface to the screen's pixel density
    pub fn set_pixels_per_point(&mut self, pixels_per_point: f32) {
        let scale = pixels_per_point.ceil().max(1.0) as u32;
        if self.renderer.set_scale(scale) {
            self.redraw();
        }
    }

    /// Encode the committed drawables as an upscaled PNG
    pub fn export_png(&self) -> SketchResult<Vec<u8>> {
        export::export_png(self.history.committed(), &self.config, self.fonts.clone())
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    /// The preview overlay and its position, shown only while idle
    pub fn current_preview(&self) -> Option<(ToolPreview, Pos2)> {
        if self.pointer.is_drawing() {
            return None;
        }
        let at = self.tools.preview_position()?;
        Some((self.tools.preview(&self.config), at))
    }

    fn pointer_down(&mut self, position: Pos2) {
        if self.pointer.is_drawing() {
            self.finish_stroke();
        }

        if let Some(glyph) = self.tools.disarm_sticker() {
            if let Some(id) = self
                .history
                .place_sticker(glyph, position, self.config.sticker_size)
            {
                log::debug!("Placed sticker {}", id);
            }
        } else {
            let width = self.tools.thickness().width(&self.config);
            let stroke = self.history.begin_stroke(position, width, self.tools.color());
            self.pointer = PointerState::Drawing { stroke };
        }
        self.tools.set_preview_position(Some(position));
        self.redraw();
    }

    fn finish_stroke(&mut self) {
        if let PointerState::Drawing { stroke } = self.pointer {
            if self.history.end_pending() != Some(stroke) {
                log::debug!("Stroke {} was no longer pending", stroke);
            }
            self.pointer = PointerState::Idle;
        }
    }

    fn arm_sticker(&mut self, glyph: String) {
        if self.pointer.is_drawing() {
            log::debug!("Ignoring sticker {} while a stroke is being drawn", glyph);
            return;
        }
        log::info!("Sticker selected: {}", glyph);
        self.tools.arm_sticker(glyph);
    }

    fn redraw(&mut self) {
        let preview = self.current_preview();
        self.renderer
            .redraw(&self.history, preview.as_ref().map(|(preview, at)| (preview, *at)));
    }
}
