use egui::{Key, KeyboardShortcut, Modifiers};

use crate::config::SketchConfig;
use crate::export;
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::translator::{InputTranslator, SketchAction};

const UNDO: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
const REDO: KeyboardShortcut = KeyboardShortcut::new(
    Modifiers {
        shift: true,
        ..Modifiers::COMMAND
    },
    Key::Z,
);
const REDO_ALT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);

pub struct SketchApp {
    translator: InputTranslator,
    input: InputHandler,
    /// Text in the custom sticker field
    custom_sticker: String,
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>, config: SketchConfig) -> Self {
        Self::with_translator(InputTranslator::new(config))
    }

    pub fn with_translator(translator: InputTranslator) -> Self {
        Self {
            translator,
            input: InputHandler::new(),
            custom_sticker: String::new(),
        }
    }

    pub fn translator(&self) -> &InputTranslator {
        &self.translator
    }

    pub fn translator_mut(&mut self) -> &mut InputTranslator {
        &mut self.translator
    }

    pub fn input_mut(&mut self) -> &mut InputHandler {
        &mut self.input
    }

    pub fn custom_sticker_mut(&mut self) -> &mut String {
        &mut self.custom_sticker
    }

    /// Render the canvas at export size and hand it to the platform
    pub fn export(&self) {
        let file_name = &self.translator.config().export_file_name;
        let result = self
            .translator
            .export_png()
            .and_then(|bytes| export::save_png(&bytes, file_name));
        if let Err(err) = result {
            log::error!("Export failed: {}", err);
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        // Redo first: the undo shortcut also matches with shift held
        let action = ctx.input_mut(|i| {
            if i.consume_shortcut(&REDO) || i.consume_shortcut(&REDO_ALT) {
                Some(SketchAction::Redo)
            } else if i.consume_shortcut(&UNDO) {
                Some(SketchAction::Undo)
            } else {
                None
            }
        });
        if let Some(action) = action {
            self.translator.apply(action);
        }
    }
}

impl eframe::App for SketchApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !ctx.wants_keyboard_input() {
            self.handle_shortcuts(ctx);
        }

        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
