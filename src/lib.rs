#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod components;
pub mod config;
pub mod element;
pub mod error;
pub mod export;
mod geometry;
pub mod history;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod state;
pub mod surface;
pub mod tool;
pub mod translator;

pub use app::SketchApp;
pub use config::SketchConfig;
pub use element::{Drawable, DrawableId, Element, StickerPlacement, Stroke};
pub use error::{SketchError, SketchResult};
pub use history::HistoryStore;
pub use input::{InputEvent, InputHandler};
pub use renderer::Renderer;
pub use state::PointerState;
pub use surface::{RasterSurface, Surface};
pub use tool::{Thickness, ToolPreview, ToolState};
pub use translator::{InputTranslator, SketchAction};
