use egui::{Color32, Pos2, Vec2};

mod raster;
pub use raster::{MAX_SURFACE_SIDE, RasterSurface, glyph_fonts};

/// A 2D target that drawables render onto.
///
/// All coordinates are logical canvas pixels; implementations apply their own
/// scale factor.
pub trait Surface {
    /// Logical size of the surface
    fn size(&self) -> Vec2;

    /// Erase everything, leaving only the background
    fn clear(&mut self);

    /// Draw connected line segments with round joins and caps.
    /// A single point draws a dot of diameter `width`.
    fn polyline(&mut self, points: &[Pos2], width: f32, color: Color32);

    /// Draw the outline of a circle
    fn circle_outline(&mut self, center: Pos2, radius: f32, width: f32, color: Color32);

    /// Draw a line of text centered on `center`, `size` pixels high
    fn glyph(&mut self, text: &str, center: Pos2, size: f32, color: Color32);
}
