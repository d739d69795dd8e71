use ab_glyph::{Font as _, FontArc, PxScale, ScaleFont as _, point};
use egui::{Color32, Pos2, Rect, Vec2};
use image::{Rgba, RgbaImage};

use super::Surface;
use crate::error::{SketchError, SketchResult};
use crate::geometry::{calculate_bounds, distance_to_line_segment};

/// Fonts from egui's bundled set, tried in order when rasterizing glyphs
const GLYPH_FONT_NAMES: [&str; 3] = ["NotoEmoji-Regular", "Ubuntu-Light", "emoji-icon-font"];

/// Largest pixel width or height a surface may allocate
pub const MAX_SURFACE_SIDE: u32 = 16384;

/// Load the glyph fonts bundled with egui's default fonts.
///
/// Missing or unreadable fonts are skipped, so the result may be empty.
pub fn glyph_fonts() -> Vec<FontArc> {
    let definitions = egui::FontDefinitions::default();
    GLYPH_FONT_NAMES
        .iter()
        .filter_map(|name| {
            let data = definitions.font_data.get(*name)?;
            match FontArc::try_from_vec(data.font.to_vec()) {
                Ok(font) => Some(font),
                Err(err) => {
                    log::warn!("Bundled font {} is unreadable: {}", name, err);
                    None
                }
            }
        })
        .collect()
}

/// A CPU raster surface backed by an RGBA image.
///
/// Logical coordinates are multiplied by `scale` to get pixel coordinates, so
/// the same drawables can render at display size or at export size.
#[derive(Clone)]
pub struct RasterSurface {
    image: RgbaImage,
    logical_size: Vec2,
    scale: f32,
    background: [u8; 4],
    fonts: Vec<FontArc>,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("logical_size", &self.logical_size)
            .field("scale", &self.scale)
            .field("pixels", &self.image.dimensions())
            .field("fonts", &self.fonts.len())
            .finish()
    }
}

impl RasterSurface {
    /// Allocate a surface of `logical_size * scale` pixels filled with `background`.
    ///
    /// Fails when either pixel side is zero or exceeds [`MAX_SURFACE_SIDE`].
    pub fn new(logical_size: [u32; 2], scale: u32, background: Color32) -> SketchResult<Self> {
        Self::allocate(logical_size, scale, background.to_srgba_unmultiplied())
    }

    /// The same surface at another scale, keeping background and fonts. Drawings are not kept.
    pub fn rescaled(&self, scale: u32) -> SketchResult<Self> {
        let logical_size = [self.logical_size.x as u32, self.logical_size.y as u32];
        let surface = Self::allocate(logical_size, scale, self.background)?;
        Ok(surface.with_fonts(self.fonts.clone()))
    }

    fn allocate(logical_size: [u32; 2], scale: u32, background: [u8; 4]) -> SketchResult<Self> {
        let scale = scale.max(1);
        let too_large = || SketchError::SurfaceSize {
            width: u64::from(logical_size[0]) * u64::from(scale),
            height: u64::from(logical_size[1]) * u64::from(scale),
        };
        let width = logical_size[0]
            .checked_mul(scale)
            .filter(|side| (1..=MAX_SURFACE_SIDE).contains(side))
            .ok_or_else(too_large)?;
        let height = logical_size[1]
            .checked_mul(scale)
            .filter(|side| (1..=MAX_SURFACE_SIDE).contains(side))
            .ok_or_else(too_large)?;

        Ok(Self {
            image: RgbaImage::from_pixel(width, height, Rgba(background)),
            logical_size: Vec2::new(logical_size[0] as f32, logical_size[1] as f32),
            scale: scale as f32,
            background,
            fonts: Vec::new(),
        })
    }

    /// Use these fonts for [`Surface::glyph`]
    pub fn with_fonts(mut self, fonts: Vec<FontArc>) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// The pixel under a logical position, if it lies on the surface
    pub fn pixel_at(&self, pos: Pos2) -> Option<[u8; 4]> {
        let physical = self.to_physical(pos);
        if physical.x < 0.0 || physical.y < 0.0 {
            return None;
        }
        let (x, y) = (physical.x as u32, physical.y as u32);
        if x >= self.image.width() || y >= self.image.height() {
            return None;
        }
        Some(self.image.get_pixel(x, y).0)
    }

    /// Copy the pixels into an egui image for texture upload
    pub fn to_color_image(&self) -> egui::ColorImage {
        let size = [self.image.width() as usize, self.image.height() as usize];
        egui::ColorImage::from_rgba_unmultiplied(size, self.image.as_raw())
    }

    fn to_physical(&self, pos: Pos2) -> Pos2 {
        Pos2::new(pos.x * self.scale, pos.y * self.scale)
    }

    /// Pixel range `(x0, y0, x1, y1)` touched by a physical rect, clipped to the image
    fn pixel_span(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        let x0 = rect.min.x.floor().max(0.0);
        let y0 = rect.min.y.floor().max(0.0);
        let x1 = rect.max.x.ceil().min(self.image.width() as f32);
        let y1 = rect.max.y.ceil().min(self.image.height() as f32);
        if !(x0 < x1 && y0 < y1) {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    /// Source-over blend of a straight-alpha color scaled by `coverage`
    fn blend(&mut self, x: u32, y: u32, color: [u8; 4], coverage: f32) {
        let src_alpha = color[3] as f32 / 255.0 * coverage.clamp(0.0, 1.0);
        if src_alpha <= 0.0 {
            return;
        }

        let dst = self.image.get_pixel_mut(x, y);
        let dst_alpha = dst[3] as f32 / 255.0;
        let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
        for channel in 0..3 {
            let src = color[channel] as f32;
            let prev = dst[channel] as f32;
            let out = (src * src_alpha + prev * dst_alpha * (1.0 - src_alpha)) / out_alpha;
            dst[channel] = out.round().clamp(0.0, 255.0) as u8;
        }
        dst[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> Vec2 {
        self.logical_size
    }

    fn clear(&mut self) {
        let background = Rgba(self.background);
        for pixel in self.image.pixels_mut() {
            *pixel = background;
        }
    }

    fn polyline(&mut self, points: &[Pos2], width: f32, color: Color32) {
        if points.is_empty() || !(width > 0.0) {
            return;
        }

        let points: Vec<Pos2> = points.iter().map(|p| self.to_physical(*p)).collect();
        let radius = width * self.scale / 2.0;
        let Some((x0, y0, x1, y1)) = self.pixel_span(calculate_bounds(&points, radius + 1.0)) else {
            return;
        };

        // Coverage is the max over segments so joints are not blended twice
        let span_width = (x1 - x0) as usize;
        let mut mask = vec![0.0f32; span_width * (y1 - y0) as usize];
        let segments: Vec<(Pos2, Pos2)> = if points.len() == 1 {
            vec![(points[0], points[0])]
        } else {
            points.windows(2).map(|pair| (pair[0], pair[1])).collect()
        };

        for (start, end) in segments {
            let Some((sx0, sy0, sx1, sy1)) =
                self.pixel_span(calculate_bounds(&[start, end], radius + 1.0))
            else {
                continue;
            };
            for y in sy0..sy1 {
                for x in sx0..sx1 {
                    let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                    let distance = distance_to_line_segment(center, start, end);
                    let coverage = (radius + 0.5 - distance).clamp(0.0, 1.0);
                    let slot = &mut mask[(y - y0) as usize * span_width + (x - x0) as usize];
                    if coverage > *slot {
                        *slot = coverage;
                    }
                }
            }
        }

        let rgba = color.to_srgba_unmultiplied();
        for y in y0..y1 {
            for x in x0..x1 {
                let coverage = mask[(y - y0) as usize * span_width + (x - x0) as usize];
                if coverage > 0.0 {
                    self.blend(x, y, rgba, coverage);
                }
            }
        }
    }

    fn circle_outline(&mut self, center: Pos2, radius: f32, width: f32, color: Color32) {
        if !(radius > 0.0) || !(width > 0.0) {
            return;
        }

        let center = self.to_physical(center);
        let radius = radius * self.scale;
        let half_width = width * self.scale / 2.0;
        let reach = radius + half_width + 1.0;
        let Some((x0, y0, x1, y1)) = self.pixel_span(Rect::from_center_size(
            center,
            Vec2::splat(reach * 2.0),
        )) else {
            return;
        };

        let rgba = color.to_srgba_unmultiplied();
        for y in y0..y1 {
            for x in x0..x1 {
                let distance = Pos2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                let coverage = (half_width + 0.5 - (distance - radius).abs()).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, rgba, coverage);
                }
            }
        }
    }

    fn glyph(&mut self, text: &str, center: Pos2, size: f32, color: Color32) {
        if self.fonts.is_empty() || text.is_empty() || !(size > 0.0) {
            return;
        }

        let scale = PxScale::from(size * self.scale);
        let center = self.to_physical(center);

        // Lay out left to right, each char taken from the first font that has it
        let mut glyphs = Vec::new();
        let mut cursor_x = 0.0f32;
        for ch in text.chars() {
            let Some(index) = self.fonts.iter().position(|font| font.glyph_id(ch).0 != 0) else {
                continue;
            };
            let scaled = self.fonts[index].as_scaled(scale);
            let id = scaled.glyph_id(ch);
            glyphs.push((index, id, cursor_x));
            cursor_x += scaled.h_advance(id);
        }

        let primary = self.fonts[0].as_scaled(scale);
        let baseline = center.y + (primary.ascent() + primary.descent()) / 2.0;
        let left = center.x - cursor_x / 2.0;

        let rgba = color.to_srgba_unmultiplied();
        let (width, height) = self.image.dimensions();
        for (index, id, x) in glyphs {
            let glyph = id.with_scale_and_position(scale, point(left + x, baseline));
            let Some(outlined) = self.fonts[index].outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            let mut covered = Vec::new();
            outlined.draw(|gx, gy, coverage| covered.push((gx, gy, coverage)));

            for (gx, gy, coverage) in covered {
                let px = bounds.min.x as i32 + gx as i32;
                let py = bounds.min.y as i32 + gy as i32;
                if px >= 0 && py >= 0 && (px as u32) < width && (py as u32) < height {
                    self.blend(px as u32, py as u32, rgba, coverage);
                }
            }
        }
    }
}
