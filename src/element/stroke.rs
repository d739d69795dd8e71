use egui::{Color32, Pos2};

use super::{DrawableId, Element};
use crate::surface::Surface;

/// A freehand line: ordered points drawn with one width and color
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    id: DrawableId,
    points: Vec<Pos2>,
    color: Color32,
    thickness: f32,
}

impl Stroke {
    /// Start a stroke at its first point
    pub fn new(start: Pos2, thickness: f32, color: Color32) -> Self {
        Self {
            id: DrawableId::new(),
            points: vec![start],
            color,
            thickness,
        }
    }

    /// Append a point; only the history store calls this while the stroke is pending
    pub(crate) fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }
}

impl Element for Stroke {
    fn id(&self) -> DrawableId {
        self.id
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.polyline(&self.points, self.thickness, self.color);
    }
}
