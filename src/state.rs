use crate::element::DrawableId;

/// Where the pointer is in the draw cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerState {
    #[default]
    Idle,
    /// The pointer is down and extending a stroke
    Drawing { stroke: DrawableId },
}

impl PointerState {
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Drawing { .. } => "Drawing",
        }
    }
}
