use egui::{Context, PointerButton, Pos2, Rect};

/// Pointer input in canvas-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed over the canvas
    PointerDown { position: Pos2 },
    /// Pointer moved over the canvas
    PointerMove { position: Pos2 },
    /// Primary button released
    PointerUp { position: Pos2 },
    /// Pointer left the canvas
    PointerLeave,
}

/// Handles converting raw egui input into canvas-local [`InputEvent`]s
#[derive(Debug, Default)]
pub struct InputHandler {
    /// Last canvas-local position while the pointer was over the canvas
    last_pointer_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process this frame's pointer state against the canvas rect
    pub fn process_input(&mut self, ctx: &Context, canvas_rect: Rect) -> Vec<InputEvent> {
        let (hover, pressed, released) = ctx.input(|input| {
            (
                input.pointer.hover_pos(),
                input.pointer.button_pressed(PointerButton::Primary),
                input.pointer.button_released(PointerButton::Primary),
            )
        });
        self.translate(hover, pressed, released, canvas_rect)
    }

    /// The pure part of [`Self::process_input`]
    pub fn translate(
        &mut self,
        hover: Option<Pos2>,
        pressed: bool,
        released: bool,
        canvas_rect: Rect,
    ) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let inside = hover
            .filter(|pos| canvas_rect.contains(*pos))
            .map(|pos| (pos - canvas_rect.min).to_pos2());

        match inside {
            Some(position) => {
                if self.last_pointer_pos != Some(position) {
                    events.push(InputEvent::PointerMove { position });
                }
                if pressed {
                    events.push(InputEvent::PointerDown { position });
                }
                if released {
                    events.push(InputEvent::PointerUp { position });
                }
            }
            // A release outside needs no event: leaving already ended the stroke
            None => {
                if self.last_pointer_pos.is_some() {
                    events.push(InputEvent::PointerLeave);
                }
            }
        }

        self.last_pointer_pos = inside;
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Rect {
        Rect::from_min_size(Pos2::new(100.0, 50.0), egui::vec2(256.0, 256.0))
    }

    #[test]
    fn test_press_inside_canvas_is_local() {
        let mut handler = InputHandler::new();
        let events = handler.translate(Some(Pos2::new(110.0, 60.0)), true, false, canvas());
        assert_eq!(
            events,
            vec![
                InputEvent::PointerMove {
                    position: Pos2::new(10.0, 10.0)
                },
                InputEvent::PointerDown {
                    position: Pos2::new(10.0, 10.0)
                },
            ]
        );
    }

    #[test]
    fn test_still_pointer_emits_nothing() {
        let mut handler = InputHandler::new();
        handler.translate(Some(Pos2::new(110.0, 60.0)), false, false, canvas());
        let events = handler.translate(Some(Pos2::new(110.0, 60.0)), false, false, canvas());
        assert!(events.is_empty());
    }

    #[test]
    fn test_leaving_canvas_emits_leave_once() {
        let mut handler = InputHandler::new();
        handler.translate(Some(Pos2::new(110.0, 60.0)), false, false, canvas());

        let events = handler.translate(Some(Pos2::new(10.0, 10.0)), false, false, canvas());
        assert_eq!(events, vec![InputEvent::PointerLeave]);

        let events = handler.translate(None, false, false, canvas());
        assert!(events.is_empty());
    }
}
