use eframe::egui;

/// A square, selectable button showing a glyph (marker preset or sticker)
pub struct ToolButton<'a> {
    pub icon: &'a str,
    pub selected: bool,
    /// Icon color; stickers and markers preview their own ink
    pub tint: Option<egui::Color32>,
}

impl<'a> ToolButton<'a> {
    pub fn new(icon: &'a str, selected: bool) -> Self {
        Self {
            icon,
            selected,
            tint: None,
        }
    }

    pub fn tint(mut self, color: egui::Color32) -> Self {
        self.tint = Some(color);
        self
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let button_size = egui::vec2(32.0, 32.0);
        let (rect, response) = ui.allocate_exact_size(button_size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                egui::Color32::from_rgb(100, 181, 246) // Light blue when selected
            } else if response.hovered() {
                egui::Color32::from_gray(40)
            } else {
                egui::Color32::from_gray(30)
            };

            ui.painter().rect_filled(rect, 4.0, bg_color);

            let font_id = egui::FontId::proportional(20.0);
            let text_color = self.tint.unwrap_or(if self.selected {
                egui::Color32::BLACK
            } else {
                egui::Color32::WHITE
            });

            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                self.icon,
                font_id,
                text_color,
            );

            if self.selected {
                ui.painter().rect_stroke(
                    rect,
                    4.0,
                    egui::Stroke::new(2.0, egui::Color32::from_rgb(33, 150, 243)),
                );
            }
        }

        response
    }
}
