use egui::{Color32, Rect, pos2};

use crate::SketchApp;

pub const APP_TITLE: &str = "Sticker Sketchpad";

pub fn central_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading(APP_TITLE);

        let canvas_size = app.translator().config().canvas_vec();
        let (canvas_rect, response) =
            ui.allocate_exact_size(canvas_size, egui::Sense::click_and_drag());

        app.translator_mut()
            .set_pixels_per_point(ctx.pixels_per_point());

        let events = app.input_mut().process_input(ctx, canvas_rect);
        for event in events {
            app.translator_mut().handle_event(event);
        }

        // The tool preview replaces the system cursor over the canvas
        if response.hovered() {
            ctx.set_cursor_icon(egui::CursorIcon::None);
        }

        if let Some(texture) = app.translator_mut().renderer_mut().texture(ctx) {
            ui.painter().image(
                texture.id(),
                canvas_rect,
                Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }
        let border = ui.visuals().widgets.noninteractive.bg_stroke;
        ui.painter().rect_stroke(canvas_rect, 0.0, border);
    });
}
