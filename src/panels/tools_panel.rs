use crate::SketchApp;
use crate::components::ToolButton;
use crate::tool::Thickness;
use crate::translator::SketchAction;

pub fn tools_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(180.0)
        .show(ctx, |ui| {
            let mut actions = Vec::new();
            let translator = app.translator();
            let tools = translator.tools();
            let armed = tools.armed_sticker().map(str::to_owned);

            ui.heading("Markers");
            ui.horizontal(|ui| {
                for thickness in Thickness::ALL {
                    let icon = match thickness {
                        Thickness::Thin => "•",
                        Thickness::Thick => "⬤",
                    };
                    let selected = armed.is_none() && tools.thickness() == thickness;
                    if ToolButton::new(icon, selected)
                        .tint(tools.color())
                        .show(ui)
                        .on_hover_text(thickness.label())
                        .clicked()
                    {
                        actions.push(SketchAction::SelectThickness(thickness));
                    }
                }

                let mut color = tools.color();
                if egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut color,
                    egui::color_picker::Alpha::Opaque,
                )
                .changed()
                {
                    actions.push(SketchAction::SetColor(color));
                }
            });

            ui.separator();
            ui.heading("Stickers");
            ui.horizontal_wrapped(|ui| {
                for glyph in tools.stickers() {
                    let selected = armed.as_deref() == Some(glyph.as_str());
                    if ToolButton::new(glyph, selected)
                        .show(ui)
                        .on_hover_text(glyph.as_str())
                        .clicked()
                    {
                        actions.push(SketchAction::SelectSticker(glyph.clone()));
                    }
                }
            });

            let can_undo = translator.history().can_undo();
            let can_redo = translator.history().can_redo();
            let committed = translator.history().committed().len();
            let undone = translator.history().redo_buffer().len();
            let state_name = translator.pointer().name();

            ui.horizontal(|ui| {
                let entry = ui.add(
                    egui::TextEdit::singleline(app.custom_sticker_mut())
                        .hint_text("Custom")
                        .desired_width(80.0),
                );
                let submitted =
                    entry.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Add").clicked() || submitted {
                    actions.push(SketchAction::AddCustomSticker(std::mem::take(
                        app.custom_sticker_mut(),
                    )));
                }
            });

            ui.separator();

            ui.horizontal(|ui| {
                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    actions.push(SketchAction::Undo);
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    actions.push(SketchAction::Redo);
                }
                if ui.button("Clear").clicked() {
                    actions.push(SketchAction::Clear);
                }
            });

            let export_clicked = ui.button("Export PNG").clicked();

            ui.separator();
            ui.label(format!("On canvas: {}", committed));
            ui.label(format!("Redo buffer: {}", undone));
            ui.label(format!("State: {}", state_name));

            for action in actions {
                app.translator_mut().apply(action);
            }
            if export_clicked {
                app.export();
            }
        });
}
