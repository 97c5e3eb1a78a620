use crate::DrawingApp;
use crate::tools::ToolState;

pub fn tools_panel(app: &mut DrawingApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Tools");
            ui.label(format!("Active: {}", app.tool_label.text()));
            ui.separator();

            ui.label("Markers");
            let mut selected = None;
            for preset in &app.config.markers {
                let Ok(tool) = preset.tool_state() else {
                    continue;
                };
                let is_selected = *app.session.tool() == tool;
                if ui.selectable_label(is_selected, &preset.name).clicked() {
                    selected = Some(tool);
                }
            }
            if let Some(tool) = selected {
                app.session.select_tool(tool);
            }

            ui.horizontal(|ui| {
                ui.add(egui::Slider::new(&mut app.marker_width, 1.0..=40.0).text("px"));
                egui::color_picker::color_edit_button_srgba(
                    ui,
                    &mut app.marker_color,
                    egui::color_picker::Alpha::Opaque,
                );
            });
            if ui.button("Custom marker").clicked() {
                app.select_custom_marker();
            }
            ui.separator();

            ui.label("Stamps");
            let mut stamp = None;
            ui.horizontal_wrapped(|ui| {
                for glyph in app.session.stamps().glyphs() {
                    let is_selected = matches!(
                        app.session.tool(),
                        ToolState::Stamp { glyph: g } if g == glyph
                    );
                    if ui
                        .selectable_label(is_selected, egui::RichText::new(glyph).size(24.0))
                        .clicked()
                    {
                        stamp = Some(glyph.clone());
                    }
                }
            });
            if let Some(glyph) = stamp {
                app.select_stamp(&glyph);
            }

            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut app.custom_stamp)
                        .hint_text("Custom stamp")
                        .desired_width(100.0),
                );
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Add").clicked() || submitted {
                    app.register_custom_stamp();
                }
            });
            if let Some(error) = &app.stamp_error {
                ui.colored_label(egui::Color32::RED, error);
            }
            ui.separator();

            ui.horizontal(|ui| {
                let can_undo = app.session.history().can_undo();
                let can_redo = app.session.history().can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.session.undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.session.redo();
                }
                if ui.button("Clear").clicked() {
                    app.session.clear();
                }
            });

            if ui.button(format!("Export ({}x)", app.config.export_scale)).clicked() {
                app.export();
            }
            if let Some(notice) = &app.notice {
                ui.label(notice);
            }

            ui.separator();
            let history = app.session.history();
            ui.label(format!("Undo stack size: {}", history.committed().len()));
            ui.label(format!("Redo stack size: {}", history.undone().len()));
        });
}
