use crate::DrawingApp;
use crate::surface::PainterSurface;

pub fn central_panel(app: &mut DrawingApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading(crate::app::APP_NAME);

        let (canvas_rect, response) =
            ui.allocate_exact_size(app.session.canvas_size(), egui::Sense::drag());

        for event in app.input.process_input(ctx, canvas_rect) {
            app.session.handle_input(&event);
        }
        if response.hovered() && app.session.preview().is_some() {
            ctx.set_cursor_icon(egui::CursorIcon::None);
        }

        let painter = ui.painter_at(canvas_rect);
        let mut surface = PainterSurface::new(&painter, canvas_rect);
        app.renderer.render(&app.session, &mut surface);
        painter.rect_stroke(
            canvas_rect,
            0.0,
            egui::Stroke::new(1.0, egui::Color32::GRAY),
        );
    });
}
