use egui::{Area, FontId, Id, Order, RichText, TextEdit};

use crate::element::TEXT_FONT_SIZE;
use crate::input::InputEvent;
use crate::CanvasApp;

pub fn central_panel(app: &mut CanvasApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
            let canvas_rect = response.rect;
            app.set_canvas_rect(canvas_rect);

            // Handle input
            let events = app.input_mut().process_input(ctx, canvas_rect, response.hovered());
            for event in events {
                app.context_mut().handle_event(event, ctx);
            }

            if response.hovered() {
                if let Some(pos) = ctx.pointer_hover_pos() {
                    let local = (pos - canvas_rect.min).to_pos2();
                    ctx.set_cursor_icon(app.context().cursor_at(local));
                }
            }

            // Render the canvas
            let context = app.context();
            app.renderer()
                .render(&painter, canvas_rect, context.document(), context.state().writing_id());
        });

    text_editor(app, ctx);
    overlays(app, ctx);
}

/// The editable text box shown over the element being written.
fn text_editor(app: &mut CanvasApp, ctx: &egui::Context) {
    let Some(id) = app.context().state().writing_id() else {
        return;
    };
    let Some(element) = app.context().document().get(id) else {
        return;
    };
    let origin = app.canvas_rect().min + element.anchor().to_vec2();
    let color = element.color();
    let focus_now = app.take_focus_request(id);

    let mut committed = None;
    Area::new(Id::new(("text_editor", id.0)))
        .fixed_pos(origin)
        .order(Order::Foreground)
        .show(ctx, |ui| {
            let Some(draft) = app.context_mut().draft_mut() else {
                return;
            };
            let response = ui.add(
                TextEdit::multiline(draft)
                    .font(FontId::proportional(TEXT_FONT_SIZE))
                    .text_color(color)
                    .frame(false)
                    .desired_rows(1)
                    .desired_width(320.0),
            );
            if focus_now {
                response.request_focus();
            }
            if response.lost_focus() {
                committed = Some(draft.clone());
            }
        });

    if let Some(text) = committed {
        app.context_mut().handle_event(InputEvent::TextCommitted { text }, ctx);
    }
}

/// Solved expressions, each a label the user can drag around.
fn overlays(app: &mut CanvasApp, ctx: &egui::Context) {
    let origin = app.canvas_rect().min.to_vec2();
    let overlays: Vec<_> = app
        .context()
        .solve()
        .overlays()
        .iter()
        .map(|overlay| {
            (
                overlay.id,
                overlay.label.clone(),
                overlay.latex.clone(),
                overlay.position,
            )
        })
        .collect();

    for (id, label, latex, position) in overlays {
        let area = Area::new(Id::new(id))
            .current_pos(position + origin)
            .movable(true)
            .show(ctx, |ui| {
                ui.label(RichText::new(label).size(28.0).color(egui::Color32::WHITE))
                    .on_hover_text(latex);
            });
        let delta = area.response.drag_delta();
        if delta != egui::Vec2::ZERO {
            if let Some(overlay) = app.context_mut().solve_mut().overlay_mut(id) {
                overlay.position += delta;
            }
        }
    }
}
