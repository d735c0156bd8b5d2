use crate::command::Command;
use crate::components::{color_swatch, ToolButton};
use crate::state::PALETTE;
use crate::tools::Tool;
use crate::CanvasApp;

pub fn tools_panel(app: &mut CanvasApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active = app.context().tool();
            egui::Grid::new("tool_grid").spacing([6.0, 6.0]).show(ui, |ui| {
                for (i, tool) in Tool::ALL.into_iter().enumerate() {
                    if ToolButton::new(tool, tool == active).show(ui).clicked() {
                        log::info!("Tool selected from UI: {}", tool);
                        app.execute(Command::SetTool(tool));
                    }
                    if i % 3 == 2 {
                        ui.end_row();
                    }
                }
            });
            ui.separator();

            ui.label("Color");
            let mut color = app.context().color();
            ui.horizontal_wrapped(|ui| {
                for swatch in PALETTE {
                    if color_swatch(ui, swatch, swatch == color).clicked() {
                        app.execute(Command::SetColor(swatch));
                    }
                }
            });
            if egui::color_picker::color_edit_button_srgba(
                ui,
                &mut color,
                egui::color_picker::Alpha::Opaque,
            )
                .changed()
            {
                app.execute(Command::SetColor(color));
            }
            ui.separator();

            ui.horizontal(|ui| {
                let can_undo = app.context().history().can_undo();
                let can_redo = app.context().history().can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.execute(Command::Undo);
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.execute(Command::Redo);
                }
            });
            if ui.button("Reset all").clicked() {
                app.execute(Command::ResetAll);
            }
            ui.separator();

            let busy = app.context().solve().is_busy();
            ui.horizontal(|ui| {
                if ui.add_enabled(!busy, egui::Button::new("Calculate")).clicked() {
                    app.submit_solve();
                }
                if busy {
                    ui.spinner();
                }
            });

            let variables = app.context().solve().variables();
            if !variables.is_empty() {
                ui.separator();
                ui.label("Variables");
                egui::Grid::new("variables_grid").striped(true).show(ui, |ui| {
                    for (name, value) in variables {
                        ui.monospace(name);
                        ui.monospace(value);
                        ui.end_row();
                    }
                });
            }
        });
}
