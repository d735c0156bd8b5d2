use egui::{Context, Key, Modifiers, PointerButton, Pos2, Rect};

mod shortcuts;
pub use shortcuts::shortcut_for;

/// Canvas input after translation out of egui's raw events.
///
/// Positions are canvas-local: `(0, 0)` is the top-left corner of the
/// drawing surface.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed over the canvas
    PointerDown { position: Pos2 },
    /// Pointer moved, pressed or not
    PointerMove { position: Pos2 },
    /// Primary button released after a press that started on the canvas
    PointerUp { position: Pos2 },
    /// A key was pressed
    Key { key: Key, modifiers: Modifiers },
    /// The text box lost focus holding `text`
    TextCommitted { text: String },
}

/// Handles converting raw egui input into canvas events
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    pressed_on_canvas: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process this frame's raw egui input for a canvas occupying `canvas_rect`.
    ///
    /// `canvas_hovered` is false while another widget (a panel, an overlay)
    /// covers the pointer, so presses there never reach the canvas.
    pub fn process_input(
        &mut self,
        ctx: &Context,
        canvas_rect: Rect,
        canvas_hovered: bool,
    ) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let local = |pos: Pos2| Pos2::new(pos.x - canvas_rect.min.x, pos.y - canvas_rect.min.y);

        ctx.input(|input| {
            if let Some(pos) = input.pointer.interact_pos() {
                if Some(pos) != self.last_pointer_pos {
                    events.push(InputEvent::PointerMove { position: local(pos) });
                }
                self.last_pointer_pos = Some(pos);

                if input.pointer.button_pressed(PointerButton::Primary) && canvas_hovered {
                    self.pressed_on_canvas = true;
                    events.push(InputEvent::PointerDown { position: local(pos) });
                }
                if input.pointer.button_released(PointerButton::Primary) && self.pressed_on_canvas {
                    self.pressed_on_canvas = false;
                    events.push(InputEvent::PointerUp { position: local(pos) });
                }
            }

            for event in &input.events {
                if let egui::Event::Key { key, pressed: true, modifiers, .. } = event {
                    events.push(InputEvent::Key {
                        key: *key,
                        modifiers: *modifiers,
                    });
                }
            }
        });

        events
    }
}
