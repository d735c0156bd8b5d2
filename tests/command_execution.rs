use inquate_canvas::command::{Command, History};
use inquate_canvas::document::Document;
use inquate_canvas::element::{ElementId, FixedAdvance, Shape};
use inquate_canvas::{EditorContext, EditorState, InputEvent, Tool};
use egui::{Color32, Key, Modifiers, Pos2};

fn pos(x: f32, y: f32) -> Pos2 {
    Pos2::new(x, y)
}

fn send(ctx: &mut EditorContext, event: InputEvent) {
    ctx.handle_event(event, &FixedAdvance::default());
}

/// Press at `from`, drag through `to`, release there.
fn drag(ctx: &mut EditorContext, from: Pos2, to: Pos2) {
    send(ctx, InputEvent::PointerDown { position: from });
    send(ctx, InputEvent::PointerMove { position: from.lerp(to, 0.5) });
    send(ctx, InputEvent::PointerMove { position: to });
    send(ctx, InputEvent::PointerUp { position: to });
}

fn click(ctx: &mut EditorContext, at: Pos2) {
    send(ctx, InputEvent::PointerDown { position: at });
    send(ctx, InputEvent::PointerUp { position: at });
}

fn draw(ctx: &mut EditorContext, tool: Tool, from: Pos2, to: Pos2) {
    ctx.execute(Command::SetTool(tool));
    drag(ctx, from, to);
}

fn only_shape(ctx: &EditorContext) -> Shape {
    let elements: Vec<_> = ctx.document().elements().collect();
    assert_eq!(elements.len(), 1);
    elements[0].shape().clone()
}

#[test]
fn test_undo_redo_round_trip() {
    let mut history = History::new();
    let snapshots: Vec<Document> = (0..4)
        .map(|i| {
            let mut ctx = EditorContext::new();
            for j in 0..=i {
                draw(&mut ctx, Tool::Rectangle, pos(j as f32, 0.0), pos(10.0, 10.0));
            }
            ctx.document().clone()
        })
        .collect();
    for snapshot in &snapshots {
        history.commit(snapshot.clone());
    }

    for _ in 0..snapshots.len() {
        assert!(history.undo());
    }
    assert!(history.current().is_empty());
    assert!(!history.undo());

    for _ in 0..snapshots.len() {
        assert!(history.redo());
    }
    assert_eq!(history.current(), &snapshots[3]);
}

#[test]
fn test_updates_never_grow_history() {
    let mut history = History::new();
    history.commit(Document::new());
    for _ in 0..10 {
        history.update(Document::new());
    }
    assert_eq!(history.len(), 2);
}

#[test]
fn test_one_undo_step_per_gesture() {
    let mut ctx = EditorContext::new();
    ctx.execute(Command::SetTool(Tool::Pencil));
    send(&mut ctx, InputEvent::PointerDown { position: pos(0.0, 0.0) });
    for i in 1..50 {
        send(&mut ctx, InputEvent::PointerMove { position: pos(i as f32, i as f32) });
    }
    send(&mut ctx, InputEvent::PointerUp { position: pos(49.0, 49.0) });

    assert_eq!(ctx.history().len(), 2);
    match only_shape(&ctx) {
        Shape::Freehand { points } => assert_eq!(points.len(), 50),
        other => panic!("expected freehand, got {other:?}"),
    }
}

#[test]
fn test_rectangle_is_normalized_on_release() {
    let mut ctx = EditorContext::new();
    draw(&mut ctx, Tool::Rectangle, pos(50.0, 50.0), pos(10.0, 10.0));

    assert_eq!(only_shape(&ctx), Shape::Rectangle { a: pos(10.0, 10.0), b: pos(50.0, 50.0) });
    assert_eq!(ctx.history().len(), 2);
    assert!(ctx.state().is_idle());
}

#[test]
fn test_press_after_lost_release_starts_new_shape() {
    let mut ctx = EditorContext::new();
    ctx.execute(Command::SetTool(Tool::Rectangle));
    send(&mut ctx, InputEvent::PointerDown { position: pos(20.0, 20.0) });
    send(&mut ctx, InputEvent::PointerMove { position: pos(5.0, 5.0) });

    drag(&mut ctx, pos(200.0, 200.0), pos(300.0, 300.0));

    let shapes: Vec<Shape> = ctx.document().elements().map(|e| e.shape().clone()).collect();
    assert_eq!(
        shapes,
        [
            Shape::Rectangle {
                a: pos(5.0, 5.0),
                b: pos(20.0, 20.0),
            },
            Shape::Rectangle {
                a: pos(200.0, 200.0),
                b: pos(300.0, 300.0),
            },
        ]
    );
    assert_eq!(ctx.history().len(), 3);
    assert!(ctx.state().is_idle());
}

#[test]
fn test_draw_undo_then_commit_discards_redo() {
    let mut ctx = EditorContext::new();
    draw(&mut ctx, Tool::Circle, pos(0.0, 0.0), pos(40.0, 40.0));
    draw(&mut ctx, Tool::Rectangle, pos(100.0, 100.0), pos(150.0, 150.0));
    assert_eq!(ctx.history().len(), 3);

    ctx.execute(Command::Undo);
    assert!(matches!(only_shape(&ctx), Shape::Ellipse { .. }));

    draw(&mut ctx, Tool::Line, pos(0.0, 200.0), pos(50.0, 200.0));
    assert_eq!(ctx.history().len(), 3);
    assert!(!ctx.history().can_redo());
    ctx.execute(Command::Redo);
    let types: Vec<_> = ctx.document().elements().map(|e| e.element_type()).collect();
    assert_eq!(types, ["circle", "line"]);
}

#[test]
fn test_keyboard_shortcuts() {
    let mut ctx = EditorContext::new();
    draw(&mut ctx, Tool::Line, pos(0.0, 0.0), pos(10.0, 10.0));

    send(&mut ctx, InputEvent::Key { key: Key::Z, modifiers: Modifiers::COMMAND });
    assert!(ctx.document().is_empty());
    send(
        &mut ctx,
        InputEvent::Key {
            key: Key::Z,
            modifiers: Modifiers::COMMAND | Modifiers::SHIFT,
        },
    );
    assert_eq!(ctx.document().len(), 1);
    send(&mut ctx, InputEvent::Key { key: Key::Z, modifiers: Modifiers::COMMAND });
    send(&mut ctx, InputEvent::Key { key: Key::Y, modifiers: Modifiers::COMMAND });
    assert_eq!(ctx.document().len(), 1);
}

#[test]
fn test_move_keeps_size_and_takes_one_step() {
    let mut ctx = EditorContext::new();
    draw(&mut ctx, Tool::Rectangle, pos(10.0, 10.0), pos(50.0, 30.0));
    ctx.execute(Command::SetTool(Tool::Selection));

    drag(&mut ctx, pos(30.0, 20.0), pos(130.0, 70.0));

    assert_eq!(only_shape(&ctx), Shape::Rectangle { a: pos(110.0, 60.0), b: pos(150.0, 80.0) });
    assert_eq!(ctx.history().len(), 3);
    ctx.execute(Command::Undo);
    assert_eq!(only_shape(&ctx), Shape::Rectangle { a: pos(10.0, 10.0), b: pos(50.0, 30.0) });
}

#[test]
fn test_click_without_drag_adds_no_step() {
    let mut ctx = EditorContext::new();
    draw(&mut ctx, Tool::Rectangle, pos(10.0, 10.0), pos(50.0, 30.0));
    ctx.execute(Command::SetTool(Tool::Selection));
    click(&mut ctx, pos(30.0, 20.0));
    assert_eq!(ctx.history().len(), 2);
    assert!(ctx.state().is_idle());
}

#[test]
fn test_freehand_move_is_rigid() {
    let mut ctx = EditorContext::new();
    ctx.execute(Command::SetTool(Tool::Pencil));
    send(&mut ctx, InputEvent::PointerDown { position: pos(0.0, 0.0) });
    send(&mut ctx, InputEvent::PointerMove { position: pos(10.0, 10.0) });
    send(&mut ctx, InputEvent::PointerMove { position: pos(20.0, 0.0) });
    send(&mut ctx, InputEvent::PointerUp { position: pos(20.0, 0.0) });

    ctx.execute(Command::SetTool(Tool::Selection));
    drag(&mut ctx, pos(5.0, 5.0), pos(10.0, 10.0));

    assert_eq!(
        only_shape(&ctx),
        Shape::Freehand { points: vec![pos(5.0, 5.0), pos(15.0, 15.0), pos(25.0, 5.0)] }
    );
}

#[test]
fn test_resize_past_opposite_corner_normalizes() {
    let mut ctx = EditorContext::new();
    draw(&mut ctx, Tool::Rectangle, pos(10.0, 10.0), pos(50.0, 50.0));
    ctx.execute(Command::SetTool(Tool::Selection));

    drag(&mut ctx, pos(50.0, 50.0), pos(0.0, 0.0));

    assert_eq!(only_shape(&ctx), Shape::Rectangle { a: pos(0.0, 0.0), b: pos(10.0, 10.0) });
    assert_eq!(ctx.history().len(), 3);
}

#[test]
fn test_line_resize_by_endpoint() {
    let mut ctx = EditorContext::new();
    draw(&mut ctx, Tool::Line, pos(10.0, 10.0), pos(100.0, 10.0));
    ctx.execute(Command::SetTool(Tool::Selection));

    drag(&mut ctx, pos(100.0, 10.0), pos(100.0, 80.0));

    assert_eq!(only_shape(&ctx), Shape::Line { start: pos(10.0, 10.0), end: pos(100.0, 80.0) });
}

#[test]
fn test_color_is_kept_through_edits() {
    let mut ctx = EditorContext::new();
    ctx.execute(Command::SetColor(Color32::RED));
    draw(&mut ctx, Tool::Rectangle, pos(10.0, 10.0), pos(50.0, 50.0));
    ctx.execute(Command::SetColor(Color32::BLUE));
    ctx.execute(Command::SetTool(Tool::Selection));
    drag(&mut ctx, pos(30.0, 30.0), pos(60.0, 60.0));

    let element = ctx.document().elements().next().unwrap();
    assert_eq!(element.color(), Color32::RED);
}

#[test]
fn test_text_tool_writes_on_blur() {
    let mut ctx = EditorContext::new();
    ctx.execute(Command::SetTool(Tool::Text));
    click(&mut ctx, pos(20.0, 20.0));

    assert!(ctx.state().is_writing());
    let id = ctx.state().writing_id().unwrap();
    assert_eq!(ctx.history().len(), 2);

    // Pointer and keys are inert while the text box holds focus.
    send(&mut ctx, InputEvent::PointerDown { position: pos(200.0, 200.0) });
    send(&mut ctx, InputEvent::Key { key: Key::Z, modifiers: Modifiers::COMMAND });
    assert_eq!(ctx.document().len(), 1);

    ctx.draft_mut().unwrap().push_str("2 + 2");
    send(&mut ctx, InputEvent::TextCommitted { text: "2 + 2".to_string() });

    assert!(ctx.state().is_idle());
    assert_eq!(ctx.history().len(), 2);
    let element = ctx.document().get(id).unwrap();
    assert_eq!(element.text(), Some("2 + 2"));
    assert_eq!(element.corners().1, pos(20.0 + 5.0 * 12.0, 20.0 + 24.0));
}

#[test]
fn test_empty_new_text_leaves_no_trace() {
    let mut ctx = EditorContext::new();
    ctx.execute(Command::SetTool(Tool::Text));
    click(&mut ctx, pos(20.0, 20.0));
    send(&mut ctx, InputEvent::TextCommitted { text: String::new() });

    assert!(ctx.document().is_empty());
    assert_eq!(ctx.history().len(), 1);
}

#[test]
fn test_clicking_text_reopens_editor() {
    let mut ctx = EditorContext::new();
    ctx.execute(Command::SetTool(Tool::Text));
    click(&mut ctx, pos(20.0, 20.0));
    send(&mut ctx, InputEvent::TextCommitted { text: "abc".to_string() });

    ctx.execute(Command::SetTool(Tool::Selection));
    click(&mut ctx, pos(30.0, 30.0));

    match ctx.state() {
        EditorState::Writing { draft, created, .. } => {
            assert_eq!(draft, "abc");
            assert!(!created);
        }
        other => panic!("expected writing, got {other:?}"),
    }
    assert_eq!(ctx.cursor_at(pos(30.0, 30.0)), egui::CursorIcon::Move);

    send(&mut ctx, InputEvent::TextCommitted { text: "abcd".to_string() });
    assert_eq!(ctx.history().len(), 3);
    ctx.execute(Command::Undo);
    assert_eq!(ctx.document().elements().next().unwrap().text(), Some("abc"));
}

#[test]
fn test_hover_cursor_follows_handles() {
    let mut ctx = EditorContext::new();
    draw(&mut ctx, Tool::Rectangle, pos(0.0, 0.0), pos(100.0, 100.0));
    assert_eq!(ctx.cursor_at(pos(2.0, 2.0)), egui::CursorIcon::Default);

    ctx.execute(Command::SetTool(Tool::Selection));
    assert_eq!(ctx.cursor_at(pos(2.0, 2.0)), egui::CursorIcon::ResizeNwSe);
    assert_eq!(ctx.cursor_at(pos(99.0, 1.0)), egui::CursorIcon::ResizeNeSw);
    assert_eq!(ctx.cursor_at(pos(50.0, 50.0)), egui::CursorIcon::Move);
    assert_eq!(ctx.cursor_at(pos(300.0, 300.0)), egui::CursorIcon::Default);
}

#[test]
fn test_reset_all_is_undoable() {
    let mut ctx = EditorContext::new();
    draw(&mut ctx, Tool::Rectangle, pos(0.0, 0.0), pos(10.0, 10.0));
    ctx.execute(Command::ResetAll);
    assert!(ctx.document().is_empty());
    ctx.execute(Command::Undo);
    assert_eq!(ctx.document().len(), 1);
}

#[test]
fn test_ids_are_never_reused() {
    let mut ctx = EditorContext::new();
    draw(&mut ctx, Tool::Line, pos(0.0, 0.0), pos(10.0, 10.0));
    ctx.execute(Command::Undo);
    draw(&mut ctx, Tool::Line, pos(0.0, 0.0), pos(10.0, 10.0));
    let ids: Vec<_> = ctx.document().elements().map(|e| e.id()).collect();
    assert_eq!(ids, [ElementId(1)]);
}
