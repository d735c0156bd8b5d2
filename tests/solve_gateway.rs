use inquate_canvas::command::Command;
use inquate_canvas::element::FixedAdvance;
use inquate_canvas::error::SolveError;
use inquate_canvas::raster::Rasterizer;
use inquate_canvas::solve::parse_response;
use inquate_canvas::{EditorContext, InputEvent, Tool};
use egui::Pos2;

fn draw_rectangle(ctx: &mut EditorContext, from: Pos2, to: Pos2) {
    ctx.execute(Command::SetTool(Tool::Rectangle));
    for event in [
        InputEvent::PointerDown { position: from },
        InputEvent::PointerMove { position: to },
        InputEvent::PointerUp { position: to },
    ] {
        ctx.handle_event(event, &FixedAdvance::default());
    }
}

#[test]
fn test_assignment_is_sent_with_next_request() {
    let mut ctx = EditorContext::new();
    let response = parse_response(r#"{"data":[{"expr":"x","result":"5","assign":true}]}"#).unwrap();

    ctx.finish_solve(Ok(response), Pos2::new(40.0, 40.0));

    assert_eq!(ctx.solve().variables().get("x").map(String::as_str), Some("5"));
    let prepared = ctx.prepare_solve(&Rasterizer::without_text(), 16, 16).unwrap();
    assert_eq!(prepared.request.dict_of_vars.get("x").map(String::as_str), Some("5"));
    assert!(prepared.request.image.starts_with("data:image/png;base64,"));
}

#[test]
fn test_success_adds_overlays_and_clears_canvas() {
    let mut ctx = EditorContext::new();
    draw_rectangle(&mut ctx, Pos2::new(10.0, 10.0), Pos2::new(30.0, 50.0));

    let prepared = ctx.prepare_solve(&Rasterizer::without_text(), 64, 64).unwrap();
    assert!((prepared.center.x - 20.0).abs() <= 1.0);
    assert!((prepared.center.y - 30.0).abs() <= 1.0);

    let response = parse_response(
        r#"{"message":"Image Processed","type":"success","data":[{"expr":"3 + 4","result":7,"assign":false},{"expr":"y","result":"2","assign":false}]}"#,
    )
    .unwrap();
    ctx.finish_solve(Ok(response), prepared.center);

    let overlays = ctx.solve().overlays();
    assert_eq!(overlays.len(), 2);
    assert_eq!(overlays[0].label, "3 + 4 = 7");
    assert_eq!(overlays[0].latex, "\\(\\LARGE{3 + 4 = 7}\\)");
    assert_eq!(overlays[0].position, prepared.center);
    assert_ne!(overlays[0].id, overlays[1].id);
    assert!(ctx.solve().variables().is_empty());

    assert!(ctx.document().is_empty());
    ctx.execute(Command::Undo);
    assert_eq!(ctx.document().len(), 1);
}

#[test]
fn test_failure_changes_nothing() {
    let mut ctx = EditorContext::new();
    draw_rectangle(&mut ctx, Pos2::new(10.0, 10.0), Pos2::new(30.0, 50.0));
    let before = ctx.history().len();

    ctx.finish_solve(Err(SolveError::Status { status: 500, body: "boom".into() }), Pos2::ZERO);

    assert_eq!(ctx.document().len(), 1);
    assert_eq!(ctx.history().len(), before);
    assert!(ctx.solve().overlays().is_empty());
}

#[test]
fn test_blank_canvas_centres_overlays() {
    let ctx = EditorContext::new();
    let prepared = ctx.prepare_solve(&Rasterizer::without_text(), 32, 48).unwrap();
    assert_eq!(prepared.center, Pos2::new(16.0, 24.0));
    assert!(prepared.request.dict_of_vars.is_empty());
}

#[test]
fn test_reset_all_drops_bindings_and_overlays() {
    let mut ctx = EditorContext::new();
    let response = parse_response(r#"{"data":[{"expr":"x","result":"5","assign":true}]}"#).unwrap();
    ctx.finish_solve(Ok(response), Pos2::ZERO);

    ctx.execute(Command::ResetAll);

    assert!(ctx.solve().variables().is_empty());
    assert!(ctx.solve().overlays().is_empty());
}
