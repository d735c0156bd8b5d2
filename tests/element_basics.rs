use inquate_canvas::document::Document;
use inquate_canvas::element::{Element, ElementId, Shape};
use inquate_canvas::geometry::{
    adjust_element_coordinates, element_at_position, position_within_element, Handle,
};
use egui::{Color32, Pos2, Vec2};

fn element(id: u64, shape: Shape) -> Element {
    Element::new(ElementId(id), Color32::WHITE, shape)
}

fn rectangle(id: u64, a: (f32, f32), b: (f32, f32)) -> Element {
    element(id, Shape::Rectangle { a: Pos2::new(a.0, a.1), b: Pos2::new(b.0, b.1) })
}

#[test]
fn test_rectangle_corner_beats_inside() {
    let rect = rectangle(0, (0.0, 0.0), (100.0, 100.0));
    assert_eq!(position_within_element(Pos2::new(2.0, 2.0), &rect), Some(Handle::TopLeft));
    assert_eq!(position_within_element(Pos2::new(50.0, 50.0), &rect), Some(Handle::Inside));
    assert_eq!(position_within_element(Pos2::new(98.0, 3.0), &rect), Some(Handle::TopRight));
    assert_eq!(position_within_element(Pos2::new(3.0, 97.0), &rect), Some(Handle::BottomLeft));
    assert_eq!(position_within_element(Pos2::new(101.0, 101.0), &rect), Some(Handle::BottomRight));
    assert_eq!(position_within_element(Pos2::new(150.0, 50.0), &rect), None);
}

#[test]
fn test_line_endpoints_beat_segment() {
    let line = element(0, Shape::Line { start: Pos2::new(0.0, 0.0), end: Pos2::new(100.0, 0.0) });
    assert_eq!(position_within_element(Pos2::new(1.0, 1.0), &line), Some(Handle::Start));
    assert_eq!(position_within_element(Pos2::new(99.0, 0.0), &line), Some(Handle::End));
    assert_eq!(position_within_element(Pos2::new(50.0, 0.0), &line), Some(Handle::Inside));
    assert_eq!(position_within_element(Pos2::new(50.0, 10.0), &line), None);
}

#[test]
fn test_ellipse_handles_and_inside() {
    let ellipse = element(0, Shape::Ellipse { a: Pos2::new(0.0, 0.0), b: Pos2::new(100.0, 100.0) });
    // On the outline, up and to the left of the center.
    let on_outline = Pos2::new(50.0 - 50.0 * 0.7071, 50.0 - 50.0 * 0.7071);
    assert_eq!(position_within_element(on_outline, &ellipse), Some(Handle::TopLeft));
    let lower_right = Pos2::new(50.0 + 50.0 * 0.7071, 50.0 + 50.0 * 0.7071);
    assert_eq!(position_within_element(lower_right, &ellipse), Some(Handle::BottomRight));
    assert_eq!(position_within_element(Pos2::new(50.0, 50.0), &ellipse), Some(Handle::Inside));
    assert_eq!(position_within_element(Pos2::new(2.0, 2.0), &ellipse), None);
}

#[test]
fn test_freehand_hits_any_segment() {
    let stroke = element(
        0,
        Shape::Freehand {
            points: vec![
                Pos2::new(0.0, 0.0),
                Pos2::new(10.0, 10.0),
                Pos2::new(20.0, 0.0),
            ],
        },
    );
    assert_eq!(position_within_element(Pos2::new(15.0, 5.0), &stroke), Some(Handle::Inside));
    assert_eq!(position_within_element(Pos2::new(10.0, 0.0), &stroke), None);
}

#[test]
fn test_text_box_containment() {
    let text = element(
        0,
        Shape::Text {
            anchor: Pos2::new(10.0, 10.0),
            size: Vec2::new(60.0, 24.0),
            content: "abc".into(),
        },
    );
    assert_eq!(position_within_element(Pos2::new(40.0, 20.0), &text), Some(Handle::Inside));
    assert_eq!(position_within_element(Pos2::new(40.0, 40.0), &text), None);
}

#[test]
fn test_first_element_in_creation_order_wins() {
    let document: Document = [
        rectangle(0, (0.0, 0.0), (100.0, 100.0)),
        rectangle(1, (40.0, 40.0), (60.0, 60.0)),
    ]
    .into_iter()
    .collect();

    let (hit, handle) = element_at_position(Pos2::new(50.0, 50.0), &document).unwrap();
    assert_eq!(hit.id(), ElementId(0));
    assert_eq!(handle, Handle::Inside);

    // The inner rectangle's corner still loses to the outer rectangle.
    let (hit, _) = element_at_position(Pos2::new(40.0, 40.0), &document).unwrap();
    assert_eq!(hit.id(), ElementId(0));
}

#[test]
fn test_normalization_rules() {
    let rect = rectangle(0, (50.0, 50.0), (10.0, 10.0));
    assert_eq!(adjust_element_coordinates(&rect), (Pos2::new(10.0, 10.0), Pos2::new(50.0, 50.0)));

    let ellipse = element(0, Shape::Ellipse { a: Pos2::new(50.0, 10.0), b: Pos2::new(10.0, 50.0) });
    assert_eq!(
        adjust_element_coordinates(&ellipse),
        (Pos2::new(10.0, 10.0), Pos2::new(50.0, 50.0))
    );

    let line = element(0, Shape::Line { start: Pos2::new(50.0, 10.0), end: Pos2::new(10.0, 50.0) });
    assert_eq!(adjust_element_coordinates(&line), (Pos2::new(10.0, 50.0), Pos2::new(50.0, 10.0)));

    let vertical = element(
        0,
        Shape::Line {
            start: Pos2::new(5.0, 40.0),
            end: Pos2::new(5.0, 10.0),
        },
    );
    assert_eq!(adjust_element_coordinates(&vertical), (Pos2::new(5.0, 10.0), Pos2::new(5.0, 40.0)));
}
