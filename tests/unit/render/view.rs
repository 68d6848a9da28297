use super::*;

fn view() -> PlotView {
    PlotView::new(
        Canvas {
            width: 600,
            height: 300,
        },
        Rect::new(-0.6, -0.1, 0.6, 1.1),
    )
    .unwrap()
}

#[test]
fn corners_map_to_canvas_corners() {
    let v = view();
    let top_left = v.project(Point::new(-0.6, 1.1));
    let bottom_right = v.project(Point::new(0.6, -0.1));
    assert!(top_left.distance(Point::new(0.0, 0.0)) < 1e-9);
    assert!(bottom_right.distance(Point::new(600.0, 300.0)) < 1e-9);
}

#[test]
fn unproject_inverts_project_at_pixel_centres() {
    let v = view();
    let p = v.unproject_pixel(123, 45);
    let back = v.project(p);
    assert!((back.x - 123.5).abs() < 1e-9);
    assert!((back.y - 45.5).abs() < 1e-9);
}

#[test]
fn empty_bounds_are_rejected() {
    assert!(PlotView::new(Canvas::default(), Rect::new(0.0, 0.0, 0.0, 1.0)).is_err());
}
