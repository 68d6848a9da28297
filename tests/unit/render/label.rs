use super::*;

#[test]
fn index_labels_use_exclusive_end() {
    let w = IndexRange { start: 5, end: 25 };
    assert_eq!(
        WindowDisplay::Index.format(w, None).unwrap().as_deref(),
        Some("[5 - 25]")
    );
}

#[test]
fn distance_labels_truncate_positions() {
    let positions: Vec<f64> = (0..30).map(|i| i as f64 * 12.7).collect();
    let w = IndexRange { start: 2, end: 5 };
    assert_eq!(
        WindowDisplay::Distance
            .format(w, Some(&positions))
            .unwrap()
            .as_deref(),
        Some("[25 - 63nm]")
    );
}

#[test]
fn distance_labels_need_positions() {
    let w = IndexRange { start: 0, end: 3 };
    assert!(matches!(
        WindowDisplay::Distance.format(w, None),
        Err(TernvidError::Validation(_))
    ));
    assert!(WindowDisplay::Distance.format(w, Some(&[1.0, 2.0, 3.0])).is_err());
}

#[test]
fn none_draws_nothing() {
    let w = IndexRange { start: 0, end: 3 };
    assert_eq!(WindowDisplay::None.format(w, None).unwrap(), None);
}

#[test]
fn every_label_character_has_a_glyph() {
    let rects = glyph_rects("[0123456789 - -1.5nm]", Point::new(0.0, 10.0), 2.0).unwrap();
    assert!(!rects.is_empty());
    assert!(rects.iter().all(|r| r.y1 <= 10.0 + 1e-9 && r.y0 >= 0.0 - 1e-9));
}

#[test]
fn glyphs_advance_left_to_right() {
    let one = glyph_rects("1", Point::new(0.0, 5.0), 1.0).unwrap();
    let two = glyph_rects("11", Point::new(0.0, 5.0), 1.0).unwrap();
    assert_eq!(two.len(), 2 * one.len());
    let max_x = two.iter().map(|r| r.x1).fold(0.0, f64::max);
    assert_eq!(max_x, 7.0);
}

#[test]
fn unknown_characters_are_errors() {
    assert!(matches!(
        glyph_rects("x", Point::ZERO, 1.0),
        Err(TernvidError::Render(_))
    ));
}
