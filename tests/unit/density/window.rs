use super::*;

#[test]
fn windows_slide_by_one() {
    let spec = WindowSpec::new(5, 4, 3).unwrap();
    assert_eq!(
        spec.windows(),
        vec![
            IndexRange { start: 5, end: 9 },
            IndexRange { start: 6, end: 10 },
            IndexRange { start: 7, end: 11 },
        ]
    );
    assert_eq!(spec.span(), IndexRange { start: 5, end: 12 });
}

#[test]
fn every_window_has_the_configured_width() {
    let spec = WindowSpec::new(0, 7, 20).unwrap();
    assert!(spec.windows().iter().all(|w| w.len() == 7));
}

#[test]
fn zero_width_or_steps_is_rejected() {
    assert!(WindowSpec::new(0, 0, 3).is_err());
    assert!(WindowSpec::new(0, 3, 0).is_err());
}

#[test]
fn range_check_reports_required_length() {
    let spec = WindowSpec::new(2, 5, 4).unwrap();
    assert_eq!(spec.required_len(), 11);
    assert!(spec.validate(11).is_ok());
    match spec.validate(10) {
        Err(TernvidError::ConfigRange { required, actual }) => {
            assert_eq!(required, 11);
            assert_eq!(actual, 10);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn last_window_stays_inside_a_valid_dataset() {
    let spec = WindowSpec::new(3, 6, 10).unwrap();
    let len = spec.required_len();
    spec.validate(len).unwrap();
    let last = *spec.windows().last().unwrap();
    assert!(last.end < len);
}
