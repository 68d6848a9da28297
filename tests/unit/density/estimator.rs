use super::*;
use crate::ternary::transform::CompositionTriplet;

fn corners() -> Dataset {
    let rows = [
        [1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, 1.0],
    ];
    Dataset::new(rows.iter().map(|&r| CompositionTriplet::from(r)).collect()).unwrap()
}

fn line_scan(n: usize) -> Dataset {
    // Deterministic wobble drifting from the Si+Al corner towards Mg.
    let triplets = (0..n)
        .map(|i| {
            let t = i as f64 / n as f64;
            let w = ((i * 7919) % 13) as f64 / 13.0;
            CompositionTriplet::new(
                0.6 - 0.3 * t + 0.05 * w,
                0.2 + 0.04 * (1.0 - w),
                0.2 + 0.3 * t,
            )
        })
        .collect();
    Dataset::new(triplets).unwrap()
}

fn small_grid() -> Grid {
    Grid {
        nx: 40,
        ny: 30,
        ..Grid::default()
    }
}

#[test]
fn two_point_identical_window_fails_at_frame_zero() {
    let spec = WindowSpec::new(0, 2, 4).unwrap();
    match estimate_sequence(&corners(), spec, small_grid(), &EstimatorOpts::default()) {
        Err(TernvidError::DegenerateWindow {
            frame, start, end, ..
        }) => {
            assert_eq!(frame, 0);
            assert_eq!((start, end), (0, 2));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn collinear_edge_scan_is_degenerate() {
    // Every point sits on the B = 0 edge.
    let triplets = (0..20)
        .map(|i| CompositionTriplet::new(1.0 + i as f64, 0.0, 20.0 - i as f64))
        .collect();
    let data = Dataset::new(triplets).unwrap();
    let spec = WindowSpec::new(0, 10, 5).unwrap();
    let res = estimate_sequence(&data, spec, small_grid(), &EstimatorOpts::default());
    match res {
        Err(TernvidError::DegenerateWindow {
            frame,
            start,
            end,
            reason,
        }) => {
            assert_eq!((frame, start, end), (0, 0, 10));
            assert!(reason.contains("collinear"), "reason: {reason}");
        }
        other => panic!("expected a degenerate window, got {other:?}"),
    }
}

#[test]
fn three_point_windows_produce_grid_shaped_fields() {
    let spec = WindowSpec::new(0, 3, 3).unwrap();
    let seq = estimate_sequence(&corners(), spec, small_grid(), &EstimatorOpts::default()).unwrap();
    assert_eq!(seq.len(), 3);
    for (i, field) in seq.fields.iter().enumerate() {
        assert_eq!(field.frame, FrameIndex(i as u64));
        assert_eq!(field.values.dim(), (40, 30));
        assert!(field.values.iter().all(|v| *v >= 0.0 && v.is_finite()));
        assert!(field.max() > 0.0);
    }
    assert_eq!(
        seq.windows(),
        vec![
            IndexRange { start: 0, end: 3 },
            IndexRange { start: 1, end: 4 },
            IndexRange { start: 2, end: 5 },
        ]
    );
}

#[test]
fn out_of_range_spec_fails_before_any_frame() {
    let spec = WindowSpec::new(1, 3, 3).unwrap();
    assert!(matches!(
        estimate_sequence(&corners(), spec, small_grid(), &EstimatorOpts::default()),
        Err(TernvidError::ConfigRange {
            required: 7,
            actual: 6
        })
    ));
}

#[test]
fn invalid_grid_fails_before_any_frame() {
    let spec = WindowSpec::new(0, 3, 3).unwrap();
    let grid = Grid {
        nx: 1,
        ..Grid::default()
    };
    assert!(matches!(
        estimate_sequence(&corners(), spec, grid, &EstimatorOpts::default()),
        Err(TernvidError::Validation(_))
    ));
}

#[test]
fn frames_share_one_grid() {
    let spec = WindowSpec::new(0, 10, 5).unwrap();
    let seq =
        estimate_sequence(&line_scan(40), spec, small_grid(), &EstimatorOpts::default()).unwrap();
    assert_eq!(*seq.grid, small_grid());
    assert!(seq.fields.iter().all(|f| f.values.dim() == seq.grid.shape()));
}

#[test]
fn parallel_matches_sequential_in_frame_order() {
    let data = line_scan(60);
    let spec = WindowSpec::new(4, 12, 20).unwrap();
    let seq = estimate_sequence(&data, spec, small_grid(), &EstimatorOpts::default()).unwrap();
    let par = estimate_sequence(
        &data,
        spec,
        small_grid(),
        &EstimatorOpts {
            parallel: true,
            threads: Some(3),
            ..EstimatorOpts::default()
        },
    )
    .unwrap();
    assert_eq!(seq.fields, par.fields);
}

#[test]
fn parallel_reports_lowest_failing_frame() {
    // Frames 0 and 2 are the identical-pair windows [0,2) and [2,4).
    let spec = WindowSpec::new(0, 2, 3).unwrap();
    let res = estimate_sequence(
        &corners(),
        spec,
        small_grid(),
        &EstimatorOpts {
            parallel: true,
            ..EstimatorOpts::default()
        },
    );
    assert!(matches!(
        res,
        Err(TernvidError::DegenerateWindow { frame: 0, .. })
    ));
}

#[test]
fn zero_threads_is_rejected() {
    let spec = WindowSpec::new(0, 3, 3).unwrap();
    let res = estimate_sequence(
        &corners(),
        spec,
        small_grid(),
        &EstimatorOpts {
            parallel: true,
            threads: Some(0),
            ..EstimatorOpts::default()
        },
    );
    assert!(matches!(res, Err(TernvidError::Validation(_))));
}

#[test]
fn fields_are_not_normalized_across_frames() {
    // A tight cluster followed by a spread-out one: peak densities must differ.
    let mut rows = Vec::new();
    for i in 0..10 {
        let phase = i as f64;
        rows.push(CompositionTriplet::new(
            0.5 + 0.03 * phase.cos(),
            0.25,
            0.25 + 0.03 * phase.sin(),
        ));
    }
    for i in 0..11 {
        let phase = i as f64;
        rows.push(CompositionTriplet::new(
            0.3 + 0.15 * (phase * 0.7).cos(),
            0.4 + 0.15 * (phase * 1.3).sin(),
            0.3,
        ));
    }
    let data = Dataset::new(rows).unwrap();
    let spec = WindowSpec::new(0, 10, 11).unwrap();
    let grid = Grid {
        nx: 150,
        ny: 150,
        ..Grid::default()
    };
    let seq = estimate_sequence(&data, spec, grid, &EstimatorOpts::default()).unwrap();
    let first = seq.fields.first().unwrap().max();
    let last = seq.fields.last().unwrap().max();
    assert!(first > 2.0 * last, "first = {first}, last = {last}");
}

#[test]
fn reference_scatter_covers_window_span_or_all() {
    let data = line_scan(30);
    let spec = WindowSpec::new(5, 10, 8).unwrap();
    let span = reference_scatter(&data, spec, ScatterSpan::Windows).unwrap();
    assert_eq!(span.len(), 18);
    assert_eq!(span[17], data.planar_points(22..23).unwrap()[0]);
    assert_eq!(span[0], data.planar_points(5..6).unwrap()[0]);
    let all = reference_scatter(&data, spec, ScatterSpan::All).unwrap();
    assert_eq!(all.len(), 30);
}
