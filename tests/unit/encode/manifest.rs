use super::*;
use crate::density::estimator::DensityField;
use crate::foundation::core::FrameIndex;
use ndarray::Array2;
use std::sync::Arc;

fn sequence() -> DensitySequence {
    let grid = Grid {
        nx: 2,
        ny: 2,
        ..Grid::default()
    };
    let fields = (0..2)
        .map(|i| DensityField {
            frame: FrameIndex(i),
            window: IndexRange {
                start: i as usize,
                end: i as usize + 3,
            },
            values: Array2::from_elem((2, 2), (i + 1) as f64),
        })
        .collect();
    DensitySequence {
        grid: Arc::new(grid),
        fields,
    }
}

#[test]
fn records_follow_frame_order() {
    let labels = vec![Some("[0 - 3]".to_string()), Some("[1 - 4]".to_string())];
    let m = Manifest::from_sequence(&sequence(), &labels, 8, 10.0).unwrap();
    assert_eq!(m.frames.len(), 2);
    assert_eq!(m.frames[1].index, 1);
    assert_eq!(m.frames[1].window, IndexRange { start: 1, end: 4 });
    assert_eq!(m.frames[1].max_density, 2.0);
    assert_eq!(m.frames[0].label.as_deref(), Some("[0 - 3]"));
}

#[test]
fn label_count_must_match() {
    assert!(Manifest::from_sequence(&sequence(), &[None], 8, 10.0).is_err());
}

#[test]
fn written_manifest_parses_back() {
    let m = Manifest::from_sequence(&sequence(), &[None, None], 4, 2.5).unwrap();
    let path = std::env::temp_dir()
        .join(format!("ternvid_manifest_{}", std::process::id()))
        .join("frames.json");
    m.write(&path).unwrap();
    let back: Manifest = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(back, m);
}
