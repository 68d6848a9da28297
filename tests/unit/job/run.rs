use super::*;
use crate::density::grid::Grid;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::Canvas;
use crate::render::label::WindowDisplay;
use crate::ternary::diagram::DiagramKind;
use crate::ternary::transform::CompositionTriplet;

fn scan(n: usize) -> Dataset {
    let triplets = (0..n)
        .map(|i| {
            let t = i as f64 / n as f64;
            let w = ((i * 7919) % 11) as f64 / 11.0;
            CompositionTriplet::new(0.5 - 0.2 * t + 0.06 * w, 0.25 + 0.05 * (1.0 - w), 0.25 + 0.2 * t)
        })
        .collect();
    Dataset::new(triplets).unwrap()
}

fn small_config(dir: &str) -> JobConfig {
    let mut cfg = JobConfig::new(8, 4, 5, 10.0, DiagramKind::Silicate);
    cfg.grid = Grid {
        nx: 40,
        ny: 40,
        ..Grid::default()
    };
    cfg.canvas = Canvas {
        width: 64,
        height: 64,
    };
    cfg.output_dir = std::env::temp_dir().join(format!("ternvid_job_{dir}_{}", std::process::id()));
    cfg.base_name = "scan".to_string();
    cfg
}

#[test]
fn invalid_jobs_fail_at_construction() {
    let cfg = JobConfig::new(8, 40, 5, 10.0, DiagramKind::Silicate);
    assert!(matches!(
        ContourJob::new(cfg, scan(20)),
        Err(TernvidError::ConfigRange { .. })
    ));
}

#[test]
fn render_range_pushes_every_frame_in_order() {
    let mut job = ContourJob::new(small_config("range"), scan(20)).unwrap();
    let mut sink = InMemorySink::new();
    let n = job.render_range(&mut sink).unwrap();
    assert_eq!(n, 4);
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1, 2, 3]);
    assert!(sink.is_finished());
    assert_eq!(sink.config().map(|c| (c.width, c.height)), Some((64, 64)));
}

#[test]
fn labels_follow_windows() {
    let job = ContourJob::new(small_config("labels"), scan(20)).unwrap();
    let labels = job.labels().unwrap();
    assert_eq!(labels.len(), 4);
    assert_eq!(labels[0].as_deref(), Some("[0 - 8]"));
    assert_eq!(labels[3].as_deref(), Some("[3 - 11]"));
}

#[test]
fn distance_labels_read_positions() {
    let mut cfg = small_config("distance");
    cfg.display = WindowDisplay::Distance;
    let data = scan(20)
        .with_positions((0..20).map(|i| i as f64 * 2.5).collect())
        .unwrap();
    let job = ContourJob::new(cfg, data).unwrap();
    assert_eq!(job.labels().unwrap()[1].as_deref(), Some("[2 - 22nm]"));
}

#[test]
fn frame_outside_steps_is_rejected() {
    let mut job = ContourJob::new(small_config("outside"), scan(20)).unwrap();
    assert!(matches!(
        job.render_frame(FrameIndex(4)),
        Err(TernvidError::Validation(_))
    ));
    assert_eq!(job.render_frame(FrameIndex(3)).unwrap().width, 64);
}

#[test]
fn single_frame_fits_only_its_window() {
    let mut job = ContourJob::new(small_config("single"), scan(20)).unwrap();
    let alone = job.render_frame(FrameIndex(2)).unwrap();
    assert!(job.sequence.is_none());

    job.densities().unwrap();
    let cached = job.render_frame(FrameIndex(2)).unwrap();
    assert_eq!(alone.data, cached.data);
}

#[test]
fn full_run_writes_every_output() {
    let cfg = small_config("run");
    let mut job = ContourJob::new(cfg.clone(), scan(20)).unwrap();
    let out = job.run().unwrap();
    assert_eq!(out.frames, 4);
    for p in [&out.scatter, &out.video, &out.still, &out.manifest] {
        assert!(p.exists(), "missing {}", p.display());
    }
    assert_eq!(out.video, cfg.video_path());
    let manifest: Manifest = serde_json::from_slice(&std::fs::read(&out.manifest).unwrap()).unwrap();
    assert_eq!(manifest.frames.len(), 4);
    assert_eq!(manifest.levels, 5);
    assert!(manifest.frames.iter().all(|f| f.max_density > 0.0));
}
