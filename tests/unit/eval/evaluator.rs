use super::*;
use crate::foundation::core::{Point, Rgb8, Rgba8};
use crate::genome::model::Polygon;

fn solid_reference(w: u32, h: u32, color: Rgb8) -> ReferenceImage {
    let mut c = Canvas::new(w, h).unwrap();
    c.fill(color);
    ReferenceImage::from_canvas(c)
}

fn evaluator(w: u32, h: u32, color: Rgb8) -> Evaluator {
    Evaluator::from_reference(solid_reference(w, h, color), EvaluatorOpts::with_size(w, h)).unwrap()
}

fn scratch_dir(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("polyfit-eval-{tag}-{}", std::process::id()))
}

#[test]
fn exact_monochrome_match_scores_zero() {
    let ev = evaluator(16, 16, Rgb8::new(40, 80, 120));
    let g = Genome::monochrome(16, 16, Rgba8::opaque(40, 80, 120));
    assert_eq!(ev.evaluate(&g).unwrap(), 0.0);
}

#[test]
fn empty_genome_scores_reference_channel_sum() {
    let ev = evaluator(8, 4, Rgb8::new(1, 2, 3));
    assert_eq!(ev.evaluate(&Genome::new(8, 4)).unwrap(), (6 * 8 * 4) as f64);
}

#[test]
fn white_reference_against_black_render_is_worst() {
    let ev = evaluator(5, 7, Rgb8::new(255, 255, 255));
    let score = ev.evaluate(&Genome::new(5, 7)).unwrap();
    assert_eq!(score, ev.worst_score());
    assert_eq!(score, (255 * 3 * 5 * 7) as f64);
}

#[test]
fn render_uses_evaluation_size_not_genome_size() {
    let ev = evaluator(10, 6, Rgb8::BLACK);
    let c = ev.render(&Genome::monochrome(500, 500, Rgba8::opaque(9, 9, 9)));
    assert_eq!((c.width(), c.height()), (10, 6));
    assert_eq!(c.pixel(9, 5), Some(Rgb8::new(9, 9, 9)));
}

#[test]
fn render_starts_black_every_call() {
    let ev = evaluator(4, 4, Rgb8::BLACK);
    let _ = ev.render(&Genome::monochrome(4, 4, Rgba8::opaque(255, 0, 0)));
    let c = ev.render(&Genome::new(4, 4));
    assert!(c.data().iter().all(|&b| b == 0));
}

#[test]
fn score_rejects_foreign_canvas_and_worst_policy_applies() {
    let ev = evaluator(8, 8, Rgb8::BLACK);
    let res = ev.score(&Canvas::new(9, 8).unwrap());
    assert!(matches!(res, Err(PolyfitError::Incomparable(_))));
    assert_eq!(ev.score_or_worst(res), ev.worst_score());
    assert_eq!(ev.score_or_worst(Ok(3.0)), 3.0);
}

#[test]
fn mismatched_reference_and_opts_are_rejected() {
    let err = Evaluator::from_reference(
        solid_reference(4, 4, Rgb8::BLACK),
        EvaluatorOpts::with_size(8, 8),
    )
    .unwrap_err();
    assert!(matches!(err, PolyfitError::Validation(_)));
}

#[test]
fn accessors_report_construction_state() {
    let ev = evaluator(12, 3, Rgb8::new(7, 7, 7));
    assert_eq!((ev.width(), ev.height()), (12, 3));
    assert_eq!(ev.source_dimensions(), (12, 3));
    assert_eq!(ev.opts(), &EvaluatorOpts::with_size(12, 3));
    assert_eq!(ev.reference().pixel(0, 0), Some(Rgb8::new(7, 7, 7)));
    assert!(Arc::ptr_eq(&ev.shared_reference(), &ev.shared_reference()));
    assert!(!ev.is_natural());
}

#[test]
fn snapshot_disabled_by_default() {
    let ev = evaluator(4, 4, Rgb8::BLACK);
    let out = ev.evaluate_with_snapshot(&Genome::new(4, 4), 0).unwrap();
    assert_eq!(out.score, 0.0);
    assert_eq!(out.snapshot, SnapshotOutcome::Disabled);
}

#[test]
fn snapshot_is_written_by_index() {
    let dir = scratch_dir("snap");
    let opts = EvaluatorOpts {
        snapshot_dir: Some(dir.clone()),
        ..EvaluatorOpts::with_size(6, 6)
    };
    let ev = Evaluator::from_reference(solid_reference(6, 6, Rgb8::BLACK), opts).unwrap();

    let g = Genome::new(6, 6).with_polygon(Polygon::new(
        Rgba8::opaque(255, 255, 255),
        [Point::new(0, 0), Point::new(6, 0), Point::new(0, 6)],
    ));
    let out = ev.evaluate_with_snapshot(&g, 3).unwrap();
    assert_eq!(out.score, ev.evaluate(&g).unwrap());
    assert_eq!(out.snapshot, SnapshotOutcome::Written(dir.join("render3.png")));

    let img = image::open(dir.join("render3.png")).unwrap().to_rgb8();
    assert_eq!(img.as_raw(), &ev.render(&g).to_rgb8());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn snapshot_failure_keeps_score() {
    let dir = scratch_dir("snapfail");
    std::fs::create_dir_all(&dir).unwrap();
    let blocker = dir.join("not-a-dir");
    std::fs::write(&blocker, b"x").unwrap();

    let opts = EvaluatorOpts {
        snapshot_dir: Some(blocker),
        ..EvaluatorOpts::with_size(4, 4)
    };
    let ev = Evaluator::from_reference(solid_reference(4, 4, Rgb8::new(1, 1, 1)), opts).unwrap();
    let out = ev.evaluate_with_snapshot(&Genome::new(4, 4), 0).unwrap();
    assert_eq!(out.score, 48.0);
    assert!(matches!(out.snapshot, SnapshotOutcome::Failed(_)));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn reference_snapshot_is_written_at_construction() {
    let dir = scratch_dir("refsnap");
    let path = dir.join("reference.png");
    let opts = EvaluatorOpts {
        reference_snapshot: Some(path.clone()),
        ..EvaluatorOpts::with_size(3, 3)
    };
    let _ev = Evaluator::from_reference(solid_reference(3, 3, Rgb8::new(0, 128, 255)), opts)
        .unwrap();
    let img = image::open(&path).unwrap().to_rgb8();
    assert_eq!(img.get_pixel(1, 1).0, [0, 128, 255]);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn evaluator_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Evaluator>();
}

#[test]
fn snapshot_persists_the_given_canvas() {
    let dir = scratch_dir("snapcanvas");
    let opts = EvaluatorOpts {
        snapshot_dir: Some(dir.clone()),
        ..EvaluatorOpts::with_size(5, 5)
    };
    let ev = Evaluator::from_reference(solid_reference(5, 5, Rgb8::BLACK), opts).unwrap();

    let canvas = ev.render(&Genome::monochrome(5, 5, Rgba8::opaque(30, 60, 90)));
    let score = ev.score(&canvas).unwrap();
    assert_eq!(ev.snapshot(&canvas, 8), SnapshotOutcome::Written(dir.join("render8.png")));
    assert_eq!(score, (180 * 25) as f64);

    let img = image::open(dir.join("render8.png")).unwrap().to_rgb8();
    assert_eq!(img.as_raw(), &canvas.to_rgb8());

    std::fs::remove_dir_all(&dir).unwrap();

    let disabled = evaluator(5, 5, Rgb8::BLACK);
    assert_eq!(disabled.snapshot(&canvas, 0), SnapshotOutcome::Disabled);
}
