use super::*;
use crate::chart::progress::ProgressPhase;

const SPEC: &str = r##"{
  "canvas": { "width": 120, "height": 120 },
  "fps": { "num": 30, "den": 1 },
  "data": [
    { "value": 3, "max_value": 4 },
    { "value": 1, "max_value": 2 }
  ],
  "layout": { "base_radius": 50, "ring_width": 10, "ring_gap": 4 }
}"##;

fn spec() -> ChartSpec {
    ChartSpec::from_json_str(SPEC).unwrap()
}

fn opts() -> PlaybackOpts {
    PlaybackOpts {
        background: None,
        ..PlaybackOpts::default()
    }
}

#[test]
fn frame_at_zero_is_the_mount_state() {
    let frame = render_frame_at(&spec(), 0.0, &opts()).unwrap();
    assert_eq!(frame.time, 0.0);
    assert_eq!(frame.rings.len(), 2);
    for ring in &frame.rings {
        assert_eq!(ring.track.scale, 0.0);
        assert!(ring.progress.path.is_empty());
    }
}

#[test]
fn frame_at_reaches_requested_time() {
    let frame = render_frame_at(&spec(), 0.35, &opts()).unwrap();
    assert!((frame.time - 0.35).abs() < 1e-9);
    // Tracks are expanding, progress arcs still waiting.
    assert!(frame.rings[0].track.scale > 0.0);
    assert!(frame.rings[0].progress.path.is_empty());
}

#[test]
fn late_frame_is_settled() {
    let frame = render_frame_at(&spec(), 5.0, &opts()).unwrap();
    let sweep = frame.rings[0].progress.arc.sweep();
    assert!((sweep - 0.75 * std::f64::consts::TAU).abs() < 1e-9);
    assert_eq!(frame.rings[1].track.scale, 1.0);
}

#[test]
fn hover_option_applies_from_the_start() {
    let o = PlaybackOpts {
        hover: Some(1),
        ..opts()
    };
    let frame = render_frame_at(&spec(), 1.0, &o).unwrap();
    assert_eq!(frame.hovered_index, Some(1));
    assert!(frame.rings[0].hover.is_faded);
    assert!((frame.rings[0].progress.opacity - 0.4).abs() < 1e-9);
    assert!(frame.rings[1].progress.glow.is_some());
}

#[test]
fn rejects_bad_times() {
    for t in [-1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            render_frame_at(&spec(), t, &opts()),
            Err(RingError::Animation(_))
        ));
    }
}

#[test]
fn sequence_covers_both_ends() {
    let mut sink = InMemorySink::new();
    let o = PlaybackOpts {
        fps: Some(Fps::new(10, 1).unwrap()),
        ..opts()
    };
    let n = render_sequence(&spec(), 1.0, &o, &mut sink).unwrap();
    assert_eq!(n, 11);
    assert_eq!(sink.config().unwrap().frame_count, 11);
    assert_eq!(sink.frames.len(), 11);
    for (i, f) in sink.frames.iter().enumerate() {
        assert_eq!(f.index, i as u64);
        assert!(f.svg.starts_with("<svg"));
    }
    assert!((sink.frames[10].chart.time - 1.0).abs() < 1e-9);
}

#[test]
fn sequence_matches_single_frames() {
    let mut sink = InMemorySink::new();
    render_sequence(&spec(), 0.5, &opts(), &mut sink).unwrap();
    let last = sink.frames.last().unwrap();
    let single = render_frame_at(&spec(), 0.5, &opts()).unwrap();
    assert_eq!(last.chart.rings.len(), single.rings.len());
    for (a, b) in last.chart.rings.iter().zip(&single.rings) {
        assert!((a.track.scale - b.track.scale).abs() < 1e-6);
    }
}

#[test]
fn dir_sink_writes_numbered_files() {
    let dir = std::env::temp_dir().join(format!("ringmotion_seq_{}", std::process::id()));
    let mut sink = DirSink::new(&dir, ImageFormat::Svg);
    let o = PlaybackOpts {
        fps: Some(Fps::new(10, 1).unwrap()),
        ..opts()
    };
    render_sequence(&spec(), 0.2, &o, &mut sink).unwrap();
    assert_eq!(sink.written().len(), 3);
    assert!(sink.written()[2].ends_with("frame_00002.svg"));
    let text = std::fs::read_to_string(&sink.written()[0]).unwrap();
    assert!(text.contains("<svg"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn advance_steps_at_most_one_frame() {
    let mut chart = spec().mount();
    advance(&mut chart, Fps::new(30, 1).unwrap(), 0.7);
    assert!((chart.elapsed() - 0.7).abs() < 1e-9);
    assert_eq!(
        chart.ring(0).unwrap().progress_phase(),
        Some(ProgressPhase::Animating)
    );
}
