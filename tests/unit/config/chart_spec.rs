use super::*;
use crate::chart::model::RadiusPair;

const BASIC: &str = r##"{
  "canvas": { "width": 320, "height": 320 },
  "data": [
    { "value": 75, "max_value": 100 },
    { "value": 3, "max_value": 4, "color": "#ff0000" },
    { "value": 1, "max_value": 2 }
  ],
  "layout": { "base_radius": 140, "ring_width": 20, "ring_gap": 6 },
  "rings": [ {}, { "animate": false }, { "color": "#00ff00", "show_glow": false } ]
}"##;

fn basic() -> ChartSpec {
    ChartSpec::from_json_str(BASIC).unwrap()
}

#[test]
fn defaults_fill_in() {
    let spec = basic();
    assert_eq!(spec.fps, Fps { num: 60, den: 1 });
    assert!(spec.animate);
    assert!(spec.show_glow);
    assert_eq!(spec.layout.order, RingOrder::OutsideIn);
    assert_eq!(spec.palette, None);
}

#[test]
fn overrides_merge_per_ring() {
    let spec = basic();
    assert_eq!(spec.ring_props(0), RingProps::default());
    assert!(!spec.ring_props(1).animate);
    assert!(spec.ring_props(1).show_glow);
    let third = spec.ring_props(2);
    assert_eq!(third.color.as_deref(), Some("#00ff00"));
    assert!(!third.show_glow);
    assert_eq!(spec.ring_props(9), RingProps::default());
}

#[test]
fn hover_ease_cascades_from_chart_to_ring() {
    let mut spec = basic();
    assert_eq!(spec.hover_ease, Ease::DEFAULT_TWEEN);
    spec.hover_ease = Ease::OutQuad;
    spec.rings[1].hover_ease = Some(Ease::Linear);
    assert_eq!(spec.ring_props(0).hover_ease, Ease::OutQuad);
    assert_eq!(spec.ring_props(1).hover_ease, Ease::Linear);
    assert_eq!(spec.ring_props(9).hover_ease, Ease::OutQuad);

    let json = r#"{ "canvas": { "width": 100, "height": 100 }, "data": [],
        "layout": { "base_radius": 40, "ring_width": 8, "ring_gap": 2 },
        "hover_ease": "out_cubic", "rings": [ { "hover_ease": "linear" } ] }"#;
    let parsed = ChartSpec::from_json_str(json).unwrap();
    assert_eq!(parsed.ring_props(0).hover_ease, Ease::Linear);
    assert_eq!(parsed.ring_props(1).hover_ease, Ease::OutCubic);
}

#[test]
fn context_uses_layout_and_colors() {
    let mut spec = basic();
    spec.palette = Some(vec!["#111111".to_string()]);
    spec.track_color = Some("#222222".to_string());
    let ctx = spec.context();
    assert_eq!(ctx.len(), 3);
    assert_eq!(ctx.ring_radii(1), RadiusPair::new(94.0, 114.0));
    assert_eq!(ctx.color(0), "#111111");
    assert_eq!(ctx.color(1), "#ff0000");
    assert_eq!(ctx.track_color(), "#222222");
}

#[test]
fn mount_builds_one_ring_per_datum() {
    let chart = basic().mount();
    assert_eq!(chart.rings().len(), 3);
    assert!(chart.ring(0).unwrap().progress_phase().is_some());
    assert!(chart.ring(1).unwrap().progress_phase().is_none());
}

#[test]
fn rejects_zero_canvas() {
    let mut spec = basic();
    spec.canvas.width = 0;
    assert!(matches!(spec.validate(), Err(RingError::Validation(_))));
}

#[test]
fn rejects_bad_layout_metrics() {
    for (base, width, gap) in [
        (0.0, 10.0, 0.0),
        (100.0, -1.0, 0.0),
        (f64::NAN, 10.0, 0.0),
        (100.0, 10.0, -2.0),
        (100.0, 10.0, f64::INFINITY),
    ] {
        let mut spec = basic();
        spec.layout = RingLayout::new(base, width, gap, RingOrder::OutsideIn);
        assert!(spec.validate().is_err(), "{base} {width} {gap}");
    }
}

#[test]
fn rejects_rings_that_would_cross_the_center() {
    let mut spec = basic();
    spec.layout.base_radius = 60.0;
    let err = spec.validate().unwrap_err().to_string();
    assert!(err.contains("too small"), "{err}");

    spec.layout.order = RingOrder::InsideOut;
    spec.validate().unwrap();
}

#[test]
fn does_not_validate_data() {
    let mut spec = basic();
    spec.data[0].max_value = 0.0;
    spec.data[1].value = 12.0;
    spec.validate().unwrap();
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = ChartSpec::from_json_str("{ \"canvas\": 3 }").unwrap_err();
    assert!(matches!(err, RingError::Serde(_)));
}
