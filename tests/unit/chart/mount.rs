use std::cell::RefCell;
use std::f64::consts::{PI, TAU};
use std::rc::Rc;

use super::*;
use crate::chart::model::{RingDatum, RingLayout, RingOrder};
use crate::chart::progress::{ProgressPhase, progress_delay};
use crate::chart::ring::track_expand_delay;
use crate::foundation::core::Canvas;
use crate::geometry::arc::{ArcSpec, PROGRESS_START_ANGLE};
use crate::render::svg::svg_document;

const FRAME: f64 = 1.0 / 60.0;

fn chart(n: usize) -> RingChart {
    let data = (0..n)
        .map(|i| RingDatum::new(i as f64 + 1.0, 10.0))
        .collect();
    let ctx = RingContext::new(data, RingLayout::new(120.0, 12.0, 4.0, RingOrder::OutsideIn));
    RingChart::mount(ctx, RingProps::default())
}

fn run(chart: &mut RingChart, secs: f64) {
    let frames = (secs / FRAME).round() as usize;
    for _ in 0..frames {
        chart.tick(FRAME);
    }
}

fn settle(chart: &mut RingChart) -> usize {
    let mut frames = 0;
    while chart.tick(FRAME) {
        frames += 1;
        assert!(frames < 60 * 10, "chart never settled");
    }
    frames
}

fn phase(chart: &RingChart, index: usize) -> ProgressPhase {
    chart.ring(index).unwrap().progress_phase().unwrap()
}

#[test]
fn total_entrance_delay_strictly_increases() {
    let mut prev = f64::NEG_INFINITY;
    for i in 0..8 {
        let total = track_expand_delay(i) + progress_delay(i);
        assert!(total > prev);
        assert!(progress_delay(i) > track_expand_delay(i));
        prev = total;
    }
}

#[test]
fn mount_starts_every_ring_delayed() {
    let c = chart(3);
    assert_eq!(c.context().epoch(), 0);
    assert_eq!(c.context().hovered_index(), None);
    for i in 0..3 {
        assert_eq!(phase(&c, i), ProgressPhase::Delayed);
    }
    assert!(c.is_animating());
}

#[test]
fn progress_rings_start_in_index_order() {
    let mut c = chart(3);
    run(&mut c, 0.65);
    assert_eq!(phase(&c, 0), ProgressPhase::Animating);
    assert_eq!(phase(&c, 1), ProgressPhase::Delayed);
    run(&mut c, 0.1);
    assert_eq!(phase(&c, 1), ProgressPhase::Animating);
    assert_eq!(phase(&c, 2), ProgressPhase::Delayed);
}

#[test]
fn chart_settles_and_stays_put() {
    let mut c = chart(3);
    let mut frames = 0;
    while c.tick(FRAME) {
        frames += 1;
        assert!(frames < 60 * 10, "chart never settled");
    }
    assert!(!c.is_animating());
    let settled = c.frame();
    c.tick(FRAME);
    let again = c.frame();
    assert_eq!(settled.rings, again.rings);
}

#[test]
fn hover_fades_all_other_rings() {
    let mut c = chart(4);
    assert!(c.set_hovered_index(Some(2)));
    let f = c.frame();
    for ring in &f.rings {
        assert_eq!(ring.hover.is_faded, ring.index != 2);
        assert_eq!(ring.hover.is_hovered, ring.index == 2);
    }
    assert!(c.set_hovered_index(None));
    assert!(c.frame().rings.iter().all(|r| !r.hover.is_faded));
}

#[test]
fn epoch_bump_while_delayed_cancels_and_restarts() {
    let mut c = chart(2);
    c.bump_epoch();
    run(&mut c, 0.4);
    assert_eq!(phase(&c, 0), ProgressPhase::Delayed);

    assert_eq!(c.bump_epoch(), 2);
    for i in 0..2 {
        let ring = c.ring(i).unwrap();
        assert_eq!(ring.progress_phase(), Some(ProgressPhase::Delayed));
    }

    // 0.25 s later the first timer would have fired; the arc must still be empty.
    run(&mut c, 0.25);
    assert_eq!(phase(&c, 0), ProgressPhase::Delayed);
    assert!(c.frame().rings[0].progress.path.is_empty());

    run(&mut c, 0.4);
    assert_eq!(phase(&c, 0), ProgressPhase::Animating);
}

#[test]
fn pointer_move_hit_tests_rings() {
    let mut c = chart(2);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    c.subscribe(move |h| sink.borrow_mut().push(h));

    // Ring 0 spans 108..120, ring 1 spans 92..104.
    assert_eq!(c.pointer_move(Vec2::new(0.0, -114.0)), Some(0));
    assert_eq!(c.pointer_move(Vec2::new(0.0, -115.0)), Some(0));
    assert_eq!(c.pointer_move(Vec2::new(98.0, 0.0)), Some(1));
    assert_eq!(c.pointer_move(Vec2::new(106.0, 0.0)), None);
    assert_eq!(c.pointer_move(Vec2::new(98.0, 0.0)), Some(1));
    c.pointer_exit();

    assert_eq!(
        *seen.borrow(),
        vec![Some(0), None, Some(1), None, Some(1), None]
    );
}

#[test]
fn extra_ring_props_render_nothing() {
    let ctx = RingContext::new(
        vec![RingDatum::new(1.0, 2.0)],
        RingLayout::new(50.0, 5.0, 1.0, RingOrder::OutsideIn),
    );
    let c = RingChart::mount_with_props(ctx, vec![RingProps::default(); 3]);
    assert_eq!(c.rings().len(), 3);
    assert_eq!(c.frame().rings.len(), 1);
}

#[test]
fn replace_data_restarts_with_new_targets() {
    let mut c = chart(1);
    run(&mut c, 4.0);
    assert!(!c.is_animating());
    c.replace_data(vec![RingDatum::new(10.0, 10.0)]);
    assert_eq!(c.context().epoch(), 1);
    assert_eq!(phase(&c, 0), ProgressPhase::Delayed);
    run(&mut c, 4.0);
    let sweep = c.frame().rings[0].progress.arc.sweep();
    assert!((sweep - std::f64::consts::TAU).abs() < 1e-9);
}

#[test]
fn unmount_makes_ticks_inert() {
    let mut c = chart(2);
    run(&mut c, 0.2);
    c.unmount();
    assert!(!c.is_mounted());
    let before = c.frame();
    assert!(!c.tick(1.0));
    assert_eq!(c.frame(), before);
    assert_eq!(c.bump_epoch(), 1);
    assert_eq!(phase(&c, 0), ProgressPhase::Idle);
}

#[test]
fn extra_rings_do_not_delay_settling() {
    let layout = RingLayout::new(120.0, 12.0, 4.0, RingOrder::OutsideIn);
    let data = vec![RingDatum::new(3.0, 4.0)];

    let mut exact = RingChart::mount(RingContext::new(data.clone(), layout), RingProps::default());
    let mut padded =
        RingChart::mount_with_props(RingContext::new(data, layout), vec![RingProps::default(); 6]);
    for ring in &padded.rings()[1..] {
        assert!(!ring.is_animating());
    }
    assert_eq!(settle(&mut padded), settle(&mut exact));

    padded.set_hovered_index(Some(0));
    assert!(padded.rings()[1..].iter().all(|r| !r.is_animating()));
}

#[test]
fn degenerate_values_reach_the_scene_unclamped() {
    let ctx = RingContext::new(
        vec![
            RingDatum::new(5.0, 0.0),
            RingDatum::new(0.0, 0.0),
            RingDatum::new(15.0, 10.0),
        ],
        RingLayout::new(120.0, 12.0, 4.0, RingOrder::OutsideIn),
    );
    let mut c = RingChart::mount(ctx, RingProps::default());
    settle(&mut c);
    let frame = c.frame();

    let annulus = |index: usize| {
        let radii = c.context().ring_radii(index);
        ArcSpec::rounded(
            radii.inner_radius,
            radii.outer_radius,
            PROGRESS_START_ANGLE,
            PROGRESS_START_ANGLE + TAU,
        )
        .path()
    };

    // value / 0 sweeps to infinity: drawn as a whole ring.
    assert_eq!(frame.rings[0].progress.arc.sweep(), f64::INFINITY);
    assert_eq!(frame.rings[0].progress.path, annulus(0));
    // 0 / 0 has no direction at all.
    assert!(frame.rings[1].progress.arc.sweep().is_nan());
    assert!(frame.rings[1].progress.path.is_empty());
    // 150% over-sweeps past a full turn.
    assert!((frame.rings[2].progress.arc.sweep() - 3.0 * PI).abs() < 1e-9);
    assert_eq!(frame.rings[2].progress.path, annulus(2));

    let svg = svg_document(&frame, Canvas { width: 300, height: 300 }, None);
    assert!(!svg.contains("NaN"));
    assert!(!svg.contains("inf"));
    assert_eq!(svg.matches("<path ").count(), 5);
}
