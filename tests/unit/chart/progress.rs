use std::f64::consts::{FRAC_PI_2, PI};

use super::*;

const FRAME: f64 = 1.0 / 60.0;

fn run(anim: &mut ProgressAnimator, secs: f64) {
    let frames = (secs / FRAME).round() as usize;
    for _ in 0..frames {
        anim.tick(FRAME);
    }
}

#[test]
fn delays_follow_the_stagger_schedule() {
    assert_eq!(progress_delay(0), 0.6);
    assert!((progress_delay(1) - 0.7).abs() < 1e-12);
    assert!((progress_delay(4) - 1.0).abs() < 1e-12);
}

#[test]
fn starts_idle_until_synced() {
    let mut a = ProgressAnimator::new(0);
    assert_eq!(a.phase(), ProgressPhase::Idle);
    assert!(!a.tick(1.0));
    assert_eq!(a.fraction(), 0.0);
}

#[test]
fn walks_through_every_phase() {
    let mut a = ProgressAnimator::new(1);
    assert!(a.sync(0));
    assert_eq!(a.phase(), ProgressPhase::Delayed);
    assert_eq!(a.pending_delay(), Some(progress_delay(1)));

    run(&mut a, 0.6);
    assert_eq!(a.phase(), ProgressPhase::Delayed);
    assert_eq!(a.fraction(), 0.0);

    run(&mut a, 0.2);
    assert_eq!(a.phase(), ProgressPhase::Animating);
    assert!(a.fraction() > 0.0 && a.fraction() < 1.0);
    assert_eq!(a.pending_delay(), None);

    run(&mut a, 5.0);
    assert_eq!(a.phase(), ProgressPhase::Settled);
    assert_eq!(a.fraction(), 1.0);
    assert!(!a.tick(FRAME));
    assert_eq!(a.fraction(), 1.0);
}

#[test]
fn same_epoch_does_not_restart() {
    let mut a = ProgressAnimator::new(0);
    a.sync(3);
    run(&mut a, 1.0);
    let before = a.fraction();
    assert!(!a.sync(3));
    assert_eq!(a.fraction(), before);
}

#[test]
fn epoch_change_while_delayed_reschedules_from_scratch() {
    let mut a = ProgressAnimator::new(0);
    a.sync(1);
    run(&mut a, 0.3);
    let remaining = a.pending_delay().unwrap();
    assert!(remaining < 0.31);

    assert!(a.sync(2));
    assert_eq!(a.phase(), ProgressPhase::Delayed);
    assert_eq!(a.epoch(), Some(2));
    assert_eq!(a.pending_delay(), Some(progress_delay(0)));

    // Where the old timer would have fired, nothing happens.
    run(&mut a, 0.35);
    assert_eq!(a.phase(), ProgressPhase::Delayed);
    assert_eq!(a.fraction(), 0.0);
}

#[test]
fn epoch_change_while_animating_resets_to_zero() {
    let mut a = ProgressAnimator::new(0);
    a.sync(0);
    run(&mut a, 1.0);
    assert!(a.fraction() > 0.0);
    a.sync(1);
    assert_eq!(a.fraction(), 0.0);
    assert!(!a.spring().is_animating());
    assert_eq!(a.phase(), ProgressPhase::Delayed);
}

#[test]
fn unmount_cancels_pending_start() {
    let mut a = ProgressAnimator::new(2);
    a.sync(0);
    run(&mut a, 0.5);
    a.unmount();
    assert_eq!(a.phase(), ProgressPhase::Idle);
    assert_eq!(a.pending_delay(), None);
    run(&mut a, 2.0);
    assert_eq!(a.fraction(), 0.0);
}

#[test]
fn end_angle_interpolates_the_sweep() {
    let mut a = ProgressAnimator::new(0);
    let start = -FRAC_PI_2;
    let target = start + PI;
    assert_eq!(a.end_angle(start, target), start);
    a.sync(0);
    run(&mut a, 6.0);
    assert!((a.end_angle(start, target) - target).abs() < 1e-12);
}
