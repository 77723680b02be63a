//! Per-ring rendering: background track, progress arc and hover visuals.

use std::f64::consts::TAU;

use kurbo::Vec2;

use crate::animation::spring::{Spring, SpringConfig};
use crate::animation::timer::Timeout;
use crate::animation::tween::Tween;
use crate::chart::context::{HoverFlags, RingContext};
use crate::chart::model::RingProps;
use crate::chart::progress::{ProgressAnimator, ProgressPhase};
use crate::geometry::arc::{
    ArcPath, ArcSpec, PROGRESS_START_ANGLE, TRACK_END_ANGLE, TRACK_START_ANGLE, annulus_contains,
};

/// Per-index delay of the background-track scale-in.
pub const TRACK_EXPAND_STAGGER: f64 = 0.08;
/// Duration of every hover-driven transition.
pub const HOVER_TRANSITION_SECS: f64 = 0.2;
/// Track opacity while another ring is hovered.
pub const FADED_TRACK_OPACITY: f64 = 0.3;
/// Progress opacity while another ring is hovered.
pub const FADED_PROGRESS_OPACITY: f64 = 0.4;
/// Scale of the hovered progress arc.
pub const HOVERED_PROGRESS_SCALE: f64 = 1.03;
/// Blur radius of the hover glow, in scene units.
pub const GLOW_BLUR_RADIUS: f64 = 12.0;

/// Seconds between (re)mount and the start of ring `index`'s track scale-in.
pub fn track_expand_delay(index: usize) -> f64 {
    index as f64 * TRACK_EXPAND_STAGGER
}

/// How the progress arc reaches its final sweep, chosen once from [`RingProps::animate`].
#[derive(Clone, Debug)]
pub enum ProgressMode {
    /// Spring-driven entrance.
    Animated(ProgressAnimator),
    /// Drawn at its final angle straight away.
    Static {
        /// End angle of the arc, refreshed when the data changes.
        end_angle: f64,
    },
}

/// Drop shadow drawn behind a hovered progress arc.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Glow {
    /// Shadow color; the ring's own color.
    pub color: String,
    /// Blur radius in scene units.
    pub blur_radius: f64,
}

/// One styled arc, ready for a scene graph. Paths are centered on the chart origin and
/// `scale` applies around that origin.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ArcLayer {
    /// Geometry inputs.
    pub arc: ArcSpec,
    /// SVG path data for `arc`.
    pub path: ArcPath,
    /// Fill color.
    pub fill: String,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Uniform scale around the chart center.
    pub scale: f64,
    /// Drop shadow, when hovered with glow enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glow: Option<Glow>,
}

/// Everything one ring draws this frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RingFrame {
    /// Ring index.
    pub index: usize,
    /// Full-circle background track.
    pub track: ArcLayer,
    /// Progress arc, drawn over the track.
    pub progress: ArcLayer,
    /// Hover emphasis this frame.
    #[serde(flatten)]
    pub hover: HoverFlags,
}

/// One ring of a chart: track, progress arc and their animations.
#[derive(Clone, Debug)]
pub struct RingRenderer {
    index: usize,
    props: RingProps,
    track_scale: Spring,
    track_timer: Option<Timeout>,
    track_opacity: Tween,
    progress_opacity: Tween,
    progress_scale: Tween,
    progress: ProgressMode,
    epoch: Option<u64>,
}

impl RingRenderer {
    /// An unmounted ring; the progress mode is fixed here from `props.animate`.
    pub fn new(index: usize, props: RingProps) -> Self {
        let progress = if props.animate {
            ProgressMode::Animated(ProgressAnimator::new(index))
        } else {
            ProgressMode::Static {
                end_angle: PROGRESS_START_ANGLE,
            }
        };
        let ease = props.hover_ease;
        let hover_tween = |v| Tween::settled(v, HOVER_TRANSITION_SECS, ease);
        Self {
            index,
            props,
            track_scale: Spring::new(1.0, SpringConfig::TRACK_SCALE),
            track_timer: None,
            track_opacity: hover_tween(1.0),
            progress_opacity: hover_tween(1.0),
            progress_scale: hover_tween(1.0),
            progress,
            epoch: None,
        }
    }

    /// Ring index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Display options.
    pub fn props(&self) -> &RingProps {
        &self.props
    }

    /// Animated or static progress.
    pub fn progress_mode(&self) -> &ProgressMode {
        &self.progress
    }

    /// Entrance phase of the progress arc; `None` in static mode.
    pub fn progress_phase(&self) -> Option<ProgressPhase> {
        match &self.progress {
            ProgressMode::Animated(anim) => Some(anim.phase()),
            ProgressMode::Static { .. } => None,
        }
    }

    /// Catches up with the context: replays the entrance if the epoch moved (or on first
    /// call) and adopts the current hover state without a transition.
    pub fn mount(&mut self, ctx: &RingContext) {
        self.sync_epoch(ctx);
        self.snap_hover(ctx);
    }

    /// Replays the entrance when the context's epoch differs from the one last seen.
    pub fn sync_epoch(&mut self, ctx: &RingContext) -> bool {
        let epoch = ctx.epoch();
        if self.epoch == Some(epoch) {
            return false;
        }
        self.epoch = Some(epoch);

        if let Some(timer) = &mut self.track_timer {
            timer.cancel();
        }
        if ctx.datum(self.index).is_none() {
            // Nothing to draw: stay idle until new data reaches this index.
            self.track_timer = None;
            self.track_scale.jump(1.0);
            if let ProgressMode::Animated(anim) = &mut self.progress {
                anim.unmount();
            }
            return true;
        }
        if self.props.animate {
            self.track_scale.jump(0.0);
            self.track_timer = Some(Timeout::new(track_expand_delay(self.index)));
        } else {
            self.track_scale.jump(1.0);
            self.track_timer = None;
        }

        let target = self.target_end_angle(ctx);
        match &mut self.progress {
            ProgressMode::Animated(anim) => {
                anim.sync(epoch);
            }
            ProgressMode::Static { end_angle } => *end_angle = target,
        }
        true
    }

    /// Re-derives fade/emphasis targets after a hover change. Rings without data adopt the
    /// new state immediately.
    pub fn on_hover_changed(&mut self, ctx: &RingContext) {
        if ctx.datum(self.index).is_none() {
            self.snap_hover(ctx);
            return;
        }
        let (track, opacity, scale) = self.hover_targets(ctx.hover_flags(self.index));
        self.track_opacity.retarget(track);
        self.progress_opacity.retarget(opacity);
        self.progress_scale.retarget(scale);
    }

    fn snap_hover(&mut self, ctx: &RingContext) {
        let (track, opacity, scale) = self.hover_targets(ctx.hover_flags(self.index));
        self.track_opacity.snap(track);
        self.progress_opacity.snap(opacity);
        self.progress_scale.snap(scale);
    }

    fn hover_targets(&self, flags: HoverFlags) -> (f64, f64, f64) {
        let track = if flags.is_faded {
            FADED_TRACK_OPACITY
        } else {
            1.0
        };
        let opacity = if flags.is_faded {
            FADED_PROGRESS_OPACITY
        } else {
            1.0
        };
        let scale = if flags.is_hovered {
            HOVERED_PROGRESS_SCALE
        } else {
            1.0
        };
        (track, opacity, scale)
    }

    /// Pointer entered this ring.
    pub fn pointer_enter(&self, ctx: &mut RingContext) -> bool {
        ctx.set_hovered_index(Some(self.index))
    }

    /// Pointer left this ring.
    pub fn pointer_leave(&self, ctx: &mut RingContext) -> bool {
        ctx.set_hovered_index(None)
    }

    /// Whether `offset` from the chart center lands on this ring's band.
    pub fn hit_test(&self, ctx: &RingContext, offset: Vec2) -> bool {
        if ctx.datum(self.index).is_none() {
            return false;
        }
        let radii = ctx.ring_radii(self.index);
        annulus_contains(offset, radii.inner_radius, radii.outer_radius)
    }

    /// Advances every animation by `dt` seconds. Returns whether more frames are needed.
    pub fn tick(&mut self, dt: f64) -> bool {
        let mut busy = false;

        let mut scale_dt = Some(dt);
        if let Some(timer) = &mut self.track_timer {
            if timer.is_pending() {
                scale_dt = timer.advance(dt);
                if scale_dt.is_some() {
                    self.track_scale.animate_to(1.0);
                }
            }
        }
        match scale_dt {
            Some(dt) => busy |= self.track_scale.tick(dt),
            None => busy = true,
        }

        busy |= self.track_opacity.tick(dt);
        busy |= self.progress_opacity.tick(dt);
        busy |= self.progress_scale.tick(dt);
        if let ProgressMode::Animated(anim) = &mut self.progress {
            busy |= anim.tick(dt);
        }
        busy
    }

    /// Whether any timer, spring or hover transition still needs ticks.
    pub fn is_animating(&self) -> bool {
        let progress_busy = match &self.progress {
            ProgressMode::Animated(anim) => matches!(
                anim.phase(),
                ProgressPhase::Delayed | ProgressPhase::Animating
            ),
            ProgressMode::Static { .. } => false,
        };
        progress_busy
            || self.track_timer.as_ref().is_some_and(Timeout::is_pending)
            || self.track_scale.is_animating()
            || self.track_opacity.is_animating()
            || self.progress_opacity.is_animating()
            || self.progress_scale.is_animating()
    }

    /// Cancels pending timers and freezes springs.
    pub fn unmount(&mut self) {
        if let Some(timer) = &mut self.track_timer {
            timer.cancel();
        }
        self.track_timer = None;
        self.track_scale.stop();
        if let ProgressMode::Animated(anim) = &mut self.progress {
            anim.unmount();
        }
        self.epoch = None;
    }

    fn target_end_angle(&self, ctx: &RingContext) -> f64 {
        let progress = ctx.datum(self.index).map_or(0.0, |d| d.progress());
        PROGRESS_START_ANGLE + TAU * progress
    }

    /// Current visuals, or `None` when the context has no datum for this ring.
    pub fn frame(&self, ctx: &RingContext) -> Option<RingFrame> {
        ctx.datum(self.index)?;

        let radii = ctx.ring_radii(self.index);
        let color = self
            .props
            .color
            .clone()
            .unwrap_or_else(|| ctx.color(self.index).to_string());
        let hover = ctx.hover_flags(self.index);

        let track_arc = ArcSpec::rounded(
            radii.inner_radius,
            radii.outer_radius,
            TRACK_START_ANGLE,
            TRACK_END_ANGLE,
        );
        let track = ArcLayer {
            arc: track_arc,
            path: track_arc.path(),
            fill: ctx.track_color().to_string(),
            opacity: self.track_opacity.value(),
            scale: self.track_scale.value(),
            glow: None,
        };

        let end_angle = match &self.progress {
            ProgressMode::Animated(anim) => {
                anim.end_angle(PROGRESS_START_ANGLE, self.target_end_angle(ctx))
            }
            ProgressMode::Static { end_angle } => *end_angle,
        };
        let progress_arc = ArcSpec::rounded(
            radii.inner_radius,
            radii.outer_radius,
            PROGRESS_START_ANGLE,
            end_angle,
        );
        let glow = (self.props.show_glow && hover.is_hovered).then(|| Glow {
            color: color.clone(),
            blur_radius: GLOW_BLUR_RADIUS,
        });
        let progress = ArcLayer {
            arc: progress_arc,
            path: progress_arc.path(),
            fill: color,
            opacity: self.progress_opacity.value(),
            scale: self.progress_scale.value(),
            glow,
        };

        Some(RingFrame {
            index: self.index,
            track,
            progress,
            hover,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/ring.rs"]
mod tests;
