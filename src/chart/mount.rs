//! A mounted chart: one [`RingContext`] plus one [`RingRenderer`] per ring.
//!
//! The host owns the frame loop and calls [`RingChart::tick`] once per frame, then reads
//! [`RingChart::frame`]. Everything runs on the caller's thread; hover writes, epoch bumps
//! and ticks are applied in the order they are called.

use kurbo::Vec2;

use crate::chart::context::{RingContext, SubscriptionId};
use crate::chart::model::{RingProps, RingSeries};
use crate::chart::ring::{RingFrame, RingRenderer};

/// Scene for one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ChartFrame {
    /// Seconds since mount.
    pub time: f64,
    /// Animation epoch the frame was produced in.
    pub epoch: u64,
    /// Hovered ring, if any.
    pub hovered_index: Option<usize>,
    /// Rings with something to draw, in index order.
    pub rings: Vec<RingFrame>,
}

/// A mounted chart, driven by the host frame loop.
#[derive(Debug)]
pub struct RingChart {
    ctx: RingContext,
    rings: Vec<RingRenderer>,
    elapsed: f64,
    mounted: bool,
}

impl RingChart {
    /// Mounts one ring per datum, all sharing `props`.
    pub fn mount(ctx: RingContext, props: RingProps) -> Self {
        let props = vec![props; ctx.len()];
        Self::mount_with_props(ctx, props)
    }

    /// Mounts one ring per entry of `props`; ring `i` draws datum `i`. Entries past the end
    /// of the data render nothing.
    #[tracing::instrument(skip_all, fields(rings = props.len(), data = ctx.len()))]
    pub fn mount_with_props(ctx: RingContext, props: Vec<RingProps>) -> Self {
        let mut rings: Vec<RingRenderer> = props
            .into_iter()
            .enumerate()
            .map(|(index, p)| RingRenderer::new(index, p))
            .collect();
        for ring in &mut rings {
            ring.mount(&ctx);
        }
        Self {
            ctx,
            rings,
            elapsed: 0.0,
            mounted: true,
        }
    }

    /// Shared state of this chart.
    pub fn context(&self) -> &RingContext {
        &self.ctx
    }

    /// Every mounted ring, including ones without data.
    pub fn rings(&self) -> &[RingRenderer] {
        &self.rings
    }

    /// Ring `index`, if mounted.
    pub fn ring(&self, index: usize) -> Option<&RingRenderer> {
        self.rings.get(index)
    }

    /// Seconds of animation time since mount.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// `false` after [`RingChart::unmount`].
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Writes the hover state; every ring re-derives its emphasis in the same call.
    pub fn set_hovered_index(&mut self, index: Option<usize>) -> bool {
        if !self.ctx.set_hovered_index(index) {
            return false;
        }
        self.broadcast_hover();
        true
    }

    /// Routes a pointer position (relative to the chart center) to ring enter/leave
    /// handlers. The first ring whose band contains the point wins.
    pub fn pointer_move(&mut self, offset: Vec2) -> Option<usize> {
        let hit = self
            .rings
            .iter()
            .find(|r| r.hit_test(&self.ctx, offset))
            .map(RingRenderer::index);
        let current = self.ctx.hovered_index();
        if hit == current {
            return hit;
        }

        let mut changed = false;
        if let Some(prev) = current.and_then(|i| self.rings.get(i)) {
            changed |= prev.pointer_leave(&mut self.ctx);
        }
        if let Some(next) = hit.and_then(|i| self.rings.get(i)) {
            changed |= next.pointer_enter(&mut self.ctx);
        }
        if changed {
            self.broadcast_hover();
        }
        hit
    }

    /// The pointer left the chart entirely.
    pub fn pointer_exit(&mut self) {
        self.set_hovered_index(None);
    }

    fn broadcast_hover(&mut self) {
        for ring in &mut self.rings {
            ring.on_hover_changed(&self.ctx);
        }
    }

    /// Registers a hover listener on the shared context.
    pub fn subscribe(&mut self, listener: impl FnMut(Option<usize>) + 'static) -> SubscriptionId {
        self.ctx.subscribe(listener)
    }

    /// Removes a hover listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.ctx.unsubscribe(id)
    }

    /// Restarts every ring's entrance sequence.
    #[tracing::instrument(skip(self), fields(epoch = self.ctx.epoch()))]
    pub fn bump_epoch(&mut self) -> u64 {
        let epoch = self.ctx.bump_epoch();
        self.sync_rings();
        epoch
    }

    /// Swaps the data series and restarts the entrance sequence.
    pub fn replace_data(&mut self, data: RingSeries) -> u64 {
        let epoch = self.ctx.replace_data(data);
        self.sync_rings();
        epoch
    }

    fn sync_rings(&mut self) {
        if !self.mounted {
            return;
        }
        for ring in &mut self.rings {
            ring.sync_epoch(&self.ctx);
        }
    }

    /// Advances the chart by `dt` seconds. Returns whether anything is still moving.
    pub fn tick(&mut self, dt: f64) -> bool {
        if !self.mounted {
            return false;
        }
        let dt = dt.max(0.0);
        self.elapsed += dt;
        let mut busy = false;
        for ring in &mut self.rings {
            busy |= ring.tick(dt);
        }
        busy
    }

    /// Whether any ring still needs ticks.
    pub fn is_animating(&self) -> bool {
        self.mounted && self.rings.iter().any(RingRenderer::is_animating)
    }

    /// Cancels all pending timers and stops all springs. Later ticks do nothing.
    #[tracing::instrument(skip(self))]
    pub fn unmount(&mut self) {
        for ring in &mut self.rings {
            ring.unmount();
        }
        self.mounted = false;
    }

    /// Current scene.
    pub fn frame(&self) -> ChartFrame {
        ChartFrame {
            time: self.elapsed,
            epoch: self.ctx.epoch(),
            hovered_index: self.ctx.hovered_index(),
            rings: self
                .rings
                .iter()
                .filter_map(|r| r.frame(&self.ctx))
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/mount.rs"]
mod tests;
