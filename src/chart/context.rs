//! Shared per-chart state.
//!
//! One [`RingContext`] exists per mounted chart. It owns the hover state and animation
//! epoch, and resolves colors and radii for ring renderers, which receive it by reference.
//! Hover writes go through [`RingContext::set_hovered_index`], which notifies every
//! subscriber synchronously before returning.

use std::fmt;

use crate::chart::model::{Palette, RadiusPair, RadiusResolver, RingDatum, RingSeries};

/// Default background-track fill, used when the theme does not provide one.
pub const DEFAULT_TRACK_COLOR: &str = "#27272a";

/// Handle returned by [`RingContext::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type HoverListener = Box<dyn FnMut(Option<usize>)>;

/// Hover-derived emphasis for one ring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct HoverFlags {
    /// The pointer is over this ring.
    pub is_hovered: bool,
    /// Some other ring is hovered.
    pub is_faded: bool,
}

impl HoverFlags {
    /// Flags for ring `index` given the chart-wide hover state.
    pub fn for_ring(hovered: Option<usize>, index: usize) -> Self {
        Self {
            is_hovered: hovered == Some(index),
            is_faded: hovered.is_some_and(|h| h != index),
        }
    }
}

/// Shared state of one chart mount: data, hover, epoch, colors and radii.
pub struct RingContext {
    data: RingSeries,
    hovered: Option<usize>,
    epoch: u64,
    palette: Palette,
    track_color: String,
    radii: Box<dyn RadiusResolver>,
    listeners: Vec<(SubscriptionId, HoverListener)>,
    next_subscription: u64,
}

impl RingContext {
    /// Creates the state for a fresh mount: nothing hovered, epoch 0.
    pub fn new(data: RingSeries, radii: impl RadiusResolver + 'static) -> Self {
        Self {
            data,
            hovered: None,
            epoch: 0,
            palette: Palette::default(),
            track_color: DEFAULT_TRACK_COLOR.to_string(),
            radii: Box::new(radii),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Replaces the fallback palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Replaces the background-track fill.
    pub fn with_track_color(mut self, color: impl Into<String>) -> Self {
        self.track_color = color.into();
        self
    }

    /// The whole series, in nesting order.
    pub fn data(&self) -> &[RingDatum] {
        &self.data
    }

    /// The datum behind ring `index`, or `None` when the ring has nothing to draw.
    pub fn datum(&self, index: usize) -> Option<&RingDatum> {
        self.data.get(index)
    }

    /// Number of data points.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The datum's own color if it has one, otherwise the palette entry for `index`.
    pub fn color(&self, index: usize) -> &str {
        self.datum(index)
            .and_then(|d| d.color.as_deref())
            .unwrap_or_else(|| self.palette.color(index))
    }

    /// Radii of ring `index`, straight from the resolver.
    pub fn ring_radii(&self, index: usize) -> RadiusPair {
        self.radii.radii(index)
    }

    /// Background-track fill.
    pub fn track_color(&self) -> &str {
        &self.track_color
    }

    /// Currently hovered ring, if any.
    pub fn hovered_index(&self) -> Option<usize> {
        self.hovered
    }

    /// Hover emphasis for ring `index`.
    pub fn hover_flags(&self, index: usize) -> HoverFlags {
        HoverFlags::for_ring(self.hovered, index)
    }

    /// Writes the hover state and notifies subscribers. Returns whether it changed;
    /// subscribers are only called on change.
    pub fn set_hovered_index(&mut self, index: Option<usize>) -> bool {
        if self.hovered == index {
            return false;
        }
        tracing::debug!(from = ?self.hovered, to = ?index, "hover changed");
        self.hovered = index;
        for (_, listener) in &mut self.listeners {
            listener(index);
        }
        true
    }

    /// Registers a hover listener.
    pub fn subscribe(&mut self, listener: impl FnMut(Option<usize>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a hover listener. Unknown ids are ignored.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Current animation epoch; starts at 0.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Asks every ring to replay its entrance from scratch.
    pub fn bump_epoch(&mut self) -> u64 {
        self.epoch += 1;
        tracing::debug!(epoch = self.epoch, "animation epoch bumped");
        self.epoch
    }

    /// Swaps in a new series. New data identity restarts the entrance sequence.
    pub fn replace_data(&mut self, data: RingSeries) -> u64 {
        self.data = data;
        self.bump_epoch()
    }
}

impl fmt::Debug for RingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingContext")
            .field("data", &self.data)
            .field("hovered", &self.hovered)
            .field("epoch", &self.epoch)
            .field("palette", &self.palette)
            .field("track_color", &self.track_color)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/context.rs"]
mod tests;
