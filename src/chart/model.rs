use crate::animation::ease::Ease;

/// One data series: how far `value` has come toward `max_value`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RingDatum {
    /// Amount reached.
    pub value: f64,
    /// Amount that fills the ring.
    pub max_value: f64, // expected > 0, not enforced
    /// Series color, overriding the palette.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl RingDatum {
    /// A datum without its own color.
    pub fn new(value: f64, max_value: f64) -> Self {
        Self {
            value,
            max_value,
            color: None,
        }
    }

    /// Sets the series color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// `value / max_value`, unclamped. Values past 1 over-sweep; `max_value == 0` gives a
    /// non-finite result that geometry renders as nothing or a full ring.
    pub fn progress(&self) -> f64 {
        self.value / self.max_value
    }
}

/// Ring data in nesting order.
pub type RingSeries = Vec<RingDatum>;

/// Radial extent of one ring.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RadiusPair {
    /// Radius of the inner edge.
    pub inner_radius: f64,
    /// Radius of the outer edge.
    pub outer_radius: f64,
}

impl RadiusPair {
    /// A pair from explicit radii.
    pub fn new(inner_radius: f64, outer_radius: f64) -> Self {
        Self {
            inner_radius,
            outer_radius,
        }
    }

    /// `outer_radius - inner_radius`.
    pub fn thickness(self) -> f64 {
        self.outer_radius - self.inner_radius
    }
}

/// Maps a ring index to its radii.
pub trait RadiusResolver {
    /// Radii of ring `index`.
    fn radii(&self, index: usize) -> RadiusPair;
}

impl<F> RadiusResolver for F
where
    F: Fn(usize) -> RadiusPair,
{
    fn radii(&self, index: usize) -> RadiusPair {
        self(index)
    }
}

/// Which end of the series sits on the outside.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RingOrder {
    /// Index 0 is the outermost ring; `base_radius` is its outer edge.
    #[default]
    OutsideIn,
    /// Index 0 is the innermost ring; `base_radius` is its inner edge.
    InsideOut,
}

/// Evenly spaced rings of equal width.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RingLayout {
    /// Anchor radius; see [`RingOrder`] for which edge it marks.
    pub base_radius: f64,
    /// Radial thickness of every ring.
    pub ring_width: f64,
    /// Empty space between neighbouring rings.
    #[serde(default)]
    pub ring_gap: f64,
    /// Which end of the series sits on the outside.
    #[serde(default)]
    pub order: RingOrder,
}

impl RingLayout {
    /// A layout from explicit metrics.
    pub fn new(base_radius: f64, ring_width: f64, ring_gap: f64, order: RingOrder) -> Self {
        Self {
            base_radius,
            ring_width,
            ring_gap,
            order,
        }
    }

    fn pitch(&self) -> f64 {
        self.ring_width + self.ring_gap
    }

    /// Outer radius of the whole chart when it holds `count` rings.
    pub fn extent(&self, count: usize) -> f64 {
        match self.order {
            RingOrder::OutsideIn => self.base_radius,
            RingOrder::InsideOut => {
                let last = count.saturating_sub(1) as f64;
                self.base_radius + last * self.pitch() + self.ring_width
            }
        }
    }
}

impl RadiusResolver for RingLayout {
    fn radii(&self, index: usize) -> RadiusPair {
        let step = index as f64 * self.pitch();
        match self.order {
            RingOrder::OutsideIn => {
                let outer = self.base_radius - step;
                RadiusPair::new(outer - self.ring_width, outer)
            }
            RingOrder::InsideOut => {
                let inner = self.base_radius + step;
                RadiusPair::new(inner, inner + self.ring_width)
            }
        }
    }
}

/// Fallback series colors, cycled by ring index.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Palette(Vec<String>);

impl Palette {
    /// Blue, emerald, amber, red, violet.
    pub const DEFAULT_COLORS: [&'static str; 5] =
        ["#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6"];

    /// A palette cycling through `colors`.
    pub fn new(colors: Vec<String>) -> Self {
        Self(colors)
    }

    /// Color for `index`, wrapping around. An empty palette falls back to the defaults.
    pub fn color(&self, index: usize) -> &str {
        if self.0.is_empty() {
            return Self::DEFAULT_COLORS[index % Self::DEFAULT_COLORS.len()];
        }
        &self.0[index % self.0.len()]
    }

    /// Number of configured colors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no colors are configured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self(Self::DEFAULT_COLORS.iter().map(|c| c.to_string()).collect())
    }
}

/// Per-ring display options.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RingProps {
    /// Overrides both the datum color and the palette.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Play the entrance; when off, rings appear at their final state.
    #[serde(default = "default_true")]
    pub animate: bool,
    /// Draw a glow behind the hovered progress arc.
    #[serde(default = "default_true")]
    pub show_glow: bool,
    /// Curve of the hover fade and scale transitions.
    #[serde(default)]
    pub hover_ease: Ease,
}

fn default_true() -> bool {
    true
}

impl Default for RingProps {
    fn default() -> Self {
        Self {
            color: None,
            animate: true,
            show_glow: true,
            hover_ease: Ease::DEFAULT_TWEEN,
        }
    }
}

impl RingProps {
    /// Sets the explicit ring color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Turns the entrance animation on or off.
    pub fn with_animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    /// Turns the hover glow on or off.
    pub fn with_glow(mut self, show_glow: bool) -> Self {
        self.show_glow = show_glow;
        self
    }

    /// Sets the hover transition curve.
    pub fn with_hover_ease(mut self, ease: Ease) -> Self {
        self.hover_ease = ease;
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/model.rs"]
mod tests;
