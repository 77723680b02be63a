//! JSON chart descriptions.

use crate::animation::ease::Ease;
use crate::chart::context::RingContext;
use crate::chart::model::{Palette, RingLayout, RingOrder, RingProps, RingSeries};
use crate::chart::mount::RingChart;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{RingError, RingResult};

/// A complete chart: canvas, data, ring layout and display options.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChartSpec {
    /// Output size; the chart is centered on it.
    pub canvas: Canvas,
    /// Playback frame rate, 60 by default.
    #[serde(default = "default_fps")]
    pub fps: Fps,
    /// One ring per datum.
    pub data: RingSeries,
    /// Ring radii.
    pub layout: RingLayout,
    /// Fallback series colors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub palette: Option<Vec<String>>,
    /// Background-track fill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_color: Option<String>,
    /// Chart-wide entrance animation switch.
    #[serde(default = "default_true")]
    pub animate: bool,
    /// Chart-wide hover glow switch.
    #[serde(default = "default_true")]
    pub show_glow: bool,
    /// Chart-wide hover transition curve.
    #[serde(default)]
    pub hover_ease: Ease,
    /// Per-ring overrides, matched by index. Missing entries use the chart-wide options.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rings: Vec<RingOverride>,
}

/// Per-ring replacements for the chart-wide options.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RingOverride {
    /// Explicit ring color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Entrance animation switch for this ring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animate: Option<bool>,
    /// Hover glow switch for this ring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_glow: Option<bool>,
    /// Hover transition curve for this ring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover_ease: Option<Ease>,
}

fn default_true() -> bool {
    true
}

fn default_fps() -> Fps {
    Fps { num: 60, den: 1 }
}

impl ChartSpec {
    /// Parses and validates a JSON chart description.
    pub fn from_json_str(s: &str) -> RingResult<Self> {
        let spec: Self = serde_json::from_str(s)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Checks canvas and layout. Data values are not checked: a zero `max_value` or a value
    /// past its maximum is drawn as-is.
    pub fn validate(&self) -> RingResult<()> {
        self.canvas.validate()?;
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(RingError::validation("fps must have num>0 and den>0"));
        }

        let layout = &self.layout;
        for (name, value) in [
            ("base_radius", layout.base_radius),
            ("ring_width", layout.ring_width),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(RingError::validation(format!(
                    "layout.{name} must be finite and > 0"
                )));
            }
        }
        if !layout.ring_gap.is_finite() || layout.ring_gap < 0.0 {
            return Err(RingError::validation(
                "layout.ring_gap must be finite and >= 0",
            ));
        }
        if layout.order == RingOrder::OutsideIn && !self.data.is_empty() {
            let last = (self.data.len() - 1) as f64;
            let innermost = layout.base_radius - last * (layout.ring_width + layout.ring_gap);
            if innermost - layout.ring_width < 0.0 {
                return Err(RingError::validation(format!(
                    "layout.base_radius {} is too small for {} rings",
                    layout.base_radius,
                    self.data.len()
                )));
            }
        }

        if let Some(palette) = &self.palette {
            if palette.iter().any(|c| c.trim().is_empty()) {
                return Err(RingError::validation("palette colors must be non-empty"));
            }
        }
        if self.rings.len() > self.data.len() {
            tracing::debug!(
                overrides = self.rings.len(),
                data = self.data.len(),
                "extra ring overrides are ignored"
            );
        }
        Ok(())
    }

    /// Display options for ring `index`, after applying its override.
    pub fn ring_props(&self, index: usize) -> RingProps {
        let ov = self.rings.get(index).cloned().unwrap_or_default();
        RingProps {
            color: ov.color,
            animate: ov.animate.unwrap_or(self.animate),
            show_glow: ov.show_glow.unwrap_or(self.show_glow),
            hover_ease: ov.hover_ease.unwrap_or(self.hover_ease),
        }
    }

    /// A fresh context holding this chart's data, layout and colors.
    pub fn context(&self) -> RingContext {
        let mut ctx = RingContext::new(self.data.clone(), self.layout);
        if let Some(colors) = &self.palette {
            ctx = ctx.with_palette(Palette::new(colors.clone()));
        }
        if let Some(track) = &self.track_color {
            ctx = ctx.with_track_color(track.clone());
        }
        ctx
    }

    /// Mounts the chart: every animation starts from the beginning.
    pub fn mount(&self) -> RingChart {
        let props = (0..self.data.len()).map(|i| self.ring_props(i)).collect();
        RingChart::mount_with_props(self.context(), props)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/chart_spec.rs"]
mod tests;
