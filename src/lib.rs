//! ringmotion draws multi-ring radial progress charts and animates their entrance.
//!
//! Each datum becomes one annular ring: a full-circle background track plus a progress arc
//! that sweeps clockwise from 12 o'clock. Mounting a chart plays a two-phase entrance:
//!
//! 1. **Tracks** scale in from zero, staggered by ring index.
//! 2. **Progress arcs** wait for a per-ring delay, then sweep to their value under a
//!    damped spring.
//!
//! Hovering one ring fades the others and lifts the hovered arc with an optional glow.
//!
//! # Model
//!
//! - [`RingContext`] holds the data, radius layout, colors, hover state and the animation
//!   epoch shared by every ring of one chart.
//! - [`RingChart`] is the mounted chart: one [`RingRenderer`] per ring, driven by the host
//!   through [`RingChart::tick`] and read back as a [`ChartFrame`].
//! - [`arc_path`] is the pure geometry underneath: radii and angles in, SVG path data out.
//!
//! Everything is single-threaded and frame-driven; time only moves inside `tick`.
//!
//! # Output
//!
//! [`svg_document`] serializes a frame, [`rasterize_svg`] turns it into pixels, and the
//! playback helpers ([`render_frame_at`], [`render_sequence`]) drive a chart described by a
//! [`ChartSpec`] at a fixed frame rate.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod animation;
mod chart;
mod config;
mod foundation;
mod geometry;
mod render;

pub use animation::ease::Ease;
pub use animation::spring::{Spring, SpringConfig};
pub use animation::timer::{Timeout, TimeoutState};
pub use animation::tween::Tween;
pub use chart::context::{DEFAULT_TRACK_COLOR, HoverFlags, RingContext, SubscriptionId};
pub use chart::model::{
    Palette, RadiusPair, RadiusResolver, RingDatum, RingLayout, RingOrder, RingProps,
    RingSeries,
};
pub use chart::mount::{ChartFrame, RingChart};
pub use chart::progress::{
    PROGRESS_BASE_DELAY, PROGRESS_STAGGER, ProgressAnimator, ProgressPhase, progress_delay,
};
pub use chart::ring::{
    ArcLayer, FADED_PROGRESS_OPACITY, FADED_TRACK_OPACITY, GLOW_BLUR_RADIUS, Glow,
    HOVER_TRANSITION_SECS, HOVERED_PROGRESS_SCALE, ProgressMode, RingFrame, RingRenderer,
    TRACK_EXPAND_STAGGER, track_expand_delay,
};
pub use config::chart_spec::{ChartSpec, RingOverride};
pub use foundation::core::{BezPath, Canvas, Fps, Point, Vec2};
pub use foundation::error::{RingError, RingResult};
pub use geometry::arc::{
    ArcPath, ArcSpec, MIN_VISIBLE_SWEEP, PROGRESS_START_ANGLE, TRACK_END_ANGLE,
    TRACK_START_ANGLE, annulus_contains, arc_bez_path, arc_path, rounded_corner_radius,
};
pub use render::playback::{
    DirSink, FrameSink, ImageFormat, InMemorySink, PlaybackOpts, RenderedFrame, SinkConfig,
    advance, render_frame_at, render_sequence, render_svg_at,
};
pub use render::raster::{RasterFrame, rasterize_svg, write_png};
pub use render::svg::svg_document;
