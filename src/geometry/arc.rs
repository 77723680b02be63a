//! Rounded annular-sector geometry.
//!
//! Arcs are built in chart-local coordinates around the origin, in screen space (x right,
//! y down). An angle of `-π/2` points at 12 o'clock and increasing angles sweep clockwise.
//! Corners are rounded with the tangent-circle construction used by d3-shape's `arc`, which
//! shrinks the corner radius when a short sweep cannot fit two full caps.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use kurbo::{BezPath, Vec2};

/// Where progress arcs begin: 12 o'clock.
pub const PROGRESS_START_ANGLE: f64 = -FRAC_PI_2;
/// Background tracks sweep the full circle from here...
pub const TRACK_START_ANGLE: f64 = 0.0;
/// ...to here.
pub const TRACK_END_ANGLE: f64 = TAU;
/// Sweeps at or below this many radians produce an empty path.
pub const MIN_VISIBLE_SWEEP: f64 = 0.01;

const EPSILON: f64 = 1e-12;
// Max distance between a circular arc and its cubic approximation, in scene units.
const CURVE_TOLERANCE: f64 = 1e-3;

/// The inputs of one arc: radii, angles and the requested corner radius.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ArcSpec {
    /// Inner radius in scene units.
    pub inner_radius: f64,
    /// Outer radius in scene units.
    pub outer_radius: f64,
    /// Start angle in radians.
    pub start_angle: f64,
    /// End angle in radians.
    pub end_angle: f64,
    /// Requested corner radius; may be reduced while drawing so the caps fit.
    pub corner_radius: f64,
}

impl ArcSpec {
    /// Creates an arc spec with an explicit corner radius.
    pub fn new(
        inner_radius: f64,
        outer_radius: f64,
        start_angle: f64,
        end_angle: f64,
        corner_radius: f64,
    ) -> Self {
        Self {
            inner_radius,
            outer_radius,
            start_angle,
            end_angle,
            corner_radius,
        }
    }

    /// Creates an arc spec with fully rounded caps (`corner = thickness / 2`).
    pub fn rounded(inner_radius: f64, outer_radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self::new(
            inner_radius,
            outer_radius,
            start_angle,
            end_angle,
            rounded_corner_radius(inner_radius, outer_radius),
        )
    }

    /// Signed angular extent of the arc.
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Builds the SVG path data for this arc.
    pub fn path(&self) -> ArcPath {
        arc_path(
            self.inner_radius,
            self.outer_radius,
            self.start_angle,
            self.end_angle,
            self.corner_radius,
        )
    }
}

/// Corner radius giving fully rounded caps for a ring of the given radii.
pub fn rounded_corner_radius(inner_radius: f64, outer_radius: f64) -> f64 {
    (outer_radius - inner_radius) / 2.0
}

/// SVG path data (`d` attribute) for an arc. Empty when nothing is visible.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct ArcPath(String);

impl ArcPath {
    /// The empty path.
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Whether the path draws nothing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Path data as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ArcPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Converts an arc description into SVG path data.
///
/// Returns an empty path when `end_angle - start_angle <= 0.01` (including negative and
/// NaN sweeps), or when the outer radius is not positive. Sweeps of a full turn or more
/// render as a complete annulus. Same inputs always give the same string.
pub fn arc_path(
    inner_radius: f64,
    outer_radius: f64,
    start_angle: f64,
    end_angle: f64,
    corner_radius: f64,
) -> ArcPath {
    match arc_bez_path(
        inner_radius,
        outer_radius,
        start_angle,
        end_angle,
        corner_radius,
    ) {
        Some(path) => ArcPath(path.to_svg()),
        None => ArcPath::empty(),
    }
}

/// Same as [`arc_path`] but returns the `kurbo` path, or `None` when nothing is visible.
pub fn arc_bez_path(
    inner_radius: f64,
    outer_radius: f64,
    start_angle: f64,
    end_angle: f64,
    corner_radius: f64,
) -> Option<BezPath> {
    let sweep = end_angle - start_angle;
    if !(sweep > MIN_VISIBLE_SWEEP) {
        return None;
    }

    let (mut r0, mut r1) = (inner_radius, outer_radius);
    if r1 < r0 {
        std::mem::swap(&mut r0, &mut r1);
    }
    if !(r1 > EPSILON) {
        return None;
    }

    let a0 = start_angle;
    let a1 = end_angle;
    let cw = a1 > a0;
    let mut w = PathWriter::default();

    if sweep > TAU - EPSILON {
        // Full annulus: outer and inner circles wound in opposite directions.
        w.move_to(polar(r1, a0));
        w.arc(Vec2::ZERO, r1, a0, a0 + TAU, !cw);
        if r0 > EPSILON {
            w.move_to(polar(r0, a0));
            w.arc(Vec2::ZERO, r0, a0 + TAU, a0, cw);
        }
        w.close();
        return Some(w.finish());
    }

    let rc = ((r1 - r0).abs() / 2.0).min(corner_radius);
    let (mut rc0, mut rc1) = (rc, rc);

    let p01 = polar(r1, a0);
    let p10 = polar(r0, a1);
    let p11 = polar(r1, a1);
    let p00 = polar(r0, a0);

    if rc > EPSILON && sweep < PI {
        // Short sweeps: the caps would overlap, so fit the corner circles into the wedge.
        match intersect(p01, p00, p11, p10) {
            Some(oc) => {
                let a = p01 - oc;
                let b = p11 - oc;
                let cos = (a.dot(b) / (a.hypot() * b.hypot())).clamp(-1.0, 1.0);
                let kc = 1.0 / (cos.acos() / 2.0).sin();
                let lc = oc.hypot();
                rc0 = rc.min((r0 - lc) / (kc - 1.0));
                rc1 = rc.min((r1 - lc) / (kc + 1.0));
            }
            None => {
                rc0 = 0.0;
                rc1 = 0.0;
            }
        }
    }

    if rc1 > EPSILON {
        let t0 = corner_tangents(p00, p01, r1, rc1, cw);
        let t1 = corner_tangents(p11, p10, r1, rc1, cw);
        w.move_to(t0.center + t0.to_edge);
        if rc1 < rc {
            w.arc(t0.center, rc1, t0.to_edge.atan2(), t1.to_edge.atan2(), !cw);
        } else {
            w.arc(t0.center, rc1, t0.to_edge.atan2(), t0.to_rim.atan2(), !cw);
            w.arc(
                Vec2::ZERO,
                r1,
                (t0.center + t0.to_rim).atan2(),
                (t1.center + t1.to_rim).atan2(),
                !cw,
            );
            w.arc(t1.center, rc1, t1.to_rim.atan2(), t1.to_edge.atan2(), !cw);
        }
    } else {
        w.move_to(p01);
        w.arc(Vec2::ZERO, r1, a0, a1, !cw);
    }

    if !(r0 > EPSILON) {
        w.line_to(p10);
    } else if rc0 > EPSILON {
        let t0 = corner_tangents(p10, p11, r0, -rc0, cw);
        let t1 = corner_tangents(p01, p00, r0, -rc0, cw);
        w.line_to(t0.center + t0.to_edge);
        if rc0 < rc {
            w.arc(t0.center, rc0, t0.to_edge.atan2(), t1.to_edge.atan2(), !cw);
        } else {
            w.arc(t0.center, rc0, t0.to_edge.atan2(), t0.to_rim.atan2(), !cw);
            w.arc(
                Vec2::ZERO,
                r0,
                (t0.center + t0.to_rim).atan2(),
                (t1.center + t1.to_rim).atan2(),
                cw,
            );
            w.arc(t1.center, rc0, t1.to_rim.atan2(), t1.to_edge.atan2(), !cw);
        }
    } else {
        w.arc(Vec2::ZERO, r0, a1, a0, cw);
    }

    w.close();
    Some(w.finish())
}

/// Whether `offset` (relative to the ring center) lies on the ring band.
pub fn annulus_contains(offset: Vec2, inner_radius: f64, outer_radius: f64) -> bool {
    let d = offset.hypot();
    d >= inner_radius.min(outer_radius) && d <= inner_radius.max(outer_radius)
}

fn polar(r: f64, angle: f64) -> Vec2 {
    Vec2::new(r * angle.cos(), r * angle.sin())
}

fn intersect(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Option<Vec2> {
    let d10 = p1 - p0;
    let d32 = p3 - p2;
    let denom = d32.y * d10.x - d32.x * d10.y;
    if denom * denom < EPSILON {
        return None;
    }
    let t = (d32.x * (p0.y - p2.y) - d32.y * (p0.x - p2.x)) / denom;
    Some(p0 + d10 * t)
}

struct CornerTangent {
    center: Vec2,
    // From the corner center to the tangent point on the radial edge.
    to_edge: Vec2,
    // From the corner center to the tangent point on the rim circle.
    to_rim: Vec2,
}

fn corner_tangents(p0: Vec2, p1: Vec2, r1: f64, rc: f64, cw: bool) -> CornerTangent {
    let d01 = p0 - p1;
    let lo = (if cw { rc } else { -rc }) / d01.hypot();
    let offset = Vec2::new(lo * d01.y, -lo * d01.x);
    let q11 = p0 + offset;
    let q10 = p1 + offset;
    let mid = (q11 + q10) / 2.0;
    let d = q10 - q11;
    let d2 = d.hypot2();
    let r = r1 - rc;
    let cross = q11.x * q10.y - q10.x * q11.y;
    let disc = (if d.y < 0.0 { -1.0 } else { 1.0 }) * (r * r * d2 - cross * cross).max(0.0).sqrt();
    let c0 = Vec2::new(
        (cross * d.y - d.x * disc) / d2,
        (-cross * d.x - d.y * disc) / d2,
    );
    let c1 = Vec2::new(
        (cross * d.y + d.x * disc) / d2,
        (-cross * d.x + d.y * disc) / d2,
    );
    let center = if (c0 - mid).hypot2() > (c1 - mid).hypot2() {
        c1
    } else {
        c0
    };
    CornerTangent {
        center,
        to_edge: -offset,
        to_rim: center * (r1 / r - 1.0),
    }
}

/// Minimal pen over `BezPath` with canvas-style `arc` semantics: the arc starts with a
/// line from the current point, and `ccw` selects a decreasing-angle sweep.
#[derive(Default)]
struct PathWriter {
    path: BezPath,
    current: Option<Vec2>,
}

impl PathWriter {
    fn move_to(&mut self, p: Vec2) {
        self.path.move_to(p.to_point());
        self.current = Some(p);
    }

    fn line_to(&mut self, p: Vec2) {
        if self.current.is_none() {
            self.move_to(p);
            return;
        }
        self.path.line_to(p.to_point());
        self.current = Some(p);
    }

    fn arc(&mut self, center: Vec2, r: f64, a0: f64, a1: f64, ccw: bool) {
        let start = center + polar(r, a0);
        match self.current {
            None => self.move_to(start),
            Some(cur) if (cur - start).hypot2() > EPSILON => self.line_to(start),
            Some(_) => {}
        }
        if r <= 0.0 {
            return;
        }

        let mut da = if ccw { a0 - a1 } else { a1 - a0 };
        if da < 0.0 {
            da = da % TAU + TAU;
        }
        let extent = if da > TAU - EPSILON {
            TAU
        } else if da > EPSILON {
            da
        } else {
            return;
        };
        let sweep = if ccw { -extent } else { extent };

        let arc = kurbo::Arc::new(
            center.to_point(),
            Vec2::new(r, r),
            a0,
            sweep,
            0.0,
        );
        self.path.extend(arc.append_iter(CURVE_TOLERANCE));
        self.current = Some(center + polar(r, a0 + sweep));
    }

    fn close(&mut self) {
        self.path.close_path();
    }

    fn finish(self) -> BezPath {
        self.path
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/arc.rs"]
mod tests;
