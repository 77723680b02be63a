//! SVG scene output.
//!
//! The chart is drawn in a group translated to the canvas center. Each ring contributes
//! its track then its progress arc, so later (inner) rings paint over earlier ones.
//! Scale transforms apply around the chart center, and glows become `feDropShadow`
//! filters keyed by ring index.

use crate::chart::mount::ChartFrame;
use crate::chart::ring::{ArcLayer, Glow};
use crate::foundation::core::Canvas;

/// Serializes `frame` as a standalone SVG document sized to `canvas`.
pub fn svg_document(frame: &ChartFrame, canvas: Canvas, background: Option<&str>) -> String {
    let center = canvas.center();
    let mut out = String::new();
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
        w = canvas.width,
        h = canvas.height
    ));

    let glows: Vec<(usize, &Glow)> = frame
        .rings
        .iter()
        .filter_map(|r| r.progress.glow.as_ref().map(|g| (r.index, g)))
        .collect();
    if !glows.is_empty() {
        out.push_str("<defs>\n");
        for (index, glow) in glows {
            out.push_str(&format!(
                "<filter id=\"{id}\" x=\"-50%\" y=\"-50%\" width=\"200%\" height=\"200%\">\
                 <feDropShadow dx=\"0\" dy=\"0\" stdDeviation=\"{sd}\" flood-color=\"{c}\"/></filter>\n",
                id = glow_id(index),
                sd = num(glow.blur_radius / 2.0),
                c = escape_attr(&glow.color)
            ));
        }
        out.push_str("</defs>\n");
    }

    if let Some(bg) = background {
        out.push_str(&format!(
            "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>\n",
            escape_attr(bg)
        ));
    }

    out.push_str(&format!(
        "<g transform=\"translate({} {})\">\n",
        num(center.x),
        num(center.y)
    ));
    for ring in &frame.rings {
        out.push_str(&format!("<g data-ring=\"{}\">\n", ring.index));
        push_layer(&mut out, &ring.track, None);
        let filter = ring.progress.glow.as_ref().map(|_| glow_id(ring.index));
        push_layer(&mut out, &ring.progress, filter.as_deref());
        out.push_str("</g>\n");
    }
    out.push_str("</g>\n</svg>\n");
    out
}

fn push_layer(out: &mut String, layer: &ArcLayer, filter: Option<&str>) {
    // Nothing visible; also keeps singular `scale(0)` transforms out of the document.
    if layer.path.is_empty() || !(layer.scale > 0.0) || !(layer.opacity > 0.0) {
        return;
    }
    out.push_str(&format!(
        "<path d=\"{}\" fill=\"{}\"",
        layer.path.as_str(),
        escape_attr(&layer.fill)
    ));
    if layer.opacity < 1.0 {
        out.push_str(&format!(" opacity=\"{}\"", num(layer.opacity)));
    }
    if layer.scale != 1.0 {
        out.push_str(&format!(" transform=\"scale({})\"", num(layer.scale)));
    }
    if let Some(id) = filter {
        out.push_str(&format!(" filter=\"url(#{id})\""));
    }
    out.push_str("/>\n");
}

fn glow_id(index: usize) -> String {
    format!("ring-glow-{index}")
}

/// Fixed-precision number without trailing zeros.
fn num(v: f64) -> String {
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
