//! Fixed-rate playback: drives a freshly mounted chart to a point in time and renders
//! single frames or whole sequences.

use std::path::PathBuf;

use anyhow::Context;

use crate::chart::mount::{ChartFrame, RingChart};
use crate::config::chart_spec::ChartSpec;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{RingError, RingResult};
use crate::render::raster::{rasterize_svg, write_png};
use crate::render::svg::svg_document;

/// Options shared by every playback entry point.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackOpts {
    /// Overrides the chart's own frame rate.
    pub fps: Option<Fps>,
    /// Ring hovered from the first frame on.
    pub hover: Option<usize>,
    /// Canvas fill behind the chart; transparent when `None`.
    pub background: Option<String>,
}

impl Default for PlaybackOpts {
    fn default() -> Self {
        Self {
            fps: None,
            hover: None,
            background: Some("#09090b".to_string()),
        }
    }
}

/// One rendered frame in both scene and SVG form.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedFrame {
    /// Frame number, from 0.
    pub index: u64,
    /// Scene.
    pub chart: ChartFrame,
    /// Scene as an SVG document.
    pub svg: String,
}

/// Configuration given to a [`FrameSink`] before the first frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SinkConfig {
    /// Size of every frame.
    pub canvas: Canvas,
    /// Frame rate of the sequence.
    pub fps: Fps,
    /// Number of frames that will be pushed.
    pub frame_count: u64,
}

/// Consumer of rendered frames. `push_frame` is called in strictly increasing index order.
pub trait FrameSink {
    /// Called once before the first frame.
    fn begin(&mut self, cfg: SinkConfig) -> RingResult<()>;
    /// Consumes one frame.
    fn push_frame(&mut self, frame: &RenderedFrame) -> RingResult<()>;
    /// Called once after the last frame.
    fn end(&mut self) -> RingResult<()>;
}

/// Keeps every frame in memory.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    /// Frames in order.
    pub frames: Vec<RenderedFrame>,
}

impl InMemorySink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration from the last `begin`.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> RingResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, frame: &RenderedFrame) -> RingResult<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn end(&mut self) -> RingResult<()> {
        Ok(())
    }
}

/// File format written by [`DirSink`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    /// Vector frames, written as-is.
    Svg,
    /// Rasterized frames.
    Png,
}

impl ImageFormat {
    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

/// Writes `frame_00000.<ext>`, `frame_00001.<ext>`, ... into a directory.
#[derive(Debug)]
pub struct DirSink {
    dir: PathBuf,
    format: ImageFormat,
    canvas: Option<Canvas>,
    written: Vec<PathBuf>,
}

impl DirSink {
    /// A sink writing into `dir`, created on `begin`.
    pub fn new(dir: impl Into<PathBuf>, format: ImageFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
            canvas: None,
            written: Vec::new(),
        }
    }

    /// Files written so far, in frame order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for DirSink {
    fn begin(&mut self, cfg: SinkConfig) -> RingResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;
        self.canvas = Some(cfg.canvas);
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, frame: &RenderedFrame) -> RingResult<()> {
        let canvas = self
            .canvas
            .ok_or_else(|| RingError::render("DirSink::push_frame called before begin"))?;
        let path = self.dir.join(format!(
            "frame_{:05}.{}",
            frame.index,
            self.format.extension()
        ));
        match self.format {
            ImageFormat::Svg => std::fs::write(&path, &frame.svg)
                .with_context(|| format!("write svg '{}'", path.display()))?,
            ImageFormat::Png => write_png(&path, &rasterize_svg(&frame.svg, canvas)?)?,
        }
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> RingResult<()> {
        tracing::debug!(frames = self.written.len(), dir = %self.dir.display(), "sink finished");
        Ok(())
    }
}

fn check_time(secs: f64, what: &str) -> RingResult<()> {
    if !secs.is_finite() || secs < 0.0 {
        return Err(RingError::animation(format!(
            "{what} must be finite and >= 0, got {secs}"
        )));
    }
    Ok(())
}

fn mount_for_playback(spec: &ChartSpec, opts: &PlaybackOpts) -> RingChart {
    let mut chart = spec.mount();
    if opts.hover.is_some() {
        chart.set_hovered_index(opts.hover);
    }
    chart
}

/// Advances `chart` by `secs` in steps no longer than one frame.
pub fn advance(chart: &mut RingChart, fps: Fps, secs: f64) {
    let steps = fps.secs_to_frames_ceil(secs);
    if steps == 0 {
        return;
    }
    let dt = secs / steps as f64;
    for _ in 0..steps {
        chart.tick(dt);
    }
}

/// Mounts `spec` and plays it forward to `t` seconds.
#[tracing::instrument(skip(spec, opts), fields(rings = spec.data.len()))]
pub fn render_frame_at(spec: &ChartSpec, t: f64, opts: &PlaybackOpts) -> RingResult<ChartFrame> {
    check_time(t, "frame time")?;
    let fps = opts.fps.unwrap_or(spec.fps);
    let mut chart = mount_for_playback(spec, opts);
    advance(&mut chart, fps, t);
    Ok(chart.frame())
}

/// Like [`render_frame_at`], serialized as an SVG document.
pub fn render_svg_at(spec: &ChartSpec, t: f64, opts: &PlaybackOpts) -> RingResult<String> {
    let frame = render_frame_at(spec, t, opts)?;
    Ok(svg_document(&frame, spec.canvas, opts.background.as_deref()))
}

/// Renders frames `0..=ceil(duration * fps)` into `sink`. Returns the number of frames.
#[tracing::instrument(skip(spec, opts, sink), fields(rings = spec.data.len()))]
pub fn render_sequence(
    spec: &ChartSpec,
    duration: f64,
    opts: &PlaybackOpts,
    sink: &mut dyn FrameSink,
) -> RingResult<u64> {
    check_time(duration, "duration")?;
    let fps = opts.fps.unwrap_or(spec.fps);
    let last = fps.secs_to_frames_ceil(duration);
    let frame_count = last + 1;

    sink.begin(SinkConfig {
        canvas: spec.canvas,
        fps,
        frame_count,
    })?;
    let mut chart = mount_for_playback(spec, opts);
    let dt = fps.frame_duration_secs();
    for index in 0..frame_count {
        if index > 0 {
            chart.tick(dt);
        }
        let frame = chart.frame();
        let svg = svg_document(&frame, spec.canvas, opts.background.as_deref());
        sink.push_frame(&RenderedFrame {
            index,
            chart: frame,
            svg,
        })?;
    }
    sink.end()?;
    Ok(frame_count)
}

#[cfg(test)]
#[path = "../../tests/unit/render/playback.rs"]
mod tests;
