pub(crate) mod playback;
pub(crate) mod raster;
pub(crate) mod svg;
