pub(crate) mod ease;
pub(crate) mod spring;
pub(crate) mod timer;
pub(crate) mod tween;
