pub(crate) mod context;
pub(crate) mod model;
pub(crate) mod mount;
pub(crate) mod progress;
pub(crate) mod ring;
