//! Fixed-format raster surfaces and the compositing writes the renderer performs on them.

pub(crate) mod composite;
pub(crate) mod surface;
