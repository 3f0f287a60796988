//! Genome rasterization: a self-contained scanline filler plus the per-genome paint loop.

pub(crate) mod raster;
pub(crate) mod renderer;
