//! Rasterization of a stage into RGBA frames.

/// CPU rasterizer backed by `vello_cpu`.
pub mod cpu;
