//! Text shaping, measurement, and the label auto-fit policy.

/// Parley-backed shaping/measurement engine and the measurement seam.
pub mod engine;
/// Font-size auto-fit for labels.
pub mod fit;
