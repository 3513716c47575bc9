//! The button widget: configuration, background visuals, and the composite
//! node itself.

/// Background visual variants.
pub mod background;
/// Button configuration, builder, and the composite node.
pub mod button;
