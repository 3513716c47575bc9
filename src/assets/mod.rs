//! Asset loading for background textures.

/// Image decoding to premultiplied RGBA8.
pub mod texture;
