use crate::assets::texture::Texture;
use crate::foundation::core::Rgba8;

/// Corner radius of the stock vector background.
pub const CORNER_RADIUS: f64 = 12.0;

/// Fill of the stock vector background (#007BFF).
pub const DEFAULT_FILL: Rgba8 = Rgba8::rgb(0x00, 0x7b, 0xff);

/// Background visual of a button.
///
/// Chosen at construction: a texture yields an image sprite stretched to the
/// button size, otherwise a flat rounded rectangle redrawn at the button
/// size. Both variants answer the same `resize` capability; there is no
/// runtime type inspection anywhere else.
#[derive(Clone, Debug)]
pub enum Background {
    /// Image sprite stretched to `width` x `height`.
    Image {
        /// Decoded source pixels.
        texture: Texture,
        /// Current draw width.
        width: f64,
        /// Current draw height.
        height: f64,
    },
    /// Rounded rectangle redrawn at `width` x `height`.
    Vector {
        /// Flat fill color.
        fill: Rgba8,
        /// Corner radius in pixels.
        corner_radius: f64,
        /// Current draw width.
        width: f64,
        /// Current draw height.
        height: f64,
    },
}

impl Background {
    /// Image-backed background stretched to the given size.
    pub fn image(texture: Texture, width: f64, height: f64) -> Self {
        Self::Image {
            texture,
            width,
            height,
        }
    }

    /// Stock vector background at the given size.
    pub fn vector(width: f64, height: f64) -> Self {
        Self::Vector {
            fill: DEFAULT_FILL,
            corner_radius: CORNER_RADIUS,
            width,
            height,
        }
    }

    /// Re-apply the draw size; runs on every layout pass.
    pub fn resize(&mut self, new_width: f64, new_height: f64) {
        match self {
            Self::Image { width, height, .. } | Self::Vector { width, height, .. } => {
                *width = new_width;
                *height = new_height;
            }
        }
    }

    /// Current draw size.
    pub fn size(&self) -> (f64, f64) {
        match self {
            Self::Image { width, height, .. } | Self::Vector { width, height, .. } => {
                (*width, *height)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_defaults_are_stock() {
        let bg = Background::vector(150.0, 80.0);
        let Background::Vector {
            fill,
            corner_radius,
            width,
            height,
        } = bg
        else {
            panic!("expected vector background");
        };
        assert_eq!(fill, DEFAULT_FILL);
        assert_eq!(corner_radius, CORNER_RADIUS);
        assert_eq!((width, height), (150.0, 80.0));
    }

    #[test]
    fn resize_applies_to_either_variant() {
        let mut bg = Background::vector(10.0, 10.0);
        bg.resize(300.0, 120.0);
        assert_eq!(bg.size(), (300.0, 120.0));
    }
}
