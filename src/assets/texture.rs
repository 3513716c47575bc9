use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::foundation::error::BoutonResult;

#[derive(Clone, Debug)]
/// Decoded background image in premultiplied RGBA8 form.
pub struct Texture {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl Texture {
    /// Decode encoded image bytes and convert to premultiplied RGBA8.
    pub fn decode(bytes: &[u8]) -> BoutonResult<Self> {
        let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();

        let mut rgba8_premul = rgba.into_raw();
        premultiply_rgba8_in_place(&mut rgba8_premul);

        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Read and decode an image file.
    pub fn load(path: &Path) -> BoutonResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read texture bytes from '{}'", path.display()))?;
        Self::decode(&bytes)
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}
