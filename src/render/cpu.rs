use std::sync::Arc;

use kurbo::Shape;

use crate::assets::texture::Texture;
use crate::foundation::core::{Affine, Point};
use crate::foundation::error::{BoutonError, BoutonResult};
use crate::scene::stage::Stage;
use crate::text::engine::{TextBrush, TextEngine, layout_extents};
use crate::widget::background::Background;
use crate::widget::button::{Button, Label, TextAlign};

/// Render options for a stage rasterization.
#[derive(Clone, Debug, Default)]
pub struct RenderSettings {
    /// Opaque-ish clear color painted under all nodes; `None` leaves the
    /// surface transparent.
    pub clear_rgba: Option<[u8; 4]>,
}

/// Rasterized frame in premultiplied RGBA8.
#[derive(Clone, Debug)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

/// Rasterize the stage's attached nodes against its current viewport.
///
/// Nodes paint in attach order, so later attachments draw on top — the same
/// order `pointer_tap` consults in reverse.
#[tracing::instrument(skip(stage))]
pub fn render_stage(stage: &mut Stage, settings: &RenderSettings) -> BoutonResult<FrameRgba> {
    let viewport = stage.viewport;
    let width = viewport.width.round().max(1.0) as u32;
    let height = viewport.height.round().max(1.0) as u32;
    let w16: u16 = width
        .try_into()
        .map_err(|_| BoutonError::render("surface width exceeds u16"))?;
    let h16: u16 = height
        .try_into()
        .map_err(|_| BoutonError::render("surface height exceeds u16"))?;

    let mut ctx = vello_cpu::RenderContext::new(w16, h16);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

    if let Some([r, g, b, a]) = settings.clear_rgba {
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));
    }

    let text = &mut stage.text;
    for (_, button) in stage.nodes.iter() {
        draw_button(&mut ctx, button, text)?;
    }

    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
    ctx.render_to_pixmap(&mut pixmap);

    Ok(FrameRgba {
        width,
        height,
        data: pixmap.data_as_u8_slice().to_vec(),
        premultiplied: true,
    })
}

fn draw_button(
    ctx: &mut vello_cpu::RenderContext,
    button: &Button,
    text: &mut TextEngine,
) -> BoutonResult<()> {
    let pos = button.position();
    let origin = Affine::translate((pos.x, pos.y));

    match button.background() {
        Background::Image {
            texture,
            width,
            height,
        } => {
            let paint = image_paint(texture)?;
            let sx = *width / f64::from(texture.width.max(1));
            let sy = *height / f64::from(texture.height.max(1));

            ctx.set_transform(affine_to_cpu(origin * Affine::scale_non_uniform(sx, sy)));
            ctx.set_paint(paint);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(texture.width),
                f64::from(texture.height),
            ));
        }
        Background::Vector {
            fill,
            corner_radius,
            width,
            height,
        } => {
            ctx.set_transform(affine_to_cpu(origin));
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                fill.r, fill.g, fill.b, fill.a,
            ));
            let rr = kurbo::RoundedRect::new(0.0, 0.0, *width, *height, *corner_radius);
            let mut path = vello_cpu::kurbo::BezPath::new();
            for el in rr.path_elements(0.1) {
                path.push(el);
            }
            ctx.fill_path(&path);
        }
    }

    if let Some(label) = button.label() {
        draw_label(ctx, pos, label, text)?;
    }

    Ok(())
}

fn draw_label(
    ctx: &mut vello_cpu::RenderContext,
    origin: Point,
    label: &Label,
    text: &mut TextEngine,
) -> BoutonResult<()> {
    let brush = TextBrush {
        r: label.fill.r,
        g: label.fill.g,
        b: label.fill.b,
        a: label.fill.a,
    };
    let Some((mut layout, font_bytes)) =
        text.shape(&label.text, label.family.as_deref(), label.font_size, brush)?
    else {
        // No font registered; the label degrades to invisible.
        return Ok(());
    };

    layout.align(
        None,
        alignment_for(label.align),
        parley::AlignmentOptions::default(),
    );
    let extents = layout_extents(&layout);

    // Block centered on the label's anchor point, uniformly scaled.
    let transform = Affine::translate((origin.x + label.center.x, origin.y + label.center.y))
        * Affine::scale(label.scale)
        * Affine::translate((-extents.width / 2.0, -extents.height / 2.0));
    ctx.set_transform(affine_to_cpu(transform));

    let font = vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::from(font_bytes.as_ref().clone()),
        0,
    );
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }

    Ok(())
}

fn alignment_for(align: TextAlign) -> parley::Alignment {
    match align {
        TextAlign::Left => parley::Alignment::Left,
        TextAlign::Center => parley::Alignment::Center,
        TextAlign::Right => parley::Alignment::Right,
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn image_paint(texture: &Texture) -> BoutonResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(&texture.rgba8_premul, texture.width, texture.height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> BoutonResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| BoutonError::render("texture width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| BoutonError::render("texture height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(BoutonError::render("texture byte len mismatch"));
    }

    // Pixmap stores PremulRgba8; texture bytes are already premultiplied.
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixmap_rejects_mismatched_byte_len() {
        assert!(pixmap_from_premul_bytes(&[0u8; 3], 1, 1).is_err());
        assert!(pixmap_from_premul_bytes(&[0u8; 4], 1, 1).is_ok());
    }
}
