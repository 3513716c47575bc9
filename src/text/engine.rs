use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{BoutonError, BoutonResult};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
/// RGBA8 brush color carried through Parley text layouts.
pub struct TextBrush {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
/// Extents of a shaped text block.
pub struct TextExtents {
    /// Widest line advance.
    pub width: f64,
    /// Sum of line heights (ascent + descent + leading).
    pub height: f64,
}

/// Measurement seam between layout policy and the shaping engine.
///
/// The auto-fit loop only needs rendered extents for a candidate font size,
/// so it takes this trait instead of a concrete engine; tests substitute a
/// deterministic measurer with no font files involved.
pub trait TextMeasurer {
    /// Measure `text` at `size_px` using `family` (or the default font when
    /// `None` / unknown).
    fn measure(
        &mut self,
        text: &str,
        family: Option<&str>,
        size_px: f32,
    ) -> BoutonResult<TextExtents>;
}

#[derive(Clone)]
struct RegisteredFont {
    family: String,
    bytes: Arc<Vec<u8>>,
}

/// Stateful engine building Parley layouts from registered font bytes.
///
/// Fonts are explicit inputs: the host registers bytes once, the first
/// registered family is the default, and label styles select among
/// registered families by name. With no fonts registered, measurement
/// reports zero extents and shaping yields nothing; labels degrade to
/// invisible rather than erroring.
pub struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    fonts: Vec<RegisteredFont>,
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TextEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextEngine")
            .field(
                "families",
                &self.fonts.iter().map(|r| r.family.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl TextEngine {
    /// Construct a new engine with fresh Parley contexts and no fonts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            fonts: Vec::new(),
        }
    }

    /// Register a font from raw bytes; returns the detected family name.
    ///
    /// The first registered font becomes the default family.
    pub fn register_font_bytes(&mut self, bytes: Vec<u8>) -> BoutonResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            BoutonError::text("no font families registered from font bytes")
        })?;

        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| BoutonError::text("registered font family has no name"))?
            .to_string();

        self.fonts.push(RegisteredFont {
            family: family.clone(),
            bytes: Arc::new(bytes),
        });
        Ok(family)
    }

    /// Read and register a font file; returns the detected family name.
    pub fn register_font_file(&mut self, path: &std::path::Path) -> BoutonResult<String> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font bytes from '{}'", path.display()))?;
        self.register_font_bytes(bytes)
    }

    /// Whether any font has been registered.
    pub fn has_fonts(&self) -> bool {
        !self.fonts.is_empty()
    }

    /// Default (first registered) family name, if any.
    pub fn default_family(&self) -> Option<&str> {
        self.fonts.first().map(|r| r.family.as_str())
    }

    fn resolve(&self, family: Option<&str>) -> Option<RegisteredFont> {
        let by_name = family.and_then(|name| {
            self.fonts
                .iter()
                .find(|r| r.family.eq_ignore_ascii_case(name))
        });
        by_name.or_else(|| self.fonts.first()).cloned()
    }

    /// Shape `text` into a layout plus the backing font bytes.
    ///
    /// Returns `Ok(None)` when no font is registered.
    pub fn shape(
        &mut self,
        text: &str,
        family: Option<&str>,
        size_px: f32,
        brush: TextBrush,
    ) -> BoutonResult<Option<(parley::Layout<TextBrush>, Arc<Vec<u8>>)>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(BoutonError::validation("text size_px must be finite and > 0"));
        }

        let Some(font) = self.resolve(family) else {
            return Ok(None);
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(font.family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);

        Ok(Some((layout, font.bytes)))
    }
}

/// Extents of a built layout: widest line advance by summed line heights.
pub fn layout_extents(layout: &parley::Layout<TextBrush>) -> TextExtents {
    let mut width = 0.0f64;
    let mut height = 0.0f64;
    for line in layout.lines() {
        let m = line.metrics();
        width = width.max(f64::from(m.advance));
        height += f64::from(m.ascent + m.descent + m.leading);
    }
    TextExtents { width, height }
}

impl TextMeasurer for TextEngine {
    fn measure(
        &mut self,
        text: &str,
        family: Option<&str>,
        size_px: f32,
    ) -> BoutonResult<TextExtents> {
        match self.shape(text, family, size_px, TextBrush::default())? {
            Some((layout, _)) => Ok(layout_extents(&layout)),
            None => Ok(TextExtents::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fontless_engine_measures_zero_and_shapes_nothing() {
        let mut engine = TextEngine::new();
        assert!(!engine.has_fonts());
        assert_eq!(engine.default_family(), None);

        let ext = engine.measure("hello", None, 24.0).unwrap();
        assert_eq!(ext, TextExtents::default());
        assert!(engine.shape("hello", None, 24.0, TextBrush::default()).unwrap().is_none());
    }

    #[test]
    fn rejects_non_positive_font_size() {
        let mut engine = TextEngine::new();
        assert!(engine.measure("hello", None, 0.0).is_err());
        assert!(engine.measure("hello", None, f32::NAN).is_err());
    }

    #[test]
    fn rejects_bytes_with_no_font_families() {
        let mut engine = TextEngine::new();
        assert!(engine.register_font_bytes(vec![0u8; 16]).is_err());
    }
}
