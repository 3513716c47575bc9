use crate::foundation::error::BoutonResult;
use crate::text::engine::{TextExtents, TextMeasurer};

/// Tunables for the label auto-fit pass.
///
/// Defaults match the widget's stock behavior; they are surfaced here as
/// named values rather than buried literals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitParams {
    /// Font size the fit pass starts from.
    pub base_font_size: f32,
    /// Lower bound the shrink loop will not pass.
    pub min_font_size: f32,
    /// Horizontal padding kept on each side of the label.
    pub padding: f64,
    /// Fraction of the button height the rendered glyphs should track.
    pub height_ratio: f64,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            base_font_size: 100.0,
            min_font_size: 6.0,
            padding: 10.0,
            height_ratio: 0.4,
        }
    }
}

/// Outcome of a fit pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FittedLabel {
    /// Converged font size.
    pub font_size: f32,
    /// Uniform scale applied on top of the converged size.
    pub scale: f64,
    /// Measured extents at the converged size (unscaled).
    pub extents: TextExtents,
}

/// Shrink a label's font size until it fits the button width.
///
/// Starting from `base_font_size`, the size drops by 1 while the measured
/// width exceeds `width - 2 * padding` and the size stays above
/// `min_font_size`; the loop is bounded by `base_font_size - min_font_size`
/// steps. The returned scale makes the glyph height track
/// `height * height_ratio` regardless of where the loop converged.
pub fn fit_label(
    measurer: &mut dyn TextMeasurer,
    text: &str,
    family: Option<&str>,
    width: f64,
    height: f64,
    params: FitParams,
) -> BoutonResult<FittedLabel> {
    let max_width = width - params.padding * 2.0;

    let mut font_size = params.base_font_size;
    let mut extents = measurer.measure(text, family, font_size)?;
    while font_size > params.min_font_size && extents.width > max_width {
        font_size -= 1.0;
        extents = measurer.measure(text, family, font_size)?;
    }

    let scale = (height * params.height_ratio) / f64::from(font_size);
    Ok(FittedLabel {
        font_size,
        scale,
        extents,
    })
}
