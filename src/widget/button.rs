use crate::assets::texture::Texture;
use crate::foundation::core::{Point, Rect, Rgba8, Viewport};
use crate::layout::solver::{Coord, resolve_position};
use crate::text::engine::{TextExtents, TextMeasurer};
use crate::text::fit::{FitParams, fit_label};
use crate::widget::background::Background;

/// Default button width in pixels.
pub const DEFAULT_WIDTH: f64 = 150.0;

/// Default button height in pixels.
pub const DEFAULT_HEIGHT: f64 = 80.0;

/// Default anchor fraction on both axes (centered).
pub const DEFAULT_ANCHOR: f64 = 0.5;

/// Default label fill (white).
pub const DEFAULT_LABEL_FILL: Rgba8 = Rgba8::rgb(255, 255, 255);

/// Click callback bound to a button.
pub type OnClick = Box<dyn FnMut()>;

/// Horizontal alignment of label text within its block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Caller overrides for the label; any subset may be set.
///
/// Defaults are applied field-by-field at construction. Whether a font size
/// was supplied is exactly `font_size.is_some()` — an explicit size disables
/// auto-fit even if it overflows the button.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LabelStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Rgba8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
}

/// Declarative button description.
///
/// Every field is optional in JSON; missing fields take the stock defaults.
/// Width, height, and anchors are deliberately not validated — degenerate
/// values degrade the layout rather than failing it.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ButtonConfig {
    /// Path to a background image; absent means the stock vector background.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
    pub width: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Coord::is_auto")]
    pub x: Coord,
    #[serde(skip_serializing_if = "Coord::is_auto")]
    pub y: Coord,
    pub anchor_x: f64,
    pub anchor_y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub label_style: LabelStyle,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            texture: None,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            x: Coord::Auto,
            y: Coord::Auto,
            anchor_x: DEFAULT_ANCHOR,
            anchor_y: DEFAULT_ANCHOR,
            label: None,
            label_style: LabelStyle::default(),
        }
    }
}

/// Label visual of a button.
///
/// `font_size` and `scale` are recomputed on every layout pass; `extents`
/// holds the last measured size at `font_size` (unscaled) and feeds the
/// composite hit-test bounds.
#[derive(Clone, Debug)]
pub struct Label {
    pub text: String,
    /// Requested family; `None` means the engine's default font.
    pub family: Option<String>,
    pub fill: Rgba8,
    pub align: TextAlign,
    pub font_size: f32,
    /// Uniform scale applied on top of `font_size`.
    pub scale: f64,
    /// Whether the caller fixed the font size (disables auto-fit).
    pub explicit_size: bool,
    pub extents: TextExtents,
    /// Button-local center the label is anchored on.
    pub center: Point,
}

/// Builder for [`Button`].
pub struct ButtonBuilder {
    config: ButtonConfig,
    texture: Option<Texture>,
    on_click: Option<OnClick>,
}

impl Default for ButtonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonBuilder {
    pub fn new() -> Self {
        Self::from_config(ButtonConfig::default())
    }

    /// Start from a deserialized config (the texture still has to be loaded
    /// by the host and passed via [`ButtonBuilder::texture`]).
    pub fn from_config(config: ButtonConfig) -> Self {
        Self {
            config,
            texture: None,
            on_click: None,
        }
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    pub fn position(mut self, x: Coord, y: Coord) -> Self {
        self.config.x = x;
        self.config.y = y;
        self
    }

    pub fn anchor(mut self, anchor_x: f64, anchor_y: f64) -> Self {
        self.config.anchor_x = anchor_x;
        self.config.anchor_y = anchor_y;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.config.label = Some(label.into());
        self
    }

    pub fn label_style(mut self, style: LabelStyle) -> Self {
        self.config.label_style = style;
        self
    }

    /// Background texture; the background becomes an image sprite stretched
    /// to the button size.
    pub fn texture(mut self, texture: Texture) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn on_click(mut self, cb: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Box::new(cb));
        self
    }

    pub fn build(self) -> Button {
        Button::new(self.config, self.texture, self.on_click)
    }
}

/// The composite node: one background visual, zero-or-one label visual, and
/// an optional click callback.
///
/// A button holds no layout state of its own beyond the last resolved
/// position; every [`Button::layout`] call recomputes position, background
/// geometry, and label fit from the original config plus the viewport it is
/// given.
pub struct Button {
    config: ButtonConfig,
    background: Background,
    label: Option<Label>,
    on_click: Option<OnClick>,
    pos: Point,
}

impl std::fmt::Debug for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Button")
            .field("config", &self.config)
            .field("background", &self.background)
            .field("label", &self.label)
            .field("has_on_click", &self.on_click.is_some())
            .field("pos", &self.pos)
            .finish()
    }
}

impl Button {
    /// Construct a button from a config, an optional decoded texture, and an
    /// optional click callback. [`ButtonBuilder`] is the ergonomic front.
    pub fn new(config: ButtonConfig, texture: Option<Texture>, on_click: Option<OnClick>) -> Self {
        let background = match texture {
            Some(tex) => Background::image(tex, config.width, config.height),
            None => Background::vector(config.width, config.height),
        };

        // A label visual exists iff a non-empty label string was supplied.
        let label = config
            .label
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|text| {
                let style = &config.label_style;
                Label {
                    text: text.to_string(),
                    family: style.font_family.clone(),
                    fill: style.fill.unwrap_or(DEFAULT_LABEL_FILL),
                    align: style.align.unwrap_or_default(),
                    font_size: style.font_size.unwrap_or(FitParams::default().min_font_size),
                    scale: 1.0,
                    explicit_size: style.font_size.is_some(),
                    extents: TextExtents::default(),
                    center: Point::new(config.width / 2.0, config.height / 2.0),
                }
            });

        Self {
            config,
            background,
            label,
            on_click,
            pos: Point::ZERO,
        }
    }

    /// Recompute position, background geometry, and label fit against the
    /// given viewport.
    ///
    /// The stage calls this once when the button is attached and again on
    /// every viewport resize; a detached button is never laid out.
    pub fn layout(
        &mut self,
        viewport: Viewport,
        measurer: &mut dyn TextMeasurer,
    ) -> crate::BoutonResult<()> {
        let (w, h) = (self.config.width, self.config.height);

        self.pos = Point::new(
            resolve_position(self.config.x, w, viewport.width, self.config.anchor_x),
            resolve_position(self.config.y, h, viewport.height, self.config.anchor_y),
        );
        self.background.resize(w, h);

        if let Some(label) = &mut self.label {
            label.center = Point::new(w / 2.0, h / 2.0);

            if label.explicit_size {
                // The caller's size is authoritative even if it overflows;
                // only re-measure for hit-test bounds.
                label.scale = 1.0;
                label.extents =
                    measurer.measure(&label.text, label.family.as_deref(), label.font_size)?;
            } else {
                let fit = fit_label(
                    measurer,
                    &label.text,
                    label.family.as_deref(),
                    w,
                    h,
                    FitParams::default(),
                )?;
                label.font_size = fit.font_size;
                label.scale = fit.scale;
                label.extents = fit.extents;
            }
        }

        tracing::debug!(x = self.pos.x, y = self.pos.y, "laid out button");
        Ok(())
    }

    /// Last resolved top-left position.
    pub fn position(&self) -> Point {
        self.pos
    }

    /// Configured size.
    pub fn size(&self) -> (f64, f64) {
        (self.config.width, self.config.height)
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    /// Composite bounds: the background rect unioned with the rendered label
    /// extents. Taps are hit-tested against these, not the background alone.
    pub fn bounds(&self) -> Rect {
        let rect = Rect::new(
            self.pos.x,
            self.pos.y,
            self.pos.x + self.config.width,
            self.pos.y + self.config.height,
        );

        match &self.label {
            Some(label) if label.extents.width > 0.0 => {
                let lw = label.extents.width * label.scale;
                let lh = label.extents.height * label.scale;
                let cx = self.pos.x + label.center.x;
                let cy = self.pos.y + label.center.y;
                rect.union(Rect::new(
                    cx - lw / 2.0,
                    cy - lh / 2.0,
                    cx + lw / 2.0,
                    cy + lh / 2.0,
                ))
            }
            _ => rect,
        }
    }

    /// Whether a point falls inside the composite bounds.
    pub fn contains(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }

    /// Deliver a tap to this button; returns whether a callback ran.
    pub fn tap(&mut self) -> bool {
        match &mut self.on_click {
            Some(cb) => {
                cb();
                true
            }
            None => false,
        }
    }

    pub fn set_on_click(&mut self, cb: impl FnMut() + 'static) {
        self.on_click = Some(Box::new(cb));
    }
}
