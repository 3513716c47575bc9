//! Bouton is a clickable button widget for a 2D retained scene graph.
//!
//! The crate is deliberately small: one widget, one host, one rasterizer.
//!
//! - Describe a button with a [`ButtonConfig`] (or [`ButtonBuilder`]): size,
//!   absolute/percentage position, anchor fractions, an optional label with
//!   style overrides, an optional background texture, and a click callback.
//! - Attach it to a [`Stage`], the rendering-surface host. Attaching lays the
//!   button out against the current viewport; [`Stage::set_viewport`] re-lays
//!   out every attached node, and [`Stage::pointer_tap`] hit-tests and fires
//!   click callbacks.
//! - Rasterize the stage with [`render_stage`] into a premultiplied RGBA8
//!   frame suitable for PNG output.
//!
//! Positions are recomputed from the original config on every layout pass;
//! nothing derived is persisted across resizes. Labels without an explicit
//! font size auto-fit to the button (see [`widget::button`]).
#![forbid(unsafe_code)]

pub mod assets;
pub mod foundation;
pub mod layout;
pub mod render;
pub mod scene;
pub mod text;
pub mod widget;

pub use assets::texture::Texture;
pub use foundation::core::{Affine, BezPath, Point, Rect, Rgba8, Vec2, Viewport};
pub use foundation::error::{BoutonError, BoutonResult};
pub use layout::solver::{Coord, resolve_position};
pub use render::cpu::{FrameRgba, RenderSettings, render_stage};
pub use scene::stage::{NodeId, Stage};
pub use text::engine::{TextBrush, TextEngine, TextExtents, TextMeasurer};
pub use text::fit::{FitParams, FittedLabel, fit_label};
pub use widget::background::{Background, CORNER_RADIUS, DEFAULT_FILL};
pub use widget::button::{
    Button, ButtonBuilder, ButtonConfig, DEFAULT_ANCHOR, DEFAULT_HEIGHT, DEFAULT_LABEL_FILL,
    DEFAULT_WIDTH, Label, LabelStyle, TextAlign,
};
