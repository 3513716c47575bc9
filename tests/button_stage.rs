use std::cell::Cell;
use std::rc::Rc;

use bouton::{
    BoutonResult, ButtonBuilder, ButtonConfig, Coord, LabelStyle, Point, Stage, TextExtents,
    TextMeasurer, Viewport,
};

/// Deterministic stand-in for a shaping engine: every glyph advances
/// `advance_per_em` of the font size.
struct FakeMeasurer {
    advance_per_em: f64,
}

impl TextMeasurer for FakeMeasurer {
    fn measure(
        &mut self,
        text: &str,
        _family: Option<&str>,
        size_px: f32,
    ) -> BoutonResult<TextExtents> {
        let glyphs = text.chars().count() as f64;
        Ok(TextExtents {
            width: glyphs * self.advance_per_em * f64::from(size_px),
            height: f64::from(size_px) * 1.2,
        })
    }
}

#[test]
fn percent_layout_end_to_end() {
    let json = serde_json::json!({
        "width": 150,
        "height": 80,
        "x": "50%",
        "y": "75%",
        "label": "Click Me"
    });
    let config: ButtonConfig = serde_json::from_value(json).unwrap();

    let mut stage = Stage::new(Viewport::new(1000.0, 800.0));
    let id = stage
        .attach(ButtonBuilder::from_config(config).build())
        .unwrap();

    let button = stage.get(id).unwrap();
    assert_eq!(button.position(), Point::new(425.0, 560.0));
    assert!(button.label().is_some());
}

#[test]
fn auto_fit_converges_within_padded_width() {
    let mut button = ButtonBuilder::new()
        .size(150.0, 80.0)
        .position(Coord::Percent(50.0), Coord::Percent(75.0))
        .label("Click Me")
        .build();

    let mut measurer = FakeMeasurer {
        advance_per_em: 0.5,
    };
    button
        .layout(Viewport::new(1000.0, 800.0), &mut measurer)
        .unwrap();

    assert_eq!(button.position(), Point::new(425.0, 560.0));

    let label = button.label().unwrap();
    // 8 glyphs at half an em each fit 130px at size 32.
    assert_eq!(label.font_size, 32.0);
    assert!(label.extents.width <= 130.0);
    assert_eq!(label.scale, (80.0 * 0.4) / 32.0);
}

#[test]
fn explicit_font_size_skips_the_fit_pass() {
    let mut button = ButtonBuilder::new()
        .size(150.0, 80.0)
        .label("a very long label that cannot possibly fit")
        .label_style(LabelStyle {
            font_size: Some(24.0),
            ..LabelStyle::default()
        })
        .build();

    let mut measurer = FakeMeasurer {
        advance_per_em: 0.6,
    };
    button
        .layout(Viewport::new(1000.0, 800.0), &mut measurer)
        .unwrap();

    let label = button.label().unwrap();
    assert_eq!(label.font_size, 24.0);
    assert_eq!(label.scale, 1.0);
    // The caller's size wins even though the text overflows the button.
    assert!(label.extents.width > 150.0);
}

#[test]
fn relayout_tracks_viewport_changes() {
    let mut stage = Stage::new(Viewport::new(1000.0, 800.0));
    let id = stage
        .attach(
            ButtonBuilder::new()
                .position(Coord::Percent(50.0), Coord::Percent(75.0))
                .build(),
        )
        .unwrap();

    stage.set_viewport(2000.0, 400.0).unwrap();
    let button = stage.get(id).unwrap();
    assert_eq!(button.position(), Point::new(925.0, 260.0));

    // Absolute coordinates are unaffected by the container size.
    let id = stage
        .attach(
            ButtonBuilder::new()
                .position(Coord::Px(12.0), Coord::Px(-5.0))
                .build(),
        )
        .unwrap();
    stage.set_viewport(300.0, 300.0).unwrap();
    assert_eq!(stage.get(id).unwrap().position(), Point::new(12.0, -5.0));
}

#[test]
fn tap_fires_callback_inside_bounds_only() {
    let mut stage = Stage::new(Viewport::new(1000.0, 800.0));
    let clicks = Rc::new(Cell::new(0u32));

    let seen = clicks.clone();
    stage
        .attach(
            ButtonBuilder::new()
                .size(150.0, 80.0)
                .position(Coord::Percent(50.0), Coord::Percent(75.0))
                .on_click(move || seen.set(seen.get() + 1))
                .build(),
        )
        .unwrap();

    // Button occupies 425..575 x 560..640.
    assert!(stage.pointer_tap(500.0, 600.0));
    assert_eq!(clicks.get(), 1);

    assert!(!stage.pointer_tap(100.0, 100.0));
    assert_eq!(clicks.get(), 1);
}

#[test]
fn detached_button_stops_responding_to_resizes() {
    let mut stage = Stage::new(Viewport::new(1000.0, 800.0));
    let id = stage
        .attach(
            ButtonBuilder::new()
                .position(Coord::Percent(50.0), Coord::Percent(50.0))
                .build(),
        )
        .unwrap();

    let button = stage.detach(id).unwrap();
    let frozen = button.position();

    stage.set_viewport(100.0, 100.0).unwrap();
    assert_eq!(button.position(), frozen);
    assert!(stage.detach(id).is_none());
}
