pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Size of the rendering surface nodes are laid out against.
///
/// Width/height are logical pixels; the host updates them on every viewport
/// resize and the stage re-lays out attached nodes from their original
/// configs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Straight-alpha RGBA8 color.
///
/// Accepts `"#RRGGBB"` / `"#RRGGBBAA"` strings or `[r, g, b]` / `[r, g, b, a]`
/// byte arrays when deserialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Premultiplied `[r, g, b, a]` bytes.
    pub fn premultiply(self) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }
}

impl<'de> serde::Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Arr(Vec<u8>),
            Obj { r: u8, g: u8, b: u8, a: u8 },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Obj { r, g, b, a } => Ok(Rgba8::rgba(r, g, b, a)),
            Repr::Arr(v) => {
                if v.len() == 3 {
                    Ok(Rgba8::rgb(v[0], v[1], v[2]))
                } else if v.len() == 4 {
                    Ok(Rgba8::rgba(v[0], v[1], v[2], v[3]))
                } else {
                    Err(serde::de::Error::custom(
                        "color array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                    ))
                }
            }
        }
    }
}

fn parse_hex(s: &str) -> Result<Rgba8, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    match s.len() {
        6 => Ok(Rgba8::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(Rgba8::rgba(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        )),
        _ => Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_hex_rgb_and_rgba() {
        let c: Rgba8 = serde_json::from_value(json!("#007bff")).unwrap();
        assert_eq!(c, Rgba8::rgb(0x00, 0x7b, 0xff));

        let c: Rgba8 = serde_json::from_value(json!("#0000ff80")).unwrap();
        assert_eq!(c, Rgba8::rgba(0, 0, 255, 128));
    }

    #[test]
    fn parses_byte_arrays() {
        let c: Rgba8 = serde_json::from_value(json!([10, 20, 30])).unwrap();
        assert_eq!(c, Rgba8::rgb(10, 20, 30));

        let c: Rgba8 = serde_json::from_value(json!([10, 20, 30, 40])).unwrap();
        assert_eq!(c, Rgba8::rgba(10, 20, 30, 40));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(serde_json::from_value::<Rgba8>(json!("#12345")).is_err());
        assert!(serde_json::from_value::<Rgba8>(json!("#zzzzzz")).is_err());
    }

    #[test]
    fn premultiply_scales_channels() {
        assert_eq!(
            Rgba8::rgba(255, 255, 255, 128).premultiply(),
            [128, 128, 128, 128]
        );
        assert_eq!(Rgba8::rgb(1, 2, 3).premultiply(), [1, 2, 3, 255]);
    }
}
