use std::str::FromStr;

/// Declared coordinate for one axis of a node.
///
/// In JSON configs this is an untagged value: a number is an absolute pixel
/// offset, a string like `"50%"` is a fraction of the container, and an
/// absent field means anchored placement inside the container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Coord {
    /// Anchored placement: `(container - size) * anchor`.
    #[default]
    Auto,
    /// Absolute pixel offset; the anchor is ignored.
    Px(f64),
    /// Percentage of the container size, anchor-adjusted.
    Percent(f64),
}

impl Coord {
    pub fn is_auto(&self) -> bool {
        matches!(self, Coord::Auto)
    }
}

impl FromStr for Coord {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(stripped) = s.strip_suffix('%') {
            let p: f64 = stripped
                .trim()
                .parse()
                .map_err(|_| format!("invalid percentage coordinate \"{s}\""))?;
            if !p.is_finite() {
                return Err(format!("percentage coordinate \"{s}\" must be finite"));
            }
            return Ok(Coord::Percent(p));
        }
        let v: f64 = s
            .parse()
            .map_err(|_| format!("coordinate \"{s}\" must be a number or a percentage"))?;
        Ok(Coord::Px(v))
    }
}

impl serde::Serialize for Coord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Coord::Auto => serializer.serialize_none(),
            Coord::Px(v) => serializer.serialize_f64(*v),
            Coord::Percent(p) => serializer.serialize_str(&format!("{p}%")),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Coord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Num(f64),
            Str(String),
            None(Option<()>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Num(v) => Ok(Coord::Px(v)),
            // Strings must be well-formed percentages. The permissive
            // alternative (fall back to anchored placement) hides typos and
            // lets NaN positions through, so malformed strings are rejected
            // at the config boundary instead.
            Repr::Str(s) => {
                let c: Coord = s.parse().map_err(serde::de::Error::custom)?;
                match c {
                    Coord::Percent(_) => Ok(c),
                    _ => Err(serde::de::Error::custom(format!(
                        "coordinate string \"{s}\" must be a percentage like \"50%\""
                    ))),
                }
            }
            Repr::None(_) => Ok(Coord::Auto),
        }
    }
}

/// Resolve a declared coordinate to a final pixel position.
///
/// `size` is the node's extent on this axis, `container` the current
/// container extent, `anchor` the 0..1 fraction of `size` subtracted from
/// fractional placements. The result is not clamped; positions partially or
/// fully outside the container are accepted.
pub fn resolve_position(coord: Coord, size: f64, container: f64, anchor: f64) -> f64 {
    match coord {
        Coord::Percent(p) => container * (p / 100.0) - size * anchor,
        Coord::Px(v) if v.is_finite() => v,
        _ => (container - size) * anchor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_coord_is_anchored_placement() {
        assert_eq!(resolve_position(Coord::Auto, 150.0, 1000.0, 0.5), 425.0);
        assert_eq!(resolve_position(Coord::Auto, 150.0, 1000.0, 0.0), 0.0);
        assert_eq!(resolve_position(Coord::Auto, 150.0, 1000.0, 1.0), 850.0);
    }

    #[test]
    fn absolute_coord_ignores_anchor() {
        for anchor in [0.0, 0.25, 0.5, 1.0] {
            assert_eq!(resolve_position(Coord::Px(42.0), 150.0, 1000.0, anchor), 42.0);
            assert_eq!(
                resolve_position(Coord::Px(-30.0), 150.0, 1000.0, anchor),
                -30.0
            );
        }
    }

    #[test]
    fn percent_coord_is_anchor_adjusted() {
        assert_eq!(
            resolve_position(Coord::Percent(50.0), 150.0, 1000.0, 0.5),
            425.0
        );
        assert_eq!(
            resolve_position(Coord::Percent(75.0), 80.0, 800.0, 0.5),
            560.0
        );
        assert_eq!(
            resolve_position(Coord::Percent(0.0), 150.0, 1000.0, 0.5),
            -75.0
        );
        // No clamping: positions may land outside the container.
        assert_eq!(
            resolve_position(Coord::Percent(120.0), 100.0, 500.0, 0.0),
            600.0
        );
    }

    #[test]
    fn non_finite_px_falls_back_to_anchored() {
        assert_eq!(
            resolve_position(Coord::Px(f64::NAN), 150.0, 1000.0, 0.5),
            425.0
        );
        assert_eq!(
            resolve_position(Coord::Px(f64::INFINITY), 150.0, 1000.0, 0.5),
            425.0
        );
    }

    #[test]
    fn deserializes_numbers_strings_and_absence() {
        let c: Coord = serde_json::from_value(json!(120.5)).unwrap();
        assert_eq!(c, Coord::Px(120.5));

        let c: Coord = serde_json::from_value(json!("50%")).unwrap();
        assert_eq!(c, Coord::Percent(50.0));

        let c: Coord = serde_json::from_value(json!(" 12.5 %")).unwrap();
        assert_eq!(c, Coord::Percent(12.5));

        let c: Coord = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(c, Coord::Auto);
    }

    #[test]
    fn rejects_malformed_coordinate_strings() {
        assert!(serde_json::from_value::<Coord>(json!("abc%")).is_err());
        assert!(serde_json::from_value::<Coord>(json!("50")).is_err());
        assert!(serde_json::from_value::<Coord>(json!("%")).is_err());
    }

    #[test]
    fn parses_from_str_for_cli_arguments() {
        assert_eq!("75%".parse::<Coord>().unwrap(), Coord::Percent(75.0));
        assert_eq!("42".parse::<Coord>().unwrap(), Coord::Px(42.0));
        assert!("wat".parse::<Coord>().is_err());
    }
}
