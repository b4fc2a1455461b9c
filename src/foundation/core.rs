use serde::{Deserialize, Serialize};

pub use kurbo::{Point, Rect};

/// Page dimensions in points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    /// Width in points.
    pub width: f64,
    /// Height in points.
    pub height: f64,
}

/// Vertical page margins plus per-box spacing, in points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageMargins {
    /// Space reserved above the grid for the title block.
    pub top: f64,
    /// Space reserved below the grid for the legend.
    pub bottom: f64,
    /// Gap between adjacent week boxes.
    pub box_margin: f64,
    /// Stroke width of each week box border.
    pub box_line_width: f64,
}

/// Straight RGB colour with `0.0..=1.0` channels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Rgb {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
}

impl Rgb {
    /// Construct from raw channels.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Shift every channel by `delta`.
    ///
    /// Channels saturate at the `0.0..=1.0` bounds instead of leaving the
    /// valid range.
    pub fn shifted(self, delta: f64) -> Self {
        Self {
            r: (self.r + delta).clamp(0.0, 1.0),
            g: (self.g + delta).clamp(0.0, 1.0),
            b: (self.b + delta).clamp(0.0, 1.0),
        }
    }

    /// Lowercase `#rrggbb` form used by the SVG surface.
    pub fn to_hex(self) -> String {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }

        format!(
            "#{:02x}{:02x}{:02x}",
            to_u8(self.r),
            to_u8(self.g),
            to_u8(self.b)
        )
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Obj { r: f64, g: f64, b: f64 },
            Arr(Vec<f64>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Obj { r, g, b } => Ok(Self::new(r, g, b)),
            Repr::Arr(v) => {
                if v.len() == 3 {
                    Ok(Self::new(v[0], v[1], v[2]))
                } else {
                    Err(serde::de::Error::custom(
                        "rgb array must have len 3 ([r,g,b])",
                    ))
                }
            }
        }
    }
}

fn parse_hex(s: &str) -> Result<Rgb, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    // Byte length alone is not enough: slicing below assumes ASCII.
    if s.len() != 6 || !s.is_ascii() {
        return Err("hex colour must be #RRGGBB (case-insensitive)".to_owned());
    }

    let r = hex_byte(&s[0..2])?;
    let g = hex_byte(&s[2..4])?;
    let b = hex_byte(&s[4..6])?;

    Ok(Rgb::new(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
