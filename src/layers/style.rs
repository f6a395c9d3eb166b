//! Per-feature styling: colors, Leaflet path options, gradient rules and
//! tooltips.
//!
//! Style rules are plain values. [`StyleRule::apply`] maps a feature's
//! attributes to a [`PathStyle`] without side effects, so the same rule
//! can be evaluated for every feature of a layer ahead of serialization.

use crate::{data::geojson::Properties, rendering::html::escape_html, MapError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Linear interpolation between two values of the same type.
pub trait Interpolatable {
    fn lerp(&self, other: &Self, t: f64) -> Self;
}

impl Interpolatable for f64 {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Interpolatable for Rgb {
    fn lerp(&self, other: &Self, t: f64) -> Self {
        let channel = |a: u8, b: u8| {
            Interpolatable::lerp(&(a as f64), &(b as f64), t)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Rgb::new(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
        )
    }
}

/// Parses `#rrggbb` or `#rgb` (case-insensitive).
pub fn parse_hex_color(text: &str) -> Option<Rgb> {
    let hex = text.strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Rgb::new(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?)),
        3 => {
            let nibble = |i: usize| byte(&hex[i..i + 1]).map(|v| v * 17);
            Some(Rgb::new(nibble(0)?, nibble(1)?, nibble(2)?))
        }
        _ => None,
    }
}

/// Leaflet path options. Unset fields are left to Leaflet's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
}

impl PathStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn fill(mut self, fill: bool) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn fill_color(mut self, color: impl Into<String>) -> Self {
        self.fill_color = Some(color.into());
        self
    }

    pub fn fill_opacity(mut self, opacity: f64) -> Self {
        self.fill_opacity = Some(opacity);
        self
    }
}

/// Piecewise-linear color ramp over `[vmin, vmax]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearColormap {
    colors: Vec<Rgb>,
    vmin: f64,
    vmax: f64,
}

impl LinearColormap {
    pub fn new(colors: Vec<Rgb>, vmin: f64, vmax: f64) -> Result<Self> {
        if colors.is_empty() {
            return Err(MapError::Config("colormap needs at least one color".into()));
        }
        if !(vmin <= vmax) {
            return Err(MapError::Config(format!(
                "colormap range {}..{} is empty",
                vmin, vmax
            )));
        }
        Ok(Self { colors, vmin, vmax })
    }

    /// Builds a ramp from `#rrggbb` strings.
    pub fn from_hex<S: AsRef<str>>(colors: &[S], vmin: f64, vmax: f64) -> Result<Self> {
        let parsed = colors
            .iter()
            .map(|c| {
                parse_hex_color(c.as_ref())
                    .ok_or_else(|| MapError::Config(format!("invalid color {:?}", c.as_ref())))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(parsed, vmin, vmax)
    }

    /// Color at `value`; values outside the range take the end colors.
    pub fn color_at(&self, value: f64) -> Rgb {
        let last = self.colors.len() - 1;
        if last == 0 || self.vmax == self.vmin || value.is_nan() {
            return self.colors[0];
        }
        let t = ((value - self.vmin) / (self.vmax - self.vmin)).clamp(0.0, 1.0);
        let scaled = t * last as f64;
        let index = (scaled.floor() as usize).min(last - 1);
        self.colors[index].lerp(&self.colors[index + 1], scaled - index as f64)
    }
}

/// How a layer turns feature attributes into a path style.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleRule {
    /// Same style for every feature
    Fixed(PathStyle),
    /// `base` with its fill color taken from `colormap` at the numeric
    /// value of `field`. Features without a numeric value keep `base`.
    Gradient {
        field: String,
        colormap: LinearColormap,
        base: PathStyle,
    },
}

impl StyleRule {
    pub fn apply(&self, properties: &Properties) -> PathStyle {
        match self {
            StyleRule::Fixed(style) => style.clone(),
            StyleRule::Gradient {
                field,
                colormap,
                base,
            } => match properties.get(field).and_then(numeric_value) {
                Some(value) => base.clone().fill_color(colormap.color_at(value).to_hex()),
                None => base.clone(),
            },
        }
    }
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Hover label showing one attribute under a bold alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    pub field: String,
    pub alias: String,
}

impl Tooltip {
    pub fn new(field: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            alias: alias.into(),
        }
    }

    /// HTML label for a feature; `None` when the attribute is missing or null.
    pub fn render(&self, properties: &Properties) -> Option<String> {
        let value = match properties.get(&self.field)? {
            Value::Null => return None,
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        Some(format!(
            "<b>{}</b> {}",
            escape_html(&self.alias),
            escape_html(&value)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Properties {
        let mut properties = Properties::new();
        properties.insert("code_meso".into(), value);
        properties
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#1E90FF"), Some(Rgb::new(0x1e, 0x90, 0xff)));
        assert_eq!(parse_hex_color("#fff"), Some(Rgb::new(255, 255, 255)));
        assert_eq!(parse_hex_color("1E90FF"), None);
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
        assert_eq!(Rgb::new(0, 191, 255).to_hex(), "#00bfff");
    }

    #[test]
    fn test_colormap_ends_and_middle() {
        let map = LinearColormap::from_hex(&["#000000", "#ffffff"], 10.0, 20.0).unwrap();
        assert_eq!(map.color_at(10.0), Rgb::new(0, 0, 0));
        assert_eq!(map.color_at(20.0), Rgb::new(255, 255, 255));
        assert_eq!(map.color_at(15.0), Rgb::new(128, 128, 128));
        assert_eq!(map.color_at(-5.0), Rgb::new(0, 0, 0));
        assert_eq!(map.color_at(99.0), Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_colormap_multi_stop() {
        let map =
            LinearColormap::from_hex(&["#ff0000", "#00ff00", "#0000ff"], 0.0, 2.0).unwrap();
        assert_eq!(map.color_at(1.0), Rgb::new(0, 255, 0));
        assert_eq!(map.color_at(1.5), Rgb::new(0, 128, 128));
    }

    #[test]
    fn test_colormap_degenerate_range() {
        let map = LinearColormap::from_hex(&["#ff0000", "#0000ff"], 4301.0, 4301.0).unwrap();
        assert_eq!(map.color_at(4301.0), Rgb::new(255, 0, 0));
        assert!(LinearColormap::from_hex(&["#ff0000"], 2.0, 1.0).is_err());
        assert!(LinearColormap::from_hex::<&str>(&[], 0.0, 1.0).is_err());
    }

    #[test]
    fn test_gradient_rule_sets_fill_color() {
        let rule = StyleRule::Gradient {
            field: "code_meso".into(),
            colormap: LinearColormap::from_hex(&["#000000", "#ffffff"], 0.0, 1.0).unwrap(),
            base: PathStyle::new().color("white").weight(1.5).fill_opacity(0.4),
        };

        let style = rule.apply(&props(json!(1)));
        assert_eq!(style.fill_color.as_deref(), Some("#ffffff"));
        assert_eq!(style.weight, Some(1.5));

        let style = rule.apply(&props(json!("0")));
        assert_eq!(style.fill_color.as_deref(), Some("#000000"));

        let style = rule.apply(&props(Value::Null));
        assert_eq!(style.fill_color, None);
    }

    #[test]
    fn test_path_style_serializes_camel_case() {
        let style = PathStyle::new().fill_color("black").color("none").fill_opacity(0.65);
        let value = serde_json::to_value(&style).unwrap();
        assert_eq!(
            value,
            json!({"color": "none", "fillColor": "black", "fillOpacity": 0.65})
        );
    }

    #[test]
    fn test_tooltip_escapes_and_skips_null() {
        let tooltip = Tooltip::new("nome", "Rio:");
        let mut properties = Properties::new();
        properties.insert("nome".into(), json!("Rio <Caí> & cia"));
        assert_eq!(
            tooltip.render(&properties).as_deref(),
            Some("<b>Rio:</b> Rio &lt;Caí&gt; &amp; cia")
        );

        properties.insert("nome".into(), Value::Null);
        assert_eq!(tooltip.render(&properties), None);
        assert_eq!(tooltip.render(&Properties::new()), None);
    }
}
