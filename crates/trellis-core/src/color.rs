//! Color handling for both object models
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Source documents store colors as packed ARGB values;
//! [`Color::from_argb`] turns those into colors and [`Color::to_argb`] packs them again.

use std::{
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{DynamicColor, Srgb};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_argb().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a CSS color string such as "#ff0000", "rgb(255, 0, 0)" or "red".
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// assert_eq!(red.to_argb(), 0xFFFF0000);
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Create a color from a packed `0xAARRGGBB` value.
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis_core::color::Color;
    ///
    /// let half_blue = Color::from_argb(0x800000FF);
    /// assert_eq!(half_blue.to_argb(), 0x800000FF);
    /// ```
    pub fn from_argb(argb: u32) -> Self {
        let [a, r, g, b] = argb.to_be_bytes();
        let css = format!("#{r:02x}{g:02x}{b:02x}{a:02x}");
        Self::new(&css).expect("eight-digit hex is a valid CSS color")
    }

    /// Pack this color into a `0xAARRGGBB` value.
    pub fn to_argb(self) -> u32 {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        u32::from_be_bytes([rgba.a, rgba.r, rgba.g, rgba.b])
    }

    /// Creates a new color with the specified alpha (transparency) value.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha component, between 0.0 (transparent) and 1.0 (opaque).
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::new(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#ff0000").is_ok());
        assert!(Color::new("not-a-color").is_err());
    }

    #[test]
    fn test_color_default() {
        let color = Color::default();
        assert_eq!(color.to_string(), "black");
        assert_eq!(color.to_argb(), 0xFF000000);
    }

    #[test]
    fn test_from_argb_channels() {
        let color = Color::from_argb(0xFF102030);
        assert_eq!(color.to_argb(), 0xFF102030);
        assert!((color.alpha() - 1.0).abs() < 0.001);

        let transparent = Color::from_argb(0x00FFFFFF);
        assert!(transparent.alpha().abs() < 0.001);
    }

    #[test]
    fn test_color_with_alpha() {
        let color = Color::new("red").unwrap();
        let transparent = color.with_alpha(0.5);
        assert!((transparent.alpha() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_color_serde_roundtrip() {
        let color = Color::from_argb(0xFF3366CC);
        let json = serde_json::to_string(&color).unwrap();
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_argb(), 0xFF3366CC);

        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }

    #[test]
    fn test_color_eq_hash() {
        use std::collections::HashSet;

        let color1 = Color::from_argb(0xFFFF0000);
        let color2 = Color::from_argb(0xFFFF0000);
        let color3 = Color::from_argb(0xFF0000FF);

        assert_eq!(color1, color2);
        assert_ne!(color1, color3);

        let mut set = HashSet::new();
        set.insert(color1);
        assert!(set.contains(&color2));
        assert!(!set.contains(&color3));
    }
}
