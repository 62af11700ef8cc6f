//! Color handling for Corkboard layouts
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, so category and sticky colors can be given as CSS
//! strings in board files and configuration.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::DynamicColor;

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a CSS color string such as "#ffe066",
    /// "rgb(255, 0, 0)" or "teal".
    ///
    /// # Examples
    ///
    /// ```
    /// use corkboard_core::color::Color;
    ///
    /// let yellow = Color::new("#ffe066").unwrap();
    /// let teal = Color::new("teal").unwrap();
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Creates a new color with the specified alpha value.
    ///
    /// # Examples
    ///
    /// ```
    /// use corkboard_core::color::Color;
    ///
    /// let faded = Color::new("black").unwrap().with_alpha(0.18);
    /// assert_eq!(faded.alpha(), 0.18);
    /// ```
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha component, between 0.0 and 1.0.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("#222").expect("'#222' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

impl From<Color> for svg::node::Value {
    fn from(color: Color) -> Self {
        Self::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#3b82f6").is_ok());
        assert!(Color::new("lightblue").is_ok());

        let err = Color::new("corkboard").unwrap_err();
        assert!(err.contains("corkboard"));
    }

    #[test]
    fn test_color_default_is_ink() {
        let ink = Color::default();
        assert_eq!(ink, Color::new("#222").unwrap());
        assert_eq!(ink.alpha(), 1.0);
    }

    #[test]
    fn test_with_alpha_keeps_hue() {
        let green = Color::new("#22c55e").unwrap();
        let faded = green.with_alpha(0.5);

        assert_eq!(faded.alpha(), 0.5);
        assert_ne!(green, faded);
    }

    #[test]
    fn test_svg_value_conversion() {
        let color = Color::new("red").unwrap();
        let value: svg::node::Value = (&color).into();
        assert_eq!(value.to_string(), color.to_string());
    }
}
