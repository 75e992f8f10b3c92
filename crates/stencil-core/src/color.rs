//! Color handling with CSS color support.

use std::{
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::DynamicColor;

/// Wrapper around [`DynamicColor`] from the `color` crate.
///
/// Accepts CSS color strings ("black", "#ff0000", "rgb(255, 0, 0)",
/// "transparent", ...). Edge colors and diagram backgrounds are stored as
/// this type once parsed.
#[derive(Clone, PartialEq, Debug)]
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
    /// Parse a CSS color string.
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Color { color }),
            Err(err) => Err(format!("Invalid color '{color_str}': {err}")),
        }
    }

    /// Sanitized ID-safe string for this color, usable in SVG marker ids.
    pub fn to_id_safe_string(&self) -> String {
        let color_str = self.to_string();
        let mut sanitized = color_str
            .replace('#', "hex")
            .replace(['(', ')', ',', ' ', ';', '.', '%'], "_");

        // SVG ids must start with a letter.
        if sanitized.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            sanitized = format!("c_{sanitized}");
        }

        sanitized
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

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        svg::node::Value::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_named_and_hex_colors() {
        assert!(Color::new("black").is_ok());
        assert!(Color::new("#1f77b4").is_ok());
        assert!(Color::new("rgb(10, 20, 30)").is_ok());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(Color::new("not-a-color-at-all").is_err());
    }

    #[test]
    fn test_id_safe_string_has_no_svg_hostile_chars() {
        for input in ["#ff0000", "rgb(1, 2, 3)", "black"] {
            let id = Color::new(input).unwrap().to_id_safe_string();
            assert!(
                !id.contains(['#', '(', ')', ',', ' ', ';']),
                "id '{id}' still contains hostile characters"
            );
            assert!(
                !id.chars().next().unwrap().is_ascii_digit(),
                "id '{id}' starts with a digit"
            );
        }
    }

    #[test]
    fn test_equal_colors_share_id() {
        let a = Color::new("black").unwrap();
        let b = Color::new("black").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_id_safe_string(), b.to_id_safe_string());
    }
}
