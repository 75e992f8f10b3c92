//! Stroke definitions for connection lines.

use crate::color::Color;

/// Line pattern of an edge stroke.
///
/// Maps onto SVG `stroke-dasharray` / `stroke-width`:
/// - `Solid`: no dasharray
/// - `Dashed`: "5,5"
/// - `Dotted`: "2,3"
/// - `Bold`: no dasharray, doubled width
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrokeStyle {
    /// Solid continuous line (default).
    #[default]
    Solid,
    /// Dashed line.
    Dashed,
    /// Dotted line.
    Dotted,
    /// Solid line drawn at double width.
    Bold,
}

impl StrokeStyle {
    /// SVG `stroke-dasharray` value, if this style is patterned.
    pub fn dash_array(self) -> Option<&'static str> {
        match self {
            StrokeStyle::Solid | StrokeStyle::Bold => None,
            StrokeStyle::Dashed => Some("5,5"),
            StrokeStyle::Dotted => Some("2,3"),
        }
    }

    fn width_factor(self) -> f32 {
        match self {
            StrokeStyle::Bold => 2.0,
            _ => 1.0,
        }
    }
}

/// Complete stroke description: color, base width and pattern.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    base_width: f32,
    style: StrokeStyle,
}

impl StrokeDefinition {
    pub fn new(color: Color, base_width: f32, style: StrokeStyle) -> Self {
        Self {
            color,
            base_width,
            style,
        }
    }

    pub fn color(&self) -> &Color {
        &self.color
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    /// Effective SVG `stroke-width`, accounting for bold strokes.
    pub fn width(&self) -> f32 {
        self.base_width * self.style.width_factor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_arrays() {
        assert_eq!(StrokeStyle::Solid.dash_array(), None);
        assert_eq!(StrokeStyle::Bold.dash_array(), None);
        assert_eq!(StrokeStyle::Dashed.dash_array(), Some("5,5"));
        assert_eq!(StrokeStyle::Dotted.dash_array(), Some("2,3"));
    }

    #[test]
    fn test_bold_doubles_width() {
        let color = Color::default();
        let solid = StrokeDefinition::new(color.clone(), 1.5, StrokeStyle::Solid);
        let bold = StrokeDefinition::new(color, 1.5, StrokeStyle::Bold);

        assert_eq!(solid.width(), 1.5);
        assert_eq!(bold.width(), 3.0);
    }

    #[test]
    fn test_default_is_solid_black() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.style(), StrokeStyle::Solid);
        assert_eq!(stroke.color(), &Color::default());
    }
}
