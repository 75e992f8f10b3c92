//! Basic geometric types shared by layout and export.

/// A point in 2D diagram space.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    pub fn add_point(self, other: Point) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub_point(self, other: Point) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    pub fn midpoint(self, other: Point) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    /// Bounds of a box of `size` centered on this point.
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new(
            self.x - size.width / 2.0,
            self.y - size.height / 2.0,
            self.x + size.width / 2.0,
            self.y + size.height / 2.0,
        )
    }
}

/// A width/height pair.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    /// Component-wise maximum of two sizes.
    pub fn max(self, other: Size) -> Self {
        Self::new(self.width.max(other.width), self.height.max(other.height))
    }

    pub fn add_padding(self, insets: Insets) -> Self {
        Self::new(
            self.width + insets.horizontal_sum(),
            self.height + insets.vertical_sum(),
        )
    }

    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn min_point(self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn to_size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Smallest bounds containing both `self` and `other`.
    pub fn merge(&self, other: &Self) -> Self {
        Self::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    pub fn translate(&self, offset: Point) -> Self {
        Self::new(
            self.min_x + offset.x(),
            self.min_y + offset.y(),
            self.max_x + offset.x(),
            self.max_y + offset.y(),
        )
    }

    pub fn add_padding(&self, insets: Insets) -> Self {
        Self::new(
            self.min_x - insets.left,
            self.min_y - insets.top,
            self.max_x + insets.right,
            self.max_y + insets.bottom,
        )
    }

    /// Point where the segment from the box center toward `target` crosses
    /// the box boundary.
    ///
    /// Connection paths are trimmed with this so they start and end at the
    /// border of a figure instead of its center. If `target` lies inside the
    /// box the segment never reaches the border and `target` itself is
    /// returned.
    pub fn boundary_toward(self, target: Point) -> Point {
        let center = self.center();
        let delta = target.sub_point(center);

        if delta.x() == 0.0 && delta.y() == 0.0 {
            return center;
        }

        let half_width = self.width() / 2.0;
        let half_height = self.height() / 2.0;

        // Scale factor to reach the nearest vertical or horizontal border.
        let scale_x = if delta.x() != 0.0 {
            half_width / delta.x().abs()
        } else {
            f32::INFINITY
        };
        let scale_y = if delta.y() != 0.0 {
            half_height / delta.y().abs()
        } else {
            f32::INFINITY
        };

        let scale = scale_x.min(scale_y).min(1.0);
        center.add_point(delta.scale(scale))
    }
}

/// Padding applied around a rectangular area.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn top(self) -> f32 {
        self.top
    }

    pub fn right(self) -> f32 {
        self.right
    }

    pub fn bottom(self) -> f32 {
        self.bottom
    }

    pub fn left(self) -> f32 {
        self.left
    }

    pub fn with_top(self, top: f32) -> Self {
        Self { top, ..self }
    }

    pub fn horizontal_sum(self) -> f32 {
        self.left + self.right
    }

    pub fn vertical_sum(self) -> f32 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, -4.0);

        assert_eq!(a.add_point(b), Point::new(4.0, -2.0));
        assert_eq!(b.sub_point(a), Point::new(2.0, -6.0));
        assert_eq!(a.midpoint(b), Point::new(2.0, -1.0));
        assert_eq!(b.abs(), Point::new(3.0, 4.0));
    }

    #[test]
    fn test_point_to_bounds_is_centered() {
        let bounds = Point::new(10.0, 10.0).to_bounds(Size::new(4.0, 6.0));

        assert!(approx_eq!(f32, bounds.min_x(), 8.0));
        assert!(approx_eq!(f32, bounds.max_x(), 12.0));
        assert!(approx_eq!(f32, bounds.min_y(), 7.0));
        assert!(approx_eq!(f32, bounds.max_y(), 13.0));
        assert_eq!(bounds.center(), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_size_max_and_padding() {
        let a = Size::new(10.0, 2.0);
        let b = Size::new(4.0, 8.0);

        assert_eq!(a.max(b), Size::new(10.0, 8.0));

        let padded = a.add_padding(Insets::new(1.0, 2.0, 3.0, 4.0));
        assert!(approx_eq!(f32, padded.width(), 16.0));
        assert!(approx_eq!(f32, padded.height(), 6.0));
    }

    #[test]
    fn test_bounds_merge_contains_both() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let b = Bounds::new(-5.0, 5.0, 3.0, 20.0);
        let merged = a.merge(&b);

        assert_eq!(merged, Bounds::new(-5.0, 0.0, 10.0, 20.0));
    }

    #[test]
    fn test_bounds_translate() {
        let bounds = Bounds::new(0.0, 0.0, 4.0, 4.0).translate(Point::new(2.0, -1.0));
        assert_eq!(bounds, Bounds::new(2.0, -1.0, 6.0, 3.0));
    }

    #[test]
    fn test_boundary_toward_horizontal() {
        let bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let hit = bounds.boundary_toward(Point::new(100.0, 5.0));

        assert!(approx_eq!(f32, hit.x(), 10.0));
        assert!(approx_eq!(f32, hit.y(), 5.0));
    }

    #[test]
    fn test_boundary_toward_diagonal_stays_on_border() {
        let bounds = Bounds::new(-10.0, -10.0, 10.0, 10.0);
        let hit = bounds.boundary_toward(Point::new(40.0, 20.0));

        // The steeper axis dominates; the hit must lie on the box border.
        assert!(approx_eq!(f32, hit.x(), 10.0));
        assert!(approx_eq!(f32, hit.y(), 5.0));
    }

    #[test]
    fn test_boundary_toward_interior_target() {
        let bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let hit = bounds.boundary_toward(Point::new(6.0, 6.0));

        // Target inside the box: path is trimmed to it, not past the border.
        assert_eq!(hit, Point::new(6.0, 6.0));
    }

    #[test]
    fn test_insets() {
        let insets = Insets::new(1.0, 2.0, 3.0, 4.0);
        assert!(approx_eq!(f32, insets.horizontal_sum(), 6.0));
        assert!(approx_eq!(f32, insets.vertical_sum(), 4.0));
        assert!(approx_eq!(f32, insets.with_top(9.0).top(), 9.0));

        let uniform = Insets::uniform(5.0);
        assert!(approx_eq!(f32, uniform.left(), 5.0));
        assert!(approx_eq!(f32, uniform.bottom(), 5.0));
    }
}
