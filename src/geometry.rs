//! Plain 2D value types shared by the animation and its browser driver.

/// A point (or displacement) in CSS pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn length(self) -> f64 {
        self.distance(Point::ZERO)
    }
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Mul<f64> for Point {
    type Output = Point;
    fn mul(self, k: f64) -> Point {
        Point::new(self.x * k, self.y * k)
    }
}

impl std::ops::MulAssign<f64> for Point {
    fn mul_assign(&mut self, k: f64) {
        self.x *= k;
        self.y *= k;
    }
}

/// Drawable area size, re-read from the window every frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Hard-stop clamp into `[0, width] x [0, height]`.
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(p.x.clamp(0.0, self.width.max(0.0)), p.y.clamp(0.0, self.height.max(0.0)))
    }

    pub fn contains(&self, p: Point) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }
}

/// Pointer position as last reported by the browser, or absent after the
/// pointer left the document (and before the first move).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    position: Option<Point>,
}

impl PointerState {
    pub const fn absent() -> Self {
        Self { position: None }
    }

    pub const fn at(x: f64, y: f64) -> Self {
        Self { position: Some(Point::new(x, y)) }
    }

    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub fn is_present(&self) -> bool {
        self.position.is_some()
    }

    /// pointermove
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.position = Some(Point::new(x, y));
    }

    /// pointerleave
    pub fn leave(&mut self) {
        self.position = None;
    }

    /// Distance from `p` to the pointer, `None` when absent.
    pub fn distance_to(&self, p: Point) -> Option<f64> {
        self.position.map(|ptr| ptr.distance(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_euclidean() {
        assert!((Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_clamp_hard_stops_each_axis() {
        let vp = Viewport::new(100.0, 50.0);
        assert_eq!(vp.clamp(Point::new(-5.0, 70.0)), Point::new(0.0, 50.0));
        assert_eq!(vp.clamp(Point::new(20.0, 10.0)), Point::new(20.0, 10.0));
    }

    #[test]
    fn test_pointer_move_and_leave() {
        let mut p = PointerState::default();
        assert!(!p.is_present());
        p.move_to(4.0, 2.0);
        assert_eq!(p.position(), Some(Point::new(4.0, 2.0)));
        p.leave();
        assert_eq!(p.distance_to(Point::ZERO), None);
    }
}
