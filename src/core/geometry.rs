//! Points and axis-aligned bounds in world coordinates.
//!
//! World coordinates use points with the origin at the bottom-left of the
//! viewport and y growing upward.

/// A position in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle. `x`/`y` is the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build bounds of the given size centred on `center`.
    pub fn centered(center: Point, width: f32, height: f32) -> Self {
        Self::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            width,
            height,
        )
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Point-in-bounds hit test. Edges count as inside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.top()
    }

    /// True when the two rectangles overlap or touch.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.top()
            && other.y <= self.top()
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// The size of the logical viewport in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Point at the given fractions of width and height.
    pub fn at(&self, fx: f32, fy: f32) -> Point {
        Point::new(self.width * fx, self.height * fy)
    }

    /// Bounds for an interactive region described as
    /// `(centre x fraction, centre y fraction, width, height)`.
    pub fn region(&self, spec: (f32, f32, f32, f32)) -> Bounds {
        let (fx, fy, w, h) = spec;
        Bounds::centered(self.at(fx, fy), w, h)
    }
}
