use std::ops::Add;

/// 2D vector with f32 coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn half(self) -> Self {
        Self {
            x: self.x / 2.0,
            y: self.y / 2.0,
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

/// 2D point with f32 coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add<Vec2> for Point {
    type Output = Point;

    fn add(self, offset: Vec2) -> Point {
        Point::new(self.x + offset.x, self.y + offset.y)
    }
}

/// Empty space kept around a node inside its grid cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Margins {
    /// Same margin on every side
    pub fn uniform(margin: f32) -> Self {
        Self {
            left: margin,
            top: margin,
            right: margin,
            bottom: margin,
        }
    }

    /// Total horizontal and vertical space taken by the margins
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.left + self.right, self.top + self.bottom)
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(5.0)
    }
}
