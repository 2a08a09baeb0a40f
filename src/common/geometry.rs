use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self { Self { x, y } }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    pub fn min(&self) -> Point { self.origin }

    pub fn max(&self) -> Point {
        Point {
            x: self.origin.x + self.size.width,
            y: self.origin.y + self.size.height,
        }
    }

    pub fn mid(&self) -> Point {
        Point {
            x: self.origin.x + self.size.width / 2.0,
            y: self.origin.y + self.size.height / 2.0,
        }
    }

    /// A rect the layout cannot meaningfully tile into.
    pub fn is_degenerate(&self) -> bool { self.size.width <= 0.0 || self.size.height <= 0.0 }

    /// Shrinks the rect by `amount` on every side, clamping at zero size.
    pub fn inset(&self, amount: f64) -> Rect {
        Rect {
            origin: Point {
                x: self.origin.x + amount,
                y: self.origin.y + amount,
            },
            size: Size {
                width: (self.size.width - 2.0 * amount).max(0.0),
                height: (self.size.height - 2.0 * amount).max(0.0),
            },
        }
    }
}

pub trait Round {
    fn round(self) -> Self;
}

impl Round for Rect {
    fn round(self) -> Self {
        Rect {
            origin: Point {
                x: self.origin.x.round(),
                y: self.origin.y.round(),
            },
            size: Size {
                width: self.size.width.round(),
                height: self.size.height.round(),
            },
        }
    }
}
