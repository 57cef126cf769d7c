//! Math utilities and types
//!
//! Vector aliases over `nalgebra` plus the plain rectangle type that
//! crosses the binding layer.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

pub use nalgebra::Vector2;

/// 2D float vector
pub type Vector2f = Vector2<f32>;

/// 2D signed integer vector
pub type Vector2i = Vector2<i32>;

/// 2D unsigned integer vector
pub type Vector2u = Vector2<u32>;

/// Axis-aligned rectangle stored as left/top/width/height
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Rect<T> {
    /// Left coordinate
    pub left: T,
    /// Top coordinate
    pub top: T,
    /// Width
    pub width: T,
    /// Height
    pub height: T,
}

/// Integer rectangle (texture areas)
pub type IntRect = Rect<i32>;

/// Float rectangle (glyph and text bounds)
pub type FloatRect = Rect<f32>;

impl<T> Rect<T>
where
    T: Copy + Add<Output = T> + Sub<Output = T> + PartialOrd + Default,
{
    /// Create a rectangle from its position and size
    pub const fn new(left: T, top: T, width: T, height: T) -> Self {
        Self { left, top, width, height }
    }

    /// Right edge (exclusive)
    pub fn right(&self) -> T {
        self.left + self.width
    }

    /// Bottom edge (exclusive)
    pub fn bottom(&self) -> T {
        self.top + self.height
    }

    /// Whether the rectangle covers no area
    pub fn is_empty(&self) -> bool {
        self.width <= T::default() || self.height <= T::default()
    }

    /// Whether the point lies inside the rectangle
    pub fn contains(&self, x: T, y: T) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }

    /// Overlapping area of two rectangles, if any
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let left = partial_max(self.left, other.left);
        let top = partial_max(self.top, other.top);
        let right = partial_min(self.right(), other.right());
        let bottom = partial_min(self.bottom(), other.bottom());

        if left < right && top < bottom {
            Some(Self::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }

    /// Smallest rectangle containing both
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let left = partial_min(self.left, other.left);
        let top = partial_min(self.top, other.top);
        let right = partial_max(self.right(), other.right());
        let bottom = partial_max(self.bottom(), other.bottom());
        Self::new(left, top, right - left, bottom - top)
    }
}

fn partial_max<T: PartialOrd>(a: T, b: T) -> T {
    if a >= b { a } else { b }
}

fn partial_min<T: PartialOrd>(a: T, b: T) -> T {
    if a <= b { a } else { b }
}
