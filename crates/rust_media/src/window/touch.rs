//! Real-time touch queries

use crate::foundation::math::Vector2i;
use crate::native::touch;

/// Anything with a desktop position, used as a coordinate origin
pub trait WindowBase {
    /// Position of the client area's top-left corner on the desktop
    fn position(&self) -> Vector2i;
}

/// Stateless access to the touch table
///
/// All queries are safe to call at any time, from any thread, with or
/// without a [`Context`](crate::native::Context).
#[derive(Debug, Clone, Copy)]
pub struct Touch;

impl Touch {
    /// Whether `finger` is currently touching
    pub fn is_down(finger: u32) -> bool {
        touch::is_down(finger)
    }

    /// Current position of `finger` in desktop coordinates
    pub fn position(finger: u32) -> Vector2i {
        let (x, y) = touch::position(finger);
        Vector2i::new(x, y)
    }

    /// Current position of `finger` relative to a window's client area
    ///
    /// Components saturate at the `i32` range.
    pub fn position_relative_to(finger: u32, relative_to: &dyn WindowBase) -> Vector2i {
        let (position, origin) = (Self::position(finger), relative_to.position());
        Vector2i::new(position.x.saturating_sub(origin.x), position.y.saturating_sub(origin.y))
    }
}
