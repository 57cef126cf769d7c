//! Backend-free window events

/// Keyboard keys the library reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape key
    Escape,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Space bar
    Space,
    /// Enter / Return
    Enter,
    /// Any key without a dedicated variant
    Unknown,
}

/// Events produced by [`Window::poll_event`](crate::window::Window::poll_event)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The user asked to close the window
    Closed,
    /// The client area was resized
    Resized {
        /// New width in pixels
        width: u32,
        /// New height in pixels
        height: u32,
    },
    /// A key went down (or auto-repeated)
    KeyPressed {
        /// Which key
        code: Key,
    },
    /// A key went up
    KeyReleased {
        /// Which key
        code: Key,
    },
    /// The cursor moved inside the window
    MouseMoved {
        /// Horizontal position in window coordinates
        x: i32,
        /// Vertical position in window coordinates
        y: i32,
    },
}
