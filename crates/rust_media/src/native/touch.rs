//! Process-wide touch state
//!
//! Touch queries are context-free: they may run on any thread and before
//! any resource exists. Platform layers report finger activity through
//! [`press`], [`move_to`] and [`release`]; glfw has no touch events, so on
//! desktop the table simply stays empty.

use std::sync::{PoisonError, RwLock};

/// Number of simultaneously tracked fingers
pub const MAX_FINGERS: usize = 10;

#[derive(Debug, Clone, Copy)]
struct Finger {
    down: bool,
    x: i32,
    y: i32,
}

const UP: Finger = Finger {
    down: false,
    x: 0,
    y: 0,
};

static FINGERS: RwLock<[Finger; MAX_FINGERS]> = RwLock::new([UP; MAX_FINGERS]);

fn slot(finger: u32) -> Option<usize> {
    usize::try_from(finger).ok().filter(|&index| index < MAX_FINGERS)
}

fn read(finger: u32) -> Finger {
    slot(finger).map_or(UP, |index| {
        FINGERS.read().unwrap_or_else(PoisonError::into_inner)[index]
    })
}

fn write(finger: u32, update: impl FnOnce(&mut Finger)) {
    if let Some(index) = slot(finger) {
        update(&mut FINGERS.write().unwrap_or_else(PoisonError::into_inner)[index]);
    } else {
        log::warn!("Ignoring touch event for finger {finger}, only {MAX_FINGERS} are tracked");
    }
}

/// Whether `finger` is currently touching, `false` for unknown fingers
pub fn is_down(finger: u32) -> bool {
    read(finger).down
}

/// Last desktop position of `finger`, `(0, 0)` when never seen
pub fn position(finger: u32) -> (i32, i32) {
    let state = read(finger);
    (state.x, state.y)
}

/// Report a finger touching down at a desktop position
pub fn press(finger: u32, x: i32, y: i32) {
    write(finger, |state| *state = Finger { down: true, x, y });
}

/// Report a finger moving; ignored unless the finger is down
pub fn move_to(finger: u32, x: i32, y: i32) {
    write(finger, |state| {
        if state.down {
            state.x = x;
            state.y = y;
        }
    });
}

/// Report a finger lifting; the last position is kept
pub fn release(finger: u32) {
    write(finger, |state| state.down = false);
}
