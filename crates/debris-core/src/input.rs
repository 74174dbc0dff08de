//! Per-tick input snapshots.
//!
//! The host polls its devices once per frame and hands the session an
//! [`InputFrame`]. The session keeps the previous frame so edges can be
//! detected with [`InputEdges`].

use bitflags::bitflags;
use glam::Vec2;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Digital actions held during a frame.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Actions: u16 {
        /// Move along the ship's heading.
        const FORWARD = 1 << 0;
        /// Move against the ship's heading.
        const BACK = 1 << 1;
        /// Strafe to the ship's left.
        const STRAFE_LEFT = 1 << 2;
        /// Strafe to the ship's right.
        const STRAFE_RIGHT = 1 << 3;
        /// Climb.
        const ASCEND = 1 << 4;
        /// Sink.
        const DESCEND = 1 << 5;
        /// Primary trigger.
        const FIRE = 1 << 6;
        /// Toggle pause while running.
        const PAUSE = 1 << 7;
        /// Advance screens and continue after a round.
        const CONFIRM = 1 << 8;
        /// Leave the game.
        const QUIT = 1 << 9;
    }
}

/// Screen point the host warps the pointer back to after every frame.
pub const POINTER_CENTER: Vec2 = Vec2::new(290.0, 240.0);

/// Input snapshot for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    /// Actions held this tick.
    #[serde(default)]
    pub actions: Actions,
    /// Look delta: `x` turns the heading, `y` tilts the aim.
    #[serde(default)]
    pub look: Vec2,
}

impl InputFrame {
    /// Creates a frame with the given actions and no look delta.
    #[must_use]
    pub const fn new(actions: Actions) -> Self {
        Self {
            actions,
            look: Vec2::ZERO,
        }
    }

    /// Returns this frame with the look delta replaced.
    #[must_use]
    pub const fn with_look(mut self, look: Vec2) -> Self {
        self.look = look;
        self
    }

    /// Converts an absolute pointer position into a look delta relative to
    /// the point the host re-centers the pointer on every frame.
    ///
    /// Moving the pointer left turns left (positive `x`), moving it down
    /// tilts the aim down (positive `y`).
    ///
    /// ```
    /// use debris_core::input::{InputFrame, POINTER_CENTER};
    /// use glam::Vec2;
    ///
    /// let look = InputFrame::look_from_pointer(Vec2::new(280.0, 250.0), POINTER_CENTER);
    /// assert_eq!(look, Vec2::new(10.0, 10.0));
    /// ```
    #[must_use]
    pub fn look_from_pointer(pointer: Vec2, center: Vec2) -> Vec2 {
        Vec2::new(center.x - pointer.x, pointer.y - center.y)
    }

    /// Returns true if every action in `action` is held.
    #[must_use]
    pub const fn held(&self, action: Actions) -> bool {
        self.actions.contains(action)
    }
}

/// Previous and current snapshots, for edge detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEdges<'a> {
    /// Snapshot from the immediately prior tick.
    pub previous: &'a InputFrame,
    /// Snapshot for this tick.
    pub current: &'a InputFrame,
}

impl<'a> InputEdges<'a> {
    /// Pairs two snapshots.
    #[must_use]
    pub const fn new(previous: &'a InputFrame, current: &'a InputFrame) -> Self {
        Self { previous, current }
    }

    /// Up last tick, down this tick.
    #[must_use]
    pub const fn pressed(&self, action: Actions) -> bool {
        !self.previous.held(action) && self.current.held(action)
    }

    /// Down last tick, up this tick.
    #[must_use]
    pub const fn released(&self, action: Actions) -> bool {
        self.previous.held(action) && !self.current.held(action)
    }
}
