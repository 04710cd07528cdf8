//! Exit-on-input tracking for a single surface
//!
//! Mouse sensors report small jitter even when nobody touches the mouse, so
//! movement only counts once the pointer strays more than the tolerance from
//! where it was first seen. The first position is captured lazily on the first
//! mouse event the surface receives.

use crate::geometry::Point;
use tracing::{debug, trace};

/// What the platform should do after an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputVerdict {
    /// Keep running
    Continue,
    /// End the whole screensaver process
    Exit,
}

/// Per-surface input state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSession {
    exit_on_input: bool,
    tolerance_px: i32,
    origin: Option<Point>,
}

impl InputSession {
    /// Session for a full-screen surface: any key, any click, or movement beyond
    /// `tolerance_px` on either axis exits
    pub const fn exit_on_input(tolerance_px: i32) -> Self {
        Self {
            exit_on_input: true,
            tolerance_px,
            origin: None,
        }
    }

    /// Session for a preview surface: input never exits
    pub const fn passive() -> Self {
        Self {
            exit_on_input: false,
            tolerance_px: 0,
            origin: None,
        }
    }

    /// Whether input can end the process
    pub const fn exits_on_input(&self) -> bool {
        self.exit_on_input
    }

    /// First observed pointer position, if any mouse event arrived yet
    pub const fn origin(&self) -> Option<Point> {
        self.origin
    }

    /// A key was pressed
    pub fn on_key(&mut self) -> InputVerdict {
        self.verdict_for("key press")
    }

    /// A mouse button was pressed
    pub fn on_click(&mut self) -> InputVerdict {
        self.verdict_for("mouse click")
    }

    /// The pointer moved to `position` (surface coordinates)
    pub fn on_mouse_move(&mut self, position: Point) -> InputVerdict {
        if !self.exit_on_input {
            return InputVerdict::Continue;
        }

        let origin = *self.origin.get_or_insert_with(|| {
            trace!("Pointer baseline set to ({}, {})", position.x, position.y);
            position
        });

        let dx = (position.x - origin.x).abs();
        let dy = (position.y - origin.y).abs();
        if dx > self.tolerance_px || dy > self.tolerance_px {
            debug!(
                "Pointer moved ({dx}, {dy}) px from baseline, beyond {} px tolerance",
                self.tolerance_px
            );
            InputVerdict::Exit
        } else {
            InputVerdict::Continue
        }
    }

    fn verdict_for(&self, event: &str) -> InputVerdict {
        if self.exit_on_input {
            debug!("Exiting on {event}");
            InputVerdict::Exit
        } else {
            InputVerdict::Continue
        }
    }
}
