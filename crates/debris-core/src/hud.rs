//! Heads-up display and result banners as plain data.
//!
//! The core never touches fonts or sprites. It hands the renderer a [`Hud`]
//! snapshot and the renderer decides how to lay the strings out.

use serde::{Deserialize, Serialize};

use crate::session::GameState;

/// Prompt shown after a won level.
pub const CONTINUE_PROMPT: &str = "Press Enter to begin the next level";

/// Prompt shown after a lost level.
pub const PLAY_AGAIN_PROMPT: &str = "Press Enter to play again or Esc to quit";

/// Fuel units per pixel of the fuel bar.
const FUEL_PER_BAR_PIXEL: i32 = 5;

/// Snapshot of the session numbers the overlay shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    /// Fuel left; may be zero or negative on the frame the level is lost.
    pub fuel_remaining: i32,
    /// Wages earned so far.
    pub score: i32,
    /// Current level, starting at 1.
    pub level: i32,
}

/// Three lines of centered text on the won and lost screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    /// Headline, drawn green on a win and red on a loss.
    pub headline: String,
    /// Wages line.
    pub wages: String,
    /// What Enter does next.
    pub prompt: String,
}

impl Hud {
    /// Width of the fuel bar in pixels; never negative.
    #[must_use]
    pub fn fuel_bar_width(&self) -> i32 {
        (self.fuel_remaining / FUEL_PER_BAR_PIXEL).max(0)
    }

    /// The pay counter, e.g. `Pay: $150`.
    #[must_use]
    pub fn pay_label(&self) -> String {
        format!("Pay: ${}", self.score)
    }

    /// Result banner for the won and lost screens, `None` otherwise.
    #[must_use]
    pub fn banner(&self, state: GameState) -> Option<Banner> {
        match state {
            GameState::Won => Some(Banner {
                headline: format!("Level {} complete!", self.level),
                wages: format!("Today's wages so far: ${}", self.score),
                prompt: CONTINUE_PROMPT.to_string(),
            }),
            GameState::Lost => Some(Banner {
                headline: format!("Level {} failed!", self.level),
                wages: format!("Today's total wages: ${}", self.score),
                prompt: PLAY_AGAIN_PROMPT.to_string(),
            }),
            GameState::Start | GameState::Instruction | GameState::Controls | GameState::Running => {
                None
            }
        }
    }
}
