/// All game entity types: plain data plus trivial accessors.

use std::fmt;
use std::time::Duration;

use crate::catalog::{Catalog, FruitKind};
use crate::config::GameConfig;

// ── Containers ────────────────────────────────────────────────────────────────

/// One collection box bound to a fruit kind.
#[derive(Clone, Debug, PartialEq)]
pub struct Container {
    pub kind: FruitKind,
    /// Successful hits so far, never above `required`.
    pub hits: u32,
    /// Hits needed to fill the box on the current level.
    pub required: u32,
    /// Left edge in field coordinates.
    pub x: f32,
}

impl Container {
    /// Normalised fill level in `[0, 1]`.
    pub fn fill(&self) -> f32 {
        if self.hits >= self.required {
            1.0
        } else {
            self.hits as f32 / self.required as f32
        }
    }

    pub fn is_full(&self) -> bool {
        self.hits >= self.required
    }
}

// ── Falling fruit ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FruitPhase {
    Falling,
    /// Matched; floats upward until `frames_left` reaches zero.
    Cut { frames_left: u32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct FallingFruit {
    pub kind: FruitKind,
    /// Uppercase ASCII letter that cuts this fruit.
    pub letter: char,
    pub x: f32,
    pub y: f32,
    pub phase: FruitPhase,
}

impl FallingFruit {
    pub fn is_falling(&self) -> bool {
        self.phase == FruitPhase::Falling
    }
}

// ── Round ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LossReason {
    WrongKey,
    TooManyMisses,
    TimeUp,
}

impl fmt::Display for LossReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            LossReason::WrongKey => "wrong key pressed",
            LossReason::TooManyMisses => "too many fruits missed",
            LossReason::TimeUp => "time's up",
        };
        f.write_str(reason)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundStatus {
    Playing,
    Lost(LossReason),
    WonLevel,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoundState {
    pub score: u32,
    /// Play time accumulated since the round started.
    pub elapsed: Duration,
    pub budget: Duration,
    pub misses: u32,
    /// 1-based.
    pub level: u32,
    pub status: RoundStatus,
}

// ── Presentation cues ─────────────────────────────────────────────────────────

/// Fire-and-forget notifications for the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Cut,
    Fill,
    Miss,
    GameOver,
    LevelComplete,
    /// A round began; loop the background track.
    MusicStart,
    /// The round ended; silence the background track.
    MusicStop,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub config: GameConfig,
    pub catalog: Catalog,
    pub round: RoundState,
    pub containers: Vec<Container>,
    pub fruits: Vec<FallingFruit>,
    pub fall_speed: f32,
    pub frame: u64,
    /// Cues raised by the most recent update only.
    pub cues: Vec<Cue>,
}

impl GameState {
    pub fn all_full(&self) -> bool {
        self.containers.iter().all(Container::is_full)
    }

    pub fn container_for(&self, kind: FruitKind) -> Option<&Container> {
        self.containers.iter().find(|c| c.kind == kind)
    }
}
