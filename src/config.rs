/// Compile-time tuning constants and the per-mode game presets.

use std::time::Duration;

use thiserror::Error;

use crate::catalog::FruitKind;
use crate::spawner::{LetterPolicy, SpawnPolicy};

// ── Field & frame ─────────────────────────────────────────────────────────────

/// Logical play-field size.  The renderer scales this to the terminal.
pub const FIELD_WIDTH: f32 = 900.0;
pub const FIELD_HEIGHT: f32 = 600.0;
pub const FPS: u64 = 60;

// ── Round rules ───────────────────────────────────────────────────────────────

pub const ROUND_SECONDS: u64 = 40;
pub const LONG_ROUND_SECONDS: u64 = 50;
pub const MAX_MISSES: u32 = 3;
pub const MAX_LEVEL: u32 = 5;
pub const BASE_HITS: u32 = 5;
pub const HITS_STEP: u32 = 1;

// ── Containers ────────────────────────────────────────────────────────────────

pub const BOX_WIDTH: f32 = 120.0;
pub const BOX_HEIGHT: f32 = 150.0;
pub const BOX_GAP: f32 = 20.0;

// ── Falling fruit ─────────────────────────────────────────────────────────────

pub const BASE_FALL_SPEED: f32 = 1.2;
pub const FALL_SPEED_STEP: f32 = 0.1;
pub const BATCH_SIZE: usize = 3;
pub const MIN_SPAWN_SEPARATION: f32 = 80.0;
/// Leftmost spawn x.
pub const SPAWN_MIN_X: f32 = 50.0;
/// Rightmost spawn x is `FIELD_WIDTH - SPAWN_MARGIN_RIGHT`.
pub const SPAWN_MARGIN_RIGHT: f32 = 120.0;
/// Fruit enter from just above the top edge.
pub const SPAWN_Y: f32 = -80.0;
/// Maximum extra upward offset for staggered batches.
pub const SPAWN_STAGGER: f32 = 200.0;
/// Frames a cut fruit keeps floating upward before it disappears.
pub const CUT_FRAMES: u32 = 12;
pub const CUT_RISE: f32 = 2.0;

// ── Errors ────────────────────────────────────────────────────────────────────

/// A configuration that can never produce a playable game.  Raised at
/// startup; there is no recovery.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("catalog size {requested} is outside 1..={available}")]
    CatalogSize { requested: usize, available: usize },
    #[error("cannot sample {requested} distinct fruit from a catalog of {available}")]
    SampleTooLarge { requested: usize, available: usize },
    #[error("spawn span {span} is too narrow for {batch} fruit spaced {separation} apart")]
    SpawnSpanTooNarrow {
        span: f32,
        batch: usize,
        separation: f32,
    },
    #[error("{0} must be at least 1")]
    Zero(&'static str),
}

// ── Presets ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
    /// Three fruit at a time, each kind with its own letter.
    Classic,
    /// Three staggered fruit with random letters.
    Typing,
    /// One fruit at a time, only kinds whose box still has room.
    Falling,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub mode: GameMode,
    pub catalog_size: usize,
    pub spawn: SpawnPolicy,
    pub round_budget: Duration,
    pub max_misses: u32,
    pub base_fall_speed: f32,
    pub speed_step: f32,
    pub base_hits: u32,
    pub hits_step: u32,
    pub max_level: u32,
    pub min_separation: f32,
    pub field_width: f32,
    pub field_height: f32,
}

impl GameConfig {
    pub fn for_mode(mode: GameMode) -> GameConfig {
        let (spawn, seconds) = match mode {
            GameMode::Classic => (
                SpawnPolicy::Batch {
                    size: BATCH_SIZE,
                    letters: LetterPolicy::KindLetter,
                    stagger: 0.0,
                },
                ROUND_SECONDS,
            ),
            GameMode::Typing => (
                SpawnPolicy::Batch {
                    size: BATCH_SIZE,
                    letters: LetterPolicy::RandomLetter,
                    stagger: SPAWN_STAGGER,
                },
                ROUND_SECONDS,
            ),
            GameMode::Falling => (SpawnPolicy::Single, LONG_ROUND_SECONDS),
        };
        GameConfig {
            mode,
            catalog_size: 5,
            spawn,
            round_budget: Duration::from_secs(seconds),
            max_misses: MAX_MISSES,
            base_fall_speed: BASE_FALL_SPEED,
            speed_step: FALL_SPEED_STEP,
            base_hits: BASE_HITS,
            hits_step: HITS_STEP,
            max_level: MAX_LEVEL,
            min_separation: MIN_SPAWN_SEPARATION,
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
        }
    }

    /// A single missed fruit ends the round.
    pub fn strict(self) -> GameConfig {
        GameConfig {
            max_misses: 1,
            ..self
        }
    }

    pub fn spawn_min_x(&self) -> f32 {
        SPAWN_MIN_X
    }

    pub fn spawn_max_x(&self) -> f32 {
        self.field_width - SPAWN_MARGIN_RIGHT
    }

    /// Check every invariant the engine relies on.  Call once at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog_size == 0 || self.catalog_size > FruitKind::ALL.len() {
            return Err(ConfigError::CatalogSize {
                requested: self.catalog_size,
                available: FruitKind::ALL.len(),
            });
        }
        if self.base_hits == 0 {
            return Err(ConfigError::Zero("base_hits"));
        }
        if self.max_misses == 0 {
            return Err(ConfigError::Zero("max_misses"));
        }
        if self.max_level == 0 {
            return Err(ConfigError::Zero("max_level"));
        }
        if let SpawnPolicy::Batch { size, .. } = self.spawn {
            if size == 0 {
                return Err(ConfigError::Zero("batch size"));
            }
            if size > self.catalog_size {
                return Err(ConfigError::SampleTooLarge {
                    requested: size,
                    available: self.catalog_size,
                });
            }
            // Each placed fruit blocks an interval of 2 * separation; the
            // last one must still find room.
            let span = self.spawn_max_x() - self.spawn_min_x();
            if span <= (size - 1) as f32 * 2.0 * self.min_separation {
                return Err(ConfigError::SpawnSpanTooNarrow {
                    span,
                    batch: size,
                    separation: self.min_separation,
                });
            }
        }
        Ok(())
    }
}
