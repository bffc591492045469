/// Round state machine: clock, misses, win/lose transitions, and the
/// reset / next-level commands that start a fresh round.
///
/// `Lost` and `WonLevel` are terminal: every transition method is a no-op
/// once the round has left `Playing`, until `reset` or `advance_level`
/// builds a new round.

use std::time::Duration;

use log::info;
use rand::Rng;

use crate::catalog::Catalog;
use crate::config::{GameConfig, BOX_GAP, BOX_WIDTH};
use crate::entities::{Container, Cue, GameState, LossReason, RoundState, RoundStatus};
use crate::spawner::spawn;

impl RoundState {
    pub fn new(level: u32, budget: Duration) -> RoundState {
        RoundState {
            score: 0,
            elapsed: Duration::ZERO,
            budget,
            misses: 0,
            level,
            status: RoundStatus::Playing,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.status == RoundStatus::Playing
    }

    /// Whole seconds left on the countdown, as shown on the HUD.
    pub fn time_left(&self) -> u64 {
        self.budget.as_secs().saturating_sub(self.elapsed.as_secs())
    }

    /// Add `dt` of play time.  Returns `true` if this ran the clock out.
    pub fn advance_clock(&mut self, dt: Duration) -> bool {
        if !self.is_playing() {
            return false;
        }
        self.elapsed += dt;
        if self.elapsed >= self.budget {
            return self.lose(LossReason::TimeUp);
        }
        false
    }

    pub fn record_hit(&mut self) {
        if self.is_playing() {
            self.score += 1;
        }
    }

    /// Count one missed fruit.  Returns `true` if this was the last allowed.
    pub fn record_miss(&mut self, max_misses: u32) -> bool {
        if !self.is_playing() {
            return false;
        }
        self.misses += 1;
        if self.misses >= max_misses {
            return self.lose(LossReason::TooManyMisses);
        }
        false
    }

    /// Returns `true` if the round was playing and is now lost.
    pub fn lose(&mut self, reason: LossReason) -> bool {
        if !self.is_playing() {
            return false;
        }
        info!("round lost: {} (score {})", reason, self.score);
        self.status = RoundStatus::Lost(reason);
        true
    }

    /// Returns `true` if the round was playing and is now won.
    pub fn win(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        info!("level {} complete (score {})", self.level, self.score);
        self.status = RoundStatus::WonLevel;
        true
    }
}

/// Hits each box needs on `level` (1-based).
pub fn required_hits(config: &GameConfig, level: u32) -> u32 {
    config.base_hits + level.saturating_sub(1) * config.hits_step
}

/// Empty boxes for every catalog kind, centred along the bottom of the field.
pub fn build_containers(config: &GameConfig, catalog: &Catalog, level: u32) -> Vec<Container> {
    let n = catalog.len() as f32;
    let row_width = n * BOX_WIDTH + (n - 1.0).max(0.0) * BOX_GAP;
    let start_x = ((config.field_width - row_width) / 2.0).max(0.0);
    let required = required_hits(config, level);
    catalog
        .kinds()
        .iter()
        .enumerate()
        .map(|(i, &kind)| Container {
            kind,
            hits: 0,
            required,
            x: start_x + i as f32 * (BOX_WIDTH + BOX_GAP),
        })
        .collect()
}

/// A fresh round on `level`: empty boxes, base speed, full clock, first wave
/// already on its way.  The new state carries `Cue::MusicStart`.
pub fn start_round(
    config: GameConfig,
    catalog: Catalog,
    level: u32,
    score: u32,
    rng: &mut impl Rng,
) -> GameState {
    let containers = build_containers(&config, &catalog, level);
    let fruits = spawn(&config, &catalog, &containers, rng);
    let mut round = RoundState::new(level, config.round_budget);
    round.score = score;
    info!(
        "starting {:?} level {} ({} hits per box)",
        config.mode,
        level,
        required_hits(&config, level)
    );
    GameState {
        fall_speed: config.base_fall_speed,
        config,
        catalog,
        round,
        containers,
        fruits,
        frame: 0,
        cues: vec![Cue::MusicStart],
    }
}

// ── External commands ─────────────────────────────────────────────────────────

/// Start over from level 1 with score 0.  Valid from any status.
pub fn reset(state: &GameState, rng: &mut impl Rng) -> GameState {
    start_round(state.config.clone(), state.catalog.clone(), 1, 0, rng)
}

pub fn is_final_level(state: &GameState) -> bool {
    state.round.level >= state.config.max_level
}

/// Move on after a won level, keeping the score.  `None` unless the round is
/// won and a further level exists.
pub fn advance_level(state: &GameState, rng: &mut impl Rng) -> Option<GameState> {
    if state.round.status != RoundStatus::WonLevel || is_final_level(state) {
        return None;
    }
    Some(start_round(
        state.config.clone(),
        state.catalog.clone(),
        state.round.level + 1,
        state.round.score,
        rng,
    ))
}
