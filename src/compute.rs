/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG.

use std::time::Duration;

use log::debug;
use rand::Rng;

use crate::catalog::Catalog;
use crate::config::{ConfigError, GameConfig, CUT_FRAMES, CUT_RISE};
use crate::entities::{Cue, FruitPhase, GameState, LossReason};
use crate::round::start_round;
use crate::spawner::spawn;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Validate `config` and build the level-1 state with the first wave spawned.
pub fn init_state(config: GameConfig, rng: &mut impl Rng) -> Result<GameState, ConfigError> {
    config.validate()?;
    let catalog = Catalog::new(config.catalog_size)?;
    Ok(start_round(config, catalog, 1, 0, rng))
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Apply one typed character.
///
/// Non-letters are ignored, as is any key while no fruit is falling.  A
/// letter that matches no falling fruit loses the round.
pub fn press_key(state: &GameState, key: char) -> GameState {
    let mut next = GameState {
        cues: Vec::new(),
        ..state.clone()
    };
    if !next.round.is_playing() || !key.is_ascii_alphabetic() {
        return next;
    }
    if !next.fruits.iter().any(|f| f.is_falling()) {
        return next;
    }

    let key = key.to_ascii_uppercase();
    let hit = next
        .fruits
        .iter_mut()
        .find(|f| f.is_falling() && f.letter == key);

    let kind = match hit {
        Some(fruit) => {
            fruit.phase = FruitPhase::Cut {
                frames_left: CUT_FRAMES,
            };
            fruit.kind
        }
        None => {
            debug!("key {} matched nothing", key);
            if next.round.lose(LossReason::WrongKey) {
                end_round(&mut next, Cue::GameOver);
            }
            return next;
        }
    };

    next.round.record_hit();
    next.cues.push(Cue::Cut);
    if let Some(container) = next.containers.iter_mut().find(|c| c.kind == kind) {
        if container.hits < container.required {
            container.hits += 1;
        }
        next.cues.push(Cue::Fill);
        debug!(
            "cut {:?} with {} -> box {}/{}",
            kind, key, container.hits, container.required
        );
    }

    if next.all_full() && next.round.win() {
        end_round(&mut next, Cue::LevelComplete);
    }
    next
}

// ── Per-frame tick (nearly pure, RNG is injected) ──────────────────────────

/// Advance the simulation by one frame of `dt` wall time.  All randomness
/// comes through `rng` so callers control determinism.
pub fn tick(state: &GameState, dt: Duration, rng: &mut impl Rng) -> GameState {
    let mut next = GameState {
        cues: Vec::new(),
        ..state.clone()
    };
    if !next.round.is_playing() {
        return next;
    }
    next.frame += 1;

    // ── 1. Countdown ─────────────────────────────────────────────────────────
    if next.round.advance_clock(dt) {
        end_round(&mut next, Cue::GameOver);
        return next;
    }

    // ── 2. Falling fruit move down; the bottom edge is a miss ────────────────
    let bottom = next.config.field_height;
    let speed = next.fall_speed;
    let mut missed = 0u32;
    next.fruits.retain_mut(|f| match f.phase {
        FruitPhase::Falling => {
            f.y += speed;
            if f.y > bottom {
                missed += 1;
                false
            } else {
                true
            }
        }
        // ── 3. Cut fruit float up and fade ───────────────────────────────────
        FruitPhase::Cut { frames_left } => {
            f.y -= CUT_RISE;
            let frames_left = frames_left.saturating_sub(1);
            f.phase = FruitPhase::Cut { frames_left };
            frames_left > 0
        }
    });

    for _ in 0..missed {
        next.cues.push(Cue::Miss);
        debug!("fruit missed ({} so far)", next.round.misses + 1);
        if next.round.record_miss(next.config.max_misses) {
            end_round(&mut next, Cue::GameOver);
            return next;
        }
    }

    // ── 4. Next wave once the field is clear ─────────────────────────────────
    if next.fruits.is_empty() {
        next.fruits = spawn(&next.config, &next.catalog, &next.containers, rng);
        next.fall_speed += next.config.speed_step;
        debug!("field clear, fall speed now {:.2}", next.fall_speed);
    }

    // ── 5. Win check ─────────────────────────────────────────────────────────
    if next.all_full() && next.round.win() {
        end_round(&mut next, Cue::LevelComplete);
    }

    next
}

/// The outcome cue of a round that just ended, then the music stops.
fn end_round(next: &mut GameState, outcome: Cue) {
    next.cues.push(outcome);
    next.cues.push(Cue::MusicStop);
}
