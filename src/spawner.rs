/// Spawn policies: which fruit enter the field next, and where.

use log::{debug, error};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::catalog::{Catalog, FruitKind};
use crate::config::{GameConfig, SPAWN_Y};
use crate::entities::{Container, FallingFruit, FruitPhase};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LetterPolicy {
    /// Each fruit carries its kind's catalog letter.
    KindLetter,
    /// Each fruit gets a uniformly random letter `A..=Z`.
    RandomLetter,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpawnPolicy {
    /// `size` distinct kinds at once, spread horizontally.  `stagger` is the
    /// largest extra upward offset given to a fruit's start height.
    Batch {
        size: usize,
        letters: LetterPolicy,
        stagger: f32,
    },
    /// One fruit at a time, only kinds whose box is not yet full.
    Single,
}

/// Produce the next wave of fruit.  An empty result from `Single` means every
/// box is full.
pub fn spawn(
    config: &GameConfig,
    catalog: &Catalog,
    containers: &[Container],
    rng: &mut impl Rng,
) -> Vec<FallingFruit> {
    match config.spawn {
        SpawnPolicy::Batch {
            size,
            letters,
            stagger,
        } => spawn_batch(config, catalog, size, letters, stagger, rng),
        SpawnPolicy::Single => spawn_single(config, containers, rng)
            .into_iter()
            .collect(),
    }
}

fn spawn_batch(
    config: &GameConfig,
    catalog: &Catalog,
    size: usize,
    letters: LetterPolicy,
    stagger: f32,
    rng: &mut impl Rng,
) -> Vec<FallingFruit> {
    let kinds = match catalog.sample(size, rng) {
        Ok(kinds) => kinds,
        Err(e) => {
            // validate() rules this out at startup
            error!("spawn skipped: {}", e);
            return Vec::new();
        }
    };

    let mut taken: Vec<f32> = Vec::with_capacity(kinds.len());
    let mut fruits = Vec::with_capacity(kinds.len());
    for kind in kinds {
        let x = place_apart(&taken, config, rng);
        taken.push(x);
        let offset = if stagger > 0.0 {
            rng.gen_range(0.0..=stagger)
        } else {
            0.0
        };
        let letter = match letters {
            LetterPolicy::KindLetter => kind.letter(),
            LetterPolicy::RandomLetter => random_letter(rng),
        };
        fruits.push(FallingFruit {
            kind,
            letter,
            x,
            y: SPAWN_Y - offset,
            phase: FruitPhase::Falling,
        });
    }
    debug!(
        "spawned batch: {:?}",
        fruits.iter().map(|f| (f.kind, f.letter)).collect::<Vec<_>>()
    );
    fruits
}

/// One fruit of a kind whose box still has room, or `None` when all are full.
pub fn spawn_single(
    config: &GameConfig,
    containers: &[Container],
    rng: &mut impl Rng,
) -> Option<FallingFruit> {
    let open: Vec<FruitKind> = containers
        .iter()
        .filter(|c| !c.is_full())
        .map(|c| c.kind)
        .collect();
    let kind = *open.choose(rng)?;
    let x = rng.gen_range(config.spawn_min_x()..=config.spawn_max_x());
    debug!("spawned single {:?} at x={:.0}", kind, x);
    Some(FallingFruit {
        kind,
        letter: kind.letter(),
        x,
        y: SPAWN_Y,
        phase: FruitPhase::Falling,
    })
}

/// Retry uniform x positions until one is far enough from every taken slot.
/// `GameConfig::validate` guarantees such a position exists.
fn place_apart(taken: &[f32], config: &GameConfig, rng: &mut impl Rng) -> f32 {
    loop {
        let x = rng.gen_range(config.spawn_min_x()..=config.spawn_max_x());
        if taken.iter().all(|p| (x - p).abs() >= config.min_separation) {
            return x;
        }
    }
}

pub fn random_letter(rng: &mut impl Rng) -> char {
    rng.gen_range(b'A'..=b'Z') as char
}
