/// The fixed fruit catalog: kinds, colours, letters and sampling.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::ConfigError;

/// A plain RGB triple so the core stays free of any rendering crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const RED: Rgb = Rgb(220, 20, 60);
pub const YELLOW: Rgb = Rgb(255, 255, 0);
pub const ORANGE: Rgb = Rgb(255, 165, 0);
pub const PURPLE: Rgb = Rgb(128, 0, 128);

/// Drawn in the kind's colour when its own glyph cannot be shown.
pub const PLACEHOLDER_GLYPH: &str = "●";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FruitKind {
    Apple,
    Banana,
    Mango,
    Grape,
    Orange,
    Strawberry,
}

impl FruitKind {
    /// Catalog order.  Smaller catalogs take a prefix of this list.
    pub const ALL: [FruitKind; 6] = [
        FruitKind::Apple,
        FruitKind::Banana,
        FruitKind::Mango,
        FruitKind::Grape,
        FruitKind::Orange,
        FruitKind::Strawberry,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FruitKind::Apple => "Apple",
            FruitKind::Banana => "Banana",
            FruitKind::Mango => "Mango",
            FruitKind::Grape => "Grape",
            FruitKind::Orange => "Orange",
            FruitKind::Strawberry => "Strawberry",
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            FruitKind::Apple | FruitKind::Strawberry => RED,
            FruitKind::Banana => YELLOW,
            FruitKind::Mango | FruitKind::Orange => ORANGE,
            FruitKind::Grape => PURPLE,
        }
    }

    /// The fixed matching letter used by the kind-letter spawn variants.
    pub fn letter(self) -> char {
        match self {
            FruitKind::Apple => 'A',
            FruitKind::Banana => 'B',
            FruitKind::Mango => 'M',
            FruitKind::Grape => 'G',
            FruitKind::Orange => 'O',
            FruitKind::Strawberry => 'S',
        }
    }

    /// Picture of the fruit.  Two cells wide on most terminals.
    pub fn glyph(self) -> &'static str {
        match self {
            FruitKind::Apple => "🍎",
            FruitKind::Banana => "🍌",
            FruitKind::Mango => "🥭",
            FruitKind::Grape => "🍇",
            FruitKind::Orange => "🍊",
            FruitKind::Strawberry => "🍓",
        }
    }
}

/// How fruit are drawn: their own pictures, or the placeholder for
/// terminals that cannot show them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlyphSet {
    Pictures,
    Placeholder,
}

impl GlyphSet {
    pub fn sprite(self, kind: FruitKind) -> &'static str {
        match self {
            GlyphSet::Pictures => kind.glyph(),
            GlyphSet::Placeholder => PLACEHOLDER_GLYPH,
        }
    }
}

/// The active subset of fruit kinds for a game.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    kinds: Vec<FruitKind>,
}

impl Catalog {
    pub fn new(size: usize) -> Result<Catalog, ConfigError> {
        if size == 0 || size > FruitKind::ALL.len() {
            return Err(ConfigError::CatalogSize {
                requested: size,
                available: FruitKind::ALL.len(),
            });
        }
        Ok(Catalog {
            kinds: FruitKind::ALL[..size].to_vec(),
        })
    }

    pub fn kinds(&self) -> &[FruitKind] {
        &self.kinds
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Draw `n` distinct kinds uniformly without replacement.
    pub fn sample(&self, n: usize, rng: &mut impl Rng) -> Result<Vec<FruitKind>, ConfigError> {
        if n > self.kinds.len() {
            return Err(ConfigError::SampleTooLarge {
                requested: n,
                available: self.kinds.len(),
            });
        }
        Ok(self.kinds.choose_multiple(rng, n).copied().collect())
    }
}
