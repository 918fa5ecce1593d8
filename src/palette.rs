use rand::Rng;

use crate::{
    core::Rgb8,
    error::{WallforgeError, WallforgeResult},
};

pub const COLORS_PER_PALETTE: usize = 4;

/// Hand-curated palettes (soft pastels, duotones, cyber gradients).
const BUILTIN: &[(&str, [&str; COLORS_PER_PALETTE])] = &[
    ("soft_sunset", ["#F9C4B4", "#F8A5C2", "#E07AAE", "#C05A9C"]),
    ("ocean_dream", ["#7ED6DF", "#26C6DA", "#00ACC1", "#008C9E"]),
    ("cyber_purple", ["#9D50BB", "#B16CE5", "#C780FA", "#D5A6F4"]),
    ("morning_light", ["#FFEAA7", "#F6E58D", "#F9CA24", "#F0932B"]),
    ("neon_twilight", ["#667eea", "#764ba2", "#8b5cf6", "#d946ef"]),
    ("mint_frost", ["#a8e6cf", "#dcedc1", "#ffd5c2", "#ffaaa5"]),
];

/// Immutable name -> colors catalog, fixed at construction.
#[derive(Clone, Debug)]
pub struct PaletteCatalog {
    palettes: Vec<(&'static str, [Rgb8; COLORS_PER_PALETTE])>,
}

impl PaletteCatalog {
    /// Builds the catalog from the built-in hex tables.
    pub fn builtin() -> WallforgeResult<Self> {
        let mut palettes = Vec::with_capacity(BUILTIN.len());
        for (name, hex) in BUILTIN {
            let mut colors = [Rgb8::new(0, 0, 0); COLORS_PER_PALETTE];
            for (slot, raw) in colors.iter_mut().zip(hex) {
                *slot = Rgb8::from_hex(raw)?;
            }
            palettes.push((*name, colors));
        }
        Ok(Self { palettes })
    }

    /// Palette names in curated order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.palettes.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    pub fn get(&self, name: &str) -> WallforgeResult<&[Rgb8; COLORS_PER_PALETTE]> {
        self.palettes
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, colors)| colors)
            .ok_or_else(|| WallforgeError::unknown_palette(name))
    }

    /// Picks a palette name uniformly at random.
    pub fn sample_name(&self, rng: &mut impl Rng) -> &'static str {
        self.palettes[rng.gen_range(0..self.palettes.len())].0
    }

    /// Draws one color uniformly from the named palette, or from a uniformly
    /// chosen palette when no name is given.
    pub fn sample_color(&self, rng: &mut impl Rng, palette: Option<&str>) -> WallforgeResult<Rgb8> {
        let colors = match palette {
            Some(name) => self.get(name)?,
            None => &self.palettes[rng.gen_range(0..self.palettes.len())].1,
        };
        Ok(colors[rng.gen_range(0..colors.len())])
    }
}
