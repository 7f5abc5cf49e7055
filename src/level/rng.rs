//! Level generator RNG
//!
//! A 32-bit LCG whose output must match the published level tables
//! exactly, so it is kept separate from the `rand` generators used by the
//! simulation.

/// Multiplier/increment from Numerical Recipes
const LCG_MUL: u32 = 1_664_525;
const LCG_INC: u32 = 1_013_904_223;

#[derive(Debug, Clone)]
pub struct LevelRng {
    state: u32,
}

impl LevelRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Seed for a level index
    pub fn seed_for_level(level_index: u32) -> u32 {
        level_index.wrapping_mul(7919).wrapping_add(31337)
    }

    /// Next value in `[0, 1]`
    pub fn next_unit(&mut self) -> f64 {
        self.state = self.state.wrapping_mul(LCG_MUL).wrapping_add(LCG_INC);
        self.state as f64 / u32::MAX as f64
    }

    /// Index into a pool of `len` items
    pub fn pick(&mut self, len: usize) -> usize {
        let idx = (self.next_unit() * len as f64).floor() as usize;
        // `next_unit` can return exactly 1.0
        idx.min(len.saturating_sub(1))
    }
}
