/// Knobs for one search invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Fixed number of plies searched below the root.
    pub depth: u8,
    /// Shuffle moves before ordering so equal-scoring choices vary between games.
    pub randomize: bool,
    /// Seed for the shuffle and the fallback move; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl SearchConfig {
    pub fn with_depth(depth: u8) -> Self {
        Self { depth, ..Self::default() }
    }

    /// Fixed ordering and a fixed seed, for reproducible searches.
    pub fn deterministic(depth: u8) -> Self {
        Self { depth, randomize: false, seed: Some(0) }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            randomize: true,
            seed: None,
        }
    }
}
