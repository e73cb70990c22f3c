use rand::{rngs::StdRng, seq::SliceRandom, Rng, RngCore, SeedableRng};

pub const LEHMER_MODULUS: i64 = 2_147_483_647;
pub const LEHMER_MULTIPLIER: i64 = 16_807;

/// Park-Miller minimal standard generator. The whole sequence is a function of
/// the seed, which is what lets every language project the same shuffle.
#[derive(Debug, Clone)]
pub struct LehmerRng {
    state: i64,
}

impl LehmerRng {
    /// Any seed is accepted; it is folded into `[1, LEHMER_MODULUS - 1]`.
    /// Non-positive remainders are shifted up by `LEHMER_MODULUS - 1`, so
    /// `-1` becomes `LEHMER_MODULUS - 2`.
    pub fn new(seed: i64) -> Self {
        let mut state = seed % LEHMER_MODULUS;
        if state <= 0 {
            state += LEHMER_MODULUS - 1;
        }
        // Only seeds congruent to -(LEHMER_MODULUS - 1) land here.
        if state == 0 {
            state = LEHMER_MODULUS - 1;
        }
        Self { state }
    }

    pub fn state(&self) -> i64 {
        self.state
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state * LEHMER_MULTIPLIER % LEHMER_MODULUS;
        (self.state - 1) as f64 / (LEHMER_MODULUS - 1) as f64
    }

    /// Uniform index in `0..bound`. `bound` must be non-zero.
    pub fn below(&mut self, bound: usize) -> usize {
        let index = (self.next_f64() * bound as f64).floor() as usize;
        index.min(bound - 1)
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i + 1);
            items.swap(i, j);
        }
    }
}

/// Fisher-Yates over the owned buffer; the same buffer comes back reordered.
/// Clone first if the original order is still needed.
pub fn seeded_shuffle<T>(mut items: Vec<T>, seed: i64) -> Vec<T> {
    LehmerRng::new(seed).shuffle(&mut items);
    items
}

/// Non-reproducible randomness: turn order, target draws and fresh shuffle seeds.
#[derive(Debug, Clone)]
pub struct RngState {
    rng: StdRng,
}

impl RngState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self::from_seed(rand::thread_rng().next_u64())
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    pub fn shuffle_seed(&mut self) -> i64 {
        self.rng.gen_range(1..LEHMER_MODULUS)
    }

    /// Resamples until the draw differs from `excluded`. `None` when fewer
    /// than two slots exist, since no other index could ever come up.
    pub fn index_excluding(&mut self, len: usize, excluded: usize) -> Option<usize> {
        if len <= 1 {
            return None;
        }
        loop {
            let index = self.rng.gen_range(0..len);
            if index != excluded {
                return Some(index);
            }
        }
    }
}
