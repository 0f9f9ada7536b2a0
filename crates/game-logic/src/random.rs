//! Seeded pseudo-random number generator
//!
//! Deterministic PRNG for reproducible games.
//! Uses a simple but effective xorshift algorithm.

/// Seeded random number generator
///
/// Deterministic: same seed = same sequence = same game
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a new RNG from a 64-bit seed
    pub fn new(seed: u64) -> Self {
        // splitmix64 scramble so small or zero seeds still start well mixed
        let mut state = seed.wrapping_add(0x9e3779b97f4a7c15);
        state = (state ^ (state >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        state = (state ^ (state >> 27)).wrapping_mul(0x94d049bb133111eb);
        state ^= state >> 31;

        // xorshift state must never be zero
        Self { state: state | 1 }
    }

    /// Generate next u64
    pub fn next_u64(&mut self) -> u64 {
        // xorshift64*
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545f4914f6cdd1d)
    }

    /// Generate next u32
    pub fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    /// Generate a value 0-99 (for percentage checks)
    pub fn next_percent(&mut self) -> u8 {
        (self.next_u32() % 100) as u8
    }

    /// Generate a value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }
}
