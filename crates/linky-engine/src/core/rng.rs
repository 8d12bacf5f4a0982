//! Seedable pseudo-random number generator (xorshift64).
//! Deterministic and fast; not suitable for anything security-related.

#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed },
        }
    }

    /// Seed from a host-provided float in [0, 1), e.g. `Math.random()`.
    pub fn from_unit(value: f64) -> Self {
        let clamped = if value.is_finite() { value.abs().fract() } else { 0.0 };
        Self::new((clamped * u64::MAX as f64) as u64)
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate a random number in [0, upper_bound).
    pub fn next_int(&mut self, upper_bound: u32) -> u32 {
        (self.next_u64() % upper_bound.max(1) as u64) as u32
    }
}
