/// Small seeded xorshift64* generator.
///
/// The simulation only needs randomness to break exact ties (two nodes on the same spot), and
/// the result must be reproducible for a given seed, so a global RNG is not an option.
#[derive(Debug, Clone)]
pub(crate) struct XorShift64Star {
    state: u64,
}

impl XorShift64Star {
    pub(crate) fn new(seed: u64) -> Self {
        // A zero state would stay zero forever.
        Self { state: seed.max(1) }
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D_u64)
    }

    /// Uniform sample in `[-1, 1)` with 53 bits of precision.
    pub(crate) fn next_f64_signed(&mut self) -> f64 {
        let u = self.next_u64() >> 11;
        let v = (u as f64) / ((1u64 << 53) as f64);
        (v * 2.0) - 1.0
    }

    /// A tiny non-zero nudge used when two points coincide.
    pub(crate) fn jiggle(&mut self) -> f64 {
        let v = self.next_f64_signed() * 1e-6;
        if v == 0.0 { 1e-6 } else { v }
    }
}
