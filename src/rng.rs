use core::f32::consts::PI;

/// xorshift32 PRNG; seeded once at boot from analog noise and free-running counters.
#[derive(Clone, Debug)]
pub struct Rng {
    state: u32,
}

impl Rng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Mix the two scaled analog channels with the periodic task counters.
    pub fn from_entropy(analog_left: u8, analog_right: u8, counters: &[u32]) -> Self {
        let mut seed = u32::from(analog_left) + u32::from(analog_right);
        for c in counters {
            seed = seed.wrapping_add(*c);
        }
        Self::new(seed)
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform integer in `min..=max`.
    pub fn range(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        let span = (max - min) as u32 + 1;
        min + (self.next_u32() % span) as i32
    }

    /// Uniform float in `[0, 1)`.
    pub fn unit(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    pub fn uniform(&mut self, low: f32, high: f32) -> f32 {
        low + (high - low) * self.unit()
    }

    pub fn heading(&mut self) -> f32 {
        self.unit() * 2.0 * PI
    }
}
