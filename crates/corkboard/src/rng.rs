//! Seeded randomness for organic-looking layouts.
//!
//! Layouts that should look hand-placed (shuffled stickies, jitter, tilt)
//! draw from [`Mulberry32`], a tiny 32-bit generator. The same seed always
//! produces the same sequence, so a board can be reproduced exactly.

/// Mulberry32 pseudo-random generator.
///
/// # Examples
///
/// ```
/// use corkboard::rng::Mulberry32;
///
/// let mut a = Mulberry32::new(42);
/// let mut b = Mulberry32::new(42);
/// assert_eq!(a.next_f64(), b.next_f64());
/// ```
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next raw 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Uniform value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Uniform value in `[0, 1)`, as `f32`.
    pub fn next_f32(&mut self) -> f32 {
        self.next_f64() as f32
    }

    /// Uniform index in `0..bound`; `bound` must be non-zero.
    pub fn next_index(&mut self, bound: usize) -> usize {
        ((self.next_f64() * bound as f64) as usize).min(bound - 1)
    }

    /// Whole degrees in `-4..=4`, for tilting a sticky note.
    pub fn next_tilt(&mut self) -> i8 {
        self.next_index(9) as i8 - 4
    }

    /// Fisher-Yates shuffle, walking from the back.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_index(i + 1);
            items.swap(i, j);
        }
    }
}
