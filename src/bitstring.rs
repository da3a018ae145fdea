//! OneMax bit-string genome.
//!
//! A fixed-length vector of bits whose fitness is the fraction of bits set.
//! Used by the command-line demo, the benches, and as a reference
//! [`Genome`] implementation.

use crate::ga::Genome;
use rand::Rng;
use std::fmt;

/// Bit-string genome scored by the fraction of `1` bits.
#[derive(Debug, Clone, PartialEq)]
pub struct BitString {
    bits: Vec<bool>,
    fitness: f64,
}

impl BitString {
    /// Creates a uniformly random bit string of length `len`.
    pub fn random<R: Rng>(len: usize, rng: &mut R) -> Self {
        Self::from_bits((0..len).map(|_| rng.random_bool(0.5)).collect())
    }

    /// Wraps explicit bits and computes their fitness.
    pub fn from_bits(bits: Vec<bool>) -> Self {
        let mut genome = Self { bits, fitness: 0.0 };
        genome.refresh_fitness();
        genome
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    fn refresh_fitness(&mut self) {
        self.fitness = if self.bits.is_empty() {
            0.0
        } else {
            self.bits.iter().filter(|&&b| b).count() as f64 / self.bits.len() as f64
        };
    }

    /// Single-point child: `head[..point]` followed by `tail[point..]`.
    fn splice(head: &Self, tail: &Self, point: usize) -> Self {
        let mut bits = Vec::with_capacity(head.bits.len());
        bits.extend_from_slice(&head.bits[..point]);
        bits.extend_from_slice(&tail.bits[point..]);
        Self::from_bits(bits)
    }
}

impl Genome for BitString {
    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn size(&self) -> usize {
        self.bits.len()
    }

    fn crossover<R: Rng>(&self, other: &Self, rng: &mut R) -> [Self; 2] {
        let point = if self.bits.is_empty() {
            0
        } else {
            rng.random_range(0..self.bits.len())
        };
        [Self::splice(self, other, point), Self::splice(other, self, point)]
    }

    fn mutate<R: Rng>(&mut self, rate: f64, rng: &mut R) {
        for bit in &mut self.bits {
            if rng.random_bool(rate) {
                *bit = !*bit;
            }
        }
        self.refresh_fitness();
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
