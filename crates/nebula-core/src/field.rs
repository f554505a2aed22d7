//! Static per-particle attributes, generated once per session.
//!
//! Attributes live in flat parallel buffers so the per-frame loop walks
//! contiguous memory. Nothing here changes after [`ParticleField::create`].

use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::TAU;

use crate::constants::{FIELD_RADIUS, SIZE_MIN, SIZE_SPAN};
use crate::error::FieldError;

/// One particle's immutable attributes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub base_position: Vec3,
    pub size_factor: f32,
    pub randomness: f32,
    pub gradient_position: f32,
}

pub struct ParticleField {
    base_positions: Vec<Vec3>,
    size_factors: Vec<f32>,
    randomness: Vec<f32>,
    gradient_positions: Vec<f32>,
}

impl ParticleField {
    /// Build `count` particles from OS entropy.
    pub fn create(count: usize) -> Result<Self, FieldError> {
        Self::create_with_rng(count, &mut StdRng::from_entropy())
    }

    /// Build `count` particles from a fixed seed.
    pub fn create_seeded(count: usize, seed: u64) -> Result<Self, FieldError> {
        Self::create_with_rng(count, &mut StdRng::seed_from_u64(seed))
    }

    pub fn create_with_rng<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Result<Self, FieldError> {
        if count == 0 {
            return Err(FieldError::EmptyField);
        }
        let mut field = Self {
            base_positions: Vec::with_capacity(count),
            size_factors: Vec::with_capacity(count),
            randomness: Vec::with_capacity(count),
            gradient_positions: Vec::with_capacity(count),
        };
        for _ in 0..count {
            field.base_positions.push(sample_ball(rng, FIELD_RADIUS));
            field.gradient_positions.push(rng.gen::<f32>());
            field.size_factors.push(rng.gen::<f32>() * SIZE_SPAN + SIZE_MIN);
            field.randomness.push(rng.gen::<f32>());
        }
        log::debug!("[field] created {count} particles");
        Ok(field)
    }

    pub fn len(&self) -> usize {
        self.base_positions.len()
    }

    /// Always false; an empty field cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.base_positions.is_empty()
    }

    pub fn particle(&self, index: usize) -> Particle {
        Particle {
            base_position: self.base_positions[index],
            size_factor: self.size_factors[index],
            randomness: self.randomness[index],
            gradient_position: self.gradient_positions[index],
        }
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = Particle> + '_ {
        (0..self.len()).map(move |i| self.particle(i))
    }

    pub fn base_positions(&self) -> &[Vec3] {
        &self.base_positions
    }

    pub fn size_factors(&self) -> &[f32] {
        &self.size_factors
    }

    pub fn randomness(&self) -> &[f32] {
        &self.randomness
    }

    pub fn gradient_positions(&self) -> &[f32] {
        &self.gradient_positions
    }
}

/// Uniform point in a solid ball: uniform direction, cube-root radius.
fn sample_ball<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
    let r = radius * rng.gen::<f32>().cbrt();
    let p = Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    );
    // trig rounding can push a shell sample a hair outside the ball
    p.clamp_length_max(radius)
}
