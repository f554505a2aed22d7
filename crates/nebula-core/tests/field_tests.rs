// Tests for particle field construction.

use nebula_core::constants::{FIELD_RADIUS, SIZE_MIN, SIZE_SPAN};
use nebula_core::*;

#[test]
fn create_yields_requested_count_inside_the_ball() {
    let field = ParticleField::create(5_000).unwrap();
    assert_eq!(field.len(), 5_000);
    assert!(!field.is_empty());
    for p in field.iter() {
        let r = p.base_position.length();
        assert!(r <= FIELD_RADIUS + 1e-4, "particle outside ball: {r}");
    }
}

#[test]
fn attributes_stay_in_their_ranges() {
    let field = ParticleField::create_seeded(5_000, 7).unwrap();
    for p in field.iter() {
        assert!(p.size_factor >= SIZE_MIN && p.size_factor <= SIZE_MIN + SIZE_SPAN);
        assert!((0.0..1.0).contains(&p.randomness));
        assert!((0.0..1.0).contains(&p.gradient_position));
    }
}

#[test]
fn zero_particles_is_an_error() {
    assert_eq!(ParticleField::create(0).err(), Some(FieldError::EmptyField));
    assert_eq!(
        ParticleField::create_seeded(0, 1).err(),
        Some(FieldError::EmptyField)
    );
}

#[test]
fn seeded_fields_are_reproducible() {
    let a = ParticleField::create_seeded(256, 42).unwrap();
    let b = ParticleField::create_seeded(256, 42).unwrap();
    let c = ParticleField::create_seeded(256, 43).unwrap();
    assert_eq!(a.base_positions(), b.base_positions());
    assert_eq!(a.randomness(), b.randomness());
    assert_ne!(a.base_positions(), c.base_positions());
}

#[test]
fn positions_fill_the_volume() {
    // cube-root radius sampling puts about 1/8 of the points inside half the radius
    let field = ParticleField::create_seeded(20_000, 3).unwrap();
    let inner = field
        .base_positions()
        .iter()
        .filter(|p| p.length() < FIELD_RADIUS * 0.5)
        .count() as f32
        / field.len() as f32;
    assert!((inner - 0.125).abs() < 0.02, "inner fraction {inner}");
}

#[test]
fn particle_accessor_matches_the_flat_buffers() {
    let field = ParticleField::create_seeded(10, 9).unwrap();
    let p = field.particle(4);
    assert_eq!(p.base_position, field.base_positions()[4]);
    assert_eq!(p.size_factor, field.size_factors()[4]);
    assert_eq!(p.randomness, field.randomness()[4]);
    assert_eq!(p.gradient_position, field.gradient_positions()[4]);
}
