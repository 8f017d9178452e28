//! Force integration.
//!
//! One call to [`step`] advances every particle by one frame:
//!
//! 1. Repulsion from the pointer when it is within the distortion radius.
//!    The push grows as `radius² / dist²` and is attenuated for particles
//!    that are already far from rest.
//! 2. Velocity damping.
//! 3. A spring toward the rest position blended with free flight.
//! 4. A soft clamp on displacement from rest, with extra braking on contact.
//!
//! The force is deliberately left unbounded as the pointer approaches a
//! particle; damping and the soft clamp keep the motion on screen.

use glam::Vec2;

use crate::config::FieldConfig;
use crate::store::{Particle, ParticleStore};

/// Exponential falloff of the soft clamp per pixel of excess displacement.
pub const SOFT_CLAMP_FALLOFF: f32 = 0.02;

/// Floor of the force attenuation for far-displaced particles.
pub const MIN_FORCE_MULTIPLIER: f32 = 0.1;

/// Constants consumed by the integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceParams {
    pub radius: f32,
    pub force_strength: f32,
    pub max_displacement: f32,
    pub return_force: f32,
    pub velocity_damping: f32,
    pub clamp_damping: f32,
}

impl From<&FieldConfig> for ForceParams {
    fn from(config: &FieldConfig) -> Self {
        Self {
            radius: config.distortion_radius,
            force_strength: config.force_strength,
            max_displacement: config.max_displacement,
            return_force: config.return_force,
            velocity_damping: config.velocity_damping,
            clamp_damping: config.clamp_damping,
        }
    }
}

impl Default for ForceParams {
    fn default() -> Self {
        Self::from(&FieldConfig::default())
    }
}

/// Advance a single particle currently at `position` and return its new position.
///
/// Updates `particle.velocity` in place. The math runs in `f64`; only the
/// returned position is narrowed to `f32`.
pub fn step_particle(particle: &mut Particle, position: Vec2, pointer: Vec2, params: &ForceParams) -> Vec2 {
    let position = position.as_dvec2();
    let rest = particle.rest.as_dvec2();
    let radius = params.radius as f64;
    let max_displacement = params.max_displacement as f64;

    let radius_sq = radius * radius;
    let delta = pointer.as_dvec2() - position;
    let dist_sq = delta.length_squared();

    // Exact zero is excluded so the division below is always defined.
    if dist_sq > 0.0 && dist_sq < radius_sq {
        let force = -radius_sq / dist_sq;
        let angle = delta.y.atan2(delta.x);
        let dist_from_rest = (position - rest).length();
        let multiplier =
            (1.0 - dist_from_rest / (max_displacement * 2.0)).max(MIN_FORCE_MULTIPLIER as f64);

        let scale = force * params.force_strength as f64 * multiplier;
        particle.velocity.x += scale * angle.cos();
        particle.velocity.y += scale * angle.sin();
    }

    particle.velocity *= params.velocity_damping as f64;

    let target = position + particle.velocity + (rest - position) * params.return_force as f64;

    let offset = target - rest;
    let dist = offset.length();
    if dist > max_displacement {
        let excess = dist - max_displacement;
        let scale = max_displacement / dist;
        let damped_scale = scale + (1.0 - scale) * (-excess * SOFT_CLAMP_FALLOFF as f64).exp();
        particle.velocity *= params.clamp_damping as f64;
        (rest + offset * damped_scale).as_vec2()
    } else {
        target.as_vec2()
    }
}

/// Advance every particle in index order, rewriting the position buffer.
pub fn step(store: &mut ParticleStore, pointer: Vec2, params: &ForceParams) {
    let (particles, positions) = store.split_mut();
    for (particle, position) in particles.iter_mut().zip(positions.iter_mut()) {
        *position = step_particle(particle, *position, pointer, params);
    }
}
