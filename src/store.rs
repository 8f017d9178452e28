//! Particle storage.
//!
//! A [`ParticleStore`] owns one [`Particle`] per sampled logo pixel plus two
//! parallel buffers laid out for the GPU:
//!
//! - **positions**: current `(x, y)` of every particle, rewritten by the integrator
//! - **colors**: `(r, g, b, a)` of every particle, fixed at construction
//!
//! Index `i` in either buffer always refers to particle `i`. The particle
//! count never changes after construction.

use glam::{DVec2, Vec2, Vec4};

use crate::error::{FieldError, StoreError};

/// One qualifying logo pixel, already placed in canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Device-pixel canvas coordinates.
    pub position: Vec2,
    /// Tinted straight-alpha color.
    pub color: Vec4,
}

impl Sample {
    pub fn new(x: f32, y: f32, r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            color: Vec4::new(r, g, b, a),
        }
    }
}

/// Per-particle physics state. The current position lives in the store's
/// position buffer, not here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Undisplaced location, never overwritten.
    pub rest: Vec2,
    pub velocity: DVec2,
}

/// Fixed-size particle set with its GPU-facing buffers.
#[derive(Debug, Clone)]
pub struct ParticleStore {
    particles: Vec<Particle>,
    positions: Vec<Vec2>,
    colors: Vec<Vec4>,
}

impl ParticleStore {
    /// Build a store with one particle at rest per sample.
    ///
    /// Returns [`StoreError::Empty`] when `samples` is empty.
    pub fn from_samples(samples: &[Sample]) -> Result<Self, StoreError> {
        if samples.is_empty() {
            return Err(StoreError::Empty);
        }

        let particles = samples
            .iter()
            .map(|s| Particle {
                rest: s.position,
                velocity: DVec2::ZERO,
            })
            .collect();
        let positions = samples.iter().map(|s| s.position).collect();
        let colors = samples.iter().map(|s| s.color).collect();

        Ok(Self {
            particles,
            positions,
            colors,
        })
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Always false; an empty store cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Current positions, index-aligned with [`particles`](Self::particles).
    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    pub fn colors(&self) -> &[Vec4] {
        &self.colors
    }

    /// Mutable access to physics state and positions at once.
    ///
    /// Both slices have the same length; rest positions inside the particles
    /// must not be modified by callers.
    pub(crate) fn split_mut(&mut self) -> (&mut [Particle], &mut [Vec2]) {
        (&mut self.particles, &mut self.positions)
    }
}

/// Lifecycle of the particle field within a session.
///
/// Distinguishes "logo not loaded yet" from "logo loaded but had no opaque
/// pixels", which is a valid terminal state that draws nothing.
#[derive(Debug, Clone, Default)]
pub enum FieldState {
    #[default]
    Uninitialized,
    Empty,
    Ready(ParticleStore),
}

impl FieldState {
    /// Build the field from sampler output.
    pub fn from_samples(samples: &[Sample]) -> Self {
        match ParticleStore::from_samples(samples) {
            Ok(store) => FieldState::Ready(store),
            Err(StoreError::Empty) => FieldState::Empty,
        }
    }

    pub fn is_initialized(&self) -> bool {
        !matches!(self, FieldState::Uninitialized)
    }

    /// The store, `None` for an empty field.
    pub fn store(&self) -> Result<Option<&ParticleStore>, FieldError> {
        match self {
            FieldState::Uninitialized => Err(FieldError::NotInitialized),
            FieldState::Empty => Ok(None),
            FieldState::Ready(store) => Ok(Some(store)),
        }
    }

    pub fn store_mut(&mut self) -> Result<Option<&mut ParticleStore>, FieldError> {
        match self {
            FieldState::Uninitialized => Err(FieldError::NotInitialized),
            FieldState::Empty => Ok(None),
            FieldState::Ready(store) => Ok(Some(store)),
        }
    }
}
