//! # logofield
//!
//! An interactive particle field shaped like a logo image.
//!
//! Every opaque pixel of the logo (on a fixed stride) becomes a particle at
//! rest. Moving the mouse pushes nearby particles away; a spring pulls them
//! back, and a soft clamp keeps them within reach of home.
//!
//! ## Quick Start
//!
//! ```ignore
//! use logofield::LogoField;
//!
//! fn main() -> Result<(), logofield::SessionError> {
//!     LogoField::new("logo.png").run()
//! }
//! ```
//!
//! ## Pieces
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | Particles plus the position and color buffers |
//! | [`integrator`] | One physics step for every particle |
//! | [`scheduler`] | Activity budget, active vs idle frames |
//! | [`input`] | Throttled pointer tracking |
//! | [`sampler`] | Logo image to particle samples |
//! | [`config`] | Immutable per-session constants |
//!
//! Physics is plain CPU code over a [`ParticleStore`], so it can be driven
//! and tested without a window or GPU:
//!
//! ```ignore
//! let mut field = FieldState::from_samples(&samples);
//! let mut scheduler = FrameScheduler::new(ForceParams::default(), 400);
//! scheduler.wake();
//! scheduler.tick(&mut field, Vec2::new(150.0, 100.0))?;
//! ```

mod app;
pub mod config;
pub mod error;
mod gpu;
pub mod input;
pub mod integrator;
pub mod sampler;
pub mod scheduler;
pub mod store;

pub use app::{LogoEvent, LogoField};
pub use config::{FieldConfig, Rgb};
pub use error::{FieldError, GpuError, RenderError, SampleError, SessionError, StoreError};
pub use glam::{DVec2, Vec2, Vec4};
pub use input::{PointerFrame, PointerTracker};
pub use integrator::ForceParams;
pub use scheduler::{ActivityBudget, FrameKind, FrameRenderer, FrameScheduler};
pub use store::{FieldState, Particle, ParticleStore, Sample};
