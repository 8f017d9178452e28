//! Frame scheduling.
//!
//! Every frame is either **active** (the activity budget is non-zero and the
//! integrator runs) or **idle** (physics frozen). Both kinds render, since
//! each frame clears and repaints the whole surface.
//!
//! The budget is refilled only by pointer movement; the scheduler itself
//! only ever counts it down. Once it reaches zero the particles stay exactly
//! where they last settled.

use glam::Vec2;

use crate::error::FieldError;
use crate::integrator::{self, ForceParams};
use crate::store::{FieldState, ParticleStore};

/// Frames remaining with active physics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityBudget {
    remaining: u32,
    refill: u32,
}

impl ActivityBudget {
    /// A budget that starts idle and refills to `refill` frames.
    pub fn new(refill: u32) -> Self {
        Self { remaining: 0, refill }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    /// Grant a full window of activity.
    pub fn refill(&mut self) {
        self.remaining = self.refill;
    }

    /// Consume one frame. Returns false if the budget was already empty.
    fn consume(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

/// Outcome of one scheduled frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    /// The integrator ran; positions may have changed.
    Active,
    /// Physics skipped; positions are untouched.
    Idle,
}

impl FrameKind {
    pub fn positions_changed(self) -> bool {
        matches!(self, FrameKind::Active)
    }
}

/// Something that can draw the field once per frame.
pub trait FrameRenderer {
    type Error: From<FieldError>;

    /// Draw `store` (`None` for an empty field). `positions_changed` is set
    /// when the position buffer must be re-uploaded first.
    fn render_frame(&mut self, store: Option<&ParticleStore>, positions_changed: bool) -> Result<(), Self::Error>;
}

/// Drives integration and rendering; holds no physics state of its own.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    budget: ActivityBudget,
    params: ForceParams,
}

impl FrameScheduler {
    pub fn new(params: ForceParams, activity_frames: u32) -> Self {
        Self {
            budget: ActivityBudget::new(activity_frames),
            params,
        }
    }

    pub fn budget(&self) -> ActivityBudget {
        self.budget
    }

    pub fn params(&self) -> &ForceParams {
        &self.params
    }

    /// Pointer moved: refill the activity budget.
    pub fn wake(&mut self) {
        self.budget.refill();
    }

    /// Run physics for one frame if the budget allows.
    ///
    /// `pointer` is the snapshot latched at the start of this frame.
    pub fn tick(&mut self, field: &mut FieldState, pointer: Vec2) -> Result<FrameKind, FieldError> {
        let store = field.store_mut()?;

        if !self.budget.consume() {
            return Ok(FrameKind::Idle);
        }

        if let Some(store) = store {
            integrator::step(store, pointer, &self.params);
        }

        if !self.budget.is_active() {
            tracing::debug!("activity budget exhausted, physics frozen");
        }

        Ok(FrameKind::Active)
    }

    /// One full frame: [`tick`](Self::tick), then render unconditionally.
    pub fn run_frame<R: FrameRenderer>(
        &mut self,
        field: &mut FieldState,
        pointer: Vec2,
        renderer: &mut R,
    ) -> Result<FrameKind, R::Error> {
        let kind = self.tick(field, pointer)?;
        renderer.render_frame(field.store()?, kind.positions_changed())?;
        Ok(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Sample;

    #[derive(Default)]
    struct CountingRenderer {
        frames: u32,
        uploads: u32,
        drawn: Vec<usize>,
    }

    impl FrameRenderer for CountingRenderer {
        type Error = FieldError;

        fn render_frame(&mut self, store: Option<&ParticleStore>, positions_changed: bool) -> Result<(), FieldError> {
            self.frames += 1;
            if positions_changed {
                self.uploads += 1;
            }
            self.drawn.push(store.map_or(0, |s| s.len()));
            Ok(())
        }
    }

    fn field() -> FieldState {
        FieldState::from_samples(&[
            Sample::new(100.0, 100.0, 1.0, 1.0, 1.0, 1.0),
            Sample::new(120.0, 100.0, 1.0, 1.0, 1.0, 1.0),
        ])
    }

    #[test]
    fn test_starts_idle() {
        let mut scheduler = FrameScheduler::new(ForceParams::default(), 400);
        let mut field = field();
        let kind = scheduler.tick(&mut field, Vec2::new(110.0, 100.0)).unwrap();
        assert_eq!(kind, FrameKind::Idle);
        assert_eq!(field.store().unwrap().unwrap().positions()[0], Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_budget_counts_down_once_per_active_frame() {
        let mut scheduler = FrameScheduler::new(ForceParams::default(), 3);
        let mut field = field();
        scheduler.wake();

        let kinds: Vec<FrameKind> = (0..5)
            .map(|_| scheduler.tick(&mut field, Vec2::ZERO).unwrap())
            .collect();
        assert_eq!(
            kinds,
            vec![FrameKind::Active, FrameKind::Active, FrameKind::Active, FrameKind::Idle, FrameKind::Idle]
        );
        assert_eq!(scheduler.budget().remaining(), 0);
    }

    #[test]
    fn test_wake_resets_not_accumulates() {
        let mut budget = ActivityBudget::new(400);
        budget.refill();
        assert!(budget.consume());
        budget.refill();
        assert_eq!(budget.remaining(), 400);
    }

    #[test]
    fn test_renders_every_frame() {
        let mut scheduler = FrameScheduler::new(ForceParams::default(), 2);
        let mut field = field();
        let mut renderer = CountingRenderer::default();
        scheduler.wake();

        for _ in 0..6 {
            scheduler.run_frame(&mut field, Vec2::new(110.0, 100.0), &mut renderer).unwrap();
        }
        assert_eq!(renderer.frames, 6);
        assert_eq!(renderer.uploads, 2);
        assert!(renderer.drawn.iter().all(|&n| n == 2));
    }

    #[test]
    fn test_uninitialized_field_fails_fast() {
        let mut scheduler = FrameScheduler::new(ForceParams::default(), 400);
        let mut field = FieldState::Uninitialized;
        let mut renderer = CountingRenderer::default();
        scheduler.wake();

        let err = scheduler.run_frame(&mut field, Vec2::ZERO, &mut renderer).unwrap_err();
        assert_eq!(err, FieldError::NotInitialized);
        assert_eq!(renderer.frames, 0);
        assert_eq!(scheduler.budget().remaining(), 400);
    }

    #[test]
    fn test_empty_field_renders_nothing() {
        let mut scheduler = FrameScheduler::new(ForceParams::default(), 400);
        let mut field = FieldState::Empty;
        let mut renderer = CountingRenderer::default();
        scheduler.wake();

        scheduler.run_frame(&mut field, Vec2::ZERO, &mut renderer).unwrap();
        assert_eq!(renderer.drawn, vec![0]);
    }
}
