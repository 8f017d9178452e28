//! Pointer input.
//!
//! [`PointerTracker`] turns raw cursor events into the pointer position the
//! integrator reads. Updates are throttled: at most one is applied per
//! throttle window, the first immediately and the latest of any burst once
//! the window has passed.
//!
//! The frame loop calls [`PointerTracker::latch`] once at the start of each
//! frame, so a frame never sees a pointer change halfway through.

use std::time::{Duration, Instant};

use glam::Vec2;
use winit::event::WindowEvent;

/// Pointer snapshot for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerFrame {
    /// Device-pixel canvas coordinates.
    pub position: Vec2,
    /// An update was applied since the previous latch.
    pub moved: bool,
}

/// Throttled pointer state.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    position: Vec2,
    pending: Option<Vec2>,
    last_applied: Option<Instant>,
    moved: bool,
    throttle: Duration,
}

impl PointerTracker {
    pub fn new(throttle: Duration) -> Self {
        Self {
            position: Vec2::ZERO,
            pending: None,
            last_applied: None,
            moved: false,
            throttle,
        }
    }

    /// Last applied pointer position.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Process a winit window event.
    ///
    /// winit reports cursor positions in physical pixels relative to the
    /// window's client area, which is already the particle coordinate space.
    pub fn handle_event(&mut self, event: &WindowEvent, now: Instant) {
        if let WindowEvent::CursorMoved { position, .. } = event {
            self.record(Vec2::new(position.x as f32, position.y as f32), now);
        }
    }

    /// Offer a new pointer position.
    pub fn record(&mut self, position: Vec2, now: Instant) {
        if self.window_open(now) {
            self.apply(position, now);
        } else {
            self.pending = Some(position);
        }
    }

    /// Flush a trailing update if its window has passed, then snapshot.
    pub fn latch(&mut self, now: Instant) -> PointerFrame {
        if self.window_open(now) {
            if let Some(position) = self.pending.take() {
                self.apply(position, now);
            }
        }

        let frame = PointerFrame {
            position: self.position,
            moved: self.moved,
        };
        self.moved = false;
        frame
    }

    fn window_open(&self, now: Instant) -> bool {
        match self.last_applied {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.throttle,
        }
    }

    fn apply(&mut self, position: Vec2, now: Instant) {
        self.position = position;
        self.last_applied = Some(now);
        self.pending = None;
        self.moved = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THROTTLE: Duration = Duration::from_millis(6);

    #[test]
    fn test_first_move_applies_immediately() {
        let mut tracker = PointerTracker::new(THROTTLE);
        let t0 = Instant::now();

        tracker.record(Vec2::new(10.0, 20.0), t0);
        let frame = tracker.latch(t0);
        assert!(frame.moved);
        assert_eq!(frame.position, Vec2::new(10.0, 20.0));

        // Nothing new: next latch reports no movement.
        assert!(!tracker.latch(t0).moved);
    }

    #[test]
    fn test_burst_is_coalesced() {
        let mut tracker = PointerTracker::new(THROTTLE);
        let t0 = Instant::now();

        tracker.record(Vec2::new(1.0, 1.0), t0);
        tracker.latch(t0);

        tracker.record(Vec2::new(2.0, 2.0), t0 + Duration::from_millis(1));
        tracker.record(Vec2::new(3.0, 3.0), t0 + Duration::from_millis(2));

        // Still inside the window: the old position holds.
        let frame = tracker.latch(t0 + Duration::from_millis(3));
        assert!(!frame.moved);
        assert_eq!(frame.position, Vec2::new(1.0, 1.0));

        // Window passed: only the latest pending position is applied.
        let frame = tracker.latch(t0 + Duration::from_millis(6));
        assert!(frame.moved);
        assert_eq!(frame.position, Vec2::new(3.0, 3.0));
    }

    #[test]
    fn test_move_after_window_applies() {
        let mut tracker = PointerTracker::new(THROTTLE);
        let t0 = Instant::now();

        tracker.record(Vec2::new(1.0, 1.0), t0);
        tracker.record(Vec2::new(5.0, 5.0), t0 + Duration::from_millis(10));
        assert_eq!(tracker.position(), Vec2::new(5.0, 5.0));
    }
}
