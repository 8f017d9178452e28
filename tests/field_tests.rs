//! End-to-end tests for the particle field without a window or GPU.
//!
//! These drive the sampler, store, scheduler and integrator together the
//! way a session does, with a renderer that just records frames.

use image::{Rgba, RgbaImage};
use logofield::sampler::{rasterize, sample_square};
use logofield::{
    FieldConfig, FieldError, FieldState, ForceParams, FrameKind, FrameRenderer, FrameScheduler,
    ParticleStore, PointerTracker, Sample, Vec2,
};
use std::time::{Duration, Instant};

#[derive(Default)]
struct Recorder {
    frames: u32,
    uploads: u32,
    snapshots: Vec<Vec<Vec2>>,
}

impl FrameRenderer for Recorder {
    type Error = FieldError;

    fn render_frame(&mut self, store: Option<&ParticleStore>, positions_changed: bool) -> Result<(), FieldError> {
        self.frames += 1;
        if positions_changed {
            self.uploads += 1;
        }
        self.snapshots
            .push(store.map(|s| s.positions().to_vec()).unwrap_or_default());
        Ok(())
    }
}

fn logo_field(config: &FieldConfig) -> FieldState {
    let logo = RgbaImage::from_pixel(32, 32, Rgba([200, 100, 50, 255]));
    let square = rasterize(&logo, config).unwrap();
    let samples = sample_square(&square, config, 800, 600);
    FieldState::from_samples(&samples)
}

#[test]
fn test_sampled_logo_builds_field() {
    let config = FieldConfig::for_viewport(400.0);
    let field = logo_field(&config);
    let store = field.store().unwrap().expect("logo is opaque");

    assert!(store.len() > 0);
    for p in store.positions() {
        // Square of 350 centered at (400, 300).
        assert!(p.x >= 400.0 - 175.0 && p.x < 400.0 + 175.0);
        assert!(p.y >= 300.0 - 175.0 && p.y < 300.0 + 175.0);
    }
}

#[test]
fn test_budget_exhaustion_freezes_positions() {
    let config = FieldConfig::for_viewport(400.0);
    let mut field = logo_field(&config);
    let mut scheduler = FrameScheduler::new(ForceParams::from(&config), config.activity_frames);
    let mut renderer = Recorder::default();
    let mut pointer = PointerTracker::new(config.pointer_throttle);

    let t0 = Instant::now();
    pointer.record(Vec2::new(400.0, 300.0), t0);

    let mut active = 0;
    for frame in 0..450u64 {
        let snapshot = pointer.latch(t0 + Duration::from_millis(16 * frame));
        if snapshot.moved {
            scheduler.wake();
        }
        let kind = scheduler
            .run_frame(&mut field, snapshot.position, &mut renderer)
            .unwrap();
        if kind == FrameKind::Active {
            active += 1;
        }
    }

    assert_eq!(active, 400);
    assert_eq!(renderer.frames, 450);
    assert_eq!(renderer.uploads, 400);

    let settled = &renderer.snapshots[400];
    for later in &renderer.snapshots[401..] {
        assert_eq!(later, settled);
    }
}

#[test]
fn test_idle_frames_keep_displacement() {
    let params = ForceParams::default();
    let mut field = FieldState::from_samples(&[Sample::new(100.0, 100.0, 1.0, 1.0, 1.0, 1.0)]);
    let mut scheduler = FrameScheduler::new(params, 1);

    scheduler.wake();
    assert_eq!(scheduler.tick(&mut field, Vec2::new(150.0, 100.0)).unwrap(), FrameKind::Active);
    let moved = field.store().unwrap().unwrap().positions()[0];
    // Pushed away from the pointer on its right.
    assert!(moved.x < 100.0);

    for _ in 0..10 {
        assert_eq!(scheduler.tick(&mut field, Vec2::new(150.0, 100.0)).unwrap(), FrameKind::Idle);
    }
    // Not snapped back to rest.
    assert_eq!(field.store().unwrap().unwrap().positions()[0], moved);
}

#[test]
fn test_pointer_burst_wakes_once() {
    let config = FieldConfig::default();
    let mut pointer = PointerTracker::new(config.pointer_throttle);
    let mut scheduler = FrameScheduler::new(ForceParams::from(&config), 5);
    let mut field = FieldState::from_samples(&[Sample::new(0.0, 0.0, 1.0, 1.0, 1.0, 1.0)]);

    let t0 = Instant::now();
    for i in 0..5 {
        pointer.record(Vec2::new(i as f32, 0.0), t0 + Duration::from_micros(500 * i));
    }
    let snapshot = pointer.latch(t0 + Duration::from_millis(3));
    assert!(snapshot.moved);
    assert_eq!(snapshot.position, Vec2::new(0.0, 0.0));
    scheduler.wake();

    for _ in 0..3 {
        scheduler.tick(&mut field, snapshot.position).unwrap();
    }
    assert_eq!(scheduler.budget().remaining(), 2);

    // Trailing update lands once the window has passed and refills the budget.
    let snapshot = pointer.latch(t0 + Duration::from_millis(7));
    assert!(snapshot.moved);
    assert_eq!(snapshot.position, Vec2::new(4.0, 0.0));
    scheduler.wake();
    assert_eq!(scheduler.budget().remaining(), 5);
}
