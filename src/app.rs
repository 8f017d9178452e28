//! Session host.
//!
//! Owns the window and one [`Session`] at a time. A session is built when
//! the window appears and rebuilt from scratch after the window stops
//! resizing. Logo sampling runs off the event loop thread and reports back
//! through a user event; frames only start once it has.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy},
    window::{Window, WindowId},
};

use crate::config::FieldConfig;
use crate::error::{RenderError, SampleError, SessionError};
use crate::gpu::GpuState;
use crate::input::PointerTracker;
use crate::integrator::ForceParams;
use crate::sampler;
use crate::scheduler::FrameScheduler;
use crate::store::{FieldState, Sample};

/// Messages delivered to the event loop from outside it.
#[derive(Debug)]
pub enum LogoEvent {
    /// The logo for session `generation` finished sampling.
    Sampled {
        generation: u64,
        result: Result<Vec<Sample>, SampleError>,
    },
}

/// Interactive logo particle field.
///
/// ```ignore
/// LogoField::new("logo.png")
///     .with_logo_color("#ffcc00")
///     .run()?;
/// ```
pub struct LogoField {
    logo_path: PathBuf,
    title: String,
    logo_color: Option<String>,
    canvas_bg: Option<String>,
}

impl LogoField {
    pub fn new(logo_path: impl Into<PathBuf>) -> Self {
        Self {
            logo_path: logo_path.into(),
            title: "logofield".to_string(),
            logo_color: None,
            canvas_bg: None,
        }
    }

    /// Set the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Tint applied to the logo colors (`#rrggbb`).
    pub fn with_logo_color(mut self, hex: impl Into<String>) -> Self {
        self.logo_color = Some(hex.into());
        self
    }

    /// Background color (`#rrggbb`).
    pub fn with_canvas_bg(mut self, hex: impl Into<String>) -> Self {
        self.canvas_bg = Some(hex.into());
        self
    }

    /// Resolve the configuration for a viewport of `logical_width`.
    fn resolve_config(&self, logical_width: f32) -> FieldConfig {
        let mut config = FieldConfig::for_viewport(logical_width);
        if let Some(hex) = &self.logo_color {
            config = config.with_logo_color(hex);
        }
        if let Some(hex) = &self.canvas_bg {
            config = config.with_canvas_bg(hex);
        }
        config
    }

    /// Open the window and run until it is closed.
    pub fn run(self) -> Result<(), SessionError> {
        let event_loop = EventLoop::<LogoEvent>::with_user_event().build()?;
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut app = App::new(self, event_loop.create_proxy());
        event_loop.run_app(&mut app)?;

        match app.fatal.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Everything that lives for one window size.
struct Session {
    generation: u64,
    config: FieldConfig,
    gpu: GpuState,
    field: FieldState,
    scheduler: FrameScheduler,
    pointer: PointerTracker,
}

struct App {
    options: LogoField,
    proxy: EventLoopProxy<LogoEvent>,
    window: Option<Arc<Window>>,
    session: Option<Session>,
    generation: u64,
    resize_deadline: Option<Instant>,
    fatal: Option<SessionError>,
}

impl App {
    fn new(options: LogoField, proxy: EventLoopProxy<LogoEvent>) -> Self {
        Self {
            options,
            proxy,
            window: None,
            session: None,
            generation: 0,
            resize_deadline: None,
            fatal: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: SessionError) {
        tracing::error!("{}", error);
        self.teardown();
        self.fatal = Some(error);
        event_loop.exit();
    }

    fn start_session(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = self.window.clone() else {
            return;
        };

        let size = window.inner_size();
        let logical_width = size.to_logical::<f32>(window.scale_factor()).width;
        let config = self.options.resolve_config(logical_width);

        let gpu = match pollster::block_on(GpuState::new(window.clone(), config.canvas_bg, config.point_size)) {
            Ok(gpu) => gpu,
            Err(e) => return self.fail(event_loop, e.into()),
        };

        self.generation += 1;
        let generation = self.generation;
        tracing::info!(generation, width = size.width, height = size.height, "starting session");

        let proxy = self.proxy.clone();
        let path = self.options.logo_path.clone();
        std::thread::spawn(move || {
            let result = sampler::sample_logo(&path, &config, size.width, size.height);
            if proxy.send_event(LogoEvent::Sampled { generation, result }).is_err() {
                tracing::debug!("event loop closed before logo finished sampling");
            }
        });

        self.session = Some(Session {
            generation,
            config,
            gpu,
            field: FieldState::Uninitialized,
            scheduler: FrameScheduler::new(ForceParams::from(&config), config.activity_frames),
            pointer: PointerTracker::new(config.pointer_throttle),
        });
    }

    fn teardown(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::info!(generation = session.generation, "tearing down session");
            session.gpu.teardown();
        }
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(session) = &mut self.session else {
            return;
        };
        if !session.field.is_initialized() {
            return;
        }

        let Session {
            gpu,
            field,
            scheduler,
            pointer,
            ..
        } = session;

        let snapshot = pointer.latch(Instant::now());
        if snapshot.moved {
            scheduler.wake();
        }

        match scheduler.run_frame(field, snapshot.position, gpu) {
            Ok(_) => {}
            Err(RenderError::Surface(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                let size = self.window.as_ref().map_or(gpu.size(), |w| w.inner_size());
                gpu.resize(size);
            }
            Err(RenderError::Surface(wgpu::SurfaceError::OutOfMemory)) => {
                tracing::error!("GPU out of memory");
                self.teardown();
                event_loop.exit();
                return;
            }
            Err(RenderError::Surface(e)) => tracing::warn!("render error: {:?}", e),
            Err(RenderError::Field(e)) => {
                tracing::error!("{}", e);
                self.teardown();
                event_loop.exit();
                return;
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn size_changed(current: PhysicalSize<u32>, reported: PhysicalSize<u32>) -> bool {
    current != reported
}

impl ApplicationHandler<LogoEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(self.options.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        match event_loop.create_window(window_attrs) {
            Ok(window) => {
                self.window = Some(Arc::new(window));
                self.start_session(event_loop);
            }
            Err(e) => self.fail(event_loop, e.into()),
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: LogoEvent) {
        let LogoEvent::Sampled { generation, result } = event;

        let Some(session) = &mut self.session else {
            return;
        };
        if session.generation != generation {
            tracing::debug!(generation, "discarding samples from a previous session");
            return;
        }

        match result {
            Ok(samples) => {
                session.field = FieldState::from_samples(&samples);
                if let Ok(store) = session.field.store() {
                    session.gpu.upload_field(store);
                }
                if samples.is_empty() {
                    tracing::warn!("logo has no opaque pixels, nothing to draw");
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            Err(e) => self.fail(event_loop, e.into()),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.teardown();
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(session) = &mut self.session {
                    // Platforms report the initial size once the window opens.
                    if !size_changed(session.gpu.size(), physical_size) {
                        return;
                    }
                    session.gpu.resize(physical_size);
                    self.resize_deadline = Some(Instant::now() + session.config.resize_debounce);
                }
            }
            WindowEvent::CursorMoved { .. } => {
                if let Some(session) = &mut self.session {
                    session.pointer.handle_event(&event, Instant::now());
                }
            }
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(deadline) = self.resize_deadline else {
            return;
        };

        if Instant::now() >= deadline {
            self.resize_deadline = None;
            event_loop.set_control_flow(ControlFlow::Wait);
            tracing::info!("window resized, rebuilding session");
            self.teardown();
            self.start_session(event_loop);
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.teardown();
    }
}
