//! Error types for logofield.
//!
//! Setup failures (GPU, logo decoding) are fatal to a session and get logged
//! at the top level. Precondition violations are programming errors and are
//! reported instead of drawing garbage.

use thiserror::Error;

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("no compatible GPU adapter found; ensure your system has Vulkan/Metal/DX12/GL support")]
    NoAdapter,
    /// Failed to create GPU device.
    #[error("failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
    /// The surface reported no usable texture formats.
    #[error("surface is incompatible with the selected adapter")]
    IncompatibleSurface,
}

/// Errors that can occur while turning the logo image into samples.
#[derive(Debug, Error)]
pub enum SampleError {
    /// Failed to decode the image file.
    #[error("failed to load logo image: {0}")]
    ImageLoad(#[from] image::ImageError),
    /// The configured logo square has no pixels.
    #[error("logo size must be non-zero")]
    ZeroSize,
}

/// Errors raised when building a particle store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Construction was attempted with no samples.
    #[error("cannot build a particle store from zero samples")]
    Empty,
}

/// Physics or rendering touched the field before it was ready.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("particle field used before the logo finished loading")]
    NotInitialized,
}

/// Errors that can occur when running a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Failed to create event loop.
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create window.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    /// Logo sampling failed.
    #[error("logo error: {0}")]
    Sample(#[from] SampleError),
}

/// Errors from drawing a single frame.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The surface could not provide a texture this frame.
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
    #[error(transparent)]
    Field(#[from] FieldError),
}
