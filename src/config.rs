//! Field configuration.
//!
//! All tuning values live in one immutable [`FieldConfig`], resolved once per
//! session from the viewport width and then handed to every constructor.
//!
//! ```ignore
//! let config = FieldConfig::for_viewport(window_logical_width);
//! assert_eq!(config.activity_frames, 400);
//! ```

use std::time::Duration;

/// Viewports at least this wide (logical pixels) get the large logo.
pub const WIDE_VIEWPORT: f32 = 600.0;

/// Linear RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb { r: 1.0, g: 1.0, b: 1.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the `#` is optional, hex digits are case-insensitive).
    ///
    /// Anything that is not exactly six hex digits yields white.
    pub fn from_hex(hex: &str) -> Self {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Self::WHITE;
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map(|v| v as f32 / 255.0)
                .unwrap_or(1.0)
        };

        Self {
            r: channel(0..2),
            g: channel(2..4),
            b: channel(4..6),
        }
    }

    /// Clear color for a render pass.
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: 1.0,
        }
    }
}

/// Immutable constants for one session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfig {
    /// Side of the square the logo is rasterized into, in pixels.
    pub logo_size: u32,
    /// Fraction of `logo_size` the image occupies inside the square.
    pub logo_scale: f32,
    /// Tint multiplied into every sampled pixel color.
    pub logo_color: Rgb,
    /// Clear color.
    pub canvas_bg: Rgb,
    /// Pointer distance under which repulsion applies.
    pub distortion_radius: f32,
    pub force_strength: f32,
    pub max_displacement: f32,
    /// Spring coefficient pulling a particle back toward its rest position.
    pub return_force: f32,
    /// Frames of physics granted by each pointer movement.
    pub activity_frames: u32,
    /// Velocity multiplier applied every step.
    pub velocity_damping: f32,
    /// Extra velocity multiplier when the soft clamp engages.
    pub clamp_damping: f32,
    /// Minimum spacing between applied pointer updates.
    pub pointer_throttle: Duration,
    /// Quiet period after the last resize before the session is rebuilt.
    pub resize_debounce: Duration,
    /// Sampled pixels must have alpha strictly above this.
    pub alpha_threshold: u8,
    pub row_stride: u32,
    pub column_stride: u32,
    /// Rendered sprite edge length in device pixels.
    pub point_size: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            logo_size: 350,
            logo_scale: 0.9,
            logo_color: Rgb::from_hex("#ffffff"),
            canvas_bg: Rgb::from_hex("#141414"),
            distortion_radius: 250.0,
            force_strength: 0.0735,
            max_displacement: 150.0,
            return_force: 0.085,
            activity_frames: 400,
            velocity_damping: 0.82,
            clamp_damping: 0.7,
            pointer_throttle: Duration::from_millis(6),
            resize_debounce: Duration::from_millis(50),
            alpha_threshold: 10,
            row_stride: 2,
            column_stride: 7,
            point_size: 2.0,
        }
    }
}

impl FieldConfig {
    /// Resolve the configuration for a viewport `logical_width` pixels wide.
    pub fn for_viewport(logical_width: f32) -> Self {
        let base = Self::default();
        if logical_width < WIDE_VIEWPORT {
            base
        } else {
            Self {
                logo_size: 450,
                distortion_radius: 450.0,
                ..base
            }
        }
    }

    /// Override the logo tint.
    pub fn with_logo_color(mut self, hex: &str) -> Self {
        self.logo_color = Rgb::from_hex(hex);
        self
    }

    /// Override the background color.
    pub fn with_canvas_bg(mut self, hex: &str) -> Self {
        self.canvas_bg = Rgb::from_hex(hex);
        self
    }
}
