use bytemuck::{Pod, Zeroable};

/// Vertex + fragment program drawing one sprite per particle.
///
/// Inputs: uniform `u_resolution` (canvas size in device pixels),
/// per-instance `a_position` (2 floats) and `a_color` (4 floats).
pub const POINT_SHADER: &str = include_str!("points.wgsl");

/// Quad corners emitted per particle instance.
pub const VERTICES_PER_POINT: u32 = 6;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Uniforms {
    pub resolution: [f32; 2],
    pub point_size: f32,
    pub _padding: f32,
}

impl Uniforms {
    pub fn new(width: u32, height: u32, point_size: f32) -> Self {
        Self {
            resolution: [width as f32, height as f32],
            point_size,
            _padding: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Validates WGSL code using naga.
    fn validate_wgsl(code: &str) -> Result<(), String> {
        let module = naga::front::wgsl::parse_str(code)
            .map_err(|e| format!("WGSL parse error: {:?}", e))?;

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator
            .validate(&module)
            .map_err(|e| format!("WGSL validation error: {:?}", e))?;

        Ok(())
    }

    #[test]
    fn test_point_shader_valid() {
        validate_wgsl(POINT_SHADER).unwrap();
    }

    #[test]
    fn test_point_shader_interface() {
        for name in ["u_resolution", "a_position", "a_color", "vs_main", "fs_main"] {
            assert!(POINT_SHADER.contains(name), "missing {}", name);
        }
    }

    #[test]
    fn test_uniform_layout() {
        assert_eq!(std::mem::size_of::<Uniforms>(), 16);
        let u = Uniforms::new(800, 600, 2.0);
        assert_eq!(u.resolution, [800.0, 600.0]);
    }
}
