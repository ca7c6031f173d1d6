/// Shared configuration for RGB-D axonometry rendering.
use serde::{Deserialize, Serialize};

/// Default horizontal field of view in degrees (Kinect-class sensor).
pub const DEFAULT_FOV_HORIZONTAL_DEG: f32 = 58.0;

/// Default vertical field of view in degrees.
pub const DEFAULT_FOV_VERTICAL_DEG: f32 = 45.0;

/// Output canvas width in pixels.
pub const CANVAS_WIDTH: u32 = 1024;

/// Output canvas height in pixels.
pub const CANVAS_HEIGHT: u32 = 768;

/// Uniform scale applied to projected axonometric coordinates.
pub const AXONOMETRIC_SCALE: f32 = 0.125;

/// Axonometric foreshortening angle in radians (30 degrees).
pub const AXONOMETRIC_ANGLE: f32 = std::f32::consts::PI / 6.0;

/// Angular model of the capturing depth sensor.
///
/// Passed explicitly into the projector so alternative sensor presets can be
/// loaded from JSON instead of recompiling. The focal distance derives from
/// the horizontal axis only; the vertical FOV is carried for preset
/// completeness.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CameraModel {
    /// Horizontal field of view in degrees.
    pub fov_horizontal_deg: f32,
    /// Vertical field of view in degrees.
    pub fov_vertical_deg: f32,
}

impl Default for CameraModel {
    fn default() -> Self {
        Self {
            fov_horizontal_deg: DEFAULT_FOV_HORIZONTAL_DEG,
            fov_vertical_deg: DEFAULT_FOV_VERTICAL_DEG,
        }
    }
}

impl CameraModel {
    /// Horizontal field of view in radians.
    pub fn fov_horizontal(&self) -> f32 {
        self.fov_horizontal_deg.to_radians()
    }

    /// Vertical field of view in radians.
    pub fn fov_vertical(&self) -> f32 {
        self.fov_vertical_deg.to_radians()
    }
}

/// Canvas geometry and axonometric transform parameters for the renderer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Canvas width in pixels.
    pub canvas_width: u32,
    /// Canvas height in pixels.
    pub canvas_height: u32,
    /// Uniform scale applied after the axonometric transform.
    pub scale: f32,
    /// Foreshortening angle of the receding axes in radians.
    pub axis_angle: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            scale: AXONOMETRIC_SCALE,
            axis_angle: AXONOMETRIC_ANGLE,
        }
    }
}
