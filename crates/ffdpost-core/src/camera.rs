//! Camera pose for the render view.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A fixed camera pose applied to the active view after slicing.
///
/// The pose is a configuration constant, not derived from the dataset's
/// bounds; with a domain far from the unit cube the defaults will frame the
/// scene poorly and should be overridden in the config file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CameraSpec {
    /// View-up direction.
    pub view_up: Vec3,
    /// Point the camera looks at.
    pub focal_point: Vec3,
    /// Camera position in world coordinates.
    pub position: Vec3,
    /// Vertical view angle in degrees.
    pub view_angle_deg: f32,
}

impl Default for CameraSpec {
    /// The pose used by the original batch runs: side-on view of a unit
    /// domain with Z up.
    fn default() -> Self {
        Self {
            view_up: Vec3::Z,
            focal_point: Vec3::new(0.5, 0.5, 0.5),
            position: Vec3::new(0.5, -3.0, 0.5),
            view_angle_deg: 45.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pose() {
        let cam = CameraSpec::default();
        assert_eq!(cam.view_up, Vec3::Z);
        assert_eq!(cam.focal_point, Vec3::new(0.5, 0.5, 0.5));
        assert!((cam.view_angle_deg - 45.0).abs() < f32::EPSILON);
    }
}
