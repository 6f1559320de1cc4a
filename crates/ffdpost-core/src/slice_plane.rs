//! Plane specification for cutting a 3D dataset.
//!
//! A slice plane is defined by a point (origin) and a normal direction.
//! The engine intersects the active dataset with the plane and produces a
//! new 2D dataset.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{PostError, Result};

/// Normals shorter than this are treated as degenerate.
const MIN_NORMAL_LENGTH: f32 = 1e-6;

/// A plane used to cut a 3D dataset into a 2D cross-section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlicePlane {
    /// A point on the plane.
    pub origin: Vec3,
    /// The normal direction of the plane.
    pub normal: Vec3,
    /// Offsets along the normal at which to cut. Only `[0.0]` has ever been
    /// exercised upstream, but the engine accepts a list.
    #[serde(default = "default_offsets")]
    pub offsets: Vec<f32>,
}

fn default_offsets() -> Vec<f32> {
    vec![0.0]
}

impl SlicePlane {
    /// Creates a plane from an origin point and a normal direction.
    pub fn new(origin: Vec3, normal: Vec3) -> Self {
        Self {
            origin,
            normal,
            offsets: default_offsets(),
        }
    }

    /// Checks that the plane is usable as a cut: the normal must have
    /// nonzero length and at least one offset must be present.
    pub fn validate(&self) -> Result<()> {
        if self.normal.length() < MIN_NORMAL_LENGTH {
            return Err(PostError::InvalidGeometry(format!(
                "slice normal {:?} is degenerate",
                self.normal
            )));
        }
        if self.offsets.is_empty() {
            return Err(PostError::InvalidGeometry(
                "slice offset list is empty".into(),
            ));
        }
        Ok(())
    }

    /// Returns the unit normal.
    ///
    /// Call [`validate`](Self::validate) first; a degenerate normal yields NaN.
    pub fn unit_normal(&self) -> Vec3 {
        self.normal.normalize()
    }

    /// Returns the signed distance from a point to the plane.
    ///
    /// Positive values are on the normal side.
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        (point - self.origin).dot(self.unit_normal())
    }
}

impl Default for SlicePlane {
    /// The cut used by the original batch runs: mid-domain, +Y normal.
    fn default() -> Self {
        Self::new(Vec3::new(0.5, 0.5, 0.5), Vec3::Y)
    }
}
