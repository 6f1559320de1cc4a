//! Streamline tracer specification.
//!
//! Streamlines are integrated from a line of seed points between two
//! endpoints. The original scripts passed coincident endpoints straight to
//! the engine; here a degenerate seed line is rejected up front.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{PostError, Result};

/// Seed endpoints closer than this are considered coincident.
const MIN_SEED_SEPARATION: f32 = 1e-6;

/// Specification for a line-seeded streamline trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamlineSpec {
    /// Name of the vector field to integrate.
    pub vector_field: String,
    /// Name of the scalar field used to color the glyphs.
    pub color_field: String,
    /// First seed-line endpoint.
    pub seed_p1: Vec3,
    /// Second seed-line endpoint.
    pub seed_p2: Vec3,
    /// Number of seed points along the line.
    #[serde(default = "default_resolution")]
    pub resolution: u32,
    /// Maximum integration length of a streamline.
    #[serde(default = "default_max_length")]
    pub max_length: f32,
    /// Constrain integration to the slice surface rather than the full 3D
    /// field. Must be applied before the screenshot is saved.
    #[serde(default = "default_true")]
    pub surface_streamlines: bool,
}

fn default_resolution() -> u32 {
    200
}

fn default_max_length() -> f32 {
    2.0
}

fn default_true() -> bool {
    true
}

impl StreamlineSpec {
    /// Creates a spec with the batch-run defaults for the remaining knobs.
    pub fn new(
        vector_field: impl Into<String>,
        color_field: impl Into<String>,
        seed_p1: Vec3,
        seed_p2: Vec3,
    ) -> Self {
        Self {
            vector_field: vector_field.into(),
            color_field: color_field.into(),
            seed_p1,
            seed_p2,
            resolution: default_resolution(),
            max_length: default_max_length(),
            surface_streamlines: true,
        }
    }

    /// Checks the spec for degenerate geometry and useless knob values.
    pub fn validate(&self) -> Result<()> {
        if self.seed_p1.distance(self.seed_p2) < MIN_SEED_SEPARATION {
            return Err(PostError::InvalidGeometry(format!(
                "streamline seed endpoints coincide at {:?}",
                self.seed_p1
            )));
        }
        if self.resolution == 0 {
            return Err(PostError::InvalidGeometry(
                "streamline resolution must be at least 1".into(),
            ));
        }
        if self.max_length <= 0.0 {
            return Err(PostError::InvalidGeometry(format!(
                "streamline max length {} must be positive",
                self.max_length
            )));
        }
        Ok(())
    }
}

impl Default for StreamlineSpec {
    /// The trace used by the original batch runs: velocity field seeded
    /// across the mid-plane diagonal.
    fn default() -> Self {
        Self::new(
            "VEL",
            "VEL",
            Vec3::new(0.0, 0.5, 0.0),
            Vec3::new(1.0, 0.5, 1.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(StreamlineSpec::default().validate().is_ok());
    }

    #[test]
    fn test_coincident_seeds_rejected() {
        let p = Vec3::new(0.3, 0.5, 0.3);
        let spec = StreamlineSpec::new("VEL", "VEL", p, p);
        assert!(matches!(
            spec.validate(),
            Err(PostError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_zero_resolution_rejected() {
        let mut spec = StreamlineSpec::default();
        spec.resolution = 0;
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_nonpositive_max_length_rejected() {
        let mut spec = StreamlineSpec::default();
        spec.max_length = 0.0;
        assert!(spec.validate().is_err());
        spec.max_length = -1.0;
        assert!(spec.validate().is_err());
    }
}
