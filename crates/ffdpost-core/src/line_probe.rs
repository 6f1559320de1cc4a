//! Line probe specification: field extraction along a line.
//!
//! Every revision of the original scripts declared line extraction and left
//! it empty. The contract here: given two endpoints and a sample count,
//! produce an ordered sequence of sample positions (endpoints inclusive) for
//! the engine to probe, then serialize the values into a delimited table.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{PostError, Result};

/// Probe endpoints closer than this are considered coincident.
const MIN_ENDPOINT_SEPARATION: f32 = 1e-6;

/// Specification for sampling field values along a line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineProbeSpec {
    /// First endpoint of the probe line.
    pub p1: Vec3,
    /// Second endpoint of the probe line.
    pub p2: Vec3,
    /// Number of samples, endpoints inclusive. Must be at least 2.
    #[serde(default = "default_samples")]
    pub samples: u32,
    /// Fields to extract. Empty means every field on the dataset.
    #[serde(default)]
    pub fields: Vec<String>,
}

fn default_samples() -> u32 {
    100
}

impl LineProbeSpec {
    /// Creates a probe spec sampling all fields.
    pub fn new(p1: Vec3, p2: Vec3, samples: u32) -> Self {
        Self {
            p1,
            p2,
            samples,
            fields: Vec::new(),
        }
    }

    /// Rejects coincident endpoints and sample counts that cannot span a line.
    pub fn validate(&self) -> Result<()> {
        if self.p1.distance(self.p2) < MIN_ENDPOINT_SEPARATION {
            return Err(PostError::InvalidGeometry(format!(
                "probe endpoints coincide at {:?}",
                self.p1
            )));
        }
        if self.samples < 2 {
            return Err(PostError::InvalidGeometry(format!(
                "probe needs at least 2 samples, got {}",
                self.samples
            )));
        }
        Ok(())
    }

    /// Returns the ordered sample positions from `p1` to `p2`, endpoints
    /// inclusive and evenly spaced.
    pub fn sample_points(&self) -> Vec<Vec3> {
        let n = self.samples as usize;
        let step = 1.0 / (n as f32 - 1.0);
        (0..n)
            .map(|i| self.p1.lerp(self.p2, i as f32 * step))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_coincident_endpoints_rejected() {
        let spec = LineProbeSpec::new(Vec3::ONE, Vec3::ONE, 10);
        assert!(matches!(
            spec.validate(),
            Err(PostError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_single_sample_rejected() {
        let spec = LineProbeSpec::new(Vec3::ZERO, Vec3::ONE, 1);
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_sample_points_endpoints() {
        let spec = LineProbeSpec::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 5);
        let pts = spec.sample_points();
        assert_eq!(pts.len(), 5);
        assert!(pts[0].distance(Vec3::ZERO) < 1e-6);
        assert!(pts[4].distance(Vec3::new(1.0, 0.0, 0.0)) < 1e-6);
        // Even spacing along x.
        assert!((pts[1].x - 0.25).abs() < 1e-6);
        assert!((pts[2].x - 0.5).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_sample_points_count_and_order(
            samples in 2u32..500,
            x1 in -10.0f32..10.0,
            x2 in -10.0f32..10.0,
        ) {
            prop_assume!((x1 - x2).abs() > 1e-3);
            let spec = LineProbeSpec::new(
                Vec3::new(x1, 0.0, 0.0),
                Vec3::new(x2, 0.0, 0.0),
                samples,
            );
            let pts = spec.sample_points();
            prop_assert_eq!(pts.len(), samples as usize);
            // Monotone along the segment direction.
            let dir = (x2 - x1).signum();
            for w in pts.windows(2) {
                prop_assert!((w[1].x - w[0].x) * dir >= -1e-4);
            }
            prop_assert!((pts[0].x - x1).abs() < 1e-3);
            prop_assert!((pts[pts.len() - 1].x - x2).abs() < 1e-3);
        }
    }
}
