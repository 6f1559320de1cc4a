//! Display properties for the active object.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// How the engine draws the active dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Representation {
    /// Filled surface (the only mode the batch runs use).
    #[default]
    Surface,
    /// Surface with edges overlaid.
    SurfaceWithEdges,
    /// Wireframe only.
    Wireframe,
    /// Vertices only.
    Points,
}

impl Representation {
    /// Engine-side name of the representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Representation::Surface => "Surface",
            Representation::SurfaceWithEdges => "Surface With Edges",
            Representation::Wireframe => "Wireframe",
            Representation::Points => "Points",
        }
    }
}

/// Display properties applied before a screenshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySpec {
    /// Name of the color preset (transfer-function palette).
    #[serde(default = "default_preset")]
    pub preset: String,
    /// Normalized legend position in the view, origin bottom-left.
    #[serde(default = "default_legend_position")]
    pub legend_position: [f32; 2],
    /// Whether to show the color legend at all.
    #[serde(default = "default_true")]
    pub show_legend: bool,
    /// Representation mode.
    #[serde(default)]
    pub representation: Representation,
    /// View background color.
    #[serde(default = "default_background")]
    pub background: Vec3,
    /// Point (ambient) color.
    #[serde(default = "default_ambient")]
    pub ambient_color: Vec3,
    /// Surface (diffuse) color.
    #[serde(default = "default_diffuse")]
    pub diffuse_color: Vec3,
    /// Point size in pixels.
    #[serde(default = "default_point_size")]
    pub point_size: f32,
    /// Whether the view shows its axis grid (enabled after slicing).
    #[serde(default = "default_true")]
    pub show_axes_grid: bool,
}

fn default_preset() -> String {
    "Rainbow Desaturated".to_string()
}

fn default_legend_position() -> [f32; 2] {
    [0.85, 0.05]
}

fn default_true() -> bool {
    true
}

fn default_background() -> Vec3 {
    Vec3::ONE
}

fn default_ambient() -> Vec3 {
    Vec3::new(1.0, 0.0, 0.0)
}

fn default_diffuse() -> Vec3 {
    Vec3::new(0.0, 1.0, 0.0)
}

fn default_point_size() -> f32 {
    2.0
}

impl Default for DisplaySpec {
    fn default() -> Self {
        Self {
            preset: default_preset(),
            legend_position: default_legend_position(),
            show_legend: true,
            representation: Representation::default(),
            background: default_background(),
            ambient_color: default_ambient(),
            diffuse_color: default_diffuse(),
            point_size: default_point_size(),
            show_axes_grid: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_representation_names() {
        assert_eq!(Representation::Surface.as_str(), "Surface");
        assert_eq!(Representation::Wireframe.as_str(), "Wireframe");
    }

    #[test]
    fn test_defaults_match_batch_runs() {
        let spec = DisplaySpec::default();
        assert_eq!(spec.preset, "Rainbow Desaturated");
        assert_eq!(spec.representation, Representation::Surface);
        assert_eq!(spec.background, Vec3::ONE);
        assert!(spec.show_legend);
    }
}
