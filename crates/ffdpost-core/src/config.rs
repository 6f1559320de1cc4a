//! Pipeline configuration.
//!
//! The original scripts hard-coded every parameter (file path, slice
//! geometry, field names, seed points, image size) and were edited per run.
//! Here one serde structure carries the whole parameter set, loaded from a
//! TOML or JSON file with built-in defaults matching the original batch runs;
//! the CLI layers its overrides on top.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::camera::CameraSpec;
use crate::display::DisplaySpec;
use crate::error::{PostError, Result};
use crate::line_probe::LineProbeSpec;
use crate::screenshot::DEFAULT_IMAGE_SIZE;
use crate::slice_plane::SlicePlane;
use crate::streamline::StreamlineSpec;

/// A streamline stage plus its output name stem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamlineConfig {
    #[serde(flatten)]
    pub spec: StreamlineSpec,
    /// Screenshot name stem for the streamline plot.
    #[serde(default = "default_streamline_stem")]
    pub stem: String,
}

fn default_streamline_stem() -> String {
    "Vel_Str".to_string()
}

impl Default for StreamlineConfig {
    fn default() -> Self {
        Self {
            spec: StreamlineSpec::default(),
            stem: default_streamline_stem(),
        }
    }
}

/// A line probe plus its output name stem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineProbeConfig {
    #[serde(flatten)]
    pub spec: LineProbeSpec,
    /// Table name stem; the writer appends `.csv`.
    pub stem: String,
}

/// The full parameter set for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Input mesh/field files (legacy VTK).
    pub input: Vec<PathBuf>,
    /// Directory all images and tables are written into.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// The cut plane.
    #[serde(default)]
    pub slice: SlicePlane,
    /// Camera pose applied after slicing.
    #[serde(default)]
    pub camera: CameraSpec,
    /// Display properties shared by every screenshot.
    #[serde(default)]
    pub display: DisplaySpec,
    /// Scalar fields to render as contour plots, one screenshot each.
    #[serde(default = "default_contour_fields")]
    pub contour_fields: Vec<String>,
    /// Optional streamline stage.
    #[serde(default)]
    pub streamline: Option<StreamlineConfig>,
    /// Optional line probes.
    #[serde(default)]
    pub probes: Vec<LineProbeConfig>,
    /// Screenshot width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Screenshot height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_contour_fields() -> Vec<String> {
    vec!["T".to_string(), "VEL".to_string()]
}

fn default_width() -> u32 {
    DEFAULT_IMAGE_SIZE.0
}

fn default_height() -> u32 {
    DEFAULT_IMAGE_SIZE.1
}

impl Default for PipelineConfig {
    /// The original batch run: `result.vtk`, mid-plane +Y cut, T and VEL
    /// contours, one velocity streamline plot.
    fn default() -> Self {
        Self {
            input: vec![PathBuf::from("result.vtk")],
            output_dir: default_output_dir(),
            slice: SlicePlane::default(),
            camera: CameraSpec::default(),
            display: DisplaySpec::default(),
            contour_fields: default_contour_fields(),
            streamline: Some(StreamlineConfig::default()),
            probes: Vec::new(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl PipelineConfig {
    /// Loads a configuration file, dispatching on the extension
    /// (`.toml` or `.json`).
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| PostError::Config(format!("cannot read {}: {e}", path.display())))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(toml::from_str(&text)?),
            Some("json") => Ok(serde_json::from_str(&text)?),
            other => Err(PostError::Config(format!(
                "unsupported config extension {other:?} (expected .toml or .json)"
            ))),
        }
    }

    /// Validates every stage spec before the engine sees any of them.
    pub fn validate(&self) -> Result<()> {
        if self.input.is_empty() {
            return Err(PostError::Config("no input files configured".into()));
        }
        self.slice.validate()?;
        if self.width == 0 || self.height == 0 {
            return Err(PostError::Write(format!(
                "screenshot size {}x{} has zero area",
                self.width, self.height
            )));
        }
        if let Some(streamline) = &self.streamline {
            streamline.spec.validate()?;
            if streamline.stem.is_empty() {
                return Err(PostError::Config("streamline stem is empty".into()));
            }
        }
        for probe in &self.probes {
            probe.spec.validate()?;
            if probe.stem.is_empty() {
                return Err(PostError::Config("probe stem is empty".into()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_default_config_is_valid() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_size_rejected() {
        let mut config = PipelineConfig::default();
        config.width = 0;
        assert!(matches!(config.validate(), Err(PostError::Write(_))));
    }

    #[test]
    fn test_no_input_rejected() {
        let mut config = PipelineConfig::default();
        config.input.clear();
        assert!(matches!(config.validate(), Err(PostError::Config(_))));
    }

    #[test]
    fn test_degenerate_streamline_rejected() {
        let mut config = PipelineConfig::default();
        let streamline = config.streamline.as_mut().unwrap();
        streamline.spec.seed_p2 = streamline.spec.seed_p1;
        assert!(matches!(
            config.validate(),
            Err(PostError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_parse_toml() {
        let text = r#"
            input = ["result.vtk"]
            contour_fields = ["T"]

            [slice]
            origin = [0.5, 0.5, 0.5]
            normal = [0.0, 1.0, 0.0]

            [streamline]
            vector_field = "VEL"
            color_field = "VEL"
            seed_p1 = [0.0, 0.5, 0.0]
            seed_p2 = [1.0, 0.5, 1.0]
        "#;
        let config: PipelineConfig = toml::from_str(text).unwrap();
        assert_eq!(config.contour_fields, vec!["T"]);
        assert_eq!(config.width, 936);
        let streamline = config.streamline.unwrap();
        assert_eq!(streamline.stem, "Vel_Str");
        assert_eq!(streamline.spec.resolution, 200);
        assert_eq!(streamline.spec.seed_p2, Vec3::new(1.0, 0.5, 1.0));
    }

    #[test]
    fn test_parse_json() {
        let text = r#"{
            "input": ["result.vtk"],
            "contour_fields": ["T", "VEL"],
            "width": 200,
            "height": 300
        }"#;
        let config: PipelineConfig = serde_json::from_str(text).unwrap();
        assert_eq!(config.width, 200);
        assert_eq!(config.height, 300);
        assert!(config.streamline.is_none());
    }

    #[test]
    fn test_from_file_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("post.toml");
        std::fs::write(&path, "input = [\"result.vtk\"]\n").unwrap();
        let config = PipelineConfig::from_file(&path).unwrap();
        assert_eq!(config.input, vec![PathBuf::from("result.vtk")]);

        let bad = dir.path().join("post.yaml");
        std::fs::write(&bad, "input: [result.vtk]\n").unwrap();
        assert!(matches!(
            PipelineConfig::from_file(&bad),
            Err(PostError::Config(_))
        ));
    }
}
