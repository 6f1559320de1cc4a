//! In-memory engine backend for tests and dry runs.
//!
//! Executes the full `VizEngine` surface against synthetic datasets with a
//! deterministic analytic field function, and records every call so tests can
//! assert ordering contracts (source hidden after slicing, one legend visible
//! per save, surface-streamline flag set before the screenshot).

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use glam::Vec3;

use ffdpost_core::{
    CameraSpec, DisplaySpec, PostError, Result, SlicePlane, StreamlineSpec,
};

use crate::engine::VizEngine;
use crate::handle::DatasetHandle;

/// One recorded engine invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Load { paths: Vec<PathBuf> },
    Slice { src: DatasetHandle, out: DatasetHandle },
    StreamTracer {
        src: DatasetHandle,
        out: DatasetHandle,
        vector_field: String,
        surface_streamlines: bool,
    },
    SetVisible { handle: DatasetHandle, visible: bool },
    SetCamera { position: Vec3 },
    SetAxesGrid { visible: bool },
    ColorBy { handle: DatasetHandle, field: String },
    ApplyPreset { field: String, preset: String },
    SetLegendVisible { field: String, visible: bool },
    SetLegendPosition { field: String, position: [f32; 2] },
    SetDisplay { handle: DatasetHandle, representation: String },
    SetViewSize { width: u32, height: u32 },
    Render,
    WriteImage { path: PathBuf },
    ProbeLine { handle: DatasetHandle, samples: usize },
    Finish,
}

/// A synthetic dataset held by the recording engine.
#[derive(Debug, Clone)]
struct DatasetRecord {
    label: String,
    fields: Vec<String>,
    visible: bool,
}

/// Test/dry-run backend: synthetic datasets plus a full call log.
pub struct RecordingEngine {
    datasets: Vec<DatasetRecord>,
    calls: Vec<EngineCall>,
    /// Legends currently visible, by field name.
    legends: BTreeSet<String>,
    /// Fields attached to every loaded dataset.
    load_fields: Vec<String>,
    /// When set, `write_image` records the call but touches no files.
    dry_run: bool,
}

impl RecordingEngine {
    /// Creates an engine whose loaded datasets carry the batch-run fields
    /// `T`, `VEL`, and `P`.
    pub fn new() -> Self {
        Self::with_fields(vec!["T".into(), "VEL".into(), "P".into()])
    }

    /// Creates an engine whose loaded datasets carry the given fields.
    pub fn with_fields(fields: Vec<String>) -> Self {
        Self {
            datasets: Vec::new(),
            calls: Vec::new(),
            legends: BTreeSet::new(),
            load_fields: fields,
            dry_run: false,
        }
    }

    /// Disables file output; calls are still recorded.
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// The full call log, in invocation order.
    pub fn calls(&self) -> &[EngineCall] {
        &self.calls
    }

    /// Fields whose legends are currently visible.
    pub fn visible_legends(&self) -> Vec<String> {
        self.legends.iter().cloned().collect()
    }

    /// Whether the dataset is currently shown in the view.
    pub fn is_visible(&self, handle: DatasetHandle) -> bool {
        self.datasets
            .get(handle.id() as usize)
            .is_some_and(|d| d.visible)
    }

    fn register(&mut self, label: String, fields: Vec<String>) -> DatasetHandle {
        let handle = DatasetHandle::new(u32::try_from(self.datasets.len()).unwrap_or(u32::MAX));
        self.datasets.push(DatasetRecord {
            label,
            fields,
            visible: false,
        });
        handle
    }

    fn dataset(&self, handle: DatasetHandle) -> Result<&DatasetRecord> {
        self.datasets
            .get(handle.id() as usize)
            .ok_or_else(|| PostError::Render(format!("{handle} does not exist")))
    }

    fn require_field(&self, handle: DatasetHandle, field: &str) -> Result<()> {
        let dataset = self.dataset(handle)?;
        if dataset.fields.iter().any(|f| f == field) {
            Ok(())
        } else {
            Err(PostError::UnknownField {
                field: field.to_string(),
                dataset: dataset.label.clone(),
            })
        }
    }

    /// Deterministic stand-in for real field data: smooth, distinct per
    /// field, so probe output is stable across runs.
    fn sample(position: Vec3, field_index: usize) -> f64 {
        let k = field_index as f32 + 1.0;
        f64::from(k * position.x + 0.5 * position.y - 0.25 * k * position.z)
    }
}

impl Default for RecordingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl VizEngine for RecordingEngine {
    fn load(&mut self, paths: &[PathBuf]) -> Result<DatasetHandle> {
        if paths.is_empty() {
            return Err(PostError::Load("no input files given".into()));
        }
        let label = paths[0].display().to_string();
        let fields = self.load_fields.clone();
        let handle = self.register(label, fields);
        self.calls.push(EngineCall::Load {
            paths: paths.to_vec(),
        });
        Ok(handle)
    }

    fn slice(&mut self, src: DatasetHandle, _plane: &SlicePlane) -> Result<DatasetHandle> {
        let record = self.dataset(src)?;
        let label = format!("{} (slice)", record.label);
        let fields = record.fields.clone();
        let out = self.register(label, fields);
        self.calls.push(EngineCall::Slice { src, out });
        Ok(out)
    }

    fn stream_tracer(
        &mut self,
        src: DatasetHandle,
        spec: &StreamlineSpec,
    ) -> Result<DatasetHandle> {
        self.require_field(src, &spec.vector_field)?;
        let record = self.dataset(src)?;
        let label = format!("{} (streamlines)", record.label);
        let fields = record.fields.clone();
        let out = self.register(label, fields);
        self.calls.push(EngineCall::StreamTracer {
            src,
            out,
            vector_field: spec.vector_field.clone(),
            surface_streamlines: spec.surface_streamlines,
        });
        Ok(out)
    }

    fn set_visible(&mut self, handle: DatasetHandle, visible: bool) -> Result<()> {
        self.dataset(handle)?;
        self.datasets[handle.id() as usize].visible = visible;
        self.calls.push(EngineCall::SetVisible { handle, visible });
        Ok(())
    }

    fn set_camera(&mut self, camera: &CameraSpec) -> Result<()> {
        self.calls.push(EngineCall::SetCamera {
            position: camera.position,
        });
        Ok(())
    }

    fn set_axes_grid(&mut self, visible: bool) -> Result<()> {
        self.calls.push(EngineCall::SetAxesGrid { visible });
        Ok(())
    }

    fn color_by(&mut self, handle: DatasetHandle, field: &str) -> Result<()> {
        self.require_field(handle, field)?;
        self.calls.push(EngineCall::ColorBy {
            handle,
            field: field.to_string(),
        });
        Ok(())
    }

    fn apply_preset(&mut self, field: &str, preset: &str) -> Result<()> {
        self.calls.push(EngineCall::ApplyPreset {
            field: field.to_string(),
            preset: preset.to_string(),
        });
        Ok(())
    }

    fn set_legend_visible(
        &mut self,
        handle: DatasetHandle,
        field: &str,
        visible: bool,
    ) -> Result<()> {
        self.dataset(handle)?;
        if visible {
            self.legends.insert(field.to_string());
        } else {
            self.legends.remove(field);
        }
        self.calls.push(EngineCall::SetLegendVisible {
            field: field.to_string(),
            visible,
        });
        Ok(())
    }

    fn set_legend_position(&mut self, field: &str, position: [f32; 2]) -> Result<()> {
        self.calls.push(EngineCall::SetLegendPosition {
            field: field.to_string(),
            position,
        });
        Ok(())
    }

    fn set_display(&mut self, handle: DatasetHandle, display: &DisplaySpec) -> Result<()> {
        self.dataset(handle)?;
        self.calls.push(EngineCall::SetDisplay {
            handle,
            representation: display.representation.as_str().to_string(),
        });
        Ok(())
    }

    fn set_view_size(&mut self, width: u32, height: u32) -> Result<()> {
        self.calls.push(EngineCall::SetViewSize { width, height });
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        self.calls.push(EngineCall::Render);
        Ok(())
    }

    fn write_image(&mut self, path: &Path) -> Result<()> {
        if !self.dry_run {
            // PNG signature only; enough for existence checks.
            std::fs::write(path, [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A])
                .map_err(|e| PostError::Write(format!("cannot write {}: {e}", path.display())))?;
        }
        self.calls.push(EngineCall::WriteImage {
            path: path.to_path_buf(),
        });
        Ok(())
    }

    fn probe_line(
        &mut self,
        handle: DatasetHandle,
        positions: &[Vec3],
        fields: &[String],
    ) -> Result<Vec<Vec<f64>>> {
        let field_indices: Vec<usize> = fields
            .iter()
            .map(|field| {
                let dataset = self.dataset(handle)?;
                dataset
                    .fields
                    .iter()
                    .position(|f| f == field)
                    .ok_or_else(|| PostError::UnknownField {
                        field: field.clone(),
                        dataset: dataset.label.clone(),
                    })
            })
            .collect::<Result<_>>()?;

        self.calls.push(EngineCall::ProbeLine {
            handle,
            samples: positions.len(),
        });

        Ok(positions
            .iter()
            .map(|&p| field_indices.iter().map(|&i| Self::sample(p, i)).collect())
            .collect())
    }

    fn field_names(&self, handle: DatasetHandle) -> Result<Vec<String>> {
        Ok(self.dataset(handle)?.fields.clone())
    }

    fn finish(&mut self) -> Result<()> {
        self.calls.push(EngineCall::Finish);
        Ok(())
    }
}
