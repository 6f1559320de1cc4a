//! The `VizEngine` trait: the external surface the pipeline consumes.

use std::path::{Path, PathBuf};

use glam::Vec3;

use ffdpost_core::{
    write_delimited, CameraSpec, DisplaySpec, LineProbeSpec, Result, SlicePlane, StreamlineSpec,
};

use crate::handle::DatasetHandle;

/// The visualization-engine operations the pipeline depends on.
///
/// This is a direct transcription of the engine surface the batch runs
/// consume: dataset loader, slice filter, streamline tracer, display and
/// transfer-function mutation, legend control, and screenshot writing.
///
/// Everything takes `&mut self`: the underlying engines track a single
/// active view mutated in place and are not designed for concurrent use, so
/// the single-writer model is enforced at the type level.
pub trait VizEngine {
    /// Loads one or more mesh/field files as a single dataset and makes it
    /// visible.
    fn load(&mut self, paths: &[PathBuf]) -> Result<DatasetHandle>;

    /// Cuts `src` with a plane, producing a new 2D dataset.
    ///
    /// The caller is responsible for hiding the source afterwards; the cut
    /// itself must not change any visibility.
    fn slice(&mut self, src: DatasetHandle, plane: &SlicePlane) -> Result<DatasetHandle>;

    /// Integrates streamlines of `spec.vector_field` on `src` from a line of
    /// seed points, producing a new dataset of glyph geometry.
    fn stream_tracer(&mut self, src: DatasetHandle, spec: &StreamlineSpec)
        -> Result<DatasetHandle>;

    /// Shows or hides a dataset in the active view.
    fn set_visible(&mut self, handle: DatasetHandle, visible: bool) -> Result<()>;

    /// Applies a camera pose to the active view, creating the view if none
    /// exists yet.
    fn set_camera(&mut self, camera: &CameraSpec) -> Result<()>;

    /// Shows or hides the active view's axis grid.
    fn set_axes_grid(&mut self, visible: bool) -> Result<()>;

    /// Colors `handle` by the point-sampled values of `field` and rescales
    /// the transfer function to the field's data range.
    fn color_by(&mut self, handle: DatasetHandle, field: &str) -> Result<()>;

    /// Applies a named color preset to `field`'s transfer function.
    fn apply_preset(&mut self, field: &str, preset: &str) -> Result<()>;

    /// Shows or hides the color legend for `field` on `handle`.
    fn set_legend_visible(
        &mut self,
        handle: DatasetHandle,
        field: &str,
        visible: bool,
    ) -> Result<()>;

    /// Moves `field`'s legend to a normalized view position.
    fn set_legend_position(&mut self, field: &str, position: [f32; 2]) -> Result<()>;

    /// Applies display properties (representation, colors, background,
    /// point size) to `handle`.
    fn set_display(&mut self, handle: DatasetHandle, display: &DisplaySpec) -> Result<()>;

    /// Resizes the active view's viewport.
    fn set_view_size(&mut self, width: u32, height: u32) -> Result<()>;

    /// Forces a re-render of the active view.
    fn render(&mut self) -> Result<()>;

    /// Writes the current framebuffer to `path`.
    fn write_image(&mut self, path: &Path) -> Result<()>;

    /// Samples `fields` of `handle` at each position; returns one row per
    /// position, one value per field.
    fn probe_line(
        &mut self,
        handle: DatasetHandle,
        positions: &[Vec3],
        fields: &[String],
    ) -> Result<Vec<Vec<f64>>>;

    /// Names of the fields present on `handle`.
    fn field_names(&self, handle: DatasetHandle) -> Result<Vec<String>>;

    /// Samples fields along a line and writes the result as a delimited
    /// table.
    ///
    /// The default implementation probes in-process and serializes with the
    /// core table writer; backends that cannot probe (the batch-script
    /// backend) override this with an engine-side extraction.
    fn extract_line(
        &mut self,
        handle: DatasetHandle,
        spec: &LineProbeSpec,
        out: &Path,
    ) -> Result<()> {
        let fields = if spec.fields.is_empty() {
            self.field_names(handle)?
        } else {
            spec.fields.clone()
        };
        let positions = spec.sample_points();
        let rows = self.probe_line(handle, &positions, &fields)?;
        write_delimited(out, &fields, &positions, &rows)
    }

    /// Flushes any pending output (the script backend writes its file here).
    fn finish(&mut self) -> Result<()>;
}
