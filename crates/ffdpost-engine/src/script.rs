//! Batch-script engine backend.
//!
//! Accumulates `paraview.simple` statements mirroring the interactive calls
//! the pipeline makes, and writes a pvpython batch script on `finish`. The
//! script is the deliverable: running it under pvpython performs the actual
//! slicing, rendering, and image encoding.
//!
//! Probing is the one operation with no in-process answer here; the
//! [`VizEngine::extract_line`] override emits `PlotOverLine` + `SaveData` so
//! the table is produced engine-side instead.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use glam::Vec3;

use ffdpost_core::{
    CameraSpec, DisplaySpec, LineProbeSpec, PostError, Result, SlicePlane, StreamlineSpec,
};

use crate::engine::VizEngine;
use crate::handle::DatasetHandle;

/// Engine backend that emits a `paraview.simple` batch script.
pub struct ScriptEngine {
    script_path: PathBuf,
    stmts: Vec<String>,
    /// Python variable name per dataset handle.
    names: Vec<String>,
    /// Fields whose transfer-function variables have been emitted.
    luts: HashSet<String>,
    /// Fields whose scalar-bar variables have been emitted.
    bars: HashSet<String>,
    view_emitted: bool,
    reader_count: u32,
    slice_count: u32,
    tracer_count: u32,
    probe_count: u32,
}

impl ScriptEngine {
    /// Creates a backend that will write the batch script to `script_path`.
    pub fn new(script_path: impl Into<PathBuf>) -> Self {
        Self {
            script_path: script_path.into(),
            stmts: Vec::new(),
            names: Vec::new(),
            luts: HashSet::new(),
            bars: HashSet::new(),
            view_emitted: false,
            reader_count: 0,
            slice_count: 0,
            tracer_count: 0,
            probe_count: 0,
        }
    }

    /// The script text as emitted so far, including the header.
    pub fn script_text(&self) -> String {
        let mut text = String::from(SCRIPT_HEADER);
        for stmt in &self.stmts {
            text.push_str(stmt);
            text.push('\n');
        }
        text
    }

    fn push(&mut self, stmt: impl Into<String>) {
        self.stmts.push(stmt.into());
    }

    fn register(&mut self, name: String) -> DatasetHandle {
        let handle = DatasetHandle::new(u32::try_from(self.names.len()).unwrap_or(u32::MAX));
        self.names.push(name);
        handle
    }

    fn name(&self, handle: DatasetHandle) -> Result<&str> {
        self.names
            .get(handle.id() as usize)
            .map(String::as_str)
            .ok_or_else(|| PostError::Render(format!("{handle} does not exist")))
    }

    /// Emits the view accessor once; later calls reuse the `view` variable.
    fn ensure_view(&mut self) {
        if !self.view_emitted {
            self.push("view = GetActiveView()");
            self.push("if not view:");
            self.push("    view = CreateRenderView()");
            self.view_emitted = true;
        }
    }

    /// Emits the transfer-function accessor for a field once.
    fn ensure_lut(&mut self, field: &str) -> String {
        let var = format!("lut_{}", sanitize(field));
        if self.luts.insert(field.to_string()) {
            self.push(format!("{var} = GetColorTransferFunction('{field}')"));
        }
        var
    }

    /// Emits the scalar-bar accessor for a field once.
    fn ensure_bar(&mut self, field: &str) -> String {
        let lut = self.ensure_lut(field);
        self.ensure_view();
        let var = format!("bar_{}", sanitize(field));
        if self.bars.insert(field.to_string()) {
            self.push(format!("{var} = GetScalarBar({lut}, view)"));
        }
        var
    }
}

const SCRIPT_HEADER: &str = "\
# Generated by ffdpost. Run with: pvpython <this file>
from paraview.simple import *

";

/// Turns a field name into a valid Python identifier suffix.
fn sanitize(field: &str) -> String {
    field
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Formats a vector as a Python list literal.
fn py_vec3(v: Vec3) -> String {
    format!("[{}, {}, {}]", v.x, v.y, v.z)
}

/// Formats a path as a Python string literal with forward slashes.
fn py_path(path: &Path) -> String {
    format!("'{}'", path.display().to_string().replace('\\', "/"))
}

impl VizEngine for ScriptEngine {
    fn load(&mut self, paths: &[PathBuf]) -> Result<DatasetHandle> {
        if paths.is_empty() {
            return Err(PostError::Load("no input files given".into()));
        }
        self.reader_count += 1;
        let var = format!("reader{}", self.reader_count);
        let list = paths
            .iter()
            .map(|p| py_path(p))
            .collect::<Vec<_>>()
            .join(", ");
        self.push(format!("{var} = LegacyVTKReader(FileNames=[{list}])"));
        Ok(self.register(var))
    }

    fn slice(&mut self, src: DatasetHandle, plane: &SlicePlane) -> Result<DatasetHandle> {
        let input = self.name(src)?.to_string();
        self.slice_count += 1;
        let var = format!("slice{}", self.slice_count);
        let offsets = plane
            .offsets
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        self.push(format!("{var} = Slice(Input={input})"));
        self.push(format!("{var}.SliceType = 'Plane'"));
        self.push(format!("{var}.SliceOffsetValues = [{offsets}]"));
        self.push(format!("{var}.SliceType.Origin = {}", py_vec3(plane.origin)));
        self.push(format!("{var}.SliceType.Normal = {}", py_vec3(plane.normal)));
        self.push(format!("Hide3DWidgets(proxy={var}.SliceType)"));
        Ok(self.register(var))
    }

    fn stream_tracer(
        &mut self,
        src: DatasetHandle,
        spec: &StreamlineSpec,
    ) -> Result<DatasetHandle> {
        let input = self.name(src)?.to_string();
        self.tracer_count += 1;
        let var = format!("tracer{}", self.tracer_count);
        self.push(format!(
            "{var} = StreamTracer(Input={input}, SeedType='High Resolution Line Source')"
        ));
        self.push(format!(
            "{var}.Vectors = ['POINTS', '{}']",
            spec.vector_field
        ));
        self.push(format!(
            "{var}.MaximumStreamlineLength = {}",
            spec.max_length
        ));
        self.push(format!("{var}.SeedType.Point1 = {}", py_vec3(spec.seed_p1)));
        self.push(format!("{var}.SeedType.Point2 = {}", py_vec3(spec.seed_p2)));
        self.push(format!("{var}.SeedType.Resolution = {}", spec.resolution));
        self.push(format!(
            "{var}.SurfaceStreamlines = {}",
            i32::from(spec.surface_streamlines)
        ));
        self.push(format!("Hide3DWidgets(proxy={var}.SeedType)"));
        // The visible object is the arrow glyphs, not the raw tracer lines;
        // later Show/ColorBy calls target the glyph filter.
        let glyph = format!("glyph{}", self.tracer_count);
        self.push(format!("{glyph} = Glyph(Input={var}, GlyphType='Arrow')"));
        Ok(self.register(glyph))
    }

    fn set_visible(&mut self, handle: DatasetHandle, visible: bool) -> Result<()> {
        let var = self.name(handle)?.to_string();
        if visible {
            self.push(format!("Show({var})"));
        } else {
            self.push(format!("Hide({var})"));
        }
        Ok(())
    }

    fn set_camera(&mut self, camera: &CameraSpec) -> Result<()> {
        self.ensure_view();
        self.push(format!("view.CameraViewUp = {}", py_vec3(camera.view_up)));
        self.push(format!(
            "view.CameraFocalPoint = {}",
            py_vec3(camera.focal_point)
        ));
        self.push(format!(
            "view.CameraPosition = {}",
            py_vec3(camera.position)
        ));
        self.push(format!("view.CameraViewAngle = {}", camera.view_angle_deg));
        Ok(())
    }

    fn set_axes_grid(&mut self, visible: bool) -> Result<()> {
        self.ensure_view();
        self.push(format!("view.AxesGrid.Visibility = {}", i32::from(visible)));
        Ok(())
    }

    fn color_by(&mut self, handle: DatasetHandle, field: &str) -> Result<()> {
        let var = self.name(handle)?.to_string();
        self.push(format!("display = GetDisplayProperties({var})"));
        self.push(format!("ColorBy(display, ('POINTS', '{field}'))"));
        self.push("display.RescaleTransferFunctionToDataRange(True, False)".to_string());
        Ok(())
    }

    fn apply_preset(&mut self, field: &str, preset: &str) -> Result<()> {
        let lut = self.ensure_lut(field);
        self.push(format!("{lut}.ApplyPreset('{preset}', True)"));
        Ok(())
    }

    fn set_legend_visible(
        &mut self,
        handle: DatasetHandle,
        field: &str,
        visible: bool,
    ) -> Result<()> {
        self.name(handle)?;
        let bar = self.ensure_bar(field);
        self.push(format!("{bar}.Visibility = {}", i32::from(visible)));
        Ok(())
    }

    fn set_legend_position(&mut self, field: &str, position: [f32; 2]) -> Result<()> {
        let bar = self.ensure_bar(field);
        self.push(format!(
            "{bar}.Position = [{}, {}]",
            position[0], position[1]
        ));
        Ok(())
    }

    fn set_display(&mut self, handle: DatasetHandle, display: &DisplaySpec) -> Result<()> {
        let var = self.name(handle)?.to_string();
        self.ensure_view();
        self.push(format!("display = GetDisplayProperties({var})"));
        self.push(format!(
            "display.Representation = '{}'",
            display.representation.as_str()
        ));
        self.push(format!(
            "display.AmbientColor = {}",
            py_vec3(display.ambient_color)
        ));
        self.push(format!(
            "display.DiffuseColor = {}",
            py_vec3(display.diffuse_color)
        ));
        self.push(format!("display.PointSize = {}", display.point_size));
        self.push(format!("view.Background = {}", py_vec3(display.background)));
        Ok(())
    }

    fn set_view_size(&mut self, width: u32, height: u32) -> Result<()> {
        self.ensure_view();
        self.push(format!("view.ViewSize = [{width}, {height}]"));
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        self.push("Render()");
        Ok(())
    }

    fn write_image(&mut self, path: &Path) -> Result<()> {
        self.ensure_view();
        self.push(format!("SaveScreenshot({}, view)", py_path(path)));
        Ok(())
    }

    fn probe_line(
        &mut self,
        _handle: DatasetHandle,
        _positions: &[Vec3],
        _fields: &[String],
    ) -> Result<Vec<Vec<f64>>> {
        Err(PostError::Render(
            "script backend cannot probe in-process; extraction runs engine-side".into(),
        ))
    }

    fn field_names(&self, _handle: DatasetHandle) -> Result<Vec<String>> {
        Err(PostError::Render(
            "script backend cannot enumerate fields before the engine runs".into(),
        ))
    }

    /// Engine-side extraction: `PlotOverLine` + `SaveData` instead of an
    /// in-process probe.
    fn extract_line(
        &mut self,
        handle: DatasetHandle,
        spec: &LineProbeSpec,
        out: &Path,
    ) -> Result<()> {
        let input = self.name(handle)?.to_string();
        self.probe_count += 1;
        let var = format!("plotLine{}", self.probe_count);
        self.push(format!(
            "{var} = PlotOverLine(Input={input}, Source='High Resolution Line Source')"
        ));
        self.push(format!("{var}.Source.Point1 = {}", py_vec3(spec.p1)));
        self.push(format!("{var}.Source.Point2 = {}", py_vec3(spec.p2)));
        // PlotOverLine counts segments, not points.
        self.push(format!("{var}.Source.Resolution = {}", spec.samples - 1));
        self.push(format!("SaveData({}, proxy={var})", py_path(out)));
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let text = self.script_text();
        std::fs::write(&self.script_path, text).map_err(|e| {
            PostError::Write(format!(
                "cannot write script {}: {e}",
                self.script_path.display()
            ))
        })?;
        log::info!(
            "wrote {} statements to {}",
            self.stmts.len(),
            self.script_path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ScriptEngine {
        ScriptEngine::new("post.py")
    }

    #[test]
    fn test_load_emits_reader() {
        let mut e = engine();
        e.load(&[PathBuf::from("result.vtk")]).unwrap();
        let text = e.script_text();
        assert!(text.contains("reader1 = LegacyVTKReader(FileNames=['result.vtk'])"));
        assert!(text.starts_with("# Generated by ffdpost"));
    }

    #[test]
    fn test_slice_emits_plane_and_hides_widget() {
        let mut e = engine();
        let data = e.load(&[PathBuf::from("result.vtk")]).unwrap();
        e.slice(data, &SlicePlane::default()).unwrap();
        let text = e.script_text();
        assert!(text.contains("slice1 = Slice(Input=reader1)"));
        assert!(text.contains("slice1.SliceType.Origin = [0.5, 0.5, 0.5]"));
        assert!(text.contains("slice1.SliceType.Normal = [0, 1, 0]"));
        assert!(text.contains("Hide3DWidgets(proxy=slice1.SliceType)"));
    }

    #[test]
    fn test_view_emitted_once() {
        let mut e = engine();
        e.set_camera(&CameraSpec::default()).unwrap();
        e.set_view_size(936, 813).unwrap();
        let text = e.script_text();
        assert_eq!(text.matches("view = GetActiveView()").count(), 1);
        assert!(text.contains("view.CameraViewAngle = 45"));
        assert!(text.contains("view.ViewSize = [936, 813]"));
    }

    #[test]
    fn test_tracer_emits_seed_line() {
        let mut e = engine();
        let data = e.load(&[PathBuf::from("result.vtk")]).unwrap();
        let slice = e.slice(data, &SlicePlane::default()).unwrap();
        e.stream_tracer(slice, &StreamlineSpec::default()).unwrap();
        let text = e.script_text();
        assert!(text.contains("tracer1 = StreamTracer(Input=slice1"));
        assert!(text.contains("tracer1.SeedType.Point1 = [0, 0.5, 0]"));
        assert!(text.contains("tracer1.SeedType.Resolution = 200"));
        assert!(text.contains("tracer1.SurfaceStreamlines = 1"));
        assert!(text.contains("glyph1 = Glyph(Input=tracer1, GlyphType='Arrow')"));
    }

    #[test]
    fn test_axes_grid_toggle() {
        let mut e = engine();
        e.set_axes_grid(true).unwrap();
        assert!(e.script_text().contains("view.AxesGrid.Visibility = 1"));
    }

    #[test]
    fn test_legend_uses_shared_lut_var() {
        let mut e = engine();
        let data = e.load(&[PathBuf::from("result.vtk")]).unwrap();
        e.apply_preset("T", "Rainbow Desaturated").unwrap();
        e.set_legend_visible(data, "T", true).unwrap();
        e.set_legend_position("T", [0.85, 0.05]).unwrap();
        let text = e.script_text();
        assert_eq!(
            text.matches("lut_T = GetColorTransferFunction('T')").count(),
            1
        );
        assert!(text.contains("lut_T.ApplyPreset('Rainbow Desaturated', True)"));
        assert!(text.contains("bar_T.Visibility = 1"));
        assert!(text.contains("bar_T.Position = [0.85, 0.05]"));
    }

    #[test]
    fn test_extract_line_emits_plot_over_line() {
        let mut e = engine();
        let data = e.load(&[PathBuf::from("result.vtk")]).unwrap();
        let spec = LineProbeSpec::new(Vec3::ZERO, Vec3::ONE, 50);
        e.extract_line(data, &spec, Path::new("line.csv")).unwrap();
        let text = e.script_text();
        assert!(text.contains("plotLine1 = PlotOverLine(Input=reader1"));
        assert!(text.contains("plotLine1.Source.Resolution = 49"));
        assert!(text.contains("SaveData('line.csv', proxy=plotLine1)"));
    }

    #[test]
    fn test_finish_writes_script() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("post.py");
        let mut e = ScriptEngine::new(&path);
        e.load(&[PathBuf::from("result.vtk")]).unwrap();
        e.finish().unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("from paraview.simple import *"));
        assert!(text.contains("LegacyVTKReader"));
    }

    #[test]
    fn test_sanitize_field_names() {
        assert_eq!(sanitize("VEL"), "VEL");
        assert_eq!(sanitize("vel mag"), "vel_mag");
    }
}
