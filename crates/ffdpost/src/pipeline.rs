//! The post-processing pipeline.
//!
//! Call order is strictly linear, matching the batch runs this replaces:
//! load → slice → contour per field → streamlines → line probes. Each stage
//! receives the handle the previous stage produced; nothing relies on the
//! engine's ambient "active source".

use std::path::PathBuf;

use ffdpost_core::{
    LineProbeConfig, PipelineConfig, Result, ScreenshotSpec, StreamlineConfig,
};
use ffdpost_engine::{DatasetHandle, VizEngine};

use crate::report::PipelineReport;

/// One configured post-processing run.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Validates the configuration and builds a pipeline.
    ///
    /// All geometry and viewport checks happen here, so a degenerate config
    /// fails before the engine sees a single call.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs every configured stage against `engine`.
    pub fn run(&self, engine: &mut dyn VizEngine) -> Result<PipelineReport> {
        let mut report = PipelineReport::default();

        let data = self.load_stage(engine)?;
        let slice = self.slice_stage(engine, data)?;

        let last_legend = self.contour_stage(engine, slice, &mut report)?;

        if let Some(streamline) = &self.config.streamline {
            // The streamline plot gets its own legend; drop the last
            // contour legend first so only one is visible at the save.
            if let Some(field) = &last_legend {
                if field != &streamline.spec.color_field {
                    engine.set_legend_visible(slice, field, false)?;
                }
            }
            self.streamline_stage(engine, slice, streamline, &mut report)?;
        }

        for probe in &self.config.probes {
            self.extract_stage(engine, slice, probe, &mut report)?;
        }

        engine.finish()?;
        log::info!("{}", report.summary());
        Ok(report)
    }

    /// Loads the input files and shows the dataset.
    fn load_stage(&self, engine: &mut dyn VizEngine) -> Result<DatasetHandle> {
        log::info!("loading {:?}", self.config.input);
        let data = engine.load(&self.config.input)?;
        engine.set_visible(data, true)?;
        Ok(data)
    }

    /// Cuts the plane, hides the 3D source, and poses the camera.
    ///
    /// After this stage exactly one object is visible: the new slice.
    fn slice_stage(
        &self,
        engine: &mut dyn VizEngine,
        data: DatasetHandle,
    ) -> Result<DatasetHandle> {
        log::info!(
            "slicing at origin {:?} normal {:?}",
            self.config.slice.origin,
            self.config.slice.normal
        );
        let slice = engine.slice(data, &self.config.slice)?;
        engine.set_visible(data, false)?;
        engine.set_visible(slice, true)?;
        engine.set_camera(&self.config.camera)?;
        engine.set_axes_grid(self.config.display.show_axes_grid)?;
        Ok(slice)
    }

    /// Saves one contour screenshot per configured scalar field.
    ///
    /// The previous field's legend is hidden strictly before the current
    /// one is shown, so no two legends coexist at any save. Returns the
    /// field whose legend is still visible, if any.
    fn contour_stage(
        &self,
        engine: &mut dyn VizEngine,
        slice: DatasetHandle,
        report: &mut PipelineReport,
    ) -> Result<Option<String>> {
        let display = &self.config.display;
        let mut previous: Option<&str> = None;

        for field in &self.config.contour_fields {
            log::info!("contour plot of '{field}'");
            if let Some(prev) = previous {
                engine.set_legend_visible(slice, prev, false)?;
            }
            engine.color_by(slice, field)?;
            engine.apply_preset(field, &display.preset)?;
            if display.show_legend {
                engine.set_legend_visible(slice, field, true)?;
                engine.set_legend_position(field, display.legend_position)?;
            }
            self.save_screenshot(engine, slice, field, report)?;
            previous = Some(field);
        }

        Ok(previous.filter(|_| display.show_legend).map(String::from))
    }

    /// Traces streamlines on the slice and saves the plot.
    ///
    /// The tracer spec carries the surface-streamlines flag, so the
    /// constraint is in place before the screenshot.
    fn streamline_stage(
        &self,
        engine: &mut dyn VizEngine,
        slice: DatasetHandle,
        streamline: &StreamlineConfig,
        report: &mut PipelineReport,
    ) -> Result<()> {
        let spec = &streamline.spec;
        log::info!(
            "streamlines of '{}' seeded {:?} -> {:?}",
            spec.vector_field,
            spec.seed_p1,
            spec.seed_p2
        );
        let tracer = engine.stream_tracer(slice, spec)?;
        engine.set_visible(tracer, true)?;
        engine.color_by(tracer, &spec.color_field)?;
        engine.apply_preset(&spec.color_field, &self.config.display.preset)?;
        if self.config.display.show_legend {
            engine.set_legend_visible(tracer, &spec.color_field, true)?;
            engine.set_legend_position(&spec.color_field, self.config.display.legend_position)?;
        }
        self.save_screenshot(engine, tracer, &streamline.stem, report)
    }

    /// Samples fields along a probe line into a CSV table.
    fn extract_stage(
        &self,
        engine: &mut dyn VizEngine,
        slice: DatasetHandle,
        probe: &LineProbeConfig,
        report: &mut PipelineReport,
    ) -> Result<()> {
        log::info!(
            "extracting {} samples {:?} -> {:?}",
            probe.spec.samples,
            probe.spec.p1,
            probe.spec.p2
        );
        let path = self.config.output_dir.join(format!("{}.csv", probe.stem));
        engine.extract_line(slice, &probe.spec, &path)?;
        report.tables.push(path);
        Ok(())
    }

    /// The shared save routine: viewport size, surface representation,
    /// re-render, write `<stem>.png` into the output directory.
    fn save_screenshot(
        &self,
        engine: &mut dyn VizEngine,
        handle: DatasetHandle,
        stem: &str,
        report: &mut PipelineReport,
    ) -> Result<()> {
        let spec = ScreenshotSpec::new(self.config.width, self.config.height, stem);
        spec.validate()?;
        engine.set_view_size(spec.width, spec.height)?;
        engine.set_display(handle, &self.config.display)?;
        engine.render()?;
        let path: PathBuf = self.config.output_dir.join(spec.file_name());
        engine.write_image(&path)?;
        report.images.push(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffdpost_core::PostError;
    use ffdpost_engine::RecordingEngine;
    use glam::Vec3;

    fn dry_config() -> PipelineConfig {
        PipelineConfig::default()
    }

    #[test]
    fn test_degenerate_normal_rejected_before_run() {
        let mut config = dry_config();
        config.slice.normal = Vec3::ZERO;
        assert!(matches!(
            Pipeline::new(config),
            Err(PostError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_zero_viewport_rejected_before_run() {
        let mut config = dry_config();
        config.height = 0;
        assert!(matches!(Pipeline::new(config), Err(PostError::Write(_))));
    }

    #[test]
    fn test_run_produces_one_image_per_field_plus_streamlines() {
        let pipeline = Pipeline::new(dry_config()).unwrap();
        let mut engine = RecordingEngine::new().dry_run();
        let report = pipeline.run(&mut engine).unwrap();

        let names: Vec<String> = report
            .images
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["T.png", "VEL.png", "Vel_Str.png"]);
    }

    #[test]
    fn test_source_hidden_after_slice() {
        let pipeline = Pipeline::new(dry_config()).unwrap();
        let mut engine = RecordingEngine::new().dry_run();
        pipeline.run(&mut engine).unwrap();

        use ffdpost_engine::EngineCall;
        let calls = engine.calls();
        let (src, out) = calls
            .iter()
            .find_map(|c| match c {
                EngineCall::Slice { src, out } => Some((*src, *out)),
                _ => None,
            })
            .expect("slice call missing");
        assert!(!engine.is_visible(src));
        assert_ne!(src, out);
    }

    #[test]
    fn test_unknown_contour_field_surfaces() {
        let mut config = dry_config();
        config.contour_fields = vec!["MISSING".to_string()];
        let pipeline = Pipeline::new(config).unwrap();
        let mut engine = RecordingEngine::new().dry_run();
        assert!(matches!(
            pipeline.run(&mut engine),
            Err(PostError::UnknownField { .. })
        ));
    }
}
