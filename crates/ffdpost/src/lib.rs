//! ffdpost: batch post-processing for CFD/FFD simulation results.
//!
//! Drives a ParaView-class visualization engine through a fixed pipeline:
//! load a legacy VTK result file, cut it with a plane, save one contour
//! screenshot per scalar field, save a streamline plot of the velocity
//! field, and extract field values along probe lines into CSV tables.
//!
//! # Quick Start
//!
//! ```no_run
//! use ffdpost::{Pipeline, PipelineConfig, ScriptEngine, VizEngine};
//!
//! fn main() -> ffdpost::Result<()> {
//!     let config = PipelineConfig::default(); // result.vtk, T + VEL contours
//!     let mut engine = ScriptEngine::new("post.py");
//!     let report = Pipeline::new(config)?.run(&mut engine)?;
//!     println!("{}", report.summary());
//!     Ok(())
//! }
//! ```
//!
//! The engine's implicit active-source/active-view state never appears in
//! this API: the pipeline threads each stage's dataset handle explicitly.

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod pipeline;
pub mod report;

pub use pipeline::Pipeline;
pub use report::PipelineReport;

// Re-export the spec and engine types callers need
pub use ffdpost_core::{
    CameraSpec, DisplaySpec, LineProbeConfig, LineProbeSpec, PipelineConfig, PostError,
    Representation, Result, ScreenshotSpec, SlicePlane, StreamlineConfig, StreamlineSpec, Vec3,
};
pub use ffdpost_engine::{DatasetHandle, EngineCall, RecordingEngine, ScriptEngine, VizEngine};
