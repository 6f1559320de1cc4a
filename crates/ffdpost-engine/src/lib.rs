//! Engine seam for ffdpost.
//!
//! The computational and rendering core (geometry cutting, transfer-function
//! mapping, streamline integration, rasterization) lives in an external
//! visualization engine. This crate defines the exact surface the pipeline
//! consumes, as the [`VizEngine`] trait, plus two backends:
//!
//! - [`ScriptEngine`] emits a `paraview.simple` batch script for pvpython
//! - [`RecordingEngine`] executes in memory against synthetic datasets and
//!   keeps a call log, for tests and dry runs
//!
//! The external engine's implicit active-source/active-view state never leaks
//! into this API: every call names its dataset through a [`DatasetHandle`].

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod engine;
pub mod handle;
pub mod recording;
pub mod script;

pub use engine::VizEngine;
pub use handle::DatasetHandle;
pub use recording::{EngineCall, RecordingEngine};
pub use script::ScriptEngine;
