//! Core types for ffdpost.
//!
//! This crate provides the value types shared by the pipeline and its engine
//! backends:
//! - Stage specifications ([`SlicePlane`], [`StreamlineSpec`], [`ScreenshotSpec`],
//!   [`LineProbeSpec`], ...) with explicit validation
//! - The [`PostError`] taxonomy and `Result` alias
//! - [`PipelineConfig`] loaded from TOML/JSON files
//!
//! Every spec is validated *before* any engine call is issued; the external
//! visualization engine only ever sees well-formed requests.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Spec structs legitimately have many boolean flags
#![allow(clippy::struct_excessive_bools)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod camera;
pub mod config;
pub mod display;
pub mod error;
pub mod line_probe;
pub mod screenshot;
pub mod slice_plane;
pub mod streamline;
pub mod table;

pub use camera::CameraSpec;
pub use config::{LineProbeConfig, PipelineConfig, StreamlineConfig};
pub use display::{DisplaySpec, Representation};
pub use error::{PostError, Result};
pub use line_probe::LineProbeSpec;
pub use screenshot::ScreenshotSpec;
pub use slice_plane::SlicePlane;
pub use streamline::StreamlineSpec;
pub use table::write_delimited;

// Re-export glam types for convenience
pub use glam::Vec3;
