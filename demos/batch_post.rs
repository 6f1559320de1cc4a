//! Emits the pvpython batch script for the default post-processing run.
//!
//! Run with: cargo run --example batch_post

use ffdpost::{Pipeline, PipelineConfig, ScriptEngine};

fn main() -> ffdpost::Result<()> {
    env_logger::init();

    // result.vtk, mid-plane +Y cut, T and VEL contours, velocity streamlines
    let config = PipelineConfig::default();

    let mut engine = ScriptEngine::new("post.py");
    let report = Pipeline::new(config)?.run(&mut engine)?;

    println!("{}", report.summary());
    println!("run it with: pvpython post.py");
    Ok(())
}
