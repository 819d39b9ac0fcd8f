//! Infrastructure implementations for Passvis.
//!
//! The Graphviz render backend lives here so the core pipeline stays
//! free of process-spawning side effects.

use std::path::Path;
use std::process::Command;

use crate::ports::RenderBackend;

/// Renders DOT documents by invoking the Graphviz `dot` executable
/// (or any compatible program).
pub struct GraphvizRenderer {
    program: String,
    image_format: String,
}

impl GraphvizRenderer {
    pub fn new(program: impl Into<String>, image_format: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            image_format: image_format.into(),
        }
    }
}

impl RenderBackend for GraphvizRenderer {
    fn render(&self, dot_path: &Path, image_path: &Path) {
        let spec = build_command_spec(&self.program, &self.image_format, dot_path, image_path);
        println!("[render] {} -> {}", dot_path.display(), image_path.display());

        // Fire-and-forget: the exit status is not consulted.
        let result = Command::new(&spec.program).args(&spec.args).status();
        if let Err(e) = result {
            eprintln!("[render] Warning: could not run {}: {}", spec.program, e);
        }
    }
}

/// Backend that skips rendering entirely (`--no-render`, tests).
pub struct NullRenderer;

impl RenderBackend for NullRenderer {
    fn render(&self, _dot_path: &Path, _image_path: &Path) {}
}

/// Describes the render command that would be run.
/// This is primarily for testing without actually executing commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderCommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

/// Build the render command specification (testable function).
pub fn build_command_spec(
    program: &str,
    image_format: &str,
    dot_path: &Path,
    image_path: &Path,
) -> RenderCommandSpec {
    RenderCommandSpec {
        program: program.to_string(),
        args: vec![
            format!("-T{}", image_format),
            dot_path.display().to_string(),
            "-o".to_string(),
            image_path.display().to_string(),
        ],
    }
}
