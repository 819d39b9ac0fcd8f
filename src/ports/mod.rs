use std::path::Path;

/// External graph-rendering collaborator.
///
/// The core hands over a finished DOT document path and never consults
/// the outcome; rendering is fire-and-forget by design.
pub trait RenderBackend {
    fn render(&self, dot_path: &Path, image_path: &Path);
}
