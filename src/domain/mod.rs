// Domain model for Passvis: phase windows, edge events, normalization,
// and the assembled graph document.

pub mod document;
pub mod edge;
pub mod normalize;
pub mod phase;
