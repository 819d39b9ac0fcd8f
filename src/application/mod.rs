//! Application layer: the trace-to-graph conversion usecase.
//!
//! `convert_trace` is the pure core - one shared scan over the trace
//! feeding both phase windows - and `ConvertUsecase` adds the file I/O
//! and the render port around it.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::config::Config;
use crate::domain::document::GraphDocument;
use crate::domain::edge::{EdgeGraph, EdgeLineGrammar};
use crate::domain::normalize::Normalizer;
use crate::domain::phase::{Phase, PhaseTracker};
use crate::ports::RenderBackend;

/// Everything produced for one phase.
#[derive(Debug)]
pub struct PhaseOutput {
    pub phase: Phase,
    /// 1-based trace line where the phase opened, if it did.
    pub started_at: Option<usize>,
    /// Pre-normalization edge dump, one record per line.
    pub raw_dump: String,
    /// Finished DOT document.
    pub document: String,
}

/// Convert a whole trace into one output per phase (Main, then Test).
///
/// Single pass: each line advances both phase windows, and in-window
/// lines are replayed into that phase's edge graph. The scan stops as
/// soon as both phases have closed.
pub fn convert_trace(trace: &str) -> Vec<PhaseOutput> {
    let grammar = EdgeLineGrammar::new();
    let normalizer = Normalizer::new();
    let mut tracker = PhaseTracker::new();
    let mut graphs = [EdgeGraph::new(), EdgeGraph::new()];

    for (idx, line) in trace.lines().enumerate() {
        let lnum = idx + 1;
        let routing = tracker.observe(lnum, line);
        for (graph, in_window) in graphs.iter_mut().zip(routing) {
            if in_window {
                if let Some(event) = grammar.classify(line) {
                    graph.apply(event);
                }
            }
        }
        if tracker.all_done() {
            break;
        }
    }

    tracker
        .windows()
        .iter()
        .zip(graphs)
        .map(|(window, graph)| {
            let (edges, styles) = normalizer.normalize_graph(&graph);
            PhaseOutput {
                phase: window.phase(),
                started_at: window.started_at(),
                raw_dump: graph.raw_dump(),
                document: GraphDocument::new(styles, edges).to_dot(),
            }
        })
        .collect()
}

/// File-writing and rendering wrapper around `convert_trace`.
pub struct ConvertUsecase<'a> {
    pub renderer: &'a dyn RenderBackend,
}

impl<'a> ConvertUsecase<'a> {
    /// Run the full conversion. Returns the paths written.
    ///
    /// The trace is read up front, so an unreadable trace fails before
    /// any output file is touched.
    pub fn run(&self, config: &Config) -> Result<Vec<PathBuf>> {
        let trace = fs::read_to_string(&config.trace_path)
            .with_context(|| format!("Cannot read trace file: {}", config.trace_path.display()))?;

        let outputs = convert_trace(&trace);

        fs::create_dir_all(&config.output_dir).with_context(|| {
            format!("Cannot create output directory: {}", config.output_dir.display())
        })?;

        let mut written = Vec::new();
        for out in &outputs {
            let stem = out.phase.file_stem();

            let dump_path = config.output_dir.join(format!("{stem}.log"));
            fs::write(&dump_path, &out.raw_dump)
                .with_context(|| format!("Cannot write edge dump: {}", dump_path.display()))?;
            written.push(dump_path);

            let dot_path = config.output_dir.join(format!("{stem}.dot"));
            fs::write(&dot_path, &out.document)
                .with_context(|| format!("Cannot write DOT document: {}", dot_path.display()))?;

            if config.render {
                let image_path = config
                    .output_dir
                    .join(format!("{stem}.{}", config.image_format));
                self.renderer.render(&dot_path, &image_path);
            }
            written.push(dot_path);
        }

        Ok(written)
    }
}
