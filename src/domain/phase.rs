//! Phase Segmenter
//!
//! Splits the scheduler trace into the two independent pipeline phases
//! (*Main* and *Test*), each delimited by textual start/end markers.
//! Each phase runs its own state machine: NotStarted -> Active -> Done,
//! and Done is terminal - a phase never re-opens.

use std::fmt;

/// Shared end marker: both phases close on the same scheduler line.
pub const END_MARKER: &str = "<= FrameScheduler::PrepareProducers After FrameGraph node count";

const MAIN_START_MARKER: &str = "### Main pipeline started!";
const TEST_START_MARKER: &str = "### Test pipeline started!";

/// One of the two pipeline phases found in a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Main,
    Test,
}

impl Phase {
    /// The marker line that opens this phase.
    pub fn start_marker(&self) -> &'static str {
        match self {
            Phase::Main => MAIN_START_MARKER,
            Phase::Test => TEST_START_MARKER,
        }
    }

    /// File stem used for this phase's output files.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Phase::Main => "main_pipeline_graph",
            Phase::Test => "test_pipeline_graph",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Main => write!(f, "Main"),
            Phase::Test => write!(f, "Test"),
        }
    }
}

/// Lifecycle of a single phase window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseState {
    NotStarted,
    Active,
    Done,
}

/// State machine tracking one phase across the line scan.
#[derive(Debug)]
pub struct PhaseWindow {
    phase: Phase,
    state: PhaseState,
    started_at: Option<usize>,
}

impl PhaseWindow {
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            state: PhaseState::NotStarted,
            started_at: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> PhaseState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == PhaseState::Done
    }

    /// 1-based line number of the first start marker, if seen.
    pub fn started_at(&self) -> Option<usize> {
        self.started_at
    }

    /// Advance the state machine with one trace line and report whether
    /// the line falls inside this phase's window.
    ///
    /// The start-marker line itself is in-window (the event parser will
    /// classify it as ignorable); the end-marker line is not.
    pub fn observe(&mut self, lnum: usize, line: &str) -> bool {
        match self.state {
            PhaseState::NotStarted => {
                if line.contains(self.phase.start_marker()) {
                    self.state = PhaseState::Active;
                    self.started_at = Some(lnum);
                    println!("[scan] {} pipeline started at line {}", self.phase, lnum);
                    return true;
                }
                false
            }
            PhaseState::Active => {
                if line.contains(END_MARKER) {
                    self.state = PhaseState::Done;
                    return false;
                }
                true
            }
            PhaseState::Done => false,
        }
    }
}

/// Both phase windows, evaluated independently against every line.
#[derive(Debug)]
pub struct PhaseTracker {
    windows: [PhaseWindow; 2],
}

impl PhaseTracker {
    pub fn new() -> Self {
        Self {
            windows: [PhaseWindow::new(Phase::Main), PhaseWindow::new(Phase::Test)],
        }
    }

    /// Routing decision for one line: which phases should consume it.
    pub fn observe(&mut self, lnum: usize, line: &str) -> [bool; 2] {
        [
            self.windows[0].observe(lnum, line),
            self.windows[1].observe(lnum, line),
        ]
    }

    /// Remaining lines can be skipped once both phases have closed.
    pub fn all_done(&self) -> bool {
        self.windows.iter().all(|w| w.is_done())
    }

    pub fn windows(&self) -> &[PhaseWindow; 2] {
        &self.windows
    }
}

impl Default for PhaseTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_opens_on_start_marker_and_closes_on_end_marker() {
        let mut w = PhaseWindow::new(Phase::Main);
        assert!(!w.observe(1, "noise before the phase"));
        assert!(w.observe(2, "### Main pipeline started!"));
        assert_eq!(w.started_at(), Some(2));
        assert!(w.observe(3, "+++ insert edge A -> B [label=x]"));
        assert!(!w.observe(4, END_MARKER));
        assert!(w.is_done());
    }

    #[test]
    fn done_phase_never_reopens() {
        let mut w = PhaseWindow::new(Phase::Test);
        w.observe(1, "### Test pipeline started!");
        w.observe(2, END_MARKER);
        assert!(w.is_done());
        assert!(!w.observe(3, "### Test pipeline started!"));
        assert!(w.is_done(), "Done is terminal");
    }

    #[test]
    fn end_marker_before_start_is_ignored() {
        let mut w = PhaseWindow::new(Phase::Main);
        assert!(!w.observe(1, END_MARKER));
        assert_eq!(w.state(), PhaseState::NotStarted);
    }

    #[test]
    fn phases_are_independent() {
        let mut t = PhaseTracker::new();
        assert_eq!(t.observe(1, "### Main pipeline started!"), [true, false]);
        assert_eq!(t.observe(2, "edge line"), [true, false]);
        assert_eq!(t.observe(3, END_MARKER), [false, false]);
        assert!(!t.all_done(), "Test phase has not closed yet");
        t.observe(4, "### Test pipeline started!");
        t.observe(5, END_MARKER);
        assert!(t.all_done());
    }

    #[test]
    fn markers_match_as_substrings() {
        let mut w = PhaseWindow::new(Phase::Main);
        assert!(w.observe(1, "12:00:01 ### Main pipeline started! (frame 0)"));
    }
}
