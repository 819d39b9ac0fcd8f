//! Edge Event Parser
//!
//! Classifies in-phase trace lines as edge inserts, edge updates, or
//! ignorable noise, and replays them into a per-phase `EdgeGraph`.
//!
//! Line grammar per insertable/updatable line:
//! `<marker> <nodePathA> -> <nodePathB> [<attributes>]`

use regex::Regex;

/// Marker prefix for an edge insertion event.
pub const INSERT_MARKER: &str = "+++ insert edge";
/// Marker prefix for an edge update event.
pub const UPDATE_MARKER: &str = ">>> update edge";

/// A directed edge awaiting normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRecord {
    /// Source node path (dot-separated identifiers).
    pub from: String,
    /// Target node path.
    pub to: String,
    /// Bracketed attribute text, e.g. `[label=x]`. May be empty.
    pub attributes: String,
    /// Full original edge text with the marker stripped.
    pub raw: String,
}

impl EdgeRecord {
    /// Edge identity: the ordered node-path pair, independent of attributes.
    pub fn key_matches(&self, other: &EdgeRecord) -> bool {
        self.from == other.from && self.to == other.to
    }
}

/// One parsed trace event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeEvent {
    Insert(EdgeRecord),
    Update(EdgeRecord),
}

/// Compiled line grammar for edge events.
pub struct EdgeLineGrammar {
    body: Regex,
}

impl EdgeLineGrammar {
    pub fn new() -> Self {
        // Node paths carry no spaces; attributes start at the first `[`.
        let body = Regex::new(r"^(?P<from>[^\[\s]+)\s*->\s*(?P<to>[^\[\s]+)\s*(?P<attrs>\[.*)?$")
            .expect("edge body grammar is valid");
        Self { body }
    }

    /// Classify one in-phase line. Returns `None` for ignorable lines:
    /// lines without an edge marker, edge lines referencing the synthetic
    /// root in a nested position, and malformed edge bodies.
    pub fn classify(&self, line: &str) -> Option<EdgeEvent> {
        let line = line.trim();
        if let Some(pos) = line.find("Root ->") {
            if pos > 0 {
                return None;
            }
        }
        if let Some(rest) = line.strip_prefix(INSERT_MARKER) {
            return self.parse_body(rest).map(EdgeEvent::Insert);
        }
        if let Some(rest) = line.strip_prefix(UPDATE_MARKER) {
            return self.parse_body(rest).map(EdgeEvent::Update);
        }
        None
    }

    fn parse_body(&self, body: &str) -> Option<EdgeRecord> {
        let body = body.trim();
        let caps = self.body.captures(body)?;
        Some(EdgeRecord {
            from: caps["from"].to_string(),
            to: caps["to"].to_string(),
            attributes: caps
                .name("attrs")
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default(),
            raw: body.to_string(),
        })
    }
}

impl Default for EdgeLineGrammar {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered edge collection for one phase.
///
/// Append-only except for the update-driven remove-and-append below.
#[derive(Debug, Default)]
pub struct EdgeGraph {
    records: Vec<EdgeRecord>,
}

impl EdgeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[EdgeRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replay one event into the collection.
    ///
    /// Inserts append unconditionally; duplicate keys may accumulate.
    /// Updates use the replace-if-changed policy: the first record with
    /// a matching key is compared against the update with any trailing
    /// `[color=...]` attribute excluded, and on a difference the old
    /// record is removed and the update appended at the end. An update
    /// with no matching key is dropped.
    pub fn apply(&mut self, event: EdgeEvent) {
        match event {
            EdgeEvent::Insert(rec) => self.records.push(rec),
            EdgeEvent::Update(rec) => self.update(rec),
        }
    }

    fn update(&mut self, rec: EdgeRecord) {
        if let Some(idx) = self.records.iter().position(|old| old.key_matches(&rec)) {
            let old = &self.records[idx];
            if strip_trailing_color(&old.raw) != strip_trailing_color(&rec.raw) {
                self.records.remove(idx);
                self.records.push(rec);
            }
        }
    }

    /// Raw pre-normalization dump, one record per line in processing order.
    pub fn raw_dump(&self) -> String {
        let mut out = String::new();
        for rec in &self.records {
            out.push_str(&rec.raw);
            out.push('\n');
        }
        out
    }
}

/// The scheduler appends a fixed color attribute to updated edges; it is
/// excluded when deciding whether an update actually changed an edge.
fn strip_trailing_color(raw: &str) -> &str {
    let trimmed = raw.trim_end();
    if trimmed.ends_with(']') {
        if let Some(open) = trimmed.rfind('[') {
            if trimmed[open..].starts_with("[color=") {
                return trimmed[..open].trim_end();
            }
        }
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grammar() -> EdgeLineGrammar {
        EdgeLineGrammar::new()
    }

    #[test]
    fn classifies_insert_lines() {
        let ev = grammar()
            .classify("+++ insert edge Root.X.A -> Root.X.B [label=go]")
            .expect("insert line");
        match ev {
            EdgeEvent::Insert(rec) => {
                assert_eq!(rec.from, "Root.X.A");
                assert_eq!(rec.to, "Root.X.B");
                assert_eq!(rec.attributes, "[label=go]");
                assert_eq!(rec.raw, "Root.X.A -> Root.X.B [label=go]");
            }
            other => panic!("expected insert, got {:?}", other),
        }
    }

    #[test]
    fn classifies_update_lines() {
        let ev = grammar()
            .classify(">>> update edge A -> B [label=stop]")
            .expect("update line");
        assert!(matches!(ev, EdgeEvent::Update(_)));
    }

    #[test]
    fn ignores_unmarked_lines() {
        assert_eq!(grammar().classify("=> FrameScheduler tick"), None);
        assert_eq!(grammar().classify(""), None);
        assert_eq!(grammar().classify("### Main pipeline started!"), None);
    }

    #[test]
    fn ignores_nested_root_reference() {
        assert_eq!(
            grammar().classify("+++ insert edge A -> B nested Root -> C"),
            None
        );
    }

    #[test]
    fn root_at_line_start_is_not_filtered() {
        // The filter only rejects `Root ->` at a non-zero offset.
        let ev = grammar().classify("Root -> B");
        assert_eq!(ev, None, "still no marker, so still ignorable");
        let ev = grammar().classify("+++ insert edge Root.A -> B [label=x]");
        assert!(ev.is_some());
    }

    #[test]
    fn malformed_body_is_dropped() {
        assert_eq!(grammar().classify("+++ insert edge not-an-edge"), None);
    }

    #[test]
    fn insert_allows_duplicate_keys() {
        let g = grammar();
        let mut graph = EdgeGraph::new();
        graph.apply(g.classify("+++ insert edge A -> B [label=x]").unwrap());
        graph.apply(g.classify("+++ insert edge A -> B [label=y]").unwrap());
        assert_eq!(graph.records().len(), 2);
    }

    #[test]
    fn update_replaces_changed_record_at_end() {
        let g = grammar();
        let mut graph = EdgeGraph::new();
        graph.apply(g.classify("+++ insert edge A -> B [label=x]").unwrap());
        graph.apply(g.classify("+++ insert edge C -> D [label=z]").unwrap());
        graph.apply(g.classify(">>> update edge A -> B [label=y]").unwrap());

        let raws: Vec<&str> = graph.records().iter().map(|r| r.raw.as_str()).collect();
        assert_eq!(raws, vec!["C -> D [label=z]", "A -> B [label=y]"]);
    }

    #[test]
    fn update_is_noop_when_only_color_differs() {
        let g = grammar();
        let mut graph = EdgeGraph::new();
        graph.apply(g.classify("+++ insert edge A -> B [label=x]").unwrap());
        graph.apply(
            g.classify(">>> update edge A -> B [label=x] [color=blue]")
                .unwrap(),
        );
        assert_eq!(graph.records().len(), 1);
        assert_eq!(graph.records()[0].raw, "A -> B [label=x]");
    }

    #[test]
    fn update_without_matching_key_is_dropped() {
        let g = grammar();
        let mut graph = EdgeGraph::new();
        graph.apply(g.classify("+++ insert edge A -> B [label=x]").unwrap());
        graph.apply(g.classify(">>> update edge A -> C [label=y]").unwrap());
        assert_eq!(graph.records().len(), 1);
        assert_eq!(graph.records()[0].to, "B");
    }

    #[test]
    fn raw_dump_preserves_processing_order() {
        let g = grammar();
        let mut graph = EdgeGraph::new();
        graph.apply(g.classify("+++ insert edge A -> B [label=x]").unwrap());
        graph.apply(g.classify("+++ insert edge C -> D [label=y]").unwrap());
        assert_eq!(graph.raw_dump(), "A -> B [label=x]\nC -> D [label=y]\n");
    }
}
