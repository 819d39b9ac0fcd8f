//! Edge Normalizer & Colorizer
//!
//! Rewrites raw edge records into render-safe DOT declarations:
//! strips the synthetic root prefix, shortens preview-renderer node
//! paths, quotes attribute values, repairs identifiers that are illegal
//! in DOT, and assigns alternating edge colors plus per-node font
//! colors. Every rewrite is idempotent: normalizing already-normalized
//! text changes nothing.

use crate::domain::edge::{EdgeGraph, EdgeRecord};
use regex::Regex;

const ROOT_PREFIX: &str = "Root.";
const PREVIEW_COMPONENT: &str = "PreviewRendererSystemComponent";
const PREVIEW_LABEL_PREFIX: &str = "PreviewRendererSystemComponent_";
const PREVIEW_NODE_PREFIX: &str = "Preview_";

/// Alternating edge color, chosen by the edge's 1-based ordinal.
///
/// The alternation only helps a human tell interleaved edge batches
/// apart in the rendered image; it carries no semantic meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeColor {
    Maroon,
    Blue,
}

impl EdgeColor {
    pub fn from_ordinal(m: usize) -> Self {
        if m % 2 == 1 {
            EdgeColor::Maroon
        } else {
            EdgeColor::Blue
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EdgeColor::Maroon => "maroon",
            EdgeColor::Blue => "blue",
        }
    }
}

/// Font color for a node's style declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontColor {
    /// Preview-renderer subsystem nodes.
    Green,
    /// Everything else.
    Red,
}

impl FontColor {
    pub fn name(&self) -> &'static str {
        match self {
            FontColor::Green => "green",
            FontColor::Red => "red",
        }
    }
}

/// A post-transform edge ready for the document assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedEdge {
    pub from: String,
    pub to: String,
    /// Quoted, underscore-safe attribute text, e.g. `[label="go"]`.
    pub attrs: String,
    pub color: EdgeColor,
}

impl NormalizedEdge {
    /// One DOT edge declaration line.
    pub fn to_dot(&self) -> String {
        format!(
            "{} -> {} {} [color={c}] [fontcolor={c}]",
            self.from,
            self.to,
            self.attrs,
            c = self.color.name()
        )
    }
}

/// Ordered node-style map: first-encounter order, last write wins.
#[derive(Debug, Default)]
pub struct NodeStyleMap {
    entries: Vec<(String, FontColor)>,
}

impl NodeStyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, node: &str, color: FontColor) {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| n == node) {
            entry.1 = color;
        } else {
            self.entries.push((node.to_string(), color));
        }
    }

    pub fn get(&self, node: &str) -> Option<FontColor> {
        self.entries
            .iter()
            .find(|(n, _)| n == node)
            .map(|(_, c)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, FontColor)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), *c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Compiled rewrite rules applied to every edge record.
pub struct Normalizer {
    /// `key=value]` -> `key="value"]`; already-quoted values never match.
    quote: Regex,
    /// `2DPass` at an identifier start gains a leading underscore.
    digit_ident: Regex,
}

impl Normalizer {
    pub fn new() -> Self {
        let quote = Regex::new(r#"([A-Za-z_][A-Za-z0-9_]*)=([^"\[\]]+)\]"#)
            .expect("attribute quoting rule is valid");
        let digit_ident =
            Regex::new(r"(^|[^0-9A-Za-z_])2DPass").expect("digit identifier rule is valid");
        Self { quote, digit_ident }
    }

    /// Normalize one phase's edge graph in order.
    ///
    /// Returns the edges plus the node-style map derived from the final
    /// node names. Records with an empty attribute portion are malformed
    /// and dropped without consuming a color ordinal.
    pub fn normalize_graph(&self, graph: &EdgeGraph) -> (Vec<NormalizedEdge>, NodeStyleMap) {
        let mut edges = Vec::new();
        let mut styles = NodeStyleMap::new();
        let mut m = 0usize;

        for rec in graph.records() {
            let Some(edge) = self.normalize_record(rec, m + 1) else {
                continue;
            };
            m += 1;
            for node in [&edge.from, &edge.to] {
                let color = if node.starts_with(PREVIEW_NODE_PREFIX) {
                    FontColor::Green
                } else {
                    FontColor::Red
                };
                styles.set(node, color);
            }
            edges.push(edge);
        }

        (edges, styles)
    }

    /// Normalize one record with the given 1-based ordinal.
    pub fn normalize_record(&self, rec: &EdgeRecord, m: usize) -> Option<NormalizedEdge> {
        if rec.attributes.trim().is_empty() {
            return None;
        }
        Some(NormalizedEdge {
            from: self.fix_identifiers(&normalize_node_path(&rec.from)),
            to: self.fix_identifiers(&normalize_node_path(&rec.to)),
            attrs: self.fix_identifiers(&self.normalize_attrs(&rec.attributes)),
            color: EdgeColor::from_ordinal(m),
        })
    }

    /// Attribute rewrites: spaces to underscores, drop the verbose
    /// component-name prefix, quote unquoted values.
    fn normalize_attrs(&self, attrs: &str) -> String {
        let attrs = attrs.replace(' ', "_").replace(PREVIEW_LABEL_PREFIX, "");
        self.quote.replace_all(&attrs, "$1=\"$2\"]").into_owned()
    }

    /// DOT identifier fixups: no digit-leading identifiers, no `.` or `$`.
    fn fix_identifiers(&self, text: &str) -> String {
        self.digit_ident
            .replace_all(text, "${1}_2DPass")
            .replace('.', "_")
            .replace('$', "_")
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Node-path rewrites that run before identifier fixups: drop the
/// synthetic root, shorten preview-renderer paths to their last two
/// components.
fn normalize_node_path(path: &str) -> String {
    let path = path.replace(ROOT_PREFIX, "");
    if !path.contains(PREVIEW_COMPONENT) {
        return path;
    }
    let parts: Vec<&str> = path.split('.').collect();
    let tail = if parts.len() >= 2 {
        &parts[parts.len() - 2..]
    } else {
        &parts[..]
    };
    format!("{}{}", PREVIEW_NODE_PREFIX, tail.join("_"))
}
