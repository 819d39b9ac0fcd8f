//! Document Assembler
//!
//! Wraps one phase's node-style declarations and normalized edges in a
//! `digraph { ... }` envelope, one declaration per line.

use crate::domain::normalize::{NodeStyleMap, NormalizedEdge};

const HEADER: &str = "digraph {";
const FOOTER: &str = "}";

/// A complete DOT document for one phase. Immutable once assembled.
#[derive(Debug)]
pub struct GraphDocument {
    styles: NodeStyleMap,
    edges: Vec<NormalizedEdge>,
}

impl GraphDocument {
    pub fn new(styles: NodeStyleMap, edges: Vec<NormalizedEdge>) -> Self {
        Self { styles, edges }
    }

    /// Serialize to DOT text: header, style lines, edge lines, footer.
    /// An empty phase reduces to `digraph {\n}`.
    pub fn to_dot(&self) -> String {
        let mut lines = Vec::with_capacity(self.styles.len() + self.edges.len() + 2);
        lines.push(HEADER.to_string());
        for (node, color) in self.styles.iter() {
            lines.push(format!("{} [fontcolor={}]", node, color.name()));
        }
        for edge in &self.edges {
            lines.push(edge.to_dot());
        }
        lines.push(FOOTER.to_string());
        lines.join("\n")
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::normalize::{EdgeColor, FontColor};

    #[test]
    fn empty_document_is_bare_digraph() {
        let doc = GraphDocument::new(NodeStyleMap::new(), vec![]);
        assert_eq!(doc.to_dot(), "digraph {\n}");
    }

    #[test]
    fn styles_precede_edges() {
        let mut styles = NodeStyleMap::new();
        styles.set("A", FontColor::Red);
        styles.set("B", FontColor::Red);
        let edges = vec![NormalizedEdge {
            from: "A".into(),
            to: "B".into(),
            attrs: "[label=\"x\"]".into(),
            color: EdgeColor::Maroon,
        }];

        let dot = GraphDocument::new(styles, edges).to_dot();
        let lines: Vec<&str> = dot.lines().collect();
        assert_eq!(
            lines,
            vec![
                "digraph {",
                "A [fontcolor=red]",
                "B [fontcolor=red]",
                "A -> B [label=\"x\"] [color=maroon] [fontcolor=maroon]",
                "}",
            ]
        );
    }

    #[test]
    fn style_names_are_unique() {
        let mut styles = NodeStyleMap::new();
        styles.set("A", FontColor::Red);
        styles.set("A", FontColor::Green);
        let dot = GraphDocument::new(styles, vec![]).to_dot();
        assert_eq!(dot.matches("A [fontcolor=").count(), 1);
    }
}
