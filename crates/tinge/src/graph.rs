use ecow::EcoString;
use indexmap::IndexMap;

use crate::node::{ColorNode, NodeId};

/// A named grouping of color nodes and nested groups.
///
/// Containers exist purely for presentation: they label and cluster nodes in
/// the rendered output and play no role in color computation. Entries keep
/// their insertion order for deterministic rendering.
#[derive(Debug, Clone)]
pub struct Graph {
    name: EcoString,
    id: NodeId,
    entries: IndexMap<EcoString, Entry>,
}

/// An entry of a graph: a node or a nested group.
#[derive(Debug, Clone)]
pub enum Entry {
    /// A color node.
    Node(ColorNode),
    /// A nested group, rendered as a subgraph.
    Group(Graph),
}

impl Entry {
    /// The display name under which the entry is keyed.
    pub fn name(&self) -> &EcoString {
        match self {
            Self::Node(node) => node.name(),
            Self::Group(graph) => graph.name(),
        }
    }
}

impl From<ColorNode> for Entry {
    fn from(node: ColorNode) -> Self {
        Self::Node(node)
    }
}

impl From<Graph> for Entry {
    fn from(graph: Graph) -> Self {
        Self::Group(graph)
    }
}

impl Graph {
    /// Create an empty graph with the given display name.
    pub fn new(name: impl Into<EcoString>) -> Self {
        let name = name.into();
        let id = NodeId::derive(&name);
        Self { name, id, entries: IndexMap::new() }
    }

    /// The graph's display name.
    pub fn name(&self) -> &EcoString {
        &self.name
    }

    /// The graph's stable identifier.
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Merge entries into the graph, keyed by their display name.
    ///
    /// A colliding name replaces the previous entry but keeps its position
    /// (last write wins). This is the only mutation path; after construction
    /// the graph is consumed read-only by the render pass.
    pub fn add<I, E>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Entry>,
    {
        for entry in entries {
            let entry = entry.into();
            self.entries.insert(entry.name().clone(), entry);
        }
        self
    }

    /// Iterate over the entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Look up an entry by display name.
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    /// The number of entries directly in this graph.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the graph has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all nodes in the tree, depth first, subgraph entries
    /// visited at their position in the insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &ColorNode> {
        let mut stack: Vec<_> = self.entries.values().rev().collect();
        std::iter::from_fn(move || {
            loop {
                match stack.pop()? {
                    Entry::Node(node) => return Some(node),
                    Entry::Group(graph) => {
                        stack.extend(graph.entries.values().rev());
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::RawColor;

    fn raw(name: &str, spec: &str) -> ColorNode {
        RawColor::new(name, spec).unwrap().into_node()
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let graph = Graph::new("base colors").add([
            raw("black", "black"),
            raw("white", "white"),
            raw("red", "red"),
        ]);

        let names: Vec<_> = graph.entries().map(|e| e.name().as_str()).collect();
        assert_eq!(names, ["black", "white", "red"]);
    }

    #[test]
    fn test_last_write_wins_keeps_position() {
        let graph = Graph::new("g")
            .add([raw("a", "black"), raw("b", "white")])
            .add([raw("a", "red")]);

        let names: Vec<_> = graph.entries().map(|e| e.name().as_str()).collect();
        assert_eq!(names, ["a", "b"]);

        let Some(Entry::Node(node)) = graph.get("a") else { panic!("missing") };
        assert_eq!(node.get(crate::node::SourceChannel::Raw).unwrap().to_hex(), "#ff0000ff");
    }

    #[test]
    fn test_nested_nodes_iteration() {
        let inner = Graph::new("inner").add([raw("x", "red")]);
        let graph = Graph::new("outer")
            .add([Entry::from(raw("a", "black")), Entry::from(inner)])
            .add([raw("b", "white")]);

        let names: Vec<_> = graph.nodes().map(|n| n.name().as_str()).collect();
        assert_eq!(names, ["a", "x", "b"]);
    }
}
