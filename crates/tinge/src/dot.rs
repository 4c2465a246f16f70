//! Serialization of a container tree into Graphviz DOT markup.
//!
//! The color model knows nothing about markup; this module walks a finished
//! [`Graph`] once and writes one DOT document for it.

use ecow::{EcoString, eco_format};

use crate::edge::Edge;
use crate::graph::{Entry, Graph};
use crate::node::{Channel, ColorNode, DerivedColor, RawColor, Shade, SourceChannel};

/// Serialize the container tree into a single DOT document.
///
/// Every node appears exactly once with its identity, channel values and
/// inverses; every recorded inheritance edge appears exactly once. Edge
/// styles keep the three kinds distinguishable: undecorated dotted lines for
/// full-identity edges and `dir=both` arrows whose tail marks the source
/// channel (`oinv` foreground, `inv` background, `none` raw) and whose head
/// marks the destination channel (`obox` foreground, `box` background).
pub fn markup(graph: &Graph) -> EcoString {
    let mut w = DotWriter::new();
    w.root(graph);
    w.finish()
}

/// A line-oriented writer for DOT text.
struct DotWriter {
    buf: EcoString,
    level: usize,
}

impl DotWriter {
    fn new() -> Self {
        Self { buf: EcoString::new(), level: 0 }
    }

    fn finish(self) -> EcoString {
        self.buf
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.level {
            self.buf.push_str("    ");
        }
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    /// The top-level `strict digraph` block.
    fn root(&mut self, graph: &Graph) {
        self.line(&eco_format!("strict digraph \"{}\" {{", graph.id()));
        self.level += 1;
        self.line(&eco_format!(
            "graph [truecolor=true, bgcolor=\"#ffffff00\", label=\"{}\", \
             concentrate=true, sep=0.5]",
            escape(graph.name()),
        ));
        self.line("node [style=filled, color=\"black\", fillcolor=\"#ffffff00\"]");
        for entry in graph.entries() {
            self.entry(entry);
        }
        self.level -= 1;
        self.line("}");
    }

    fn subgraph(&mut self, graph: &Graph) {
        self.line(&eco_format!("subgraph \"{}\" {{", graph.id()));
        self.level += 1;
        self.line(&eco_format!("graph [label=\"{}\"]", escape(graph.name())));
        for entry in graph.entries() {
            self.entry(entry);
        }
        self.level -= 1;
        self.line("}");
    }

    fn entry(&mut self, entry: &Entry) {
        match entry {
            Entry::Node(ColorNode::Raw(raw)) => self.raw_node(raw),
            Entry::Node(ColorNode::Derived(derived)) => {
                self.derived_node(derived);
                self.edges(derived);
            }
            Entry::Group(graph) => self.subgraph(graph),
        }
    }

    /// A raw color: a filled node labeled in the inverse color, with a
    /// `color` port for outgoing blend edges.
    fn raw_node(&mut self, raw: &RawColor) {
        let fill = raw.color().to_hex();
        let font = raw.inverse().to_hex();
        self.line(&eco_format!(
            "\"{id}\":color [label=<<font color=\"{font}\">{name}</font>> \
             fillcolor=\"{fill}\" fontcolor=\"{font}\" rank=\"source\"]",
            id = raw.id(),
            name = escape_html(raw.name()),
        ));
    }

    /// A derived color: a table label showing both channel values and their
    /// inverses, with distinct input and output ports per channel.
    fn derived_node(&mut self, derived: &DerivedColor) {
        self.line(&eco_format!("\"{}\" [shape=\"none\" label=<", derived.id()));
        self.level += 1;
        self.line("<table border=\"0\" cellborder=\"1\" cellspacing=\"0\"><tr>");
        self.channel_cell(derived.bg(), Channel::Bg, "in");
        self.channel_cell(derived.fg(), Channel::Fg, "in");
        self.line("</tr><tr>");
        self.line(&eco_format!(
            "<td colspan=\"2\" bgcolor=\"{bg}\"><font color=\"{fg}\">\
             <br/>{name}<br/></font></td>",
            bg = derived.bg().color.to_hex(),
            fg = derived.fg().color.to_hex(),
            name = escape_html(derived.name()),
        ));
        self.line("</tr><tr>");
        self.channel_cell(derived.bg(), Channel::Bg, "out");
        self.channel_cell(derived.fg(), Channel::Fg, "out");
        self.line("</tr></table>>]");
        self.level -= 1;
    }

    fn channel_cell(&mut self, shade: &Shade, tag: Channel, dir: &str) {
        let hex = shade.color.to_hex();
        self.line(&eco_format!(
            "<td bgcolor=\"{hex}\" port=\"{tag}{dir}\">\
             <font color=\"{font}\">{tag}:{hex}</font></td>",
            font = shade.inverse.to_hex(),
        ));
    }

    fn edges(&mut self, derived: &DerivedColor) {
        for edge in derived.edges() {
            match edge {
                Edge::Full { parent } => {
                    self.line(&eco_format!(
                        "\"{parent}\":s -> \"{child}\":n [style=dotted]",
                        child = derived.id(),
                    ));
                }
                Edge::Partial { source, from, to, .. } => {
                    let port = match from {
                        SourceChannel::Fg => "fgout",
                        SourceChannel::Bg => "bgout",
                        SourceChannel::Raw => "color",
                    };
                    let tail = match from {
                        SourceChannel::Fg => "oinv",
                        SourceChannel::Bg => "inv",
                        SourceChannel::Raw => "none",
                    };
                    let (dest, head) = match to {
                        Channel::Fg => ("fgin", "obox"),
                        Channel::Bg => ("bgin", "box"),
                    };
                    self.line(&eco_format!(
                        "\"{source}\":{port}:s -> \"{child}\":{dest}:n \
                         [dir=both,arrowtail={tail},arrowhead={head}]",
                        child = derived.id(),
                    ));
                }
            }
        }
    }
}

/// Escape text for a double-quoted DOT string.
fn escape(text: &str) -> EcoString {
    let mut escaped = EcoString::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '"' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Escape text for an HTML-like label.
fn escape_html(text: &str) -> EcoString {
    let mut escaped = EcoString::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::RawColor;

    fn raw(name: &str, spec: &str) -> ColorNode {
        RawColor::new(name, spec).unwrap().into_node()
    }

    #[test]
    fn test_two_raw_nodes_render_two_entries_and_no_edges() {
        let graph = Graph::new("tiny").add([raw("black", "black"), raw("white", "white")]);
        let dot = markup(&graph);

        assert!(dot.starts_with("strict digraph"));
        assert_eq!(dot.matches("rank=\"source\"").count(), 2);
        assert_eq!(dot.matches("->").count(), 0);
    }

    #[test]
    fn test_full_edge_is_dotted() {
        let black = raw("black", "black");
        let white = raw("white", "white");
        let parent = DerivedColor::new("parent")
            .inherit(Channel::Fg, &black, SourceChannel::Raw)
            .unwrap()
            .inherit(Channel::Bg, &white, SourceChannel::Raw)
            .unwrap()
            .into_node();
        let child = DerivedColor::new("child").set_parent(&parent).unwrap();

        let graph = Graph::new("g").add([parent.clone(), child.into_node()]);
        let dot = markup(&graph);

        let expected = eco_format!(
            "\"{}\":s -> \"{}\":n [style=dotted]",
            parent.id(),
            crate::node::NodeId::derive("child"),
        );
        assert!(dot.contains(expected.as_str()));
    }

    #[test]
    fn test_partial_edge_styles_reflect_channels() {
        let black = raw("black", "black");
        let base = DerivedColor::new("base")
            .inherit(Channel::Fg, &black, SourceChannel::Raw)
            .unwrap()
            .into_node();
        let mixed = DerivedColor::new("mixed")
            .inherit_mix(
                Channel::Fg,
                &[(&base, SourceChannel::Fg, 40.0), (&base, SourceChannel::Bg, 60.0)],
            )
            .unwrap()
            .inherit(Channel::Bg, &black, SourceChannel::Raw)
            .unwrap();

        let graph = Graph::new("g").add([base, mixed.into_node()]);
        let dot = markup(&graph);

        // Foreground-sourced, background-sourced and raw-sourced tails.
        assert!(dot.contains(":fgout:s"));
        assert!(dot.contains(":bgout:s"));
        assert!(dot.contains(":color:s"));
        assert!(dot.contains("arrowtail=oinv,arrowhead=obox"));
        assert!(dot.contains("arrowtail=inv,arrowhead=obox"));
        assert!(dot.contains("arrowtail=none,arrowhead=box"));
    }

    #[test]
    fn test_subgraph_carries_label() {
        let inner = Graph::new("base colors").add([raw("black", "black")]);
        let graph = Graph::new("outer").add([Entry::from(inner)]);
        let dot = markup(&graph);

        assert!(dot.contains("subgraph"));
        assert!(dot.contains("graph [label=\"base colors\"]"));
    }

    #[test]
    fn test_derived_label_shows_both_channels() {
        let node = DerivedColor::new("plain");
        let graph = Graph::new("g").add([node.into_node()]);
        let dot = markup(&graph);

        assert!(dot.contains("bg:#00000000"));
        assert!(dot.contains("fg:#ffffff00"));
        assert!(dot.contains("port=\"bgin\""));
        assert!(dot.contains("port=\"fgout\""));
    }
}
