use crate::node::{Channel, NodeId, SourceChannel};

/// An inheritance edge recorded on a derived color.
///
/// Edges are bookkeeping for the rendered diagram only: channel values are
/// computed eagerly when an inheritance is declared, so reconstructing the
/// graph afterwards needs this record of where each value came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Edge {
    /// The node is fully equivalent to a single parent; both channels were
    /// copied from it.
    Full {
        /// The parent node.
        parent: NodeId,
    },
    /// One blend component feeding a single channel of the node.
    Partial {
        /// The source node.
        source: NodeId,
        /// The channel the component reads from.
        from: SourceChannel,
        /// The channel the component feeds.
        to: Channel,
        /// The blend weight in percent. Absent for a plain single-source
        /// copy.
        weight: Option<f64>,
    },
}
