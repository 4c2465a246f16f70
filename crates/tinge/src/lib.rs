//! A model and diagrammer for Beamer color-theme inheritance.
//!
//! Beamer defines its colors as a web of inheritance: a color is either a
//! raw RGBA value or derives its foreground and background channels from
//! other colors, by full-identity copying or by weighted blending. This
//! crate models that web as an explicit graph and serializes it to Graphviz
//! DOT markup:
//!
//! - [`RgbaColor`] is an 8-bit RGBA value with hex (de)serialization and
//!   inversion for legible labels.
//! - [`ColorNode`] is a graph node, either [`RawColor`] or [`DerivedColor`];
//!   derived colors compute their channels eagerly from already-resolved
//!   sources and record an [`Edge`] per declared inheritance.
//! - [`blend`] is the pure weighted-combination routine.
//! - [`Graph`] groups nodes into named, insertion-ordered containers, and
//!   [`markup`] turns a container tree into one DOT document.
//! - [`default_theme`] builds the complete default Beamer color theme.

pub mod diag;

mod blend;
mod color;
mod dot;
mod edge;
mod graph;
mod node;
mod theme;

pub use self::blend::{Weighted, blend};
pub use self::color::{ParseColorError, RgbaColor};
pub use self::dot::markup;
pub use self::edge::Edge;
pub use self::graph::{Entry, Graph};
pub use self::node::{
    Channel, ColorNode, DerivedColor, NodeId, RawColor, Shade, SourceChannel,
};
pub use self::theme::default_theme;
