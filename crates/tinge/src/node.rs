use std::fmt::{self, Display, Formatter};
use std::hash::Hash;

use ecow::{EcoString, eco_format};
use siphasher::sip128::{Hasher128, SipHasher13};

use crate::blend::{Weighted, blend};
use crate::color::RgbaColor;
use crate::diag::{ColorError, ColorResult};
use crate::edge::Edge;

/// A destination channel of a derived color.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Channel {
    /// The foreground channel.
    Fg,
    /// The background channel.
    Bg,
}

impl Display for Channel {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.pad(match self {
            Self::Fg => "fg",
            Self::Bg => "bg",
        })
    }
}

/// Where a blend component reads from.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SourceChannel {
    /// The source's foreground channel.
    Fg,
    /// The source's background channel.
    Bg,
    /// The single color of a raw node, which has no foreground/background
    /// distinction.
    Raw,
}

impl Display for SourceChannel {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.pad(match self {
            Self::Fg => "fg",
            Self::Bg => "bg",
            Self::Raw => "color",
        })
    }
}

/// A stable identifier for a node, derived from its display name.
///
/// Usable as a rendering key: it contains only hex digits and is in
/// bijection with the name for all practical purposes.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct NodeId(EcoString);

impl NodeId {
    /// Derive the identifier for the given display name.
    pub fn derive(name: &str) -> Self {
        let mut state = SipHasher13::new();
        name.hash(&mut state);
        Self(eco_format!("{:032x}", state.finish128().as_u128()))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// A channel slot: a color together with its precomputed inverse for
/// label contrast.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Shade {
    /// The color itself.
    pub color: RgbaColor,
    /// The inverse, used for legible text on top of the color.
    pub inverse: RgbaColor,
}

impl Shade {
    /// Shade a color, computing its inverse.
    pub fn new(color: RgbaColor) -> Self {
        Self { color, inverse: color.invert() }
    }
}

/// A node in the color inheritance graph.
#[derive(Debug, Clone)]
pub enum ColorNode {
    /// A leaf color defined by one fixed value.
    Raw(RawColor),
    /// A color with separate foreground and background channels, possibly
    /// inherited from other nodes.
    Derived(DerivedColor),
}

impl ColorNode {
    /// The node's display name.
    pub fn name(&self) -> &EcoString {
        match self {
            Self::Raw(raw) => raw.name(),
            Self::Derived(derived) => derived.name(),
        }
    }

    /// The node's stable identifier.
    pub fn id(&self) -> &NodeId {
        match self {
            Self::Raw(raw) => raw.id(),
            Self::Derived(derived) => derived.id(),
        }
    }

    /// Read a color component.
    ///
    /// A raw color ignores the requested channel and always yields its
    /// single stored color. A derived color answers `Fg` and `Bg` and
    /// fails for `Raw`.
    pub fn get(&self, channel: SourceChannel) -> ColorResult<RgbaColor> {
        match self {
            Self::Raw(raw) => Ok(raw.color()),
            Self::Derived(derived) => derived.get(channel),
        }
    }

    /// The inheritance edges recorded on this node.
    pub fn edges(&self) -> &[Edge] {
        match self {
            Self::Raw(_) => &[],
            Self::Derived(derived) => derived.edges(),
        }
    }
}

impl From<RawColor> for ColorNode {
    fn from(raw: RawColor) -> Self {
        Self::Raw(raw)
    }
}

impl From<DerivedColor> for ColorNode {
    fn from(derived: DerivedColor) -> Self {
        Self::Derived(derived)
    }
}

/// A leaf color node, defined by one fixed value instead of a
/// foreground/background pair.
#[derive(Debug, Clone)]
pub struct RawColor {
    name: EcoString,
    id: NodeId,
    shade: Shade,
}

impl RawColor {
    /// Create a raw color from a color specification (a name, a hex string).
    pub fn new(name: impl Into<EcoString>, spec: &str) -> ColorResult<Self> {
        Ok(Self::from_color(name, spec.parse()?))
    }

    /// Create a raw color from an already-resolved value.
    pub fn from_color(name: impl Into<EcoString>, color: RgbaColor) -> Self {
        let name = name.into();
        let id = NodeId::derive(&name);
        Self { name, id, shade: Shade::new(color) }
    }

    /// The node's display name.
    pub fn name(&self) -> &EcoString {
        &self.name
    }

    /// The node's stable identifier.
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// The stored color.
    pub fn color(&self) -> RgbaColor {
        self.shade.color
    }

    /// The inverse of the stored color, for label contrast.
    pub fn inverse(&self) -> RgbaColor {
        self.shade.inverse
    }

    /// Wrap into a graph node.
    pub fn into_node(self) -> ColorNode {
        self.into()
    }
}

/// A color defined by a foreground and a background channel, each possibly
/// blended from other colors.
///
/// All inheritance declarations resolve their sources eagerly: a channel
/// value reflects the state of its sources at declaration time and never
/// updates retroactively.
#[derive(Debug, Clone)]
pub struct DerivedColor {
    name: EcoString,
    id: NodeId,
    fg: Shade,
    bg: Shade,
    edges: Vec<Edge>,
}

impl DerivedColor {
    /// The channel defaults of a freshly created derived color.
    ///
    /// These replicate the reference defaults exactly, including inverses
    /// that are *not* the inversion of the default values.
    const DEFAULT_FG: Shade = Shade {
        color: RgbaColor::new(0xff, 0xff, 0xff, 0x00),
        inverse: RgbaColor::new(0x00, 0x00, 0x00, 0xff),
    };
    const DEFAULT_BG: Shade = Shade {
        color: RgbaColor::new(0x00, 0x00, 0x00, 0x00),
        inverse: RgbaColor::new(0x00, 0x00, 0x00, 0xff),
    };

    /// Create a derived color with default (transparent) channels.
    pub fn new(name: impl Into<EcoString>) -> Self {
        let name = name.into();
        let id = NodeId::derive(&name);
        Self {
            name,
            id,
            fg: Self::DEFAULT_FG,
            bg: Self::DEFAULT_BG,
            edges: vec![],
        }
    }

    /// The node's display name.
    pub fn name(&self) -> &EcoString {
        &self.name
    }

    /// The node's stable identifier.
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// The foreground slot.
    pub fn fg(&self) -> &Shade {
        &self.fg
    }

    /// The background slot.
    pub fn bg(&self) -> &Shade {
        &self.bg
    }

    /// The inheritance edges recorded on this node.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Declare full-identity inheritance: this color is strictly equivalent
    /// to its parent.
    ///
    /// Copies the parent's foreground and background and records a single
    /// full edge.
    pub fn set_parent(mut self, parent: &ColorNode) -> ColorResult<Self> {
        self.fg = Shade::new(parent.get(SourceChannel::Fg)?);
        self.bg = Shade::new(parent.get(SourceChannel::Bg)?);
        self.edges.push(Edge::Full { parent: parent.id().clone() });
        Ok(self)
    }

    /// Declare single-source inheritance for one channel: a plain copy of
    /// the source's channel, recorded as one unweighted partial edge.
    pub fn inherit(
        mut self,
        to: Channel,
        source: &ColorNode,
        from: SourceChannel,
    ) -> ColorResult<Self> {
        let color = blend(&[Weighted::plain(source.get(from)?)]);
        self.edges.push(Edge::Partial {
            source: source.id().clone(),
            from,
            to,
            weight: None,
        });
        self.assign(to, color);
        Ok(self)
    }

    /// Declare blended inheritance for one channel from several weighted
    /// sources, recording one partial edge per component.
    ///
    /// Weights are in percent and expected to sum to 100; see
    /// [`blend`](crate::blend::blend) for the behavior when they do not.
    pub fn inherit_mix(
        mut self,
        to: Channel,
        parts: &[(&ColorNode, SourceChannel, f64)],
    ) -> ColorResult<Self> {
        let mut resolved = Vec::with_capacity(parts.len());
        for &(source, from, weight) in parts {
            resolved.push(Weighted::new(source.get(from)?, weight));
        }

        let color = blend(&resolved);
        for &(source, from, weight) in parts {
            self.edges.push(Edge::Partial {
                source: source.id().clone(),
                from,
                to,
                weight: Some(weight),
            });
        }

        self.assign(to, color);
        Ok(self)
    }

    /// Read a color component.
    pub fn get(&self, channel: SourceChannel) -> ColorResult<RgbaColor> {
        match channel {
            SourceChannel::Fg => Ok(self.fg.color),
            SourceChannel::Bg => Ok(self.bg.color),
            SourceChannel::Raw => Err(ColorError::UnknownChannel {
                node: self.name.clone(),
                channel,
            }),
        }
    }

    /// Wrap into a graph node.
    pub fn into_node(self) -> ColorNode {
        self.into()
    }

    fn assign(&mut self, channel: Channel, color: RgbaColor) {
        let slot = match channel {
            Channel::Fg => &mut self.fg,
            Channel::Bg => &mut self.bg,
        };
        *slot = Shade::new(color);
    }
}
