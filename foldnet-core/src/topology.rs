/// Hinge trees for the eleven supported nets.
///
/// Every net is a tree over the six face indices. The root face is fixed and
/// lies flat on the XZ plane; every other face hangs off its parent through a
/// hinge placed in the parent's hinge frame. Lengths are symbolic ([`Span`])
/// so one table serves any box extents.

use nalgebra::Vector3;
use serde::Serialize;

use crate::dimensions::BoxDimensions;
use crate::error::TopologyError;
use crate::pattern::NetPattern;
use crate::transform::FoldSign::{self, Negative as NEG, Positive as POS};
use crate::transform::HingeAxis::{self, X, Z};
use crate::FACE_COUNT;

/// A length written as `l·L + w·W + h·H`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Span {
    pub l: f32,
    pub w: f32,
    pub h: f32,
}

impl Span {
    pub const ZERO: Span = Span {
        l: 0.0,
        w: 0.0,
        h: 0.0,
    };

    pub fn resolve(&self, dims: &BoxDimensions) -> f32 {
        self.l * dims.length() + self.w * dims.width() + self.h * dims.height()
    }
}

/// A point `(x, 0, z)` in a hinge frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Offset {
    pub x: Span,
    pub z: Span,
}

impl Offset {
    pub fn resolve(&self, dims: &BoxDimensions) -> Vector3<f32> {
        Vector3::new(self.x.resolve(dims), 0.0, self.z.resolve(dims))
    }
}

/// Where and how a face hangs off its parent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Attachment {
    pub parent: usize,
    /// Hinge line position in the parent's hinge frame.
    pub at: Offset,
    pub axis: HingeAxis,
    pub sign: FoldSign,
}

/// One face of a net.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HingeNode {
    pub face: usize,
    /// `None` for the fixed root face.
    pub attachment: Option<Attachment>,
    /// Face centre in this node's own hinge frame.
    pub center: Offset,
    /// Face width (local X) and height (local Y) before laying flat.
    pub size: [Span; 2],
}

impl HingeNode {
    pub fn parent(&self) -> Option<usize> {
        self.attachment.map(|a| a.parent)
    }

    pub fn is_root(&self) -> bool {
        self.attachment.is_none()
    }

    pub fn resolved_size(&self, dims: &BoxDimensions) -> (f32, f32) {
        (self.size[0].resolve(dims), self.size[1].resolve(dims))
    }
}

/// The hinge tree of one net pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetTopology {
    pub pattern: NetPattern,
    pub nodes: [HingeNode; FACE_COUNT],
}

impl NetTopology {
    pub fn root(&self) -> Option<&HingeNode> {
        self.nodes.iter().find(|n| n.is_root())
    }

    pub fn node(&self, face: usize) -> Option<&HingeNode> {
        self.nodes.iter().find(|n| n.face == face)
    }

    pub fn children(&self, face: usize) -> impl Iterator<Item = &HingeNode> + '_ {
        self.nodes.iter().filter(move |n| n.parent() == Some(face))
    }

    /// Number of hinges between `face` and the root.
    pub fn depth(&self, face: usize) -> Option<usize> {
        let mut current = self.node(face)?;
        let mut depth = 0;
        while let Some(parent) = current.parent() {
            current = self.node(parent)?;
            depth += 1;
            if depth > FACE_COUNT {
                return None;
            }
        }
        Some(depth)
    }

    /// Check that the nodes form a single tree covering faces `0..6`.
    pub fn validate(&self) -> Result<(), TopologyError> {
        let mut seen = [false; FACE_COUNT];
        for node in &self.nodes {
            if node.face >= FACE_COUNT {
                return Err(TopologyError::MissingFace(node.face));
            }
            if std::mem::replace(&mut seen[node.face], true) {
                return Err(TopologyError::DuplicateFace(node.face));
            }
        }
        if let Some(missing) = seen.iter().position(|s| !s) {
            return Err(TopologyError::MissingFace(missing));
        }

        let roots = self.nodes.iter().filter(|n| n.is_root()).count();
        if roots != 1 {
            return Err(TopologyError::RootCount(roots));
        }

        for node in &self.nodes {
            if let Some(parent) = node.parent() {
                if parent == node.face || self.node(parent).is_none() {
                    return Err(TopologyError::UnknownParent {
                        face: node.face,
                        parent,
                    });
                }
            }
            if self.depth(node.face).is_none() {
                return Err(TopologyError::Cycle(node.face));
            }
        }
        Ok(())
    }
}

const fn l(k: f32) -> Span {
    Span {
        l: k,
        w: 0.0,
        h: 0.0,
    }
}

const fn w(k: f32) -> Span {
    Span {
        l: 0.0,
        w: k,
        h: 0.0,
    }
}

const fn h(k: f32) -> Span {
    Span {
        l: 0.0,
        w: 0.0,
        h: k,
    }
}

const O: Span = Span::ZERO;

const fn root(size: [Span; 2]) -> HingeNode {
    HingeNode {
        face: 0,
        attachment: None,
        center: Offset { x: O, z: O },
        size,
    }
}

const fn hinge(
    face: usize,
    parent: usize,
    at: (Span, Span),
    axis: HingeAxis,
    sign: FoldSign,
    center: (Span, Span),
    size: [Span; 2],
) -> HingeNode {
    HingeNode {
        face,
        attachment: Some(Attachment {
            parent,
            at: Offset { x: at.0, z: at.1 },
            axis,
            sign,
        }),
        center: Offset {
            x: center.0,
            z: center.1,
        },
        size,
    }
}

// Faces shared by the 1-4-1 and 1-3-2 families, all around a L×W base.
const BASE: HingeNode = root([l(1.0), w(1.0)]);
const FRONT_ON_BASE: HingeNode = hinge(1, 0, (O, w(0.5)), X, NEG, (O, h(0.5)), [l(1.0), h(1.0)]);
const BACK_ON_BASE: HingeNode = hinge(2, 0, (O, w(-0.5)), X, POS, (O, h(-0.5)), [l(1.0), h(1.0)]);
const TOP_ON_BACK: HingeNode = hinge(5, 2, (O, h(-1.0)), X, POS, (O, w(-0.5)), [l(1.0), w(1.0)]);
const LEFT_ON_BASE: HingeNode = hinge(3, 0, (l(-0.5), O), Z, NEG, (h(-0.5), O), [h(1.0), w(1.0)]);
const RIGHT_ON_BASE: HingeNode = hinge(4, 0, (l(0.5), O), Z, POS, (h(0.5), O), [h(1.0), w(1.0)]);
const LEFT_ON_BACK: HingeNode = hinge(3, 2, (l(-0.5), h(-0.5)), Z, NEG, (w(-0.5), O), [w(1.0), h(1.0)]);
const RIGHT_ON_BACK: HingeNode = hinge(4, 2, (l(0.5), h(-0.5)), Z, POS, (w(0.5), O), [w(1.0), h(1.0)]);
const LEFT_ON_TOP: HingeNode = hinge(3, 5, (l(-0.5), w(-0.5)), Z, NEG, (h(-0.5), O), [h(1.0), w(1.0)]);
const RIGHT_ON_TOP: HingeNode = hinge(4, 5, (l(0.5), w(-0.5)), Z, POS, (h(0.5), O), [h(1.0), w(1.0)]);

static NET_1: NetTopology = NetTopology {
    pattern: NetPattern::Net1,
    nodes: [BASE, FRONT_ON_BASE, BACK_ON_BASE, TOP_ON_BACK, LEFT_ON_BASE, RIGHT_ON_BASE],
};

static NET_2: NetTopology = NetTopology {
    pattern: NetPattern::Net2,
    nodes: [BASE, FRONT_ON_BASE, LEFT_ON_BASE, BACK_ON_BASE, TOP_ON_BACK, RIGHT_ON_BACK],
};

static NET_3: NetTopology = NetTopology {
    pattern: NetPattern::Net3,
    nodes: [BASE, FRONT_ON_BASE, BACK_ON_BASE, TOP_ON_BACK, RIGHT_ON_BACK, LEFT_ON_BACK],
};

static NET_4: NetTopology = NetTopology {
    pattern: NetPattern::Net4,
    nodes: [BASE, FRONT_ON_BASE, LEFT_ON_BASE, BACK_ON_BASE, TOP_ON_BACK, RIGHT_ON_TOP],
};

static NET_5: NetTopology = NetTopology {
    pattern: NetPattern::Net5,
    nodes: [BASE, FRONT_ON_BASE, BACK_ON_BASE, TOP_ON_BACK, LEFT_ON_TOP, RIGHT_ON_TOP],
};

static NET_6: NetTopology = NetTopology {
    pattern: NetPattern::Net6,
    nodes: [
        BASE,
        RIGHT_ON_BASE,
        LEFT_ON_BASE,
        BACK_ON_BASE,
        TOP_ON_BACK,
        hinge(1, 5, (O, w(-1.0)), X, POS, (O, h(-0.5)), [l(1.0), h(1.0)]),
    ],
};

// Same hinge tree as NET_3, with the back wings listed in the other order.
static NET_7: NetTopology = NetTopology {
    pattern: NetPattern::Net7,
    nodes: [BASE, FRONT_ON_BASE, BACK_ON_BASE, TOP_ON_BACK, LEFT_ON_BACK, RIGHT_ON_BACK],
};

static NET_8: NetTopology = NetTopology {
    pattern: NetPattern::Net8,
    nodes: [
        BASE,
        BACK_ON_BASE,
        TOP_ON_BACK,
        LEFT_ON_BACK,
        FRONT_ON_BASE,
        hinge(4, 1, (l(0.5), h(0.5)), Z, POS, (w(0.5), O), [w(1.0), h(1.0)]),
    ],
};

static NET_9: NetTopology = NetTopology {
    pattern: NetPattern::Net9,
    nodes: [
        BASE,
        FRONT_ON_BASE,
        hinge(3, 1, (l(-0.5), h(0.5)), Z, NEG, (w(-0.5), O), [w(1.0), h(1.0)]),
        BACK_ON_BASE,
        TOP_ON_BACK,
        RIGHT_ON_BACK,
    ],
};

// Stairs: one serial chain, every face hinged to the previous one.
static NET_10: NetTopology = NetTopology {
    pattern: NetPattern::Net10,
    nodes: [
        root([w(1.0), h(1.0)]),
        hinge(1, 0, (w(0.5), O), Z, POS, (l(0.5), O), [l(1.0), h(1.0)]),
        hinge(2, 1, (l(0.5), h(0.5)), X, NEG, (O, w(0.5)), [l(1.0), w(1.0)]),
        hinge(3, 2, (l(0.5), w(0.5)), Z, POS, (h(0.5), O), [h(1.0), w(1.0)]),
        hinge(4, 3, (h(0.5), w(0.5)), X, NEG, (O, l(0.5)), [h(1.0), l(1.0)]),
        hinge(5, 4, (h(0.5), l(0.5)), Z, POS, (w(0.5), O), [w(1.0), l(1.0)]),
    ],
};

// Two rows of three: a row running right from the L×H root and a row hanging
// off its far edge running left.
static NET_11: NetTopology = NetTopology {
    pattern: NetPattern::Net11,
    nodes: [
        root([l(1.0), h(1.0)]),
        hinge(3, 0, (l(0.5), O), Z, POS, (w(0.5), O), [w(1.0), h(1.0)]),
        hinge(4, 3, (w(1.0), O), Z, POS, (l(0.5), O), [l(1.0), h(1.0)]),
        hinge(2, 0, (O, h(-0.5)), X, POS, (O, w(-0.5)), [l(1.0), w(1.0)]),
        hinge(1, 2, (l(-0.5), w(-0.5)), Z, NEG, (h(-0.5), O), [h(1.0), w(1.0)]),
        hinge(5, 1, (h(-1.0), O), Z, NEG, (l(-0.5), O), [l(1.0), w(1.0)]),
    ],
};

impl NetPattern {
    /// The hinge tree for this pattern.
    pub fn topology(self) -> &'static NetTopology {
        match self {
            NetPattern::Net1 => &NET_1,
            NetPattern::Net2 => &NET_2,
            NetPattern::Net3 => &NET_3,
            NetPattern::Net4 => &NET_4,
            NetPattern::Net5 => &NET_5,
            NetPattern::Net6 => &NET_6,
            NetPattern::Net7 => &NET_7,
            NetPattern::Net8 => &NET_8,
            NetPattern::Net9 => &NET_9,
            NetPattern::Net10 => &NET_10,
            NetPattern::Net11 => &NET_11,
        }
    }
}
