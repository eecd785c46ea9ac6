//! Data types for the street multigraph.
//!
//! Kept small and explicit; all cross references are arena indices.

use serde::{Deserialize, Serialize};

use crate::grid::Coord;

/// Identifier types for clarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArcId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SegmentKind {
    OneWay,
    TwoWay,
}

/// A physical street segment between two adjacent intersections.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
}

/// Directed hop between adjacent intersections.
///
/// `segment == None` marks a virtual arc added while balancing polarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArcData {
    pub from: NodeId,
    pub to: NodeId,
    pub segment: Option<SegmentId>,
    /// Opposite-direction arc of the same two-way segment.
    pub reverse: Option<ArcId>,
}

impl ArcData {
    #[inline]
    pub fn is_virtual(&self) -> bool {
        self.segment.is_none()
    }
}

/// Intersection with its outgoing arcs in insertion order.
#[derive(Clone, Debug)]
pub struct Node {
    pub coord: Coord,
    pub out: Vec<ArcId>,
    /// Incoming minus outgoing arcs, accumulated by `Graph::add_arc`.
    pub polarity: i64,
}
