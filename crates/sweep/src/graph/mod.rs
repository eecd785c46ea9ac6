//! Street multigraph: nodes, directed arcs, and the segments they sweep.
//!
//! Purpose
//! - Own intersections and arcs in arenas addressed by `NodeId`/`ArcId`, so
//!   adjacency growth never invalidates a reference.
//! - Track per-node polarity while arcs are added; the balancing pass and
//!   the search only ever read it.
//!
//! Layout
//! - `types.rs`: ids and plain records.
//! - `build.rs`: construction from a [`crate::grid::Grid`].
//! - `bfs.rs`: unweighted breadth-first search with reusable scratch space.

mod bfs;
mod build;
mod types;

pub use bfs::{BfsHit, BfsScratch};
pub use types::{ArcData, ArcId, Node, NodeId, Segment, SegmentId, SegmentKind};

use crate::error::Result;
use crate::grid::Coord;

/// Directed multigraph over grid intersections.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    streets: usize,
    avenues: usize,
    nodes: Vec<Node>,
    arcs: Vec<ArcData>,
    segments: Vec<Segment>,
}

impl Graph {
    /// Graph with one node per intersection of a `streets × avenues` grid and no arcs.
    pub fn with_intersections(streets: usize, avenues: usize) -> Self {
        let nodes = (1..=streets)
            .flat_map(|s| (1..=avenues).map(move |a| Coord::new(s, a)))
            .map(|coord| Node {
                coord,
                out: Vec::new(),
                polarity: 0,
            })
            .collect();
        Self {
            streets,
            avenues,
            nodes,
            arcs: Vec::new(),
            segments: Vec::new(),
        }
    }

    /// Append an arc to `from`'s adjacency list and update both polarities.
    ///
    /// Pass `segment = None` for a virtual arc.
    pub fn add_arc(
        &mut self,
        from: NodeId,
        to: NodeId,
        segment: Option<SegmentId>,
    ) -> Result<ArcId> {
        self.arcs.try_reserve(1)?;
        self.nodes[from.0].out.try_reserve(1)?;
        let id = ArcId(self.arcs.len());
        self.arcs.push(ArcData {
            from,
            to,
            segment,
            reverse: None,
        });
        self.nodes[from.0].out.push(id);
        self.nodes[from.0].polarity -= 1;
        self.nodes[to.0].polarity += 1;
        Ok(id)
    }

    pub(crate) fn add_segment(&mut self, kind: SegmentKind) -> Result<SegmentId> {
        self.segments.try_reserve(1)?;
        let id = SegmentId(self.segments.len());
        self.segments.push(Segment { kind });
        Ok(id)
    }

    pub(crate) fn link_reverse(&mut self, a: ArcId, b: ArcId) {
        self.arcs[a.0].reverse = Some(b);
        self.arcs[b.0].reverse = Some(a);
    }

    /// Nodes with positive polarity (surplus incoming arcs), in creation order.
    ///
    /// Each call starts a fresh scan, so callers that mutate the graph can
    /// simply ask again.
    pub fn imbalanced_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.polarity > 0)
            .map(|(i, _)| NodeId(i))
    }

    pub fn is_balanced(&self) -> bool {
        self.nodes.iter().all(|n| n.polarity == 0)
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[inline]
    pub fn arc(&self, id: ArcId) -> &ArcData {
        &self.arcs[id.0]
    }

    #[inline]
    pub fn segment(&self, id: SegmentId) -> &Segment {
        &self.segments[id.0]
    }

    #[inline]
    pub fn coord(&self, id: NodeId) -> Coord {
        self.nodes[id.0].coord
    }

    #[inline]
    pub fn out_arcs(&self, id: NodeId) -> &[ArcId] {
        &self.nodes[id.0].out
    }

    pub fn node_at(&self, c: Coord) -> Option<NodeId> {
        let inside =
            (1..=self.streets).contains(&c.street) && (1..=self.avenues).contains(&c.avenue);
        inside.then(|| NodeId((c.street - 1) * self.avenues + (c.avenue - 1)))
    }

    /// Kind of the segment `arc` sweeps; `None` for a virtual arc.
    pub fn segment_kind(&self, arc: ArcId) -> Option<SegmentKind> {
        self.arc(arc).segment.map(|seg| self.segment(seg).kind)
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn arc_ids(&self) -> impl Iterator<Item = ArcId> {
        (0..self.arcs.len()).map(ArcId)
    }

    /// `(streets, avenues)` of the underlying grid.
    pub fn dims(&self) -> (usize, usize) {
        (self.streets, self.avenues)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn physical_arc_count(&self) -> usize {
        self.arcs.iter().filter(|a| !a.is_virtual()).count()
    }

    pub fn virtual_arc_count(&self) -> usize {
        self.arcs.iter().filter(|a| a.is_virtual()).count()
    }
}
