//! Which arcs still need sweeping, and the per-walk marks it is judged on.

use crate::graph::{ArcId, Graph, NodeId, SegmentId};

use super::types::CoverageMode;

/// Per-walk consumption marks. Owned by one search; the graph stays shared.
#[derive(Clone, Debug)]
pub struct Marks {
    used: Vec<bool>,
    segment_hits: Vec<u32>,
    departures: Vec<u32>,
}

impl Marks {
    pub fn new(graph: &Graph) -> Self {
        Self {
            used: vec![false; graph.arc_count()],
            segment_hits: vec![0; graph.segment_count()],
            departures: vec![0; graph.node_count()],
        }
    }

    /// Whether `arc` is already part of the walk. Every arc is usable once.
    #[inline]
    pub fn is_used(&self, arc: ArcId) -> bool {
        self.used[arc.0]
    }

    /// Traversals of `segment` in the walk, in either direction.
    #[inline]
    pub fn segment_hits(&self, segment: SegmentId) -> u32 {
        self.segment_hits[segment.0]
    }

    /// Arcs the walk has taken out of `node`.
    #[inline]
    pub fn departures(&self, node: NodeId) -> u32 {
        self.departures[node.0]
    }

    pub(crate) fn take(&mut self, graph: &Graph, arc: ArcId) {
        debug_assert!(!self.used[arc.0], "arc {arc:?} consumed twice");
        let data = graph.arc(arc);
        self.used[arc.0] = true;
        self.departures[data.from.0] += 1;
        if let Some(seg) = data.segment {
            self.segment_hits[seg.0] += 1;
        }
    }

    pub(crate) fn release(&mut self, graph: &Graph, arc: ArcId) {
        debug_assert!(self.used[arc.0], "arc {arc:?} released while free");
        let data = graph.arc(arc);
        self.used[arc.0] = false;
        self.departures[data.from.0] -= 1;
        if let Some(seg) = data.segment {
            self.segment_hits[seg.0] -= 1;
        }
    }
}

/// Requirement predicate, fixed for the lifetime of a search.
pub trait CoverageRule: Sync {
    /// Whether consuming `arc` now would sweep something still unswept.
    fn is_arc_required(&self, graph: &Graph, marks: &Marks, arc: ArcId) -> bool;

    /// Mandatory traversals left in a walk that has not started.
    fn mandatory_count(&self, graph: &Graph) -> usize;
}

/// Every physical arc is mandatory until used.
#[derive(Clone, Copy, Debug, Default)]
pub struct EveryArcRule;

impl CoverageRule for EveryArcRule {
    fn is_arc_required(&self, graph: &Graph, marks: &Marks, arc: ArcId) -> bool {
        !marks.is_used(arc) && !graph.arc(arc).is_virtual()
    }

    fn mandatory_count(&self, graph: &Graph) -> usize {
        graph.physical_arc_count()
    }
}

/// A physical arc is mandatory while its segment is unswept in both directions.
#[derive(Clone, Copy, Debug, Default)]
pub struct EverySegmentRule;

impl CoverageRule for EverySegmentRule {
    fn is_arc_required(&self, graph: &Graph, marks: &Marks, arc: ArcId) -> bool {
        !marks.is_used(arc)
            && graph
                .arc(arc)
                .segment
                .is_some_and(|seg| marks.segment_hits(seg) == 0)
    }

    fn mandatory_count(&self, graph: &Graph) -> usize {
        graph.segment_count()
    }
}

impl CoverageMode {
    pub fn rule(self) -> &'static dyn CoverageRule {
        match self {
            CoverageMode::EveryDirection => &EveryArcRule,
            CoverageMode::EitherDirection => &EverySegmentRule,
        }
    }
}
