//! Unweighted breadth-first search over arcs.
//!
//! The search loop calls this once per candidate move, so the scratch space
//! is reused across calls: visit marks are generation stamps and the queue
//! and parent tables keep their capacity.

use std::collections::VecDeque;

use super::types::{ArcData, ArcId, NodeId};
use super::Graph;

/// First node satisfying the goal, its hop distance, and the arcs leading to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BfsHit {
    pub node: NodeId,
    pub distance: usize,
    pub path: Vec<ArcId>,
}

/// Reusable BFS state. Distances and parents are separate tables so no flag
/// is shared with the search's own marks.
#[derive(Clone, Debug, Default)]
pub struct BfsScratch {
    stamp: Vec<u32>,
    generation: u32,
    distance: Vec<usize>,
    parent: Vec<Option<ArcId>>,
    queue: VecDeque<NodeId>,
}

impl BfsScratch {
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self, n: usize) {
        if self.stamp.len() != n {
            self.stamp = vec![0; n];
            self.distance = vec![0; n];
            self.parent = vec![None; n];
            self.generation = 0;
        }
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            self.stamp.fill(0);
            self.generation = 1;
        }
        self.queue.clear();
    }

    #[inline]
    fn seen(&self, node: NodeId) -> bool {
        self.stamp[node.0] == self.generation
    }

    #[inline]
    fn visit(&mut self, node: NodeId, distance: usize, parent: Option<ArcId>) {
        self.stamp[node.0] = self.generation;
        self.distance[node.0] = distance;
        self.parent[node.0] = parent;
        self.queue.push_back(node);
    }

    /// Nearest node (including `from` itself) for which `goal` holds, walking
    /// only arcs accepted by `arc_ok`.
    ///
    /// Nodes are tested when dequeued and arcs are expanded in adjacency
    /// order, so ties go to the node discovered first.
    pub fn nearest<A, G>(
        &mut self,
        graph: &Graph,
        from: NodeId,
        mut arc_ok: A,
        mut goal: G,
    ) -> Option<(NodeId, usize)>
    where
        A: FnMut(ArcId, &ArcData) -> bool,
        G: FnMut(NodeId) -> bool,
    {
        self.reset(graph.node_count());
        self.visit(from, 0, None);
        while let Some(node) = self.queue.pop_front() {
            let d = self.distance[node.0];
            if goal(node) {
                return Some((node, d));
            }
            for &arc in graph.out_arcs(node) {
                let data = graph.arc(arc);
                if self.seen(data.to) || !arc_ok(arc, data) {
                    continue;
                }
                self.visit(data.to, d + 1, Some(arc));
            }
        }
        None
    }

    /// Arcs from the last search's origin to `node`, in walking order.
    ///
    /// Only meaningful for a node reached by the most recent [`Self::nearest`].
    pub fn path_to(&self, graph: &Graph, node: NodeId) -> Vec<ArcId> {
        debug_assert!(self.seen(node), "node was not reached by the last search");
        let mut path = Vec::with_capacity(self.distance[node.0]);
        let mut at = node;
        while let Some(arc) = self.parent[at.0] {
            path.push(arc);
            at = graph.arc(arc).from;
        }
        path.reverse();
        path
    }
}

impl Graph {
    /// Breadth-first search from `from` for the nearest node satisfying `goal`,
    /// walking only arcs accepted by `arc_ok`. Returns the node, its hop
    /// distance, and the arc path, or `None` if no such node is reachable.
    pub fn reachable_by_bfs<A, G>(&self, from: NodeId, arc_ok: A, goal: G) -> Option<BfsHit>
    where
        A: FnMut(ArcId, &ArcData) -> bool,
        G: FnMut(NodeId) -> bool,
    {
        let mut scratch = BfsScratch::new();
        let (node, distance) = scratch.nearest(self, from, arc_ok, goal)?;
        Some(BfsHit {
            node,
            distance,
            path: scratch.path_to(self, node),
        })
    }
}
