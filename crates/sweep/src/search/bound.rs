//! Admissible lower bound on the length still needed to close a circuit.
//!
//! From node `C` with `r` mandatory traversals outstanding:
//! - `r > 0`: at least `r` hops sweep something, and every hop before the
//!   first of them is spent reaching a node that has an unswept outgoing arc,
//!   so `r + d(C, nearest such node)` hops remain.
//! - `r = 0`: `d(C, start)` hops remain.
//!
//! Distances are BFS hop counts over unused arcs only (every arc is usable
//! once). If the target is unreachable the state is a dead end.
//!
//! The grid is bipartite in `(street + avenue) mod 2`, so any walk from `C`
//! to the start has the parity of `parity(C) xor parity(start)`; a bound of
//! the wrong parity is raised by one.

use crate::graph::{BfsScratch, Graph, NodeId};

use super::rule::{CoverageRule, Marks};

pub struct BoundEstimator<'g> {
    graph: &'g Graph,
    rule: &'g dyn CoverageRule,
    start: NodeId,
    scratch: BfsScratch,
}

impl<'g> BoundEstimator<'g> {
    pub fn new(graph: &'g Graph, rule: &'g dyn CoverageRule, start: NodeId) -> Self {
        Self {
            graph,
            rule,
            start,
            scratch: BfsScratch::new(),
        }
    }

    /// Hops from `at` to the nearest node with an outgoing mandatory arc.
    pub fn distance_to_nearest_uncovered(&mut self, marks: &Marks, at: NodeId) -> Option<usize> {
        let (graph, rule) = (self.graph, self.rule);
        self.scratch
            .nearest(
                graph,
                at,
                |arc, _| !marks.is_used(arc),
                |node| {
                    graph
                        .out_arcs(node)
                        .iter()
                        .any(|&arc| rule.is_arc_required(graph, marks, arc))
                },
            )
            .map(|(_, d)| d)
    }

    /// Hops from `at` back to the start over unused arcs.
    pub fn distance_to_start(&mut self, marks: &Marks, at: NodeId) -> Option<usize> {
        let start = self.start;
        self.scratch
            .nearest(self.graph, at, |arc, _| !marks.is_used(arc), |node| node == start)
            .map(|(_, d)| d)
    }

    /// Lower bound on the hops needed to sweep the `remaining` mandatory
    /// traversals from `at` and return to the start; `None` if impossible.
    pub fn lower_bound(&mut self, marks: &Marks, at: NodeId, remaining: usize) -> Option<usize> {
        let detour = if remaining == 0 {
            self.distance_to_start(marks, at)?
        } else {
            self.distance_to_nearest_uncovered(marks, at)?
        };
        let bound = remaining + detour;
        let closing = self.graph.coord(at).parity() ^ self.graph.coord(self.start).parity();
        Some(if bound % 2 == closing { bound } else { bound + 1 })
    }
}
