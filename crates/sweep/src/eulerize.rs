//! Polarity balancing: make every node's in-degree equal its out-degree.
//!
//! Repeatedly take the first node with surplus incoming arcs, find the
//! nearest node with surplus outgoing arcs by BFS over all existing arcs, and
//! duplicate the arcs of that shortest path as virtual arcs. Each round fixes
//! one unit of polarity at both ends, so the loop runs exactly half the total
//! absolute polarity times.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::{BfsScratch, Graph, NodeId};

/// What the balancing pass added.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EulerizeReport {
    /// Balancing paths duplicated (one per unit of positive polarity).
    pub reductions: usize,
    /// Virtual arcs added in total.
    pub virtual_arcs: usize,
}

/// Balance `graph` in place by adding virtual arcs.
///
/// Fails with [`Error::UnbalanceableGraph`] (naming the node that could not
/// be balanced) when no node with negative polarity is reachable, and with
/// [`Error::Allocation`] if adjacency storage cannot grow. Both leave the
/// graph partially augmented; callers should discard it.
pub fn eulerize(graph: &mut Graph) -> Result<EulerizeReport> {
    let mut report = EulerizeReport::default();
    let mut scratch = BfsScratch::new();
    loop {
        let Some(positive) = graph.imbalanced_nodes().next() else {
            break;
        };
        tracing::debug!(
            from = %graph.coord(positive),
            polarity = graph.node(positive).polarity,
            "reduce polarity"
        );
        let g: &Graph = graph;
        let deficit = |n: NodeId| g.node(n).polarity < 0;
        let Some((negative, _)) = scratch.nearest(g, positive, |_, _| true, deficit) else {
            return Err(Error::UnbalanceableGraph {
                at: graph.coord(positive),
            });
        };
        for arc in scratch.path_to(graph, negative) {
            let hop = *graph.arc(arc);
            graph.add_arc(hop.from, hop.to, None)?;
            report.virtual_arcs += 1;
        }
        report.reductions += 1;
    }
    tracing::info!(
        reductions = report.reductions,
        virtual_arcs = report.virtual_arcs,
        arcs = graph.arc_count(),
        "polarity balanced"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Coord, Grid, Link};

    fn build(text: &str) -> Graph {
        Graph::from_grid(&Grid::parse(text).unwrap()).unwrap()
    }

    fn assert_degrees_match(g: &Graph) {
        for node in g.node_ids() {
            let outgoing = g.out_arcs(node).len();
            let incoming = g.arc_ids().filter(|&a| g.arc(a).to == node).count();
            assert_eq!(outgoing, incoming, "unbalanced at {}", g.coord(node));
            assert_eq!(g.node(node).polarity, 0);
        }
    }

    #[test]
    fn balanced_input_gets_no_virtual_arcs() {
        let mut g = Graph::from_grid(&Grid::filled(2, 2, Link::TwoWay)).unwrap();
        let report = eulerize(&mut g).unwrap();
        assert_eq!(report, EulerizeReport::default());
        assert_eq!(g.virtual_arc_count(), 0);
        assert_degrees_match(&g);
    }

    #[test]
    fn one_way_deficit_is_fed_by_nearest_surplus() {
        // S1/A1 has one outgoing one-way arc and only two-way arcs otherwise.
        let mut g = build("o > o\n|   |\no - o\n");
        let origin = g.node_at(Coord::new(1, 1)).unwrap();
        assert_eq!(g.node(origin).polarity, -1);
        let report = eulerize(&mut g).unwrap();
        assert_eq!(report.reductions, 1);
        // S1/A2 -> S2/A2 -> S2/A1 -> S1/A1
        assert_eq!(report.virtual_arcs, 3);
        let into_origin: Vec<_> = g
            .arc_ids()
            .filter(|&a| g.arc(a).is_virtual() && g.arc(a).to == origin)
            .collect();
        assert_eq!(into_origin.len(), 1);
        assert_eq!(g.coord(g.arc(into_origin[0]).from), Coord::new(2, 1));
        assert_degrees_match(&g);
    }

    #[test]
    fn virtual_arcs_duplicate_existing_hops() {
        let mut g = build("o > o > o\n|   o   |\no - o - o\n");
        eulerize(&mut g).unwrap();
        assert_degrees_match(&g);
        for v in g.arc_ids().filter(|&a| g.arc(a).is_virtual()) {
            let hop = g.arc(v);
            assert!(
                g.arc_ids().any(|p| {
                    let twin = g.arc(p);
                    !twin.is_virtual() && (twin.from, twin.to) == (hop.from, hop.to)
                }),
                "virtual arc {} -> {} has no physical twin",
                g.coord(hop.from),
                g.coord(hop.to)
            );
        }
    }

    #[test]
    fn dead_end_cannot_be_balanced() {
        let mut g = build("o > o\n");
        let err = eulerize(&mut g).unwrap_err();
        match err {
            Error::UnbalanceableGraph { at } => assert_eq!(at, Coord::new(1, 2)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn several_units_resolve_one_per_round() {
        // Two one-way arcs into S1/A2 from both sides.
        let mut g = build("o > o < o\n|   |   |\no - o - o\n");
        let middle = g.node_at(Coord::new(1, 2)).unwrap();
        assert_eq!(g.node(middle).polarity, 2);
        let report = eulerize(&mut g).unwrap();
        assert_eq!(report.reductions, 2);
        assert!(g.is_balanced());
        assert_eq!(g.node(NodeId(1)).polarity, 0);
    }
}
