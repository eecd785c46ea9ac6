//! Anytime branch-and-bound search for a shortest covering circuit.
//!
//! The search is a depth-first walk over arc choices driven by an explicit
//! stack of frames, one per committed arc. Each loop iteration is one Extend
//! step on the top frame:
//! - On first visit the frame either closes a circuit (back at the start
//!   with nothing mandatory left) or ranks its candidate moves.
//! - Otherwise the next candidate is committed (a new frame is pushed) unless
//!   the bound says it cannot beat the incumbent.
//! - A frame without candidates is popped and its arc released.
//!
//! Every closed circuit is strictly shorter than the previous one and is
//! reported immediately. When the stack empties the last one is optimal.
//! The caller's [`SearchControl`] is consulted before every step; stopping
//! leaves the stack intact, so [`CircuitSearch::run`] can be called again to
//! resume exactly where it left off.

use crate::error::{Error, Result};
use crate::eulerize::eulerize;
use crate::graph::{ArcId, Graph, NodeId, SegmentKind};
use crate::grid::Grid;

use super::bound::BoundEstimator;
use super::control::{CircuitSink, Discard, SearchControl, Unbounded};
use super::rule::{CoverageRule, Marks};
use super::types::{Circuit, RouteCfg, SearchOutcome, SearchReport, SearchStats};

/// A move out of a frame's node, with the bound in effect after taking it.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    arc: ArcId,
    required: bool,
    bound: usize,
}

/// One level of the backtracking stack.
#[derive(Debug)]
struct Frame {
    node: NodeId,
    /// Arc committed to reach `node`; `None` for the root.
    via: Option<Candidate>,
    expanded: bool,
    candidates: Vec<Candidate>,
    next: usize,
}

impl Frame {
    fn new(node: NodeId, via: Option<Candidate>) -> Self {
        Self {
            node,
            via,
            expanded: false,
            candidates: Vec::new(),
            next: 0,
        }
    }

    fn next_candidate(&mut self) -> Option<Candidate> {
        let c = self.candidates.get(self.next).copied()?;
        self.next += 1;
        Some(c)
    }
}

/// Partial walk plus the counters threaded through every step.
struct Walk {
    marks: Marks,
    arcs: Vec<ArcId>,
    remaining: usize,
    /// Length a new circuit must beat.
    best_len: usize,
}

impl Walk {
    #[inline]
    fn len(&self) -> usize {
        self.arcs.len()
    }

    fn commit(&mut self, graph: &Graph, c: Candidate) {
        self.marks.take(graph, c.arc);
        self.arcs.push(c.arc);
        if c.required {
            self.remaining -= 1;
        }
    }

    fn undo(&mut self, graph: &Graph, c: Candidate) {
        let last = self.arcs.pop();
        debug_assert_eq!(last, Some(c.arc));
        self.marks.release(graph, c.arc);
        if c.required {
            self.remaining += 1;
        }
    }

    /// Would a circuit through a move with this bound beat the incumbent?
    #[inline]
    fn admits(&self, bound: usize) -> bool {
        self.len() + 1 + bound < self.best_len
    }
}

/// Resumable circuit search over one (balanced) graph.
pub struct CircuitSearch<'g> {
    graph: &'g Graph,
    rule: &'static dyn CoverageRule,
    start: NodeId,
    width: usize,
    estimator: BoundEstimator<'g>,
    walk: Walk,
    stack: Vec<Frame>,
    stats: SearchStats,
    best: Option<Circuit>,
    mandatory: usize,
}

impl<'g> CircuitSearch<'g> {
    /// Prepare a search from `cfg.start`. The graph should already be
    /// balanced; otherwise fewer (or no) circuits exist.
    pub fn new(graph: &'g Graph, cfg: &RouteCfg) -> Result<Self> {
        let (streets, avenues) = graph.dims();
        let start = graph.node_at(cfg.start).ok_or(Error::StartOutsideGrid {
            start: cfg.start,
            streets,
            avenues,
        })?;
        let rule = cfg.coverage.rule();
        let mandatory = rule.mandatory_count(graph);
        Ok(Self {
            graph,
            rule,
            start,
            width: cfg.width.max(1),
            estimator: BoundEstimator::new(graph, rule, start),
            walk: Walk {
                marks: Marks::new(graph),
                arcs: Vec::new(),
                remaining: mandatory,
                // No walk can use more arcs than the graph holds.
                best_len: graph.arc_count() + 1,
            },
            stack: vec![Frame::new(start, None)],
            stats: SearchStats {
                shallowest_backtrack: graph.arc_count(),
                ..SearchStats::default()
            },
            best: None,
            mandatory,
        })
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn best(&self) -> Option<&Circuit> {
        self.best.as_ref()
    }

    /// Mandatory traversals at the start of the search.
    pub fn mandatory(&self) -> usize {
        self.mandatory
    }

    /// True once the search space is exhausted.
    pub fn is_exhausted(&self) -> bool {
        self.stack.is_empty()
    }

    /// Run until exhausted or until `control` asks to stop.
    pub fn run<S, C>(&mut self, sink: &mut S, control: &mut C) -> SearchOutcome
    where
        S: CircuitSink + ?Sized,
        C: SearchControl + ?Sized,
    {
        while let Some(top) = self.stack.len().checked_sub(1) {
            if control.should_stop(&self.stats) {
                tracing::info!(
                    steps = self.stats.steps,
                    best = self.best.as_ref().map(Circuit::length),
                    "search interrupted"
                );
                return SearchOutcome::Interrupted {
                    best: self.best.clone(),
                };
            }
            self.stats.steps += 1;
            if !self.stack[top].expanded {
                self.expand(top, sink);
            }
            match self.stack[top].next_candidate() {
                Some(c) if self.walk.admits(c.bound) => {
                    let to = self.graph.arc(c.arc).to;
                    self.walk.commit(self.graph, c);
                    self.stack.push(Frame::new(to, Some(c)));
                    self.stats.frames += 1;
                }
                // The incumbent improved since this frame was ranked.
                Some(_) => self.stats.pruned += 1,
                None => self.backtrack(),
            }
        }
        match &self.best {
            Some(c) => SearchOutcome::Optimal(c.clone()),
            None => SearchOutcome::NoCircuit,
        }
    }

    fn expand<S: CircuitSink + ?Sized>(&mut self, top: usize, sink: &mut S) {
        let node = self.stack[top].node;
        self.stack[top].expanded = true;
        if node == self.start && self.walk.remaining == 0 {
            self.close(sink);
            return;
        }
        self.stack[top].candidates = self.rank_moves(node);
    }

    fn close<S: CircuitSink + ?Sized>(&mut self, sink: &mut S) {
        let length = self.walk.len();
        if length >= self.walk.best_len {
            return;
        }
        let circuit = Circuit::from_walk(self.graph, self.start, &self.walk.arcs);
        self.walk.best_len = length;
        self.stats.circuits += 1;
        tracing::info!(length, steps = self.stats.steps, "improved circuit");
        sink.improved(&circuit);
        self.best = Some(circuit);
    }

    fn backtrack(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        if let Some(via) = frame.via {
            self.walk.undo(self.graph, via);
        }
        let depth = self.walk.len();
        if depth < self.stats.shallowest_backtrack {
            self.stats.shallowest_backtrack = depth;
            tracing::debug!(depth, steps = self.stats.steps, "backtracked to new shallowest depth");
        }
    }

    /// Candidate moves out of `node` in exploration order.
    ///
    /// Ranking: mandatory first, then smaller bound, then targets the walk
    /// has left least often, then one-way before two-way, then adjacency
    /// order. The first `width` ranked moves lead; the rest follow in
    /// adjacency order. Free moves to the same target are interchangeable,
    /// so only the first one is kept.
    fn rank_moves(&mut self, node: NodeId) -> Vec<Candidate> {
        let graph = self.graph;
        let mut pool: Vec<(Candidate, (bool, usize, u32, bool, usize))> = Vec::new();
        let mut free_targets: Vec<NodeId> = Vec::new();
        for (position, &arc) in graph.out_arcs(node).iter().enumerate() {
            if self.walk.marks.is_used(arc) {
                continue;
            }
            let data = graph.arc(arc);
            let required = self.rule.is_arc_required(graph, &self.walk.marks, arc);
            if !required {
                if free_targets.contains(&data.to) {
                    continue;
                }
                free_targets.push(data.to);
            }
            let probe = Candidate {
                arc,
                required,
                bound: 0,
            };
            self.walk.commit(graph, probe);
            let bound = self
                .estimator
                .lower_bound(&self.walk.marks, data.to, self.walk.remaining);
            self.walk.undo(graph, probe);
            let Some(bound) = bound.filter(|&b| self.walk.admits(b)) else {
                self.stats.pruned += 1;
                continue;
            };
            let two_way = graph.segment_kind(arc) == Some(SegmentKind::TwoWay);
            let key = (
                !required,
                bound,
                self.walk.marks.departures(data.to),
                two_way,
                position,
            );
            pool.push((Candidate { bound, ..probe }, key));
        }

        let mut ranked: Vec<usize> = (0..pool.len()).collect();
        ranked.sort_unstable_by_key(|&i| pool[i].1);
        ranked.truncate(self.width);
        let mut order: Vec<Candidate> = ranked.iter().map(|&i| pool[i].0).collect();
        order.extend(
            pool.iter()
                .enumerate()
                .filter(|(i, _)| !ranked.contains(i))
                .map(|(_, (c, _))| *c),
        );
        order
    }
}

/// Build, balance and search `grid` from `cfg.start`.
///
/// Improved circuits go to `sink` as they are found; `control` may stop the
/// search early, in which case the outcome is `Interrupted`.
pub fn solve<S, C>(
    grid: &Grid,
    cfg: &RouteCfg,
    sink: &mut S,
    control: &mut C,
) -> Result<SearchReport>
where
    S: CircuitSink + ?Sized,
    C: SearchControl + ?Sized,
{
    if !grid.contains(cfg.start) {
        return Err(Error::StartOutsideGrid {
            start: cfg.start,
            streets: grid.streets(),
            avenues: grid.avenues(),
        });
    }
    let mut graph = Graph::from_grid(grid)?;
    let eulerize = eulerize(&mut graph)?;
    let mut search = CircuitSearch::new(&graph, cfg)?;
    tracing::info!(
        start = %cfg.start,
        coverage = ?cfg.coverage,
        mandatory = search.mandatory(),
        arcs = graph.arc_count(),
        "search started"
    );
    let outcome = search.run(sink, control);
    Ok(SearchReport {
        cfg: *cfg,
        eulerize,
        mandatory: search.mandatory(),
        outcome,
        stats: search.stats().clone(),
    })
}

/// Convenience: run to exhaustion without reporting intermediate circuits.
pub fn solve_with_defaults(grid: &Grid, cfg: &RouteCfg) -> Result<SearchReport> {
    solve(grid, cfg, &mut Discard, &mut Unbounded)
}
