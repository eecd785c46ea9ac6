//! Shortest covering circuit over a balanced street graph.
//!
//! Purpose
//! - Find a closed walk from a chosen intersection that sweeps every
//!   mandatory street and is as short as possible.
//! - Report every strictly better circuit while searching (anytime), and
//!   prove the final one optimal when the search space is exhausted.
//!
//! Layout
//! - `types.rs`: configuration, circuits, outcomes and counters.
//! - `rule.rs`: per-walk marks and the coverage rules deciding what is mandatory.
//! - `bound.rs`: admissible lower bound used for pruning and ranking.
//! - `control.rs`: caller hooks for reporting and cooperative cancellation.
//! - `engine.rs`: the explicit-stack branch-and-bound loop.
//!
//! Notes
//! - The graph is never mutated during search; all walk state lives in
//!   [`Marks`], owned by the search.
//! - Each arc is consumed at most once per walk, virtual arcs included.

mod bound;
mod control;
mod engine;
mod rule;
mod types;

pub use bound::BoundEstimator;
pub use control::{Budget, CircuitSink, Discard, SearchControl, Unbounded};
pub use engine::{solve, solve_with_defaults, CircuitSearch};
pub use rule::{CoverageRule, EveryArcRule, EverySegmentRule, Marks};
pub use types::{Circuit, CoverageMode, RouteCfg, SearchOutcome, SearchReport, SearchStats};
