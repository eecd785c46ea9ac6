//! Curated surface for the CLI and benches.
//!
//! Re-exports only; the modules stay the source of truth.

// Grid description and parsing
pub use crate::grid::rand::{draw_grid, GridSampleCfg, ReplayToken};
pub use crate::grid::{Coord, Grid, Link, ParseError};
pub use crate::problem::Problem;
// Graph model and balancing
pub use crate::eulerize::{eulerize, EulerizeReport};
pub use crate::graph::{ArcData, ArcId, BfsHit, Graph, NodeId, SegmentId, SegmentKind};
// Circuit search
pub use crate::search::{
    solve, solve_with_defaults, BoundEstimator, Budget, Circuit, CircuitSearch, CircuitSink,
    CoverageMode, CoverageRule, Discard, Marks, RouteCfg, SearchControl, SearchOutcome,
    SearchReport, SearchStats, Unbounded,
};
pub use crate::{Error, Result};
