//! Sweeping circuits over rectilinear street grids.
//!
//! Pipeline: a [`grid::Grid`] description is turned into a directed multigraph
//! ([`graph::Graph`]), balanced by [`eulerize::eulerize`], and handed to the
//! branch-and-bound [`search::CircuitSearch`], which reports every improved
//! circuit and proves the last one optimal by exhausting the search space.
//!
//! Conventions
//! - Coordinates are 1-based `(street, avenue)` pairs; streets grow southward,
//!   avenues grow eastward.
//! - Nodes, arcs and segments are referenced by index newtypes into arenas
//!   owned by the graph. Nothing holds references across mutation.

pub mod api;
pub mod error;
pub mod eulerize;
pub mod graph;
pub mod grid;
pub mod problem;
pub mod search;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{Error, Result};
pub use search::{solve, solve_with_defaults};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::eulerize::{eulerize, EulerizeReport};
    pub use crate::graph::{ArcId, Graph, NodeId, SegmentId};
    pub use crate::grid::{Coord, Grid, Link, ParseError};
    pub use crate::problem::Problem;
    pub use crate::search::{
        solve, solve_with_defaults, Budget, Circuit, CircuitSearch, CircuitSink, CoverageMode,
        RouteCfg, SearchControl, SearchOutcome, SearchReport, SearchStats,
    };
}
