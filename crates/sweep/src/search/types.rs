//! Configuration, results and counters of the circuit search.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::eulerize::EulerizeReport;
use crate::graph::{ArcId, Graph, NodeId};
use crate::grid::Coord;

/// Which traversals of a two-way street are mandatory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoverageMode {
    /// Both directions of a two-way street must be swept.
    #[default]
    EveryDirection,
    /// One pass in either direction sweeps a two-way street; the other
    /// direction stays available as a free connector.
    EitherDirection,
}

impl CoverageMode {
    /// Problem-file flag: `1` = every direction, `0` = either direction.
    pub fn from_flag(flag: u8) -> Option<Self> {
        match flag {
            0 => Some(Self::EitherDirection),
            1 => Some(Self::EveryDirection),
            _ => None,
        }
    }

    pub fn flag(self) -> u8 {
        match self {
            Self::EveryDirection => 1,
            Self::EitherDirection => 0,
        }
    }
}

/// Route configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteCfg {
    pub start: Coord,
    pub coverage: CoverageMode,
    /// How many best-ranked moves are explored in ranked order at each step
    /// before the rest follow in adjacency order. Affects speed, never the result.
    pub width: usize,
}

impl RouteCfg {
    pub const DEFAULT_WIDTH: usize = 4;

    pub fn new(start: Coord) -> Self {
        Self {
            start,
            coverage: CoverageMode::default(),
            width: Self::DEFAULT_WIDTH,
        }
    }

    pub fn with_coverage(self, coverage: CoverageMode) -> Self {
        Self { coverage, ..self }
    }

    pub fn with_width(self, width: usize) -> Self {
        Self { width, ..self }
    }
}

/// Closed walk from the start node back to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    /// Visited intersections; first and last are the start.
    pub nodes: Vec<Coord>,
    /// Consumed arcs, one per hop.
    pub arcs: Vec<ArcId>,
}

impl Circuit {
    pub(crate) fn from_walk(graph: &Graph, start: NodeId, walk: &[ArcId]) -> Self {
        let mut nodes = Vec::with_capacity(walk.len() + 1);
        nodes.push(graph.coord(start));
        nodes.extend(walk.iter().map(|&arc| graph.coord(graph.arc(arc).to)));
        Self {
            nodes,
            arcs: walk.to_vec(),
        }
    }

    /// Number of hops.
    #[inline]
    pub fn length(&self) -> usize {
        self.arcs.len()
    }

    pub fn start(&self) -> Coord {
        self.nodes[0]
    }
}

impl fmt::Display for Circuit {
    /// Space-separated stops, e.g. `S1/A1 S1/A2 S1/A1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Search counters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Extend steps taken (one per loop iteration).
    pub steps: u64,
    /// Frames pushed, i.e. moves committed.
    pub frames: u64,
    /// Moves rejected by the lower bound or as dead ends.
    pub pruned: u64,
    /// Improved circuits reported.
    pub circuits: u64,
    /// Smallest walk length seen right after a backtrack.
    pub shallowest_backtrack: usize,
}

/// How a search ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum SearchOutcome {
    /// The search space is exhausted; this circuit is minimal.
    Optimal(Circuit),
    /// Stopped by the caller; `best` is valid but not proven minimal.
    Interrupted { best: Option<Circuit> },
    /// Exhausted without covering every mandatory street from the start.
    NoCircuit,
}

impl SearchOutcome {
    pub fn circuit(&self) -> Option<&Circuit> {
        match self {
            Self::Optimal(c) => Some(c),
            Self::Interrupted { best } => best.as_ref(),
            Self::NoCircuit => None,
        }
    }

    pub fn is_optimal(&self) -> bool {
        matches!(self, Self::Optimal(_))
    }

    /// The best circuit, or [`Error::NoCircuitFound`] if there is none.
    pub fn into_result(self, start: Coord) -> Result<Circuit> {
        match self {
            Self::Optimal(c) | Self::Interrupted { best: Some(c) } => Ok(c),
            Self::Interrupted { best: None } | Self::NoCircuit => {
                Err(Error::NoCircuitFound { start })
            }
        }
    }
}

/// Everything a full routing run produced.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchReport {
    pub cfg: RouteCfg,
    pub eulerize: EulerizeReport,
    /// Mandatory traversals at the start of the search.
    pub mandatory: usize,
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
}
