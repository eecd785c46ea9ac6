//! Error taxonomy shared by the builder, the balancing pass and the search.

use std::collections::TryReserveError;

use thiserror::Error;

use crate::grid::{Coord, ParseError};

/// Terminal failures of a routing run.
///
/// `Allocation` and `UnbalanceableGraph` abort the run; `NoCircuitFound` is
/// only produced when a caller asks for a circuit out of an outcome that has
/// none (see [`crate::search::SearchOutcome::into_result`]).
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot grow adjacency storage")]
    Allocation(#[from] TryReserveError),

    #[error("cannot balance polarity at {at}: no node with surplus outgoing arcs is reachable")]
    UnbalanceableGraph { at: Coord },

    #[error("no circuit from {start} covers every mandatory street")]
    NoCircuitFound { start: Coord },

    #[error("start {start} lies outside the {streets}x{avenues} grid")]
    StartOutsideGrid {
        start: Coord,
        streets: usize,
        avenues: usize,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
