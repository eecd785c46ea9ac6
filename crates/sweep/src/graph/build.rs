//! Graph construction from a grid description.

use crate::error::Result;
use crate::grid::{Coord, Grid, Link};

use super::types::{NodeId, SegmentKind};
use super::Graph;

impl Graph {
    /// Build the street multigraph of `grid`.
    ///
    /// Intersections are visited in row-major order; each one is linked to
    /// the intersection above it, then to the one on its left. For a two-way
    /// segment the arc leaving the later intersection is added first, which
    /// fixes adjacency order (and with it every BFS tie-break downstream).
    pub fn from_grid(grid: &Grid) -> Result<Self> {
        let mut graph = Self::with_intersections(grid.streets(), grid.avenues());
        for s in 1..=grid.streets() {
            for a in 1..=grid.avenues() {
                let here = graph.id(Coord::new(s, a));
                if s > 1 {
                    let above = graph.id(Coord::new(s - 1, a));
                    graph.add_street(here, above, grid.vertical(s - 1, a))?;
                }
                if a > 1 {
                    let left = graph.id(Coord::new(s, a - 1));
                    graph.add_street(here, left, grid.horizontal(s, a - 1))?;
                }
            }
        }
        Ok(graph)
    }

    fn id(&self, c: Coord) -> NodeId {
        NodeId((c.street - 1) * self.avenues + (c.avenue - 1))
    }

    /// `there` precedes `here` in row-major order, so `Backward` runs here → there.
    fn add_street(&mut self, here: NodeId, there: NodeId, link: Link) -> Result<()> {
        match link {
            Link::Absent => {}
            Link::TwoWay => {
                let seg = self.add_segment(SegmentKind::TwoWay)?;
                let out = self.add_arc(here, there, Some(seg))?;
                let back = self.add_arc(there, here, Some(seg))?;
                self.link_reverse(out, back);
            }
            Link::Backward => {
                let seg = self.add_segment(SegmentKind::OneWay)?;
                self.add_arc(here, there, Some(seg))?;
            }
            Link::Forward => {
                let seg = self.add_segment(SegmentKind::OneWay)?;
                self.add_arc(there, here, Some(seg))?;
            }
        }
        Ok(())
    }
}
