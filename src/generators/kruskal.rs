use rand::Rng;

use crate::{
    error::MazeError,
    generators::{
        disjoint_set::DisjointSet,
        edges::{Edge, EdgeCatalog},
    },
    maze::Maze,
};

/// Why an edge was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The wall is on the outer boundary.
    Boundary,
    /// Both sides were already connected; opening it would close a loop.
    Cycle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeStatus {
    Pending,
    Accepted,
    Rejected(RejectReason),
}

/// Notifications sent to a [`MazeObserver`] while a maze is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildEvent {
    /// `edge` is about to be opened. The maze does not include it yet.
    Accepting {
        edge: Edge,
        neighbor: (usize, usize),
    },
    /// Every edge has been classified.
    Finished,
}

/// Receives progress from a [`KruskalBuilder`], e.g. to draw animation frames.
pub trait MazeObserver {
    fn on_event(&mut self, event: &BuildEvent, maze: &Maze) -> std::io::Result<()>;
}

/// Ignores every event.
impl MazeObserver for () {
    fn on_event(&mut self, _event: &BuildEvent, _maze: &Maze) -> std::io::Result<()> {
        Ok(())
    }
}

/// Outcome of evaluating one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub index: usize,
    pub edge: Edge,
    pub status: EdgeStatus,
}

/// Summary of a finished build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Accepted edges in the order they were opened.
    pub accepted: Vec<Edge>,
    pub rejected_boundary: usize,
    pub rejected_cycle: usize,
}

/// Randomized Kruskal's algorithm over a rectangular grid.
///
/// Edges are visited in shuffled order. An edge is opened iff the cells on
/// both sides are not yet connected, so the result is a spanning tree.
pub struct KruskalBuilder {
    maze: Maze,
    sets: DisjointSet,
    edges: EdgeCatalog,
    statuses: Vec<EdgeStatus>,
    cursor: usize,
    report: BuildReport,
}

impl KruskalBuilder {
    /// Allocates the grid, sets and edge list for a `width`×`height` maze
    /// and shuffles the edges with `rng`.
    pub fn new<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<Self, MazeError> {
        let maze = Maze::new(width, height)?;
        let sets = DisjointSet::new(maze.len())?;
        let mut edges = EdgeCatalog::new(width, height)?;
        edges.shuffle(rng);

        let mut statuses = Vec::new();
        statuses
            .try_reserve_exact(edges.len())
            .map_err(|source| MazeError::Allocation {
                what: "edge states",
                len: edges.len(),
                source,
            })?;
        statuses.resize(edges.len(), EdgeStatus::Pending);

        tracing::debug!(width, height, edges = edges.len(), "Prepared Kruskal builder");
        Ok(KruskalBuilder {
            maze,
            sets,
            edges,
            statuses,
            cursor: 0,
            report: BuildReport {
                accepted: Vec::with_capacity(width.saturating_mul(height)),
                rejected_boundary: 0,
                rejected_cycle: 0,
            },
        })
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn sets(&self) -> &DisjointSet {
        &self.sets
    }

    pub fn statuses(&self) -> &[EdgeStatus] {
        &self.statuses
    }

    /// The edge the next call to [`step`](Self::step) will evaluate.
    pub fn peek(&self) -> Option<&Edge> {
        self.edges.get(self.cursor)
    }

    pub fn is_done(&self) -> bool {
        self.cursor >= self.edges.len()
    }

    /// Evaluates the next pending edge. Returns `None` once every edge is classified.
    ///
    /// The observer is told about an accepted edge before the maze changes.
    pub fn step<O: MazeObserver + ?Sized>(
        &mut self,
        observer: &mut O,
    ) -> std::io::Result<Option<Step>> {
        let Some(&edge) = self.edges.get(self.cursor) else {
            return Ok(None);
        };
        let index = self.cursor;
        self.cursor += 1;

        let status = self.evaluate(edge, observer)?;
        self.statuses[index] = status;
        tracing::trace!(index, ?edge, ?status, "Evaluated edge");
        Ok(Some(Step {
            index,
            edge,
            status,
        }))
    }

    fn evaluate<O: MazeObserver + ?Sized>(
        &mut self,
        edge: Edge,
        observer: &mut O,
    ) -> std::io::Result<EdgeStatus> {
        if !edge.usable {
            self.report.rejected_boundary += 1;
            return Ok(EdgeStatus::Rejected(RejectReason::Boundary));
        }

        let Some(neighbor) = edge.neighbor(self.edges.width(), self.edges.height()) else {
            unreachable!("usable edge {:?} has no neighbor", edge);
        };
        let source_idx = self.maze.ravel_index(edge.source());
        let neighbor_idx = self.maze.ravel_index(neighbor);

        if self.sets.is_connected(source_idx, neighbor_idx) {
            self.report.rejected_cycle += 1;
            return Ok(EdgeStatus::Rejected(RejectReason::Cycle));
        }

        observer.on_event(&BuildEvent::Accepting { edge, neighbor }, &self.maze)?;

        self.sets.union(source_idx, neighbor_idx);
        self.maze.open_wall(edge.source(), edge.direction);
        self.report.accepted.push(edge);
        Ok(EdgeStatus::Accepted)
    }

    /// Steps through every remaining edge, then sends [`BuildEvent::Finished`].
    pub fn run<O: MazeObserver + ?Sized>(
        mut self,
        observer: &mut O,
    ) -> std::io::Result<(Maze, BuildReport)> {
        while self.step(observer)?.is_some() {}
        observer.on_event(&BuildEvent::Finished, &self.maze)?;
        tracing::info!(
            accepted = self.report.accepted.len(),
            rejected_boundary = self.report.rejected_boundary,
            rejected_cycle = self.report.rejected_cycle,
            "Finished Kruskal maze"
        );
        Ok((self.maze, self.report))
    }
}
