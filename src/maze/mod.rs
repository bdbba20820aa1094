pub mod cell;

use std::collections::VecDeque;

pub use cell::{Direction, Openings};

use crate::error::MazeError;

/// A `width`×`height` grid of cells, each recording which of its walls are open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    cells: Box<[Openings]>,
    width: usize,
    height: usize,
}

impl Maze {
    /// Widest maze whose rows fit in a terminal line: two columns per cell plus the left post,
    /// within crossterm's `u16` column range.
    pub const MAX_WIDTH: usize = (u16::MAX as usize - 1) / 2;

    /// Creates a fully walled maze.
    /// Fails if `width` exceeds [`Maze::MAX_WIDTH`], `width * height` overflows, or the cell
    /// storage cannot be allocated.
    pub fn new(width: usize, height: usize) -> Result<Self, MazeError> {
        let too_large = || MazeError::TooLarge { width, height };
        if width.checked_mul(2).is_none_or(|columns| columns >= u16::MAX as usize) {
            return Err(too_large());
        }
        let len = width.checked_mul(height).ok_or_else(too_large)?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|source| MazeError::Allocation {
                what: "grid",
                len,
                source,
            })?;
        cells.resize(len, Openings::NONE);
        Ok(Maze {
            cells: cells.into_boxed_slice(),
            width,
            height,
        })
    }

    /// Returns the height of the maze in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the width of the maze in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Checks if the given coordinate is within the bounds of the maze.
    pub fn is_in_bounds(&self, coord: (usize, usize)) -> bool {
        coord.0 < self.width && coord.1 < self.height
    }

    pub fn ravel_index(&self, coord: (usize, usize)) -> usize {
        coord.1 * self.width + coord.0
    }

    pub fn unravel_index(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }

    /// The coordinate one step from `coord` in `direction`, or `None` if it falls off the grid.
    pub fn neighbor(&self, coord: (usize, usize), direction: Direction) -> Option<(usize, usize)> {
        let (dx, dy) = direction.delta();
        let x = coord.0.checked_add_signed(dx)?;
        let y = coord.1.checked_add_signed(dy)?;
        self.is_in_bounds((x, y)).then_some((x, y))
    }

    /// Opens the wall between `from` and its neighbor in `direction`, on both sides.
    /// Returns the neighbor's coordinate.
    ///
    /// # Panics
    /// * If `from` is out of bounds
    /// * If the neighbor in `direction` is out of bounds
    pub fn open_wall(&mut self, from: (usize, usize), direction: Direction) -> (usize, usize) {
        if !self.is_in_bounds(from) {
            panic!("The given coordinate is out of bounds");
        }
        let Some(to) = self.neighbor(from, direction) else {
            panic!("Cannot open the {} wall of {:?}: no cell beyond it", direction, from);
        };
        let from_idx = self.ravel_index(from);
        let to_idx = self.ravel_index(to);
        self.cells[from_idx].insert(direction);
        self.cells[to_idx].insert(direction.opposite());
        to
    }

    /// Number of open passages. Each passage is shared by two cells.
    pub fn passage_count(&self) -> usize {
        self.cells.iter().map(|c| c.len()).sum::<usize>() / 2
    }

    /// Counts the cells reachable from `start` by walking through open walls.
    /// Uses a breadth-first search over the openings alone.
    pub fn reachable_from(&self, start: (usize, usize)) -> usize {
        if !self.is_in_bounds(start) {
            return 0;
        }
        let mut visited = vec![false; self.len()];
        let mut queue = VecDeque::from([start]);
        visited[self.ravel_index(start)] = true;
        let mut count = 0;
        while let Some(coord) = queue.pop_front() {
            count += 1;
            for direction in self[coord].iter() {
                let Some(next) = self.neighbor(coord, direction) else {
                    continue;
                };
                let idx = self.ravel_index(next);
                if !visited[idx] {
                    visited[idx] = true;
                    queue.push_back(next);
                }
            }
        }
        count
    }

    /// Every opening has a matching opening on the other side, and none leads off the grid.
    pub fn is_symmetric(&self) -> bool {
        (0..self.len()).all(|idx| {
            let coord = self.unravel_index(idx);
            self.cells[idx].iter().all(|direction| {
                self.neighbor(coord, direction)
                    .is_some_and(|n| self[n].contains(direction.opposite()))
            })
        })
    }

    /// True when the open passages form a spanning tree: connected and acyclic.
    pub fn is_perfect(&self) -> bool {
        if self.is_empty() {
            return true;
        }
        self.is_symmetric()
            && self.passage_count() == self.len() - 1
            && self.reachable_from((0, 0)) == self.len()
    }
}

impl std::ops::Index<(usize, usize)> for Maze {
    type Output = Openings;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.cells[self.ravel_index(index)]
    }
}
