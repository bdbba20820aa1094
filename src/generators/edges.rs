use rand::{Rng, seq::SliceRandom};

use crate::{error::MazeError, maze::Direction};

/// A wall that may be removed: the `direction` side of the cell at `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub x: usize,
    pub y: usize,
    pub direction: Direction,
    /// False when the wall is on the outer boundary and has no cell behind it.
    pub usable: bool,
}

impl Edge {
    pub fn source(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// The cell on the other side of the wall, if it lies within a `width`×`height` grid.
    pub fn neighbor(&self, width: usize, height: usize) -> Option<(usize, usize)> {
        let (dx, dy) = self.direction.delta();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        (x < width && y < height).then_some((x, y))
    }
}

/// Every north wall and every west wall of a grid, in the order they will be considered.
#[derive(Debug, Clone)]
pub struct EdgeCatalog {
    edges: Vec<Edge>,
    width: usize,
    height: usize,
}

impl EdgeCatalog {
    /// Builds `2 * width * height` edges: first the north wall of every cell, then the west wall.
    /// Walls on the top row and left column are marked unusable rather than left out.
    ///
    /// # Panics
    /// If a usable edge points outside the grid.
    pub fn new(width: usize, height: usize) -> Result<Self, MazeError> {
        let cells = width
            .checked_mul(height)
            .ok_or(MazeError::TooLarge { width, height })?;
        let len = cells
            .checked_mul(2)
            .ok_or(MazeError::TooLarge { width, height })?;
        let mut edges = Vec::new();
        edges
            .try_reserve_exact(len)
            .map_err(|source| MazeError::Allocation {
                what: "edge list",
                len,
                source,
            })?;

        for direction in [Direction::North, Direction::West] {
            edges.extend((0..cells).map(|i| {
                let (x, y) = (i % width, i / width);
                let usable = match direction {
                    Direction::North => y > 0,
                    _ => x > 0,
                };
                Edge {
                    x,
                    y,
                    direction,
                    usable,
                }
            }));
        }

        for edge in edges.iter().filter(|e| e.usable) {
            assert!(
                edge.neighbor(width, height).is_some(),
                "usable edge {:?} leaves the {}x{} grid",
                edge,
                width,
                height
            );
        }

        Ok(EdgeCatalog {
            edges,
            width,
            height,
        })
    }

    /// Uniformly permutes the edges in place.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.edges.shuffle(rng);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Edge> {
        self.edges.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Edge> {
        self.edges.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_counts() {
        for (w, h) in [(1, 1), (2, 1), (1, 2), (4, 3), (3, 7)] {
            let catalog = EdgeCatalog::new(w, h).unwrap();
            assert_eq!((catalog.width(), catalog.height()), (w, h));
            assert_eq!(catalog.len(), 2 * w * h);
            let north = catalog
                .iter()
                .filter(|e| e.direction == Direction::North)
                .count();
            assert_eq!(north, w * h);
            // Interior walls of a grid: (w - 1) * h vertical plus w * (h - 1) horizontal
            let usable = catalog.iter().filter(|e| e.usable).count();
            assert_eq!(usable, (w - 1) * h + w * (h - 1));
        }
    }

    #[test]
    fn test_boundary_flags() {
        let catalog = EdgeCatalog::new(3, 2).unwrap();
        for edge in catalog.iter() {
            match edge.direction {
                Direction::North => assert_eq!(edge.usable, edge.y != 0),
                Direction::West => assert_eq!(edge.usable, edge.x != 0),
                d => panic!("unexpected direction {}", d),
            }
            assert_eq!(edge.usable, edge.neighbor(3, 2).is_some());
        }
    }

    #[test]
    fn test_non_square_covers_every_cell() {
        let (w, h) = (5, 2);
        let catalog = EdgeCatalog::new(w, h).unwrap();
        let mut seen = vec![0; w * h];
        for edge in catalog.iter() {
            assert!(edge.x < w && edge.y < h);
            seen[edge.y * w + edge.x] += 1;
        }
        assert!(seen.iter().all(|&n| n == 2));
    }

    #[test]
    fn test_shuffle_is_seeded_permutation() {
        let mut a = EdgeCatalog::new(6, 4).unwrap();
        let mut b = a.clone();
        let original = a.edges.clone();
        a.shuffle(&mut StdRng::seed_from_u64(7));
        b.shuffle(&mut StdRng::seed_from_u64(7));
        assert_eq!(a.edges, b.edges);
        assert_ne!(a.edges, original);
        for edge in &original {
            assert!(a.edges.contains(edge));
        }
    }

    #[test]
    fn test_shuffle_spreads_first_position() {
        // Each of the 4 edges of a 2x1 grid should lead roughly a quarter of the time.
        let base = EdgeCatalog::new(2, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(1234);
        let mut firsts = [0usize; 4];
        for _ in 0..4000 {
            let mut catalog = base.clone();
            catalog.shuffle(&mut rng);
            let first = catalog.get(0).copied();
            let pos = base.iter().position(|e| Some(*e) == first).unwrap();
            firsts[pos] += 1;
        }
        assert!(firsts.iter().all(|&n| (800..1200).contains(&n)), "{:?}", firsts);
    }
}
