use rand::{Rng, SeedableRng, rngs::StdRng};

pub mod disjoint_set;
pub mod edges;
pub mod kruskal;

pub use disjoint_set::DisjointSet;
pub use edges::{Edge, EdgeCatalog};
pub use kruskal::{
    BuildEvent, BuildReport, EdgeStatus, KruskalBuilder, MazeObserver, RejectReason, Step,
};

use crate::{error::MazeError, maze::Maze};

/// Picks a seed from the OS-seeded thread RNG when none is given, so it can be reported back.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| rand::rng().random())
}

/// Get a random number generator seeded for reproducibility.
pub fn get_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Generates a `width`×`height` perfect maze from `seed`, reporting progress to `observer`.
pub fn generate_maze<O: MazeObserver + ?Sized>(
    width: usize,
    height: usize,
    seed: u64,
    observer: &mut O,
) -> Result<(Maze, BuildReport), MazeError> {
    let mut rng = get_rng(seed);
    let builder = KruskalBuilder::new(width, height, &mut rng)?;
    Ok(builder.run(observer)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_seed_is_kept() {
        assert_eq!(resolve_seed(Some(12345)), 12345);
    }

    #[test]
    fn test_generate_is_reproducible() {
        let (a, report_a) = generate_maze(12, 7, 2024, &mut ()).unwrap();
        let (b, report_b) = generate_maze(12, 7, 2024, &mut ()).unwrap();
        assert_eq!(a, b);
        assert_eq!(report_a.accepted, report_b.accepted);
        assert!(a.is_perfect());
    }
}
