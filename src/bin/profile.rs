use std::time::{Duration, Instant};

use kruskal_maze::{
    MazeError,
    app::{
        args::parse_c_long,
        renderer::{Glyphs, Pacing, RenderOptions, Renderer},
    },
    generators::generate_maze,
};

/// Times maze generation with every frame rendered into a sink.
/// Usage: `profile [iterations] [width] [height]`
fn main() -> Result<(), MazeError> {
    let mut args = std::env::args();
    args.next(); // Skip executable name
    let mut next_number = |default: usize| {
        args.next()
            .map(|s| usize::try_from(parse_c_long(&s)).unwrap_or(0))
            .unwrap_or(default)
    };
    let num_iters = next_number(10);
    let width = next_number(64);
    let height = next_number(width);

    let options = RenderOptions {
        glyphs: Glyphs::Block,
        color: true,
        animate: true,
        pacing: Pacing::None,
    };

    let start = Instant::now();
    for seed in 0..num_iters as u64 {
        let mut renderer = Renderer::new(std::io::sink(), options);
        let (maze, _report) = generate_maze(width, height, seed, &mut renderer)?;
        debug_assert!(maze.is_perfect());
    }
    let elapsed = start.elapsed();
    println!(
        "{} iterations of {}x{} in {:?} ({:?} per maze)",
        num_iters,
        width,
        height,
        elapsed,
        per_maze(elapsed, num_iters)
    );
    Ok(())
}

/// Mean time per maze. Zero iterations count as one.
fn per_maze(elapsed: Duration, iterations: usize) -> Duration {
    Duration::from_secs_f64(elapsed.as_secs_f64() / iterations.max(1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_maze_beyond_u32_iterations() {
        let iterations = u32::MAX as usize + 2;
        let elapsed = Duration::from_secs(iterations as u64);
        assert_eq!(per_maze(elapsed, iterations), Duration::from_secs(1));
        assert_eq!(per_maze(elapsed, 0), elapsed);
    }
}
