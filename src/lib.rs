pub mod app;
pub mod error;
pub mod generators;
pub mod maze;

pub use error::MazeError;
pub use maze::{Direction, Maze, Openings};
