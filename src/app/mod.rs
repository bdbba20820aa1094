pub mod args;
pub mod renderer;

use std::{
    io::{Stdout, Write},
    path::Path,
};

use crossterm::{cursor, queue};
use tracing_appender::non_blocking::WorkerGuard;

use crate::{
    app::{args::Config, renderer::Renderer},
    error::MazeError,
    generators::{generate_maze, resolve_seed},
};

/// What a finished run produced, enough to reproduce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub program: String,
    pub width: usize,
    pub height: usize,
    pub seed: u64,
    pub accepted: usize,
    pub frames: usize,
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}x{} seed={}",
            self.program, self.width, self.height, self.seed
        )
    }
}

pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Set a panic hook to restore the cursor on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Hide the cursor while frames are drawn
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        App::set_panic_hook();
        queue!(stdout, cursor::Hide)?;
        stdout.flush()?;
        Ok(())
    }

    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, cursor::Show)?;
        stdout.flush()?;
        Ok(())
    }

    /// Installs a file logger when `path` is given.
    /// The returned guard must be held until the run ends so buffered lines are written.
    pub fn init_logging(path: Option<&Path>, verbose: bool) -> Option<WorkerGuard> {
        let path = path?;
        let file_name = path.file_name()?;
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let (writer, guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
        let level = if verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };
        tracing_subscriber::fmt()
            .with_writer(writer)
            .with_ansi(false)
            .with_max_level(level)
            .init();
        Some(guard)
    }

    /// Generates one maze, drawing it to `stdout`, then prints the summary line.
    pub fn run(&self, stdout: &mut Stdout) -> Result<RunSummary, MazeError> {
        App::setup_terminal(stdout)?;
        let result = self.run_to(&mut *stdout);
        App::restore_terminal(stdout)?;

        let summary = result?;
        writeln!(stdout, "\n{}", summary)?;
        stdout.flush()?;
        Ok(summary)
    }

    /// Generates one maze, drawing frames to `out`. Does not print the summary.
    pub fn run_to<W: Write>(&self, out: W) -> Result<RunSummary, MazeError> {
        let config = &self.config;
        let seed = resolve_seed(config.seed);
        tracing::info!(
            width = config.width,
            height = config.height,
            seed,
            animate = config.animate,
            "Starting maze generation"
        );

        let mut renderer = Renderer::new(out, config.render_options());
        let (maze, report) = generate_maze(config.width, config.height, seed, &mut renderer)?;

        let reachable = maze.reachable_from((0, 0));
        if reachable != maze.len() {
            tracing::error!(reachable, cells = maze.len(), "Maze is not fully connected");
        }

        Ok(RunSummary {
            program: config.program.clone(),
            width: config.width,
            height: config.height,
            seed,
            accepted: report.accepted.len(),
            frames: renderer.frames(),
        })
    }
}
