use std::process::ExitCode;

use kruskal_maze::app::{App, args::Config};

fn main() -> ExitCode {
    let config = Config::from_env();
    let _log_guard = App::init_logging(config.log_file.as_deref(), config.step);

    let app = App::new(config);
    match app.run(&mut std::io::stdout()) {
        Ok(summary) => {
            tracing::info!(%summary, "Run complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            eprintln!("{}: {}", app.config().program, e);
            ExitCode::FAILURE
        }
    }
}
