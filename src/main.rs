use std::env;
use std::io::{self, IsTerminal};
use std::process;

use subissue::batch::Batch;
use subissue::config::{self, Config};
use subissue::log::RunLogger;
use subissue::tracker::GhTracker;

fn main() {
    let cli = config::parse_args(env::args_os()).unwrap_or_else(|e| e.exit());

    if cli.print_config {
        print!("{}", Config::default_toml());
        return;
    }

    let config = match Config::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    let stdout = io::stdout();
    let color = stdout.is_terminal();
    let mut batch = Batch::new(GhTracker::from_config(&config), config.batch_options(), stdout.lock())
        .with_color(color);
    if let Some(ref path) = config.log_file {
        batch = batch.with_logger(RunLogger::new(path));
    }

    // Per-issue failures are reported in the output; the run itself succeeds.
    batch.run(&config.plan(), io::stdin().lock());
}
