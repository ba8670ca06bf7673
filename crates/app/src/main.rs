mod args;
mod config;
mod logging;
mod terminal;

use std::io;
use std::path::Path;

use services::{Clock, TopicCatalog, TutorServices};
use tracing::info;

use crate::args::{Args, print_usage};
use crate::config::AppConfig;
use crate::terminal::Terminal;

fn load_catalog(path: Option<&Path>) -> Result<TopicCatalog, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(TopicCatalog::builtin()?);
    };
    let json = std::fs::read_to_string(path)
        .map_err(|err| format!("cannot read catalog {}: {err}", path.display()))?;
    Ok(TopicCatalog::from_json_str(&json)?)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_env().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    if args.help {
        print_usage();
        return Ok(());
    }

    let config = AppConfig::load(args.config.as_deref())?;
    logging::init(args.verbose, config.logging.level.as_deref());

    let policy = config.completion_policy(args.threshold)?;
    let catalog_path = args.catalog.as_deref().or(config.content.catalog.as_deref());
    let catalog = load_catalog(catalog_path)?;
    info!(
        topics = catalog.len(),
        threshold = policy.pass_threshold().value(),
        "starting tutor session"
    );

    // Progress lives for this process only.
    let services = TutorServices::new(catalog, policy, Clock::system());
    let stdin = io::stdin();
    let mut terminal = Terminal::new(services, stdin.lock(), io::stdout().lock());
    terminal.run(args.topic)?;
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
