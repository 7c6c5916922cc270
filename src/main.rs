//! Entry point: wires argument scanning → priority actions → conversion.
//!
//! This is the thin orchestrator. It installs error and logging hooks,
//! runs the priority pre-scan (help, diagnostics, list-fonts, version),
//! and otherwise hands a parsed `Cli` to the conversion pipeline with the
//! real terminal, process runner and working directory plugged in.

mod app;
mod args;
mod cli;
mod command;
mod diagnostics;
mod error;
mod options;
mod probe;
mod theme;

use clap::CommandFactory;
use color_eyre::Section;
use color_eyre::eyre::WrapErr;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::app::{App, SystemRunner};
use crate::args::{FlagTable, PriorityAction, UnknownArgPolicy};
use crate::cli::Cli;
use crate::error::Error;
use crate::options::TerminalConfirm;
use crate::probe::SystemProber;

fn main() -> color_eyre::Result<()> {
    // Install color_eyre error/panic hooks for pretty reports.
    color_eyre::install()?;

    let raw = args::collect_utf8(std::env::args_os().skip(1))?;
    let table = FlagTable::from_cli();

    // Scanning is pure; nothing is reported until priority flags are ruled out.
    let scanned = args::scan(&raw, &table, UnknownArgPolicy::Warn);
    init_logging(scanned.verbosity());

    if let Some(action) = args::priority_action(&raw, &table) {
        return run_priority(action);
    }

    if scanned.policy() == UnknownArgPolicy::Warn {
        for token in &scanned.unknown {
            warn!("ignoring unknown argument '{token}'");
        }
    }
    let cli = scanned.into_cli()?;

    let workdir = std::env::current_dir().wrap_err("cannot determine the working directory")?;
    let mut pipeline = App::new(TerminalConfirm, SystemRunner, workdir);

    // Any error returned from here exits with status 1.
    match pipeline.convert(cli) {
        Ok(output) => {
            println!("{}", app::success_message(&output));
            Ok(())
        }
        Err(e) => Err(into_report(e)),
    }
}

fn into_report(e: Error) -> color_eyre::Report {
    match app::failure_hint(&e) {
        Some(hint) => color_eyre::Report::new(e).suggestion(hint),
        None => e.into(),
    }
}

/// Performs a priority-exit action. Always succeeds unless stdout fails.
fn run_priority(action: PriorityAction) -> color_eyre::Result<()> {
    match action {
        PriorityAction::Help => Cli::command().print_long_help()?,
        PriorityAction::Diagnostics => {
            let report = diagnostics::run_diagnostics(&SystemProber);
            print!("{}", report.render());
        }
        PriorityAction::ListFonts => print!("{}", diagnostics::list_fonts(&SystemProber)),
        PriorityAction::Version => println!("mdpdf {}", env!("CARGO_PKG_VERSION")),
    }
    Ok(())
}

/// Installs a stderr subscriber scoped to this crate.
///
/// The level comes from `-v` only; the environment is not consulted.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::new(format!("{}={level}", env!("CARGO_CRATE_NAME")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
