mod cli;
mod commands;

use cli::{AstParams, CheckParams, CstParams, build_cli};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

fn main() {
    init_logging();

    let matches = build_cli().get_matches();

    let result = match matches.subcommand() {
        Some(("ast", m)) => commands::ast::run(AstParams::from_matches(m).into()),
        Some(("cst", m)) => commands::cst::run(CstParams::from_matches(m).into()),
        Some(("check", m)) => commands::check::run(CheckParams::from_matches(m).into()),
        _ => unreachable!("clap should have caught this"),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Logs go to stderr, filtered by `WEFT_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_env("WEFT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
