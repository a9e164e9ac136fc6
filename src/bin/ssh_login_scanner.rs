use std::{io, process::ExitCode, time::Instant};

use anyhow::{Context, Result};
use clap::Parser;
use nix::unistd::isatty;

use ssh_login_scanner::{
    Cli, Journalctl,
    privilege::Privilege,
    report::{self, FinishBanner, Report},
};

fn main() -> Result<ExitCode> {
    let started = Instant::now();
    // prints the elapsed time on every way out of main, argument errors and a declined --all included
    let _footer = FinishBanner::new(started);

    // no escape codes when piped into a file or another tool
    if !isatty(io::stdout()).unwrap_or(false) {
        colored::control::set_override(false);
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return Ok(ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(2)));
        }
    };
    if cli.no_color {
        colored::control::set_override(false);
    }

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .format_target(false)
        .init();

    report::install_interrupt_footer(started).context("installing signal handler")?;

    let privilege = Privilege::detect();
    log::debug!("{privilege:?}");

    let mut report = Report::new(io::stdout());
    let outcome = ssh_login_scanner::run(&cli, io::stdin().lock(), &mut report, &Journalctl, privilege)
        .context("writing report")?;
    log::info!("{outcome:?}");

    Ok(ExitCode::SUCCESS)
}
