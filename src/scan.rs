use std::io::{self, BufRead, Write};

use log::{debug, info};

use crate::{
    config::Cli,
    event::FailedLoginEvent,
    privilege::Privilege,
    prompt,
    report::Report,
    source::{self, AuthLog, AuthLogFile, JournalQuery, SourceKind},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// `--all` was declined; nothing was read.
    Aborted,
    /// The scan ended on `source` with `shown` events printed.
    Completed { source: SourceKind, shown: usize },
}

/// One full run against the configured auth log and `journal`.
///
/// Scan failures are printed and swallowed; only I/O errors on the
/// terminal itself come back as `Err`.
pub fn run<R, W, J>(
    cli: &Cli,
    input: R,
    report: &mut Report<W>,
    journal: &J,
    privilege: Privilege,
) -> io::Result<RunOutcome>
where
    R: BufRead,
    W: Write,
    J: JournalQuery + ?Sized,
{
    let file = AuthLogFile::new(&cli.auth_log);
    run_with(cli, input, report, &file, journal, privilege)
}

/// Optional confirmation, source selection, report.
pub fn run_with<R, W, A, J>(
    cli: &Cli,
    input: R,
    report: &mut Report<W>,
    file: &A,
    journal: &J,
    privilege: Privilege,
) -> io::Result<RunOutcome>
where
    R: BufRead,
    W: Write,
    A: AuthLog + ?Sized,
    J: JournalQuery + ?Sized,
{
    if cli.all && !cli.yes && !prompt::confirm_all(input, report)? {
        report.aborted()?;
        return Ok(RunOutcome::Aborted);
    }

    let limit = cli.limit();

    if file.exists() {
        info!("using {}", file.path().display());
        report.attempting(SourceKind::AuthLog)?;
        match file.read_failed(limit) {
            Ok(lines) => {
                let shown = present(report, SourceKind::AuthLog, &lines)?;
                return Ok(RunOutcome::Completed {
                    source: SourceKind::AuthLog,
                    shown,
                });
            }
            Err(err) if err.is_permission_denied() => {
                report.permission_denied(file.path(), privilege)?;
                report.falling_back()?;
            }
            Err(err) => {
                report.failure(&err)?;
                report.falling_back()?;
            }
        }
    } else {
        report.not_found(file.path())?;
    }

    let request = cli.journal_request();
    info!("querying journal for units {:?}", request.units);
    report.attempting(SourceKind::Journal)?;
    let shown = match source::journal_failed(journal, &request, limit) {
        Ok(lines) => present(report, SourceKind::Journal, &lines)?,
        Err(err) => {
            report.failure(&err)?;
            0
        }
    };
    Ok(RunOutcome::Completed {
        source: SourceKind::Journal,
        shown,
    })
}

fn present<W: Write>(report: &mut Report<W>, kind: SourceKind, lines: &[String]) -> io::Result<usize> {
    let events: Vec<_> = lines.iter().map(|l| FailedLoginEvent::parse(l)).collect();
    debug!("{} events parsed from {kind}", events.len());
    report.events(kind, &events)?;
    Ok(events.len())
}
