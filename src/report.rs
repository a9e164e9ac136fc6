//! Everything the user sees on stdout.
//!
//! Markers are colored through `colored`; the main binary turns color off
//! when stdout is not a terminal.

use std::{
    io::{self, Write},
    path::Path,
    thread,
    time::{Duration, Instant},
};

use colored::Colorize;
use log::warn;
use signal_hook::{
    consts::{SIGINT, SIGTERM},
    iterator::Signals,
};

use crate::{
    error::ScanError, event::FailedLoginEvent, privilege::Privilege, source::SourceKind,
};

const RULE_WIDTH: usize = 50;

pub struct Report<W> {
    out: W,
}

impl<W: Write> Report<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn info(&mut self, msg: &str) -> io::Result<()> {
        writeln!(self.out, "{} {}", "[*]".yellow(), msg)
    }

    fn alert(&mut self, msg: &str) -> io::Result<()> {
        writeln!(self.out, "{} {}", "[!]".red(), msg)
    }

    fn detail(&mut self, msg: &str) -> io::Result<()> {
        writeln!(self.out, "{} {}", "->".green(), msg)
    }

    fn rule(&mut self, ch: char) -> io::Result<()> {
        writeln!(self.out, "{}", ch.to_string().repeat(RULE_WIDTH))
    }

    pub fn attempting(&mut self, kind: SourceKind) -> io::Result<()> {
        self.info(&format!("Attempting to read {kind}..."))?;
        self.rule('^')
    }

    pub fn not_found(&mut self, path: &Path) -> io::Result<()> {
        self.info(&format!(
            "{} not found. Checking journalctl logs...",
            path.display()
        ))
    }

    pub fn permission_denied(&mut self, path: &Path, privilege: Privilege) -> io::Result<()> {
        self.alert(&format!(
            "Insufficient permissions to read auth.log at {}. {}",
            path.display(),
            privilege.advice()
        ))
    }

    pub fn failure(&mut self, err: &ScanError) -> io::Result<()> {
        self.alert(&capitalize(&err.to_string()))
    }

    pub fn falling_back(&mut self) -> io::Result<()> {
        self.info("Falling back to journalctl...")
    }

    /// Print every event, or the "nothing found" notice for an empty set.
    pub fn events(&mut self, kind: SourceKind, events: &[FailedLoginEvent]) -> io::Result<()> {
        if events.is_empty() {
            return self.info(&format!("No failed login attempts found in {kind}."));
        }
        for ev in events {
            self.event(kind, ev)?;
        }
        Ok(())
    }

    pub fn event(&mut self, kind: SourceKind, ev: &FailedLoginEvent) -> io::Result<()> {
        self.alert(kind.detected_header())?;
        if let Some(user) = &ev.username {
            self.detail(&format!("Username: {user}"))?;
        }
        if let Some(addr) = &ev.source_address {
            self.detail(&format!("IP Address: {addr} {}", ev.address_annotation()))?;
        }
        self.detail(&format!("Timestamp: {}", ev.timestamp))?;
        self.rule('-')
    }

    pub fn all_history_warning(&mut self) -> io::Result<()> {
        self.info(&format!(
            "You used the {} flag, which reads the entire journal instead of just the most recent lines.",
            "--all".italic()
        ))?;
        self.info(
            "Depending on your server's size and popularity, this may load a large amount of data and take time.",
        )
    }

    pub fn ask(&mut self, question: &str) -> io::Result<()> {
        write!(self.out, "{} {}", "[?]".blue(), question)?;
        self.out.flush()
    }

    pub fn aborted(&mut self) -> io::Result<()> {
        self.alert("Aborted by user.")?;
        self.rule('-')
    }

    pub fn finished(&mut self, elapsed: Duration) -> io::Result<()> {
        self.info(&format!(
            "Scan finished in {:.2} seconds.",
            elapsed.as_secs_f64()
        ))?;
        self.rule('-')?;
        self.out.flush()
    }
}

fn capitalize(msg: &str) -> String {
    let mut chars = msg.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Prints the elapsed-time footer when dropped, however `main` ends.
pub struct FinishBanner {
    started: Instant,
}

impl FinishBanner {
    pub fn new(started: Instant) -> Self {
        Self { started }
    }
}

impl Drop for FinishBanner {
    fn drop(&mut self) {
        let _ = Report::new(io::stdout()).finished(self.started.elapsed());
    }
}

/// Shell convention for a process ended by `sig`.
pub fn interrupt_exit_code(sig: i32) -> i32 {
    128 + sig
}

/// On SIGINT/SIGTERM print the footer, then exit with 128 + signal number.
pub fn install_interrupt_footer(started: Instant) -> io::Result<()> {
    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    thread::spawn(move || {
        if let Some(sig) = signals.forever().next() {
            warn!("interrupted by signal {sig}");
            let mut report = Report::new(io::stdout());
            let _ = writeln!(report.out);
            let _ = report.finished(started.elapsed());
            std::process::exit(interrupt_exit_code(sig));
        }
    });
    Ok(())
}
