use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};

use crate::source::JournalRequest;

/// Report failed SSH password logins from auth.log or the systemd journal.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// How many failed logins to show (most recent last)
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    pub limit: u64,

    /// Read the whole journal instead of only the most recent lines
    #[arg(long)]
    pub all: bool,

    /// Do not ask for confirmation before an --all read
    #[arg(short, long)]
    pub yes: bool,

    /// Flat auth log checked before the journal
    #[arg(long, env = "SSH_SCAN_AUTH_LOG", default_value = "/var/log/auth.log")]
    pub auth_log: PathBuf,

    /// Journal unit(s) to query when falling back
    #[arg(
        long = "unit",
        env = "SSH_SCAN_UNITS",
        value_delimiter = ',',
        default_value = "ssh"
    )]
    pub units: Vec<String>,

    /// Raw journal lines read when --all is not given
    #[arg(long, default_value_t = 500, value_parser = clap::value_parser!(u64).range(1..))]
    pub journal_lines: u64,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    #[command(flatten)]
    pub verbose: Verbosity<WarnLevel>,
}

impl Cli {
    pub fn limit(&self) -> usize {
        usize::try_from(self.limit).unwrap_or(usize::MAX)
    }

    pub fn journal_request(&self) -> JournalRequest {
        JournalRequest {
            units: self.units.clone(),
            max_lines: (!self.all).then(|| usize::try_from(self.journal_lines).unwrap_or(usize::MAX)),
        }
    }
}
