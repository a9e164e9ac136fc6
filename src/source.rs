//! Where the raw log lines come from.
//!
//! The flat auth log is preferred. The journal is queried only when that
//! file is missing or cannot be read.

use std::{
    collections::VecDeque,
    fmt, fs,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use log::debug;

use crate::error::ScanError;

pub const FAILURE_MARKER: &str = "Failed password";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    AuthLog,
    Journal,
}

impl SourceKind {
    pub fn detected_header(self) -> &'static str {
        match self {
            SourceKind::AuthLog => "Failed login detected in auth.log file:",
            SourceKind::Journal => "Failed login detected in journalctl logs:",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceKind::AuthLog => "auth.log",
            SourceKind::Journal => "journalctl logs",
        })
    }
}

/// Keep the last `limit` lines containing the failure marker, oldest first.
pub fn last_failed<'a, I>(lines: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut kept = VecDeque::with_capacity(limit.min(1024));
    for line in lines {
        if !line.contains(FAILURE_MARKER) {
            continue;
        }
        if kept.len() == limit {
            kept.pop_front();
        }
        if limit > 0 {
            kept.push_back(line.to_string());
        }
    }
    kept.into()
}

/// The flat log checked before the journal.
pub trait AuthLog {
    fn path(&self) -> &Path;

    fn exists(&self) -> bool;

    /// Last `limit` failure lines, oldest first.
    fn read_failed(&self, limit: usize) -> Result<Vec<String>, ScanError>;
}

pub struct AuthLogFile {
    path: PathBuf,
}

impl AuthLogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AuthLog for AuthLogFile {
    fn path(&self) -> &Path {
        &self.path
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn read_failed(&self, limit: usize) -> Result<Vec<String>, ScanError> {
        let bytes = fs::read(&self.path).map_err(|e| ScanError::from_read(&self.path, e))?;
        // auth logs may carry raw bytes from hostile usernames
        let text = String::from_utf8_lossy(&bytes);
        let failed = last_failed(text.lines(), limit);
        debug!(
            "{}: {} bytes read, {} failed lines kept",
            self.path.display(),
            bytes.len(),
            failed.len()
        );
        Ok(failed)
    }
}

/// Arguments for one journal query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JournalRequest {
    pub units: Vec<String>,
    /// `None` reads the whole history.
    pub max_lines: Option<usize>,
}

impl JournalRequest {
    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::new();
        for unit in &self.units {
            args.push("-u".to_string());
            args.push(unit.clone());
        }
        args.push("--no-pager".to_string());
        if let Some(n) = self.max_lines {
            args.push("-n".to_string());
            args.push(n.to_string());
        }
        args
    }
}

pub trait JournalQuery {
    /// Raw text of the matching journal entries.
    fn fetch(&self, request: &JournalRequest) -> Result<String, ScanError>;
}

/// Runs the system `journalctl` binary.
pub struct Journalctl;

impl JournalQuery for Journalctl {
    fn fetch(&self, request: &JournalRequest) -> Result<String, ScanError> {
        let args = request.args();
        debug!("running journalctl {}", args.join(" "));

        let output = Command::new("journalctl")
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ScanError::JournalSpawn { source })?;

        if !output.status.success() {
            return Err(ScanError::JournalFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

pub fn journal_failed<J: JournalQuery + ?Sized>(
    journal: &J,
    request: &JournalRequest,
    limit: usize,
) -> Result<Vec<String>, ScanError> {
    let text = journal.fetch(request)?;
    let failed = last_failed(text.lines(), limit);
    debug!("journal returned {} failed lines", failed.len());
    Ok(failed)
}
