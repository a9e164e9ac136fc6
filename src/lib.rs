//! Read-only triage of failed SSH password logins on a single host.
//!
//! The pipeline is linear: pick a log source ([`source`]), keep the lines
//! carrying the failure marker, parse each one into a [`FailedLoginEvent`]
//! and print it through a [`Report`].

pub mod config;
pub mod error;
pub mod event;
pub mod privilege;
pub mod prompt;
pub mod report;
pub mod scan;
pub mod source;

pub use config::Cli;
pub use error::ScanError;
pub use event::{AddressKind, FailedLoginEvent};
pub use report::Report;
pub use scan::{RunOutcome, run, run_with};
pub use source::{AuthLog, AuthLogFile, JournalQuery, JournalRequest, Journalctl, SourceKind};
