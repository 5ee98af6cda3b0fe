//! The collaborator seam: the external terminal library.
//!
//! The proprietary terminal client is out of scope for this crate; it is
//! modeled as the [`WindTerminal`] trait, mirroring the primitive surface
//! the real library exposes (session start/close/liveness plus the wsd,
//! wss, wset, tdays and tdaysoffset query primitives).
//!
//! Faults raised by the terminal are its own ([`TerminalError`]) and the
//! adapter propagates them unchanged.

mod scripted;

pub use scripted::ScriptedTerminal;

use thiserror::Error;

use crate::models::{QueryParams, TerminalResponse};

/// Errors raised by the terminal library itself.
///
/// The adapter never wraps or translates these; they cross the adapter
/// boundary as-is.
#[derive(Error, Debug)]
pub enum TerminalError {
    /// A query primitive was invoked without a started session.
    #[error("terminal session is not started")]
    NotStarted,

    /// The terminal start-up routine failed.
    #[error("terminal start failed: {0}")]
    StartFailed(String),

    /// A query primitive failed inside the terminal.
    #[error("terminal call failed: {0}")]
    CallFailed(String),
}

/// Contract the external terminal library must satisfy.
///
/// All calls are synchronous and blocking; the terminal owns any network
/// behavior, timeouts, and session internals.
pub trait WindTerminal {
    /// Start the terminal session. The real library prints a login banner
    /// to stdout during start-up.
    fn start(&mut self) -> Result<(), TerminalError>;

    /// Close the terminal session.
    fn close(&mut self) -> Result<(), TerminalError>;

    /// Whether the session is currently live.
    fn is_connected(&self) -> bool;

    /// Time-series primitive: per-instrument series over a date range.
    fn wsd(
        &self,
        codes: &[String],
        fields: &[String],
        start: &str,
        end: &str,
        params: &QueryParams,
    ) -> Result<TerminalResponse, TerminalError>;

    /// Snapshot primitive: latest values for instruments and fields.
    fn wss(
        &self,
        codes: &[String],
        fields: &[String],
        params: &QueryParams,
    ) -> Result<TerminalResponse, TerminalError>;

    /// Dataset primitive: a named report (e.g., index constituents).
    fn wset(&self, report: &str, params: &QueryParams) -> Result<TerminalResponse, TerminalError>;

    /// Trading-day calendar primitive.
    fn tdays(
        &self,
        start: &str,
        end: &str,
        params: &QueryParams,
    ) -> Result<TerminalResponse, TerminalError>;

    /// Trading-day offset primitive: the trading day `offset` days away
    /// from `date`.
    fn tdays_offset(
        &self,
        offset: i64,
        date: &str,
        params: &QueryParams,
    ) -> Result<TerminalResponse, TerminalError>;
}
