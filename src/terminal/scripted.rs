//! Canned-response terminal for tests and offline smoke runs.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::models::{QueryParams, TerminalResponse};

use super::{TerminalError, WindTerminal};

/// A [`WindTerminal`] that replays queued responses instead of talking to
/// the real terminal.
///
/// Responses are consumed first-in-first-out across all query primitives,
/// in call order. Every call is recorded in a log so tests can assert what
/// was forwarded. Optionally prints a start-up banner to stdout (the real
/// library does) and can be scripted to fail its start-up.
///
/// Single-threaded by design, like the adapter itself; interior mutability
/// is plain `RefCell`.
pub struct ScriptedTerminal {
    connected: bool,
    banner: Option<String>,
    start_failure: Option<String>,
    responses: RefCell<VecDeque<TerminalResponse>>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedTerminal {
    /// Create a terminal with no queued responses.
    pub fn new() -> Self {
        Self {
            connected: false,
            banner: None,
            start_failure: None,
            responses: RefCell::new(VecDeque::new()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Print `banner` to stdout during start-up.
    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = Some(banner.into());
        self
    }

    /// Script the next start-up to fail with `message`.
    pub fn failing_start(mut self, message: impl Into<String>) -> Self {
        self.start_failure = Some(message.into());
        self
    }

    /// Queue a response for the next query primitive called.
    pub fn with_response(self, response: TerminalResponse) -> Self {
        self.push_response(response);
        self
    }

    /// Queue a response for the next query primitive called.
    pub fn push_response(&self, response: TerminalResponse) {
        self.responses.borrow_mut().push_back(response);
    }

    /// Every call made so far, formatted as `primitive args...`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn next_response(&self, call: String) -> Result<TerminalResponse, TerminalError> {
        self.calls.borrow_mut().push(call);
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| TerminalError::CallFailed("no scripted response queued".to_string()))
    }
}

impl Default for ScriptedTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl WindTerminal for ScriptedTerminal {
    fn start(&mut self) -> Result<(), TerminalError> {
        if let Some(message) = self.start_failure.take() {
            return Err(TerminalError::StartFailed(message));
        }
        if let Some(banner) = &self.banner {
            println!("{}", banner);
        }
        self.connected = true;
        Ok(())
    }

    fn close(&mut self) -> Result<(), TerminalError> {
        self.calls.borrow_mut().push("close".to_string());
        self.connected = false;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn wsd(
        &self,
        codes: &[String],
        fields: &[String],
        start: &str,
        end: &str,
        params: &QueryParams,
    ) -> Result<TerminalResponse, TerminalError> {
        let call = format!(
            "wsd {} {} {} {} {}",
            codes.join(","),
            fields.join(","),
            start,
            end,
            params
        );
        self.next_response(call.trim_end().to_string())
    }

    fn wss(
        &self,
        codes: &[String],
        fields: &[String],
        params: &QueryParams,
    ) -> Result<TerminalResponse, TerminalError> {
        let call = format!("wss {} {} {}", codes.join(","), fields.join(","), params);
        self.next_response(call.trim_end().to_string())
    }

    fn wset(&self, report: &str, params: &QueryParams) -> Result<TerminalResponse, TerminalError> {
        let call = format!("wset {} {}", report, params);
        self.next_response(call.trim_end().to_string())
    }

    fn tdays(
        &self,
        start: &str,
        end: &str,
        params: &QueryParams,
    ) -> Result<TerminalResponse, TerminalError> {
        let call = format!("tdays {} {} {}", start, end, params);
        self.next_response(call.trim_end().to_string())
    }

    fn tdays_offset(
        &self,
        offset: i64,
        date: &str,
        params: &QueryParams,
    ) -> Result<TerminalResponse, TerminalError> {
        let call = format!("tdaysoffset {} {} {}", offset, date, params);
        self.next_response(call.trim_end().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SummaryData;

    fn ok_response() -> TerminalResponse {
        TerminalResponse::Summary(SummaryData {
            error_code: 0,
            values: vec![vec![1.0]],
        })
    }

    #[test]
    fn test_responses_replay_in_call_order() {
        let terminal = ScriptedTerminal::new()
            .with_response(ok_response())
            .with_response(TerminalResponse::Summary(SummaryData {
                error_code: -1,
                values: vec![],
            }));

        let params = QueryParams::new();
        let first = terminal.wset("indexconstituent", &params).unwrap();
        let second = terminal.tdays("2020-01-01", "2020-01-31", &params).unwrap();
        assert_eq!(first.error_code(), 0);
        assert_eq!(second.error_code(), -1);
    }

    #[test]
    fn test_exhausted_queue_is_a_terminal_fault() {
        let terminal = ScriptedTerminal::new();
        let result = terminal.wset("indexconstituent", &QueryParams::new());
        assert!(matches!(result, Err(TerminalError::CallFailed(_))));
    }

    #[test]
    fn test_calls_are_recorded_with_arguments() {
        let terminal = ScriptedTerminal::new().with_response(ok_response());
        let params = QueryParams::new().with("date", "2020-01-02");
        terminal.wset("indexconstituent", &params).unwrap();
        assert_eq!(
            terminal.calls(),
            vec!["wset indexconstituent date=2020-01-02".to_string()]
        );
    }

    #[test]
    fn test_start_and_close_toggle_liveness() {
        let mut terminal = ScriptedTerminal::new();
        assert!(!terminal.is_connected());
        terminal.start().unwrap();
        assert!(terminal.is_connected());
        terminal.close().unwrap();
        assert!(!terminal.is_connected());
    }

    #[test]
    fn test_scripted_start_failure() {
        let mut terminal = ScriptedTerminal::new().failing_start("no license");
        let result = terminal.start();
        assert!(matches!(result, Err(TerminalError::StartFailed(message)) if message == "no license"));
        assert!(!terminal.is_connected());
    }
}
