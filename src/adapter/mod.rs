//! The data adapter itself.
//!
//! [`WindAdapter`] owns a terminal session and offers:
//! - lifecycle control: [`connect`](WindAdapter::connect),
//!   [`disconnect`](WindAdapter::disconnect),
//!   [`is_connected`](WindAdapter::is_connected)
//! - reshaping queries: [`time_series`](WindAdapter::time_series),
//!   [`dataset`](WindAdapter::dataset)
//! - pass-through queries: [`snapshot`](WindAdapter::snapshot),
//!   [`trading_days`](WindAdapter::trading_days),
//!   [`trading_days_offset`](WindAdapter::trading_days_offset)
//! - one derived convenience query:
//!   [`index_constituents`](WindAdapter::index_constituents)
//!
//! Every call is synchronous and blocks until the terminal answers. Query
//! operations do not guard on connection state: calling them before
//! `connect()` yields whatever the terminal library does with an unstarted
//! session, propagated unchanged.


use gag::Gag;
use log::debug;
use serde_json::Value;

use crate::dates::{normalize_date, DateArg, DATE_FORMAT};
use crate::errors::AdapterError;
use crate::models::{Frame, QueryParams, TerminalResponse};
use crate::terminal::WindTerminal;

/// Index queried by [`WindAdapter::index_constituents`] when the caller
/// names none: the CSI 300.
pub const DEFAULT_INDEX_CODE: &str = "000300.SH";

/// Dataset report backing the index-constituents query.
const INDEX_CONSTITUENT_REPORT: &str = "indexconstituent";

/// Dataset field promoted to the first index level when present.
const DATE_FIELD: &str = "date";

/// Dataset field promoted to the second index level when present.
const CODE_FIELD: &str = "wind_code";

/// Adapter over a terminal session.
///
/// The session handle is an explicit owned field; the adapter holds at most
/// one session and is not shared across threads.
pub struct WindAdapter<T: WindTerminal> {
    terminal: T,
    session: bool,
}

impl<T: WindTerminal> WindAdapter<T> {
    /// Create an adapter around a terminal. No session is established until
    /// [`connect`](Self::connect) is called.
    pub fn new(terminal: T) -> Self {
        Self {
            terminal,
            session: false,
        }
    }

    /// The underlying terminal.
    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    /// Establish the terminal session.
    ///
    /// The terminal prints a login banner during start-up; stdout is
    /// redirected to a discarded sink for exactly the duration of the
    /// start call and restored on every exit path, including failure.
    /// Start failures are the terminal's own and propagate unchanged.
    pub fn connect(&mut self) -> Result<(), AdapterError> {
        {
            let _quiet = Gag::stdout()?;
            self.terminal.start()?;
        }
        self.session = true;
        debug!("terminal session started");
        Ok(())
    }

    /// Close the terminal session.
    ///
    /// No-op when `connect()` was never called. After a first disconnect,
    /// further calls reach the terminal's close again; whether that is
    /// idempotent is the terminal's business.
    pub fn disconnect(&mut self) -> Result<(), AdapterError> {
        if self.session {
            self.terminal.close()?;
            debug!("terminal session closed");
        }
        Ok(())
    }

    /// Whether the session is currently live.
    ///
    /// Fails with [`AdapterError::NotConnected`] when called before
    /// [`connect`](Self::connect).
    pub fn is_connected(&self) -> Result<bool, AdapterError> {
        if !self.session {
            return Err(AdapterError::NotConnected);
        }
        Ok(self.terminal.is_connected())
    }

    /// Time-series query.
    ///
    /// Arguments are forwarded unchanged to the terminal's time-series
    /// primitive. The raw payload arrives as one series per instrument;
    /// the result is re-oriented to rows = timestamps (index level `time`),
    /// columns = instrument codes.
    pub fn time_series(
        &self,
        codes: &[String],
        fields: &[String],
        start: &str,
        end: &str,
        params: &QueryParams,
    ) -> Result<Frame, AdapterError> {
        let response = self.terminal.wsd(codes, fields, start, end, params)?;
        response.check()?;

        match response {
            TerminalResponse::Fields(data) => {
                let keys = data
                    .times
                    .iter()
                    .map(|time| vec![Value::String(time.format(DATE_FORMAT).to_string())])
                    .collect();
                let frame = Frame::from_columns(data.codes, data.data)?
                    .with_index(vec!["time".to_string()], keys)?;
                debug!("time-series query returned {} rows", frame.height());
                Ok(frame)
            }
            TerminalResponse::Summary(_) => Err(AdapterError::MalformedResponse(
                "time-series response arrived in summary form".to_string(),
            )),
        }
    }

    /// Snapshot query: a pure pass-through.
    ///
    /// The raw response is returned without validation or reshaping; the
    /// caller handles whatever shape the terminal yields.
    pub fn snapshot(
        &self,
        codes: &[String],
        fields: &[String],
        params: &QueryParams,
    ) -> Result<TerminalResponse, AdapterError> {
        Ok(self.terminal.wss(codes, fields, params)?)
    }

    /// Dataset query.
    ///
    /// The raw payload is column-major with one series per field; it is
    /// transposed to rows with the field names as column labels. When the
    /// fields include `date` and/or `wind_code`, those become a composite
    /// row index (date first) and drop out of the regular columns.
    pub fn dataset(&self, report: &str, params: &QueryParams) -> Result<Frame, AdapterError> {
        let response = self.terminal.wset(report, params)?;
        response.check()?;

        match response {
            TerminalResponse::Fields(data) => {
                let mut index_fields: Vec<&str> = Vec::new();
                if data.fields.iter().any(|field| field == DATE_FIELD) {
                    index_fields.push(DATE_FIELD);
                }
                if data.fields.iter().any(|field| field == CODE_FIELD) {
                    index_fields.push(CODE_FIELD);
                }

                let frame = Frame::from_columns(data.fields, data.data)?;
                debug!(
                    "dataset query {} returned {} rows",
                    report,
                    frame.height()
                );
                if index_fields.is_empty() {
                    Ok(frame)
                } else {
                    frame.set_index(&index_fields)
                }
            }
            TerminalResponse::Summary(_) => Err(AdapterError::MalformedResponse(
                "dataset response arrived in summary form".to_string(),
            )),
        }
    }

    /// Trading-day calendar query: a pure pass-through.
    pub fn trading_days(
        &self,
        start: &str,
        end: &str,
        params: &QueryParams,
    ) -> Result<TerminalResponse, AdapterError> {
        Ok(self.terminal.tdays(start, end, params)?)
    }

    /// Trading-day offset query: a pure pass-through.
    pub fn trading_days_offset(
        &self,
        offset: i64,
        date: &str,
        params: &QueryParams,
    ) -> Result<TerminalResponse, AdapterError> {
        Ok(self.terminal.tdays_offset(offset, date, params)?)
    }

    /// Constituents of an index on a given date.
    ///
    /// The date is normalized (unset means today); the index code defaults
    /// to [`DEFAULT_INDEX_CODE`]. Built on the dataset query, so the result
    /// is indexed by (date, wind_code) when the report carries both fields.
    pub fn index_constituents(
        &self,
        date: Option<DateArg>,
        index_code: Option<&str>,
    ) -> Result<Frame, AdapterError> {
        let date = normalize_date(date);
        let index_code = index_code.unwrap_or(DEFAULT_INDEX_CODE);
        let params = QueryParams::new()
            .with("date", date)
            .with("windcode", index_code);
        self.dataset(INDEX_CONSTITUENT_REPORT, &params)
    }
}
