//! Raw terminal response shapes.
//!
//! The terminal library answers in one of two shapes depending on the call
//! made: a plain (error code, numeric table) pair, or an object carrying
//! named field, code, and time lists next to a column-major data payload.
//! [`TerminalResponse`] makes the two shapes an explicit tagged union so the
//! uniform response check can pattern-match instead of inspecting shapes at
//! runtime.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AdapterError;

/// The (error code, numeric table) response shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryData {
    /// Terminal error code; zero means success.
    pub error_code: i64,

    /// Numeric table values, row-major.
    pub values: Vec<Vec<f64>>,
}

/// The field-object response shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldData {
    /// Terminal error code; zero means success.
    pub error_code: i64,

    /// Field names, one per data series for dataset queries.
    pub fields: Vec<String>,

    /// Instrument codes, one per data series for time-series queries.
    pub codes: Vec<String>,

    /// Observation timestamps for time-series queries; empty otherwise.
    pub times: Vec<NaiveDate>,

    /// Column-major payload: one series per field (dataset queries) or per
    /// instrument (time-series queries).
    pub data: Vec<Vec<Value>>,
}

/// Union of the two raw response shapes the terminal can return.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TerminalResponse {
    /// (error code, numeric table) pair.
    Summary(SummaryData),

    /// Object with named field/code/time lists and a column-major payload.
    Fields(FieldData),
}

/// Python-style truthiness of an element of the field-shape payload.
fn is_truthy(series: &[Value]) -> bool {
    !series.is_empty()
}

impl TerminalResponse {
    /// The terminal error code carried by either shape.
    pub fn error_code(&self) -> i64 {
        match self {
            Self::Summary(summary) => summary.error_code,
            Self::Fields(fields) => fields.error_code,
        }
    }

    /// Whether the payload carries any data at all.
    ///
    /// The check is pooled across the whole payload, exactly as the
    /// terminal's reference client does it: for the summary shape, any
    /// entry of the numeric table different from zero; for the field shape,
    /// any non-empty column series (a series of nulls still counts).
    pub fn has_data(&self) -> bool {
        match self {
            Self::Summary(summary) => summary
                .values
                .iter()
                .flatten()
                .any(|value| *value != 0.0),
            Self::Fields(fields) => fields.data.iter().any(|series| is_truthy(series)),
        }
    }

    /// Uniform response check applied before any reshaping.
    ///
    /// A response is accepted only when the error code is zero and the
    /// payload has data; otherwise the whole operation fails with
    /// [`AdapterError::BadResponse`] carrying the code.
    pub fn check(&self) -> Result<(), AdapterError> {
        let code = self.error_code();
        if code != 0 || !self.has_data() {
            return Err(AdapterError::BadResponse { code });
        }
        Ok(())
    }
}
