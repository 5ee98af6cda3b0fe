//! Wind Terminal Adapter
//!
//! This crate exposes the proprietary Wind market-data terminal through a
//! small, DataFrame-shaped interface: a connect/disconnect lifecycle, a
//! uniform error-code check applied to raw terminal responses, and tabular
//! normalization of the query primitives the terminal offers.
//!
//! # Overview
//!
//! The adapter supports:
//! - Session lifecycle: connect (with the terminal's login banner kept off
//!   stdout), disconnect, liveness query
//! - Time-series queries reshaped to rows = timestamps, columns = instruments
//! - Dataset queries reshaped to labeled rows with an optional composite
//!   (date, wind_code) index
//! - Pass-through snapshot and trading-calendar queries
//! - A derived index-constituents convenience query
//!
//! The terminal itself is an external collaborator behind the
//! [`WindTerminal`] trait; [`ScriptedTerminal`] is a canned in-memory
//! implementation for tests and offline smoke runs.
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |     Caller       | --> |   WindAdapter    |  (lifecycle + reshaping)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  WindTerminal    |  (collaborator seam)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | TerminalResponse |  (summary or field shape)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |      Frame       |  (normalized table)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`WindAdapter`] - Owns the terminal session and performs all queries
//! - [`WindTerminal`] - Trait the external terminal library must satisfy
//! - [`TerminalResponse`] - Tagged union of the two raw response shapes
//! - [`Frame`] - Labeled row/column table returned to callers
//! - [`QueryParams`] - Ordered key/value options forwarded to the terminal
//! - [`DateArg`] - Date parameter accepted as text, date, or datetime

pub mod adapter;
pub mod dates;
pub mod errors;
pub mod models;
pub mod terminal;

// Re-export the adapter surface
pub use adapter::{WindAdapter, DEFAULT_INDEX_CODE};

// Re-export date handling
pub use dates::{normalize_date, DateArg, DATE_FORMAT};

// Re-export error types
pub use errors::AdapterError;

// Re-export models
pub use models::{FieldData, Frame, FrameIndex, QueryParams, SummaryData, TerminalResponse};

// Re-export the collaborator seam
pub use terminal::{ScriptedTerminal, TerminalError, WindTerminal};
