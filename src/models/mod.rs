//! Data models for the adapter
//!
//! This module contains the core data types:
//! - `frame` - Normalized tabular output (Frame, FrameIndex)
//! - `params` - Ordered key/value query options (QueryParams)
//! - `response` - Raw terminal response shapes (TerminalResponse and its
//!   summary/field variants)

mod frame;
mod params;
mod response;

pub use frame::{Frame, FrameIndex};
pub use params::QueryParams;
pub use response::{FieldData, SummaryData, TerminalResponse};
