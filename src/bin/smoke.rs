//! Offline smoke run reproducing the manual verification script: connect,
//! fetch CSI 300 constituents and print them, then fetch a month of closing
//! prices for two instruments and print that table too.
//!
//! The terminal is scripted with canned responses, so this runs without a
//! terminal license; it exercises the full adapter path end to end.

use chrono::{Datelike, NaiveDate};
use serde_json::{json, Value};

use wind_adapter::{FieldData, QueryParams, ScriptedTerminal, TerminalResponse, WindAdapter};

fn weekdays(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut current = start;
    while current <= end {
        if current.weekday().num_days_from_monday() < 5 {
            days.push(current);
        }
        current = current.succ_opt().expect("date overflow");
    }
    days
}

fn constituents_response() -> TerminalResponse {
    let rows: &[(&str, f64)] = &[
        ("000001.SZ", 3.5),
        ("000002.SZ", 2.1),
        ("600000.SH", 1.2),
        ("600519.SH", 4.8),
    ];
    TerminalResponse::Fields(FieldData {
        error_code: 0,
        fields: vec![
            "date".to_string(),
            "wind_code".to_string(),
            "i_weight".to_string(),
        ],
        codes: vec![],
        times: vec![],
        data: vec![
            rows.iter().map(|_| json!("2019-07-10")).collect(),
            rows.iter().map(|(code, _)| json!(code)).collect(),
            rows.iter().map(|(_, weight)| json!(weight)).collect(),
        ],
    })
}

fn close_series(days: &[NaiveDate], codes: &[String]) -> TerminalResponse {
    let data: Vec<Vec<Value>> = codes
        .iter()
        .enumerate()
        .map(|(c, _)| {
            let base = 10.0 + 15.0 * c as f64;
            let direction = if c % 2 == 0 { 1.0 } else { -1.0 };
            days.iter()
                .enumerate()
                .map(|(d, _)| json!(base + direction * 0.05 * d as f64))
                .collect()
        })
        .collect();
    TerminalResponse::Fields(FieldData {
        error_code: 0,
        fields: vec!["close".to_string()],
        codes: codes.to_vec(),
        times: days.to_vec(),
        data,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let start = NaiveDate::from_ymd_opt(2019, 6, 11).expect("valid date");
    let end = NaiveDate::from_ymd_opt(2019, 7, 10).expect("valid date");
    let days = weekdays(start, end);
    let codes = vec!["000001.SZ".to_string(), "000002.SZ".to_string()];

    let terminal = ScriptedTerminal::new()
        .with_banner("Welcome to the Wind terminal")
        .with_response(constituents_response())
        .with_response(close_series(&days, &codes));

    let mut adapter = WindAdapter::new(terminal);
    adapter.connect()?;

    let constituents = adapter.index_constituents(None, None)?;
    println!("{}", constituents);
    println!();

    let closes = adapter.time_series(
        &codes,
        &["close".to_string()],
        "2019-06-11",
        "2019-07-10",
        &QueryParams::new(),
    )?;
    println!("{}", closes);

    adapter.disconnect()?;
    Ok(())
}
