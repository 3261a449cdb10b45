//! Building frames and records out of Yahoo Finance results
//!
//! The provider unpacks client types into the plain values taken here, so
//! every table layout can be tested without a network round-trip.

use chrono::{DateTime, Utc};
use std::fmt::Display;

use crate::frame::Frame;
use crate::value::{DataValue, Record};

/// Columns of an option chain leg, in output order
pub const OPTION_COLUMNS: &[&str] = &[
    "contractSymbol",
    "lastTradeDate",
    "strike",
    "lastPrice",
    "bid",
    "ask",
    "volume",
    "openInterest",
    "impliedVolatility",
    "inTheMoney",
];

/// Columns of a price history frame, in output order
pub const HISTORY_COLUMNS: &[&str] = &[
    "Open",
    "High",
    "Low",
    "Close",
    "Volume",
    "Dividends",
    "Stock Splits",
];

/// One bar of chart data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Line items of one statement period
#[derive(Debug, Clone, PartialEq)]
pub struct StatementPeriod {
    pub period: String,
    pub items: Vec<(&'static str, Option<f64>)>,
}

/// One option contract, flattened
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contract {
    pub symbol: String,
    pub last_trade: Option<DateTime<Utc>>,
    pub strike: Option<f64>,
    pub last_price: Option<f64>,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub volume: Option<i64>,
    pub open_interest: Option<i64>,
    pub implied_volatility: Option<f64>,
    pub in_the_money: bool,
}

/// Format a unix timestamp as an RFC 3339 UTC string
pub fn format_timestamp(ts: i64) -> String {
    DateTime::from_timestamp(ts, 0).map_or_else(|| ts.to_string(), |dt| dt.to_rfc3339())
}

/// Format a unix timestamp as a `YYYY-MM-DD` UTC date
pub fn format_date(ts: i64) -> String {
    DateTime::from_timestamp(ts, 0).map_or_else(|| ts.to_string(), |dt| day(&dt))
}

fn day(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

/// Read a decimal amount through its textual form
pub fn decimal(amount: impl Display) -> Option<f64> {
    amount
        .to_string()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Build a statement frame: line items down the index, periods across the columns
///
/// Line items keep the order they are first reported in.
pub fn statement_frame(periods: &[StatementPeriod]) -> Frame {
    let mut line_items: Vec<&'static str> = Vec::new();
    for period in periods {
        for (item, _) in &period.items {
            if !line_items.contains(item) {
                line_items.push(item);
            }
        }
    }

    let mut frame = Frame::new(periods.iter().map(|p| p.period.clone()));
    for item in line_items {
        let cells: Vec<DataValue> = periods
            .iter()
            .map(|period| {
                let value = period
                    .items
                    .iter()
                    .find(|(name, _)| *name == item)
                    .and_then(|(_, value)| *value);
                DataValue::from(value)
            })
            .collect();
        frame.push_row(item, cells);
    }
    frame
}

/// Yearly revenue and earnings, one `(year, revenue, earnings)` per row
pub fn earnings_frame(years: &[(i64, Option<f64>, Option<f64>)]) -> Frame {
    let mut frame = Frame::new(["Revenue", "Earnings"]).with_index_name("Year");
    for (year, revenue, earnings) in years {
        frame.push_row(*year, vec![(*revenue).into(), (*earnings).into()]);
    }
    frame
}

/// Upcoming events; dates that are not announced are left out
pub fn calendar_record(
    earnings_dates: &[DateTime<Utc>],
    ex_dividend: Option<DateTime<Utc>>,
    dividend: Option<DateTime<Utc>>,
) -> Record {
    let mut calendar = Record::new();

    if let Some(date) = dividend {
        calendar.insert("Dividend Date", day(&date));
    }
    if let Some(date) = ex_dividend {
        calendar.insert("Ex-Dividend Date", day(&date));
    }
    if !earnings_dates.is_empty() {
        let dates: Vec<String> = earnings_dates.iter().map(day).collect();
        calendar.insert("Earnings Date", dates);
    }
    calendar
}

/// Frame of option contracts with [`OPTION_COLUMNS`], indexed by position
pub fn contracts_frame(contracts: &[Contract]) -> Frame {
    let mut frame = Frame::new(OPTION_COLUMNS.iter().copied());
    for (position, contract) in contracts.iter().enumerate() {
        frame.push_row(
            position as i64,
            vec![
                contract.symbol.as_str().into(),
                contract.last_trade.map(|dt| dt.to_rfc3339()).into(),
                contract.strike.into(),
                contract.last_price.into(),
                contract.bid.into(),
                contract.ask.into(),
                contract.volume.into(),
                contract.open_interest.into(),
                contract.implied_volatility.into(),
                contract.in_the_money.into(),
            ],
        );
    }
    frame
}

fn is_intraday(interval: &str) -> bool {
    interval.ends_with('m') || interval.ends_with('h')
}

/// Position of the bar whose `[start, next start)` span holds `ts`
///
/// Bars are chronological. Daily and longer bars span whole UTC days, so an
/// event stamped before the opening bell still lands on that day's bar.
fn owning_bar(bars: &[Bar], ts: i64, intraday: bool) -> Option<usize> {
    let key = |ts: i64| if intraday { ts } else { ts.div_euclid(86_400) };
    bars.partition_point(|bar| key(bar.timestamp) <= key(ts))
        .checked_sub(1)
}

/// Fold events into per-bar slots; events before the first bar are dropped
fn align_events(
    bars: &[Bar],
    events: &[(i64, f64)],
    intraday: bool,
    combine: fn(f64, f64) -> f64,
) -> Vec<Option<f64>> {
    let mut slots = vec![None; bars.len()];
    for (ts, value) in events {
        if let Some(slot) = owning_bar(bars, *ts, intraday).and_then(|i| slots.get_mut(i)) {
            *slot = Some(slot.map_or(*value, |acc| combine(acc, *value)));
        }
    }
    slots
}

/// Price history frame with each dividend and split on the bar it falls in
///
/// Dividends landing in the same bar add up; splits multiply.
pub fn history_frame(
    bars: &[Bar],
    dividends: &[(i64, f64)],
    splits: &[(i64, f64)],
    interval: &str,
) -> Frame {
    let intraday = is_intraday(interval);
    let index_name = if intraday { "Datetime" } else { "Date" };
    let mut frame = Frame::new(HISTORY_COLUMNS.iter().copied()).with_index_name(index_name);

    let dividends = align_events(bars, dividends, intraday, |a, b| a + b);
    let splits = align_events(bars, splits, intraday, |a, b| a * b);

    for ((bar, dividend), split) in bars.iter().zip(dividends).zip(splits) {
        frame.push_row(
            format_timestamp(bar.timestamp),
            vec![
                bar.open.into(),
                bar.high.into(),
                bar.low.into(),
                bar.close.into(),
                bar.volume.into(),
                dividend.unwrap_or(0.0).into(),
                split.unwrap_or(0.0).into(),
            ],
        );
    }
    frame
}

/// Dividend payments indexed by date, oldest first
pub fn dividends_frame(dividends: &[(i64, f64)]) -> Frame {
    let mut sorted = dividends.to_vec();
    sorted.sort_by_key(|(date, _)| *date);

    let mut frame = Frame::new(["Dividends"]).with_index_name("Date");
    for (date, amount) in sorted {
        frame.push_row(format_timestamp(date), vec![amount.into()]);
    }
    frame
}
