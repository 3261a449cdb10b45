//! Shared utilities for yfinance-mcp
//!
//! Currently only logging setup. Stdout carries the MCP protocol, so every
//! log line goes to stderr.

pub mod logging;

pub use logging::{DEFAULT_FILTER, init_tracing};
