//! Tools exposed by the yfinance MCP server
//!
//! This crate holds the [`Tool`] abstraction, the [`ToolRegistry`] the server
//! dispatches through, and the finance tools that adapt a
//! [`FinanceProvider`](yfinance_data::FinanceProvider) into plain mappings and
//! sequences.

pub mod error;
pub mod finance;
pub mod registry;
pub mod schema;
pub mod tool;

pub use error::{Result, ToolError};
pub use finance::{finance_registry, register_finance_tools};
pub use registry::ToolRegistry;
pub use tool::{Tool, parse_params};
