//! Market data layer for yfinance-mcp
//!
//! This crate owns everything below the tool adapters:
//!
//! - [`DataValue`], [`Record`] and [`Frame`]: the tagged value types provider
//!   results are expressed in
//! - [`FinanceProvider`]: the provider boundary, one accessor per data surface
//! - [`Ticker`]: a symbol bound to a provider
//! - [`YahooProvider`]: the Yahoo Finance implementation
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use yfinance_data::{ArcFinanceProvider, YahooProvider, resolve_ticker};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider: ArcFinanceProvider = Arc::new(YahooProvider::new()?);
//! let ticker = resolve_ticker(&provider, "AAPL");
//!
//! let history = ticker.history("5d", "1d").await?;
//! println!("{} rows", history.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod frame;
pub mod provider;
pub mod ticker;
pub mod value;
pub mod yahoo;

pub use config::YahooConfig;
pub use error::{ProviderError, Result};
pub use frame::{Frame, records_value};
pub use provider::{ArcFinanceProvider, FinanceProvider, OptionChain};
pub use ticker::{Ticker, resolve_ticker};
pub use value::{DataValue, Record};
pub use yahoo::YahooProvider;
