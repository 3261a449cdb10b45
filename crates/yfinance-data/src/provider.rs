//! The provider boundary
//!
//! [`FinanceProvider`] is the seam between the tool adapters and whatever
//! client actually talks to the market-data service. The production
//! implementation is [`YahooProvider`](crate::yahoo::YahooProvider); tests plug
//! in stubs.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::frame::Frame;
use crate::value::Record;

/// Calls and puts listed for one expiration date
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OptionChain {
    pub calls: Frame,
    pub puts: Frame,
}

/// A market-data client
///
/// Every accessor takes the symbol verbatim. Implementations decide on their
/// own whether a symbol is known.
#[async_trait]
pub trait FinanceProvider: Send + Sync {
    /// Company profile and key statistics
    async fn info(&self, symbol: &str) -> Result<Record>;

    /// OHLCV history for a period (e.g. `5d`, `1mo`, `max`) at an interval (e.g. `1d`, `1h`)
    async fn history(&self, symbol: &str, period: &str, interval: &str) -> Result<Frame>;

    /// Annual income statement, line items by period
    async fn income_statement(&self, symbol: &str) -> Result<Frame>;

    /// Annual balance sheet, accounts by period
    async fn balance_sheet(&self, symbol: &str) -> Result<Frame>;

    /// Annual cash flow statement, line items by period
    async fn cash_flow(&self, symbol: &str) -> Result<Frame>;

    /// Dividend payments indexed by date
    async fn dividends(&self, symbol: &str) -> Result<Frame>;

    /// Annual revenue and earnings indexed by year
    async fn earnings(&self, symbol: &str) -> Result<Frame>;

    /// Upcoming events (earnings date, dividend dates, estimates)
    async fn calendar(&self, symbol: &str) -> Result<Record>;

    /// Listed option expiration dates as `YYYY-MM-DD`
    async fn option_expirations(&self, symbol: &str) -> Result<Vec<String>>;

    /// Option chain for one expiration date (`YYYY-MM-DD`)
    async fn option_chain(&self, symbol: &str, expiration: &str) -> Result<OptionChain>;
}

/// Type alias for Arc-wrapped provider
pub type ArcFinanceProvider = Arc<dyn FinanceProvider>;
