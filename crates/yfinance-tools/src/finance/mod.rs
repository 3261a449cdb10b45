//! Yahoo Finance tools
//!
//! Every tool follows the same shape: decode arguments, resolve a
//! [`Ticker`](yfinance_data::Ticker), call exactly one accessor, reshape the
//! result into a plain mapping or sequence. Nothing is validated, retried or
//! cached here; provider errors pass through as [`ToolError::Upstream`].
//!
//! [`ToolError::Upstream`]: crate::ToolError::Upstream

pub mod calendar;
pub mod history;
pub mod info;
pub mod options;
pub mod statements;

#[cfg(test)]
pub(crate) mod stub;

use serde::Deserialize;
use std::sync::Arc;
use yfinance_data::ArcFinanceProvider;

use crate::ToolRegistry;
use crate::schema::Param;

pub use calendar::CalendarTool;
pub use history::{DividendsTool, HistoryTool};
pub use info::CompanyInfoTool;
pub use options::{OptionChainTool, OptionExpirationsTool};
pub use statements::{StatementKind, StatementTool};

/// Default `period` of the history tool
pub const DEFAULT_PERIOD: &str = "1mo";

/// Default `interval` of the history tool
pub const DEFAULT_INTERVAL: &str = "1d";

/// The `ticker` parameter shared by every tool
pub(crate) const TICKER_PARAM: Param = Param::required("ticker", "Stock ticker symbol (e.g. 'AAPL').");

/// Arguments of tools that only take a symbol
#[derive(Debug, Deserialize)]
pub(crate) struct TickerParams {
    pub ticker: String,
}

/// Register every finance tool against one provider
pub fn register_finance_tools(registry: &mut ToolRegistry, provider: &ArcFinanceProvider) {
    registry.register(Arc::new(CompanyInfoTool::new(provider.clone())));
    registry.register(Arc::new(HistoryTool::new(provider.clone())));
    for kind in [
        StatementKind::Income,
        StatementKind::BalanceSheet,
        StatementKind::CashFlow,
    ] {
        registry.register(Arc::new(StatementTool::new(kind, provider.clone())));
    }
    registry.register(Arc::new(DividendsTool::new(provider.clone())));
    registry.register(Arc::new(StatementTool::new(
        StatementKind::Earnings,
        provider.clone(),
    )));
    registry.register(Arc::new(CalendarTool::new(provider.clone())));
    registry.register(Arc::new(OptionExpirationsTool::new(provider.clone())));
    registry.register(Arc::new(OptionChainTool::new(provider.clone())));
}

/// A registry holding every finance tool
pub fn finance_registry(provider: &ArcFinanceProvider) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    register_finance_tools(&mut registry, provider);
    registry
}
