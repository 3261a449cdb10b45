//! Ticker resolution
//!
//! A [`Ticker`] is a symbol bound to a provider. Resolving one never touches
//! the network and never validates the symbol; unknown symbols only fail once
//! an accessor is called.

use crate::error::Result;
use crate::frame::Frame;
use crate::provider::{ArcFinanceProvider, OptionChain};
use crate::value::Record;

/// Handle to one symbol's data surface
#[derive(Clone)]
pub struct Ticker {
    symbol: String,
    provider: ArcFinanceProvider,
}

/// Resolve a symbol into a [`Ticker`] handle
pub fn resolve_ticker(provider: &ArcFinanceProvider, symbol: &str) -> Ticker {
    Ticker::new(provider.clone(), symbol)
}

impl Ticker {
    pub fn new(provider: ArcFinanceProvider, symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            provider,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub async fn info(&self) -> Result<Record> {
        self.provider.info(&self.symbol).await
    }

    pub async fn history(&self, period: &str, interval: &str) -> Result<Frame> {
        self.provider.history(&self.symbol, period, interval).await
    }

    pub async fn income_statement(&self) -> Result<Frame> {
        self.provider.income_statement(&self.symbol).await
    }

    pub async fn balance_sheet(&self) -> Result<Frame> {
        self.provider.balance_sheet(&self.symbol).await
    }

    pub async fn cash_flow(&self) -> Result<Frame> {
        self.provider.cash_flow(&self.symbol).await
    }

    pub async fn dividends(&self) -> Result<Frame> {
        self.provider.dividends(&self.symbol).await
    }

    pub async fn earnings(&self) -> Result<Frame> {
        self.provider.earnings(&self.symbol).await
    }

    pub async fn calendar(&self) -> Result<Record> {
        self.provider.calendar(&self.symbol).await
    }

    pub async fn option_expirations(&self) -> Result<Vec<String>> {
        self.provider.option_expirations(&self.symbol).await
    }

    pub async fn option_chain(&self, expiration: &str) -> Result<OptionChain> {
        self.provider.option_chain(&self.symbol, expiration).await
    }
}

impl std::fmt::Debug for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ticker").field("symbol", &self.symbol).finish()
    }
}
