//! In-memory provider used by the tool tests

use async_trait::async_trait;
use std::sync::Mutex;
use yfinance_data::{
    DataValue, FinanceProvider, Frame, OptionChain, ProviderError, Record, Result,
};

/// Returns canned data, or fails every call with `SymbolNotFound`
#[derive(Default)]
pub struct StubProvider {
    pub fail: bool,
    pub info: Record,
    pub history: Frame,
    pub income: Frame,
    pub balance: Frame,
    pub cash: Frame,
    pub dividends: Frame,
    pub earnings: Frame,
    pub calendar: Record,
    pub expirations: Vec<String>,
    pub chain: OptionChain,
    /// One entry per accessor call: accessor name followed by its arguments
    pub calls: Mutex<Vec<Vec<String>>>,
}

impl StubProvider {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    fn answer<T: Clone>(&self, call: &[&str], value: &T) -> Result<T> {
        self.calls
            .lock()
            .unwrap()
            .push(call.iter().map(ToString::to_string).collect());

        if self.fail {
            return Err(ProviderError::SymbolNotFound(call[1].to_string()));
        }
        Ok(value.clone())
    }
}

#[async_trait]
impl FinanceProvider for StubProvider {
    async fn info(&self, symbol: &str) -> Result<Record> {
        self.answer(&["info", symbol], &self.info)
    }

    async fn history(&self, symbol: &str, period: &str, interval: &str) -> Result<Frame> {
        self.answer(&["history", symbol, period, interval], &self.history)
    }

    async fn income_statement(&self, symbol: &str) -> Result<Frame> {
        self.answer(&["income_statement", symbol], &self.income)
    }

    async fn balance_sheet(&self, symbol: &str) -> Result<Frame> {
        self.answer(&["balance_sheet", symbol], &self.balance)
    }

    async fn cash_flow(&self, symbol: &str) -> Result<Frame> {
        self.answer(&["cash_flow", symbol], &self.cash)
    }

    async fn dividends(&self, symbol: &str) -> Result<Frame> {
        self.answer(&["dividends", symbol], &self.dividends)
    }

    async fn earnings(&self, symbol: &str) -> Result<Frame> {
        self.answer(&["earnings", symbol], &self.earnings)
    }

    async fn calendar(&self, symbol: &str) -> Result<Record> {
        self.answer(&["calendar", symbol], &self.calendar)
    }

    async fn option_expirations(&self, symbol: &str) -> Result<Vec<String>> {
        self.answer(&["option_expirations", symbol], &self.expirations)
    }

    async fn option_chain(&self, symbol: &str, expiration: &str) -> Result<OptionChain> {
        self.answer(&["option_chain", symbol, expiration], &self.chain)
    }
}

/// Two-row statement frame with line items as the index
pub fn statement(periods: [&str; 2]) -> Frame {
    Frame::new(periods)
        .with_row("Total Revenue", vec![DataValue::Int(391), DataValue::Int(383)])
        .with_row("Net Income", vec![DataValue::Int(93), DataValue::Int(97)])
}
