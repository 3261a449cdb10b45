//! Tools for the financial statements and earnings
//!
//! All four tools share one implementation: fetch a frame indexed by line
//! item (or year, for earnings) with one column per period, and hand it back
//! as a column-oriented mapping.

use async_trait::async_trait;
use serde_json::Value;
use yfinance_data::{ArcFinanceProvider, DataValue, Frame, Ticker, resolve_ticker};

use super::{TICKER_PARAM, TickerParams};
use crate::error::Result;
use crate::schema::params_schema;
use crate::tool::{Tool, parse_params};

/// Which statement a [`StatementTool`] serves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Income,
    BalanceSheet,
    CashFlow,
    Earnings,
}

impl StatementKind {
    pub fn tool_name(self) -> &'static str {
        match self {
            Self::Income => "get_financials",
            Self::BalanceSheet => "get_balance_sheet",
            Self::CashFlow => "get_cashflow",
            Self::Earnings => "get_earnings",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::Income => {
                "Get financial statement data for a given stock. \
                 Returns the income statement as a mapping of period to line items."
            }
            Self::BalanceSheet => {
                "Get balance sheet data for a given stock. \
                 Returns assets, liabilities and equity as a mapping of period to accounts."
            }
            Self::CashFlow => {
                "Get cash flow statement data for a given stock. \
                 Returns operating cash flow, capital expenditure and free cash flow by period."
            }
            Self::Earnings => {
                "Get earnings data for a given stock. \
                 Returns yearly revenue and earnings as a mapping of column to year."
            }
        }
    }

    async fn fetch(self, ticker: &Ticker) -> yfinance_data::Result<Frame> {
        match self {
            Self::Income => ticker.income_statement().await,
            Self::BalanceSheet => ticker.balance_sheet().await,
            Self::CashFlow => ticker.cash_flow().await,
            Self::Earnings => ticker.earnings().await,
        }
    }
}

/// A statement tool bound to one [`StatementKind`]
pub struct StatementTool {
    kind: StatementKind,
    provider: ArcFinanceProvider,
}

impl StatementTool {
    pub fn new(kind: StatementKind, provider: ArcFinanceProvider) -> Self {
        Self { kind, provider }
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }
}

#[async_trait]
impl Tool for StatementTool {
    async fn execute(&self, params: Value) -> Result<DataValue> {
        let params: TickerParams = parse_params(params)?;
        let ticker = resolve_ticker(&self.provider, &params.ticker);
        let frame = self.kind.fetch(&ticker).await?;
        Ok(DataValue::Map(frame.to_dict()))
    }

    fn name(&self) -> &'static str {
        self.kind.tool_name()
    }

    fn description(&self) -> &'static str {
        self.kind.description()
    }

    fn input_schema(&self) -> Value {
        params_schema(&[TICKER_PARAM])
    }
}
