//! Tools for option expirations and option chains

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use yfinance_data::{ArcFinanceProvider, DataValue, Record, records_value, resolve_ticker};

use super::{TICKER_PARAM, TickerParams};
use crate::error::Result;
use crate::schema::{Param, params_schema};
use crate::tool::{Tool, parse_params};

/// Expiration dates with listed options, in provider order
pub struct OptionExpirationsTool {
    provider: ArcFinanceProvider,
}

impl OptionExpirationsTool {
    pub fn new(provider: ArcFinanceProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Tool for OptionExpirationsTool {
    async fn execute(&self, params: Value) -> Result<DataValue> {
        let params: TickerParams = parse_params(params)?;
        let expirations = resolve_ticker(&self.provider, &params.ticker)
            .option_expirations()
            .await?;
        Ok(expirations.into())
    }

    fn name(&self) -> &'static str {
        "get_options"
    }

    fn description(&self) -> &'static str {
        "Get the option expiration dates for a given stock. \
         Returns a list of expiration dates formatted as YYYY-MM-DD."
    }

    fn input_schema(&self) -> Value {
        params_schema(&[TICKER_PARAM])
    }
}

#[derive(Debug, Deserialize)]
struct OptionChainParams {
    ticker: String,
    expiration: String,
}

/// Calls and puts for one expiration
pub struct OptionChainTool {
    provider: ArcFinanceProvider,
}

impl OptionChainTool {
    pub fn new(provider: ArcFinanceProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Tool for OptionChainTool {
    async fn execute(&self, params: Value) -> Result<DataValue> {
        let params: OptionChainParams = parse_params(params)?;
        let chain = resolve_ticker(&self.provider, &params.ticker)
            .option_chain(&params.expiration)
            .await?;

        Ok(DataValue::Map(
            Record::with_capacity(2)
                .with("calls", records_value(chain.calls.to_records()))
                .with("puts", records_value(chain.puts.to_records())),
        ))
    }

    fn name(&self) -> &'static str {
        "get_option_chain"
    }

    fn description(&self) -> &'static str {
        "Get the option chain for a given stock and expiration date. \
         Returns a mapping with 'calls' and 'puts', each a list of contracts."
    }

    fn input_schema(&self) -> Value {
        params_schema(&[
            TICKER_PARAM,
            Param::required(
                "expiration",
                "Expiration date formatted as YYYY-MM-DD (see get_options).",
            ),
        ])
    }
}
