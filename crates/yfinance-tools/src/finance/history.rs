//! Tools for fetching price history and dividend payouts

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use yfinance_data::{ArcFinanceProvider, DataValue, records_value, resolve_ticker};

use super::{DEFAULT_INTERVAL, DEFAULT_PERIOD, TICKER_PARAM, TickerParams};
use crate::error::Result;
use crate::schema::{Param, params_schema};
use crate::tool::{Tool, parse_params};

#[derive(Debug, Deserialize)]
struct HistoryParams {
    ticker: String,
    #[serde(default = "default_period")]
    period: String,
    #[serde(default = "default_interval")]
    interval: String,
}

fn default_period() -> String {
    DEFAULT_PERIOD.to_string()
}

fn default_interval() -> String {
    DEFAULT_INTERVAL.to_string()
}

/// Historical OHLCV rows, one mapping per bar with the date flattened in
pub struct HistoryTool {
    provider: ArcFinanceProvider,
}

impl HistoryTool {
    pub fn new(provider: ArcFinanceProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Tool for HistoryTool {
    async fn execute(&self, params: Value) -> Result<DataValue> {
        let params: HistoryParams = parse_params(params)?;
        let frame = resolve_ticker(&self.provider, &params.ticker)
            .history(&params.period, &params.interval)
            .await?;
        Ok(records_value(frame.reset_index().to_records()))
    }

    fn name(&self) -> &'static str {
        "get_history"
    }

    fn description(&self) -> &'static str {
        "Get historical stock price data. \
         Returns OHLCV data as a list of mappings, one per bar."
    }

    fn input_schema(&self) -> Value {
        params_schema(&[
            TICKER_PARAM,
            Param::optional(
                "period",
                "Time period (e.g. '1d', '5d', '1mo', '1y', 'max').",
                DEFAULT_PERIOD,
            ),
            Param::optional(
                "interval",
                "Data interval (e.g. '1m', '5m', '1d', '1wk').",
                DEFAULT_INTERVAL,
            ),
        ])
    }
}

/// Dividend payout history: one mapping per payment with date and amount
pub struct DividendsTool {
    provider: ArcFinanceProvider,
}

impl DividendsTool {
    pub fn new(provider: ArcFinanceProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Tool for DividendsTool {
    async fn execute(&self, params: Value) -> Result<DataValue> {
        let params: TickerParams = parse_params(params)?;
        let frame = resolve_ticker(&self.provider, &params.ticker)
            .dividends()
            .await?;
        Ok(records_value(frame.reset_index().to_records()))
    }

    fn name(&self) -> &'static str {
        "get_dividends"
    }

    fn description(&self) -> &'static str {
        "Get historical dividend payout data for a given stock. \
         Returns a list of dividend payment dates and amounts."
    }

    fn input_schema(&self) -> Value {
        params_schema(&[TICKER_PARAM])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::stub::StubProvider;
    use serde_json::json;
    use std::sync::Arc;
    use yfinance_data::Frame;

    fn aapl_history() -> Frame {
        Frame::new(["Open", "Close"])
            .with_index_name("Date")
            .with_row("2024-01-02", vec![187.15.into(), 185.64.into()])
            .with_row("2024-01-03", vec![184.22.into(), 184.25.into()])
    }

    #[tokio::test]
    async fn test_history_rows_keep_columns_and_order() {
        let stub = Arc::new(StubProvider {
            history: aapl_history(),
            ..StubProvider::default()
        });
        let tool = HistoryTool::new(stub.clone());

        let result = tool
            .execute(json!({"ticker": "AAPL", "period": "5d", "interval": "1d"}))
            .await
            .unwrap();

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!([
                {"Date": "2024-01-02", "Open": 187.15, "Close": 185.64},
                {"Date": "2024-01-03", "Open": 184.22, "Close": 184.25},
            ])
        );
        let rows = result.as_list().unwrap();
        assert_eq!(rows.len(), 2);
        for row in rows {
            assert_eq!(
                row.as_map().unwrap().keys().collect::<Vec<_>>(),
                vec!["Date", "Open", "Close"]
            );
        }
        assert_eq!(stub.calls(), vec![vec!["history", "AAPL", "5d", "1d"]]);
    }

    #[tokio::test]
    async fn test_history_defaults_period_and_interval() {
        let stub = Arc::new(StubProvider::default());
        let tool = HistoryTool::new(stub.clone());

        let result = tool.execute(json!({"ticker": "MSFT"})).await.unwrap();

        assert_eq!(result, DataValue::List(vec![]));
        assert_eq!(stub.calls(), vec![vec!["history", "MSFT", "1mo", "1d"]]);
    }

    #[tokio::test]
    async fn test_history_forwards_parameters_verbatim() {
        let stub = Arc::new(StubProvider::default());
        let tool = HistoryTool::new(stub.clone());

        tool.execute(json!({"ticker": "btc-usd", "period": "not-a-period", "interval": "1h"}))
            .await
            .unwrap();

        assert_eq!(
            stub.calls(),
            vec![vec!["history", "btc-usd", "not-a-period", "1h"]]
        );
    }

    #[tokio::test]
    async fn test_dividends_rows() {
        let stub = Arc::new(StubProvider {
            dividends: Frame::new(["Dividends"])
                .with_index_name("Date")
                .with_row("2024-08-12T00:00:00+00:00", vec![0.25.into()])
                .with_row("2024-11-08T00:00:00+00:00", vec![0.25.into()])
                .with_row("2025-02-10T00:00:00+00:00", vec![0.25.into()]),
            ..StubProvider::default()
        });
        let tool = DividendsTool::new(stub.clone());

        let result = tool.execute(json!({"ticker": "AAPL"})).await.unwrap();
        let rows = result.as_list().unwrap();

        assert_eq!(rows.len(), 3);
        let first = rows[0].as_map().unwrap();
        assert_eq!(first.keys().collect::<Vec<_>>(), vec!["Date", "Dividends"]);
        assert_eq!(first.get("Date"), Some(&DataValue::from("2024-08-12T00:00:00+00:00")));
        assert_eq!(
            rows[2].as_map().unwrap().get("Date"),
            Some(&DataValue::from("2025-02-10T00:00:00+00:00"))
        );
    }

    #[test]
    fn test_history_schema_defaults() {
        let tool = HistoryTool::new(Arc::new(StubProvider::default()));
        let schema = tool.input_schema();

        assert_eq!(schema["required"], json!(["ticker"]));
        assert_eq!(schema["properties"]["period"]["default"], "1mo");
        assert_eq!(schema["properties"]["interval"]["default"], "1d");
    }
}
