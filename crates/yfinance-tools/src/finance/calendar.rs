//! Tool for upcoming corporate events

use async_trait::async_trait;
use serde_json::Value;
use yfinance_data::{ArcFinanceProvider, DataValue, resolve_ticker};

use super::{TICKER_PARAM, TickerParams};
use crate::error::Result;
use crate::schema::params_schema;
use crate::tool::{Tool, parse_params};

pub struct CalendarTool {
    provider: ArcFinanceProvider,
}

impl CalendarTool {
    pub fn new(provider: ArcFinanceProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Tool for CalendarTool {
    async fn execute(&self, params: Value) -> Result<DataValue> {
        let params: TickerParams = parse_params(params)?;
        let calendar = resolve_ticker(&self.provider, &params.ticker)
            .calendar()
            .await?;
        Ok(DataValue::Map(calendar))
    }

    fn name(&self) -> &'static str {
        "get_calendar"
    }

    fn description(&self) -> &'static str {
        "Get upcoming events such as earnings dates and dividend dates for a given stock. \
         Returns a mapping of event names to dates or estimates."
    }

    fn input_schema(&self) -> Value {
        params_schema(&[TICKER_PARAM])
    }
}
