//! Tool for fetching company profile information

use async_trait::async_trait;
use serde_json::Value;
use yfinance_data::{ArcFinanceProvider, DataValue, resolve_ticker};

use super::{TICKER_PARAM, TickerParams};
use crate::error::Result;
use crate::schema::params_schema;
use crate::tool::{Tool, parse_params};

/// Summary of company information: sector, industry, full name, key statistics
pub struct CompanyInfoTool {
    provider: ArcFinanceProvider,
}

impl CompanyInfoTool {
    pub fn new(provider: ArcFinanceProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Tool for CompanyInfoTool {
    async fn execute(&self, params: Value) -> Result<DataValue> {
        let params: TickerParams = parse_params(params)?;
        let info = resolve_ticker(&self.provider, &params.ticker).info().await?;
        Ok(DataValue::Map(info))
    }

    fn name(&self) -> &'static str {
        "get_company_info"
    }

    fn description(&self) -> &'static str {
        "Retrieve a summary of company information for a given ticker. \
         Returns a mapping of key company information including sector, industry, full name, etc."
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
    use yfinance_data::Record;

    #[tokio::test]
    async fn test_returns_provider_mapping_unchanged() {
        let stub = Arc::new(StubProvider {
            info: Record::new()
                .with("longName", "Apple Inc.")
                .with("sector", "Technology")
                .with("fullTimeEmployees", 164_000_i64)
                .with("dividendYield", DataValue::Null),
            ..StubProvider::default()
        });
        let tool = CompanyInfoTool::new(stub.clone());

        let result = tool.execute(json!({"ticker": "AAPL"})).await.unwrap();
        let record = result.as_map().unwrap();

        assert_eq!(
            record.keys().collect::<Vec<_>>(),
            vec!["longName", "sector", "fullTimeEmployees", "dividendYield"]
        );
        assert_eq!(record, &stub.info);
        assert_eq!(stub.calls(), vec![vec!["info", "AAPL"]]);
    }

    #[test]
    fn test_tool_metadata() {
        let tool = CompanyInfoTool::new(Arc::new(StubProvider::default()));

        assert_eq!(tool.name(), "get_company_info");
        let schema = tool.input_schema();
        assert_eq!(schema["required"], json!(["ticker"]));
    }
}
