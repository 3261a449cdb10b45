//! Yahoo Finance provider
//!
//! Company profile, statements, earnings, calendar and options are read
//! through `yfinance_rs::YfClient`, which owns the cookie and crumb handshake.
//! Price history and dividends go through the `yahoo_finance_api` chart
//! connector, which accepts the period and interval strings verbatim.

pub mod table;

use async_trait::async_trait;
use tracing::debug;
use yahoo_finance_api as yahoo;
use yfinance_rs as yf;

use crate::config::YahooConfig;
use crate::error::{ProviderError, Result};
use crate::frame::Frame;
use crate::provider::{FinanceProvider, OptionChain};
use crate::value::{DataValue, Record};

use table::{Bar, Contract, StatementPeriod};

/// `Option<Money>` as a float
macro_rules! amount {
    ($money:expr) => {
        $money.as_ref().and_then(|m| table::decimal(m.amount()))
    };
}

/// Yahoo Finance implementation of [`FinanceProvider`]
pub struct YahooProvider {
    client: yf::YfClient,
    connector: yahoo::YahooConnector,
    config: YahooConfig,
}

impl YahooProvider {
    /// Create a provider with the default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(YahooConfig::default())
    }

    /// Create a provider with a custom configuration
    pub fn with_config(config: YahooConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()?;
        let client = yf::YfClient::builder()
            .custom_client(http)
            .user_agent(config.user_agent.as_str())
            .build()?;
        let connector = yahoo::YahooConnector::new()?;

        Ok(Self {
            client,
            connector,
            config,
        })
    }

    pub fn config(&self) -> &YahooConfig {
        &self.config
    }

    /// Chart response for a range at an interval
    async fn chart(&self, symbol: &str, interval: &str, range: &str) -> Result<yahoo::YResponse> {
        debug!("Fetching chart for {} (range={}, interval={})", symbol, range, interval);
        Ok(self.connector.get_quote_range(symbol, interval, range).await?)
    }

    /// Listed expirations as unix timestamps
    async fn expiration_timestamps(&self, symbol: &str) -> Result<Vec<i64>> {
        debug!("Fetching option expirations for {}", symbol);
        yf::ticker::Ticker::new(&self.client, symbol.to_string())
            .options()
            .await
            .map_err(|e| ProviderError::from_client(e, symbol))
    }
}

/// Dividend events of a chart response as `(timestamp, amount)`
fn dividend_events(response: &yahoo::YResponse) -> Result<Vec<(i64, f64)>> {
    Ok(response
        .dividends()?
        .iter()
        .map(|d| (d.date as i64, d.amount))
        .collect())
}

/// Split events of a chart response as `(timestamp, ratio)`
fn split_events(response: &yahoo::YResponse) -> Result<Vec<(i64, f64)>> {
    Ok(response
        .splits()?
        .iter()
        .filter(|s| s.denominator as f64 != 0.0)
        .map(|s| (s.date as i64, s.numerator as f64 / s.denominator as f64))
        .collect())
}

/// Newest period first
fn statement(mut periods: Vec<StatementPeriod>) -> Frame {
    periods.sort_by(|a, b| b.period.cmp(&a.period));
    table::statement_frame(&periods)
}

fn contract(contract: &yf::ticker::OptionContract) -> Contract {
    Contract {
        symbol: contract.instrument.symbol_str().to_string(),
        last_trade: contract.last_trade_at,
        strike: table::decimal(contract.strike.amount()),
        last_price: amount!(contract.price),
        bid: amount!(contract.bid),
        ask: amount!(contract.ask),
        volume: contract.volume.and_then(|v| i64::try_from(v).ok()),
        open_interest: contract.open_interest.and_then(|v| i64::try_from(v).ok()),
        implied_volatility: contract.implied_volatility,
        in_the_money: contract.in_the_money,
    }
}

fn contracts(contracts: &[yf::ticker::OptionContract]) -> Frame {
    let contracts: Vec<Contract> = contracts.iter().map(contract).collect();
    table::contracts_frame(&contracts)
}

/// Insert `value` under `key` unless it is absent
fn put(record: &mut Record, key: &str, value: Option<impl Into<DataValue>>) {
    if let Some(value) = value {
        record.insert(key, value);
    }
}

#[async_trait]
impl FinanceProvider for YahooProvider {
    async fn info(&self, symbol: &str) -> Result<Record> {
        debug!("Fetching profile and quote for {}", symbol);
        let (profile, quotes) = tokio::try_join!(
            async {
                yf::profile::load_profile(&self.client, symbol)
                    .await
                    .map_err(|e| ProviderError::from_client(e, symbol))
            },
            async {
                yf::quote::quotes(&self.client, [symbol.to_string()])
                    .await
                    .map_err(|e| ProviderError::from_client(e, symbol))
            },
        )?;

        let mut info = Record::new().with("symbol", symbol);
        match profile {
            yf::profile::Profile::Company(company) => {
                info.insert("longName", company.name);
                put(&mut info, "sector", company.sector);
                put(&mut info, "industry", company.industry);
                put(&mut info, "website", company.website);
                put(&mut info, "longBusinessSummary", company.summary);
            }
            yf::profile::Profile::Fund(fund) => {
                info.insert("longName", fund.name);
                put(&mut info, "fundFamily", fund.family);
            }
        }

        if let Some(quote) = quotes.into_iter().next() {
            put(&mut info, "shortName", quote.shortname);
            put(&mut info, "currentPrice", amount!(quote.price));
            put(&mut info, "previousClose", amount!(quote.previous_close));
        }
        Ok(info)
    }

    async fn history(&self, symbol: &str, period: &str, interval: &str) -> Result<Frame> {
        let response = self.chart(symbol, interval, period).await?;

        let bars: Vec<Bar> = response
            .quotes()?
            .iter()
            .map(|q| Bar {
                timestamp: q.timestamp as i64,
                open: q.open,
                high: q.high,
                low: q.low,
                close: q.close,
                volume: q.volume,
            })
            .collect();

        let dividends = dividend_events(&response)?;
        let splits = split_events(&response)?;

        Ok(table::history_frame(&bars, &dividends, &splits, interval))
    }

    async fn income_statement(&self, symbol: &str) -> Result<Frame> {
        let rows = yf::fundamentals::FundamentalsBuilder::new(&self.client, symbol.to_string())
            .income_statement(false, None)
            .await
            .map_err(|e| ProviderError::from_client(e, symbol))?;

        Ok(statement(
            rows.iter()
                .map(|row| StatementPeriod {
                    period: row.period.to_string(),
                    items: vec![
                        ("Total Revenue", amount!(row.total_revenue)),
                        ("Gross Profit", amount!(row.gross_profit)),
                        ("Operating Income", amount!(row.operating_income)),
                        ("Net Income", amount!(row.net_income)),
                    ],
                })
                .collect(),
        ))
    }

    async fn balance_sheet(&self, symbol: &str) -> Result<Frame> {
        let rows = yf::fundamentals::FundamentalsBuilder::new(&self.client, symbol.to_string())
            .balance_sheet(false, None)
            .await
            .map_err(|e| ProviderError::from_client(e, symbol))?;

        Ok(statement(
            rows.iter()
                .map(|row| StatementPeriod {
                    period: row.period.to_string(),
                    items: vec![
                        ("Total Assets", amount!(row.total_assets)),
                        ("Total Liabilities", amount!(row.total_liabilities)),
                        ("Stockholders Equity", amount!(row.total_equity)),
                        ("Cash And Cash Equivalents", amount!(row.cash)),
                        ("Long Term Debt", amount!(row.long_term_debt)),
                    ],
                })
                .collect(),
        ))
    }

    async fn cash_flow(&self, symbol: &str) -> Result<Frame> {
        let rows = yf::fundamentals::FundamentalsBuilder::new(&self.client, symbol.to_string())
            .cashflow(false, None)
            .await
            .map_err(|e| ProviderError::from_client(e, symbol))?;

        Ok(statement(
            rows.iter()
                .map(|row| StatementPeriod {
                    period: row.period.to_string(),
                    items: vec![
                        ("Operating Cash Flow", amount!(row.operating_cashflow)),
                        ("Capital Expenditure", amount!(row.capital_expenditures)),
                        ("Free Cash Flow", amount!(row.free_cash_flow)),
                        ("Net Income", amount!(row.net_income)),
                    ],
                })
                .collect(),
        ))
    }

    async fn dividends(&self, symbol: &str) -> Result<Frame> {
        let response = self.chart(symbol, "1d", "max").await?;
        Ok(table::dividends_frame(&dividend_events(&response)?))
    }

    async fn earnings(&self, symbol: &str) -> Result<Frame> {
        let earnings = yf::fundamentals::FundamentalsBuilder::new(&self.client, symbol.to_string())
            .earnings(None)
            .await
            .map_err(|e| ProviderError::from_client(e, symbol))?;

        let years: Vec<_> = earnings
            .yearly
            .iter()
            .map(|year| {
                (
                    i64::from(year.year),
                    amount!(year.revenue),
                    amount!(year.earnings),
                )
            })
            .collect();
        Ok(table::earnings_frame(&years))
    }

    async fn calendar(&self, symbol: &str) -> Result<Record> {
        let calendar = yf::fundamentals::FundamentalsBuilder::new(&self.client, symbol.to_string())
            .calendar()
            .await
            .map_err(|e| ProviderError::from_client(e, symbol))?;

        Ok(table::calendar_record(
            &calendar.earnings_dates,
            calendar.ex_dividend_date,
            calendar.dividend_payment_date,
        ))
    }

    async fn option_expirations(&self, symbol: &str) -> Result<Vec<String>> {
        Ok(self
            .expiration_timestamps(symbol)
            .await?
            .into_iter()
            .map(table::format_date)
            .collect())
    }

    async fn option_chain(&self, symbol: &str, expiration: &str) -> Result<OptionChain> {
        let timestamps = self.expiration_timestamps(symbol).await?;

        let Some(timestamp) = timestamps
            .iter()
            .copied()
            .find(|ts| table::format_date(*ts) == expiration)
        else {
            return Err(ProviderError::ExpirationNotFound {
                expiration: expiration.to_string(),
                available: timestamps.into_iter().map(table::format_date).collect(),
            });
        };

        debug!("Fetching option chain for {} at {}", symbol, expiration);
        let chain = yf::ticker::Ticker::new(&self.client, symbol.to_string())
            .option_chain(Some(timestamp))
            .await
            .map_err(|e| ProviderError::from_client(e, symbol))?;

        Ok(OptionChain {
            calls: contracts(&chain.calls),
            puts: contracts(&chain.puts),
        })
    }
}
