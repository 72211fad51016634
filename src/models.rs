/// Data models for Twelve Data API payloads.
///
/// All models use serde for JSON serialization/deserialization. Prices that the
/// provider string-encodes are [`MarketDecimal`]; fundamentals figures are
/// `Option<f64>` so that `null` stays distinct from `0`.
use serde::{Deserialize, Deserializer, Serialize};

use crate::classify::ErrorMeta;
use crate::decimal::MarketDecimal;

/// Deserialize a value that may be a JSON number or a string containing a number.
fn deserialize_optional_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        Some(serde_json::Value::Number(n)) => Ok(n.as_f64()),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(serde_json::Value::String(s)) => {
            s.trim().parse().map(Some).map_err(serde::de::Error::custom)
        }
        Some(serde_json::Value::Null) | None => Ok(None),
        Some(v) => Err(serde::de::Error::custom(format!(
            "expected a number, got {v}"
        ))),
    }
}

/// Deserialize an integer that may arrive as a number or a numeric string.
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_optional_f64(deserializer)?.map(|v| v as i64))
}

// ---------------------------------------------------------------------------
// Call envelope
// ---------------------------------------------------------------------------

/// Metadata echoed back by symbol-scoped endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolMeta {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default)]
    pub mic_code: Option<String>,
    #[serde(default)]
    pub exchange_timezone: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
}

// ---------------------------------------------------------------------------
// Reference data
// ---------------------------------------------------------------------------

/// `{"data": [...], "status": "ok"}` wrapper used by the catalogue endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentList<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub status: Option<String>,
}

impl<T> InstrumentList<T> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Entry of `/stocks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub exchange: String,
    #[serde(default)]
    pub mic_code: String,
    #[serde(default)]
    pub country: String,
    #[serde(rename = "type", default)]
    pub instrument_type: String,
    #[serde(default)]
    pub figi_code: Option<String>,
}

/// Entry of `/etf`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Etf {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub exchange: String,
    #[serde(default)]
    pub mic_code: String,
    #[serde(default)]
    pub country: String,
}

/// Entry of `/indices`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default)]
    pub mic_code: Option<String>,
}

/// Entry of `/forex_pairs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForexPair {
    pub symbol: String,
    #[serde(default)]
    pub currency_group: String,
    #[serde(default)]
    pub currency_base: String,
    #[serde(default)]
    pub currency_quote: String,
}

/// Entry of `/cryptocurrencies`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cryptocurrency {
    pub symbol: String,
    #[serde(default)]
    pub available_exchanges: Vec<String>,
    #[serde(default)]
    pub currency_base: String,
    #[serde(default)]
    pub currency_quote: String,
}

/// Entry of `/exchanges`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// Filters shared by `/etf` and `/indices`.
#[derive(Debug, Clone, Default)]
pub struct InstrumentFilter {
    pub symbol: Option<String>,
    pub exchange: Option<String>,
    pub mic_code: Option<String>,
    pub country: Option<String>,
}

/// Filters for `/stocks`.
#[derive(Debug, Clone, Default)]
pub struct StocksFilter {
    pub symbol: Option<String>,
    pub exchange: Option<String>,
    pub mic_code: Option<String>,
    pub country: Option<String>,
    /// e.g. "Common Stock", "Preferred Stock".
    pub instrument_type: Option<String>,
}

// ---------------------------------------------------------------------------
// Prices
// ---------------------------------------------------------------------------

/// Request parameters for `/time_series`.
#[derive(Debug, Clone)]
pub struct TimeSeriesRequest {
    pub symbol: String,
    /// e.g. "1min", "1h", "1day".
    pub interval: String,
    pub outputsize: Option<u32>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub timezone: Option<String>,
}

impl TimeSeriesRequest {
    pub fn new(symbol: impl Into<String>, interval: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            interval: interval.into(),
            outputsize: None,
            start_date: None,
            end_date: None,
            timezone: None,
        }
    }

    pub fn outputsize(mut self, outputsize: u32) -> Self {
        self.outputsize = Some(outputsize);
        self
    }
}

/// `meta` block of `/time_series`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesMeta {
    pub symbol: String,
    pub interval: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub currency_base: Option<String>,
    #[serde(default)]
    pub currency_quote: Option<String>,
    #[serde(default)]
    pub exchange_timezone: Option<String>,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default)]
    pub mic_code: Option<String>,
    #[serde(rename = "type", default)]
    pub instrument_type: Option<String>,
}

/// One OHLCV bar. Forex and some indices carry no volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub datetime: String,
    pub open: MarketDecimal,
    pub high: MarketDecimal,
    pub low: MarketDecimal,
    pub close: MarketDecimal,
    #[serde(default)]
    pub volume: Option<MarketDecimal>,
}

/// Response of `/time_series`. `values` is newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub meta: TimeSeriesMeta,
    #[serde(default)]
    pub values: Vec<Bar>,
    #[serde(default)]
    pub status: Option<String>,
}

/// `fifty_two_week` block of a quote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FiftyTwoWeek {
    #[serde(default)]
    pub low: Option<MarketDecimal>,
    #[serde(default)]
    pub high: Option<MarketDecimal>,
    #[serde(default)]
    pub low_change: Option<MarketDecimal>,
    #[serde(default)]
    pub high_change: Option<MarketDecimal>,
    #[serde(default)]
    pub low_change_percent: Option<MarketDecimal>,
    #[serde(default)]
    pub high_change_percent: Option<MarketDecimal>,
    #[serde(default)]
    pub range: Option<String>,
}

/// Response of `/quote` for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default)]
    pub mic_code: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub datetime: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub last_quote_at: Option<i64>,
    #[serde(default)]
    pub open: Option<MarketDecimal>,
    #[serde(default)]
    pub high: Option<MarketDecimal>,
    #[serde(default)]
    pub low: Option<MarketDecimal>,
    #[serde(default)]
    pub close: Option<MarketDecimal>,
    #[serde(default)]
    pub volume: Option<MarketDecimal>,
    #[serde(default)]
    pub previous_close: Option<MarketDecimal>,
    #[serde(default)]
    pub change: Option<MarketDecimal>,
    #[serde(default)]
    pub percent_change: Option<MarketDecimal>,
    #[serde(default)]
    pub average_volume: Option<MarketDecimal>,
    #[serde(default)]
    pub is_market_open: Option<bool>,
    #[serde(default)]
    pub fifty_two_week: Option<FiftyTwoWeek>,
}

/// A per-symbol failure carried inside a multi-symbol quote response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteError {
    /// Key under which the provider reported the failure.
    pub symbol: String,
    pub code: i64,
    pub message: String,
    pub status: String,
    pub meta: Option<ErrorMeta>,
}

/// Outcome of `/quote`: successes and per-symbol failures side by side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteResult {
    pub quotes: Vec<Quote>,
    pub errors: Vec<QuoteError>,
}

impl QuoteResult {
    /// Look up a successful quote by symbol.
    pub fn quote(&self, symbol: &str) -> Option<&Quote> {
        self.quotes.iter().find(|q| q.symbol == symbol)
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty() && self.errors.is_empty()
    }
}

/// Response of `/price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub price: MarketDecimal,
}

/// Response of `/exchange_rate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub symbol: String,
    pub rate: MarketDecimal,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

// ---------------------------------------------------------------------------
// Market overview
// ---------------------------------------------------------------------------

/// Entry of `/market_movers/{market}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketMover {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default)]
    pub mic_code: Option<String>,
    #[serde(default)]
    pub datetime: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub last: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub high: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub low: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub volume: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub change: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub percent_change: Option<f64>,
}

/// Response of `/market_movers/{market}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketMovers {
    #[serde(default)]
    pub values: Vec<MarketMover>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Market segment accepted by `/market_movers/{market}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoversMarket {
    Stocks,
    Etf,
    MutualFunds,
    Forex,
    Crypto,
}

impl MoversMarket {
    pub fn as_path(&self) -> &'static str {
        match self {
            MoversMarket::Stocks => "stocks",
            MoversMarket::Etf => "etf",
            MoversMarket::MutualFunds => "mutual_funds",
            MoversMarket::Forex => "forex",
            MoversMarket::Crypto => "crypto",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoversDirection {
    Gainers,
    Losers,
}

impl MoversDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoversDirection::Gainers => "gainers",
            MoversDirection::Losers => "losers",
        }
    }
}

/// Entry of `/market_state`; the endpoint returns a bare array of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketState {
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    pub is_market_open: bool,
    #[serde(default)]
    pub time_after_open: Option<String>,
    #[serde(default)]
    pub time_to_open: Option<String>,
    #[serde(default)]
    pub time_to_close: Option<String>,
}

/// Response of `/api_usage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub timestamp: Option<String>,
    pub current_usage: i64,
    pub plan_limit: i64,
    #[serde(default)]
    pub daily_usage: Option<i64>,
    #[serde(default)]
    pub plan_daily_limit: Option<i64>,
    #[serde(default)]
    pub plan_category: Option<String>,
}

// ---------------------------------------------------------------------------
// Company data
// ---------------------------------------------------------------------------

/// Response of `/profile`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default)]
    pub mic_code: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub employees: Option<i64>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub instrument_type: Option<String>,
    #[serde(rename = "CEO", default)]
    pub ceo: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dividend {
    pub ex_date: String,
    pub amount: f64,
}

/// Response of `/dividends`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dividends {
    pub meta: SymbolMeta,
    #[serde(default)]
    pub dividends: Vec<Dividend>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsEntry {
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub eps_estimate: Option<f64>,
    #[serde(default)]
    pub eps_actual: Option<f64>,
    #[serde(default)]
    pub difference: Option<f64>,
    #[serde(default)]
    pub surprise_prc: Option<f64>,
}

/// Response of `/earnings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Earnings {
    pub meta: SymbolMeta,
    #[serde(default)]
    pub earnings: Vec<EarningsEntry>,
    #[serde(default)]
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuationsMetrics {
    #[serde(default)]
    pub market_capitalization: Option<f64>,
    #[serde(default)]
    pub enterprise_value: Option<f64>,
    #[serde(default)]
    pub trailing_pe: Option<f64>,
    #[serde(default)]
    pub forward_pe: Option<f64>,
    #[serde(default)]
    pub peg_ratio: Option<f64>,
    #[serde(default)]
    pub price_to_sales_ttm: Option<f64>,
    #[serde(default)]
    pub price_to_book_mrq: Option<f64>,
    #[serde(default)]
    pub enterprise_to_revenue: Option<f64>,
    #[serde(default)]
    pub enterprise_to_ebitda: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatementStats {
    #[serde(default)]
    pub revenue_ttm: Option<f64>,
    #[serde(default)]
    pub revenue_per_share_ttm: Option<f64>,
    #[serde(default)]
    pub quarterly_revenue_growth: Option<f64>,
    #[serde(default)]
    pub gross_profit_ttm: Option<f64>,
    #[serde(default)]
    pub ebitda: Option<f64>,
    #[serde(default)]
    pub net_income_to_common_ttm: Option<f64>,
    #[serde(default)]
    pub diluted_eps_ttm: Option<f64>,
    #[serde(default)]
    pub quarterly_earnings_growth_yoy: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetStats {
    #[serde(default)]
    pub total_cash_mrq: Option<f64>,
    #[serde(default)]
    pub total_cash_per_share_mrq: Option<f64>,
    #[serde(default)]
    pub total_debt_mrq: Option<f64>,
    #[serde(default)]
    pub total_debt_to_equity_mrq: Option<f64>,
    #[serde(default)]
    pub current_ratio_mrq: Option<f64>,
    #[serde(default)]
    pub book_value_per_share_mrq: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashFlowStats {
    #[serde(default)]
    pub operating_cash_flow_ttm: Option<f64>,
    #[serde(default)]
    pub levered_free_cash_flow_ttm: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Financials {
    #[serde(default)]
    pub fiscal_year_ends: Option<String>,
    #[serde(default)]
    pub most_recent_quarter: Option<String>,
    #[serde(default)]
    pub gross_margin: Option<f64>,
    #[serde(default)]
    pub profit_margin: Option<f64>,
    #[serde(default)]
    pub operating_margin: Option<f64>,
    #[serde(default)]
    pub return_on_assets_ttm: Option<f64>,
    #[serde(default)]
    pub return_on_equity_ttm: Option<f64>,
    #[serde(default)]
    pub income_statement: IncomeStatementStats,
    #[serde(default)]
    pub balance_sheet: BalanceSheetStats,
    #[serde(default)]
    pub cash_flow: CashFlowStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockStatistics {
    #[serde(default)]
    pub shares_outstanding: Option<f64>,
    #[serde(default)]
    pub float_shares: Option<f64>,
    #[serde(default)]
    pub avg_10_volume: Option<f64>,
    #[serde(default)]
    pub avg_90_volume: Option<f64>,
    #[serde(default)]
    pub shares_short: Option<f64>,
    #[serde(default)]
    pub short_ratio: Option<f64>,
    #[serde(default)]
    pub short_percent_of_shares_outstanding: Option<f64>,
    #[serde(default)]
    pub percent_held_by_insiders: Option<f64>,
    #[serde(default)]
    pub percent_held_by_institutions: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockPriceSummary {
    #[serde(default)]
    pub fifty_two_week_low: Option<f64>,
    #[serde(default)]
    pub fifty_two_week_high: Option<f64>,
    #[serde(default)]
    pub fifty_two_week_change: Option<f64>,
    #[serde(default)]
    pub beta: Option<f64>,
    #[serde(default)]
    pub day_50_ma: Option<f64>,
    #[serde(default)]
    pub day_200_ma: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DividendsAndSplits {
    #[serde(default)]
    pub forward_annual_dividend_rate: Option<f64>,
    #[serde(default)]
    pub forward_annual_dividend_yield: Option<f64>,
    #[serde(default)]
    pub trailing_annual_dividend_rate: Option<f64>,
    #[serde(default)]
    pub trailing_annual_dividend_yield: Option<f64>,
    #[serde(rename = "5_year_average_dividend_yield", default)]
    pub five_year_average_dividend_yield: Option<f64>,
    #[serde(default)]
    pub payout_ratio: Option<f64>,
    #[serde(default)]
    pub dividend_date: Option<String>,
    #[serde(default)]
    pub ex_dividend_date: Option<String>,
    #[serde(default)]
    pub last_split_factor: Option<String>,
    #[serde(default)]
    pub last_split_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsBody {
    #[serde(default)]
    pub valuations_metrics: ValuationsMetrics,
    #[serde(default)]
    pub financials: Financials,
    #[serde(default)]
    pub stock_statistics: StockStatistics,
    #[serde(default)]
    pub stock_price_summary: StockPriceSummary,
    #[serde(default)]
    pub dividends_and_splits: DividendsAndSplits,
}

/// Response of `/statistics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub meta: SymbolMeta,
    pub statistics: StatisticsBody,
}

// ---------------------------------------------------------------------------
// Financial statements
// ---------------------------------------------------------------------------

/// Reporting period for the financial statement endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementPeriod {
    Annual,
    Quarterly,
}

impl StatementPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatementPeriod::Annual => "annual",
            StatementPeriod::Quarterly => "quarterly",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentAssets {
    #[serde(default)]
    pub cash: Option<f64>,
    #[serde(default)]
    pub cash_equivalents: Option<f64>,
    #[serde(default)]
    pub cash_and_cash_equivalents: Option<f64>,
    #[serde(default)]
    pub other_short_term_investments: Option<f64>,
    #[serde(default)]
    pub accounts_receivable: Option<f64>,
    #[serde(default)]
    pub other_receivables: Option<f64>,
    #[serde(default)]
    pub inventory: Option<f64>,
    #[serde(default)]
    pub prepaid_assets: Option<f64>,
    #[serde(default)]
    pub other_current_assets: Option<f64>,
    #[serde(default)]
    pub total_current_assets: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NonCurrentAssets {
    #[serde(default)]
    pub properties: Option<f64>,
    #[serde(default)]
    pub land_and_improvements: Option<f64>,
    #[serde(default)]
    pub machinery_furniture_equipment: Option<f64>,
    #[serde(default)]
    pub accumulated_depreciation: Option<f64>,
    #[serde(default)]
    pub intangible_assets: Option<f64>,
    #[serde(default)]
    pub goodwill: Option<f64>,
    #[serde(default)]
    pub investments_and_advances: Option<f64>,
    #[serde(default)]
    pub other_non_current_assets: Option<f64>,
    #[serde(default)]
    pub total_non_current_assets: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assets {
    #[serde(default)]
    pub current_assets: CurrentAssets,
    #[serde(default)]
    pub non_current_assets: NonCurrentAssets,
    #[serde(default)]
    pub total_assets: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentLiabilities {
    #[serde(default)]
    pub accounts_payable: Option<f64>,
    #[serde(default)]
    pub accrued_expenses: Option<f64>,
    #[serde(default)]
    pub short_term_debt: Option<f64>,
    #[serde(default)]
    pub deferred_revenue: Option<f64>,
    #[serde(default)]
    pub tax_payable: Option<f64>,
    #[serde(default)]
    pub other_current_liabilities: Option<f64>,
    #[serde(default)]
    pub total_current_liabilities: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NonCurrentLiabilities {
    #[serde(default)]
    pub long_term_debt: Option<f64>,
    #[serde(default)]
    pub provision_for_risks_and_charges: Option<f64>,
    #[serde(default)]
    pub deferred_liabilities: Option<f64>,
    #[serde(default)]
    pub other_non_current_liabilities: Option<f64>,
    #[serde(default)]
    pub total_non_current_liabilities: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Liabilities {
    #[serde(default)]
    pub current_liabilities: CurrentLiabilities,
    #[serde(default)]
    pub non_current_liabilities: NonCurrentLiabilities,
    #[serde(default)]
    pub total_liabilities: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShareholdersEquity {
    #[serde(default)]
    pub common_stock: Option<f64>,
    #[serde(default)]
    pub retained_earnings: Option<f64>,
    #[serde(default)]
    pub other_shareholders_equity: Option<f64>,
    #[serde(default)]
    pub total_shareholders_equity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetEntry {
    pub fiscal_date: String,
    #[serde(default)]
    pub assets: Assets,
    #[serde(default)]
    pub liabilities: Liabilities,
    #[serde(default)]
    pub shareholders_equity: ShareholdersEquity,
}

/// Response of `/balance_sheet`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    pub meta: SymbolMeta,
    #[serde(default)]
    pub balance_sheet: Vec<BalanceSheetEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperatingExpense {
    #[serde(default)]
    pub research_and_development: Option<f64>,
    #[serde(default)]
    pub selling_general_and_administrative: Option<f64>,
    #[serde(default)]
    pub other_operating_expenses: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NonOperatingInterest {
    #[serde(default)]
    pub income: Option<f64>,
    #[serde(default)]
    pub expense: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatementEntry {
    pub fiscal_date: String,
    #[serde(default)]
    pub quarter: Option<i64>,
    #[serde(default)]
    pub sales: Option<f64>,
    #[serde(default)]
    pub cost_of_goods: Option<f64>,
    #[serde(default)]
    pub gross_profit: Option<f64>,
    #[serde(default)]
    pub operating_expense: OperatingExpense,
    #[serde(default)]
    pub operating_income: Option<f64>,
    #[serde(default)]
    pub non_operating_interest: NonOperatingInterest,
    #[serde(default)]
    pub other_income_expense: Option<f64>,
    #[serde(default)]
    pub pretax_income: Option<f64>,
    #[serde(default)]
    pub income_tax: Option<f64>,
    #[serde(default)]
    pub net_income: Option<f64>,
    #[serde(default)]
    pub eps_basic: Option<f64>,
    #[serde(default)]
    pub eps_diluted: Option<f64>,
    #[serde(default)]
    pub basic_shares_outstanding: Option<f64>,
    #[serde(default)]
    pub diluted_shares_outstanding: Option<f64>,
    #[serde(default)]
    pub ebitda: Option<f64>,
}

/// Response of `/income_statement`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatement {
    pub meta: SymbolMeta,
    #[serde(default)]
    pub income_statement: Vec<IncomeStatementEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperatingActivities {
    #[serde(default)]
    pub net_income: Option<f64>,
    #[serde(default)]
    pub depreciation: Option<f64>,
    #[serde(default)]
    pub deferred_taxes: Option<f64>,
    #[serde(default)]
    pub stock_based_compensation: Option<f64>,
    #[serde(default)]
    pub other_non_cash_items: Option<f64>,
    #[serde(default)]
    pub accounts_receivable: Option<f64>,
    #[serde(default)]
    pub accounts_payable: Option<f64>,
    #[serde(default)]
    pub other_assets_liabilities: Option<f64>,
    #[serde(default)]
    pub operating_cash_flow: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvestingActivities {
    #[serde(default)]
    pub capital_expenditures: Option<f64>,
    #[serde(default)]
    pub net_intangibles: Option<f64>,
    #[serde(default)]
    pub net_acquisitions: Option<f64>,
    #[serde(default)]
    pub purchase_of_investments: Option<f64>,
    #[serde(default)]
    pub sale_of_investments: Option<f64>,
    #[serde(default)]
    pub other_investing_activity: Option<f64>,
    #[serde(default)]
    pub investing_cash_flow: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancingActivities {
    #[serde(default)]
    pub long_term_debt_issuance: Option<f64>,
    #[serde(default)]
    pub long_term_debt_payments: Option<f64>,
    #[serde(default)]
    pub short_term_debt_issuance: Option<f64>,
    #[serde(default)]
    pub common_stock_issuance: Option<f64>,
    #[serde(default)]
    pub common_stock_repurchase: Option<f64>,
    #[serde(default)]
    pub dividends_paid: Option<f64>,
    #[serde(default)]
    pub other_financing_charges: Option<f64>,
    #[serde(default)]
    pub financing_cash_flow: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowEntry {
    pub fiscal_date: String,
    #[serde(default)]
    pub quarter: Option<i64>,
    #[serde(default)]
    pub operating_activities: OperatingActivities,
    #[serde(default)]
    pub investing_activities: InvestingActivities,
    #[serde(default)]
    pub financing_activities: FinancingActivities,
    #[serde(default)]
    pub end_cash_position: Option<f64>,
    #[serde(default)]
    pub income_tax_paid: Option<f64>,
    #[serde(default)]
    pub interest_paid: Option<f64>,
    #[serde(default)]
    pub free_cash_flow: Option<f64>,
}

/// Response of `/cash_flow`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    pub meta: SymbolMeta,
    #[serde(default)]
    pub cash_flow: Vec<CashFlowEntry>,
}

// ---------------------------------------------------------------------------
// WebSocket Messages
// ---------------------------------------------------------------------------

/// A price tick from the streaming endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEvent {
    #[serde(rename = "event")]
    pub event_type: String,
    pub symbol: String,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(rename = "type", default)]
    pub instrument_type: Option<String>,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    pub price: f64,
    #[serde(default)]
    pub day_volume: Option<i64>,
}
