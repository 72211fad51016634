/// REST API client for Twelve Data.
///
/// Typed wrappers for the REST endpoints. Every call goes through the same
/// pipeline: build URL, one transport round trip, status gate, classification,
/// endpoint decoding. The credit counters of the response travel with the
/// result whatever the outcome.
use std::any::type_name;

use log::{debug, error};
use serde::de::DeserializeOwned;
use url::Url;

use crate::classify::{classify, refine, Classified, Refinement};
use crate::config::Config;
use crate::credits::Credits;
use crate::errors::TwelveDataError;
use crate::models::*;
use crate::quote::decode_quotes;
use crate::transport::{ReqwestTransport, Transport};

/// Result of one endpoint call together with the credits it reported.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    /// Zero when no response was obtained.
    pub credits: Credits,
    pub result: Result<T, TwelveDataError>,
}

impl<T> ApiResponse<T> {
    pub fn new(credits: Credits, result: Result<T, TwelveDataError>) -> Self {
        Self { credits, result }
    }

    /// A failure that happened before any response existed.
    pub fn failed(err: TwelveDataError) -> Self {
        Self::new(Credits::ZERO, Err(err))
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Drop the credits and keep the result.
    pub fn into_result(self) -> Result<T, TwelveDataError> {
        self.result
    }

    /// Split into credits and result.
    pub fn into_parts(self) -> (Credits, Result<T, TwelveDataError>) {
        (self.credits, self.result)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse::new(self.credits, self.result.map(f))
    }

    /// Chain a fallible step while keeping the credits.
    pub fn and_then<U>(
        self,
        f: impl FnOnce(T) -> Result<U, TwelveDataError>,
    ) -> ApiResponse<U> {
        ApiResponse::new(self.credits, self.result.and_then(f))
    }
}

/// Low-level REST API client for Twelve Data.
#[derive(Debug, Clone)]
pub struct TwelveDataApi<T = ReqwestTransport> {
    transport: T,
    config: Config,
}

impl TwelveDataApi<ReqwestTransport> {
    /// Create a new API client backed by reqwest.
    pub fn new(config: Config) -> Result<Self, TwelveDataError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self { transport, config })
    }
}

impl<T: Transport> TwelveDataApi<T> {
    /// Create a client over any transport.
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn endpoint_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, TwelveDataError> {
        let mut url = Url::parse(&self.config.api_base)?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                TwelveDataError::ConfigError(format!(
                    "api_base cannot be a base URL: {}",
                    self.config.api_base
                ))
            })?;
            segments.pop_if_empty();
            for segment in path.trim_matches('/').split('/') {
                segments.push(segment);
            }
        }
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in params {
                query.append_pair(key, value);
            }
            query.append_pair("apikey", &self.config.api_key);
        }
        Ok(url)
    }

    /// Fetch and classify. On success the returned body is ready for decoding.
    async fn fetch(
        &self,
        path: &str,
        params: &[(&str, &str)],
        refinement: Refinement,
    ) -> ApiResponse<Vec<u8>> {
        let url = match self.endpoint_url(path, params) {
            Ok(url) => url,
            Err(e) => return ApiResponse::failed(e),
        };

        let response = match self.transport.get(&url).await {
            Ok(response) => response,
            Err(failure) => {
                error!("api.fetch path={} transport_failed error={}", path, failure.error);
                return ApiResponse::new(failure.credits, Err(failure.error));
            }
        };

        if response.status != 200 {
            error!(
                "api.fetch path={} non_success status={}",
                path, response.status
            );
            return ApiResponse::failed(TwelveDataError::UnexpectedStatus(response.status));
        }

        let credits = response.credits;
        let body = response.body;
        let outcome = match classify(&body) {
            Classified::Success(_) => Ok(()),
            Classified::NotFound => Err(TwelveDataError::NotFound(format!(
                "no records returned by {path}"
            ))),
            Classified::UnmarshalFailure(reason) => {
                Err(TwelveDataError::JsonError(format!("Failed to parse response: {reason}")))
            }
            Classified::ProviderError(kind, envelope) => Err(refine(kind, envelope, refinement)),
        };

        match outcome {
            Ok(()) => ApiResponse::new(credits, Ok(body)),
            Err(e) => {
                if e.is_expected() {
                    debug!("api.fetch path={} expected_error={}", path, e);
                } else {
                    error!("api.fetch path={} error={} body={}", path, e, snippet(&body));
                }
                ApiResponse::new(credits, Err(e))
            }
        }
    }

    /// Fetch, classify and decode into `R`.
    async fn get_json<R: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        refinement: Refinement,
    ) -> ApiResponse<R> {
        self.fetch(path, params, refinement)
            .await
            .and_then(|body| decode_json(path, &body))
    }

    // -----------------------------------------------------------------------
    // Reference Data
    // -----------------------------------------------------------------------

    /// GET /stocks - Stock catalogue. An empty `data` list is a success.
    pub async fn get_stocks(&self, filter: &StocksFilter) -> ApiResponse<InstrumentList<Stock>> {
        debug!("api.get_stocks filter={:?}", filter);
        let mut params: Vec<(&str, &str)> = Vec::new();
        push_opt(&mut params, "symbol", filter.symbol.as_deref());
        push_opt(&mut params, "exchange", filter.exchange.as_deref());
        push_opt(&mut params, "mic_code", filter.mic_code.as_deref());
        push_opt(&mut params, "country", filter.country.as_deref());
        push_opt(&mut params, "type", filter.instrument_type.as_deref());
        self.get_json("/stocks", &params, Refinement::Plain).await
    }

    /// GET /etf - ETF catalogue.
    pub async fn get_etfs(&self, filter: &InstrumentFilter) -> ApiResponse<InstrumentList<Etf>> {
        debug!("api.get_etfs filter={:?}", filter);
        let params = filter_params(filter);
        self.get_json("/etf", &params, Refinement::Plain).await
    }

    /// GET /indices - Index catalogue.
    pub async fn get_indices(
        &self,
        filter: &InstrumentFilter,
    ) -> ApiResponse<InstrumentList<Index>> {
        debug!("api.get_indices filter={:?}", filter);
        let params = filter_params(filter);
        self.get_json("/indices", &params, Refinement::Plain).await
    }

    /// GET /forex_pairs - Forex pair catalogue.
    pub async fn get_forex_pairs(
        &self,
        currency_base: Option<&str>,
        currency_quote: Option<&str>,
    ) -> ApiResponse<InstrumentList<ForexPair>> {
        debug!(
            "api.get_forex_pairs currency_base={:?} currency_quote={:?}",
            currency_base, currency_quote
        );
        let mut params: Vec<(&str, &str)> = Vec::new();
        push_opt(&mut params, "currency_base", currency_base);
        push_opt(&mut params, "currency_quote", currency_quote);
        self.get_json("/forex_pairs", &params, Refinement::Plain)
            .await
    }

    /// GET /cryptocurrencies - Crypto pair catalogue.
    pub async fn get_cryptocurrencies(
        &self,
        currency_base: Option<&str>,
        currency_quote: Option<&str>,
    ) -> ApiResponse<InstrumentList<Cryptocurrency>> {
        debug!(
            "api.get_cryptocurrencies currency_base={:?} currency_quote={:?}",
            currency_base, currency_quote
        );
        let mut params: Vec<(&str, &str)> = Vec::new();
        push_opt(&mut params, "currency_base", currency_base);
        push_opt(&mut params, "currency_quote", currency_quote);
        self.get_json("/cryptocurrencies", &params, Refinement::Plain)
            .await
    }

    /// GET /exchanges - Exchange catalogue. `kind` is e.g. "stock" or "etf".
    pub async fn get_exchanges(
        &self,
        kind: Option<&str>,
        country: Option<&str>,
    ) -> ApiResponse<InstrumentList<Exchange>> {
        debug!("api.get_exchanges kind={:?} country={:?}", kind, country);
        let mut params: Vec<(&str, &str)> = Vec::new();
        push_opt(&mut params, "type", kind);
        push_opt(&mut params, "country", country);
        self.get_json("/exchanges", &params, Refinement::Plain).await
    }

    // -----------------------------------------------------------------------
    // Prices
    // -----------------------------------------------------------------------

    /// GET /time_series - OHLCV bars for one symbol.
    pub async fn get_time_series(&self, request: &TimeSeriesRequest) -> ApiResponse<TimeSeries> {
        debug!(
            "api.get_time_series symbol={} interval={} outputsize={:?}",
            request.symbol, request.interval, request.outputsize
        );
        let outputsize = request.outputsize.map(|n| n.to_string());
        let mut params: Vec<(&str, &str)> = vec![
            ("symbol", request.symbol.as_str()),
            ("interval", request.interval.as_str()),
        ];
        push_opt(&mut params, "outputsize", outputsize.as_deref());
        push_opt(&mut params, "start_date", request.start_date.as_deref());
        push_opt(&mut params, "end_date", request.end_date.as_deref());
        push_opt(&mut params, "timezone", request.timezone.as_deref());
        self.get_json("/time_series", &params, Refinement::PerSymbol)
            .await
    }

    /// GET /quote - Latest quote for one or more symbols.
    ///
    /// With several symbols, unknown ones come back inside
    /// [`QuoteResult::errors`] and the call itself succeeds. With one symbol,
    /// an unknown symbol is the call's own [`TwelveDataError::NotFound`].
    pub async fn get_quote(
        &self,
        symbols: &[&str],
        interval: Option<&str>,
    ) -> ApiResponse<QuoteResult> {
        debug!("api.get_quote symbols={:?} interval={:?}", symbols, interval);
        if symbols.is_empty() {
            return ApiResponse::failed(TwelveDataError::Other(
                "get_quote requires at least one symbol".into(),
            ));
        }
        let joined = symbols.join(",");
        let mut params: Vec<(&str, &str)> = vec![("symbol", joined.as_str())];
        push_opt(&mut params, "interval", interval);
        self.fetch("/quote", &params, Refinement::PerSymbol)
            .await
            .and_then(|body| {
                decode_quotes(&body).map_err(|e| {
                    error!("api.get_quote decode_failed error={} body={}", e, snippet(&body));
                    e
                })
            })
    }

    /// GET /price - Latest price only.
    pub async fn get_price(&self, symbol: &str) -> ApiResponse<Price> {
        debug!("api.get_price symbol={}", symbol);
        self.get_json("/price", &[("symbol", symbol)], Refinement::PerSymbol)
            .await
    }

    /// GET /exchange_rate - Real-time rate for a currency pair, e.g. "USD/JPY".
    pub async fn get_exchange_rate(&self, pair: &str) -> ApiResponse<ExchangeRate> {
        debug!("api.get_exchange_rate pair={}", pair);
        self.get_json("/exchange_rate", &[("symbol", pair)], Refinement::PerSymbol)
            .await
    }

    // -----------------------------------------------------------------------
    // Fundamentals
    // -----------------------------------------------------------------------

    /// GET /profile - Company profile.
    pub async fn get_profile(&self, symbol: &str) -> ApiResponse<Profile> {
        debug!("api.get_profile symbol={}", symbol);
        self.get_json("/profile", &[("symbol", symbol)], Refinement::Plain)
            .await
    }

    /// GET /dividends - Dividend history.
    pub async fn get_dividends(&self, symbol: &str) -> ApiResponse<Dividends> {
        debug!("api.get_dividends symbol={}", symbol);
        self.get_json("/dividends", &[("symbol", symbol)], Refinement::Plain)
            .await
    }

    /// GET /statistics - Valuation, financial and trading statistics.
    pub async fn get_statistics(&self, symbol: &str) -> ApiResponse<Statistics> {
        debug!("api.get_statistics symbol={}", symbol);
        self.get_json("/statistics", &[("symbol", symbol)], Refinement::Plain)
            .await
    }

    /// GET /balance_sheet
    pub async fn get_balance_sheet(
        &self,
        symbol: &str,
        period: Option<StatementPeriod>,
    ) -> ApiResponse<BalanceSheet> {
        debug!("api.get_balance_sheet symbol={} period={:?}", symbol, period);
        let params = statement_params(symbol, period);
        self.get_json("/balance_sheet", &params, Refinement::Plain)
            .await
    }

    /// GET /income_statement
    pub async fn get_income_statement(
        &self,
        symbol: &str,
        period: Option<StatementPeriod>,
    ) -> ApiResponse<IncomeStatement> {
        debug!(
            "api.get_income_statement symbol={} period={:?}",
            symbol, period
        );
        let params = statement_params(symbol, period);
        self.get_json("/income_statement", &params, Refinement::Plain)
            .await
    }

    /// GET /cash_flow
    pub async fn get_cash_flow(
        &self,
        symbol: &str,
        period: Option<StatementPeriod>,
    ) -> ApiResponse<CashFlow> {
        debug!("api.get_cash_flow symbol={} period={:?}", symbol, period);
        let params = statement_params(symbol, period);
        self.get_json("/cash_flow", &params, Refinement::Plain)
            .await
    }

    /// GET /earnings - Past and upcoming earnings with EPS estimates.
    pub async fn get_earnings(&self, symbol: &str) -> ApiResponse<Earnings> {
        debug!("api.get_earnings symbol={}", symbol);
        self.get_json("/earnings", &[("symbol", symbol)], Refinement::Plain)
            .await
    }

    // -----------------------------------------------------------------------
    // Market Overview
    // -----------------------------------------------------------------------

    /// GET /market_movers/{market} - Top gainers or losers.
    pub async fn get_market_movers(
        &self,
        market: MoversMarket,
        direction: Option<MoversDirection>,
        outputsize: Option<u32>,
    ) -> ApiResponse<MarketMovers> {
        debug!(
            "api.get_market_movers market={:?} direction={:?} outputsize={:?}",
            market, direction, outputsize
        );
        let path = format!("/market_movers/{}", market.as_path());
        let outputsize = outputsize.map(|n| n.to_string());
        let mut params: Vec<(&str, &str)> = Vec::new();
        push_opt(&mut params, "direction", direction.as_ref().map(|d| d.as_str()));
        push_opt(&mut params, "outputsize", outputsize.as_deref());
        self.get_json(&path, &params, Refinement::Plain).await
    }

    /// GET /market_state - Open/closed state per exchange. `[]` means no
    /// exchange matched and surfaces as [`TwelveDataError::NotFound`].
    pub async fn get_market_state(&self, exchange: Option<&str>) -> ApiResponse<Vec<MarketState>> {
        debug!("api.get_market_state exchange={:?}", exchange);
        let mut params: Vec<(&str, &str)> = Vec::new();
        push_opt(&mut params, "exchange", exchange);
        self.get_json("/market_state", &params, Refinement::Plain)
            .await
    }

    /// GET /api_usage - Credit usage for the current key.
    pub async fn get_api_usage(&self) -> ApiResponse<Usage> {
        debug!("api.get_api_usage");
        self.get_json("/api_usage", &[], Refinement::Plain).await
    }
}

fn decode_json<R: DeserializeOwned>(path: &str, body: &[u8]) -> Result<R, TwelveDataError> {
    let target_type = type_name::<R>();
    match serde_json::from_slice(body) {
        Ok(parsed) => {
            debug!("api.decode ok path={} target_type={}", path, target_type);
            Ok(parsed)
        }
        Err(e) => {
            error!(
                "api.decode failed path={} target_type={} error={} body={}",
                path,
                target_type,
                e,
                snippet(body)
            );
            Err(TwelveDataError::JsonError(format!(
                "Failed to parse {path} response: {e}"
            )))
        }
    }
}

fn snippet(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    text.chars().take(500).collect()
}

fn push_opt<'a>(params: &mut Vec<(&'a str, &'a str)>, key: &'a str, value: Option<&'a str>) {
    if let Some(value) = value {
        params.push((key, value));
    }
}

fn filter_params(filter: &InstrumentFilter) -> Vec<(&str, &str)> {
    let mut params: Vec<(&str, &str)> = Vec::new();
    push_opt(&mut params, "symbol", filter.symbol.as_deref());
    push_opt(&mut params, "exchange", filter.exchange.as_deref());
    push_opt(&mut params, "mic_code", filter.mic_code.as_deref());
    push_opt(&mut params, "country", filter.country.as_deref());
    params
}

fn statement_params(symbol: &str, period: Option<StatementPeriod>) -> Vec<(&str, &str)> {
    let mut params = vec![("symbol", symbol)];
    push_opt(&mut params, "period", period.map(|p| p.as_str()));
    params
}
