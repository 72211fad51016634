//! Twelve Data SDK for Rust.
//!
//! A typed client for the Twelve Data market-data API: REST endpoints for
//! reference data, prices and fundamentals, and a WebSocket price stream.
//!
//! # What This SDK Provides
//!
//! - Typed REST API access: [`TwelveDataApi`]
//! - Credit accounting on every call: [`ApiResponse::credits`]
//! - Provider error classification into [`TwelveDataError`] / [`ErrorKind`]
//! - Multi-symbol quotes that keep per-symbol failures: [`QuoteResult`]
//! - Streaming price ticks: [`subscribe_prices`]
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use twelvedata_sdk::{Config, TwelveDataApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), twelvedata_sdk::TwelveDataError> {
//!     let api = TwelveDataApi::new(Config::from_env()?)?;
//!
//!     let response = api.get_quote(&["AAPL", "MSFT"], None).await;
//!     println!("credits left: {}", response.credits.left);
//!
//!     let quotes = response.into_result()?;
//!     for quote in &quotes.quotes {
//!         println!("{}: {:?}", quote.symbol, quote.close);
//!     }
//!     for failure in &quotes.errors {
//!         println!("{} failed: {}", failure.symbol, failure.message);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Streaming Prices
//!
//! ```rust,no_run
//! use futures_util::StreamExt;
//! use twelvedata_sdk::{subscribe_prices, Config, WsConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), twelvedata_sdk::TwelveDataError> {
//!     let config = Config::from_env()?;
//!     let (subscription, mut ticks) =
//!         subscribe_prices(&config, &["AAPL", "EUR/USD"], WsConfig::default()).await?;
//!
//!     while let Some(tick) = ticks.next().await {
//!         println!("{} {} @ {}", tick.symbol, tick.price, tick.timestamp);
//!         if tick.symbol == "AAPL" {
//!             break;
//!         }
//!     }
//!     subscription.close().await
//! }
//! ```
//!
//! # Logging
//!
//! This crate emits logs through the [`log`](https://docs.rs/log/) facade.
//! Per-call traces are `debug`; rate limits and not-found results stay at
//! `debug` because they are part of normal operation; every other provider
//! error is logged at `error` with the response body attached. The API key
//! is never written to a log line.
//!
//! # Errors
//!
//! Endpoint methods return [`ApiResponse`], which carries the credits reported
//! by the provider next to a `Result<T, TwelveDataError>`. Use
//! [`TwelveDataError::kind`] to branch on the coarse taxonomy:
//!
//! - `Transport`: dial failure, timeout, non-200 status or a broken body; credits
//!   are zero except when the body broke after the headers arrived
//! - `Unmarshal`: the body was not the JSON that was expected
//! - `TooManyRequests`, `NotFound`: expected outcomes
//! - `PlanRestricted`, `Forbidden`, `InvalidProviderResponse`: provider refusals
pub mod api;
pub mod classify;
pub mod config;
pub mod credits;
pub mod decimal;
pub mod errors;
pub mod models;
pub mod quote;
pub mod transport;
pub mod websocket;

// Re-export primary types for convenience.
pub use api::{ApiResponse, TwelveDataApi};
pub use classify::{classify, Classified, ErrorEnvelope, ErrorMeta, Refinement};
pub use config::Config;
pub use credits::Credits;
pub use decimal::MarketDecimal;
pub use errors::{ErrorKind, ProviderErrorKind, TwelveDataError};
pub use models::*;
pub use transport::{HttpResponse, ReqwestTransport, Transport, TransportError};
pub use websocket::{subscribe_prices, subscribe_prices_at, PriceStream, PriceSubscription, WsConfig};
