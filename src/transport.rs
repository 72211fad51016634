/// HTTP transport boundary.
///
/// A [`Transport`] issues one GET and hands back the raw body, the status code
/// and the credit counters. It does not look inside the body.
use std::future::Future;
use std::pin::Pin;

use log::{debug, warn};
use reqwest::Client;
use url::Url;

use crate::config::Config;
use crate::credits::Credits;
use crate::errors::TwelveDataError;

/// Raw response handed from the transport to the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub credits: Credits,
}

impl HttpResponse {
    pub fn ok(body: impl Into<Vec<u8>>, credits: Credits) -> Self {
        Self {
            status: 200,
            body: body.into(),
            credits,
        }
    }
}

/// A failed round trip. `credits` is nonzero only when the response headers
/// arrived before the failure (e.g. the body stream broke).
#[derive(Debug, Clone, PartialEq)]
pub struct TransportError {
    pub error: TwelveDataError,
    pub credits: Credits,
}

impl From<TwelveDataError> for TransportError {
    fn from(error: TwelveDataError) -> Self {
        Self {
            error,
            credits: Credits::ZERO,
        }
    }
}

/// Boxed future returned by [`Transport::get`].
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + Send + 'a>>;

/// Transport contract consumed by [`crate::api::TwelveDataApi`].
pub trait Transport: Send + Sync {
    fn get<'a>(&'a self, url: &'a Url) -> TransportFuture<'a>;
}

/// Production transport backed by reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a client with the request and dial timeouts from `config`.
    pub fn new(config: &Config) -> Result<Self, TwelveDataError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.dial_timeout)
            .user_agent(concat!("twelvedata-sdk/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an already configured reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn send(&self, url: &Url) -> Result<HttpResponse, SendFailure> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| SendFailure {
                source,
                credits: Credits::ZERO,
            })?;
        let status = response.status().as_u16();
        let credits = Credits::from_headers(response.headers());
        let body = response
            .bytes()
            .await
            .map_err(|source| SendFailure { source, credits })?
            .to_vec();
        Ok(HttpResponse {
            status,
            body,
            credits,
        })
    }
}

impl Transport for ReqwestTransport {
    fn get<'a>(&'a self, url: &'a Url) -> TransportFuture<'a> {
        Box::pin(async move {
            let retry_on = |failure: &SendFailure| is_dial_timeout(&failure.source);
            let response = retry_once_on(|| self.send(url), retry_on)
                .await
                .map_err(|failure| {
                    debug!(
                        "transport.get path={} failed credits_left={} credits_used={}",
                        url.path(),
                        failure.credits.left,
                        failure.credits.used
                    );
                    TransportError {
                        error: TwelveDataError::from(failure.source),
                        credits: failure.credits,
                    }
                })?;
            debug!(
                "transport.get path={} status={} body_len={} credits_left={} credits_used={}",
                url.path(),
                response.status,
                response.body.len(),
                response.credits.left,
                response.credits.used
            );
            Ok(response)
        })
    }
}

/// A reqwest failure plus whatever credits its response headers carried.
#[derive(Debug)]
struct SendFailure {
    source: reqwest::Error,
    credits: Credits,
}

fn is_dial_timeout(err: &reqwest::Error) -> bool {
    err.is_connect() && err.is_timeout()
}

/// Run `op`, and run it exactly once more if the first failure satisfies
/// `should_retry`. There is no delay between the attempts.
pub async fn retry_once_on<T, E, F, Fut, P>(mut op: F, should_retry: P) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
{
    match op().await {
        Err(err) if should_retry(&err) => {
            warn!("transport.retry reason=dial_timeout");
            op().await
        }
        other => other,
    }
}
