//! Decoder for `/quote` payloads.
//!
//! A single-symbol request yields a bare quote object. A multi-symbol request
//! yields an object keyed by symbol whose values are either quote objects or
//! per-symbol error envelopes. The decoder tries the keyed shape first and
//! falls back to the bare shape; both are ordinary outcomes.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::classify::ErrorEnvelope;
use crate::errors::TwelveDataError;
use crate::models::{Quote, QuoteError, QuoteResult};

/// Key whose presence marks a per-symbol value as an error envelope.
const ERROR_SIGNATURE: &str = "code";

/// Decode a body that has already been classified as a success.
///
/// Multi-symbol output order follows map iteration and carries no meaning.
pub fn decode_quotes(body: &[u8]) -> Result<QuoteResult, TwelveDataError> {
    // Every value must itself be an object; a bare quote has scalar values
    // and therefore fails here.
    match serde_json::from_slice::<HashMap<String, Map<String, Value>>>(body) {
        Ok(by_symbol) => decode_keyed(by_symbol),
        Err(_) => {
            let quote: Quote = serde_json::from_slice(body)?;
            Ok(QuoteResult {
                quotes: vec![quote],
                errors: Vec::new(),
            })
        }
    }
}

fn decode_keyed(
    by_symbol: HashMap<String, Map<String, Value>>,
) -> Result<QuoteResult, TwelveDataError> {
    let mut result = QuoteResult::default();
    for (symbol, fragment) in by_symbol {
        if fragment.contains_key(ERROR_SIGNATURE) {
            let envelope: ErrorEnvelope = serde_json::from_value(Value::Object(fragment))
                .map_err(|e| {
                    TwelveDataError::JsonError(format!("Failed to parse error for {symbol}: {e}"))
                })?;
            result.errors.push(QuoteError {
                symbol,
                code: envelope.code,
                message: envelope.message,
                status: envelope.status,
                meta: envelope.meta,
            });
        } else {
            let quote: Quote = serde_json::from_value(Value::Object(fragment)).map_err(|e| {
                TwelveDataError::JsonError(format!("Failed to parse quote for {symbol}: {e}"))
            })?;
            result.quotes.push(quote);
        }
    }
    Ok(result)
}
