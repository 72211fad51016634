/// Response classification.
///
/// Decides once per call whether a 200 body is a success payload, the bare
/// `[]` "no records" sentinel, a provider error envelope, or garbage.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{ProviderErrorKind, TwelveDataError};

/// Body the provider sends when a lookup matched nothing.
pub const EMPTY_RESULT: &[u8] = b"[]";

/// Message fragments the provider uses for an unknown symbol. Both spellings
/// have been observed in 400 envelopes.
const NOT_FOUND_PHRASES: [&str; 2] = ["**symbol** not found", "symbol not found"];
const PLAN_RESTRICTED_PHRASE: &str = "is not available with your plan";

/// Request metadata echoed back inside an error envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMeta {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub interval: Option<String>,
    #[serde(default)]
    pub exchange: Option<String>,
}

/// The provider's generic error envelope: `{code, message, status}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ErrorMeta>,
}

/// Result of classifying one response body. Exactly one case holds per body.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified<'a> {
    /// Not an error shape; forward the body to the endpoint decoder.
    Success(&'a [u8]),
    /// The body was exactly `[]`.
    NotFound,
    /// An envelope with a nonzero `code`.
    ProviderError(ProviderErrorKind, ErrorEnvelope),
    /// The body is not valid JSON.
    UnmarshalFailure(String),
}

/// Classify a raw response body.
///
/// Any top-level object carrying a nonzero integer `code` is read as an error
/// envelope, so a success payload with its own numeric `code` field would be
/// misread. No endpoint this crate decodes has one.
pub fn classify(body: &[u8]) -> Classified<'_> {
    if body == EMPTY_RESULT {
        return Classified::NotFound;
    }

    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => return Classified::UnmarshalFailure(e.to_string()),
    };

    let code = value.get("code").and_then(Value::as_i64).unwrap_or(0);
    if code == 0 {
        return Classified::Success(body);
    }

    match serde_json::from_value::<ErrorEnvelope>(value) {
        Ok(envelope) => Classified::ProviderError(ProviderErrorKind::from_code(code), envelope),
        // `message`/`status` of an unexpected type; keep the code and move on.
        Err(_) => Classified::ProviderError(
            ProviderErrorKind::from_code(code),
            ErrorEnvelope {
                code,
                ..ErrorEnvelope::default()
            },
        ),
    }
}

/// How a call site treats `BadRequest` envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refinement {
    /// 400 stays a generic invalid response.
    Plain,
    /// 400 is narrowed by message text into not-found / plan-restricted.
    PerSymbol,
}

/// Turn a provider error into the error returned to the caller. Refinement
/// happens here and nowhere downstream.
pub fn refine(
    kind: ProviderErrorKind,
    envelope: ErrorEnvelope,
    refinement: Refinement,
) -> TwelveDataError {
    let ErrorEnvelope { code, message, .. } = envelope;
    if kind == ProviderErrorKind::BadRequest && refinement == Refinement::PerSymbol {
        if NOT_FOUND_PHRASES.iter().any(|p| message.contains(p)) {
            return TwelveDataError::NotFound(message);
        }
        if message.contains(PLAN_RESTRICTED_PHRASE) {
            return TwelveDataError::PlanRestricted(message);
        }
    }
    TwelveDataError::from_provider(kind, code, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn refined(body: &str) -> TwelveDataError {
        match classify(body.as_bytes()) {
            Classified::ProviderError(kind, envelope) => {
                refine(kind, envelope, Refinement::PerSymbol)
            }
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[test]
    fn bare_empty_array_is_not_found() {
        assert_eq!(classify(b"[]"), Classified::NotFound);
    }

    #[test]
    fn empty_array_with_whitespace_is_a_success_array() {
        // Only the exact two-byte literal is the sentinel.
        assert_eq!(classify(b"[ ]"), Classified::Success(b"[ ]"));
    }

    #[test]
    fn empty_data_inside_envelope_is_success() {
        let body = br#"{"data":[],"status":"ok"}"#;
        assert_eq!(classify(body), Classified::Success(body));
    }

    #[test]
    fn invalid_json_is_unmarshal_failure() {
        assert!(matches!(
            classify(b"<html>bad gateway</html>"),
            Classified::UnmarshalFailure(_)
        ));
    }

    #[test]
    fn non_empty_array_is_success() {
        let body = br#"[{"name":"NYSE","is_market_open":true}]"#;
        assert_eq!(classify(body), Classified::Success(body));
    }

    #[test]
    fn zero_code_is_success() {
        let body = br#"{"code":0,"price":"1.0"}"#;
        assert_eq!(classify(body), Classified::Success(body));
    }

    #[test]
    fn rate_limit_ignores_message() {
        for message in ["", "You have run out of API credits", "symbol not found: X"] {
            let body = format!(r#"{{"code":429,"message":"{message}","status":"error"}}"#);
            match classify(body.as_bytes()) {
                Classified::ProviderError(kind, envelope) => {
                    assert_eq!(kind, ProviderErrorKind::TooManyRequests);
                    let err = refine(kind, envelope, Refinement::PerSymbol);
                    assert_eq!(err.kind(), ErrorKind::TooManyRequests);
                    assert!(err.is_expected());
                }
                other => panic!("expected provider error, got {other:?}"),
            }
        }
    }

    #[test]
    fn codes_map_to_provider_kinds() {
        let cases = [
            (400, ProviderErrorKind::BadRequest),
            (403, ProviderErrorKind::Forbidden),
            (404, ProviderErrorKind::NotFoundByCode),
            (500, ProviderErrorKind::InvalidResponse),
        ];
        for (code, expected) in cases {
            let body = format!(r#"{{"code":{code},"message":"m","status":"error"}}"#);
            match classify(body.as_bytes()) {
                Classified::ProviderError(kind, envelope) => {
                    assert_eq!(kind, expected);
                    assert_eq!(envelope.code, code);
                    assert_eq!(envelope.message, "m");
                }
                other => panic!("expected provider error for {code}, got {other:?}"),
            }
        }
    }

    #[test]
    fn both_not_found_phrasings_refine_to_not_found() {
        let bodies = [
            r#"{"code":400,"message":"**symbol** not found: FOO. Please specify it correctly according to API Documentation.","status":"error"}"#,
            r#"{"code":400,"message":"symbol not found: FOO","status":"error"}"#,
        ];
        for body in bodies {
            assert_eq!(refined(body).kind(), ErrorKind::NotFound, "{body}");
        }
    }

    #[test]
    fn plan_phrase_refines_to_plan_restricted() {
        let body = r#"{"code":400,"message":"**symbol** BRK.A is not available with your plan. You may select the appropriate plan at https://twelvedata.com/pricing","status":"error"}"#;
        assert_eq!(refined(body).kind(), ErrorKind::PlanRestricted);
    }

    #[test]
    fn other_bad_request_stays_invalid_response() {
        let err = refined(r#"{"code":400,"message":"**interval** is invalid","status":"error"}"#);
        assert_eq!(
            err,
            TwelveDataError::InvalidResponse {
                code: 400,
                message: "**interval** is invalid".into()
            }
        );
    }

    #[test]
    fn plain_call_sites_do_not_refine() {
        let body = br#"{"code":400,"message":"**symbol** not found: FOO","status":"error"}"#;
        let Classified::ProviderError(kind, envelope) = classify(body) else {
            panic!("expected provider error");
        };
        let err = refine(kind, envelope, Refinement::Plain);
        assert_eq!(err.kind(), ErrorKind::InvalidProviderResponse);
    }

    #[test]
    fn literal_404_is_not_found_everywhere() {
        let body = br#"{"code":404,"message":"Not Found","status":"error"}"#;
        let Classified::ProviderError(kind, envelope) = classify(body) else {
            panic!("expected provider error");
        };
        assert_eq!(refine(kind, envelope, Refinement::Plain).kind(), ErrorKind::NotFound);
    }

    #[test]
    fn envelope_meta_is_kept() {
        let body = br#"{"code":400,"message":"m","status":"error","meta":{"symbol":"FOO","interval":"","exchange":""}}"#;
        let Classified::ProviderError(_, envelope) = classify(body) else {
            panic!("expected provider error");
        };
        assert_eq!(envelope.meta.and_then(|m| m.symbol).as_deref(), Some("FOO"));
    }

    #[test]
    fn classification_is_idempotent() {
        let bodies: [&[u8]; 4] = [
            b"[]",
            br#"{"code":429,"message":"m","status":"error"}"#,
            br#"{"data":[]}"#,
            b"not json",
        ];
        for body in bodies {
            assert_eq!(classify(body), classify(body));
        }
    }
}
