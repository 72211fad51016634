//! API credit accounting.
//!
//! Every response carries two counters: credits left in the current window
//! and credits consumed by this request. They are returned to the caller
//! with each result; nothing here aggregates across calls.

use log::warn;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

pub const CREDITS_LEFT_HEADER: &str = "api-credits-left";
pub const CREDITS_USED_HEADER: &str = "api-credits-used";

/// Credit counters read from one HTTP response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Credits {
    /// Remaining quota.
    pub left: u64,
    /// Consumed by this request, not cumulative.
    pub used: u64,
}

impl Credits {
    pub const ZERO: Self = Self { left: 0, used: 0 };

    pub fn new(left: u64, used: u64) -> Self {
        Self { left, used }
    }

    /// Read both counters from response headers.
    ///
    /// A missing or non-numeric header leaves that side at zero and logs a
    /// warning; it never fails the call.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            left: read_counter(headers, CREDITS_LEFT_HEADER),
            used: read_counter(headers, CREDITS_USED_HEADER),
        }
    }
}

fn read_counter(headers: &HeaderMap, name: &str) -> u64 {
    let Some(value) = headers.get(name) else {
        warn!("credits.header_missing header={}", name);
        return 0;
    };
    match value.to_str().ok().map(str::trim).map(str::parse::<u64>) {
        Some(Ok(count)) => count,
        _ => {
            warn!("credits.header_unparsable header={} value={:?}", name, value);
            0
        }
    }
}
