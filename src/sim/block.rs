//! Block records from the chain indexer
//!
//! Numeric fields arrive as strings. They are parsed leniently: garbage never
//! fails a run, it just yields `None` and the generator substitutes a default.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::BlockDataError;

/// One block's metadata, as delivered by the block feed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub gas_used: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub size: String,
    /// Seconds since the Unix epoch
    #[serde(default, deserialize_with = "lenient_text")]
    pub timestamp: String,
    /// Block height, when the feed includes it
    #[serde(default, alias = "blockNumber", skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
}

impl BlockRecord {
    pub fn new(gas_used: impl Into<String>, size: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            gas_used: gas_used.into(),
            size: size.into(),
            timestamp: timestamp.into(),
            number: None,
        }
    }

    pub fn gas_used_value(&self) -> Option<i64> {
        parse_int_lenient(&self.gas_used)
    }

    pub fn size_value(&self) -> Option<i64> {
        parse_int_lenient(&self.size)
    }

    pub fn timestamp_secs(&self) -> Option<i64> {
        parse_int_lenient(&self.timestamp)
    }
}

/// Accept a numeric field as text, a JSON number, or `null`
///
/// Anything that is not a string or number becomes empty text, which the
/// lenient parser later reads as "no value".
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

/// Parse the leading integer of a string, the way browsers read numeric text
///
/// Accepts surrounding whitespace, an optional sign, an optional `0x` prefix
/// (hex), and ignores anything after the digits. Returns `None` when no digit
/// is present. Values beyond `i64` saturate.
pub fn parse_int_lenient(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else { break };
        seen_digit = true;
        value = value.saturating_mul(radix as i64).saturating_add(d as i64);
    }

    if !seen_digit {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Seeded stand-in for a live block feed (newest block first, 1s apart)
pub fn synthetic_feed(seed: u64, count: usize) -> Vec<BlockRecord> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let newest = 1_750_000_000 + rng.random_range(0..1_000_000i64);
    (0..count)
        .map(|i| BlockRecord {
            gas_used: rng.random_range(0..30_000_000u64).to_string(),
            size: rng.random_range(500..2_500u32).to_string(),
            timestamp: (newest - i as i64).to_string(),
            number: Some((5_000_000 - i as i64).to_string()),
        })
        .collect()
}

/// GraphQL-style envelope: `{"data": {"blocks": [...]}, "errors": [...]}`
#[derive(Debug, Deserialize)]
struct FeedEnvelope {
    #[serde(default)]
    data: Option<FeedData>,
    #[serde(default)]
    errors: Vec<FeedError>,
}

#[derive(Debug, Deserialize)]
struct FeedData {
    #[serde(default)]
    blocks: Vec<BlockRecord>,
}

#[derive(Debug, Deserialize)]
struct FeedError {
    message: String,
}

/// Decode a block feed, either a bare JSON array or the indexer envelope
///
/// An envelope with `errors` and no data is an upstream failure; an envelope
/// with `data: null` or no `blocks` decodes to an empty list.
pub fn parse_block_feed(json: &str) -> Result<Vec<BlockRecord>, BlockDataError> {
    let value: Value = serde_json::from_str(json)?;
    if value.is_array() {
        return Ok(serde_json::from_value(value)?);
    }

    // Only objects reach the envelope; arrays never fall through to it
    let envelope: FeedEnvelope = serde_json::from_value(value)?;
    match envelope.data {
        Some(data) => Ok(data.blocks),
        None if !envelope.errors.is_empty() => {
            let messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();
            Err(BlockDataError::Upstream(messages.join("; ")))
        }
        None => Ok(Vec::new()),
    }
}
