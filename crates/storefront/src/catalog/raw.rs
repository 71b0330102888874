//! Wire-format catalog types and field normalization.
//!
//! The catalog service is loose about field encodings: prices and ratings
//! may be JSON numbers or decimal strings, `specs` and `images` may be
//! inline JSON or a JSON-encoded string column, and boolean flags may be
//! 0/1 integers. Everything is normalized here, once, so the rest of the
//! engine never branches on runtime shape.
//!
//! Per-field failures follow the recovery rules of the listing flow:
//! unreadable `specs`/`images` become empty collections, an unreadable
//! `rating` becomes 0.0, and a warning is logged. A product with an
//! unreadable price is a hard parse error - a listing must never show a
//! made-up price.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use gearloft_core::{ProductId, VariationId, money};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::types::{Product, Variation};

/// A product as served by the catalog API.
#[derive(Debug, Deserialize)]
pub(crate) struct RawProduct {
    id: i64,
    name: String,
    category: String,
    #[serde(deserialize_with = "decimal_lenient")]
    base_price: Decimal,
    #[serde(default, deserialize_with = "count_lenient")]
    base_stock: u32,
    #[serde(default, deserialize_with = "rating_lenient")]
    rating: f64,
    #[serde(default, deserialize_with = "string_list_lenient")]
    images: Vec<String>,
    #[serde(default, deserialize_with = "string_map_lenient")]
    specs: BTreeMap<String, String>,
    #[serde(default)]
    description: String,
    #[serde(default, deserialize_with = "flag_lenient")]
    has_variations: bool,
    #[serde(default)]
    variations: Vec<RawVariation>,
    #[serde(default, deserialize_with = "datetime_lenient")]
    created_at: DateTime<Utc>,
}

/// A variation row as served by the catalog API.
#[derive(Debug, Deserialize)]
pub(crate) struct RawVariation {
    id: i64,
    /// The display label column is literally named `variation` upstream.
    #[serde(rename = "variation")]
    label: String,
    #[serde(deserialize_with = "decimal_lenient")]
    price: Decimal,
    #[serde(default, deserialize_with = "count_lenient")]
    stock: u32,
}

impl RawProduct {
    /// Normalize into the typed domain [`Product`].
    pub(crate) fn normalize(self) -> Product {
        Product {
            id: ProductId::new(self.id),
            name: self.name,
            category: self.category,
            base_price: self.base_price,
            base_stock: self.base_stock,
            rating: self.rating,
            images: self.images,
            specs: self.specs,
            description: self.description,
            has_variations: self.has_variations,
            variations: self.variations.into_iter().map(RawVariation::normalize).collect(),
            created_at: self.created_at,
        }
    }
}

impl RawVariation {
    fn normalize(self) -> Variation {
        Variation {
            id: VariationId::new(self.id),
            label: self.label,
            price: self.price,
            stock: self.stock,
        }
    }
}

// =============================================================================
// Lenient deserializers
// =============================================================================

/// Decimal from a JSON number or a decimal string. Anything else fails.
fn decimal_lenient<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match &value {
        // serde_json renders numbers losslessly, so parse via the text form.
        Value::Number(n) => n
            .to_string()
            .parse::<Decimal>()
            .map_err(serde::de::Error::custom),
        Value::String(s) => money::parse_amount(s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid decimal string: {s:?}"))),
        other => Err(serde::de::Error::custom(format!(
            "expected number or string, got {other}"
        ))),
    }
}

/// Rating from a number or string; unreadable values degrade to 0.0.
fn rating_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let rating = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Null => Some(0.0),
        _ => None,
    };
    Ok(rating.unwrap_or_else(|| {
        tracing::warn!(value = %value, "unreadable rating, substituting 0");
        0.0
    }))
}

/// Non-negative count from a number or numeric string; negatives clamp to 0.
fn count_lenient<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let count = match &value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_i64().map(|_| 0))
            .and_then(|c| u32::try_from(c).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        Value::Null => Some(0),
        _ => None,
    };
    count.ok_or_else(|| serde::de::Error::custom(format!("invalid stock count: {value}")))
}

/// Boolean from a bool, a 0/1 integer, or their string forms.
fn flag_lenient<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let flag = match &value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        Value::String(s) => match s.trim() {
            "1" | "true" => Some(true),
            "0" | "false" | "" => Some(false),
            _ => None,
        },
        Value::Null => Some(false),
        _ => None,
    };
    Ok(flag.unwrap_or_else(|| {
        tracing::warn!(value = %value, "unreadable boolean flag, substituting false");
        false
    }))
}

/// String list from an inline array or a JSON-encoded string column.
/// Unreadable values degrade to an empty list.
fn string_list_lenient<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_string_list(value))
}

fn value_to_string_list(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.into_iter().map(display_string).collect(),
        Value::String(s) => match serde_json::from_str::<Value>(&s) {
            Ok(Value::Array(items)) => items.into_iter().map(display_string).collect(),
            _ => {
                tracing::warn!("unreadable image list, substituting empty");
                Vec::new()
            }
        },
        Value::Null => Vec::new(),
        _ => {
            tracing::warn!("unreadable image list, substituting empty");
            Vec::new()
        }
    }
}

/// String map from an inline object or a JSON-encoded string column.
/// Unreadable values degrade to an empty map.
fn string_map_lenient<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_string_map(value))
}

fn value_to_string_map(value: Value) -> BTreeMap<String, String> {
    match value {
        Value::Object(map) => map
            .into_iter()
            .map(|(k, v)| (k, display_string(v)))
            .collect(),
        Value::String(s) => match serde_json::from_str::<Value>(&s) {
            Ok(Value::Object(map)) => map
                .into_iter()
                .map(|(k, v)| (k, display_string(v)))
                .collect(),
            _ => {
                tracing::warn!("unreadable specs, substituting empty");
                BTreeMap::new()
            }
        },
        Value::Null => BTreeMap::new(),
        _ => {
            tracing::warn!("unreadable specs, substituting empty");
            BTreeMap::new()
        }
    }
}

/// Render a JSON leaf as display text, unquoting strings.
fn display_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Timestamp from RFC 3339 or the catalog's `YYYY-MM-DD HH:MM:SS` form.
/// Unreadable values degrade to the epoch, which sorts last under `newest`.
fn datetime_lenient<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                    .map(|dt| dt.and_utc())
                    .ok()
            }),
        Value::Null => Some(DateTime::UNIX_EPOCH),
        _ => None,
    };
    Ok(parsed.unwrap_or_else(|| {
        tracing::warn!(value = %value, "unreadable created_at, substituting epoch");
        DateTime::UNIX_EPOCH
    }))
}
