//! The upstream adapter layer: lenient deserialization of raw telemetry
//! records as the rainfall API actually sends them.
//!
//! The upstream is inconsistent between endpoints and deployments: fields
//! go missing, numbers arrive as strings, names and timestamps exist in
//! two spellings (`DateTime` vs the legacy `DtDate`, `ProvinceName` vs
//! `Province`). Everything here deserializes without error and defers
//! judgment to the reducer, which is where records get dropped.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One raw time-stamped record from the upstream API, before
/// normalization. Every field is optional at the wire level.
///
/// Field names map the upstream contract (`StationID`, `Latitude`,
/// `RainValue`, `DtDate`, ...) onto a canonical shape; consumers should
/// not read these directly but go through
/// [`Station::from_reading`](crate::Station::from_reading).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawReading {
    #[serde(default, rename = "StationID", deserialize_with = "lenient_string")]
    pub station_id: Option<String>,

    #[serde(default, rename = "StationNo", deserialize_with = "lenient_string")]
    pub station_code: Option<String>,

    #[serde(default, rename = "StationName", deserialize_with = "lenient_string")]
    pub name: Option<String>,

    /// Local-language station name; preferred over `name` for display.
    #[serde(default, rename = "StationNameVN", deserialize_with = "lenient_string")]
    pub name_local: Option<String>,

    #[serde(default, rename = "Latitude", deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,

    #[serde(default, rename = "Longitude", deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,

    #[serde(default, rename = "RainValue", deserialize_with = "lenient_f64")]
    pub rain_value: Option<f64>,

    /// Fallback measurement field used by the by-time endpoint.
    #[serde(default, rename = "Value", deserialize_with = "lenient_f64")]
    pub value: Option<f64>,

    #[serde(default, rename = "DateTime", deserialize_with = "lenient_string")]
    pub date_time: Option<String>,

    /// Legacy timestamp field; used when `DateTime` is absent.
    #[serde(default, rename = "DtDate", deserialize_with = "lenient_string")]
    pub dt_date: Option<String>,

    #[serde(default, rename = "ProvinceName", deserialize_with = "lenient_string")]
    pub province_name: Option<String>,

    #[serde(default, rename = "Province", deserialize_with = "lenient_string")]
    pub province: Option<String>,
}

impl RawReading {
    /// Parsed timestamp of this reading, preferring `DateTime` over the
    /// legacy `DtDate`. `None` when both are absent or unparseable.
    pub fn observed_at(&self) -> Option<NaiveDateTime> {
        let raw = self.date_time.as_deref().or(self.dt_date.as_deref())?;
        parse_timestamp(raw)
    }

    /// The rainfall measurement, whichever field the endpoint used.
    pub fn rain(&self) -> Option<f64> {
        self.rain_value.or(self.value)
    }
}

/// A response body from the upstream: either a bare array of readings or
/// the `{ "data": [...] }` envelope the backend wraps list responses in.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ReadingBatch {
    Wrapped { data: Vec<RawReading> },
    Bare(Vec<RawReading>),
}

impl ReadingBatch {
    pub(crate) fn into_readings(self) -> Vec<RawReading> {
        match self {
            ReadingBatch::Wrapped { data } => data,
            ReadingBatch::Bare(readings) => readings,
        }
    }
}

/// Accepts a JSON number or a numeric string; anything else (null,
/// booleans, junk text) becomes `None` instead of a deserialize error.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }))
}

/// Accepts a JSON string or number (station ids arrive both ways);
/// empty/blank strings and other types become `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

/// Parses the timestamp spellings the upstream emits: ISO 8601 with or
/// without seconds, with or without a zone offset, space-separated, or
/// date-only. Offsets are dropped; recency comparison only needs a
/// consistent axis within one batch.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(with_offset) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.naive_utc());
    }
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    for format in FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed);
        }
    }
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
