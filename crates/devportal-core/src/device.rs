//! Device record as returned by the backend

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Deserializer};

use crate::i18n::Language;

/// Device metadata. Every field is optional and `null`-tolerant.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DeviceRecord {
    #[serde(rename = "SERNUM", deserialize_with = "loose_string")]
    pub serial_number: Option<String>,

    #[serde(rename = "PARTNAME", deserialize_with = "loose_string")]
    pub part_code: Option<String>,

    #[serde(rename = "PARTDES", deserialize_with = "loose_string")]
    pub part_description: Option<String>,

    #[serde(rename = "CUSTNAME", deserialize_with = "loose_string")]
    pub customer_number: Option<String>,

    #[serde(rename = "DCODEDES", deserialize_with = "loose_string")]
    pub site: Option<String>,

    #[serde(rename = "ELDN_CUSTSERNUM", deserialize_with = "loose_string")]
    pub customer_system_id: Option<String>,

    #[serde(rename = "ELDN_DOCZNUM", deserialize_with = "loose_string")]
    pub service_number: Option<String>,

    #[serde(rename = "WARDATE", deserialize_with = "loose_date")]
    pub warranty_start: Option<DateTime<FixedOffset>>,

    #[serde(rename = "WARDATEFINAL", deserialize_with = "loose_date")]
    pub warranty_final: Option<DateTime<FixedOffset>>,

    #[serde(rename = "PHONE", deserialize_with = "loose_string")]
    pub phone: Option<String>,

    #[serde(rename = "ELDN_STATDES", deserialize_with = "loose_string")]
    pub status_descriptor: Option<String>,

    #[serde(rename = "SERNSERVCONTRACTS_SUBFORM", deserialize_with = "loose_contracts")]
    pub contracts: Vec<ServiceContract>,
}

/// Service contract extending coverage past the base warranty
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceContract {
    #[serde(rename = "STATDES", deserialize_with = "loose_string")]
    pub status: Option<String>,

    #[serde(rename = "EXPIRYDATE", deserialize_with = "loose_date")]
    pub expiry: Option<DateTime<FixedOffset>>,
}

impl DeviceRecord {
    /// Non-empty value of an optional text field
    pub fn text(field: &Option<String>) -> Option<&str> {
        field.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Parse a backend date: RFC 3339, or a bare `YYYY-MM-DD` taken as UTC midnight
pub fn parse_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Render a date the way the portal shows it: `dd/mm/yyyy`
pub fn format_date(date: &DateTime<FixedOffset>) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn loose_date<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    };
    Ok(value.as_deref().and_then(|raw| {
        let parsed = parse_date(raw);
        if parsed.is_none() {
            tracing::warn!("Ignoring unparseable date '{}'", raw);
        }
        parsed
    }))
}

fn loose_contracts<'de, D>(deserializer: D) -> Result<Vec<ServiceContract>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ServiceContract>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Built-in record served in test mode, localized like the live backend would be
pub fn sample_record(language: Language) -> DeviceRecord {
    let (site, active) = match language {
        Language::English => ("A.P.P. Laboratory", "Active"),
        Language::Hebrew => ("מעבדת א.פ.פ.", "בתוקף"),
    };

    DeviceRecord {
        serial_number: Some("AU125668790".into()),
        part_code: Some("G0010BBTT".into()),
        part_description: Some("A.T 7000AA Triple Quad bundle".into()),
        customer_number: Some("13666666".into()),
        site: Some(site.into()),
        customer_system_id: Some("3Q AAM-11(1111)".into()),
        service_number: Some("121212".into()),
        warranty_start: parse_date("2015-01-22T00:00:00+02:00"),
        warranty_final: parse_date("2017-01-21T00:00:00+02:00"),
        phone: Some("1234".into()),
        status_descriptor: Some("Active".into()),
        contracts: vec![ServiceContract {
            status: Some(active.into()),
            expiry: parse_date("2025-12-31T00:00:00+02:00"),
        }],
    }
}
