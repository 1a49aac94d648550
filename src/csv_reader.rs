// Reads transaction records and optional entity listings exported from the
// relational store as CSV.
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike};
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TransactionRecord {
    pub transaction_id: String,
    pub account_id: String,
    pub merchant_id: String,
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(rename = "transaction_amount")]
    pub amount: f64,
    #[serde(rename = "transaction_date", deserialize_with = "deserialize_timestamp")]
    pub timestamp: NaiveDateTime,
    #[serde(deserialize_with = "deserialize_flag")]
    pub is_fraud: bool,
}

impl TransactionRecord {
    pub fn new(
        transaction_id: impl Into<String>,
        account_id: impl Into<String>,
        merchant_id: impl Into<String>,
        device_id: Option<&str>,
        amount: f64,
        timestamp: NaiveDateTime,
        is_fraud: bool,
    ) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            account_id: account_id.into(),
            merchant_id: merchant_id.into(),
            device_id: device_id.map(str::to_string),
            amount,
            timestamp,
            is_fraud,
        }
    }

    /// Device reference, treating blank ids as absent
    pub fn device(&self) -> Option<&str> {
        self.device_id
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    pub fn hour_of_day(&self) -> u32 {
        self.timestamp.hour()
    }

    // Monday = 0
    pub fn day_of_week(&self) -> u32 {
        self.timestamp.weekday().num_days_from_monday()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct AccountListing {
    pub account_id: String,
    #[serde(default)]
    pub risk_score: Option<f64>,
    #[serde(default)]
    pub account_age_days: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_flag")]
    pub fraud_flag: Option<bool>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct MerchantListing {
    pub merchant_id: String,
    #[serde(default)]
    pub risk_level: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct DeviceListing {
    pub device_id: String,
    #[serde(default)]
    pub risk_score: Option<f64>,
}

pub fn read_transactions<P: AsRef<Path>>(file_path: P) -> Result<Vec<TransactionRecord>> {
    read_records(file_path)
}

pub fn read_records<T: DeserializeOwned, P: AsRef<Path>>(file_path: P) -> Result<Vec<T>> {
    let file = File::open(file_path)?;
    read_records_from(file)
}

pub fn read_records_from<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let records = rdr
        .deserialize()
        .collect::<std::result::Result<Vec<T>, csv::Error>>()?;

    Ok(records)
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_utc());
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

// Accepts the spellings produced by common database exports
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "t" => Some(true),
        "0" | "false" | "f" => Some(false),
        _ => None,
    }
}

fn deserialize_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(raw.trim())
        .ok_or_else(|| de::Error::custom(format!("unrecognised timestamp '{}'", raw)))
}

fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_flag(raw.trim()).ok_or_else(|| de::Error::custom(format!("invalid fraud label '{}'", raw)))
}

fn deserialize_optional_flag<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<bool>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_flag(s)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid fraud flag '{}'", s))),
    }
}
