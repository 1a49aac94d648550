//! Per-entity aggregation over a transaction snapshot.
//!
//! Accounts, merchants and devices are collected in the order they are first
//! referenced by the transaction sequence. That order is what the indexer
//! assigns dense indices from, so identical input always yields identical
//! graphs.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::csv_reader::{AccountListing, DeviceListing, MerchantListing, TransactionRecord};
use crate::error::{GraphError, Result};
use crate::normalizer::FeatureSource;
use crate::schema::{NodeType, PerNode};

/// Merchant risk tier, encoded 0..=3 in the feature matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Parse a listing label. Unrecognised labels map to `Low`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "MEDIUM" => RiskLevel::Medium,
            "HIGH" => RiskLevel::High,
            "CRITICAL" => RiskLevel::Critical,
            _ => RiskLevel::Low,
        }
    }

    /// Tier for merchants without a listed risk level
    pub fn from_fraud_rate(rate: f64) -> Self {
        match rate {
            r if r < 0.05 => RiskLevel::Low,
            r if r < 0.15 => RiskLevel::Medium,
            r if r < 0.30 => RiskLevel::High,
            _ => RiskLevel::Critical,
        }
    }

    pub fn encoded(&self) -> u8 {
        match self {
            RiskLevel::Low => 0,
            RiskLevel::Medium => 1,
            RiskLevel::High => 2,
            RiskLevel::Critical => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub account_id: String,
    pub risk_score: f64,
    pub total_transactions: u64,
    pub total_amount: f64,
    pub account_age_days: f64,
    pub fraud_flag: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantRecord {
    pub merchant_id: String,
    pub fraud_rate: f64,
    pub total_transactions: u64,
    pub avg_transaction_amount: f64,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub device_id: String,
    pub fraud_rate: f64,
    pub total_users: u64,
    pub total_transactions: u64,
    pub is_shared: bool,
    pub risk_score: f64,
}

impl FeatureSource for AccountRecord {
    const KIND: &'static str = "account";

    fn feature(&self, column: &str) -> Option<f64> {
        match column {
            "risk_score" => Some(self.risk_score),
            "total_transactions" => Some(self.total_transactions as f64),
            "total_amount" => Some(self.total_amount),
            "account_age_days" => Some(self.account_age_days),
            "fraud_flag" => Some(flag(self.fraud_flag)),
            _ => None,
        }
    }
}

impl FeatureSource for MerchantRecord {
    const KIND: &'static str = "merchant";

    fn feature(&self, column: &str) -> Option<f64> {
        match column {
            "fraud_rate" => Some(self.fraud_rate),
            "total_transactions" => Some(self.total_transactions as f64),
            "avg_transaction_amount" => Some(self.avg_transaction_amount),
            "risk_level_encoded" => Some(self.risk_level.encoded() as f64),
            _ => None,
        }
    }
}

impl FeatureSource for DeviceRecord {
    const KIND: &'static str = "device";

    fn feature(&self, column: &str) -> Option<f64> {
        match column {
            "fraud_rate" => Some(self.fraud_rate),
            "total_users" => Some(self.total_users as f64),
            "total_transactions" => Some(self.total_transactions as f64),
            "is_shared" => Some(flag(self.is_shared)),
            "risk_score" => Some(self.risk_score),
            _ => None,
        }
    }
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Entity tables exported independently of the transactions.
///
/// A supplied listing is authoritative: transactions referencing an id it
/// does not contain abort extraction.
#[derive(Debug, Clone, Default)]
pub struct EntityListings {
    pub accounts: Option<Vec<AccountListing>>,
    pub merchants: Option<Vec<MerchantListing>>,
    pub devices: Option<Vec<DeviceListing>>,
}

impl EntityListings {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_none() && self.merchants.is_none() && self.devices.is_none()
    }
}

/// Aggregated entities, each set in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityTables {
    pub accounts: Vec<AccountRecord>,
    pub merchants: Vec<MerchantRecord>,
    pub devices: Vec<DeviceRecord>,
}

impl EntityTables {
    pub fn counts(&self) -> PerNode<usize> {
        PerNode {
            account: self.accounts.len(),
            merchant: self.merchants.len(),
            device: self.devices.len(),
        }
    }

    /// Identifiers of one node type in table order
    pub fn ids(&self, node_type: NodeType) -> Vec<&str> {
        match node_type {
            NodeType::Account => self.accounts.iter().map(|a| a.account_id.as_str()).collect(),
            NodeType::Merchant => self.merchants.iter().map(|m| m.merchant_id.as_str()).collect(),
            NodeType::Device => self.devices.iter().map(|d| d.device_id.as_str()).collect(),
        }
    }
}

// Insertion-ordered accumulator keyed by entity id
struct Ordered<T> {
    slots: Vec<T>,
    positions: HashMap<String, usize>,
}

impl<T> Ordered<T> {
    fn new() -> Self {
        Self {
            slots: Vec::new(),
            positions: HashMap::new(),
        }
    }

    fn entry(&mut self, id: &str, init: impl FnOnce() -> T) -> &mut T {
        let slot = match self.positions.get(id) {
            Some(&slot) => slot,
            None => {
                self.slots.push(init());
                self.positions.insert(id.to_string(), self.slots.len() - 1);
                self.slots.len() - 1
            }
        };
        &mut self.slots[slot]
    }
}

struct AccountAcc {
    id: String,
    count: u64,
    fraud: u64,
    amount: f64,
    first_seen: NaiveDateTime,
    last_seen: NaiveDateTime,
}

struct MerchantAcc {
    id: String,
    count: u64,
    fraud: u64,
    amount: f64,
}

struct DeviceAcc {
    id: String,
    count: u64,
    fraud: u64,
    users: HashSet<String>,
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

fn validate(tx: &TransactionRecord) -> Result<()> {
    let record = || format!("transaction '{}'", tx.transaction_id);
    if tx.account_id.trim().is_empty() {
        return Err(GraphError::invalid_record(record(), "empty account id"));
    }
    if tx.merchant_id.trim().is_empty() {
        return Err(GraphError::invalid_record(record(), "empty merchant id"));
    }
    if !tx.amount.is_finite() || tx.amount < 0.0 {
        return Err(GraphError::invalid_record(
            record(),
            format!("amount {} is not a finite non-negative value", tx.amount),
        ));
    }
    Ok(())
}

// Listed scores are probabilities and ages are non-negative day counts.
fn check_unit_interval(record: &str, column: &str, value: Option<f64>) -> Result<()> {
    match value {
        Some(v) if !v.is_finite() || !(0.0..=1.0).contains(&v) => Err(GraphError::invalid_record(
            record,
            format!("{} {} is outside [0, 1]", column, v),
        )),
        _ => Ok(()),
    }
}

fn validate_account_listing(row: &AccountListing) -> Result<()> {
    let record = format!("account listing '{}'", row.account_id);
    if row.account_id.trim().is_empty() {
        return Err(GraphError::invalid_record(record, "empty account id"));
    }
    check_unit_interval(&record, "risk_score", row.risk_score)?;
    match row.account_age_days {
        Some(age) if !age.is_finite() || age < 0.0 => Err(GraphError::invalid_record(
            record,
            format!("account_age_days {} is not a finite non-negative value", age),
        )),
        _ => Ok(()),
    }
}

fn validate_merchant_listing(row: &MerchantListing) -> Result<()> {
    if row.merchant_id.trim().is_empty() {
        return Err(GraphError::invalid_record("merchant listing", "empty merchant id"));
    }
    Ok(())
}

fn validate_device_listing(row: &DeviceListing) -> Result<()> {
    let record = format!("device listing '{}'", row.device_id);
    if row.device_id.trim().is_empty() {
        return Err(GraphError::invalid_record(record, "empty device id"));
    }
    check_unit_interval(&record, "risk_score", row.risk_score)
}

// Index a listing by id after checking every row.
fn listing_map<'a, L>(
    rows: Option<&'a Vec<L>>,
    id_of: impl Fn(&L) -> &str,
    check: impl Fn(&L) -> Result<()>,
) -> Result<Option<HashMap<&'a str, &'a L>>> {
    let Some(rows) = rows else {
        return Ok(None);
    };
    let mut listed = HashMap::with_capacity(rows.len());
    for row in rows {
        check(row)?;
        listed.insert(id_of(row), row);
    }
    Ok(Some(listed))
}

// Listed ids that no transaction references
fn unreferenced<L, T>(listing: &Option<HashMap<&str, &L>>, seen: &Ordered<T>) -> usize {
    listing
        .as_ref()
        .map_or(0, |listed| listed.keys().filter(|id| !seen.positions.contains_key(**id)).count())
}

fn require_listed<L>(
    listing: &Option<HashMap<&str, &L>>,
    node_type: NodeType,
    id: &str,
    tx: &TransactionRecord,
) -> Result<()> {
    match listing {
        Some(listed) if !listed.contains_key(id) => Err(GraphError::MissingEntity {
            node_type,
            id: id.to_string(),
            transaction_id: tx.transaction_id.clone(),
        }),
        _ => Ok(()),
    }
}

/// Aggregate account, merchant and device records from a transaction snapshot.
pub fn extract_entities(transactions: &[TransactionRecord], listings: &EntityListings) -> Result<EntityTables> {
    let account_listing = listing_map(
        listings.accounts.as_ref(),
        |r| r.account_id.as_str(),
        validate_account_listing,
    )?;
    let merchant_listing = listing_map(
        listings.merchants.as_ref(),
        |r| r.merchant_id.as_str(),
        validate_merchant_listing,
    )?;
    let device_listing = listing_map(
        listings.devices.as_ref(),
        |r| r.device_id.as_str(),
        validate_device_listing,
    )?;

    let mut accounts: Ordered<AccountAcc> = Ordered::new();
    let mut merchants: Ordered<MerchantAcc> = Ordered::new();
    let mut devices: Ordered<DeviceAcc> = Ordered::new();

    for tx in transactions {
        validate(tx)?;
        require_listed(&account_listing, NodeType::Account, &tx.account_id, tx)?;
        require_listed(&merchant_listing, NodeType::Merchant, &tx.merchant_id, tx)?;
        if let Some(device_id) = tx.device() {
            require_listed(&device_listing, NodeType::Device, device_id, tx)?;
        }

        let fraud = u64::from(tx.is_fraud);

        let account = accounts.entry(&tx.account_id, || AccountAcc {
            id: tx.account_id.clone(),
            count: 0,
            fraud: 0,
            amount: 0.0,
            first_seen: tx.timestamp,
            last_seen: tx.timestamp,
        });
        account.count += 1;
        account.fraud += fraud;
        account.amount += tx.amount;
        account.first_seen = account.first_seen.min(tx.timestamp);
        account.last_seen = account.last_seen.max(tx.timestamp);

        let merchant = merchants.entry(&tx.merchant_id, || MerchantAcc {
            id: tx.merchant_id.clone(),
            count: 0,
            fraud: 0,
            amount: 0.0,
        });
        merchant.count += 1;
        merchant.fraud += fraud;
        merchant.amount += tx.amount;

        if let Some(device_id) = tx.device() {
            let device = devices.entry(device_id, || DeviceAcc {
                id: device_id.to_string(),
                count: 0,
                fraud: 0,
                users: HashSet::new(),
            });
            device.count += 1;
            device.fraud += fraud;
            device.users.insert(tx.account_id.clone());
        }
    }

    let unlisted_nodes = [
        (NodeType::Account, unreferenced(&account_listing, &accounts)),
        (NodeType::Merchant, unreferenced(&merchant_listing, &merchants)),
        (NodeType::Device, unreferenced(&device_listing, &devices)),
    ];

    let accounts: Vec<AccountRecord> = accounts
        .slots
        .into_iter()
        .map(|acc| {
            let listed = account_listing.as_ref().and_then(|l| l.get(acc.id.as_str()).copied());
            let derived_age = (acc.last_seen - acc.first_seen).num_days() as f64;
            AccountRecord {
                risk_score: listed
                    .and_then(|l| l.risk_score)
                    .unwrap_or_else(|| ratio(acc.fraud, acc.count)),
                total_transactions: acc.count,
                total_amount: acc.amount,
                account_age_days: listed.and_then(|l| l.account_age_days).unwrap_or(derived_age),
                fraud_flag: listed.and_then(|l| l.fraud_flag).unwrap_or(acc.fraud > 0),
                account_id: acc.id,
            }
        })
        .collect();

    let merchants: Vec<MerchantRecord> = merchants
        .slots
        .into_iter()
        .map(|acc| {
            let fraud_rate = ratio(acc.fraud, acc.count);
            let risk_level = merchant_listing
                .as_ref()
                .and_then(|l| l.get(acc.id.as_str()))
                .and_then(|l| l.risk_level.as_deref())
                .map(RiskLevel::from_label)
                .unwrap_or_else(|| RiskLevel::from_fraud_rate(fraud_rate));
            MerchantRecord {
                fraud_rate,
                total_transactions: acc.count,
                avg_transaction_amount: if acc.count == 0 { 0.0 } else { acc.amount / acc.count as f64 },
                risk_level,
                merchant_id: acc.id,
            }
        })
        .collect();

    let flagged: HashSet<&str> = accounts
        .iter()
        .filter(|a| a.fraud_flag)
        .map(|a| a.account_id.as_str())
        .collect();

    let devices: Vec<DeviceRecord> = devices
        .slots
        .into_iter()
        .map(|acc| {
            let total_users = acc.users.len() as u64;
            let flagged_users = acc.users.iter().filter(|u| flagged.contains(u.as_str())).count() as u64;
            let listed_risk = device_listing
                .as_ref()
                .and_then(|l| l.get(acc.id.as_str()))
                .and_then(|l| l.risk_score);
            DeviceRecord {
                fraud_rate: ratio(acc.fraud, acc.count),
                total_users,
                total_transactions: acc.count,
                is_shared: total_users > 1,
                risk_score: listed_risk.unwrap_or_else(|| ratio(flagged_users, total_users)),
                device_id: acc.id,
            }
        })
        .collect();

    for (node_type, count) in unlisted_nodes {
        if count > 0 {
            debug!("{} listed {}s have no transactions and are not graph nodes", count, node_type);
        }
    }

    let tables = EntityTables {
        accounts,
        merchants,
        devices,
    };
    let counts = tables.counts();
    info!(
        "Extracted {} accounts, {} merchants, {} devices from {} transactions",
        counts.account,
        counts.merchant,
        counts.device,
        transactions.len()
    );

    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .unwrap()
    }

    fn tx(id: &str, account: &str, merchant: &str, device: Option<&str>, amount: f64, day: u32, fraud: bool) -> TransactionRecord {
        TransactionRecord::new(id, account, merchant, device, amount, at(day, 12), fraud)
    }

    fn sample() -> Vec<TransactionRecord> {
        vec![
            tx("T1", "A1", "M1", Some("D1"), 100.0, 1, false),
            tx("T2", "A2", "M2", Some("D1"), 50.0, 2, true),
            tx("T3", "A1", "M1", None, 25.0, 11, false),
            tx("T4", "A3", "M2", Some("D2"), 10.0, 3, false),
        ]
    }

    #[test]
    fn test_entities_in_first_seen_order() {
        let tables = extract_entities(&sample(), &EntityListings::none()).unwrap();
        assert_eq!(tables.ids(NodeType::Account), vec!["A1", "A2", "A3"]);
        assert_eq!(tables.ids(NodeType::Merchant), vec!["M1", "M2"]);
        assert_eq!(tables.ids(NodeType::Device), vec!["D1", "D2"]);
    }

    #[test]
    fn test_account_aggregates() {
        let tables = extract_entities(&sample(), &EntityListings::none()).unwrap();
        let a1 = &tables.accounts[0];
        assert_eq!(a1.total_transactions, 2);
        assert_eq!(a1.total_amount, 125.0);
        assert_eq!(a1.account_age_days, 10.0);
        assert!(!a1.fraud_flag);
        assert_eq!(a1.risk_score, 0.0);

        let a2 = &tables.accounts[1];
        assert!(a2.fraud_flag);
        assert_eq!(a2.risk_score, 1.0);
    }

    #[test]
    fn test_merchant_aggregates() {
        let tables = extract_entities(&sample(), &EntityListings::none()).unwrap();
        let m2 = &tables.merchants[1];
        assert_eq!(m2.total_transactions, 2);
        assert_eq!(m2.fraud_rate, 0.5);
        assert_eq!(m2.avg_transaction_amount, 30.0);
        assert_eq!(m2.risk_level, RiskLevel::Critical);
        assert_eq!(tables.merchants[0].risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_device_aggregates_skip_missing_devices() {
        let tables = extract_entities(&sample(), &EntityListings::none()).unwrap();
        let d1 = &tables.devices[0];
        assert_eq!(d1.total_transactions, 2, "T3 has no device");
        assert_eq!(d1.total_users, 2);
        assert!(d1.is_shared);
        assert_eq!(d1.fraud_rate, 0.5);
        assert_eq!(d1.risk_score, 0.5, "one of two users is flagged");

        let d2 = &tables.devices[1];
        assert!(!d2.is_shared);
        assert_eq!(d2.risk_score, 0.0);
    }

    #[test]
    fn test_listing_overrides_static_attributes() {
        let listings = EntityListings {
            accounts: Some(vec![
                AccountListing {
                    account_id: "A1".into(),
                    risk_score: Some(0.9),
                    account_age_days: Some(400.0),
                    fraud_flag: Some(true),
                },
                AccountListing { account_id: "A2".into(), ..Default::default() },
                AccountListing { account_id: "A3".into(), ..Default::default() },
            ]),
            merchants: Some(vec![
                MerchantListing { merchant_id: "M1".into(), risk_level: Some("high".into()) },
                MerchantListing { merchant_id: "M2".into(), risk_level: Some("unrated".into()) },
            ]),
            devices: None,
        };
        let tables = extract_entities(&sample(), &listings).unwrap();

        let a1 = &tables.accounts[0];
        assert_eq!(a1.risk_score, 0.9);
        assert_eq!(a1.account_age_days, 400.0);
        assert!(a1.fraud_flag);
        assert_eq!(tables.accounts[1].risk_score, 1.0, "unlisted attributes fall back to derived values");
        assert_eq!(tables.merchants[0].risk_level, RiskLevel::High);
        assert_eq!(tables.merchants[1].risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_unlisted_merchant_is_rejected() {
        let listings = EntityListings {
            merchants: Some(vec![MerchantListing { merchant_id: "M1".into(), risk_level: None }]),
            ..Default::default()
        };
        let err = extract_entities(&sample(), &listings).unwrap_err();
        match err {
            GraphError::MissingEntity { node_type, id, transaction_id } => {
                assert_eq!(node_type, NodeType::Merchant);
                assert_eq!(id, "M2");
                assert_eq!(transaction_id, "T2");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    fn account(id: &str, risk_score: Option<f64>, age: Option<f64>) -> AccountListing {
        AccountListing {
            account_id: id.into(),
            risk_score,
            account_age_days: age,
            fraud_flag: None,
        }
    }

    #[test]
    fn test_unlisted_account_is_rejected() {
        let listings = EntityListings {
            accounts: Some(vec![account("A1", None, None), account("A2", None, None)]),
            ..Default::default()
        };
        match extract_entities(&sample(), &listings).unwrap_err() {
            GraphError::MissingEntity { node_type, id, transaction_id } => {
                assert_eq!(node_type, NodeType::Account);
                assert_eq!(id, "A3");
                assert_eq!(transaction_id, "T4");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unlisted_device_is_rejected() {
        let listings = EntityListings {
            devices: Some(vec![DeviceListing { device_id: "D1".into(), risk_score: None }]),
            ..Default::default()
        };
        match extract_entities(&sample(), &listings).unwrap_err() {
            GraphError::MissingEntity { node_type, id, transaction_id } => {
                assert_eq!(node_type, NodeType::Device);
                assert_eq!(id, "D2");
                assert_eq!(transaction_id, "T4");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_device_listing_overrides_risk_score() {
        let listings = EntityListings {
            devices: Some(vec![
                DeviceListing { device_id: "D1".into(), risk_score: Some(0.8) },
                DeviceListing { device_id: "D2".into(), risk_score: None },
            ]),
            ..Default::default()
        };
        let tables = extract_entities(&sample(), &listings).unwrap();
        assert_eq!(tables.devices[0].risk_score, 0.8);
        assert_eq!(tables.devices[1].risk_score, 0.0, "unlisted score falls back to flagged-user share");
    }

    #[test]
    fn test_malformed_account_listing_values() {
        let all = |row: AccountListing| {
            let mut rows = vec![account("A1", None, None), account("A2", None, None), account("A3", None, None)];
            rows.push(row);
            EntityListings { accounts: Some(rows), ..Default::default() }
        };
        for bad in [
            account("A1", Some(f64::NAN), None),
            account("A2", Some(7.5), Some(10.0)),
            account("A3", Some(-0.1), None),
            account("A1", None, Some(-40.0)),
            account("A2", None, Some(f64::INFINITY)),
            account(" ", None, None),
        ] {
            let err = extract_entities(&sample(), &all(bad.clone())).unwrap_err();
            assert!(matches!(err, GraphError::InvalidRecord { .. }), "{:?} should be rejected", bad);
        }
        assert!(extract_entities(&sample(), &all(account("A9", Some(1.0), Some(0.0)))).is_ok());
    }

    #[test]
    fn test_malformed_device_listing_values() {
        for score in [f64::NAN, 1.5, -2.0] {
            let listings = EntityListings {
                devices: Some(vec![
                    DeviceListing { device_id: "D1".into(), risk_score: Some(score) },
                    DeviceListing { device_id: "D2".into(), risk_score: None },
                ]),
                ..Default::default()
            };
            let err = extract_entities(&sample(), &listings).unwrap_err();
            assert!(matches!(err, GraphError::InvalidRecord { .. }), "device risk {} should be rejected", score);
        }
    }

    #[test]
    fn test_unreferenced_listing_ids_are_counted_once() {
        let rows = vec![
            account("A1", None, None),
            account("A1", None, None),
            account("A2", None, None),
            account("A9", None, None),
            account("A9", None, None),
        ];
        let listing = listing_map(Some(&rows), |r| r.account_id.as_str(), validate_account_listing).unwrap();

        let mut seen: Ordered<()> = Ordered::new();
        seen.entry("A1", || ());
        seen.entry("A2", || ());
        seen.entry("A3", || ());
        assert_eq!(unreferenced(&listing, &seen), 1, "only A9 is listed without transactions");
    }

    #[test]
    fn test_negative_amount_is_invalid() {
        let txs = vec![tx("T1", "A1", "M1", None, -3.0, 1, false)];
        let err = extract_entities(&txs, &EntityListings::none()).unwrap_err();
        assert!(matches!(err, GraphError::InvalidRecord { .. }));
    }

    #[test]
    fn test_risk_level_bands() {
        assert_eq!(RiskLevel::from_fraud_rate(0.0).encoded(), 0);
        assert_eq!(RiskLevel::from_fraud_rate(0.10).encoded(), 1);
        assert_eq!(RiskLevel::from_fraud_rate(0.20).encoded(), 2);
        assert_eq!(RiskLevel::from_fraud_rate(0.80).encoded(), 3);
        assert_eq!(RiskLevel::from_label(" critical ").encoded(), 3);
    }
}
