//! Heterogeneous graph assembly.
//!
//! Turns the aggregated entity tables and the transaction snapshot into
//! per-type node feature matrices and per-relation edge arrays. Edge endpoints
//! are resolved through the [`IdentifierIndex`]; an unresolvable endpoint
//! aborts assembly.

use std::collections::{HashMap, HashSet};

use chrono::Duration;
use ndarray::{s, Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::csv_reader::TransactionRecord;
use crate::entities::EntityTables;
use crate::error::{GraphError, Result};
use crate::indexer::IdentifierIndex;
use crate::normalizer::{FeatureNormalizer, FeatureSource, DEFAULT_CLIP};
use crate::schema::{EdgeType, NodeType, PerEdge, PerNode};

/// Which transactions count towards the `shares` relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ShareWindow {
    /// Every transaction in the snapshot
    #[default]
    FullHistory,
    /// Transactions within `days` of the latest transaction in the snapshot
    Trailing { days: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssemblerConfig {
    pub clip: f64,
    pub share_window: ShareWindow,
}

impl AssemblerConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.clip.is_finite() || self.clip <= 0.0 {
            return Err(GraphError::InvalidConfig(format!(
                "clip bound {} must be a positive number",
                self.clip
            )));
        }
        if let ShareWindow::Trailing { days } = self.share_window {
            if days < 0 {
                return Err(GraphError::InvalidConfig(format!(
                    "share window of {} days must not be negative",
                    days
                )));
            }
        }
        Ok(())
    }
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            clip: DEFAULT_CLIP,
            share_window: ShareWindow::FullHistory,
        }
    }
}

/// Normalized feature matrix of one node type, rows in index order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeStore {
    pub features: Array2<f64>,
    pub normalizer: FeatureNormalizer,
}

impl NodeStore {
    pub fn len(&self) -> usize {
        self.features.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.features.nrows() == 0
    }
}

/// Directed edges between two node types.
///
/// `edge_index` has shape `(2, E)`: row 0 holds source indices, row 1 target
/// indices. `features` has one row per edge; `labels`, when present, one entry
/// per edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSet {
    pub source_type: NodeType,
    pub target_type: NodeType,
    pub edge_index: Array2<usize>,
    pub features: Array2<f64>,
    pub labels: Option<Array1<u8>>,
}

impl EdgeSet {
    fn new(
        source_type: NodeType,
        target_type: NodeType,
        pairs: &[(usize, usize)],
        features: Array2<f64>,
        labels: Option<Array1<u8>>,
    ) -> Self {
        let mut edge_index = Array2::zeros((2, pairs.len()));
        for (e, &(src, dst)) in pairs.iter().enumerate() {
            edge_index[[0, e]] = src;
            edge_index[[1, e]] = dst;
        }
        Self {
            source_type,
            target_type,
            edge_index,
            features,
            labels,
        }
    }

    pub fn len(&self) -> usize {
        self.edge_index.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn sources(&self) -> ArrayView1<'_, usize> {
        self.edge_index.row(0)
    }

    pub fn targets(&self) -> ArrayView1<'_, usize> {
        self.edge_index.row(1)
    }

    /// Same edges with endpoints swapped and features shared
    pub fn reversed(&self) -> Self {
        Self {
            source_type: self.target_type,
            target_type: self.source_type,
            edge_index: self.reversed_index(),
            features: self.features.clone(),
            labels: self.labels.clone(),
        }
    }

    /// Edge index with rows swapped: target -> source
    pub fn reversed_index(&self) -> Array2<usize> {
        let mut edge_index = self.edge_index.clone();
        edge_index.invert_axis(Axis(0));
        edge_index.as_standard_layout().to_owned()
    }
}

/// One relation: forward edges, plus reverse edges for bidirectional relations.
///
/// Every relation also carries `reverse_index`, the forward edges pointed back
/// at the account side, so messages can flow from merchants and devices into
/// accounts. It holds indices only and is not counted as separate edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub edge_type: EdgeType,
    pub forward: EdgeSet,
    pub reverse: Option<EdgeSet>,
    pub reverse_index: Array2<usize>,
    pub normalizer: FeatureNormalizer,
}

impl Relation {
    fn new(edge_type: EdgeType, forward: EdgeSet, normalizer: FeatureNormalizer) -> Self {
        let reverse = edge_type.is_bidirectional().then(|| forward.reversed());
        let reverse_index = forward.reversed_index();
        Self {
            edge_type,
            forward,
            reverse,
            reverse_index,
            normalizer,
        }
    }

    /// Name of the target -> source direction, e.g. `used_by`
    pub fn reverse_name(&self) -> &'static str {
        self.edge_type.reverse_name()
    }

    /// Directed edge count, both directions included
    pub fn num_edges(&self) -> usize {
        self.forward.len() + self.reverse.as_ref().map_or(0, EdgeSet::len)
    }

    pub fn edge_sets(&self) -> impl Iterator<Item = &EdgeSet> {
        std::iter::once(&self.forward).chain(self.reverse.iter())
    }
}

/// The assembled heterogeneous graph of one construction run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeteroGraph {
    pub nodes: PerNode<NodeStore>,
    pub edges: PerEdge<Relation>,
    /// Account `fraud_flag` in index order, the node classification target
    pub account_labels: Array1<u8>,
}

impl HeteroGraph {
    pub fn num_nodes(&self, node_type: NodeType) -> usize {
        self.nodes.get(node_type).len()
    }

    pub fn relation(&self, edge_type: EdgeType) -> &Relation {
        self.edges.get(edge_type)
    }

    /// Check endpoint ranges, array alignment and reverse-edge symmetry.
    pub fn validate(&self) -> Result<()> {
        let accounts = self.num_nodes(NodeType::Account);
        if self.account_labels.len() != accounts {
            return Err(GraphError::InconsistentGraph(format!(
                "{} account labels for {} account nodes",
                self.account_labels.len(),
                accounts
            )));
        }

        for (edge_type, relation) in self.edges.iter() {
            for set in relation.edge_sets() {
                self.validate_edge_set(edge_type, set, relation.normalizer.width())?;
            }

            if relation.reverse_index != relation.forward.reversed_index() {
                return Err(GraphError::InconsistentGraph(format!(
                    "{} index does not mirror the {} edges",
                    relation.reverse_name(),
                    edge_type
                )));
            }

            match (&relation.reverse, edge_type.is_bidirectional()) {
                (Some(reverse), true) => {
                    let forward = &relation.forward;
                    if reverse.sources() != forward.targets()
                        || reverse.targets() != forward.sources()
                        || reverse.features != forward.features
                    {
                        return Err(GraphError::InconsistentGraph(format!(
                            "{} reverse edges do not mirror the forward edges",
                            edge_type
                        )));
                    }
                }
                (None, false) => {}
                (Some(_), false) | (None, true) => {
                    return Err(GraphError::InconsistentGraph(format!(
                        "{} reverse edges do not match the relation direction",
                        edge_type
                    )));
                }
            }
        }

        Ok(())
    }

    fn validate_edge_set(&self, edge_type: EdgeType, set: &EdgeSet, width: usize) -> Result<()> {
        let fail = |reason: String| -> Result<()> {
            Err(GraphError::InconsistentGraph(format!("{}: {}", edge_type, reason)))
        };

        if set.edge_index.nrows() != 2 {
            return fail(format!("edge index has {} rows", set.edge_index.nrows()));
        }
        if set.features.nrows() != set.len() {
            return fail(format!("{} feature rows for {} edges", set.features.nrows(), set.len()));
        }
        if set.features.ncols() != width {
            return fail(format!("{} feature columns, expected {}", set.features.ncols(), width));
        }
        match (&set.labels, edge_type.has_labels()) {
            (Some(labels), true) if labels.len() != set.len() => {
                return fail(format!("{} labels for {} edges", labels.len(), set.len()));
            }
            (Some(_), false) | (None, true) => {
                return fail("label presence does not match the relation".to_string());
            }
            _ => {}
        }

        let num_sources = self.num_nodes(set.source_type);
        let num_targets = self.num_nodes(set.target_type);
        if let Some(bad) = set.sources().iter().find(|&&i| i >= num_sources) {
            return fail(format!("source index {} outside {} {} nodes", bad, num_sources, set.source_type));
        }
        if let Some(bad) = set.targets().iter().find(|&&i| i >= num_targets) {
            return fail(format!("target index {} outside {} {} nodes", bad, num_targets, set.target_type));
        }
        Ok(())
    }
}

impl FeatureSource for TransactionRecord {
    const KIND: &'static str = "transaction";

    fn feature(&self, column: &str) -> Option<f64> {
        match column {
            "amount" => Some(self.amount),
            "hour_of_day" => Some(self.hour_of_day() as f64),
            "day_of_week" => Some(self.day_of_week() as f64),
            _ => None,
        }
    }
}

/// Aggregated activity of one account on a device used by several accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedPair {
    pub account_id: String,
    pub device_id: String,
    pub transaction_count: u64,
    pub fraud_count: u64,
}

impl FeatureSource for SharedPair {
    const KIND: &'static str = "shared device pair";

    fn feature(&self, column: &str) -> Option<f64> {
        match column {
            "transaction_count" => Some(self.transaction_count as f64),
            "fraud_count" => Some(self.fraud_count as f64),
            _ => None,
        }
    }
}

/// Collect (account, device) pairs on devices used by more than one account,
/// in order of first appearance.
pub fn shared_pairs(transactions: &[TransactionRecord], window: ShareWindow) -> Vec<SharedPair> {
    let cutoff = match window {
        ShareWindow::FullHistory => None,
        ShareWindow::Trailing { days } => transactions
            .iter()
            .map(|tx| tx.timestamp)
            .max()
            // A window reaching past the representable range covers everything
            .and_then(|latest| Duration::try_days(days).and_then(|span| latest.checked_sub_signed(span))),
    };

    let mut pairs: Vec<SharedPair> = Vec::new();
    let mut positions: HashMap<(&str, &str), usize> = HashMap::new();
    let mut users: HashMap<&str, HashSet<&str>> = HashMap::new();

    for tx in transactions {
        if cutoff.is_some_and(|c| tx.timestamp < c) {
            continue;
        }
        let Some(device_id) = tx.device() else {
            continue;
        };
        users.entry(device_id).or_default().insert(tx.account_id.as_str());

        let slot = *positions
            .entry((tx.account_id.as_str(), device_id))
            .or_insert_with(|| {
                pairs.push(SharedPair {
                    account_id: tx.account_id.clone(),
                    device_id: device_id.to_string(),
                    transaction_count: 0,
                    fraud_count: 0,
                });
                pairs.len() - 1
            });
        pairs[slot].transaction_count += 1;
        pairs[slot].fraud_count += u64::from(tx.is_fraud);
    }

    pairs.retain(|p| users.get(p.device_id.as_str()).map_or(0, HashSet::len) > 1);
    pairs
}

/// Build node matrices and all three relations.
pub fn assemble(
    tables: &EntityTables,
    index: &IdentifierIndex,
    transactions: &[TransactionRecord],
    config: &AssemblerConfig,
) -> Result<HeteroGraph> {
    config.validate()?;

    let nodes = PerNode {
        account: node_store(NodeType::Account, &tables.accounts, |a| &a.account_id, index, config)?,
        merchant: node_store(NodeType::Merchant, &tables.merchants, |m| &m.merchant_id, index, config)?,
        device: node_store(NodeType::Device, &tables.devices, |d| &d.device_id, index, config)?,
    };

    let mut account_labels = Array1::zeros(index.len(NodeType::Account));
    for account in &tables.accounts {
        account_labels[index.index_of(NodeType::Account, &account.account_id)?] = u8::from(account.fraud_flag);
    }

    let transacts_with = {
        let edge_type = EdgeType::TransactsWith;
        let mut pairs = Vec::with_capacity(transactions.len());
        for tx in transactions {
            pairs.push((
                index.index_of(NodeType::Account, &tx.account_id)?,
                index.index_of(NodeType::Merchant, &tx.merchant_id)?,
            ));
        }
        let (normalizer, features) =
            FeatureNormalizer::fit_transform(transactions, edge_type.feature_columns(), config.clip)?;
        let labels: Array1<u8> = transactions.iter().map(|tx| u8::from(tx.is_fraud)).collect();
        let forward = EdgeSet::new(NodeType::Account, NodeType::Merchant, &pairs, features, Some(labels));
        Relation::new(edge_type, forward, normalizer)
    };

    let uses = {
        let edge_type = EdgeType::Uses;
        let with_device: Vec<&TransactionRecord> = transactions.iter().filter(|tx| tx.device().is_some()).collect();
        let mut pairs = Vec::with_capacity(with_device.len());
        for tx in &with_device {
            if let Some(device_id) = tx.device() {
                pairs.push((
                    index.index_of(NodeType::Account, &tx.account_id)?,
                    index.index_of(NodeType::Device, device_id)?,
                ));
            }
        }
        debug!("{} transactions without a device excluded from uses", transactions.len() - with_device.len());
        let (normalizer, features) =
            FeatureNormalizer::fit_transform(&with_device, edge_type.feature_columns(), config.clip)?;
        let forward = EdgeSet::new(NodeType::Account, NodeType::Device, &pairs, features, None);
        Relation::new(edge_type, forward, normalizer)
    };

    let shares = {
        let edge_type = EdgeType::Shares;
        let shared = shared_pairs(transactions, config.share_window);
        let mut pairs = Vec::with_capacity(shared.len());
        for pair in &shared {
            pairs.push((
                index.index_of(NodeType::Account, &pair.account_id)?,
                index.index_of(NodeType::Device, &pair.device_id)?,
            ));
        }
        let (normalizer, features) = FeatureNormalizer::fit_transform(&shared, edge_type.feature_columns(), config.clip)?;
        let forward = EdgeSet::new(NodeType::Account, NodeType::Device, &pairs, features, None);
        Relation::new(edge_type, forward, normalizer)
    };

    let graph = HeteroGraph {
        nodes,
        edges: PerEdge {
            transacts_with,
            uses,
            shares,
        },
        account_labels,
    };
    graph.validate()?;

    for (edge_type, relation) in graph.edges.iter() {
        info!(
            "  {} edges: {} (reverse {}: {})",
            edge_type,
            relation.num_edges(),
            relation.reverse_name(),
            relation.reverse_index.ncols()
        );
    }

    Ok(graph)
}

fn node_store<R, F>(
    node_type: NodeType,
    records: &[R],
    id_of: F,
    index: &IdentifierIndex,
    config: &AssemblerConfig,
) -> Result<NodeStore>
where
    R: FeatureSource,
    F: Fn(&R) -> &String,
{
    if records.len() != index.len(node_type) {
        return Err(GraphError::InconsistentGraph(format!(
            "{} {} records but {} indexed identifiers",
            records.len(),
            node_type,
            index.len(node_type)
        )));
    }

    let (normalizer, rows) = FeatureNormalizer::fit_transform(records, node_type.feature_columns(), config.clip)?;

    // Place each record's row at its dense index.
    let mut features = Array2::zeros(rows.dim());
    for (record, row) in records.iter().zip(rows.axis_iter(Axis(0))) {
        let i = index.index_of(node_type, id_of(record))?;
        features.slice_mut(s![i, ..]).assign(&row);
    }

    info!("  {} nodes: {} x {}", node_type, features.nrows(), features.ncols());
    Ok(NodeStore { features, normalizer })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{extract_entities, EntityListings};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, day)
            .and_then(|d| d.and_hms_opt(10, 30, 0))
            .unwrap()
    }

    fn tx(id: &str, account: &str, merchant: &str, device: Option<&str>, amount: f64, day: u32, fraud: bool) -> TransactionRecord {
        TransactionRecord::new(id, account, merchant, device, amount, at(day), fraud)
    }

    fn build(transactions: &[TransactionRecord], config: &AssemblerConfig) -> HeteroGraph {
        let tables = extract_entities(transactions, &EntityListings::none()).unwrap();
        let index = IdentifierIndex::build(&tables);
        assemble(&tables, &index, transactions, config).unwrap()
    }

    fn sample() -> Vec<TransactionRecord> {
        vec![
            tx("T1", "A1", "M1", Some("D1"), 120.0, 1, false),
            tx("T2", "A2", "M1", Some("D1"), 80.0, 2, true),
            tx("T3", "A1", "M2", Some("D1"), 35.0, 3, false),
            tx("T4", "A3", "M2", Some("D2"), 5.0, 4, false),
            tx("T5", "A3", "M1", None, 500.0, 5, true),
        ]
    }

    #[test]
    fn test_node_matrices_follow_index_order() {
        let graph = build(&sample(), &AssemblerConfig::default());
        assert_eq!(graph.nodes.account.features.dim(), (3, 5));
        assert_eq!(graph.nodes.merchant.features.dim(), (2, 4));
        assert_eq!(graph.nodes.device.features.dim(), (2, 5));
        // fraud_flag column is copied through: A1 clean, A2 and A3 flagged
        assert_eq!(graph.nodes.account.features.column(4).to_vec(), vec![0.0, 1.0, 1.0]);
        assert_eq!(graph.account_labels.to_vec(), vec![0, 1, 1]);
        // is_shared column: D1 shared, D2 not
        assert_eq!(graph.nodes.device.features.column(3).to_vec(), vec![1.0, 0.0]);
    }

    #[test]
    fn test_transaction_edges_keep_multi_edges() {
        let graph = build(&sample(), &AssemblerConfig::default());
        let edges = &graph.relation(EdgeType::TransactsWith).forward;
        assert_eq!(edges.len(), 5);
        assert_eq!(edges.sources().to_vec(), vec![0, 1, 0, 2, 2]);
        assert_eq!(edges.targets().to_vec(), vec![0, 0, 1, 1, 0]);
        assert_eq!(edges.labels.as_ref().unwrap().to_vec(), vec![0, 1, 0, 0, 1]);
        assert_eq!(edges.features.dim(), (5, 3));
    }

    #[test]
    fn test_uses_skips_transactions_without_device() {
        let graph = build(&sample(), &AssemblerConfig::default());
        let uses = graph.relation(EdgeType::Uses);
        assert_eq!(uses.forward.len(), 4);
        assert!(uses.reverse.is_none());
        assert!(uses.forward.labels.is_none());
        assert_eq!(uses.forward.targets().to_vec(), vec![0, 0, 0, 1]);
    }

    #[test]
    fn test_shares_is_mirrored() {
        let graph = build(&sample(), &AssemblerConfig::default());
        let shares = graph.relation(EdgeType::Shares);
        // A1 and A2 on D1; D2 has a single user
        assert_eq!(shares.forward.len(), 2);
        assert_eq!(shares.num_edges(), 4);

        let reverse = shares.reverse.as_ref().unwrap();
        assert_eq!(reverse.source_type, NodeType::Device);
        assert_eq!(reverse.sources(), shares.forward.targets());
        assert_eq!(reverse.targets(), shares.forward.sources());
        assert_eq!(reverse.features, shares.forward.features);
    }

    #[test]
    fn test_shared_pair_counts() {
        let pairs = shared_pairs(&sample(), ShareWindow::FullHistory);
        assert_eq!(pairs.len(), 2);
        assert_eq!((pairs[0].account_id.as_str(), pairs[0].transaction_count, pairs[0].fraud_count), ("A1", 2, 0));
        assert_eq!((pairs[1].account_id.as_str(), pairs[1].transaction_count, pairs[1].fraud_count), ("A2", 1, 1));
    }

    #[test]
    fn test_trailing_share_window() {
        let mut transactions = sample();
        transactions.push(tx("T6", "A4", "M1", Some("D2"), 9.0, 20, false));

        let full = shared_pairs(&transactions, ShareWindow::FullHistory);
        assert_eq!(full.len(), 4, "D1 and D2 are both shared over the full history");

        let recent = shared_pairs(&transactions, ShareWindow::Trailing { days: 17 });
        // cutoff is day 3: only T3 (A1/D1), T4 (A3/D2) and T6 (A4/D2) remain
        let ids: Vec<(&str, &str)> = recent.iter().map(|p| (p.account_id.as_str(), p.device_id.as_str())).collect();
        assert_eq!(ids, vec![("A3", "D2"), ("A4", "D2")]);
    }

    #[test]
    fn test_unindexed_endpoint_fails() {
        let transactions = sample();
        let tables = extract_entities(&transactions, &EntityListings::none()).unwrap();
        let index = IdentifierIndex::build(&tables);

        let mut extra = transactions.clone();
        extra.push(tx("T9", "A1", "M_unknown", None, 1.0, 6, false));
        let err = assemble(&tables, &index, &extra, &AssemblerConfig::default()).unwrap_err();
        assert!(matches!(err, GraphError::UnknownIdentifier { node_type: NodeType::Merchant, .. }));
    }

    #[test]
    fn test_validate_detects_dangling_edges() {
        let mut graph = build(&sample(), &AssemblerConfig::default());
        graph.edges.uses.forward.edge_index[[1, 0]] = 99;
        assert!(matches!(graph.validate(), Err(GraphError::InconsistentGraph(_))));
    }

    #[test]
    fn test_reverse_indices_point_back_to_accounts() {
        let graph = build(&sample(), &AssemblerConfig::default());

        let transactions = graph.relation(EdgeType::TransactsWith);
        assert_eq!(transactions.reverse_name(), "rev_transacts_with");
        assert_eq!(transactions.reverse_index.row(0), transactions.forward.targets());
        assert_eq!(transactions.reverse_index.row(1), transactions.forward.sources());
        assert_eq!(transactions.num_edges(), 5, "reverse index is not counted as edges");

        let uses = graph.relation(EdgeType::Uses);
        assert_eq!(uses.reverse_name(), "used_by");
        assert_eq!(uses.reverse_index.row(0).to_vec(), vec![0, 0, 0, 1]);
        assert_eq!(uses.reverse_index.row(1).to_vec(), vec![0, 1, 0, 2]);

        let shares = graph.relation(EdgeType::Shares);
        assert_eq!(shares.reverse_index, shares.reverse.as_ref().unwrap().edge_index);
    }

    #[test]
    fn test_validate_detects_stale_reverse_index() {
        let mut graph = build(&sample(), &AssemblerConfig::default());
        graph.edges.transacts_with.reverse_index[[1, 0]] = 2;
        assert!(matches!(graph.validate(), Err(GraphError::InconsistentGraph(_))));
    }

    #[test]
    fn test_oversized_share_window_covers_full_history() {
        let mut transactions = sample();
        transactions.push(tx("T6", "A4", "M1", Some("D2"), 9.0, 20, false));
        let full = shared_pairs(&transactions, ShareWindow::FullHistory);

        for days in [1_000_000_000, i64::MAX] {
            assert_eq!(shared_pairs(&transactions, ShareWindow::Trailing { days }), full);
        }

        let config = AssemblerConfig {
            clip: DEFAULT_CLIP,
            share_window: ShareWindow::Trailing { days: 1_000_000_000 },
        };
        let graph = build(&transactions, &config);
        assert_eq!(graph.relation(EdgeType::Shares).forward.len(), full.len());
    }

    #[test]
    fn test_invalid_assembler_config() {
        let transactions = sample();
        let tables = extract_entities(&transactions, &EntityListings::none()).unwrap();
        let index = IdentifierIndex::build(&tables);

        let negative = AssemblerConfig {
            clip: DEFAULT_CLIP,
            share_window: ShareWindow::Trailing { days: -1 },
        };
        let no_clip = AssemblerConfig {
            clip: f64::NAN,
            ..AssemblerConfig::default()
        };
        for config in [negative, no_clip] {
            let err = assemble(&tables, &index, &transactions, &config).unwrap_err();
            assert!(matches!(err, GraphError::InvalidConfig(_)));
        }
    }

    #[test]
    fn test_empty_snapshot() {
        let graph = build(&[], &AssemblerConfig::default());
        assert_eq!(graph.num_nodes(NodeType::Account), 0);
        assert_eq!(graph.relation(EdgeType::Shares).num_edges(), 0);
        assert_eq!(graph.relation(EdgeType::TransactsWith).forward.features.dim(), (0, 3));
    }
}
