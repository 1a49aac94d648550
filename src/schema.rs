//! Node and edge type definitions for the fraud graph.
//!
//! The graph is closed over three node types and three relations. Per-type
//! data lives in [`PerNode`] and [`PerEdge`] so every type is always present.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::normalizer::{ColumnKind, ColumnSpec, Scaling};

/// Entity categories represented as graph nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    Account,
    Merchant,
    Device,
}

impl NodeType {
    pub fn all() -> [NodeType; 3] {
        [NodeType::Account, NodeType::Merchant, NodeType::Device]
    }

    /// Feature columns in matrix order
    pub fn feature_columns(&self) -> &'static [ColumnSpec] {
        match self {
            NodeType::Account => ACCOUNT_COLUMNS,
            NodeType::Merchant => MERCHANT_COLUMNS,
            NodeType::Device => DEVICE_COLUMNS,
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeType::Account => write!(f, "account"),
            NodeType::Merchant => write!(f, "merchant"),
            NodeType::Device => write!(f, "device"),
        }
    }
}

/// Typed relations between node types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeType {
    /// Account pays merchant, one edge per transaction
    TransactsWith,
    /// Account transacts from device, one edge per transaction
    Uses,
    /// Account shares a device with other accounts (undirected)
    Shares,
}

impl EdgeType {
    pub fn all() -> [EdgeType; 3] {
        [EdgeType::TransactsWith, EdgeType::Uses, EdgeType::Shares]
    }

    pub fn source_type(&self) -> NodeType {
        NodeType::Account
    }

    pub fn target_type(&self) -> NodeType {
        match self {
            EdgeType::TransactsWith => NodeType::Merchant,
            EdgeType::Uses | EdgeType::Shares => NodeType::Device,
        }
    }

    /// Bidirectional relations are stored as a forward and a reverse edge set
    pub fn is_bidirectional(&self) -> bool {
        matches!(self, EdgeType::Shares)
    }

    /// Only transaction edges carry a fraud label
    pub fn has_labels(&self) -> bool {
        matches!(self, EdgeType::TransactsWith)
    }

    /// Name of the target -> source direction
    pub fn reverse_name(&self) -> &'static str {
        match self {
            EdgeType::TransactsWith => "rev_transacts_with",
            EdgeType::Uses => "used_by",
            EdgeType::Shares => "shared_by",
        }
    }

    pub fn feature_columns(&self) -> &'static [ColumnSpec] {
        match self {
            EdgeType::TransactsWith => TRANSACTS_WITH_COLUMNS,
            EdgeType::Uses => USES_COLUMNS,
            EdgeType::Shares => SHARES_COLUMNS,
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeType::TransactsWith => write!(f, "transacts_with"),
            EdgeType::Uses => write!(f, "uses"),
            EdgeType::Shares => write!(f, "shares"),
        }
    }
}

const LINEAR: ColumnKind = ColumnKind::Continuous(Scaling::Linear);
const LOG: ColumnKind = ColumnKind::Continuous(Scaling::LogCompress);

pub const ACCOUNT_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("risk_score", LINEAR),
    ColumnSpec::new("total_transactions", LOG),
    ColumnSpec::new("total_amount", LOG),
    ColumnSpec::new("account_age_days", LOG),
    ColumnSpec::new("fraud_flag", ColumnKind::Categorical),
];

pub const MERCHANT_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("fraud_rate", LINEAR),
    ColumnSpec::new("total_transactions", LOG),
    ColumnSpec::new("avg_transaction_amount", LOG),
    ColumnSpec::new("risk_level_encoded", ColumnKind::Categorical),
];

pub const DEVICE_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("fraud_rate", LINEAR),
    ColumnSpec::new("total_users", LOG),
    ColumnSpec::new("total_transactions", LOG),
    ColumnSpec::new("is_shared", ColumnKind::Categorical),
    ColumnSpec::new("risk_score", LINEAR),
];

pub const TRANSACTS_WITH_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("amount", LOG),
    ColumnSpec::new("hour_of_day", LINEAR),
    ColumnSpec::new("day_of_week", LINEAR),
];

pub const USES_COLUMNS: &[ColumnSpec] = &[ColumnSpec::new("amount", LOG)];

pub const SHARES_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("transaction_count", LOG),
    ColumnSpec::new("fraud_count", LOG),
];

/// One value per node type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerNode<T> {
    pub account: T,
    pub merchant: T,
    pub device: T,
}

impl<T> PerNode<T> {
    pub fn get(&self, node_type: NodeType) -> &T {
        match node_type {
            NodeType::Account => &self.account,
            NodeType::Merchant => &self.merchant,
            NodeType::Device => &self.device,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeType, &T)> {
        NodeType::all().into_iter().map(move |t| (t, self.get(t)))
    }

    pub fn map<U, F: FnMut(NodeType, &T) -> U>(&self, mut f: F) -> PerNode<U> {
        PerNode {
            account: f(NodeType::Account, &self.account),
            merchant: f(NodeType::Merchant, &self.merchant),
            device: f(NodeType::Device, &self.device),
        }
    }
}

/// One value per edge relation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerEdge<T> {
    pub transacts_with: T,
    pub uses: T,
    pub shares: T,
}

impl<T> PerEdge<T> {
    pub fn get(&self, edge_type: EdgeType) -> &T {
        match edge_type {
            EdgeType::TransactsWith => &self.transacts_with,
            EdgeType::Uses => &self.uses,
            EdgeType::Shares => &self.shares,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (EdgeType, &T)> {
        EdgeType::all().into_iter().map(move |t| (t, self.get(t)))
    }

    pub fn map<U, F: FnMut(EdgeType, &T) -> U>(&self, mut f: F) -> PerEdge<U> {
        PerEdge {
            transacts_with: f(EdgeType::TransactsWith, &self.transacts_with),
            uses: f(EdgeType::Uses, &self.uses),
            shares: f(EdgeType::Shares, &self.shares),
        }
    }
}
