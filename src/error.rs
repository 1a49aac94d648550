// Error types for graph construction. Every failure aborts the run; the two
// tolerated conditions (constant columns, missing devices) never reach here.
use thiserror::Error;

use crate::schema::NodeType;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("transaction {transaction_id} references {node_type} '{id}' missing from the {node_type} listing")]
    MissingEntity {
        node_type: NodeType,
        id: String,
        transaction_id: String,
    },

    #[error("unknown {node_type} identifier '{id}'")]
    UnknownIdentifier { node_type: NodeType, id: String },

    #[error("feature column '{column}' is not available on {source_kind} records")]
    MissingFeature {
        column: String,
        source_kind: &'static str,
    },

    #[error("invalid split: {0}")]
    InvalidSplit(String),

    #[error("invalid record {record}: {reason}")]
    InvalidRecord { record: String, reason: String },

    #[error("invalid construction setting: {0}")]
    InvalidConfig(String),

    #[error("inconsistent graph: {0}")]
    InconsistentGraph(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("artifact encoding error: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("statistics encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GraphError {
    pub(crate) fn invalid_record(record: impl Into<String>, reason: impl Into<String>) -> Self {
        GraphError::InvalidRecord {
            record: record.into(),
            reason: reason.into(),
        }
    }
}
