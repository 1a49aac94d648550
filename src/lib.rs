//! Heterogeneous fraud graph construction.
//!
//! Turns a snapshot of payment transactions into a typed graph of accounts,
//! merchants and devices with normalized features, fraud labels and a
//! train/validation/test split over accounts, ready for a graph learner.
//!
//! Stages run in a fixed order: entity extraction, identifier indexing,
//! feature normalization, graph assembly, account split and persistence.
//! [`GraphBuilder`] drives all of them.

pub mod assembler;
pub mod config;
pub mod csv_reader;
pub mod entities;
pub mod error;
pub mod indexer;
pub mod normalizer;
pub mod pipeline;
pub mod schema;
pub mod serializer;
pub mod split;
pub mod stats;


pub use assembler::{AssemblerConfig, EdgeSet, HeteroGraph, NodeStore, Relation, ShareWindow};
pub use crate::config::AppConfig;
pub use csv_reader::TransactionRecord;
pub use entities::{EntityListings, EntityTables};
pub use error::{GraphError, Result};
pub use indexer::IdentifierIndex;
pub use normalizer::FeatureNormalizer;
pub use pipeline::GraphBuilder;
pub use schema::{EdgeType, NodeType, PerEdge, PerNode};
pub use serializer::{BincodeStore, GraphArtifact, GraphStore, MemoryStore};
pub use split::{SplitConfig, SplitMasks};
pub use stats::GraphStats;
