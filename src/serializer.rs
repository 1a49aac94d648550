//! Persistence of a finished construction run.
//!
//! A [`GraphArtifact`] bundles everything a consumer needs to train on the
//! graph without rebuilding it. [`GraphStore`] is the seam to whatever holds
//! the bytes.

use std::fs;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::assembler::HeteroGraph;
use crate::error::{GraphError, Result};
use crate::indexer::IdentifierIndex;
use crate::schema::NodeType;
use crate::split::SplitMasks;
use crate::stats::GraphStats;

pub const ARTIFACT_FILE: &str = "fraud_graph.bin";
pub const STATS_FILE: &str = "graph_stats.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphArtifact {
    pub graph: HeteroGraph,
    pub index: IdentifierIndex,
    pub split: SplitMasks,
    pub stats: GraphStats,
}

impl GraphArtifact {
    /// Check the graph and that the index and split describe the same nodes.
    pub fn validate(&self) -> Result<()> {
        self.graph.validate()?;

        for (node_type, store) in self.graph.nodes.iter() {
            if self.index.len(node_type) != store.len() {
                return Err(GraphError::InconsistentGraph(format!(
                    "{} {} identifiers for {} nodes",
                    self.index.len(node_type),
                    node_type,
                    store.len()
                )));
            }
        }

        let accounts = self.graph.num_nodes(NodeType::Account);
        if self.split.len() != accounts {
            return Err(GraphError::InconsistentGraph(format!(
                "split covers {} accounts but the graph has {}",
                self.split.len(),
                accounts
            )));
        }
        if !self.split.is_partition() {
            return Err(GraphError::InconsistentGraph(
                "split masks overlap or leave accounts unassigned".to_string(),
            ));
        }
        Ok(())
    }
}

pub trait GraphStore {
    fn save(&self, artifact: &GraphArtifact) -> Result<()>;
    fn load(&self) -> Result<GraphArtifact>;
}

/// Artifact as bincode in a directory, with a pretty-printed JSON stats file
/// next to it.
#[derive(Debug, Clone)]
pub struct BincodeStore {
    dir: PathBuf,
}

impl BincodeStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn artifact_path(&self) -> PathBuf {
        self.dir.join(ARTIFACT_FILE)
    }

    pub fn stats_path(&self) -> PathBuf {
        self.dir.join(STATS_FILE)
    }

    /// Read only the statistics sidecar.
    pub fn load_stats(&self) -> Result<GraphStats> {
        let file = fs::File::open(self.stats_path())?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

impl GraphStore for BincodeStore {
    fn save(&self, artifact: &GraphArtifact) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let path = self.artifact_path();
        let mut writer = BufWriter::new(fs::File::create(&path)?);
        bincode::serialize_into(&mut writer, artifact)?;
        writer.flush()?;
        info!("Graph artifact written to {}", path.display());

        let stats_path = self.stats_path();
        fs::write(&stats_path, serde_json::to_string_pretty(&artifact.stats)?)?;
        debug!("Statistics written to {}", stats_path.display());
        Ok(())
    }

    fn load(&self) -> Result<GraphArtifact> {
        let path = self.artifact_path();
        let reader = BufReader::new(fs::File::open(&path)?);
        let artifact: GraphArtifact = bincode::deserialize_from(reader)?;
        artifact.validate()?;
        info!("Graph artifact loaded from {}", path.display());
        Ok(artifact)
    }
}

/// In-process store holding the encoded artifact.
#[derive(Debug, Default)]
pub struct MemoryStore {
    bytes: Mutex<Option<Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.lock().map_or(true, |b| b.is_none())
    }
}

fn poisoned() -> GraphError {
    GraphError::Io(io::Error::new(io::ErrorKind::Other, "memory store lock poisoned"))
}

impl GraphStore for MemoryStore {
    fn save(&self, artifact: &GraphArtifact) -> Result<()> {
        let encoded = bincode::serialize(artifact)?;
        *self.bytes.lock().map_err(|_| poisoned())? = Some(encoded);
        Ok(())
    }

    fn load(&self) -> Result<GraphArtifact> {
        let guard = self.bytes.lock().map_err(|_| poisoned())?;
        let bytes = guard
            .as_ref()
            .ok_or_else(|| GraphError::Io(io::Error::new(io::ErrorKind::NotFound, "no graph artifact saved")))?;
        let artifact: GraphArtifact = bincode::deserialize(bytes)?;
        artifact.validate()?;
        Ok(artifact)
    }
}
