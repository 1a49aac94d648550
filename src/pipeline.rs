// Runs the construction stages in order for one transaction snapshot.
use tracing::info;

use crate::assembler::{assemble, AssemblerConfig};
use crate::config::AppConfig;
use crate::csv_reader::TransactionRecord;
use crate::entities::{extract_entities, EntityListings};
use crate::error::Result;
use crate::indexer::IdentifierIndex;
use crate::serializer::{GraphArtifact, GraphStore};
use crate::split::{split_accounts, SplitConfig};
use crate::stats::GraphStats;

#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    assembler: AssemblerConfig,
    split: SplitConfig,
}

impl GraphBuilder {
    pub fn new(assembler: AssemblerConfig, split: SplitConfig) -> Self {
        Self { assembler, split }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.assembler(), config.split)
    }

    /// Build the full artifact. Any stage failure discards everything built so far.
    pub fn build(&self, transactions: &[TransactionRecord], listings: &EntityListings) -> Result<GraphArtifact> {
        self.split.validate()?;

        info!("Extracting entities from {} transactions", transactions.len());
        let tables = extract_entities(transactions, listings)?;

        let index = IdentifierIndex::build(&tables);
        let counts = index.counts();
        info!(
            "Indexed {} accounts, {} merchants, {} devices",
            counts.account, counts.merchant, counts.device
        );

        info!("Assembling heterogeneous graph");
        let graph = assemble(&tables, &index, transactions, &self.assembler)?;

        info!(
            "Splitting accounts (val {:.2}, test {:.2}, seed {})",
            self.split.val_fraction,
            self.split.test_fraction,
            self.split.seed()
        );
        let split = split_accounts(&graph, &self.split)?;

        let stats = GraphStats::compute(&graph, &split);
        stats.log();

        Ok(GraphArtifact {
            graph,
            index,
            split,
            stats,
        })
    }

    /// Build and hand the artifact to `store`.
    pub fn build_into<S: GraphStore + ?Sized>(
        &self,
        transactions: &[TransactionRecord],
        listings: &EntityListings,
        store: &S,
    ) -> Result<GraphArtifact> {
        let artifact = self.build(transactions, listings)?;
        store.save(&artifact)?;
        Ok(artifact)
    }
}
