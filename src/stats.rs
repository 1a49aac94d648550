// Summary statistics of an assembled graph, persisted next to the artifact.
use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assembler::HeteroGraph;
use crate::normalizer::ColumnStats;
use crate::schema::{EdgeType, NodeType, PerEdge, PerNode};
use crate::split::SplitMasks;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitCounts {
    pub train: usize,
    pub val: usize,
    pub test: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub num_nodes: PerNode<usize>,
    /// Directed edges per relation; `shares` counts both directions
    pub num_edges: PerEdge<usize>,
    pub fraud_edges: usize,
    /// Fraction of `transacts_with` edges labelled fraudulent
    pub edge_fraud_rate: f64,
    pub fraud_accounts: usize,
    pub connected_components: usize,
    pub split: SplitCounts,
    pub node_normalization: PerNode<Vec<ColumnStats>>,
    pub edge_normalization: PerEdge<Vec<ColumnStats>>,
}

impl GraphStats {
    pub fn compute(graph: &HeteroGraph, masks: &SplitMasks) -> Self {
        let transactions = &graph.relation(EdgeType::TransactsWith).forward;
        let labelled = transactions.labels.as_ref().map_or(0, |l| l.len());
        let fraud_edges = transactions
            .labels
            .as_ref()
            .map_or(0, |l| l.iter().filter(|&&y| y == 1).count());
        let (train, val, test) = masks.counts();

        Self {
            num_nodes: graph.nodes.map(|_, n| n.len()),
            num_edges: graph.edges.map(|_, r| r.num_edges()),
            fraud_edges,
            edge_fraud_rate: if labelled > 0 { fraud_edges as f64 / labelled as f64 } else { 0.0 },
            fraud_accounts: graph.account_labels.iter().filter(|&&y| y == 1).count(),
            connected_components: connected_components(&structure(graph)),
            split: SplitCounts { train, val, test },
            node_normalization: graph.nodes.map(|_, n| n.normalizer.columns().to_vec()),
            edge_normalization: graph.edges.map(|_, r| r.normalizer.columns().to_vec()),
        }
    }

    pub fn log(&self) {
        info!("Graph statistics");
        for (node_type, count) in self.num_nodes.iter() {
            info!("  {} nodes: {}", node_type, count);
        }
        for (edge_type, count) in self.num_edges.iter() {
            info!("  {} edges: {}", edge_type, count);
        }
        info!("  fraudulent accounts: {}", self.fraud_accounts);
        info!(
            "  transaction fraud rate: {:.4}% ({} edges)",
            self.edge_fraud_rate * 100.0,
            self.fraud_edges
        );
        info!("  connected components: {}", self.connected_components);
        info!(
            "  split: train {}, val {}, test {}",
            self.split.train, self.split.val, self.split.test
        );
    }
}

/// Undirected structural view of the graph: one node per entity, one edge per
/// forward edge of every relation.
pub fn structure(graph: &HeteroGraph) -> UnGraph<(NodeType, usize), EdgeType> {
    let total_nodes: usize = graph.nodes.iter().map(|(_, n)| n.len()).sum();
    let total_edges: usize = graph.edges.iter().map(|(_, r)| r.forward.len()).sum();
    let mut view = UnGraph::with_capacity(total_nodes, total_edges);

    let handles: PerNode<Vec<NodeIndex>> = graph
        .nodes
        .map(|node_type, store| (0..store.len()).map(|i| view.add_node((node_type, i))).collect());

    for (edge_type, relation) in graph.edges.iter() {
        let edges = &relation.forward;
        let sources = handles.get(edges.source_type);
        let targets = handles.get(edges.target_type);
        for (&src, &dst) in edges.sources().iter().zip(edges.targets().iter()) {
            view.add_edge(sources[src], targets[dst], edge_type);
        }
    }

    view
}
