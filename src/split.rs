//! Train/validation/test partition over account nodes.

use std::collections::BTreeMap;

use linfa::DatasetBase;
use ndarray::{Array1, Array2, Axis};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assembler::HeteroGraph;
use crate::error::{GraphError, Result};

pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    pub val_fraction: f64,
    pub test_fraction: f64,
    #[serde(default)]
    pub seed: Option<u64>,
    /// Partition each account class separately
    #[serde(default)]
    pub stratify: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            val_fraction: 0.15,
            test_fraction: 0.15,
            seed: None,
            stratify: false,
        }
    }
}

impl SplitConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, fraction) in [("validation", self.val_fraction), ("test", self.test_fraction)] {
            if !fraction.is_finite() || fraction < 0.0 {
                return Err(GraphError::InvalidSplit(format!(
                    "{} fraction {} must be a finite non-negative number",
                    name, fraction
                )));
            }
        }
        if self.val_fraction + self.test_fraction >= 1.0 {
            return Err(GraphError::InvalidSplit(format!(
                "validation + test fractions ({} + {}) leave no training nodes",
                self.val_fraction, self.test_fraction
            )));
        }
        Ok(())
    }

    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }
}

/// Disjoint membership masks over account indices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitMasks {
    pub train: Array1<bool>,
    pub val: Array1<bool>,
    pub test: Array1<bool>,
    pub seed: u64,
}

impl SplitMasks {
    fn empty(n: usize, seed: u64) -> Self {
        Self {
            train: Array1::from_elem(n, false),
            val: Array1::from_elem(n, false),
            test: Array1::from_elem(n, false),
            seed,
        }
    }

    pub fn len(&self) -> usize {
        self.train.len()
    }

    pub fn is_empty(&self) -> bool {
        self.train.is_empty()
    }

    pub fn counts(&self) -> (usize, usize, usize) {
        let count = |mask: &Array1<bool>| mask.iter().filter(|&&m| m).count();
        (count(&self.train), count(&self.val), count(&self.test))
    }

    /// Every index belongs to exactly one mask
    pub fn is_partition(&self) -> bool {
        self.val.len() == self.len()
            && self.test.len() == self.len()
            && (0..self.len()).all(|i| {
                [self.train[i], self.val[i], self.test[i]]
                    .iter()
                    .filter(|&&m| m)
                    .count()
                    == 1
            })
    }

    // Assign a shuffled slice: validation first, then test, train takes the rest.
    fn carve(&mut self, shuffled: &[usize], config: &SplitConfig) {
        let n = shuffled.len();
        let n_val = share(n, config.val_fraction);
        let n_test = share(n, config.test_fraction).min(n - n_val);

        for (position, &node) in shuffled.iter().enumerate() {
            if position < n_val {
                self.val[node] = true;
            } else if position < n_val + n_test {
                self.test[node] = true;
            } else {
                self.train[node] = true;
            }
        }
    }

    /// Account features and labels of each split as linfa datasets.
    pub fn datasets(&self, graph: &HeteroGraph) -> Result<SplitDatasets> {
        let features = &graph.nodes.account.features;
        if features.nrows() != self.len() {
            return Err(GraphError::InconsistentGraph(format!(
                "split covers {} accounts but the graph has {}",
                self.len(),
                features.nrows()
            )));
        }

        let select = |mask: &Array1<bool>| {
            let rows: Vec<usize> = mask.iter().enumerate().filter(|(_, &m)| m).map(|(i, _)| i).collect();
            let targets: Array1<usize> = rows.iter().map(|&i| graph.account_labels[i] as usize).collect();
            DatasetBase::new(features.select(Axis(0), &rows), targets)
        };

        Ok(SplitDatasets {
            train: select(&self.train),
            val: select(&self.val),
            test: select(&self.test),
        })
    }
}

pub type AccountDataset = DatasetBase<Array2<f64>, Array1<usize>>;

/// Per-split account datasets for tabular consumers
pub struct SplitDatasets {
    pub train: AccountDataset,
    pub val: AccountDataset,
    pub test: AccountDataset,
}

fn share(n: usize, fraction: f64) -> usize {
    ((n as f64 * fraction).round() as usize).min(n)
}

fn shuffled(mut indices: Vec<usize>, rng: &mut ChaCha8Rng) -> Vec<usize> {
    indices.shuffle(rng);
    indices
}

/// Random partition of `num_accounts` indices.
pub fn partition(num_accounts: usize, config: &SplitConfig) -> Result<SplitMasks> {
    config.validate()?;
    if num_accounts == 0 {
        return Err(GraphError::InvalidSplit("there are no account nodes to split".to_string()));
    }

    let seed = config.seed();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut masks = SplitMasks::empty(num_accounts, seed);
    masks.carve(&shuffled((0..num_accounts).collect(), &mut rng), config);
    Ok(masks)
}

/// Partition each label class separately so every split keeps the class mix.
pub fn partition_stratified(labels: &Array1<u8>, config: &SplitConfig) -> Result<SplitMasks> {
    config.validate()?;
    if labels.is_empty() {
        return Err(GraphError::InvalidSplit("there are no account nodes to split".to_string()));
    }

    let mut classes: BTreeMap<u8, Vec<usize>> = BTreeMap::new();
    for (i, &label) in labels.iter().enumerate() {
        classes.entry(label).or_default().push(i);
    }

    let seed = config.seed();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut masks = SplitMasks::empty(labels.len(), seed);
    for members in classes.into_values() {
        masks.carve(&shuffled(members, &mut rng), config);
    }
    Ok(masks)
}

/// Split the graph's account nodes according to `config`.
pub fn split_accounts(graph: &HeteroGraph, config: &SplitConfig) -> Result<SplitMasks> {
    let masks = if config.stratify {
        partition_stratified(&graph.account_labels, config)?
    } else {
        partition(graph.account_labels.len(), config)?
    };

    for (name, mask) in [("train", &masks.train), ("val", &masks.val), ("test", &masks.test)] {
        let total = mask.iter().filter(|&&m| m).count();
        let fraud = mask
            .iter()
            .zip(graph.account_labels.iter())
            .filter(|(&m, &y)| m && y == 1)
            .count();
        let rate = if total > 0 { fraud as f64 / total as f64 * 100.0 } else { 0.0 };
        info!("  {}: {} accounts ({} fraud, {:.2}%)", name, total, fraud, rate);
    }

    Ok(masks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(val: f64, test: f64, seed: u64) -> SplitConfig {
        SplitConfig {
            val_fraction: val,
            test_fraction: test,
            seed: Some(seed),
            stratify: false,
        }
    }

    #[test]
    fn test_split_sizes() {
        let masks = partition(100, &config(0.15, 0.15, 7)).unwrap();
        assert_eq!(masks.counts(), (70, 15, 15));
        assert!(masks.is_partition());
    }

    #[test]
    fn test_split_is_reproducible() {
        let a = partition(250, &config(0.2, 0.1, 99)).unwrap();
        let b = partition(250, &config(0.2, 0.1, 99)).unwrap();
        let c = partition(250, &config(0.2, 0.1, 100)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a.val, c.val);
    }

    #[test]
    fn test_default_seed_is_used() {
        let masks = partition(10, &SplitConfig::default()).unwrap();
        assert_eq!(masks.seed, DEFAULT_SEED);
    }

    #[test]
    fn test_rounding_stays_within_one_node() {
        for n in 1..60 {
            let masks = partition(n, &config(0.15, 0.15, 3)).unwrap();
            let (train, val, test) = masks.counts();
            assert_eq!(train + val + test, n);
            assert!((val as f64 - n as f64 * 0.15).abs() <= 1.0);
            assert!((test as f64 - n as f64 * 0.15).abs() <= 1.0);
            assert!(masks.is_partition());
        }
    }

    #[test]
    fn test_invalid_fractions() {
        assert!(matches!(partition(10, &config(0.5, 0.5, 1)), Err(GraphError::InvalidSplit(_))));
        assert!(matches!(partition(10, &config(-0.1, 0.2, 1)), Err(GraphError::InvalidSplit(_))));
        assert!(matches!(partition(10, &config(f64::NAN, 0.2, 1)), Err(GraphError::InvalidSplit(_))));
        assert!(matches!(partition(0, &config(0.1, 0.1, 1)), Err(GraphError::InvalidSplit(_))));
    }

    #[test]
    fn test_stratified_keeps_class_mix() {
        let labels: Array1<u8> = (0..200).map(|i| u8::from(i % 10 == 0)).collect();
        let masks = partition_stratified(&labels, &config(0.15, 0.15, 11)).unwrap();
        assert!(masks.is_partition());

        let fraud_in = |mask: &Array1<bool>| {
            mask.iter().zip(labels.iter()).filter(|(&m, &y)| m && y == 1).count()
        };
        // 20 fraud accounts: 3 val, 3 test, 14 train
        assert_eq!(fraud_in(&masks.val), 3);
        assert_eq!(fraud_in(&masks.test), 3);
        assert_eq!(fraud_in(&masks.train), 14);
        assert_eq!(masks.counts(), (140, 30, 30));
    }
}
