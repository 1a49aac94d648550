//! Column-wise feature normalization.
//!
//! Continuous columns are optionally log-compressed, standardized with
//! population statistics fitted once over the whole record set, and clipped.
//! Categorical columns are copied through untouched.

use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

pub const DEFAULT_CLIP: f64 = 6.0;

// Standard deviations at or below this (relative to the column mean) are
// treated as a constant column.
const DEGENERATE_STD: f64 = 1e-12;

/// Pre-standardization transform for a continuous column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scaling {
    Linear,
    /// `ln(1 + max(x, 0))` before standardizing
    LogCompress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Continuous(Scaling),
    /// Binary flags and small integer codes, never rescaled
    Categorical,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub const fn new(name: &'static str, kind: ColumnKind) -> Self {
        Self { name, kind }
    }
}

/// Records that expose named numeric features
pub trait FeatureSource {
    /// Record kind used in error messages
    const KIND: &'static str;

    fn feature(&self, column: &str) -> Option<f64>;
}

impl<T: FeatureSource> FeatureSource for &T {
    const KIND: &'static str = T::KIND;

    fn feature(&self, column: &str) -> Option<f64> {
        (**self).feature(column)
    }
}

/// Fitted parameters for one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub column: String,
    pub kind: ColumnKind,
    /// Mean after log-compression (if any)
    pub mean: f64,
    /// Divisor applied during standardization; 1.0 for degenerate columns
    pub std: f64,
    pub degenerate: bool,
}

impl ColumnStats {
    fn passthrough(column: &str) -> Self {
        Self {
            column: column.to_string(),
            kind: ColumnKind::Categorical,
            mean: 0.0,
            std: 1.0,
            degenerate: false,
        }
    }
}

/// A normalizer fitted to one node or edge population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureNormalizer {
    columns: Vec<ColumnStats>,
    clip: f64,
}

impl FeatureNormalizer {
    /// Fit column statistics over every record.
    pub fn fit<R: FeatureSource>(records: &[R], specs: &[ColumnSpec], clip: f64) -> Result<Self> {
        let kinds: Vec<(&str, ColumnKind)> = specs.iter().map(|s| (s.name, s.kind)).collect();
        let raw = raw_matrix(records, &kinds)?;

        let columns = specs
            .iter()
            .zip(raw.axis_iter(Axis(1)))
            .map(|(spec, values)| match spec.kind {
                ColumnKind::Categorical => ColumnStats::passthrough(spec.name),
                ColumnKind::Continuous(_) => {
                    let (mean, std, degenerate) = moments(&values.to_vec());
                    ColumnStats {
                        column: spec.name.to_string(),
                        kind: spec.kind,
                        mean,
                        std,
                        degenerate,
                    }
                }
            })
            .collect();

        Ok(Self {
            columns,
            clip: clip.abs(),
        })
    }

    /// Fit and apply in one pass over the same population.
    pub fn fit_transform<R: FeatureSource>(
        records: &[R],
        specs: &[ColumnSpec],
        clip: f64,
    ) -> Result<(Self, Array2<f64>)> {
        let normalizer = Self::fit(records, specs, clip)?;
        let matrix = normalizer.transform(records)?;
        Ok((normalizer, matrix))
    }

    /// Apply the stored statistics. Rows follow the order of `records`.
    pub fn transform<R: FeatureSource>(&self, records: &[R]) -> Result<Array2<f64>> {
        let kinds: Vec<(&str, ColumnKind)> = self
            .columns
            .iter()
            .map(|c| (c.column.as_str(), c.kind))
            .collect();
        let mut matrix = raw_matrix(records, &kinds)?;

        for (stats, mut values) in self.columns.iter().zip(matrix.axis_iter_mut(Axis(1))) {
            if stats.kind == ColumnKind::Categorical {
                continue;
            }
            let clip = self.clip;
            values.mapv_inplace(|x| ((x - stats.mean) / stats.std).clamp(-clip, clip));
        }

        Ok(matrix)
    }

    pub fn columns(&self) -> &[ColumnStats] {
        &self.columns
    }

    pub fn clip(&self) -> f64 {
        self.clip
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

fn log_compress(x: f64) -> f64 {
    x.max(0.0).ln_1p()
}

// Raw feature values with log-compression applied, one row per record.
fn raw_matrix<R: FeatureSource>(records: &[R], columns: &[(&str, ColumnKind)]) -> Result<Array2<f64>> {
    let mut matrix = Array2::zeros((records.len(), columns.len()));

    for (mut row, record) in matrix.axis_iter_mut(Axis(0)).zip(records) {
        for (j, (name, kind)) in columns.iter().enumerate() {
            let value = record.feature(name).ok_or_else(|| GraphError::MissingFeature {
                column: name.to_string(),
                source_kind: R::KIND,
            })?;
            row[j] = match kind {
                ColumnKind::Continuous(Scaling::LogCompress) => log_compress(value),
                _ => value,
            };
        }
    }

    Ok(matrix)
}

// Population mean and standard deviation. Constant and empty columns come
// back as (value, 1.0, true) so they standardize to exactly zero.
fn moments(values: &[f64]) -> (f64, f64, bool) {
    let Some(&first) = values.first() else {
        return (0.0, 1.0, true);
    };
    if values.iter().all(|&v| v == first) {
        return (first, 1.0, true);
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt();

    if !std.is_finite() || std <= DEGENERATE_STD * mean.abs().max(1.0) {
        (mean, 1.0, true)
    } else {
        (mean, std, false)
    }
}
