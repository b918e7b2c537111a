use chrono::{DateTime, Utc};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ConfigSection;
use crate::error::{PurgefoldError, Result};

/// Configuration for purged k-fold splitting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    pub n_splits: usize,   // number of folds (k)
    pub n_overlaps: usize, // purge width, in rows, at each fold boundary
    pub pct_embargo: f64,  // fraction of rows embargoed after a fold, in [0, 1)
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            n_splits: 3,
            n_overlaps: 0,
            pct_embargo: 0.0,
        }
    }
}

impl ConfigSection for SplitConfig {
    fn section_name() -> &'static str {
        "split"
    }

    fn validate(&self) -> Result<()> {
        if self.n_splits < 2 {
            return Err(PurgefoldError::Configuration(format!(
                "n_splits must be at least 2, got {}",
                self.n_splits
            )));
        }
        if !(0.0..1.0).contains(&self.pct_embargo) {
            return Err(PurgefoldError::Configuration(format!(
                "pct_embargo must be in [0, 1), got {}",
                self.pct_embargo
            )));
        }
        Ok(())
    }
}

/// Row positions of a single fold, ascending within each set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldIndices {
    pub fold: usize,
    pub train: Vec<usize>,
    pub eval: Vec<usize>,
}

/// Time range covered by one side of a split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSpan {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Single frame-level split (training + evaluation sub-frames)
#[derive(Debug, Clone)]
pub struct DataSplit {
    pub train: DataFrame,
    pub eval: DataFrame,
    pub fold_num: usize,
    pub train_span: Option<TimeSpan>,
    pub eval_span: Option<TimeSpan>,
}
