use polars::prelude::*;

use super::types::{DataSplit, SplitConfig};
use crate::error::Result;

pub trait DataSplitter: Send + Sync {
    /// Split data into per-fold training/evaluation frames
    fn split(&self, data: &DataFrame) -> Result<Vec<DataSplit>>;

    /// Get splitter configuration
    fn config(&self) -> &SplitConfig;
}
