pub mod base;
pub mod purged;
pub mod types;

pub use base::DataSplitter;
pub use purged::{LabelFolds, PositionFolds, PurgedKFold};
pub use types::{DataSplit, FoldIndices, SplitConfig, TimeSpan};
