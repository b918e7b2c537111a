//! Purged, embargoed k-fold cross-validation for ordered data.
//!
//! Plain k-fold assumes independent samples; rows of a time series near a
//! fold boundary can share information through overlapping feature windows
//! or serially correlated labels, which makes naive cross-validation
//! optimistic. `PurgedKFold` keeps the folds contiguous and in time order,
//! purges training rows within a configurable distance of each fold
//! boundary, and embargoes a fraction of rows after each fold so that
//! neither set sees them.

pub mod config;
pub mod error;
pub mod features;
pub mod splitters;

pub use error::PurgefoldError;
pub use splitters::{DataSplitter, FoldIndices, PurgedKFold, SplitConfig};
