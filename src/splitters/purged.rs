use chrono::{DateTime, Utc};
use polars::prelude::*;

use super::base::DataSplitter;
use super::types::{DataSplit, FoldIndices, SplitConfig, TimeSpan};
use crate::config::ConfigSection;
use crate::error::{PurgefoldError, Result};

/// Purged, embargoed k-fold splitter for chronologically ordered rows.
///
/// Rows are partitioned into `n_splits` contiguous folds in time order.
/// Each fold in turn supplies the evaluation set while the remaining rows
/// supply the training set, with two leakage guards applied at the fold
/// boundaries:
///
/// * **purge**: rows within `n_overlaps` of a boundary are removed, so a
///   training row's feature/label window cannot overlap the evaluation
///   window;
/// * **embargo**: a `pct_embargo` fraction of rows trailing each
///   non-final fold is excluded from both sets, buffering forward
///   information leakage.
///
/// Rows consumed by either guard belong to neither set. The splitter is a
/// pure function of its configuration and input; enumerating it twice
/// yields identical results.
pub struct PurgedKFold {
    config: SplitConfig,
}

impl PurgedKFold {
    pub fn new(n_splits: usize, n_overlaps: usize, pct_embargo: f64) -> Result<Self> {
        Self::from_config(SplitConfig {
            n_splits,
            n_overlaps,
            pct_embargo,
        })
    }

    pub fn from_config(config: SplitConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Lazy fold enumeration over row positions `0..n`.
    pub fn split_positions(&self, n: usize) -> Result<PositionFolds> {
        let k = self.config.n_splits;
        if k > n {
            return Err(PurgefoldError::Configuration(format!(
                "cannot split {} rows into {} folds",
                n, k
            )));
        }

        let embargo = embargo_rows(n, self.config.pct_embargo);
        log::debug!(
            "splitting {} rows into {} folds (purge={}, embargo={})",
            n,
            k,
            self.config.n_overlaps,
            embargo
        );

        Ok(PositionFolds {
            bounds: fold_bounds(n, k),
            n,
            purge: self.config.n_overlaps,
            embargo,
            fold: 0,
        })
    }

    /// Lazy fold enumeration over caller identifiers, one per row, already
    /// in time order. Identifiers are returned verbatim; they are never
    /// assumed to be `0..n`.
    pub fn split_labels<'a, L: Clone>(&self, labels: &'a [L]) -> Result<LabelFolds<'a, L>> {
        Ok(LabelFolds {
            inner: self.split_positions(labels.len())?,
            labels,
        })
    }
}

impl DataSplitter for PurgedKFold {
    fn split(&self, data: &DataFrame) -> Result<Vec<DataSplit>> {
        let time_col = detect_datetime_column(data);
        let mut splits = Vec::with_capacity(self.config.n_splits);

        for fold in self.split_positions(data.height())? {
            let (train_span, eval_span) = match time_col {
                Some(name) => (
                    span_of(data, name, &fold.train)?,
                    span_of(data, name, &fold.eval)?,
                ),
                None => (None, None),
            };

            splits.push(DataSplit {
                train: take_rows(data, &fold.train)?,
                eval: take_rows(data, &fold.eval)?,
                fold_num: fold.fold,
                train_span,
                eval_span,
            });
        }

        Ok(splits)
    }

    fn config(&self) -> &SplitConfig {
        &self.config
    }
}

/// Lazy enumeration of `FoldIndices`, fold 0 first.
pub struct PositionFolds {
    bounds: Vec<(usize, usize)>,
    n: usize,
    purge: usize,
    embargo: usize,
    fold: usize,
}

impl Iterator for PositionFolds {
    type Item = FoldIndices;

    fn next(&mut self) -> Option<FoldIndices> {
        let m = self.fold;
        let &(lo, hi) = self.bounds.get(m)?;
        self.fold += 1;

        let (train, eval) = if self.bounds.len() == 2 {
            two_fold_positions(self.n, m, lo, hi, self.purge, self.embargo)
        } else {
            fold_positions(self.n, self.bounds.len(), m, lo, hi, self.purge, self.embargo)
        };

        if train.is_empty() || eval.is_empty() {
            log::warn!(
                "fold {} has an empty {} set (purge={}, embargo={})",
                m,
                if eval.is_empty() { "evaluation" } else { "training" },
                self.purge,
                self.embargo
            );
        }

        Some(FoldIndices {
            fold: m,
            train,
            eval,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.bounds.len() - self.fold;
        (left, Some(left))
    }
}

impl ExactSizeIterator for PositionFolds {}

/// Lazy fold enumeration mapped onto caller identifiers.
pub struct LabelFolds<'a, L> {
    inner: PositionFolds,
    labels: &'a [L],
}

impl<'a, L: Clone> Iterator for LabelFolds<'a, L> {
    type Item = (Vec<L>, Vec<L>);

    fn next(&mut self) -> Option<Self::Item> {
        let fold = self.inner.next()?;
        let pick =
            |positions: &[usize]| -> Vec<L> { positions.iter().map(|&p| self.labels[p].clone()).collect() };
        Some((pick(&fold.train), pick(&fold.eval)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, L: Clone> ExactSizeIterator for LabelFolds<'a, L> {}

/// Contiguous near-equal partition of `0..n` into `k` half-open ranges.
/// The first `n % k` ranges carry the extra row.
fn fold_bounds(n: usize, k: usize) -> Vec<(usize, usize)> {
    let base = n / k;
    let rem = n % k;
    let mut bounds = Vec::with_capacity(k);
    let mut lo = 0;
    for m in 0..k {
        let hi = lo + base + usize::from(m < rem);
        bounds.push((lo, hi));
        lo = hi;
    }
    bounds
}

/// Rows embargoed after each non-final fold. Truncates: a fraction that
/// does not cover a whole row embargoes nothing.
fn embargo_rows(n: usize, pct: f64) -> usize {
    (n as f64 * pct) as usize
}

/// General derivation for three or more folds: the evaluation slice loses
/// its trailing `embargo` rows on non-final folds, and training loses
/// `purge` rows on each boundary side, counted from the original fold
/// bounds. Both windows clamp to the available rows.
fn fold_positions(
    n: usize,
    k: usize,
    m: usize,
    lo: usize,
    hi: usize,
    purge: usize,
    embargo: usize,
) -> (Vec<usize>, Vec<usize>) {
    let last = m + 1 == k;
    let eval_hi = if last {
        hi
    } else {
        hi.saturating_sub(embargo).max(lo)
    };
    let eval: Vec<usize> = (lo..eval_hi).collect();

    let before_end = lo.saturating_sub(purge);
    let after_start = (hi + purge).min(n);
    let train: Vec<usize> = (0..before_end).chain(after_start..n).collect();

    (train, eval)
}

/// With exactly two folds the boundary rows come out of the evaluation
/// slice instead: each fold's edge facing the other fold is trimmed by the
/// purge width and training stays whole. A nonzero embargo claims the
/// first fold's trailing edge itself, pushing the purge back onto
/// training as in the general rule.
fn two_fold_positions(
    n: usize,
    m: usize,
    lo: usize,
    hi: usize,
    purge: usize,
    embargo: usize,
) -> (Vec<usize>, Vec<usize>) {
    if m == 0 {
        let cut = if embargo > 0 { embargo } else { purge };
        let eval: Vec<usize> = (lo..hi.saturating_sub(cut).max(lo)).collect();
        let train_start = if embargo > 0 { (hi + purge).min(n) } else { hi };
        ((train_start..n).collect(), eval)
    } else {
        ((0..lo).collect(), ((lo + purge).min(n)..n).collect())
    }
}

fn take_rows(data: &DataFrame, positions: &[usize]) -> Result<DataFrame> {
    let idx = IdxCa::from_vec(
        PlSmallStr::EMPTY,
        positions.iter().map(|&p| p as IdxSize).collect(),
    );
    Ok(data.take(&idx)?)
}

/// First column carrying a Datetime dtype, if any.
fn detect_datetime_column(data: &DataFrame) -> Option<&str> {
    data.get_columns()
        .iter()
        .find(|c| matches!(c.dtype(), DataType::Datetime(_, _)))
        .map(|c| c.name().as_str())
}

/// Time range of the given rows; `None` when the set is empty.
fn span_of(data: &DataFrame, column: &str, positions: &[usize]) -> Result<Option<TimeSpan>> {
    let (Some(&first), Some(&last)) = (positions.first(), positions.last()) else {
        return Ok(None);
    };

    let times = data.column(column)?.datetime()?;

    Ok(Some(TimeSpan {
        start: datetime_at(times, first)?,
        end: datetime_at(times, last)?,
    }))
}

fn datetime_at(series: &DatetimeChunked, idx: usize) -> Result<DateTime<Utc>> {
    let raw = series.phys.get(idx).ok_or_else(|| {
        PurgefoldError::Validation(format!("cannot read timestamp at row {}", idx))
    })?;

    let parsed = match series.time_unit() {
        TimeUnit::Milliseconds => DateTime::<Utc>::from_timestamp_millis(raw),
        TimeUnit::Microseconds => DateTime::<Utc>::from_timestamp_micros(raw),
        TimeUnit::Nanoseconds => Some(DateTime::<Utc>::from_timestamp_nanos(raw)),
    };

    parsed.ok_or_else(|| PurgefoldError::Validation(format!("invalid timestamp: {}", raw)))
}
