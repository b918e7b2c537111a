use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ConfigSection;
use crate::error::{PurgefoldError, Result};

/// Configuration for windowed bar features
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    pub bars: usize,          // rows pulled into each output row besides its own
    pub columns: Vec<String>, // value columns to shift
    pub datetime_col: String, // timestamp column kept as the row key
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            bars: 2,
            columns: vec!["open".to_string(), "close".to_string()],
            datetime_col: "timestamp".to_string(),
        }
    }
}

impl ConfigSection for WindowConfig {
    fn section_name() -> &'static str {
        "window"
    }

    fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(PurgefoldError::Configuration(
                "window features need at least one column".to_string(),
            ));
        }
        if self.datetime_col.is_empty() {
            return Err(PurgefoldError::Configuration(
                "datetime_col must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builds flat look-back/look-forward feature rows from an ordered bar
/// table. Pure reshaping: each retained timestamp gets `bars + 1` copies
/// of every configured column, suffixed with the bar offset. Timestamps
/// without enough neighboring rows are dropped; no other filtering.
pub struct BarWindower {
    config: WindowConfig,
}

enum Direction {
    Past,
    Future,
}

impl BarWindower {
    pub fn new(config: WindowConfig) -> Self {
        Self { config }
    }

    /// Look-back rows: the row at each retained timestamp carries its own
    /// values (suffix 0) plus the values of the `bars` preceding rows,
    /// suffixed by age. Oldest offset comes first in the output schema.
    pub fn shift_past(&self, data: &DataFrame) -> Result<DataFrame> {
        self.shifted(data, Direction::Past)
    }

    /// Look-forward rows: suffix is the distance ahead, nearest first.
    pub fn shift_future(&self, data: &DataFrame) -> Result<DataFrame> {
        self.shifted(data, Direction::Future)
    }

    fn shifted(&self, data: &DataFrame, direction: Direction) -> Result<DataFrame> {
        let bars = self.config.bars;
        let out_len = data.height().saturating_sub(bars);

        let time_start = match direction {
            Direction::Past => bars as i64,
            Direction::Future => 0,
        };
        let mut columns = vec![data
            .column(&self.config.datetime_col)?
            .slice(time_start, out_len)];

        let offsets: Vec<usize> = match direction {
            Direction::Past => (0..=bars).rev().collect(),
            Direction::Future => (0..=bars).collect(),
        };

        for offset in offsets {
            // An offset of `k` reads `k` rows before (past) or after
            // (future) the retained timestamp.
            let source_start = match direction {
                Direction::Past => (bars - offset) as i64,
                Direction::Future => offset as i64,
            };

            for name in &self.config.columns {
                let shifted = data
                    .column(name)?
                    .slice(source_start, out_len)
                    .with_name(format!("{}{}", name, offset).into());
                columns.push(shifted);
            }
        }

        Ok(DataFrame::new(columns)?)
    }
}
