use polars::prelude::*;
use purgefold::features::{BarWindower, WindowConfig};

fn sample_bars() -> DataFrame {
    df! {
        "date" => &["12/23/1991", "12/24/1991", "12/25/1991"],
        "open" => &[0.0, 1.0, 2.0],
        "close" => &[10.0, 11.0, 12.0],
    }
    .unwrap()
}

fn windower(bars: usize) -> BarWindower {
    BarWindower::new(WindowConfig {
        bars,
        columns: vec!["open".to_string(), "close".to_string()],
        datetime_col: "date".to_string(),
    })
}

#[test]
fn test_lookback_keeps_latest_timestamp() {
    let out = windower(2).shift_past(&sample_bars()).unwrap();
    let expected = df! {
        "date" => &["12/25/1991"],
        "open2" => &[0.0],
        "close2" => &[10.0],
        "open1" => &[1.0],
        "close1" => &[11.0],
        "open0" => &[2.0],
        "close0" => &[12.0],
    }
    .unwrap();
    assert!(out.equals(&expected));
}

#[test]
fn test_lookforward_keeps_earliest_timestamp() {
    let out = windower(2).shift_future(&sample_bars()).unwrap();
    let expected = df! {
        "date" => &["12/23/1991"],
        "open0" => &[0.0],
        "close0" => &[10.0],
        "open1" => &[1.0],
        "close1" => &[11.0],
        "open2" => &[2.0],
        "close2" => &[12.0],
    }
    .unwrap();
    assert!(out.equals(&expected));
}

#[test]
fn test_lookback_aligns_rows() {
    let df = df! {
        "date" => &["d1", "d2", "d3", "d4"],
        "close" => &[10.0, 11.0, 12.0, 13.0],
    }
    .unwrap();

    let w = BarWindower::new(WindowConfig {
        bars: 1,
        columns: vec!["close".to_string()],
        datetime_col: "date".to_string(),
    });
    let out = w.shift_past(&df).unwrap();

    let expected = df! {
        "date" => &["d2", "d3", "d4"],
        "close1" => &[10.0, 11.0, 12.0],
        "close0" => &[11.0, 12.0, 13.0],
    }
    .unwrap();
    assert!(out.equals(&expected));
}

#[test]
fn test_short_table_yields_empty_frame() {
    let out = windower(5).shift_past(&sample_bars()).unwrap();
    assert_eq!(out.height(), 0);
    // Schema is intact: date plus 6 offsets of each of the two columns.
    assert_eq!(out.width(), 13);
}

#[test]
fn test_zero_bars_copies_columns() {
    let out = windower(0).shift_past(&sample_bars()).unwrap();
    assert_eq!(out.height(), 3);
    let names: Vec<&str> = out.get_column_names().iter().map(|s| s.as_str()).collect();
    assert_eq!(names, vec!["date", "open0", "close0"]);
}

#[test]
fn test_missing_column_is_an_error() {
    let w = BarWindower::new(WindowConfig {
        bars: 1,
        columns: vec!["volume".to_string()],
        datetime_col: "date".to_string(),
    });
    assert!(w.shift_past(&sample_bars()).is_err());
}
