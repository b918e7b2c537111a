use purgefold::config::{AppConfig, ConfigManager, ConfigSection};
use purgefold::splitters::SplitConfig;

fn temp_path(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("purgefold_tests");
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

#[test]
fn test_default_config_validates() {
    AppConfig::default().validate().unwrap();
}

#[test]
fn test_split_config_bounds() {
    let ok = SplitConfig {
        n_splits: 2,
        n_overlaps: 3,
        pct_embargo: 0.99,
    };
    assert!(ok.validate().is_ok());

    let bad_folds = SplitConfig {
        n_splits: 1,
        ..Default::default()
    };
    assert!(bad_folds.validate().is_err());

    let bad_embargo = SplitConfig {
        pct_embargo: 1.0,
        ..Default::default()
    };
    assert!(bad_embargo.validate().is_err());
}

#[test]
fn test_toml_roundtrip() {
    let path = temp_path("roundtrip.toml");

    let manager = ConfigManager::new();
    manager
        .update(|cfg| {
            cfg.split.n_splits = 5;
            cfg.split.n_overlaps = 2;
            cfg.split.pct_embargo = 0.05;
            cfg.window.bars = 4;
        })
        .unwrap();
    manager.save_to_file(&path).unwrap();

    let loaded = ConfigManager::new();
    loaded.load_from_file(&path).unwrap();
    let cfg = loaded.get();
    assert_eq!(cfg.split.n_splits, 5);
    assert_eq!(cfg.split.n_overlaps, 2);
    assert_eq!(cfg.split.pct_embargo, 0.05);
    assert_eq!(cfg.window.bars, 4);
}

#[test]
fn test_json_roundtrip() {
    let path = temp_path("roundtrip.json");

    let manager = ConfigManager::new();
    manager
        .update(|cfg| {
            cfg.split.n_splits = 7;
            cfg.window.columns = vec!["high".to_string(), "low".to_string()];
        })
        .unwrap();
    manager.save_to_file(&path).unwrap();

    let loaded = ConfigManager::new();
    loaded.load_from_file(&path).unwrap();
    let cfg = loaded.get();
    assert_eq!(cfg.split.n_splits, 7);
    assert_eq!(cfg.window.columns, vec!["high", "low"]);
}

#[test]
fn test_invalid_update_is_rejected_and_not_applied() {
    let manager = ConfigManager::new();
    assert!(manager.update(|cfg| cfg.split.n_splits = 1).is_err());
    assert_eq!(manager.get().split.n_splits, SplitConfig::default().n_splits);
}

#[test]
fn test_invalid_file_is_rejected_on_load() {
    let path = temp_path("invalid.toml");

    let manager = ConfigManager::new();
    manager.update(|cfg| cfg.split.n_splits = 4).unwrap();
    manager.save_to_file(&path).unwrap();

    // Corrupt the stored n_splits below the valid range.
    let contents = std::fs::read_to_string(&path)
        .unwrap()
        .replace("n_splits = 4", "n_splits = 0");
    std::fs::write(&path, contents).unwrap();

    let loaded = ConfigManager::new();
    assert!(loaded.load_from_file(&path).is_err());
    assert_eq!(loaded.get().split.n_splits, SplitConfig::default().n_splits);
}
