use std::path::Path;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use super::traits::ConfigSection;
use crate::error::{PurgefoldError, Result};
use crate::features::WindowConfig;
use crate::splitters::SplitConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub split: SplitConfig,
    pub window: WindowConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            split: SplitConfig::default(),
            window: WindowConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        self.split.validate()?;
        self.window.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Load a TOML or JSON config file, picked by extension.
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| PurgefoldError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = if is_json(path) {
            serde_json::from_str(&contents)
                .map_err(|e| PurgefoldError::Configuration(format!("Failed to parse config: {}", e)))?
        } else {
            toml::from_str(&contents)
                .map_err(|e| PurgefoldError::Configuration(format!("Failed to parse config: {}", e)))?
        };

        config.validate()?;

        *self.config.write().unwrap() = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config = self.config.read().unwrap();

        let serialized = if is_json(path) {
            serde_json::to_string_pretty(&*config)
                .map_err(|e| PurgefoldError::Configuration(format!("Failed to serialize: {}", e)))?
        } else {
            toml::to_string_pretty(&*config)
                .map_err(|e| PurgefoldError::Configuration(format!("Failed to serialize: {}", e)))?
        };

        std::fs::write(path, serialized)
            .map_err(|e| PurgefoldError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config.read().unwrap().clone()
    }

    /// Apply an edit; the change is committed only if it still validates.
    pub fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.get();
        f(&mut candidate);
        candidate.validate()?;

        *self.config.write().unwrap() = candidate;
        Ok(())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
