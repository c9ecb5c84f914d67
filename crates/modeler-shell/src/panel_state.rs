//! Remembers the properties panel width between runs.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::fs::try_exists;

const STATE_FILE: &str = "panel-state.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelState {
    pub properties_panel_width: u32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct PanelStateStore {
    path: PathBuf,
}

impl PanelStateStore {
    pub fn new() -> Result<Self> {
        Ok(Self::at(Self::get_data_dir()?.join(STATE_FILE)))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn get_data_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var("MODELER_SHELL_DATA_DIR") {
            return Ok(PathBuf::from(dir));
        }
        let dirs = directories::ProjectDirs::from("com", "modeler-shell", "modeler-shell")
            .ok_or_else(|| anyhow::anyhow!("Could not determine the project data directory"))?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// Load the remembered state. A missing or unreadable file is not an
    /// error, there is simply nothing to restore.
    pub async fn load(&self) -> Result<Option<PanelState>> {
        if !try_exists(&self.path).await? {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path).await?;
        match serde_json::from_str::<PanelState>(&json) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable panel state '{}': {}",
                    self.path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    pub async fn save(&self, width: u32) -> Result<PanelState> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let state = PanelState {
            properties_panel_width: width,
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&state)?;
        fs::write(&self.path, json).await?;
        log::debug!("Remembered properties panel width {}", width);

        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::env_lock;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_missing_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = PanelStateStore::at(temp_dir.path().join(STATE_FILE));
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = PanelStateStore::at(temp_dir.path().join("nested").join(STATE_FILE));

        let saved = store.save(240).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, saved);
        assert_eq!(loaded.properties_panel_width, 240);

        store.save(300).await.unwrap();
        assert_eq!(
            store.load().await.unwrap().unwrap().properties_panel_width,
            300
        );
    }

    #[tokio::test]
    async fn test_corrupt_file_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(STATE_FILE);
        std::fs::write(&path, "width=240").unwrap();

        let store = PanelStateStore::at(&path);
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[test]
    fn test_data_dir_override() {
        let _guard = env_lock();
        let temp_dir = TempDir::new().unwrap();
        let previous = std::env::var("MODELER_SHELL_DATA_DIR").ok();
        std::env::set_var("MODELER_SHELL_DATA_DIR", temp_dir.path());

        let store = PanelStateStore::new().unwrap();
        assert_eq!(store.path(), temp_dir.path().join(STATE_FILE));

        match previous {
            Some(value) => std::env::set_var("MODELER_SHELL_DATA_DIR", value),
            None => std::env::remove_var("MODELER_SHELL_DATA_DIR"),
        }
    }
}
