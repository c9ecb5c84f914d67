use anyhow::Result;
use directories::ProjectDirs;
use modeler_bridge::EditorOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs::try_exists;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub editor: EditorLaunchConfig,
    #[serde(default)]
    pub options: EditorOptions,
    #[serde(default)]
    pub ui: UiConfig,
}

/// How to start the embedded editor. Without a command the shell runs the
/// in-process editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorLaunchConfig {
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    pub line_numbers: bool,
    pub event_log_capacity: usize,
    pub remember_panel_width: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            line_numbers: true,
            event_log_capacity: 100,
            remember_panel_width: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            editor: EditorLaunchConfig::default(),
            options: EditorOptions::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    pub async fn load() -> Result<Self> {
        if let Some(config_path) = Self::config_path() {
            if try_exists(&config_path).await? {
                match tokio::fs::read_to_string(&config_path).await {
                    Ok(content) => {
                        if content.trim().is_empty() {
                            log::warn!("Config file is empty, creating new one");
                            let default_config = Self::default();
                            let _ = default_config.save().await;
                            return Ok(default_config);
                        }

                        match serde_json::from_str::<Self>(&content) {
                            Ok(mut config) => {
                                config.validate()?;
                                log::info!(
                                    "Successfully loaded config from: {}",
                                    config_path.display()
                                );
                                return Ok(config);
                            }
                            Err(json_err) => {
                                log::error!("Failed to parse config file: {}", json_err);

                                let backup_path = config_path.with_extension("bak");
                                if let Err(e) = tokio::fs::copy(&config_path, &backup_path).await {
                                    log::warn!("Failed to backup broken config: {}", e);
                                } else {
                                    log::info!(
                                        "Backed up broken config to: {}",
                                        backup_path.display()
                                    );
                                }

                                let default_config = Self::default();
                                let _ = default_config.save().await;
                                return Ok(default_config);
                            }
                        }
                    }
                    Err(io_err) => {
                        log::error!("Failed to read config file: {}", io_err);
                    }
                }
            } else {
                log::info!("Config file does not exist, creating default");
            }
        }

        let default_config = Self::default();
        let _ = default_config.save().await;
        Ok(default_config)
    }

    pub async fn save(&self) -> Result<()> {
        let Some(config_path) = Self::config_path() else {
            return Ok(());
        };

        let mut config_to_save = self.clone();
        config_to_save.validate()?;

        if let Some(parent) = config_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                anyhow::anyhow!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                )
            })?;
        }

        let content = serde_json::to_string_pretty(&config_to_save)
            .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
        tokio::fs::write(&config_path, content).await.map_err(|e| {
            anyhow::anyhow!(
                "Failed to write config file {}: {}",
                config_path.display(),
                e
            )
        })?;
        log::info!("Successfully saved config to: {}", config_path.display());
        Ok(())
    }

    /// Validate configuration values and fix invalid ones
    pub fn validate(&mut self) -> Result<()> {
        let mut has_issues = false;

        if self
            .editor
            .command
            .as_deref()
            .is_some_and(|command| command.trim().is_empty())
        {
            log::warn!("Empty editor command, using the in-process editor");
            self.editor.command = None;
            has_issues = true;
        }

        if self.ui.event_log_capacity == 0 || self.ui.event_log_capacity > 10_000 {
            log::warn!(
                "Invalid event log capacity: {}, using default",
                self.ui.event_log_capacity
            );
            self.ui.event_log_capacity = UiConfig::default().event_log_capacity;
            has_issues = true;
        }

        let sizes = [
            ("canvas", &mut self.options.modeler_tab.canvas.size),
            (
                "properties panel",
                &mut self.options.modeler_tab.properties_panel.size,
            ),
        ];
        for (panel, size) in sizes {
            if let (Some(min), Some(max)) = (size.min, size.max) {
                if min > max {
                    log::warn!(
                        "Invalid {} size bounds (min {} > max {}), dropping max",
                        panel,
                        min,
                        max
                    );
                    size.max = None;
                    has_issues = true;
                }
            }
        }

        if has_issues {
            log::info!("Configuration validation completed with corrections");
        }

        Ok(())
    }

    fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("MODELER_SHELL_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        if let Ok(dir) = std::env::var("MODELER_SHELL_CONFIG_DIR") {
            return Some(PathBuf::from(dir).join("config.json"));
        }

        ProjectDirs::from("com", "modeler-shell", "modeler-shell")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }
}
