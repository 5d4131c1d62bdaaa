//! User settings: option lists and defaults for the Create Volume dialog
//!
//! Read from `<config dir>/longdeck/settings.yaml`. A missing file means
//! built-in defaults; a malformed one is an error.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::volume::{DialogOptions, VolumeItem};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
  /// Option lists offered by the dialog
  pub dialog: DialogOptions,
  /// Values a new dialog is seeded with
  pub default_volume: VolumeItem,
}

impl Settings {
  /// Default location of the settings file
  pub fn path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("longdeck").join("settings.yaml"))
  }

  /// Load settings from the default location
  pub fn load() -> Result<Self> {
    match Self::path() {
      Some(path) => Self::load_from(&path),
      None => {
        tracing::debug!("No config directory, using default settings");
        Ok(Self::default())
      }
    }
  }

  pub fn load_from(path: &Path) -> Result<Self> {
    if !path.exists() {
      tracing::debug!("Settings file {} not found, using defaults", path.display());
      return Ok(Self::default());
    }

    let contents =
      std::fs::read_to_string(path).with_context(|| format!("Failed to read settings file {}", path.display()))?;
    let settings: Settings =
      serde_yaml::from_str(&contents).with_context(|| format!("Failed to parse settings file {}", path.display()))?;

    tracing::info!(
      "Loaded settings from {} ({} frontends, {} node tags, {} disk tags)",
      path.display(),
      settings.dialog.frontends.len(),
      settings.dialog.node_tags.len(),
      settings.dialog.disk_tags.len()
    );
    Ok(settings)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::volume::{SizeUnit, TagOption};

  /// Scratch directory removed on drop
  struct TempDir(PathBuf);

  impl TempDir {
    fn new(test: &str) -> Self {
      let dir = std::env::temp_dir().join(format!("longdeck-test-{}-{test}", std::process::id()));
      std::fs::create_dir_all(&dir).unwrap();
      Self(dir)
    }

    fn file(&self, name: &str, contents: &str) -> PathBuf {
      let path = self.0.join(name);
      std::fs::write(&path, contents).unwrap();
      path
    }
  }

  impl Drop for TempDir {
    fn drop(&mut self) {
      let _ = std::fs::remove_dir_all(&self.0);
    }
  }

  #[test]
  fn test_settings_path_ends_with_file_name() {
    if let Some(path) = Settings::path() {
      assert!(path.ends_with("longdeck/settings.yaml"));
    }
  }

  #[test]
  fn test_missing_file_yields_defaults() {
    let path = std::env::temp_dir().join("longdeck-definitely-missing/settings.yaml");
    let settings = Settings::load_from(&path).unwrap();
    assert_eq!(settings, Settings::default());
  }

  #[test]
  fn test_load_from_yaml() {
    let dir = TempDir::new("full");
    let path = dir.file(
      "full.yaml",
      r"
dialog:
  dataLocalityOptions: [disabled, best-effort, strict-local]
  defaultDataLocality: best-effort
  diskTags:
    - id: nvme
      name: NVMe
defaultVolume:
  size: 512
  unit: Mi
  numberOfReplicas: 2
",
    );
    let settings = Settings::load_from(&path).unwrap();
    assert_eq!(settings.dialog.data_locality_options.len(), 3);
    assert_eq!(settings.dialog.default_data_locality.as_deref(), Some("best-effort"));
    assert_eq!(settings.dialog.disk_tags, vec![TagOption::new("nvme", "NVMe")]);
    assert_eq!(settings.dialog.default_frontend(), Some("blockdev"));
    assert_eq!(settings.default_volume.size, Some(512.0));
    assert_eq!(settings.default_volume.unit, Some(SizeUnit::Mi));
    assert_eq!(settings.default_volume.number_of_replicas, Some(2));
  }

  #[test]
  fn test_malformed_file_is_error() {
    let dir = TempDir::new("broken");
    let path = dir.file("broken.yaml", "dialog: [not, a, map\n");
    let err = Settings::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse settings file"));
  }

  #[test]
  fn test_temp_dir_removed_after_use() {
    let dir = TempDir::new("cleanup");
    let root = dir.0.clone();
    dir.file("settings.yaml", "{}\n");
    assert!(root.exists());
    drop(dir);
    assert!(!root.exists());
  }
}
