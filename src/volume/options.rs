use serde::{Deserialize, Serialize};

use super::types::{FrontendOption, TagOption};

/// Option lists and defaults injected into a dialog at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DialogOptions {
  /// Available frontends, in display order. The first one is preselected.
  pub frontends: Vec<FrontendOption>,
  pub data_locality_options: Vec<String>,
  pub default_data_locality: Option<String>,
  pub default_revision_counter_disabled: bool,
  pub node_tags: Vec<TagOption>,
  pub disk_tags: Vec<TagOption>,
}

impl Default for DialogOptions {
  fn default() -> Self {
    Self {
      frontends: vec![
        FrontendOption::new("blockdev", "Block Device"),
        FrontendOption::new("iscsi", "iSCSI"),
      ],
      data_locality_options: vec!["disabled".to_string(), "best-effort".to_string()],
      default_data_locality: Some("disabled".to_string()),
      default_revision_counter_disabled: false,
      node_tags: Vec::new(),
      disk_tags: Vec::new(),
    }
  }
}

impl DialogOptions {
  pub fn default_frontend(&self) -> Option<&str> {
    self.frontends.first().map(|f| f.value.as_str())
  }

  pub fn has_frontend(&self, value: &str) -> bool {
    self.frontends.iter().any(|f| f.value == value)
  }

  pub fn has_data_locality(&self, value: &str) -> bool {
    self.data_locality_options.iter().any(|o| o == value)
  }

  /// Display label for a frontend value, falling back to the raw value
  pub fn frontend_label<'a>(&'a self, value: &'a str) -> &'a str {
    self
      .frontends
      .iter()
      .find(|f| f.value == value)
      .map_or(value, |f| f.label.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_options() {
    let options = DialogOptions::default();
    assert_eq!(options.default_frontend(), Some("blockdev"));
    assert!(options.has_frontend("iscsi"));
    assert!(!options.has_frontend("nvmf"));
    assert!(options.has_data_locality("best-effort"));
    assert_eq!(options.default_data_locality.as_deref(), Some("disabled"));
    assert!(!options.default_revision_counter_disabled);
    assert!(options.node_tags.is_empty());
    assert!(options.disk_tags.is_empty());
  }

  #[test]
  fn test_default_frontend_empty_list() {
    let options = DialogOptions {
      frontends: Vec::new(),
      ..DialogOptions::default()
    };
    assert_eq!(options.default_frontend(), None);
  }

  #[test]
  fn test_frontend_label() {
    let options = DialogOptions::default();
    assert_eq!(options.frontend_label("blockdev"), "Block Device");
    assert_eq!(options.frontend_label("custom"), "custom");
  }

  #[test]
  fn test_options_from_yaml() {
    let yaml = r"
frontends:
  - value: iscsi
    label: iSCSI
nodeTags:
  - id: ssd
    name: SSD nodes
defaultRevisionCounterDisabled: true
";
    let options: DialogOptions = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(options.default_frontend(), Some("iscsi"));
    assert_eq!(options.node_tags, vec![TagOption::new("ssd", "SSD nodes")]);
    assert!(options.default_revision_counter_disabled);
    // Unspecified lists fall back to the built-in defaults
    assert_eq!(options.data_locality_options.len(), 2);
  }
}
