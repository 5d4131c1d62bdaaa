// Allow precision loss when converting fractional sizes to byte counts
#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use bytesize::ByteSize;
use serde::{Deserialize, Serialize};

/// Binary size unit a volume size is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SizeUnit {
  Mi,
  #[default]
  Gi,
}

impl SizeUnit {
  pub const ALL: [SizeUnit; 2] = [SizeUnit::Mi, SizeUnit::Gi];

  pub fn as_str(self) -> &'static str {
    match self {
      SizeUnit::Mi => "Mi",
      SizeUnit::Gi => "Gi",
    }
  }

  /// Number of bytes in one unit
  pub fn bytes_per_unit(self) -> u64 {
    match self {
      SizeUnit::Mi => 1024 * 1024,
      SizeUnit::Gi => 1024 * 1024 * 1024,
    }
  }

  /// Capacity of `size` units, rounded down to whole bytes
  pub fn to_bytes(self, size: f64) -> ByteSize {
    if !size.is_finite() || size <= 0.0 {
      return ByteSize::b(0);
    }
    ByteSize::b((size * self.bytes_per_unit() as f64) as u64)
  }
}

impl std::fmt::Display for SizeUnit {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// How many nodes may attach the volume at once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
  #[default]
  Rwo,
  Rwx,
}

impl AccessMode {
  pub const ALL: [AccessMode; 2] = [AccessMode::Rwo, AccessMode::Rwx];

  pub fn label(self) -> &'static str {
    match self {
      AccessMode::Rwo => "ReadWriteOnce",
      AccessMode::Rwx => "ReadWriteMany",
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      AccessMode::Rwo => "rwo",
      AccessMode::Rwx => "rwx",
    }
  }
}

impl std::fmt::Display for AccessMode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A selectable volume frontend (block device, iSCSI, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontendOption {
  pub value: String,
  pub label: String,
}

impl FrontendOption {
  pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
    Self {
      value: value.into(),
      label: label.into(),
    }
  }
}

/// A node or disk tag offered by a tag selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagOption {
  pub id: String,
  pub name: String,
}

impl TagOption {
  pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
    }
  }
}

/// Existing values a dialog is seeded from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VolumeItem {
  pub name: String,
  pub size: Option<f64>,
  pub unit: Option<SizeUnit>,
  pub number_of_replicas: Option<u32>,
}

impl Default for VolumeItem {
  fn default() -> Self {
    Self {
      name: String::new(),
      size: Some(20.0),
      unit: Some(SizeUnit::Gi),
      number_of_replicas: Some(3),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_size_unit_display() {
    assert_eq!(SizeUnit::Mi.to_string(), "Mi");
    assert_eq!(SizeUnit::Gi.to_string(), "Gi");
  }

  #[test]
  fn test_size_unit_to_bytes() {
    assert_eq!(SizeUnit::Mi.to_bytes(2.0), ByteSize::mib(2));
    assert_eq!(SizeUnit::Gi.to_bytes(10.0), ByteSize::gib(10));
    assert_eq!(SizeUnit::Gi.to_bytes(0.5), ByteSize::mib(512));
    assert_eq!(SizeUnit::Gi.to_bytes(-1.0), ByteSize::b(0));
    assert_eq!(SizeUnit::Gi.to_bytes(f64::NAN), ByteSize::b(0));
  }

  #[test]
  fn test_size_unit_serde() {
    assert_eq!(serde_json::to_string(&SizeUnit::Gi).unwrap(), "\"Gi\"");
    let unit: SizeUnit = serde_json::from_str("\"Mi\"").unwrap();
    assert_eq!(unit, SizeUnit::Mi);
  }

  #[test]
  fn test_access_mode_labels() {
    assert_eq!(AccessMode::default(), AccessMode::Rwo);
    assert_eq!(AccessMode::Rwo.label(), "ReadWriteOnce");
    assert_eq!(AccessMode::Rwx.label(), "ReadWriteMany");
    assert_eq!(serde_json::to_string(&AccessMode::Rwx).unwrap(), "\"rwx\"");
  }

  #[test]
  fn test_volume_item_default() {
    let item = VolumeItem::default();
    assert!(item.name.is_empty());
    assert_eq!(item.size, Some(20.0));
    assert_eq!(item.unit, Some(SizeUnit::Gi));
    assert_eq!(item.number_of_replicas, Some(3));
  }

  #[test]
  fn test_volume_item_partial_yaml() {
    let item: VolumeItem = serde_yaml::from_str("name: data\nnumberOfReplicas: 2\n").unwrap();
    assert_eq!(item.name, "data");
    assert_eq!(item.number_of_replicas, Some(2));
    // Missing keys keep the defaults
    assert_eq!(item.size, Some(20.0));
  }
}
