//! Field schema for the Create Volume form
//!
//! Every input of the dialog is a [`Field`]. The schema records the payload key,
//! the display label and whether the field is mandatory. Initial values live in
//! [`VolumeDraft::seeded`](super::draft::VolumeDraft::seeded).

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
  Name,
  Size,
  Unit,
  NumberOfReplicas,
  Frontend,
  DataLocality,
  AccessMode,
  RevisionCounterDisabled,
  NodeSelector,
  DiskSelector,
}

impl Field {
  /// All fields in form order
  pub const ALL: [Field; 10] = [
    Field::Name,
    Field::Size,
    Field::Unit,
    Field::NumberOfReplicas,
    Field::Frontend,
    Field::DataLocality,
    Field::AccessMode,
    Field::RevisionCounterDisabled,
    Field::NodeSelector,
    Field::DiskSelector,
  ];

  /// Key used for this field in the submitted payload
  pub fn key(self) -> &'static str {
    match self {
      Field::Name => "name",
      Field::Size => "size",
      Field::Unit => "unit",
      Field::NumberOfReplicas => "numberOfReplicas",
      Field::Frontend => "frontend",
      Field::DataLocality => "dataLocality",
      Field::AccessMode => "accessMode",
      Field::RevisionCounterDisabled => "revisionCounterDisabled",
      Field::NodeSelector => "nodeSelector",
      Field::DiskSelector => "diskSelector",
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Field::Name => "Name",
      Field::Size => "Size",
      Field::Unit => "Unit",
      Field::NumberOfReplicas => "Number of Replicas",
      Field::Frontend => "Frontend",
      Field::DataLocality => "Data Locality",
      Field::AccessMode => "Access Mode",
      Field::RevisionCounterDisabled => "Disable Revision Counter",
      Field::NodeSelector => "Node Tag",
      Field::DiskSelector => "Disk Tag",
    }
  }

  /// Message shown when a mandatory field is left empty, `None` for optional fields
  pub fn required_message(self) -> Option<&'static str> {
    match self {
      Field::Name => Some("Please input volume name"),
      Field::Size => Some("Please input volume size"),
      Field::Unit => Some("Please select your unit!"),
      Field::NumberOfReplicas => Some("Please input the number of replicas"),
      Field::Frontend => Some("Please select a frontend"),
      Field::DataLocality
      | Field::AccessMode
      | Field::RevisionCounterDisabled
      | Field::NodeSelector
      | Field::DiskSelector => None,
    }
  }

  pub fn is_required(self) -> bool {
    self.required_message().is_some()
  }
}

impl std::fmt::Display for Field {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.key())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_required_fields() {
    let required: Vec<Field> = Field::ALL.into_iter().filter(|f| f.is_required()).collect();
    assert_eq!(
      required,
      vec![
        Field::Name,
        Field::Size,
        Field::Unit,
        Field::NumberOfReplicas,
        Field::Frontend
      ]
    );
  }

  #[test]
  fn test_field_keys_are_unique() {
    let mut keys: Vec<&str> = Field::ALL.iter().map(|f| f.key()).collect();
    keys.sort_unstable();
    keys.dedup();
    assert_eq!(keys.len(), Field::ALL.len());
  }

  #[test]
  fn test_field_display_matches_key() {
    assert_eq!(Field::NumberOfReplicas.to_string(), "numberOfReplicas");
    assert_eq!(Field::RevisionCounterDisabled.label(), "Disable Revision Counter");
  }

  #[test]
  fn test_field_serializes_as_key() {
    for field in Field::ALL {
      assert_eq!(serde_json::to_string(&field).unwrap(), format!("\"{}\"", field.key()));
    }
  }
}
