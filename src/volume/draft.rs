use serde::Serialize;

use super::options::DialogOptions;
use super::schema::Field;
use super::types::{AccessMode, SizeUnit, VolumeItem};

/// In-progress state of the Create Volume form
///
/// Numeric inputs are kept as raw `f64` values so that out-of-range or
/// fractional entries survive until validation reports them. `None` means the
/// input is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeDraft {
  pub name: String,
  pub size: Option<f64>,
  pub unit: Option<SizeUnit>,
  pub number_of_replicas: Option<f64>,
  pub frontend: Option<String>,
  pub data_locality: Option<String>,
  pub access_mode: AccessMode,
  pub revision_counter_disabled: bool,
  pub node_selector: Vec<String>,
  pub disk_selector: Vec<String>,
}

impl VolumeDraft {
  /// Initial form values: seeded from `item` where it has them, otherwise from `options`
  pub fn seeded(item: Option<&VolumeItem>, options: &DialogOptions) -> Self {
    let (name, size, unit, number_of_replicas) = item.map_or((String::new(), None, None, None), |item| {
      (
        item.name.clone(),
        item.size,
        item.unit,
        item.number_of_replicas.map(f64::from),
      )
    });

    Self {
      name,
      size,
      unit,
      number_of_replicas,
      frontend: options.default_frontend().map(String::from),
      data_locality: options.default_data_locality.clone(),
      access_mode: AccessMode::default(),
      revision_counter_disabled: options.default_revision_counter_disabled,
      node_selector: Vec::new(),
      disk_selector: Vec::new(),
    }
  }

  /// Whether a field currently holds no value
  pub fn is_empty(&self, field: Field) -> bool {
    match field {
      Field::Name => self.name.is_empty(),
      Field::Size => self.size.is_none(),
      Field::Unit => self.unit.is_none(),
      Field::NumberOfReplicas => self.number_of_replicas.is_none(),
      Field::Frontend => self.frontend.as_deref().is_none_or(str::is_empty),
      Field::DataLocality => self.data_locality.as_deref().is_none_or(str::is_empty),
      Field::NodeSelector => self.node_selector.is_empty(),
      Field::DiskSelector => self.disk_selector.is_empty(),
      Field::AccessMode | Field::RevisionCounterDisabled => false,
    }
  }

  /// Apply a single edit. Returns `true` if the draft changed.
  pub fn apply(&mut self, edit: FieldEdit) -> bool {
    match edit {
      FieldEdit::Name(name) => replace(&mut self.name, name),
      FieldEdit::Size(size) => replace_size(&mut self.size, size),
      FieldEdit::Unit(unit) => replace(&mut self.unit, Some(unit)),
      FieldEdit::NumberOfReplicas(replicas) => replace_size(&mut self.number_of_replicas, replicas),
      FieldEdit::Frontend(frontend) => replace(&mut self.frontend, Some(frontend)),
      FieldEdit::DataLocality(locality) => replace(&mut self.data_locality, Some(locality)),
      FieldEdit::AccessMode(mode) => replace(&mut self.access_mode, mode),
      FieldEdit::RevisionCounterDisabled(disabled) => replace(&mut self.revision_counter_disabled, disabled),
      FieldEdit::ToggleNodeTag(tag) => toggle_tag(&mut self.node_selector, tag),
      FieldEdit::ToggleDiskTag(tag) => toggle_tag(&mut self.disk_selector, tag),
    }
  }
}

/// A user edit of one form field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
  Name(String),
  Size(Option<f64>),
  /// Plain unit assignment. Rescaling on unit change goes through
  /// [`rescale_for_unit`](super::transform::rescale_for_unit).
  Unit(SizeUnit),
  NumberOfReplicas(Option<f64>),
  Frontend(String),
  DataLocality(String),
  AccessMode(AccessMode),
  RevisionCounterDisabled(bool),
  ToggleNodeTag(String),
  ToggleDiskTag(String),
}

impl FieldEdit {
  pub fn field(&self) -> Field {
    match self {
      FieldEdit::Name(_) => Field::Name,
      FieldEdit::Size(_) => Field::Size,
      FieldEdit::Unit(_) => Field::Unit,
      FieldEdit::NumberOfReplicas(_) => Field::NumberOfReplicas,
      FieldEdit::Frontend(_) => Field::Frontend,
      FieldEdit::DataLocality(_) => Field::DataLocality,
      FieldEdit::AccessMode(_) => Field::AccessMode,
      FieldEdit::RevisionCounterDisabled(_) => Field::RevisionCounterDisabled,
      FieldEdit::ToggleNodeTag(_) => Field::NodeSelector,
      FieldEdit::ToggleDiskTag(_) => Field::DiskSelector,
    }
  }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
  if *slot == value {
    return false;
  }
  *slot = value;
  true
}

// NaN != NaN, so compare bit patterns to keep repeated NaN edits a no-op
fn replace_size(slot: &mut Option<f64>, value: Option<f64>) -> bool {
  let same = match (*slot, value) {
    (Some(a), Some(b)) => a.to_bits() == b.to_bits(),
    (None, None) => true,
    _ => false,
  };
  if same {
    return false;
  }
  *slot = value;
  true
}

fn toggle_tag(selector: &mut Vec<String>, tag: String) -> bool {
  let tag = tag.trim().to_string();
  if tag.is_empty() {
    return false;
  }
  if let Some(pos) = selector.iter().position(|t| *t == tag) {
    selector.remove(pos);
  } else {
    selector.push(tag);
  }
  true
}

/// Parse the text of a numeric input. Empty or unparsable text reads as no value.
pub fn parse_number(text: &str) -> Option<f64> {
  let text = text.trim();
  if text.is_empty() {
    return None;
  }
  text.parse().ok()
}

/// Render a number the way it is shown and submitted: shortest round-trip
/// form, no trailing `.0`, and negative zero as `0`
pub fn format_number(value: f64) -> String {
  if value == 0.0 {
    return "0".to_string();
  }
  value.to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_seeded_without_item() {
    let draft = VolumeDraft::seeded(None, &DialogOptions::default());
    assert!(draft.name.is_empty());
    assert_eq!(draft.size, None);
    assert_eq!(draft.unit, None);
    assert_eq!(draft.number_of_replicas, None);
    assert_eq!(draft.frontend.as_deref(), Some("blockdev"));
    assert_eq!(draft.data_locality.as_deref(), Some("disabled"));
    assert_eq!(draft.access_mode, AccessMode::Rwo);
    assert!(!draft.revision_counter_disabled);
    assert!(draft.node_selector.is_empty());
    assert!(draft.disk_selector.is_empty());
  }

  #[test]
  fn test_seeded_from_item() {
    let item = VolumeItem {
      name: "pvc-data".to_string(),
      size: Some(512.0),
      unit: Some(SizeUnit::Mi),
      number_of_replicas: Some(2),
    };
    let options = DialogOptions {
      default_revision_counter_disabled: true,
      ..DialogOptions::default()
    };
    let draft = VolumeDraft::seeded(Some(&item), &options);
    assert_eq!(draft.name, "pvc-data");
    assert_eq!(draft.size, Some(512.0));
    assert_eq!(draft.unit, Some(SizeUnit::Mi));
    assert_eq!(draft.number_of_replicas, Some(2.0));
    assert!(draft.revision_counter_disabled);
  }

  #[test]
  fn test_is_empty() {
    let mut draft = VolumeDraft::seeded(None, &DialogOptions::default());
    assert!(draft.is_empty(Field::Name));
    assert!(!draft.is_empty(Field::Frontend));
    assert!(!draft.is_empty(Field::AccessMode));
    draft.frontend = Some(String::new());
    assert!(draft.is_empty(Field::Frontend));
  }

  #[test]
  fn test_apply_reports_changes() {
    let mut draft = VolumeDraft::seeded(None, &DialogOptions::default());
    assert!(draft.apply(FieldEdit::Name("vol".to_string())));
    assert!(!draft.apply(FieldEdit::Name("vol".to_string())));
    assert!(draft.apply(FieldEdit::Size(Some(1.5))));
    assert!(!draft.apply(FieldEdit::Size(Some(1.5))));
    assert!(draft.apply(FieldEdit::Size(Some(f64::NAN))));
    assert!(!draft.apply(FieldEdit::Size(Some(f64::NAN))));
    assert!(draft.apply(FieldEdit::AccessMode(AccessMode::Rwx)));
    assert_eq!(draft.access_mode, AccessMode::Rwx);
  }

  #[test]
  fn test_toggle_tags() {
    let mut draft = VolumeDraft::seeded(None, &DialogOptions::default());
    assert!(draft.apply(FieldEdit::ToggleNodeTag("ssd".to_string())));
    assert!(draft.apply(FieldEdit::ToggleNodeTag("fast".to_string())));
    assert_eq!(draft.node_selector, vec!["ssd", "fast"]);
    assert!(draft.apply(FieldEdit::ToggleNodeTag("ssd".to_string())));
    assert_eq!(draft.node_selector, vec!["fast"]);
    assert!(!draft.apply(FieldEdit::ToggleDiskTag("   ".to_string())));
    assert!(draft.disk_selector.is_empty());
  }

  #[test]
  fn test_edit_field() {
    assert_eq!(FieldEdit::ToggleDiskTag("hdd".to_string()).field(), Field::DiskSelector);
    assert_eq!(FieldEdit::Unit(SizeUnit::Mi).field(), Field::Unit);
  }

  #[test]
  fn test_parse_number() {
    assert_eq!(parse_number(""), None);
    assert_eq!(parse_number("  "), None);
    assert_eq!(parse_number("abc"), None);
    assert_eq!(parse_number("10"), Some(10.0));
    assert_eq!(parse_number(" 2.5 "), Some(2.5));
    assert_eq!(parse_number("-3"), Some(-3.0));
  }

  #[test]
  fn test_format_number() {
    assert_eq!(format_number(10.0), "10");
    assert_eq!(format_number(2.5), "2.5");
    assert_eq!(format_number(-0.0), "0");
    assert_eq!(format_number(0.001_953_125), "0.001953125");
  }
}
