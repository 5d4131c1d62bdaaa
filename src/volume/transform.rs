#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use serde::Serialize;

use super::draft::{VolumeDraft, format_number};
use super::schema::Field;
use super::types::{AccessMode, SizeUnit};
use super::validate::{FieldError, ValidationErrors, validate_draft};

/// Volume definition handed to the caller on a successful submit
///
/// `size` carries the unit suffix (`"10Gi"`); there is no separate unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPayload {
  pub name: String,
  pub size: String,
  pub number_of_replicas: u32,
  pub frontend: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data_locality: Option<String>,
  pub access_mode: AccessMode,
  pub revision_counter_disabled: bool,
  pub node_selector: Vec<String>,
  pub disk_selector: Vec<String>,
}

/// Validate the draft and merge it into a payload
pub fn build_payload(draft: &VolumeDraft) -> Result<SubmitPayload, ValidationErrors> {
  validate_draft(draft)?;

  let size = require(draft.size, Field::Size)?;
  let unit = require(draft.unit, Field::Unit)?;
  let replicas = require(draft.number_of_replicas, Field::NumberOfReplicas)?;
  let frontend = require(draft.frontend.clone(), Field::Frontend)?;

  tracing::debug!("Requested capacity for '{}': {}", draft.name, unit.to_bytes(size));

  Ok(SubmitPayload {
    name: draft.name.clone(),
    size: format!("{}{unit}", format_number(size)),
    // Replica count is a whole number in 1..=10 once validated
    number_of_replicas: replicas as u32,
    frontend,
    data_locality: draft.data_locality.clone().filter(|d| !d.is_empty()),
    access_mode: draft.access_mode,
    revision_counter_disabled: draft.revision_counter_disabled,
    node_selector: draft.node_selector.clone(),
    disk_selector: draft.disk_selector.clone(),
  })
}

fn require<T>(value: Option<T>, field: Field) -> Result<T, ValidationErrors> {
  value.ok_or_else(|| {
    let mut errors = ValidationErrors::default();
    if let Some(message) = field.required_message() {
      errors.insert(field, FieldError::Missing(message));
    }
    errors
  })
}

/// Size after switching to `unit`: divided by 1024 when moving to Gi,
/// multiplied by 1024 otherwise. The previous unit is not consulted.
pub fn rescaled_size(size: f64, unit: SizeUnit) -> f64 {
  match unit {
    SizeUnit::Gi => size / 1024.0,
    SizeUnit::Mi => size * 1024.0,
  }
}

/// Switch the draft to `unit`, rescaling the current size.
///
/// The result is not validated here and may carry more than two decimals.
pub fn rescale_for_unit(draft: &mut VolumeDraft, unit: SizeUnit) {
  draft.size = draft.size.map(|size| rescaled_size(size, unit));
  draft.unit = Some(unit);
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::volume::options::DialogOptions;
  use crate::volume::types::VolumeItem;

  fn draft(name: &str, size: f64, unit: SizeUnit) -> VolumeDraft {
    let item = VolumeItem {
      name: name.to_string(),
      size: Some(size),
      unit: Some(unit),
      number_of_replicas: Some(3),
    };
    VolumeDraft::seeded(Some(&item), &DialogOptions::default())
  }

  #[test]
  fn test_payload_merges_size_and_unit() {
    let payload = build_payload(&draft("vol", 10.0, SizeUnit::Gi)).unwrap();
    assert_eq!(payload.size, "10Gi");
    assert_eq!(payload.number_of_replicas, 3);
    assert_eq!(payload.frontend, "blockdev");

    let payload = build_payload(&draft("vol", 2.5, SizeUnit::Mi)).unwrap();
    assert_eq!(payload.size, "2.5Mi");
  }

  #[test]
  fn test_payload_json_has_no_unit_key() {
    let mut d = draft("vol", 10.0, SizeUnit::Gi);
    d.node_selector.push("ssd".to_string());
    let payload = build_payload(&d).unwrap();
    let json = serde_json::to_value(&payload).unwrap();

    assert!(json.get("unit").is_none());
    assert_eq!(json["size"], "10Gi");
    assert_eq!(json["numberOfReplicas"], 3);
    assert_eq!(json["accessMode"], "rwo");
    assert_eq!(json["dataLocality"], "disabled");
    assert_eq!(json["revisionCounterDisabled"], false);
    assert_eq!(json["nodeSelector"], serde_json::json!(["ssd"]));
    assert_eq!(json["diskSelector"], serde_json::json!([]));
  }

  #[test]
  fn test_payload_omits_unset_data_locality() {
    let mut d = draft("vol", 1.0, SizeUnit::Gi);
    d.data_locality = None;
    let json = serde_json::to_value(build_payload(&d).unwrap()).unwrap();
    assert!(json.get("dataLocality").is_none());
  }

  #[test]
  fn test_payload_rejects_invalid_draft() {
    let errors = build_payload(&draft("", 10.0, SizeUnit::Gi)).unwrap_err();
    assert_eq!(
      errors.get(Field::Name),
      Some(&FieldError::Missing("Please input volume name"))
    );

    let errors = build_payload(&draft("vol", 70000.0, SizeUnit::Gi)).unwrap_err();
    assert!(matches!(errors.get(Field::Size), Some(FieldError::OutOfRange { .. })));
  }

  #[test]
  fn test_rescale_mi_to_gi_and_back() {
    let mut d = draft("vol", 2048.0, SizeUnit::Mi);
    rescale_for_unit(&mut d, SizeUnit::Gi);
    assert_eq!(d.size, Some(2.0));
    assert_eq!(d.unit, Some(SizeUnit::Gi));

    rescale_for_unit(&mut d, SizeUnit::Mi);
    assert_eq!(d.size, Some(2048.0));
    assert_eq!(d.unit, Some(SizeUnit::Mi));
  }

  #[test]
  fn test_rescale_direction_ignores_previous_unit() {
    let mut d = draft("vol", 2048.0, SizeUnit::Gi);
    rescale_for_unit(&mut d, SizeUnit::Gi);
    assert_eq!(d.size, Some(2.0));
    rescale_for_unit(&mut d, SizeUnit::Gi);
    assert_eq!(d.size, Some(2.0 / 1024.0));
  }

  #[test]
  fn test_rescale_can_break_precision() {
    let mut d = draft("vol", 1.0, SizeUnit::Mi);
    rescale_for_unit(&mut d, SizeUnit::Gi);
    assert_eq!(d.size, Some(0.000_976_562_5));
    let errors = build_payload(&d).unwrap_err();
    assert_eq!(errors.get(Field::Size), Some(&FieldError::Precision));
  }

  #[test]
  fn test_rescale_empty_size() {
    let mut d = draft("vol", 1.0, SizeUnit::Mi);
    d.size = None;
    rescale_for_unit(&mut d, SizeUnit::Gi);
    assert_eq!(d.size, None);
    assert_eq!(d.unit, Some(SizeUnit::Gi));
  }
}
