//! Field validation
//!
//! Validation runs in two passes per field: the required check from the
//! schema, then the field's predicate from [`RULES`]. Only the first failure
//! of a field is reported. Predicates only ever look at their own field.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use super::draft::{VolumeDraft, format_number};
use super::schema::Field;

pub const MIN_SIZE: f64 = 0.0;
pub const MAX_SIZE: f64 = 65536.0;
pub const MIN_REPLICAS: f64 = 1.0;
pub const MAX_REPLICAS: f64 = 10.0;

static TWO_DECIMALS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+([.]\d{1,2})?$").expect("valid regex"));
static WHOLE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").expect("valid regex"));

/// Why a field failed validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldError {
  /// A required field is empty. Carries the field's prompt.
  Missing(&'static str),
  OutOfRange { min: f64, max: f64 },
  Precision,
  NotPositiveInteger,
}

impl std::fmt::Display for FieldError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      FieldError::Missing(message) => f.write_str(message),
      FieldError::OutOfRange { min, max } => write!(f, "The value should be between {min} and {max}"),
      FieldError::Precision => f.write_str("This value should have at most two decimal places"),
      FieldError::NotPositiveInteger => f.write_str("The value must be a positive integer"),
    }
  }
}

impl std::error::Error for FieldError {}

pub type ValidationResult = Result<(), FieldError>;

/// Check a candidate volume size.
///
/// Empty input passes; the required check reports it.
pub fn validate_size(value: Option<f64>) -> ValidationResult {
  let Some(value) = value else {
    return Ok(());
  };
  if !(MIN_SIZE..=MAX_SIZE).contains(&value) && !value.is_nan() {
    return Err(FieldError::OutOfRange {
      min: MIN_SIZE,
      max: MAX_SIZE,
    });
  }
  if !TWO_DECIMALS.is_match(&format_number(value)) {
    return Err(FieldError::Precision);
  }
  Ok(())
}

/// Check a candidate replica count.
///
/// Empty input passes; the required check reports it.
pub fn validate_replicas(value: Option<f64>) -> ValidationResult {
  let Some(value) = value else {
    return Ok(());
  };
  if !(MIN_REPLICAS..=MAX_REPLICAS).contains(&value) && !value.is_nan() {
    return Err(FieldError::OutOfRange {
      min: MIN_REPLICAS,
      max: MAX_REPLICAS,
    });
  }
  if !WHOLE_NUMBER.is_match(&format_number(value)) {
    return Err(FieldError::NotPositiveInteger);
  }
  Ok(())
}

/// Required check for a single field
pub fn check_required(draft: &VolumeDraft, field: Field) -> ValidationResult {
  match field.required_message() {
    Some(message) if draft.is_empty(field) => Err(FieldError::Missing(message)),
    _ => Ok(()),
  }
}

type Rule = fn(&VolumeDraft) -> ValidationResult;

/// Predicate rules, keyed by the field they constrain
pub const RULES: &[(Field, Rule)] = &[
  (Field::Size, |draft| validate_size(draft.size)),
  (Field::NumberOfReplicas, |draft| validate_replicas(draft.number_of_replicas)),
];

/// Run both passes for one field and return its first failure
pub fn validate_field(draft: &VolumeDraft, field: Field) -> ValidationResult {
  check_required(draft, field)?;
  RULES
    .iter()
    .filter(|(f, _)| *f == field)
    .try_for_each(|(_, rule)| rule(draft))
}

/// Per-field validation failures, in form order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
  errors: BTreeMap<Field, FieldError>,
}

impl ValidationErrors {
  pub fn is_empty(&self) -> bool {
    self.errors.is_empty()
  }

  pub fn len(&self) -> usize {
    self.errors.len()
  }

  pub fn get(&self, field: Field) -> Option<&FieldError> {
    self.errors.get(&field)
  }

  pub fn insert(&mut self, field: Field, error: FieldError) {
    self.errors.insert(field, error);
  }

  pub fn remove(&mut self, field: Field) -> Option<FieldError> {
    self.errors.remove(&field)
  }

  pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
    self.errors.keys().copied()
  }

  pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> {
    self.errors.iter().map(|(field, error)| (*field, error))
  }
}

impl std::fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for (i, (field, error)) in self.iter().enumerate() {
      if i > 0 {
        f.write_str("; ")?;
      }
      write!(f, "{field}: {error}")?;
    }
    Ok(())
  }
}

impl std::error::Error for ValidationErrors {}

/// Validate every field of the draft
pub fn validate_draft(draft: &VolumeDraft) -> Result<(), ValidationErrors> {
  let mut errors = ValidationErrors::default();
  for field in Field::ALL {
    if let Err(error) = validate_field(draft, field) {
      errors.insert(field, error);
    }
  }
  if errors.is_empty() { Ok(()) } else { Err(errors) }
}
