//! Headless Create Volume dialog
//!
//! [`VolumeDialog`] owns the draft while the dialog is open and drives the
//! `Closed -> OpenClean -> OpenDirty -> Submitting -> Closed` lifecycle. It
//! does not render anything; the gpui view in `ui::volumes` wraps it.

use tracing::{debug, info, warn};

use super::draft::{FieldEdit, VolumeDraft};
use super::options::DialogOptions;
use super::schema::Field;
use super::transform::{SubmitPayload, build_payload, rescale_for_unit};
use super::types::{SizeUnit, VolumeItem};
use super::validate::{FieldError, ValidationErrors, validate_field};

pub const DIALOG_TITLE: &str = "Create Volume";
pub const DIALOG_WIDTH: f32 = 680.;

/// Callback receiving the payload of a successful submit
pub type OkCallback = Box<dyn FnMut(SubmitPayload)>;
/// Callback invoked when the dialog is dismissed
pub type CancelCallback = Box<dyn FnMut()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
  #[default]
  Closed,
  OpenClean,
  OpenDirty,
  Submitting,
}

impl DialogState {
  pub fn is_open(self) -> bool {
    !matches!(self, DialogState::Closed)
  }
}

/// What the dialog chrome needs to draw the modal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModalOptions {
  pub title: &'static str,
  pub width: f32,
  pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
  Closed,
  UnknownFrontend(String),
  UnknownDataLocality(String),
}

impl std::fmt::Display for EditError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      EditError::Closed => write!(f, "Dialog is not open"),
      EditError::UnknownFrontend(value) => write!(f, "Unknown frontend '{value}'"),
      EditError::UnknownDataLocality(value) => write!(f, "Unknown data locality '{value}'"),
    }
  }
}

impl std::error::Error for EditError {}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitError {
  Closed,
  Invalid(ValidationErrors),
}

impl std::fmt::Display for SubmitError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      SubmitError::Closed => write!(f, "Dialog is not open"),
      SubmitError::Invalid(errors) => write!(f, "Invalid volume: {errors}"),
    }
  }
}

impl std::error::Error for SubmitError {}

pub struct VolumeDialog {
  options: DialogOptions,
  state: DialogState,
  draft: Option<VolumeDraft>,
  errors: ValidationErrors,
  tags_loading: bool,
  on_ok: OkCallback,
  on_cancel: CancelCallback,
}

impl VolumeDialog {
  pub fn new(options: DialogOptions, on_ok: OkCallback, on_cancel: CancelCallback) -> Self {
    Self {
      options,
      state: DialogState::Closed,
      draft: None,
      errors: ValidationErrors::default(),
      tags_loading: false,
      on_ok,
      on_cancel,
    }
  }

  /// Open the dialog with a fresh draft. Reopening discards any current draft.
  pub fn open(&mut self, item: Option<&VolumeItem>) {
    if self.state.is_open() {
      debug!("Reopening volume dialog, discarding current draft");
    }
    self.draft = Some(VolumeDraft::seeded(item, &self.options));
    self.errors = ValidationErrors::default();
    self.state = DialogState::OpenClean;
    debug!("Opened volume dialog");
  }

  pub fn state(&self) -> DialogState {
    self.state
  }

  pub fn draft(&self) -> Option<&VolumeDraft> {
    self.draft.as_ref()
  }

  pub fn options(&self) -> &DialogOptions {
    &self.options
  }

  pub fn errors(&self) -> &ValidationErrors {
    &self.errors
  }

  pub fn error(&self, field: Field) -> Option<&FieldError> {
    self.errors.get(field)
  }

  pub fn modal_options(&self) -> ModalOptions {
    ModalOptions {
      title: DIALOG_TITLE,
      width: DIALOG_WIDTH,
      visible: self.state.is_open(),
    }
  }

  pub fn tags_loading(&self) -> bool {
    self.tags_loading
  }

  pub fn set_tags_loading(&mut self, loading: bool) {
    self.tags_loading = loading;
  }

  /// Apply a user edit and re-check the edited field
  pub fn edit(&mut self, edit: FieldEdit) -> Result<(), EditError> {
    if let FieldEdit::Unit(unit) = edit {
      return self.change_unit(unit);
    }
    if self.draft.is_none() {
      return Err(EditError::Closed);
    }

    match &edit {
      FieldEdit::Frontend(value) if !self.options.has_frontend(value) => {
        warn!("Rejected frontend '{value}'");
        return Err(EditError::UnknownFrontend(value.clone()));
      }
      FieldEdit::DataLocality(value) if !self.options.has_data_locality(value) => {
        warn!("Rejected data locality '{value}'");
        return Err(EditError::UnknownDataLocality(value.clone()));
      }
      _ => {}
    }

    let field = edit.field();
    let draft = self.draft.as_mut().ok_or(EditError::Closed)?;
    if draft.apply(edit) {
      self.state = DialogState::OpenDirty;
      self.revalidate(field);
    }
    Ok(())
  }

  /// Unit-toggle reaction: switch unit and rescale the size.
  ///
  /// Selecting the unit already in place does nothing. The rescaled size is
  /// re-checked right away so a precision error shows without another edit.
  pub fn change_unit(&mut self, unit: SizeUnit) -> Result<(), EditError> {
    let draft = self.draft.as_mut().ok_or(EditError::Closed)?;
    if draft.unit == Some(unit) {
      return Ok(());
    }

    let before = draft.size;
    rescale_for_unit(draft, unit);
    debug!("Unit changed to {unit}, size {before:?} -> {:?}", draft.size);

    self.state = DialogState::OpenDirty;
    self.revalidate(Field::Unit);
    self.revalidate(Field::Size);
    Ok(())
  }

  fn revalidate(&mut self, field: Field) {
    let Some(draft) = &self.draft else {
      return;
    };
    match validate_field(draft, field) {
      Ok(()) => {
        self.errors.remove(field);
      }
      Err(error) => {
        self.errors.insert(field, error);
      }
    }
  }

  /// Validate everything and hand the payload to the ok callback.
  ///
  /// On failure the dialog stays open with the errors recorded and the
  /// callback is not invoked.
  pub fn submit(&mut self) -> Result<(), SubmitError> {
    let Some(draft) = &self.draft else {
      return Err(SubmitError::Closed);
    };

    self.state = DialogState::Submitting;
    match build_payload(draft) {
      Ok(payload) => {
        info!("Submitting volume '{}' ({})", payload.name, payload.size);
        self.draft = None;
        self.errors = ValidationErrors::default();
        self.state = DialogState::Closed;
        (self.on_ok)(payload);
        Ok(())
      }
      Err(errors) => {
        let fields: Vec<&str> = errors.fields().map(Field::key).collect();
        warn!("Volume validation failed for: {}", fields.join(", "));
        self.errors = errors.clone();
        self.state = DialogState::OpenDirty;
        Err(SubmitError::Invalid(errors))
      }
    }
  }

  /// Dismiss the dialog and drop the draft. Cancelling a closed dialog does nothing.
  pub fn cancel(&mut self) {
    if !self.state.is_open() {
      return;
    }
    self.draft = None;
    self.errors = ValidationErrors::default();
    self.state = DialogState::Closed;
    debug!("Cancelled volume dialog");
    (self.on_cancel)();
  }
}

impl std::fmt::Debug for VolumeDialog {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("VolumeDialog")
      .field("state", &self.state)
      .field("draft", &self.draft)
      .field("errors", &self.errors)
      .field("tags_loading", &self.tags_loading)
      .finish_non_exhaustive()
  }
}
