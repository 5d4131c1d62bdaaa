//! Longhorn volume provisioning dialog
//!
//! - `volume` - headless form: draft, validation, payload and dialog lifecycle
//! - `settings` - option lists and defaults loaded from the user's config
//! - `ui` - gpui views (behind the `gui` feature)

pub mod settings;
pub mod volume;

#[cfg(feature = "gui")]
pub mod ui;
