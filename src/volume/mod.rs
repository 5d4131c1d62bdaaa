//! Create Volume form: draft, field schema, validation and submit transform
//!
//! - `types` - units, access modes and option types
//! - `options` - option lists injected into a dialog
//! - `schema` - the form's fields and which ones are required
//! - `draft` - in-progress form state and user edits
//! - `validate` - per-field validation rules
//! - `transform` - payload construction and unit rescaling
//! - `dialog` - headless dialog lifecycle

mod dialog;
mod draft;
mod options;
mod schema;
mod transform;
mod types;
mod validate;

pub use dialog::*;
pub use draft::*;
pub use options::*;
pub use schema::*;
pub use transform::*;
pub use types::*;
pub use validate::*;
