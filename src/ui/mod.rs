pub mod dialogs;
pub mod volumes;
