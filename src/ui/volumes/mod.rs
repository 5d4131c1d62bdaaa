mod create_dialog;
mod view;

pub use create_dialog::CreateVolumeDialog;
pub use view::VolumesView;
