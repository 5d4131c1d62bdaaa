//! Centralized dialog helpers
//!
//! Opens the Create Volume form inside the window-level dialog with its footer
//! buttons wired to the form's submit and cancel. Escape and overlay clicks
//! dismiss through the same cancel path.

use gpui::{App, AppContext, IntoElement, ParentElement, Styled, Window, px};
use gpui_component::{
  WindowExt,
  button::{Button, ButtonVariants},
};

use crate::settings::Settings;
use crate::ui::volumes::CreateVolumeDialog;
use crate::volume::{CancelCallback, OkCallback};

/// Opens the Create Volume dialog with Cancel and Create buttons configured
pub fn open_create_volume_dialog(
  settings: &Settings,
  on_ok: OkCallback,
  on_cancel: CancelCallback,
  tags_loading: bool,
  window: &mut Window,
  cx: &mut App,
) {
  let options = settings.dialog.clone();
  let item = settings.default_volume.clone();
  let dialog_entity = cx.new(|cx| CreateVolumeDialog::new(options, &item, on_ok, on_cancel, tags_loading, cx));
  let modal = dialog_entity.read(cx).modal_options();

  window.open_dialog(cx, move |dialog, _window, _cx| {
    let dialog_clone = dialog_entity.clone();
    let dialog_for_close = dialog_entity.clone();

    dialog
      .title(modal.title)
      .min_w(px(modal.width))
      .child(dialog_entity.clone())
      // No-op once the form has submitted or been cancelled
      .on_close(move |_ev, _window, cx| {
        dialog_for_close.update(cx, |dialog, _cx| dialog.cancel());
      })
      .footer(move |_dialog_state, _, _window, _cx| {
        let dialog_for_cancel = dialog_clone.clone();
        let dialog_for_create = dialog_clone.clone();
        vec![
          Button::new("cancel")
            .label("Cancel")
            .ghost()
            .on_click(move |_ev, window, cx| {
              dialog_for_cancel.update(cx, |dialog, _cx| dialog.cancel());
              window.close_dialog(cx);
            })
            .into_any_element(),
          Button::new("create")
            .label("Create")
            .primary()
            .on_click(move |_ev, window, cx| {
              // Validation errors keep the dialog open and render next to their fields
              if dialog_for_create.update(cx, |dialog, cx| dialog.submit(cx)) {
                window.close_dialog(cx);
              }
            })
            .into_any_element(),
        ]
      })
  });
}
