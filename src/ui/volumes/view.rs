use std::cell::RefCell;
use std::rc::Rc;

use gpui::{Context, ParentElement, Render, Styled, Window, div, prelude::*, px};
use gpui_component::{
  Root, Sizable,
  button::{Button, ButtonVariants},
  h_flex,
  theme::ActiveTheme,
  v_flex,
};

use crate::settings::Settings;
use crate::ui::dialogs;
use crate::volume::SubmitPayload;

/// Top-level view: a Create Volume button and the volumes submitted so far
pub struct VolumesView {
  settings: Settings,
  created: Rc<RefCell<Vec<SubmitPayload>>>,
}

impl VolumesView {
  pub fn new(settings: Settings) -> Self {
    Self {
      settings,
      created: Rc::default(),
    }
  }

  fn open_create_dialog(&self, window: &mut Window, cx: &mut Context<'_, Self>) {
    let created = self.created.clone();
    dialogs::open_create_volume_dialog(
      &self.settings,
      Box::new(move |payload: SubmitPayload| {
        match serde_json::to_string(&payload) {
          Ok(json) => tracing::info!("Volume created: {json}"),
          Err(e) => tracing::warn!("Failed to serialize volume payload: {e}"),
        }
        created.borrow_mut().push(payload);
      }),
      Box::new(|| tracing::debug!("Create volume dismissed")),
      // Tags come from settings and are loaded before the window opens
      false,
      window,
      cx,
    );
  }
}

impl Render for VolumesView {
  fn render(&mut self, window: &mut Window, cx: &mut Context<'_, Self>) -> impl IntoElement {
    let colors = cx.theme().colors;
    let created = self.created.borrow().clone();
    let options = self.settings.dialog.clone();

    v_flex()
      .size_full()
      .bg(colors.background)
      .child(
        h_flex()
          .w_full()
          .px(px(16.))
          .py(px(12.))
          .justify_between()
          .items_center()
          .border_b_1()
          .border_color(colors.border)
          .child(div().text_lg().text_color(colors.foreground).child("Volumes"))
          .child(
            Button::new("create-volume")
              .label("Create Volume")
              .primary()
              .small()
              .on_click(cx.listener(|this, _ev, window, cx| {
                this.open_create_dialog(window, cx);
              })),
          ),
      )
      .when(created.is_empty(), |el| {
        el.child(
          div()
            .p(px(16.))
            .text_sm()
            .text_color(colors.muted_foreground)
            .child("No volumes created yet"),
        )
      })
      .children(created.into_iter().map(|volume| {
        h_flex()
          .w_full()
          .px(px(16.))
          .py(px(8.))
          .gap(px(16.))
          .border_b_1()
          .border_color(colors.border)
          .child(div().flex_1().text_sm().text_color(colors.foreground).child(volume.name.clone()))
          .child(div().w(px(80.)).text_sm().text_color(colors.muted_foreground).child(volume.size.clone()))
          .child(
            div()
              .w(px(100.))
              .text_sm()
              .text_color(colors.muted_foreground)
              .child(format!("{} replicas", volume.number_of_replicas)),
          )
          .child(
            div()
              .w(px(120.))
              .text_sm()
              .text_color(colors.muted_foreground)
              .child(options.frontend_label(&volume.frontend).to_string()),
          )
          .child(
            div()
              .w(px(120.))
              .text_sm()
              .text_color(colors.muted_foreground)
              .child(volume.access_mode.label()),
          )
      }))
      .children(Root::render_dialog_layer(window, cx))
  }
}
