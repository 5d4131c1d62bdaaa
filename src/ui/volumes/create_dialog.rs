use gpui::{
  App, Context, Entity, FocusHandle, Focusable, Hsla, ParentElement, Render, SharedString, Styled, Window, div,
  prelude::*, px,
};
use gpui_component::{
  Sizable,
  button::{Button, ButtonVariants},
  h_flex,
  input::{Input, InputEvent, InputState},
  label::Label,
  scroll::ScrollableElement,
  switch::Switch,
  theme::ActiveTheme,
  v_flex,
};

use crate::volume::{
  AccessMode, CancelCallback, DialogOptions, Field, FieldEdit, ModalOptions, OkCallback, SizeUnit, TagOption,
  VolumeDialog, VolumeDraft, VolumeItem, format_number, parse_number,
};

/// Theme colors passed to the row helpers
#[derive(Clone)]
struct DialogColors {
  border: Hsla,
  foreground: Hsla,
  muted_foreground: Hsla,
  sidebar: Hsla,
  danger: Hsla,
}

/// Which tag selector a row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
  Node,
  Disk,
}

impl TagKind {
  fn id(self) -> &'static str {
    match self {
      TagKind::Node => "node",
      TagKind::Disk => "disk",
    }
  }

  fn field(self) -> Field {
    match self {
      TagKind::Node => Field::NodeSelector,
      TagKind::Disk => Field::DiskSelector,
    }
  }

  fn toggle(self, tag: String) -> FieldEdit {
    match self {
      TagKind::Node => FieldEdit::ToggleNodeTag(tag),
      TagKind::Disk => FieldEdit::ToggleDiskTag(tag),
    }
  }
}

/// Form view for creating a new Longhorn volume
pub struct CreateVolumeDialog {
  focus_handle: FocusHandle,
  form: VolumeDialog,

  // Input states
  name_input: Option<Entity<InputState>>,
  size_input: Option<Entity<InputState>>,
  replicas_input: Option<Entity<InputState>>,
  node_tag_input: Option<Entity<InputState>>,
  disk_tag_input: Option<Entity<InputState>>,
}

impl CreateVolumeDialog {
  pub fn new(
    options: DialogOptions,
    item: &VolumeItem,
    on_ok: OkCallback,
    on_cancel: CancelCallback,
    tags_loading: bool,
    cx: &mut Context<'_, Self>,
  ) -> Self {
    let focus_handle = cx.focus_handle();

    let mut form = VolumeDialog::new(options, on_ok, on_cancel);
    form.set_tags_loading(tags_loading);
    form.open(Some(item));

    Self {
      focus_handle,
      form,
      name_input: None,
      size_input: None,
      replicas_input: None,
      node_tag_input: None,
      disk_tag_input: None,
    }
  }

  pub fn modal_options(&self) -> ModalOptions {
    self.form.modal_options()
  }

  pub fn set_tags_loading(&mut self, loading: bool, cx: &mut Context<'_, Self>) {
    self.form.set_tags_loading(loading);
    cx.notify();
  }

  fn ensure_inputs(&mut self, window: &mut Window, cx: &mut Context<'_, Self>) {
    let draft = self.form.draft().cloned();

    if self.name_input.is_none() {
      let name = draft.as_ref().map(|d| d.name.clone()).unwrap_or_default();
      self.name_input = Some(cx.new(|cx| {
        let mut state = InputState::new(window, cx).placeholder("Volume name (required)");
        state.insert(&name, window, cx);
        state
      }));
      self.watch_input(Field::Name, window, cx);
    }

    if self.size_input.is_none() {
      let size = draft.as_ref().and_then(|d| d.size).map(format_number).unwrap_or_default();
      self.size_input = Some(cx.new(|cx| {
        let mut state = InputState::new(window, cx).placeholder("Size");
        state.insert(&size, window, cx);
        state
      }));
      self.watch_input(Field::Size, window, cx);
    }

    if self.replicas_input.is_none() {
      let replicas = draft
        .as_ref()
        .and_then(|d| d.number_of_replicas)
        .map(format_number)
        .unwrap_or_default();
      self.replicas_input = Some(cx.new(|cx| {
        let mut state = InputState::new(window, cx).placeholder("Replicas");
        state.insert(&replicas, window, cx);
        state
      }));
      self.watch_input(Field::NumberOfReplicas, window, cx);
    }

    if self.node_tag_input.is_none() {
      self.node_tag_input = Some(cx.new(|cx| InputState::new(window, cx).placeholder("New node tag")));
    }

    if self.disk_tag_input.is_none() {
      self.disk_tag_input = Some(cx.new(|cx| InputState::new(window, cx).placeholder("New disk tag")));
    }
  }

  fn apply(&mut self, edit: FieldEdit) {
    if let Err(e) = self.form.edit(edit) {
      tracing::warn!("Ignored volume form edit: {e}");
    }
  }

  /// Push every keystroke of a text input into the draft
  fn watch_input(&mut self, field: Field, window: &mut Window, cx: &mut Context<'_, Self>) {
    let Some(input) = self.text_input(field).cloned() else {
      return;
    };
    cx.subscribe_in(&input, window, move |this, _state, event: &InputEvent, _window, cx| {
      if matches!(event, InputEvent::Change { .. }) {
        this.on_input_changed(field, cx);
      }
    })
    .detach();
  }

  fn text_input(&self, field: Field) -> Option<&Entity<InputState>> {
    match field {
      Field::Name => self.name_input.as_ref(),
      Field::Size => self.size_input.as_ref(),
      Field::NumberOfReplicas => self.replicas_input.as_ref(),
      _ => None,
    }
  }

  /// Current text of a field's input as a draft edit
  fn input_edit(&self, field: Field, cx: &App) -> Option<FieldEdit> {
    let text = self.text_input(field)?.read(cx).text().to_string();
    match field {
      Field::Name => Some(FieldEdit::Name(text)),
      Field::Size => Some(FieldEdit::Size(parse_number(&text))),
      Field::NumberOfReplicas => Some(FieldEdit::NumberOfReplicas(parse_number(&text))),
      _ => None,
    }
  }

  fn on_input_changed(&mut self, field: Field, cx: &mut Context<'_, Self>) {
    if let Some(edit) = self.input_edit(field, cx) {
      self.apply(edit);
      cx.notify();
    }
  }

  /// Copy the text inputs into the draft
  fn sync_inputs(&mut self, cx: &App) {
    for field in [Field::Name, Field::Size, Field::NumberOfReplicas] {
      if let Some(edit) = self.input_edit(field, cx) {
        self.apply(edit);
      }
    }
  }

  fn change_unit(&mut self, unit: SizeUnit, window: &mut Window, cx: &mut Context<'_, Self>) {
    self.sync_inputs(cx);
    if let Err(e) = self.form.change_unit(unit) {
      tracing::warn!("Ignored unit change: {e}");
      return;
    }

    let size = self
      .form
      .draft()
      .and_then(|d| d.size)
      .map(format_number)
      .unwrap_or_default();
    if let Some(input) = &self.size_input {
      input.update(cx, |state, cx| {
        state.set_value(size, window, cx);
      });
    }
    cx.notify();
  }

  /// Validate and submit. Returns `true` when the payload was handed off.
  pub fn submit(&mut self, cx: &mut Context<'_, Self>) -> bool {
    self.sync_inputs(cx);
    let submitted = self.form.submit().is_ok();
    cx.notify();
    submitted
  }

  pub fn cancel(&mut self) {
    self.form.cancel();
  }

  fn add_tag(&mut self, kind: TagKind, window: &mut Window, cx: &mut Context<'_, Self>) {
    let input = match kind {
      TagKind::Node => self.node_tag_input.clone(),
      TagKind::Disk => self.disk_tag_input.clone(),
    };
    let Some(input) = input else {
      return;
    };

    let text = input.read(cx).text().to_string();
    if let Some(tag) = tag_to_add(self.form.draft(), kind, &text) {
      self.apply(kind.toggle(tag));
    }
    input.update(cx, |state, cx| {
      state.set_value("", window, cx);
    });
    cx.notify();
  }

  fn render_form_row(label: &'static str, content: impl IntoElement, colors: &DialogColors) -> gpui::Div {
    h_flex()
      .w_full()
      .py(px(12.))
      .px(px(16.))
      .justify_between()
      .items_center()
      .child(Label::new(label).text_color(colors.foreground))
      .child(content)
  }

  fn render_form_row_with_desc(
    label: &'static str,
    description: &'static str,
    content: impl IntoElement,
    colors: &DialogColors,
  ) -> gpui::Div {
    h_flex()
      .w_full()
      .py(px(12.))
      .px(px(16.))
      .justify_between()
      .items_center()
      .child(
        v_flex()
          .gap(px(2.))
          .child(Label::new(label).text_color(colors.foreground))
          .child(div().text_xs().text_color(colors.muted_foreground).child(description)),
      )
      .child(content)
  }

  /// Wrap a row with its field's validation error, if any
  fn render_field(&self, field: Field, row: gpui::Div, colors: &DialogColors) -> gpui::Div {
    let error = self.form.error(field).map(ToString::to_string);

    v_flex()
      .w_full()
      .border_b_1()
      .border_color(colors.border)
      .child(row)
      .when_some(error, |el, error| {
        el.child(div().px(px(16.)).pb(px(8.)).text_xs().text_color(colors.danger).child(error))
      })
  }

  fn render_section_header(title: &'static str, colors: &DialogColors) -> gpui::Div {
    div()
      .w_full()
      .py(px(8.))
      .px(px(16.))
      .bg(colors.sidebar)
      .child(div().text_xs().text_color(colors.muted_foreground).child(title))
  }

  fn render_unit_buttons(unit: Option<SizeUnit>, cx: &mut Context<'_, Self>) -> gpui::Div {
    h_flex().gap(px(4.)).children(SizeUnit::ALL.map(|u| {
      Button::new(SharedString::from(format!("unit-{u}")))
        .label(u.as_str())
        .small()
        .when(unit == Some(u), ButtonVariants::primary)
        .when(unit != Some(u), ButtonVariants::ghost)
        .on_click(cx.listener(move |this, _ev, window, cx| {
          this.change_unit(u, window, cx);
        }))
    }))
  }

  fn render_frontend_buttons(&self, draft: &VolumeDraft, cx: &mut Context<'_, Self>) -> gpui::Div {
    let buttons: Vec<Button> = self
      .form
      .options()
      .frontends
      .iter()
      .map(|opt| {
        let value = opt.value.clone();
        let selected = draft.frontend.as_deref() == Some(value.as_str());
        Button::new(SharedString::from(format!("frontend-{value}")))
          .label(opt.label.clone())
          .small()
          .when(selected, ButtonVariants::primary)
          .when(!selected, ButtonVariants::ghost)
          .on_click(cx.listener(move |this, _ev, _window, cx| {
            this.apply(FieldEdit::Frontend(value.clone()));
            cx.notify();
          }))
      })
      .collect();

    h_flex().gap(px(4.)).children(buttons)
  }

  fn render_data_locality_buttons(&self, draft: &VolumeDraft, cx: &mut Context<'_, Self>) -> gpui::Div {
    let buttons: Vec<Button> = self
      .form
      .options()
      .data_locality_options
      .iter()
      .map(|option| {
        let value = option.clone();
        let selected = draft.data_locality.as_deref() == Some(value.as_str());
        Button::new(SharedString::from(format!("locality-{value}")))
          .label(value.clone())
          .small()
          .when(selected, ButtonVariants::primary)
          .when(!selected, ButtonVariants::ghost)
          .on_click(cx.listener(move |this, _ev, _window, cx| {
            this.apply(FieldEdit::DataLocality(value.clone()));
            cx.notify();
          }))
      })
      .collect();

    h_flex().gap(px(4.)).children(buttons)
  }

  fn render_access_mode_buttons(mode: AccessMode, cx: &mut Context<'_, Self>) -> gpui::Div {
    h_flex().gap(px(4.)).children(AccessMode::ALL.map(|m| {
      Button::new(SharedString::from(format!("access-{m}")))
        .label(m.label())
        .small()
        .when(mode == m, ButtonVariants::primary)
        .when(mode != m, ButtonVariants::ghost)
        .on_click(cx.listener(move |this, _ev, _window, cx| {
          this.apply(FieldEdit::AccessMode(m));
          cx.notify();
        }))
    }))
  }

  fn render_tag_selector(
    &self,
    kind: TagKind,
    available: &[TagOption],
    selected: &[String],
    colors: &DialogColors,
    cx: &mut Context<'_, Self>,
  ) -> gpui::Div {
    let loading = self.form.tags_loading();
    let input = match kind {
      TagKind::Node => self.node_tag_input.clone(),
      TagKind::Disk => self.disk_tag_input.clone(),
    };

    // Known tags first, then free-form tags the user added
    let mut tags: Vec<(String, String)> = available.iter().map(|t| (t.id.clone(), t.name.clone())).collect();
    for tag in selected {
      if !available.iter().any(|t| t.id == *tag) {
        tags.push((tag.clone(), tag.clone()));
      }
    }

    let buttons: Vec<Button> = tags
      .into_iter()
      .map(|(id, name)| {
        let is_selected = selected.contains(&id);
        Button::new(SharedString::from(format!("{}-tag-{id}", kind.id())))
          .label(name)
          .small()
          .loading(loading)
          .when(is_selected, ButtonVariants::primary)
          .when(!is_selected, ButtonVariants::ghost)
          .on_click(cx.listener(move |this, _ev, _window, cx| {
            this.apply(kind.toggle(id.clone()));
            cx.notify();
          }))
      })
      .collect();

    v_flex()
      .w_full()
      .gap(px(8.))
      .p(px(16.))
      .child(h_flex().flex_wrap().gap(px(4.)).children(buttons))
      .when(loading, |el| {
        el.child(div().text_xs().text_color(colors.muted_foreground).child("Loading tags..."))
      })
      .when_some(input, |el, input| {
        el.child(
          h_flex()
            .w_full()
            .gap(px(8.))
            .items_center()
            .child(div().flex_1().child(Input::new(&input).small()))
            .child(
              Button::new(SharedString::from(format!("{}-tag-add", kind.id())))
                .label("Add")
                .small()
                .ghost()
                .loading(loading)
                .on_click(cx.listener(move |this, _ev, window, cx| {
                  this.add_tag(kind, window, cx);
                })),
            ),
        )
      })
  }
}

fn selector(draft: &VolumeDraft, kind: TagKind) -> &[String] {
  match kind {
    TagKind::Node => &draft.node_selector,
    TagKind::Disk => &draft.disk_selector,
  }
}

/// Tag typed into a selector's input, trimmed, unless it is blank or already picked.
/// Adding never deselects; the tag buttons do that.
fn tag_to_add(draft: Option<&VolumeDraft>, kind: TagKind, text: &str) -> Option<String> {
  let tag = text.trim();
  if tag.is_empty() || draft.is_some_and(|d| selector(d, kind).iter().any(|t| t == tag)) {
    return None;
  }
  Some(tag.to_string())
}

impl Focusable for CreateVolumeDialog {
  fn focus_handle(&self, _cx: &App) -> FocusHandle {
    self.focus_handle.clone()
  }
}

impl Render for CreateVolumeDialog {
  fn render(&mut self, window: &mut Window, cx: &mut Context<'_, Self>) -> impl IntoElement {
    self.ensure_inputs(window, cx);

    let theme_colors = cx.theme().colors;
    let colors = DialogColors {
      border: theme_colors.border,
      foreground: theme_colors.foreground,
      muted_foreground: theme_colors.muted_foreground,
      sidebar: theme_colors.sidebar,
      danger: theme_colors.danger,
    };

    let Some(draft) = self.form.draft().cloned() else {
      return v_flex().w_full().into_any_element();
    };

    let name_input = self.name_input.clone().unwrap();
    let size_input = self.size_input.clone().unwrap();
    let replicas_input = self.replicas_input.clone().unwrap();
    let revision_counter_disabled = draft.revision_counter_disabled;
    let node_tags = self.form.options().node_tags.clone();
    let disk_tags = self.form.options().disk_tags.clone();

    let name_row = Self::render_form_row(
      Field::Name.label(),
      div().w(px(300.)).child(Input::new(&name_input).small()),
      &colors,
    );
    let size_row = Self::render_form_row(
      Field::Size.label(),
      h_flex()
        .gap(px(8.))
        .items_center()
        .child(div().w(px(160.)).child(Input::new(&size_input).small()))
        .child(Self::render_unit_buttons(draft.unit, cx)),
      &colors,
    );
    let replicas_row = Self::render_form_row_with_desc(
      Field::NumberOfReplicas.label(),
      "Between 1 and 10",
      div().w(px(100.)).child(Input::new(&replicas_input).small()),
      &colors,
    );
    let frontend_row = Self::render_form_row(
      Field::Frontend.label(),
      self.render_frontend_buttons(&draft, cx),
      &colors,
    );
    let locality_row = Self::render_form_row_with_desc(
      Field::DataLocality.label(),
      "Keep a replica on the node the volume is attached to",
      self.render_data_locality_buttons(&draft, cx),
      &colors,
    );
    let access_row = Self::render_form_row(
      Field::AccessMode.label(),
      Self::render_access_mode_buttons(draft.access_mode, cx),
      &colors,
    );
    let revision_row = Self::render_form_row(
      Field::RevisionCounterDisabled.label(),
      Switch::new("revision-counter-disabled")
        .checked(revision_counter_disabled)
        .on_click(cx.listener(|this, checked: &bool, _window, cx| {
          this.apply(FieldEdit::RevisionCounterDisabled(*checked));
          cx.notify();
        })),
      &colors,
    );
    let node_tag_row = self.render_tag_selector(TagKind::Node, &node_tags, &draft.node_selector, &colors, cx);
    let disk_tag_row = self.render_tag_selector(TagKind::Disk, &disk_tags, &draft.disk_selector, &colors, cx);

    v_flex()
      .w_full()
      .max_h(px(560.))
      .overflow_y_scrollbar()
      .child(self.render_field(Field::Name, name_row, &colors))
      // Unit errors share the size row
      .child(self.render_field(
        if self.form.error(Field::Size).is_some() {
          Field::Size
        } else {
          Field::Unit
        },
        size_row,
        &colors,
      ))
      .child(self.render_field(Field::NumberOfReplicas, replicas_row, &colors))
      .child(self.render_field(Field::Frontend, frontend_row, &colors))
      .child(self.render_field(Field::DataLocality, locality_row, &colors))
      .child(self.render_field(Field::AccessMode, access_row, &colors))
      .child(self.render_field(Field::RevisionCounterDisabled, revision_row, &colors))
      .child(Self::render_section_header(TagKind::Node.field().label(), &colors))
      .child(node_tag_row)
      .child(Self::render_section_header(TagKind::Disk.field().label(), &colors))
      .child(disk_tag_row)
      .into_any_element()
  }
}
