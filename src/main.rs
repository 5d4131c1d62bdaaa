use anyhow::{Context as _, Result};
use gpui::{App, AppContext, Application, WindowOptions};
use gpui_component::Root;
use tracing::Level;

use longdeck::settings::Settings;
use longdeck::ui::volumes::VolumesView;

fn init_tracing() {
  let level = if std::env::var_os("LONGDECK_DEBUG").is_some() {
    Level::DEBUG
  } else {
    Level::INFO
  };
  tracing_subscriber::fmt().with_max_level(level).with_target(false).init();
}

fn main() -> Result<()> {
  init_tracing();

  let settings = Settings::load().context("Failed to load settings")?;

  Application::new()
    .with_assets(gpui_component_assets::Assets)
    .run(move |cx: &mut App| {
      gpui_component::init(cx);

      let settings = settings.clone();
      let opened = cx.open_window(WindowOptions::default(), |window, cx| {
        let view = cx.new(|_cx| VolumesView::new(settings));
        cx.new(|cx| Root::new(view, window, cx))
      });
      if let Err(e) = opened {
        tracing::error!("Failed to open window: {e}");
        cx.quit();
        return;
      }

      cx.activate(true);
    });

  Ok(())
}
