use std::sync::mpsc;

use anyhow::{bail, Context};
use panel_core::{update, Msg, PanelState};
use panel_engine::ArtifactWriter;
use panel_logging::panel_debug;

use super::cities::ConfiguredCities;
use super::config::PanelConfig;
use super::effects::EffectRunner;
use super::ui::document::PanelDocument;
use super::ui::render::render;
use super::ui::view::PanelView;

/// Runs the panel until every request triggered by `initial` has settled.
pub fn run_app(config: PanelConfig, initial: Vec<Msg>) -> anyhow::Result<()> {
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let engine_config = config
        .engine_config()
        .with_context(|| format!("invalid backend url {:?}", config.base_url))?;
    let cities = Box::new(ConfiguredCities::new(config.cities_by_country.clone()));
    let effects = EffectRunner::new(engine_config, msg_tx, cities)?;
    let view = PanelDocument::new(ArtifactWriter::new(config.output_dir.clone()));

    let mut app = App::new(PanelState::new(config.default_country.clone()), view, effects);
    app.render();

    for msg in initial {
        app.dispatch(msg);
    }
    while app.state.is_busy() {
        let msg = msg_rx
            .recv()
            .context("engine stopped before the panel settled")?;
        app.dispatch(msg);
    }

    match app.state.view().error_message {
        Some(message) => bail!(message),
        None => Ok(()),
    }
}

struct App<V: PanelView> {
    state: PanelState,
    view: V,
    effects: EffectRunner,
}

impl<V: PanelView> App<V> {
    fn new(state: PanelState, view: V, effects: EffectRunner) -> Self {
        Self {
            state,
            view,
            effects,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        panel_debug!("dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        if was_dirty {
            self.render();
        }
        self.effects.enqueue(effects);
    }

    fn render(&mut self) {
        for command in render(&self.state.view()) {
            self.view.apply(command);
        }
        self.view.flush();
    }
}
