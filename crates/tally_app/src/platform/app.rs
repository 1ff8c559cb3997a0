use std::io;

use anyhow::Context;
use ratatui::crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use ratatui::crossterm::execute;
use ratatui::DefaultTerminal;
use tally_core::{update, AppState, AppViewModel, ModelRegistry, Msg};
use tally_logging::{tally_info, tally_warn};

use super::effects::EffectRunner;
use super::ui::constants::POLL_INTERVAL;
use super::{config, logging, ui};

pub fn run_app() -> anyhow::Result<()> {
    let config_path = config::config_path();
    let loaded = config::load(&config_path);
    let config = loaded.as_ref().cloned().unwrap_or_default();
    logging::initialize(&config.log_destination(), config.level_filter());
    if let Err(err) = &loaded {
        tally_warn!("Using default configuration: {}", err);
    }

    let registry = ModelRegistry::builtin();
    let runner = EffectRunner::new(&registry).context("starting token engine")?;
    let mut state = AppState::with_registry(registry);
    if let Some(model) = config.default_model {
        state = state.with_selected_model(model);
    }
    tally_info!("token_tally started with model {}", state.selected_model());

    let mut terminal = ratatui::try_init().context("initialising terminal")?;
    let result = execute!(io::stdout(), EnableBracketedPaste)
        .context("enabling bracketed paste")
        .and_then(|()| App::new(state, runner).run(&mut terminal));
    let _ = execute!(io::stdout(), DisableBracketedPaste);
    ratatui::restore();
    result
}

/// Owns the session state; every state change goes through `dispatch`.
struct App {
    state: AppState,
    view: AppViewModel,
    runner: EffectRunner,
    /// Picker row under the cursor, independent of the selected model.
    cursor: usize,
    needs_redraw: bool,
    quit: bool,
}

impl App {
    fn new(state: AppState, runner: EffectRunner) -> Self {
        let view = state.view();
        let cursor = view.selected_row().unwrap_or(0);
        Self {
            state,
            view,
            runner,
            cursor,
            needs_redraw: true,
            quit: false,
        }
    }

    fn run(mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        while !self.quit {
            for msg in self.runner.drain() {
                self.dispatch(msg);
            }

            if self.needs_redraw {
                terminal.draw(|frame| ui::render::render(frame, &self.view, self.cursor))?;
                self.needs_redraw = false;
            }

            if event::poll(POLL_INTERVAL)? {
                self.handle_event(event::read()?);
            }
        }
        tally_info!("token_tally exiting");
        Ok(())
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.view = state.view();
            self.needs_redraw = true;
        }
        self.state = state;
        self.runner.enqueue(effects);
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Paste(payload) => self.dispatch(Msg::DropReceived(payload)),
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Resize(..) => self.needs_redraw = true,
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true
            }
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Home => self.set_cursor(0),
            KeyCode::End => self.set_cursor(self.view.models.len().saturating_sub(1)),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(row) = self.view.models.get(self.cursor) {
                    let key = row.value.clone();
                    self.dispatch(Msg::ModelSelected(key));
                }
            }
            _ => {}
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.view.models.len();
        if len == 0 {
            return;
        }
        let next = (self.cursor as isize + delta).rem_euclid(len as isize) as usize;
        self.set_cursor(next);
    }

    fn set_cursor(&mut self, cursor: usize) {
        if cursor != self.cursor {
            self.cursor = cursor;
            self.needs_redraw = true;
        }
    }
}
