// File: ./src/tui/mod.rs
pub mod action;
pub mod state;
pub mod view;

use crate::config::Config;
use crate::logging;
use crate::session::Session;
use crate::storage::LocalStorage;
use crate::tui::action::Action;
use crate::tui::state::AppState;
use crate::tui::view::draw;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::{error, info, warn};

type Term = Terminal<CrosstermBackend<Stdout>>;

pub fn run() -> Result<()> {
    let (config, config_error) = match Config::load() {
        Ok(cfg) => (cfg, None),
        Err(e) => (Config::default(), Some(e)),
    };

    if let Some(dir) = config.data_dir()
        && let Err(e) = logging::init(&config.log_level, &dir)
    {
        eprintln!("Logging disabled: {:#}", e);
    }
    if let Some(e) = config_error {
        warn!(error = %format!("{e:#}"), "config unreadable, using defaults");
    }

    let custom = config.storage_override();
    let store: &LocalStorage = match &custom {
        Some(own) => own,
        None => LocalStorage::shared(),
    };
    info!(path = ?store.path(), "starting");

    let session = Session::restore(store, &config);
    let mut app = AppState::new(session);

    // Panic Hook: give the terminal back before printing
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        error!("panic: {}", info);
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    let restored = shutdown(&app.session, store, || {
        let raw = disable_raw_mode();
        let screen = execute!(terminal.backend_mut(), LeaveAlternateScreen);
        let cursor = terminal.show_cursor();
        raw?;
        screen?;
        cursor?;
        Ok(())
    });
    info!("exiting");
    result?;
    restored
}

/// Saves the session, then gives the terminal back. A failed teardown never skips the save.
fn shutdown<F>(session: &Session, store: &LocalStorage, teardown: F) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    session.persist(store);
    teardown()
}

fn event_loop(terminal: &mut Term, app: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && let Some(action) = Action::from_key(app, key)
            && app.apply(action)
        {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn session_is_saved_even_when_teardown_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStorage::at(dir.path().join("data.json"));
        let mut session = Session::new(&Config::default());
        let id = session.add_item();
        session.set_item_name(&id, "Milk");

        let result = shutdown(&session, &store, || Err(anyhow!("terminal gone")));

        assert!(result.is_err());
        let saved = store.load().expect("session should be persisted");
        assert_eq!(saved.items[0].id(), id);
        assert_eq!(saved.items[0].name, "Milk");
    }

    #[test]
    fn teardown_runs_after_the_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let store = LocalStorage::at(&path);
        let session = Session::new(&Config::default());

        let result = shutdown(&session, &store, || {
            assert!(path.exists());
            Ok(())
        });
        assert!(result.is_ok());
    }
}
