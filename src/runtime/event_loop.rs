use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::warn;

use crate::app::{App, Mode};
use crate::config;
use crate::remote::{RemoteCmd, RemoteGateway};
use crate::ui;

/// State tracked by the runtime event loop across iterations.
#[derive(Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// Main terminal event loop: draws, folds gateway completions into the app,
/// and turns key presses into transitions. Returns `Ok(())` on quit.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    gateway: &RemoteGateway,
    state: &mut EventLoopState,
) -> Result<()> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|f| ui::draw(f, app, &settings.ui))?;

        while let Some(ev) = gateway.try_recv() {
            app.apply_remote_event(ev);
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app, gateway, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn dispatch(gateway: &RemoteGateway, cmd: Option<RemoteCmd>) {
    if let Some(cmd) = cmd {
        if let Err(e) = gateway.send(cmd) {
            warn!(cmd = ?e.0, "remote worker is gone; command dropped");
        }
    }
}

/// Returns `true` when the user asked to quit.
fn handle_key_event(
    key: KeyEvent,
    app: &mut App,
    gateway: &RemoteGateway,
    state: &mut EventLoopState,
) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    if app.mode != Mode::Browse {
        state.pending_gg = false;
        handle_form_key(key, app, gateway);
        return false;
    }

    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => app.select_last(),
        KeyCode::Char('v') | KeyCode::Enter => app.vote_selected(),
        KeyCode::Char('d') => {
            let cmd = app.request_delete_selected();
            dispatch(gateway, cmd);
        }
        KeyCode::Char('e') => app.begin_edit_selected(),
        KeyCode::Char('a') => app.open_add_form(),
        KeyCode::Char('/') => app.open_search_form(),
        KeyCode::Char('r') => {
            let cmd = app.reload();
            dispatch(gateway, Some(cmd));
        }
        KeyCode::Esc => app.clear_search(),
        _ => {}
    }

    false
}

fn handle_form_key(key: KeyEvent, app: &mut App, gateway: &RemoteGateway) {
    match key.code {
        KeyCode::Esc => app.cancel(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
            if let Some(form) = app.active_form_mut() {
                form.next_field();
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = app.active_form_mut() {
                form.pop_char();
            }
        }
        KeyCode::Enter => {
            let cmd = match app.mode {
                Mode::Add => app.submit_new_song(),
                Mode::Search => app.submit_search(),
                Mode::Edit => app.apply_edit(),
                Mode::Browse => None,
            };
            dispatch(gateway, cmd);
        }
        KeyCode::Char(c) if !c.is_control() => {
            if let Some(form) = app.active_form_mut() {
                form.push_char(c);
            }
        }
        _ => {}
    }
}
