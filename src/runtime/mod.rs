use std::env;
use std::io;

use anyhow::{Context, Result};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::app::App;
use crate::remote::RemoteGateway;

mod event_loop;
mod logging;
mod settings;
mod startup;

pub fn run() -> Result<()> {
    let settings = settings::load_settings(env::args().nth(1));

    let log_path = logging::init_tracing_to_file(&settings.log).context("initialize logging")?;
    info!(log = %log_path.display(), store = %settings.remote.base_url, "starting musictop");

    let gateway = RemoteGateway::spawn(&settings.remote).context("start remote gateway")?;
    let mut app = App::new(&settings);
    startup::request_initial_load(&mut app, &gateway);

    let mut terminal = init_terminal().context("initialize terminal")?;

    let run_result: Result<()> = (|| {
        let mut state = event_loop::EventLoopState::default();
        event_loop::run(&mut terminal, &settings, &mut app, &gateway, &mut state)
    })();

    let restore_result = restore_terminal(&mut terminal).context("restore terminal");
    gateway.shutdown();
    info!("bye");

    restore_result?;
    run_result
}

fn init_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
