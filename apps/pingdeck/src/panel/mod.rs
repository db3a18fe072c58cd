pub mod draw;
pub mod model;

pub use draw::{render_panel, UiOpts};
pub use model::{Field, PanelState};

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use pingdeck_client::{spawn_call, ApiClient, CallEvent};
use pingdeck_model::StatusEndpoint;
use std::io::{self, Write};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

/// Runs the interactive panel until the user quits. One UI thread; every
/// triggered call runs on its own worker and reports back over the channel.
pub fn run(client: ApiClient, status_path: StatusEndpoint, opts: UiOpts) -> Result<()> {
    let mut state = PanelState::new(status_path);
    let (tx, rx) = mpsc::channel();

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, EnterAlternateScreen, Hide) {
        let _ = terminal::disable_raw_mode();
        return Err(err).context("failed to enter alternate screen");
    }

    let outcome = event_loop(&client, &mut state, &tx, &rx, &opts, &mut stdout);

    let _ = execute!(stdout, Show, LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    outcome
}

fn event_loop(
    client: &ApiClient,
    state: &mut PanelState,
    tx: &Sender<CallEvent>,
    rx: &Receiver<CallEvent>,
    opts: &UiOpts,
    stdout: &mut io::Stdout,
) -> Result<()> {
    loop {
        // apply every finished call before drawing; later completions win
        while let Ok(finished) = rx.try_recv() {
            let stamp = Local::now().format("%H:%M:%S").to_string();
            state.apply(&finished, &stamp);
        }

        let (width, _height) = terminal::size().unwrap_or((80, 24));
        let frame = render_panel(state, opts, width);
        queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
        for (row, line) in frame.lines().enumerate() {
            queue!(stdout, MoveTo(0, row as u16))?;
            stdout.write_all(line.as_bytes())?;
        }
        stdout.flush()?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if handle_key(client, state, tx, key) {
                return Ok(());
            }
        }
    }
}

// true means quit
fn handle_key(
    client: &ApiClient,
    state: &mut PanelState,
    tx: &Sender<CallEvent>,
    key: KeyEvent,
) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return true,
            KeyCode::Char('s') => check_status(client, state, tx),
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Esc => return true,
        KeyCode::Tab => state.toggle_focus(),
        KeyCode::Left => state.prev_protocol(),
        KeyCode::Right => state.next_protocol(),
        KeyCode::Backspace => state.backspace(),
        KeyCode::Enter => trigger_probe(client, state, tx),
        KeyCode::Char(ch) => state.insert_char(ch),
        _ => {}
    }
    false
}

fn trigger_probe(client: &ApiClient, state: &mut PanelState, tx: &Sender<CallEvent>) {
    // disabled action: no endpoint, no dispatch
    let Some(endpoint) = state.endpoint() else {
        return;
    };
    let seq = state.begin_call(&endpoint);
    spawn_call(client, &endpoint, seq, tx.clone());
}

fn check_status(client: &ApiClient, state: &mut PanelState, tx: &Sender<CallEvent>) {
    let endpoint = state.status_path.path().to_string();
    let seq = state.begin_call(&endpoint);
    spawn_call(client, &endpoint, seq, tx.clone());
}
