//! Terminal setup and the event loop.

use std::{io::Stdout, ops::ControlFlow, time::Duration};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event as CEvent, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tracing::{debug, info};

use crate::{
    app::App,
    endpoint::{AssistantClient, Reply},
    error,
    ui::draw_ui,
};

#[derive(Debug)]
pub enum AppEvent {
    Tick,
    Input(KeyEvent),
    Reply(error::Result<Reply>),
}

type Term = Terminal<CrosstermBackend<Stdout>>;

fn enter() -> Result<Term> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("create terminal")
}

fn leave(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Puts the terminal back before the default hook prints the panic.
fn install_panic_hook() {
    let prev = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
        tracing::error!(panic = %info, "client panicked");
        prev(info);
    }));
}

fn dispatch(client: &AssistantClient, command: String, tx: &UnboundedSender<AppEvent>) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let outcome = client.send_command(&command).await;
        let _ = tx.send(AppEvent::Reply(outcome));
    });
}

/// One turn of the input thread. Breaks once the terminal stops answering
/// polls or the event loop has gone away.
fn input_step(
    polled: std::io::Result<bool>,
    read: impl FnOnce() -> std::io::Result<CEvent>,
    tx: &UnboundedSender<AppEvent>,
) -> ControlFlow<()> {
    match polled {
        Ok(true) => {
            if let Ok(CEvent::Key(key)) = read() {
                if key.kind == KeyEventKind::Press && tx.send(AppEvent::Input(key)).is_err() {
                    return ControlFlow::Break(());
                }
            }
            ControlFlow::Continue(())
        }
        Ok(false) if tx.is_closed() => ControlFlow::Break(()),
        Ok(false) => ControlFlow::Continue(()),
        Err(e) => {
            tracing::error!(error = %e, "terminal input unavailable, stopping input thread");
            ControlFlow::Break(())
        }
    }
}

pub async fn run(mut app: App, client: AssistantClient) -> Result<()> {
    install_panic_hook();
    let mut terminal = enter()?;
    info!(endpoint = client.url(), "chat client started");

    let (tx, mut rx) = unbounded_channel::<AppEvent>();

    let tx_input = tx.clone();
    std::thread::spawn(move || {
        while input_step(event::poll(Duration::from_millis(250)), event::read, &tx_input).is_continue() {}
    });

    let tx_tick = tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(120));
        loop {
            interval.tick().await;
            if tx_tick.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    let mut tick: usize = 0;
    let result = loop {
        if let Err(e) = terminal.draw(|f| draw_ui(f, &app, tick)) {
            break Err(e).context("draw");
        }
        let Some(ev) = rx.recv().await else {
            break Ok(());
        };
        match ev {
            AppEvent::Tick => tick = tick.wrapping_add(1),
            AppEvent::Input(key) => {
                if let Some(command) = app.handle_key(key) {
                    dispatch(&client, command, &tx);
                }
            }
            AppEvent::Reply(outcome) => {
                debug!(ok = outcome.is_ok(), "reply received");
                app.complete_send(outcome);
            }
        }
        if app.quit {
            break Ok(());
        }
    };

    leave(&mut terminal)?;
    info!("chat client stopped");
    result
}
