use std::io::{self, Stderr};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};

pub type Tui = Terminal<CrosstermBackend<Stderr>>;

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

/// Multiplexes terminal input with a tick timer used for the loading
/// animation and for polling the in-flight translation task.
pub struct EventHandler {
    reader: EventStream,
    tick: tokio::time::Interval,
}

impl EventHandler {
    pub fn new() -> Self {
        Self {
            reader: EventStream::new(),
            tick: tokio::time::interval(Duration::from_millis(250)),
        }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        loop {
            tokio::select! {
                _ = self.tick.tick() => return Some(AppEvent::Tick),
                event = self.reader.next() => match event? {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        return Some(AppEvent::Key(key));
                    }
                    Ok(Event::Resize(w, h)) => return Some(AppEvent::Resize(w, h)),
                    // Key releases and everything else are ignored
                    Ok(_) => continue,
                    Err(_) => return None,
                },
            }
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    execute!(io::stderr(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(io::stderr());
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

pub fn restore() -> Result<()> {
    execute!(io::stderr(), LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

/// Install panic hook to restore terminal on panic
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        original_hook(panic_info);
    }));
}
