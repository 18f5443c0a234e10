//! Terminal setup and the interactive event loop.
//!
//! The loop polls crossterm for input with a timeout of one frame, pumps the
//! frame queue with the monotonic time since startup and repaints only when
//! the rendered view changed.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use tracing::info;

use crate::app::{App, Control};
use crate::config::Config;
use crate::error::Result;

/// Run the interactive UI on stdout until the user quits.
///
/// # Errors
///
/// Returns [`Error::Io`](crate::Error::Io) if the terminal cannot be set up
/// or written to.
pub fn run(config: &Config) -> Result<()> {
    let stdout = io::stdout();
    run_with_writer(config, stdout)
}

/// Run the interactive UI on `writer`.
///
/// The terminal is restored on every exit path, including errors from the
/// event loop.
///
/// # Errors
///
/// Returns [`Error::Io`](crate::Error::Io) if the terminal cannot be set up
/// or written to.
pub fn run_with_writer<W: Write>(config: &Config, mut writer: W) -> Result<()> {
    enable_raw_mode()?;
    if config.alt_screen {
        execute!(writer, EnterAlternateScreen)?;
    }
    execute!(writer, Hide)?;

    let result = event_loop(config, &mut writer);

    let _ = execute!(writer, Show);
    if config.alt_screen {
        let _ = execute!(writer, LeaveAlternateScreen);
    }
    let _ = disable_raw_mode();

    result
}

fn event_loop<W: Write>(config: &Config, writer: &mut W) -> Result<()> {
    let mut app = App::new(config);
    let clock = Instant::now();
    let frame_duration = Duration::from_secs_f64(1.0 / f64::from(config.fps));
    info!(fps = config.fps, tab = %config.initial_tab, "event loop started");

    let mut last_view = String::new();
    render(&app, writer, &mut last_view)?;

    loop {
        if event::poll(frame_duration)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && app.handle_key(key, clock.elapsed()) == Control::Quit
        {
            break;
        }

        app.tick(clock.elapsed());
        render(&app, writer, &mut last_view)?;
    }

    info!("event loop finished");
    Ok(())
}

fn render<W: Write>(app: &App, writer: &mut W, last_view: &mut String) -> Result<()> {
    let view = app.view();
    if view == *last_view {
        return Ok(());
    }

    execute!(writer, MoveTo(0, 0), Clear(ClearType::All))?;
    // Raw mode does not translate line feeds.
    write!(writer, "{}", view.replace('\n', "\r\n"))?;
    writer.flush()?;

    *last_view = view;
    Ok(())
}
