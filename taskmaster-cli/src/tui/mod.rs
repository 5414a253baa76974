//! Interactive dashboard: input form, task rows, stats and progress bar.

pub mod app;
pub mod form;
pub mod progress;
pub mod row;
pub mod view;

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Instant;
use taskmaster_core::TaskStore;

use crate::config::UiSection;
use app::{App, Control};

pub fn run_tui(store: TaskStore, ui: &UiSection) -> Result<()> {
    enable_raw_mode()?;
    // Declared before the terminal so it drops last, on every exit path.
    let _restore = RestoreOnDrop::new(restore_terminal);
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store, ui, Instant::now());
    let res = event_loop(&mut terminal, &mut app);

    info!(
        "event=tui_exit module=tui status={} count={}",
        if res.is_ok() { "ok" } else { "error" },
        app.snapshot().len()
    );
    res
}

/// Leaves raw mode and the alternate screen and shows the cursor.
/// Failures are logged; there is nothing else left to do with them.
fn restore_terminal() {
    if let Err(err) = disable_raw_mode() {
        warn!("event=terminal_restore module=tui status=error step=raw_mode err={err}");
    }
    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, LeaveAlternateScreen, cursor::Show) {
        warn!("event=terminal_restore module=tui status=error step=screen err={err}");
    }
}

/// Runs its closure once when dropped, including while unwinding from a panic.
struct RestoreOnDrop<F: FnOnce()> {
    restore: Option<F>,
}

impl<F: FnOnce()> RestoreOnDrop<F> {
    fn new(restore: F) -> Self {
        Self {
            restore: Some(restore),
        }
    }
}

impl<F: FnOnce()> Drop for RestoreOnDrop<F> {
    fn drop(&mut self) {
        if let Some(restore) = self.restore.take() {
            restore();
        }
    }
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    let mut redraw = true;
    let mut was_animating = false;

    loop {
        let now = Instant::now();
        if app.sync(now) {
            redraw = true;
        }
        // One extra frame after the bar settles so it lands on the target.
        let animating = app.is_animating(now);
        if redraw || animating || was_animating {
            terminal.draw(|f| view::draw(f, app, now))?;
            redraw = false;
        }
        was_animating = animating;

        if !event::poll(app.tick())? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if app.handle_key(key, Instant::now()) == Control::Quit {
                    break;
                }
                redraw = true;
            }
            Event::Resize(_, _) => redraw = true,
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::cell::Cell;
    use std::panic::{self, AssertUnwindSafe};

    fn counting_guard(count: &Cell<u32>) -> RestoreOnDrop<impl FnOnce() + '_> {
        RestoreOnDrop::new(move || count.set(count.get() + 1))
    }

    #[test]
    fn restore_runs_once_on_normal_exit() {
        let count = Cell::new(0);
        {
            let _restore = counting_guard(&count);
            assert_eq!(count.get(), 0);
        }
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn restore_runs_when_setup_fails_early() {
        let count = Cell::new(0);
        let setup = |fail: bool| -> Result<()> {
            let _restore = counting_guard(&count);
            if fail {
                bail!("alternate screen unavailable");
            }
            Ok(())
        };

        assert!(setup(true).is_err());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn restore_runs_while_unwinding_from_panic() {
        let count = Cell::new(0);
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let _restore = counting_guard(&count);
            panic!("draw failed");
        }));

        assert!(result.is_err());
        assert_eq!(count.get(), 1);
    }
}
