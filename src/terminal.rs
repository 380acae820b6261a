//! Raw-mode terminal session.
//!
//! [`Tui::enter`] switches the terminal to raw mode on the alternate screen
//! and hands back a guard. The screen is given back by [`Tui::exit`], by
//! dropping the guard on an early return, or by the panic hook.

use std::io::{self, Stdout};
use std::panic;
use std::sync::Once;

use crossterm::{
    ExecutableCommand,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend};

static PANIC_HOOK: Once = Once::new();

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    active: bool,
}

impl Tui {
    pub fn enter() -> io::Result<Self> {
        PANIC_HOOK.call_once(install_panic_hook);
        enable_raw_mode()?;
        if let Err(e) = io::stdout().execute(EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }

        let terminal = match Terminal::new(CrosstermBackend::new(io::stdout())) {
            Ok(terminal) => terminal,
            Err(e) => {
                let _ = leave();
                return Err(e);
            }
        };
        tracing::debug!("entered raw mode");
        Ok(Self {
            terminal,
            active: true,
        })
    }

    pub fn draw<F>(&mut self, render: F) -> io::Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(render).map(|_| ())
    }

    /// Leave raw mode, reporting any failure to do so.
    pub fn exit(mut self) -> io::Result<()> {
        self.active = false;
        leave()
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if self.active {
            if let Err(e) = leave() {
                tracing::error!(error = %e, "could not restore the terminal");
            }
        }
    }
}

fn leave() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    tracing::debug!("left raw mode");
    Ok(())
}

fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = leave();
        tracing::error!(%info, "panicked");
        previous(info);
    }));
}
