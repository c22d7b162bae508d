use std::cell::RefCell;
use std::io::{self, Write};

use forecast::{DisplayMessage, ResultView};
use tracing::error;

/// Writes each message as one line, the terminal's equivalent of replacing
/// the output heading.
pub struct TerminalView<W: Write> {
    out: RefCell<W>,
}

impl TerminalView<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> ResultView for TerminalView<W> {
    fn show(&self, message: &DisplayMessage) {
        let mut out = self.out.borrow_mut();
        if let Err(e) = writeln!(out, "{}", message).and_then(|_| out.flush()) {
            error!("Failed to write result: {}", e);
        }
    }
}
