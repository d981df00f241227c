//! Single-line progress display redrawn in place

use anyhow::{Context, Result};
use crossterm::{
    cursor::MoveToColumn,
    queue,
    style::{Print, Stylize},
    terminal::{Clear, ClearType},
};
use std::io::Write;
use tracing::debug;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::Renderer;
use crate::buildlog::Task;

/// Width used when the terminal size cannot be queried (e.g. stdout is a pipe)
pub const FALLBACK_WIDTH: u16 = 80;

const MARKER: &str = "▸";
const FAILED_SUFFIX: &str = "FAILED";
const ELLIPSIS: &str = "…";

/// Query the terminal width once, falling back to `fallback`
pub fn terminal_width(fallback: u16) -> u16 {
    match crossterm::terminal::size() {
        Ok((cols, _)) if cols > 0 => cols,
        Ok(_) => fallback,
        Err(e) => {
            debug!("Terminal size unavailable, using {} columns: {}", fallback, e);
            fallback
        }
    }
}

/// Draws the latest task over the previous one without emitting newlines
pub struct TerminalRenderer<W: Write> {
    out: W,
    width: u16,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, width: u16) -> Self {
        Self { out, width }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }

    /// Task name shortened so the whole line stays within one row
    fn fit_name(&self, task: &Task) -> String {
        // The last column is left free so the cursor never wraps
        let mut budget = usize::from(self.width).saturating_sub(1);
        budget = budget.saturating_sub(MARKER.width() + 1);
        if task.failed() {
            budget = budget.saturating_sub(FAILED_SUFFIX.width() + 1);
        }
        truncate(&task.name, budget)
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn draw_task(&mut self, task: &Task) -> Result<()> {
        let name = self.fit_name(task);

        queue!(
            self.out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(MARKER.yellow()),
            Print(" "),
            Print(name)
        )?;
        if task.failed() {
            queue!(self.out, Print(" "), Print(FAILED_SUFFIX.red()))?;
        }

        self.out.flush().context("Failed to flush status line")
    }

    fn finalize(&mut self) -> Result<()> {
        queue!(self.out, Print("\n"))?;
        self.out.flush().context("Failed to flush status line")
    }
}

/// Cut `s` to at most `max` terminal columns, marking the cut with `…`
fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let budget = max - ELLIPSIS.width();
    let mut cut = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        cut.push(c);
    }
    cut.push_str(ELLIPSIS);
    cut
}
