pub mod status_line;
pub mod summary;

pub use status_line::{terminal_width, TerminalRenderer, FALLBACK_WIDTH};
pub use summary::{print_summary, SummaryOptions};

use anyhow::Result;

use crate::buildlog::Task;

/// Live progress display fed with tasks in arrival order
pub trait Renderer {
    /// Replace the current status line with `task`
    fn draw_task(&mut self, task: &Task) -> Result<()>;

    /// Leave the status line behind once the stream has ended
    fn finalize(&mut self) -> Result<()>;
}

/// Renderer that only records what it was asked to draw
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingRenderer {
    pub drawn: Vec<Task>,
    pub finalized: usize,
}

#[cfg(test)]
impl Renderer for RecordingRenderer {
    fn draw_task(&mut self, task: &Task) -> Result<()> {
        self.drawn.push(task.clone());
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.finalized += 1;
        Ok(())
    }
}
