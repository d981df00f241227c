//! Accumulated state of one build log scan

use chrono::{DateTime, Utc};

use super::schema::{Diagnostic, LineEvent, Severity, Task};

/// Outcome of a build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Success,
    Failure,
}

impl Verdict {
    /// Process exit code for this verdict
    pub fn exit_code(&self) -> u8 {
        match self {
            Verdict::Success => 0,
            Verdict::Failure => 1,
        }
    }
}

/// Tasks and diagnostics observed in arrival order
#[derive(Debug, Clone)]
pub struct BuildSession {
    pub tasks: Vec<Task>,
    pub diagnostics: Vec<Diagnostic>,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

impl BuildSession {
    /// Start a session now
    pub fn start() -> Self {
        Self::started_at(Utc::now())
    }

    pub fn started_at(started_at: DateTime<Utc>) -> Self {
        Self {
            tasks: Vec::new(),
            diagnostics: Vec::new(),
            started_at,
            ended_at: started_at,
        }
    }

    /// Append a classified line; `Ignore` is a no-op
    pub fn record(&mut self, event: LineEvent) {
        match event {
            LineEvent::Task(task) => self.tasks.push(task),
            LineEvent::Diagnostic(diag) => self.diagnostics.push(diag),
            LineEvent::Ignore => {}
        }
    }

    /// Mark the end of the stream
    pub fn finish(&mut self) {
        self.finish_at(Utc::now());
    }

    pub fn finish_at(&mut self, ended_at: DateTime<Utc>) {
        // Clock adjustments must not produce a negative duration
        self.ended_at = ended_at.max(self.started_at);
    }

    /// Whole seconds between start and end
    pub fn elapsed_secs(&self) -> u64 {
        self.ended_at
            .signed_duration_since(self.started_at)
            .num_seconds()
            .max(0) as u64
    }

    pub fn has_failed_task(&self) -> bool {
        self.tasks.iter().any(Task::failed)
    }

    pub fn error_count(&self) -> usize {
        self.count_severity(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count_severity(Severity::Warning)
    }

    fn count_severity(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// A build is ok when at least one task ran, none failed, and the
    /// compiler reported no errors
    pub fn is_build_ok(&self) -> bool {
        !self.tasks.is_empty() && self.error_count() == 0 && !self.has_failed_task()
    }

    pub fn verdict(&self) -> Verdict {
        if self.is_build_ok() {
            Verdict::Success
        } else {
            Verdict::Failure
        }
    }
}
