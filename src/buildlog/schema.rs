//! Data types recorded while scanning a build log

/// Final status of a Gradle task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Task ran, was up to date, skipped, or restored from cache
    Success,
    /// Gradle reported the task as FAILED
    Failed,
}

impl TaskStatus {
    /// Map a Gradle outcome token to a status
    pub fn from_outcome(token: &str) -> Self {
        match token {
            "FAILED" => TaskStatus::Failed,
            _ => TaskStatus::Success,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Success => "success",
            TaskStatus::Failed => "failed",
        }
    }
}

/// A task announcement seen in the stream
///
/// Tasks are identified by arrival order, not by name: Gradle announces
/// the same task more than once and every announcement is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Task path without the leading `:`
    pub name: String,
    pub status: TaskStatus,
    /// Raw outcome token (UP-TO-DATE, NO-SOURCE, FAILED, ...)
    pub outcome: String,
}

impl Task {
    pub fn new(name: impl Into<String>, outcome: impl Into<String>) -> Self {
        let outcome = outcome.into();
        Self {
            name: name.into(),
            status: TaskStatus::from_outcome(&outcome),
            outcome,
        }
    }

    pub fn failed(&self) -> bool {
        self.status == TaskStatus::Failed
    }
}

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    /// Get severity icon
    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Warning => "⚠",
            Severity::Error => "✗",
        }
    }

    /// Get color for crossterm
    pub fn color(&self) -> crossterm::style::Color {
        use crossterm::style::Color;
        match self {
            Severity::Warning => Color::Yellow,
            Severity::Error => Color::Red,
        }
    }
}

/// A compiler error or warning extracted from the stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Source location, relative to the build root when it could be stripped
    pub location: String,
    pub description: String,
    pub severity: Severity,
}

impl Diagnostic {
    /// `location: description`, as shown in the summary
    pub fn display_line(&self) -> String {
        format!("{}: {}", self.location, self.description)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Result of classifying a single input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    Task(Task),
    Diagnostic(Diagnostic),
    Ignore,
}
