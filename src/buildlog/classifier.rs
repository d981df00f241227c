//! Line classification for Gradle console output
//!
//! Each line is looked at in isolation. Lines that do not have the expected
//! shape are classified as [`LineEvent::Ignore`]; nothing here ever fails.

use anyhow::{Context, Result};
use std::path::Path;

use super::schema::{Diagnostic, LineEvent, Severity, Task};

const TASK_MARKER: &str = "> Task";
const ERROR_MARKER: &str = "e:";
const WARNING_MARKER: &str = "w:";

/// Minimum tokens in a task line: `>`, `Task`, `:name`, `STATUS`
const TASK_MIN_TOKENS: usize = 4;

/// Classifies lines against a fixed build root
#[derive(Debug, Clone)]
pub struct Classifier {
    /// `file://` prefix stripped from diagnostic locations
    pub build_root: String,
    /// Whether `w:` lines are recorded
    pub include_warnings: bool,
}

impl Classifier {
    pub fn new(build_root: impl Into<String>, include_warnings: bool) -> Self {
        Self {
            build_root: build_root.into(),
            include_warnings,
        }
    }

    pub fn classify(&self, line: &str) -> LineEvent {
        classify(line, &self.build_root, self.include_warnings)
    }
}

/// Classify a single raw line
pub fn classify(line: &str, build_root: &str, include_warnings: bool) -> LineEvent {
    let line = line.trim();

    if line.starts_with(TASK_MARKER) {
        return parse_task(line);
    }

    let severity = if line.starts_with(ERROR_MARKER) {
        Severity::Error
    } else if include_warnings && line.starts_with(WARNING_MARKER) {
        Severity::Warning
    } else {
        return LineEvent::Ignore;
    };

    parse_diagnostic(line, build_root, severity)
}

fn parse_task(line: &str) -> LineEvent {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < TASK_MIN_TOKENS {
        return LineEvent::Ignore;
    }

    let name = tokens[2].strip_prefix(':').unwrap_or(tokens[2]);
    LineEvent::Task(Task::new(name, tokens[3]))
}

fn parse_diagnostic(line: &str, build_root: &str, severity: Severity) -> LineEvent {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 2 {
        return LineEvent::Ignore;
    }

    LineEvent::Diagnostic(Diagnostic {
        location: strip_build_root(tokens[1], build_root).to_string(),
        description: tokens[2..].join(" "),
        severity,
    })
}

/// Shorten a `file://` location to a path relative to the build root
///
/// Locations outside the build root are returned unchanged, which also makes
/// this idempotent.
pub fn strip_build_root<'a>(location: &'a str, build_root: &str) -> &'a str {
    if build_root.is_empty() {
        return location;
    }
    location.strip_prefix(build_root).unwrap_or(location)
}

/// Build the `file://<dir>/` prefix compilers use for files under `dir`
///
/// Symlinks are resolved first; kotlinc reports canonical paths.
pub fn build_root_prefix(dir: &Path) -> Result<String> {
    let canonical = std::fs::canonicalize(dir)
        .with_context(|| format!("Failed to resolve directory: {}", dir.display()))?;
    let mut prefix = format!("file://{}", canonical.to_string_lossy());
    if !prefix.ends_with('/') {
        prefix.push('/');
    }
    Ok(prefix)
}
