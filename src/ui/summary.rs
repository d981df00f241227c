//! End-of-build summary: diagnostics, verdict banner and pointers

use anyhow::Result;
use crossterm::style::Stylize;
use std::io::Write;
use std::path::PathBuf;

use crate::buildlog::{BuildSession, Diagnostic, Severity, Verdict};

/// What the summary needs besides the session itself
#[derive(Debug, Clone, Default)]
pub struct SummaryOptions {
    /// Where the full log was saved, if it was
    pub logfile: Option<PathBuf>,
}

/// Print the summary and return the verdict it announced
///
/// On failure every diagnostic is listed in arrival order; on success only
/// warnings can have been recorded, and they are listed too.
pub fn print_summary<W: Write>(
    out: &mut W,
    session: &BuildSession,
    options: &SummaryOptions,
) -> Result<Verdict> {
    let verdict = session.verdict();

    for diag in &session.diagnostics {
        if verdict == Verdict::Failure || diag.severity == Severity::Warning {
            write_diagnostic(out, diag)?;
        }
    }

    let elapsed = session.elapsed_secs();
    match verdict {
        Verdict::Success => {
            writeln!(out, "{} in {}s", "BUILD SUCCESSFUL".green(), elapsed)?;
        }
        Verdict::Failure => {
            writeln!(out, "{} in {}s", "BUILD FAILED".red(), elapsed)?;
            if session.tasks.is_empty() {
                writeln!(out, "No tasks completed")?;
            }
            if let Some(ref logfile) = options.logfile {
                writeln!(out, "See {} for more information", logfile.display())?;
            }
        }
    }

    out.flush()?;
    Ok(verdict)
}

fn write_diagnostic<W: Write>(out: &mut W, diag: &Diagnostic) -> Result<()> {
    let icon = diag.severity.icon().with(diag.severity.color());
    writeln!(out, "{}  {}", icon, diag.display_line())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildlog::{LineEvent, Task};
    use chrono::{Duration, Utc};

    fn summary(session: &BuildSession, options: &SummaryOptions) -> (Verdict, String) {
        let mut out = Vec::new();
        let verdict = print_summary(&mut out, session, options).unwrap();
        (verdict, String::from_utf8(out).unwrap())
    }

    fn diag(location: &str, description: &str, severity: Severity) -> LineEvent {
        LineEvent::Diagnostic(Diagnostic {
            location: location.to_string(),
            description: description.to_string(),
            severity,
        })
    }

    #[test]
    fn test_success_banner_with_elapsed() {
        let start = Utc::now();
        let mut session = BuildSession::started_at(start);
        session.record(LineEvent::Task(Task::new("build", "UP-TO-DATE")));
        session.finish_at(start + Duration::seconds(12));

        let (verdict, out) = summary(&session, &SummaryOptions::default());
        assert_eq!(verdict, Verdict::Success);
        assert!(out.contains("BUILD SUCCESSFUL"));
        assert!(out.contains(" in 12s"));
        assert!(!out.contains("No tasks completed"));
    }

    #[test]
    fn test_failure_dumps_diagnostics_in_order() {
        let mut session = BuildSession::start();
        session.record(LineEvent::Task(Task::new("compileKotlin", "FAILED")));
        session.record(diag("src/Foo.kt:10:5", "unresolved reference", Severity::Error));
        session.record(diag("src/Bar.kt:1:1", "unused import", Severity::Warning));
        session.finish();

        let options = SummaryOptions {
            logfile: Some(PathBuf::from("build.log")),
        };
        let (verdict, out) = summary(&session, &options);

        assert_eq!(verdict, Verdict::Failure);
        let foo = out.find("src/Foo.kt:10:5: unresolved reference").unwrap();
        let bar = out.find("src/Bar.kt:1:1: unused import").unwrap();
        let banner = out.find("BUILD FAILED").unwrap();
        assert!(foo < bar && bar < banner);
        assert!(out.contains("See build.log for more information"));
    }

    #[test]
    fn test_no_tasks_notice() {
        let session = BuildSession::start();
        let (verdict, out) = summary(&session, &SummaryOptions::default());

        assert_eq!(verdict, Verdict::Failure);
        assert!(out.contains("BUILD FAILED"));
        assert!(out.contains(" in 0s"));
        assert!(out.contains("No tasks completed"));
        assert!(!out.contains("See "));
    }

    #[test]
    fn test_success_lists_warnings() {
        let mut session = BuildSession::start();
        session.record(LineEvent::Task(Task::new("build", "UP-TO-DATE")));
        session.record(diag("A.kt:2:3", "deprecated call", Severity::Warning));

        let (_, out) = summary(&session, &SummaryOptions::default());
        assert!(out.contains("A.kt:2:3: deprecated call"));
        assert!(out.contains("BUILD SUCCESSFUL"));
    }
}
