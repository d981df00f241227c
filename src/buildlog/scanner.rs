//! Single pass over a build log stream

use anyhow::{Context, Result};
use std::io::BufRead;
use tracing::{debug, info};

use super::classifier::Classifier;
use super::mirror::LogMirror;
use super::schema::LineEvent;
use super::session::BuildSession;
use crate::ui::Renderer;

/// Read `input` to EOF, recording tasks and diagnostics
///
/// Every raw line goes to `mirror` untouched and every task is handed to
/// `renderer` as soon as it is seen. A read error aborts the scan; the
/// mirror keeps whatever was written up to that point.
pub fn scan<R: BufRead>(
    mut input: R,
    classifier: &Classifier,
    mut mirror: Option<&mut LogMirror>,
    renderer: &mut dyn Renderer,
) -> Result<BuildSession> {
    let mut session = BuildSession::start();
    let mut buf = Vec::new();
    let mut lines = 0usize;

    info!("Scanning build log (build root {})", classifier.build_root);

    loop {
        buf.clear();
        let read = match input.read_until(b'\n', &mut buf) {
            Ok(read) => read,
            Err(e) => {
                // Move off the status line before the error is reported
                let _ = renderer.finalize();
                return Err(e).context("Failed to read build log from stdin");
            }
        };
        if read == 0 {
            break;
        }
        lines += 1;

        let raw = trim_line_ending(&buf);
        let line = String::from_utf8_lossy(raw);

        let event = classifier.classify(&line);
        match &event {
            LineEvent::Task(task) => {
                debug!("Task {} ({}, {})", task.name, task.outcome, task.status.as_str());
                renderer.draw_task(task)?;
            }
            LineEvent::Diagnostic(diag) => {
                debug!("Diagnostic {:?} at {}", diag.severity, diag.location);
            }
            LineEvent::Ignore => {}
        }
        session.record(event);

        if let Some(mirror) = mirror.as_deref_mut() {
            mirror.write_line(raw)?;
        }
    }

    session.finish();
    renderer.finalize()?;

    info!(
        "Scan finished: {} lines, {} tasks, {} errors, {} warnings in {}s",
        lines,
        session.tasks.len(),
        session.error_count(),
        session.warning_count(),
        session.elapsed_secs()
    );

    Ok(session)
}

/// Strip a trailing `\n` or `\r\n`
fn trim_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}
