//! Gradle build log interpretation
//!
//! Lines read from the build's console output are classified into task
//! announcements and compiler diagnostics and accumulated into a
//! [`BuildSession`], which decides whether the build succeeded.

pub mod classifier;
pub mod mirror;
pub mod scanner;
pub mod schema;
pub mod session;

pub use classifier::{build_root_prefix, classify, strip_build_root, Classifier};
pub use mirror::LogMirror;
pub use scanner::scan;
pub use schema::{Diagnostic, LineEvent, Severity, Task, TaskStatus};
pub use session::{BuildSession, Verdict};
