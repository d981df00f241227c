pub mod app;
pub mod buildlog;
pub mod ui;
