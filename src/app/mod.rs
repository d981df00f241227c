pub mod config;

pub use config::{Config, ConfigOverrides, Settings};
