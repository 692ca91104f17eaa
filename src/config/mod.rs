//! Configuration for the ranking engine and its chat front end.

#[expect(clippy::module_inception, reason = "the config type lives in its own file like the rest of the crate")]
mod config;

pub use config::{Config, DEFAULT_CONFIG_YAML};
