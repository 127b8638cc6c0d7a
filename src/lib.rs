//! Build-time configuration of the My Mood light.
//!
//! `build.rs` turns `cfg.toml` into [`config::CONFIG`]. The other modules are
//! the pieces firmware uses to consume it: LED output, MQTT client id and topic
//! routing, Firebase URLs, the publish schedule and LM35 conversion.
#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod constants;
pub mod firebase;
pub mod led;
pub mod logging;
pub mod mqtt;
pub mod pin;
pub mod rules;
pub mod schedule;
pub mod temperature;

pub use config::{Config, ConfigError, CONFIG};
