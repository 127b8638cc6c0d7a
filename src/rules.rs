//! Validation rules for configuration values.
//!
//! This file is also compiled into `build.rs`, so it only depends on `core`.

use core::fmt;

/// Value used in `cfg.toml` for a pin that is not wired.
pub const PIN_UNSET: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleError {
    InvalidPin(i64),
    PinRequired,
    PartialRgb,
    InvalidPort(i64),
    InvalidInterval(i64),
    InvalidBuiltinLedMode(i64),
    EmptyTopic,
    WildcardInTopic,
    DuplicateTopic,
    InsecureFirebaseHost,
    EmptyFirebaseHost,
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleError::InvalidPin(v) => write!(f, "pin {} is neither -1 nor in 0..=255", v),
            RuleError::PinRequired => write!(f, "pin must be wired"),
            RuleError::PartialRgb => write!(f, "only some of red, green and blue are wired, the others are ignored"),
            RuleError::InvalidPort(v) => write!(f, "port {} is not in 1..=65535", v),
            RuleError::InvalidInterval(v) => write!(f, "interval {} ms must be positive", v),
            RuleError::InvalidBuiltinLedMode(v) => write!(f, "built-in LED mode {} is not -1, 0 or 1", v),
            RuleError::EmptyTopic => write!(f, "topic is empty"),
            RuleError::WildcardInTopic => write!(f, "topic contains '+', '#' or NUL"),
            RuleError::DuplicateTopic => write!(f, "topics must be distinct"),
            RuleError::InsecureFirebaseHost => write!(f, "Firebase host must start with https://"),
            RuleError::EmptyFirebaseHost => write!(f, "Firebase host has no hostname"),
        }
    }
}

pub fn check_pin(value: i64) -> Result<Option<u8>, RuleError> {
    if value == PIN_UNSET {
        return Ok(None);
    }
    u8::try_from(value)
        .map(Some)
        .map_err(|_| RuleError::InvalidPin(value))
}

pub fn check_rgb_pins(red: Option<u8>, green: Option<u8>, blue: Option<u8>) -> Result<(), RuleError> {
    match (red, green, blue) {
        (Some(_), Some(_), Some(_)) | (None, None, None) => Ok(()),
        _ => Err(RuleError::PartialRgb),
    }
}

pub fn check_port(value: i64) -> Result<u16, RuleError> {
    match u16::try_from(value) {
        Ok(0) | Err(_) => Err(RuleError::InvalidPort(value)),
        Ok(port) => Ok(port),
    }
}

pub fn check_interval_ms(value: i64) -> Result<u64, RuleError> {
    if value <= 0 {
        return Err(RuleError::InvalidInterval(value));
    }
    Ok(value as u64)
}

pub fn check_builtin_led_mode(value: i64) -> Result<i8, RuleError> {
    match value {
        -1..=1 => Ok(value as i8),
        _ => Err(RuleError::InvalidBuiltinLedMode(value)),
    }
}

// Topic names are published to, so MQTT wildcards are not allowed.
pub fn check_topic(topic: &str) -> Result<(), RuleError> {
    if topic.is_empty() {
        return Err(RuleError::EmptyTopic);
    }
    if topic.contains(['+', '#', '\0']) {
        return Err(RuleError::WildcardInTopic);
    }
    Ok(())
}

pub fn check_topics(topics: &[&str]) -> Result<(), RuleError> {
    for (i, topic) in topics.iter().enumerate() {
        check_topic(topic)?;
        if topics[..i].contains(topic) {
            return Err(RuleError::DuplicateTopic);
        }
    }
    Ok(())
}

pub fn check_firebase_host(host: &str) -> Result<(), RuleError> {
    let rest = host
        .strip_prefix("https://")
        .ok_or(RuleError::InsecureFirebaseHost)?;
    if rest.trim_matches('/').is_empty() {
        return Err(RuleError::EmptyFirebaseHost);
    }
    Ok(())
}

/// Pick a secret: a non-empty environment value wins over the file value.
///
/// Empty values on either side count as unset.
pub fn pick_secret<'a>(from_env: Option<&'a str>, from_file: Option<&'a str>) -> Option<&'a str> {
    from_env
        .filter(|v| !v.is_empty())
        .or(from_file)
        .filter(|v| !v.is_empty())
}
