use core::fmt;

use embassy_time::Duration;

use crate::led::BuiltinLedMode;
use crate::logging::Logging;
use crate::mqtt::Topics;
use crate::pin::Pin;
use crate::rules::{self, RuleError};
use crate::schedule::PublishSchedule;

pub struct Config {
    // LED pins, `None` when not wired
    pub red_pin: Option<Pin>,
    pub green_pin: Option<Pin>,
    pub blue_pin: Option<Pin>,
    pub white_pin: Option<Pin>,

    // LM35 analog input
    pub temperature_pin: Pin,

    // Wi-Fi SSID to connect to
    pub wifi_ssid: &'static str,

    // Wi-Fi pre-shared key (password)
    pub wifi_password: &'static str,

    // Firebase realtime database URL, e.g. https://<project>.firebaseio.com/
    pub firebase_host: &'static str,

    // Firebase database secret
    pub firebase_auth: &'static str,

    // MQTT broker hostname or IP address
    pub mqtt_hostname: &'static str,

    // MQTT port (usually 1883 or 8883 for TLS)
    pub mqtt_port: u16,

    // Prefix of the MQTT client id, the chip id is appended
    pub mqtt_client_id_prefix: &'static str,

    // MQTT credentials (optional)
    pub mqtt_username: Option<&'static str>,
    pub mqtt_password: Option<&'static str>,

    // Light state is published here
    pub mqtt_topic_state: &'static str,

    // Commands for the light arrive here
    pub mqtt_topic_set: &'static str,

    // Temperature readings are published here
    pub mqtt_topic_temperature: &'static str,

    pub firebase_publish_interval: Duration,
    pub mqtt_publish_interval: Duration,
    pub sensor_poll_interval: Duration,

    // Driver sinks current: 255 is off, 0 is full brightness
    pub invert_led_logic: bool,

    pub builtin_led_mode: BuiltinLedMode,

    // Enables logging
    pub debug: bool,
}

// config values are generated at compile time
include!(concat!(env!("OUT_DIR"), "/config.rs"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub rule: RuleError,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.rule)
    }
}

fn field<T>(field: &'static str, result: Result<T, RuleError>) -> Result<T, ConfigError> {
    result.map_err(|rule| ConfigError { field, rule })
}

fn millis(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedMode {
    Rgbw,
    Rgb,
    /// Only the white channel is wired
    Brightness,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedPins {
    pub red: Option<Pin>,
    pub green: Option<Pin>,
    pub blue: Option<Pin>,
    pub white: Option<Pin>,
}

impl LedPins {
    pub fn mode(&self) -> LedMode {
        let rgb = self.red.is_some() && self.green.is_some() && self.blue.is_some();
        match (rgb, self.white.is_some()) {
            (true, true) => LedMode::Rgbw,
            (true, false) => LedMode::Rgb,
            (false, true) => LedMode::Brightness,
            (false, false) => LedMode::None,
        }
    }
}

impl Config {
    /// Check the record against the same rules `build.rs` enforces on `cfg.toml`.
    ///
    /// Pin numbers and the built-in LED mode are valid by construction. A
    /// partially wired RGB set is accepted, [`LedPins::mode`] ignores it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        field("firebase_host", rules::check_firebase_host(self.firebase_host))?;
        field("mqtt_port", rules::check_port(self.mqtt_port.into()))?;
        field(
            "mqtt_topic_*",
            rules::check_topics(&[
                self.mqtt_topic_state,
                self.mqtt_topic_set,
                self.mqtt_topic_temperature,
            ]),
        )?;
        field(
            "firebase_publish_interval_ms",
            rules::check_interval_ms(millis(self.firebase_publish_interval)),
        )?;
        field(
            "mqtt_publish_interval_ms",
            rules::check_interval_ms(millis(self.mqtt_publish_interval)),
        )?;
        field(
            "sensor_poll_interval_ms",
            rules::check_interval_ms(millis(self.sensor_poll_interval)),
        )?;
        Ok(())
    }

    pub fn led_pins(&self) -> LedPins {
        LedPins {
            red: self.red_pin,
            green: self.green_pin,
            blue: self.blue_pin,
            white: self.white_pin,
        }
    }

    pub fn topics(&self) -> Topics {
        Topics {
            state: self.mqtt_topic_state,
            set: self.mqtt_topic_set,
            temperature: self.mqtt_topic_temperature,
        }
    }

    pub fn logging(&self) -> Logging {
        Logging { debug: self.debug }
    }

    pub fn publish_schedule(&self) -> PublishSchedule {
        PublishSchedule::new(
            self.sensor_poll_interval,
            self.mqtt_publish_interval,
            self.firebase_publish_interval,
        )
    }

    /// Log the configuration at boot with secrets masked.
    pub fn log_summary(&self) {
        log::info!("Firmware {}", crate::constants::VERSION);
        log::info!("LED mode {:?}: {:?}", self.led_pins().mode(), self.led_pins());
        log::info!("LM35 on {}", self.temperature_pin);
        log::info!(
            "WiFi SSID {:?}, password {}",
            self.wifi_ssid,
            mask(self.wifi_password)
        );
        log::info!(
            "Firebase {} auth {}",
            self.firebase_host,
            mask(self.firebase_auth)
        );
        log::info!(
            "MQTT {}:{} client prefix {:?} user {}",
            self.mqtt_hostname,
            self.mqtt_port,
            self.mqtt_client_id_prefix,
            self.mqtt_username.unwrap_or("<none>")
        );
        log::debug!("MQTT topics {:?}", self.topics());
        log::debug!(
            "Intervals: poll {} ms, mqtt {} ms, firebase {} ms",
            self.sensor_poll_interval.as_millis(),
            self.mqtt_publish_interval.as_millis(),
            self.firebase_publish_interval.as_millis()
        );
    }
}

fn mask(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<empty>"
    } else {
        "<set>"
    }
}
