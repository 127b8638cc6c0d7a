use core::fmt::{self, Write};

use heapless::String;

use crate::constants::MQTT_CLIENT_ID_MAX_LEN;

pub type ClientId = String<MQTT_CLIENT_ID_MAX_LEN>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    ClientIdTooLong,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ClientIdTooLong => write!(
                f,
                "client id exceeds {} bytes",
                MQTT_CLIENT_ID_MAX_LEN
            ),
        }
    }
}

/// Build the broker client id from the configured prefix and the chip id.
pub fn client_id(prefix: &str, chip_id: u32) -> Result<ClientId, Error> {
    let mut id = ClientId::new();
    write!(id, "{}{:08x}", prefix, chip_id).map_err(|_| Error::ClientIdTooLong)?;
    log::debug!("MQTT client id: {}", id);
    Ok(id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topics {
    pub state: &'static str,
    pub set: &'static str,
    pub temperature: &'static str,
}

/// What an inbound message is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Command for the light
    Command,
    /// Our own state publication echoed back
    OwnState,
    /// Our own temperature publication echoed back
    OwnTemperature,
}

impl Topics {
    /// Topics the device subscribes to.
    pub fn subscriptions(&self) -> [&'static str; 1] {
        [self.set]
    }

    pub fn route(&self, topic: &str) -> Option<Route> {
        if topic == self.set {
            Some(Route::Command)
        } else if topic == self.state {
            Some(Route::OwnState)
        } else if topic == self.temperature {
            Some(Route::OwnTemperature)
        } else {
            log::warn!("Message on unexpected topic {:?}", topic);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TOPICS: Topics = Topics {
        state: "my-mood/lights",
        set: "my-mood/lights/set",
        temperature: "my-mood/temperature",
    };

    #[test]
    fn client_id_appends_chip_id() {
        let id = client_id("WEMOS-", 0x00ab_12cd).unwrap();
        assert_eq!(id.as_str(), "WEMOS-00ab12cd");
    }

    #[test]
    fn client_id_fits_mqtt_limit() {
        // 15 + 8 bytes is exactly the limit
        let id = client_id("my-mood-light-1", u32::MAX).unwrap();
        assert_eq!(id.len(), MQTT_CLIENT_ID_MAX_LEN);
        assert_eq!(
            client_id("my-mood-light-12", 1),
            Err(Error::ClientIdTooLong)
        );
    }

    #[test]
    fn client_id_from_config_prefix() {
        let id = client_id(crate::config::CONFIG.mqtt_client_id_prefix, 42).unwrap();
        assert!(id.starts_with(crate::config::CONFIG.mqtt_client_id_prefix));
    }

    #[test]
    fn routes_inbound_topics() {
        assert_eq!(TOPICS.route("my-mood/lights/set"), Some(Route::Command));
        assert_eq!(TOPICS.route("my-mood/lights"), Some(Route::OwnState));
        assert_eq!(TOPICS.route("my-mood/temperature"), Some(Route::OwnTemperature));
        assert_eq!(TOPICS.route("my-mood/other"), None);
    }

    #[test]
    fn subscribes_to_set_topic_only() {
        assert_eq!(TOPICS.subscriptions(), ["my-mood/lights/set"]);
    }
}
