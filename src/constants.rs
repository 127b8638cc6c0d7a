/// Current firmware version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Longest client identifier every MQTT 3.1.1 broker must accept
pub const MQTT_CLIENT_ID_MAX_LEN: usize = 23;

/// Capacity of a composed Firebase REST URL (host, path and auth token)
pub const FIREBASE_URL_MAX_LEN: usize = 256;

/// Highest value of an 8-bit LED brightness
pub const BRIGHTNESS_MAX: u8 = u8::MAX;

/// LM35 output slope in millivolts per degree Celsius
pub const LM35_MV_PER_CELSIUS: f32 = 10.0;
