use std::{env, error::Error, fs, path::Path};

use serde::Deserialize;

#[allow(dead_code)]
#[path = "src/rules.rs"]
mod rules;

use rules::RuleError;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    pin_red: i64,
    pin_green: i64,
    pin_blue: i64,
    #[serde(default = "unset_pin")]
    pin_white: i64,
    pin_lm35: i64,
    wifi_ssid: String,
    wifi_password: String,
    firebase_host: String,
    firebase_auth: String,
    mqtt_hostname: String,
    mqtt_port: i64,
    mqtt_client_id_prefix: String,
    mqtt_username: Option<String>,
    mqtt_password: Option<String>,
    mqtt_topic_state: String,
    mqtt_topic_set: String,
    mqtt_topic_temperature: String,
    firebase_publish_interval_ms: i64,
    mqtt_publish_interval_ms: i64,
    sensor_poll_interval_ms: i64,
    invert_led_logic: bool,
    builtin_led_mode: i64,
    debug: bool,
}

fn unset_pin() -> i64 {
    rules::PIN_UNSET
}

// Attach the offending key to a rule violation
fn field<T>(key: &str, result: Result<T, RuleError>) -> Result<T, Box<dyn Error>> {
    result.map_err(|e| format!("cfg.toml: {}: {}", key, e).into())
}

// Environment wins over the file so secrets can stay out of the repository
fn secret(var: &str, key: &str, from_file: Option<&str>) -> Option<String> {
    println!("cargo:rerun-if-env-changed={}", var);
    let from_env = env::var(var).ok().filter(|v| !v.is_empty());
    let picked = rules::pick_secret(from_env.as_deref(), from_file);
    if from_env.is_none() && picked.is_some() {
        println!("cargo:warning={} read from cfg.toml, consider setting {}", key, var);
    }
    picked.map(str::to_string)
}

fn pin_literal(pin: Option<u8>) -> String {
    match pin {
        Some(n) => format!("Some(Pin::new({}))", n),
        None => "None".to_string(),
    }
}

fn builtin_led_literal(mode: i8) -> &'static str {
    match mode {
        0 => "BuiltinLedMode::Low",
        1 => "BuiltinLedMode::High",
        _ => "BuiltinLedMode::Untouched",
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Tell Cargo to rerun if toml changes
    println!("cargo:rerun-if-changed=cfg.toml");
    println!("cargo:rerun-if-changed=src/rules.rs");

    // Read and parse
    let toml_str = fs::read_to_string("cfg.toml")?;
    let raw: RawConfig = toml::from_str(&toml_str)?;

    // Validate
    let red = field("pin_red", rules::check_pin(raw.pin_red))?;
    let green = field("pin_green", rules::check_pin(raw.pin_green))?;
    let blue = field("pin_blue", rules::check_pin(raw.pin_blue))?;
    let white = field("pin_white", rules::check_pin(raw.pin_white))?;
    if let Err(e) = rules::check_rgb_pins(red, green, blue) {
        println!("cargo:warning=cfg.toml: pin_red/pin_green/pin_blue: {}", e);
    }
    let lm35 = field(
        "pin_lm35",
        rules::check_pin(raw.pin_lm35).and_then(|p| p.ok_or(RuleError::PinRequired)),
    )?;
    let port = field("mqtt_port", rules::check_port(raw.mqtt_port))?;
    field(
        "mqtt_topic_*",
        rules::check_topics(&[
            raw.mqtt_topic_state.as_str(),
            raw.mqtt_topic_set.as_str(),
            raw.mqtt_topic_temperature.as_str(),
        ]),
    )?;
    field("firebase_host", rules::check_firebase_host(&raw.firebase_host))?;
    let firebase_ms = field(
        "firebase_publish_interval_ms",
        rules::check_interval_ms(raw.firebase_publish_interval_ms),
    )?;
    let mqtt_ms = field(
        "mqtt_publish_interval_ms",
        rules::check_interval_ms(raw.mqtt_publish_interval_ms),
    )?;
    let poll_ms = field(
        "sensor_poll_interval_ms",
        rules::check_interval_ms(raw.sensor_poll_interval_ms),
    )?;
    let builtin_led = field("builtin_led_mode", rules::check_builtin_led_mode(raw.builtin_led_mode))?;

    if [red, green, blue, white].iter().all(Option::is_none) {
        println!("cargo:warning=no LED pin is wired");
    }

    let wifi_ssid = secret("MY_MOOD_WIFI_SSID", "wifi_ssid", Some(raw.wifi_ssid.as_str())).unwrap_or_default();
    let wifi_password =
        secret("MY_MOOD_WIFI_PASSWORD", "wifi_password", Some(raw.wifi_password.as_str())).unwrap_or_default();
    let firebase_auth =
        secret("MY_MOOD_FIREBASE_AUTH", "firebase_auth", Some(raw.firebase_auth.as_str())).unwrap_or_default();
    let mqtt_username = secret(
        "MY_MOOD_MQTT_USERNAME",
        "mqtt_username",
        raw.mqtt_username.as_deref(),
    );
    let mqtt_password = secret(
        "MY_MOOD_MQTT_PASSWORD",
        "mqtt_password",
        raw.mqtt_password.as_deref(),
    );

    if wifi_ssid.is_empty() {
        println!("cargo:warning=wifi_ssid is empty, set it in cfg.toml or MY_MOOD_WIFI_SSID");
    }

    // Generate Rust code
    let code = format!(
        r#"
        pub const CONFIG: Config = Config {{
            red_pin: {red},
            green_pin: {green},
            blue_pin: {blue},
            white_pin: {white},
            temperature_pin: Pin::new({lm35}),
            wifi_ssid: {ssid:?},
            wifi_password: {psk:?},
            firebase_host: {fh:?},
            firebase_auth: {fa:?},
            mqtt_hostname: {mh:?},
            mqtt_port: {mp},
            mqtt_client_id_prefix: {mc:?},
            mqtt_username: {mu:?},
            mqtt_password: {mpw:?},
            mqtt_topic_state: {mts:?},
            mqtt_topic_set: {mtc:?},
            mqtt_topic_temperature: {mtt:?},
            firebase_publish_interval: Duration::from_millis({fi}),
            mqtt_publish_interval: Duration::from_millis({mi}),
            sensor_poll_interval: Duration::from_millis({pi}),
            invert_led_logic: {inv},
            builtin_led_mode: {bl},
            debug: {dbg},
        }};
    "#,
        red = pin_literal(red),
        green = pin_literal(green),
        blue = pin_literal(blue),
        white = pin_literal(white),
        lm35 = lm35,
        ssid = wifi_ssid,
        psk = wifi_password,
        fh = raw.firebase_host,
        fa = firebase_auth,
        mh = raw.mqtt_hostname,
        mp = port,
        mc = raw.mqtt_client_id_prefix,
        mu = mqtt_username,
        mpw = mqtt_password,
        mts = raw.mqtt_topic_state,
        mtc = raw.mqtt_topic_set,
        mtt = raw.mqtt_topic_temperature,
        fi = firebase_ms,
        mi = mqtt_ms,
        pi = poll_ms,
        inv = raw.invert_led_logic,
        bl = builtin_led_literal(builtin_led),
        dbg = raw.debug,
    );

    let out_dir = env::var("OUT_DIR")?;
    let dest_path = Path::new(&out_dir).join("config.rs");
    fs::write(dest_path, code)?;
    Ok(())
}
