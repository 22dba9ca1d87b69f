//! Build-time panel configuration, injected through `build.rs`.

use nimbus_core::weather::DEFAULT_WEATHER_URL;

pub const WIFI_SSID: &str = match option_env!("WIFI_SSID") {
    Some(ssid) => ssid,
    None => "",
};

pub const WIFI_PASSWORD: &str = match option_env!("WIFI_PASSWORD") {
    Some(password) => password,
    None => "",
};

pub const WEATHER_URL: &str = match option_env!("WEATHER_URL") {
    Some(url) => url,
    None => DEFAULT_WEATHER_URL,
};

/// Fixed UTC offset applied when deriving the on-screen date and weekday.
/// Defaults to UTC when unset or unparsable.
pub fn utc_offset_secs() -> i32 {
    option_env!("UTC_OFFSET_SECS")
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(0)
}
