//! Injects network credentials and panel settings from a local `.env` file
//! (or the process environment) as compile-time variables. Missing keys are
//! left unset; `config.rs` falls back to defaults via `option_env!`.

const KEYS: &[&str] = &["WIFI_SSID", "WIFI_PASSWORD", "WEATHER_URL", "UTC_OFFSET_SECS"];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env");

    let _ = dotenvy::dotenv();
    for key in KEYS {
        println!("cargo:rerun-if-env-changed={key}");
        if let Ok(value) = std::env::var(key) {
            println!("cargo:rustc-env={key}={value}");
        }
    }
}
