//! Async tasks tying the core library to the board.

use embassy_net::Stack;
use embassy_time::{Duration, Instant, Ticker, Timer};
use esp_hal::Async;
use esp_hal::i2c::master::I2c;
use log::{info, warn};
use sht4x::{Precision, Sht4xAsync};

use nimbus_core::clock::{WallClock, derive_date_and_weekday};
use nimbus_core::weather::WeatherSession;

use crate::config;
use crate::http::ReqwlessTransport;
use crate::screen::{self, UiLock};

/// Startup retry cadence, matching the stock panel's once-per-second poll.
const WEATHER_POLL_INTERVAL: Duration = Duration::from_secs(1);

const INDOOR_SAMPLE_INTERVAL: Duration = Duration::from_secs(5);

/// One-shot startup weather flow.
///
/// Polls once per second until the network is up and a reading lands, then
/// anchors the wall clock, renders the home screen, and stops. There is no
/// continuous refresh; retry on failure is entirely this caller's loop.
#[embassy_executor::task]
pub async fn weather_startup_task(stack: Stack<'static>, ui: &'static UiLock) {
    let mut session = WeatherSession::new(config::WEATHER_URL);
    let mut clock = WallClock::new(config::utc_offset_secs());
    let mut transport = ReqwlessTransport::new(stack);

    loop {
        if stack.config_v4().is_none() {
            info!("weather: waiting for network...");
            Timer::after(WEATHER_POLL_INTERVAL).await;
            continue;
        }

        match session.get_weather(&mut transport).await {
            Ok(reading) => {
                clock.apply(reading.timestamp, Instant::now().as_secs());

                let Some((date, weekday)) =
                    derive_date_and_weekday(reading.timestamp, clock.utc_offset_secs())
                else {
                    warn!("timestamp {} outside calendar range", reading.timestamp);
                    Timer::after(WEATHER_POLL_INTERVAL).await;
                    continue;
                };

                let rendered = screen::try_update(ui, |screen| {
                    screen.apply_weather(reading.temp_c, &reading.condition, &date, weekday)
                });
                if !rendered {
                    warn!("display lock busy, weather reading not rendered");
                }
                break;
            }
            Err(err) => warn!("weather attempt failed: {}", err),
        }

        Timer::after(WEATHER_POLL_INTERVAL).await;
    }

    info!("weather startup flow complete");
}

/// Periodic indoor temperature/humidity readout from the SHT40.
///
/// Shares nothing with the weather flow except the display lock.
#[embassy_executor::task]
pub async fn indoor_sensor_task(i2c: I2c<'static, Async>, ui: &'static UiLock) {
    let mut sensor = Sht4xAsync::<_, embassy_time::Delay>::new(i2c);
    let mut ticker = Ticker::every(INDOOR_SAMPLE_INTERVAL);

    loop {
        ticker.next().await;
        match sensor
            .measure(Precision::High, &mut embassy_time::Delay)
            .await
        {
            Ok(measurement) => {
                let temp_c = measurement.temperature_celsius().to_num::<f32>();
                let humidity = measurement.humidity_percent().to_num::<f32>();
                screen::try_update(ui, |screen| screen.apply_indoor(temp_c, humidity));
            }
            Err(err) => warn!("SHT40 measurement failed: {:?}", err),
        }
    }
}
