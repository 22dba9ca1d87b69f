//! Wifi association and embassy-net stack plumbing.

use embassy_executor::Spawner;
use embassy_net::{DhcpConfig, Runner, Stack, StackResources};
use embassy_time::{Duration, Timer};
use esp_hal::rng::Rng;
use esp_radio::wifi::{
    ClientConfig, ModeConfig, WifiController, WifiDevice, WifiEvent, WifiStaState,
};
use log::{info, warn};

use crate::config;
use crate::mk_static;

const RECONNECT_DELAY: Duration = Duration::from_millis(5000);

/// Brings up the wifi interface and the embassy-net stack, spawning the
/// connection maintenance and stack runner tasks.
pub fn start_wifi(
    radio_init: &'static esp_radio::Controller<'static>,
    wifi: esp_hal::peripherals::WIFI<'static>,
    rng: Rng,
    spawner: &Spawner,
) -> Stack<'static> {
    let (wifi_controller, interfaces) = esp_radio::wifi::new(radio_init, wifi, Default::default())
        .expect("Failed to initialize Wi-Fi controller");

    let wifi_interface = interfaces.sta;
    let net_seed = rng.random() as u64 | ((rng.random() as u64) << 32);

    let net_config = embassy_net::Config::dhcpv4(DhcpConfig::default());
    let (stack, runner) = embassy_net::new(
        wifi_interface,
        net_config,
        mk_static!(StackResources<4>, StackResources::<4>::new()),
        net_seed,
    );

    spawner.spawn(connection_task(wifi_controller)).ok();
    spawner.spawn(net_task(runner)).ok();

    stack
}

/// Keeps the station associated, reconnecting after drops.
#[embassy_executor::task]
async fn connection_task(mut controller: WifiController<'static>) {
    info!("wifi connection task started");
    loop {
        if matches!(esp_radio::wifi::sta_state(), WifiStaState::Connected) {
            // Wait until we're no longer connected.
            controller.wait_for_event(WifiEvent::StaDisconnected).await;
            warn!("wifi disconnected");
            Timer::after(RECONNECT_DELAY).await;
        }

        if !matches!(controller.is_started(), Ok(true)) {
            let client_config = ModeConfig::Client(
                ClientConfig::default()
                    .with_ssid(config::WIFI_SSID.into())
                    .with_password(config::WIFI_PASSWORD.into()),
            );
            controller
                .set_config(&client_config)
                .expect("Failed to set wifi configuration");
            info!("starting wifi");
            controller
                .start_async()
                .await
                .expect("Failed to start wifi");
        }

        info!("connecting to {}", config::WIFI_SSID);
        match controller.connect_async().await {
            Ok(()) => info!("wifi connected"),
            Err(err) => {
                warn!("wifi connect failed: {:?}", err);
                Timer::after(RECONNECT_DELAY).await;
            }
        }
    }
}

#[embassy_executor::task]
async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await
}
