//! WifiCar firmware entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  HardwareAdapter   AmbientLightSensor   TimerTicker          │
//! │  (ActuatorPort)    (LightSensorPort)    (TickerPort)         │
//! │  LogEventSink      WiFi station         HTTP server          │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ─────────────────       │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │        VehicleService (pure logic, one mutex)      │      │
//! │  │  Governor · Controller · LightAutomationScheduler  │      │
//! │  └────────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::modem::Modem;
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::http::server::EspHttpServer;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{BlockingWifi, EspWifi};
use log::{error, info};

use wificar::adapters::hardware::HardwareAdapter;
use wificar::adapters::log_sink::LogEventSink;
use wificar::adapters::ticker::TimerTicker;
use wificar::adapters::{http, wifi};
use wificar::app::service::VehicleService;
use wificar::config::VehicleConfig;
use wificar::drivers::hw_init;
use wificar::drivers::status_led::StatusLed;
use wificar::drivers::watchdog::Watchdog;
use wificar::error::Error;
use wificar::events::{Event, EVENTS};
use wificar::sensors::ambient::AmbientLightSensor;

type Vehicle = VehicleService<HardwareAdapter, AmbientLightSensor, TimerTicker>;

/// Configure the peripherals and create the light-sampling timer.
fn bring_up_hardware() -> wificar::error::Result<TimerTicker> {
    hw_init::init_peripherals()?;
    Ok(TimerTicker::new()?)
}

/// Join the access point, then start serving commands.  Both handles must
/// stay alive for the vehicle to remain reachable.
fn bring_up_network(
    modem: Modem,
    sysloop: EspSystemEventLoop,
    nvs: EspDefaultNvsPartition,
    config: &VehicleConfig,
    link_led: &mut StatusLed,
    service: &Arc<Mutex<Vehicle>>,
) -> wificar::error::Result<(BlockingWifi<EspWifi<'static>>, EspHttpServer<'static>)> {
    let creds = wifi::Credentials::from_build_env()?;
    link_led.set_linked(false);
    let station = wifi::connect_station(
        modem,
        sysloop,
        nvs,
        &creds,
        config.hostname.as_str(),
        &wifi::RetryPolicy::from_config(config),
    )?;
    link_led.set_linked(true);

    let server = http::start(Arc::clone(service), config.http_port)?;
    Ok((station, server))
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("WifiCar v{} starting", env!("CARGO_PKG_VERSION"));

    let config = VehicleConfig::default();
    config.validate()?;

    // ── 2. Peripherals ────────────────────────────────────────
    let ticker = match bring_up_hardware() {
        Ok(ticker) => ticker,
        Err(e @ Error::Init(_)) => {
            // Nothing can be driven safely; halt and let the watchdog reset us.
            error!("HAL init failed: {}, halting", e);
            #[allow(clippy::empty_loop)]
            loop {}
        }
        Err(e) => return Err(e.into()),
    };

    // ── 3. Vehicle core (asserts the boot state on every output) ─
    let service: Arc<Mutex<Vehicle>> = Arc::new(Mutex::new(VehicleService::new(
        &config,
        HardwareAdapter::new(),
        AmbientLightSensor::new(),
        ticker,
    )));
    {
        let mut svc = service.lock().map_err(|_| anyhow!("service lock poisoned"))?;
        svc.start(&mut LogEventSink::new());
    }

    // ── 4. Network ────────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    let mut link_led = StatusLed::new();
    let (_wifi, _server) =
        bring_up_network(peripherals.modem, sysloop, nvs, &config, &mut link_led, &service)?;

    info!("System ready. Entering event loop.");

    // ── 5. Event loop ─────────────────────────────────────────
    let mut watchdog = Watchdog::default();
    let mut sink = LogEventSink::new();
    let interval = Duration::from_millis(u64::from(config.main_loop_interval_ms));

    loop {
        if !EVENTS.is_empty() {
            match service.lock() {
                Ok(mut svc) => EVENTS.drain(|event| match event {
                    Event::LightSampleTick => {
                        svc.on_light_tick(&mut sink);
                    }
                }),
                Err(_) => error!("main: service lock poisoned"),
            }
        }

        watchdog.feed();
        std::thread::sleep(interval);
    }
}
