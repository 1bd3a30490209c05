//! GenSentry Firmware — Main Entry Point
//!
//! Hexagonal architecture around a fixed-period control loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  HardwareAdapter    LogEventSink    NvsAdapter   UptimeClock │
//! │  (PlatformPort)     LogNotifier     (ConfigPort) (monotonic) │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ───────────────────    │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │              AppService (pure logic)                   │  │
//! │  │  conditioner · run latch · FSM · sequencer · relays    │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The loop is deliberately dumb: sleep one tick period, run one full
//! control cycle, emit the periodic status event, feed the watchdog.
//! Command ingestion (remote UI, serial console) hangs off
//! `AppService::handle_command` and is wired by the deployment, not here.
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::Result;
use log::{info, warn};

use gensentry::adapters::hardware::HardwareAdapter;
use gensentry::adapters::log_sink::{LogEventSink, LogNotifier};
use gensentry::adapters::nvs::NvsAdapter;
use gensentry::adapters::time::UptimeClock;
use gensentry::app::events::AppEvent;
use gensentry::app::ports::{ConfigPort, EventSink};
use gensentry::app::service::AppService;
use gensentry::config::SystemConfig;
use gensentry::drivers::hw_init;
use gensentry::drivers::watchdog::Watchdog;

fn main() -> Result<()> {
    // ── 1. Platform bootstrap ─────────────────────────────────
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }
    #[cfg(not(target_os = "espidf"))]
    env_logger::init();

    info!("╔══════════════════════════════════════╗");
    info!("║  GenSentry v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    // Forty missed ticks at the default period before the TWDT fires.
    let watchdog = Watchdog::subscribe(10_000);

    // ── 3. Load config from NVS (or defaults) ─────────────────
    let config = match NvsAdapter::new() {
        Ok(nvs) => match nvs.load() {
            Ok(cfg) => {
                info!("Config loaded from NVS");
                cfg
            }
            Err(e) => {
                warn!("NVS config load failed ({}), using defaults", e);
                SystemConfig::default()
            }
        },
        Err(e) => {
            warn!("NVS init failed ({}), running with defaults and no persistence", e);
            SystemConfig::default()
        }
    };

    // ── 4. Construct adapters and the app service ─────────────
    let clock = UptimeClock::new();
    let mut hw = HardwareAdapter::new();
    let mut sink = LogEventSink::new();
    let mut notifier = LogNotifier::new();

    let mut app = AppService::new(config.clone());
    app.start(clock.now_ms(), &mut sink);

    info!("System ready. Entering control loop.");

    // ── 5. Control loop ───────────────────────────────────────
    let tick_period = Duration::from_millis(u64::from(config.control_loop_interval_ms));
    let status_every_ticks = u64::from(
        (config.status_interval_secs * 1000 / config.control_loop_interval_ms).max(1),
    );

    loop {
        std::thread::sleep(tick_period);

        app.tick(clock.now_ms(), &mut hw, &mut sink, &mut notifier);

        if app.tick_count() % status_every_ticks == 0 {
            sink.emit(&AppEvent::Status(app.build_status()));
        }

        // Feed watchdog on every iteration.
        watchdog.feed();
    }
}
