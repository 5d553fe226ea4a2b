//! PowerHold Firmware — Main Entry Point
//!
//! Hexagonal architecture around a single cooperative control loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  HalInput/HalOutput      LogEventSink                    │
//! │  (GPIO pins)             (EventSink, diagnostics only)   │
//! │                                                          │
//! │  ───────────── Port Trait Boundary ──────────────        │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │            AppService (pure logic)             │      │
//! │  │  Shutdown Sequencer · Transition Log           │      │
//! │  └────────────────────────────────────────────────┘      │
//! │                                                          │
//! │  Clock (tick ISR) · PowerManager (sleep gate) · TWDT     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Each loop iteration samples the supply-presence pin and the millisecond
//! clock exactly once, then either sleeps (fully idle) or runs one sequencer
//! cycle against that snapshot.
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use powerhold::adapters::hardware;
#[cfg(feature = "diagnostics")]
use powerhold::adapters::log_sink::LogEventSink;
use powerhold::app::events::AppEvent;
#[cfg(not(feature = "diagnostics"))]
use powerhold::app::ports::NullEventSink;
use powerhold::app::ports::EventSink;
use powerhold::app::service::AppService;
use powerhold::clock;
use powerhold::config::SystemConfig;
use powerhold::drivers::hw_timer;
use powerhold::drivers::power_sense::PowerSense;
use powerhold::drivers::relay::RelayLatch;
use powerhold::drivers::watchdog::Watchdog;
use powerhold::power::PowerManager;
use powerhold::sequencer::CycleSnapshot;

fn main() -> Result<()> {
    // ── 1. Platform bootstrap ─────────────────────────────────
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }

    info!("PowerHold v{} starting", env!("CARGO_PKG_VERSION"));

    let config = SystemConfig::default();

    // ── 2. Clock tick timer + watchdog ────────────────────────
    hw_timer::start_tick_timer(&config);
    let watchdog = Watchdog::new(&config);

    // ── 3. Pins behind the port boundary ──────────────────────
    #[cfg(target_os = "espidf")]
    let (sense_pin, relay_pin) = (hardware::power_sense_input()?, hardware::relay_output()?);
    #[cfg(not(target_os = "espidf"))]
    let (sense_pin, relay_pin) = (
        hardware::SimInput::default(),
        hardware::SimOutput::default(),
    );

    let mut sense = PowerSense::new(sense_pin, config.power_sense_active_high);
    let mut relay = RelayLatch::new(relay_pin, config.relay_active_high);

    // ── 4. Power manager + diagnostic sink + service ──────────
    let mut power_mgr = PowerManager::new(&config);

    #[cfg(feature = "diagnostics")]
    let mut sink = LogEventSink::new();
    #[cfg(not(feature = "diagnostics"))]
    let mut sink = NullEventSink;

    let mut app = AppService::new(config.clone());
    app.start(&mut sink);

    info!("System ready. Entering control loop.");

    // ── 5. Control loop ───────────────────────────────────────
    loop {
        watchdog.feed();

        // Cycle pacing (sense resolution).  On hardware the tick timer
        // advances the clock in the background; the simulation advances it
        // here by the same amount the pacing delay represents.
        #[cfg(target_os = "espidf")]
        esp_idf_hal::delay::FreeRtos::delay_ms(config.cycle_interval_ms);
        #[cfg(not(target_os = "espidf"))]
        {
            std::thread::sleep(std::time::Duration::from_millis(u64::from(
                config.cycle_interval_ms,
            )));
            let ticks =
                u64::from(config.cycle_interval_ms) * 1000 / u64::from(config.tick_interval_us);
            for _ in 0..ticks {
                clock::tick(config.tick_interval_us);
            }
        }

        // One sample of each input per cycle; every decision below sees
        // this snapshot.
        let power_present = sense.is_power_present();
        let now_ms = clock::now();

        if power_mgr.should_sleep_this_cycle(&app.state(), power_present) {
            sink.emit(&AppEvent::EnteringSleep { at_ms: now_ms });
            power_mgr.sleep_until_interrupt();
            // Woken by the wake timer or the sense pin — no sequencer work
            // this cycle; the next iteration takes a fresh snapshot.
            continue;
        }

        app.run_cycle(
            CycleSnapshot {
                power_present,
                now_ms,
            },
            &mut relay,
            &mut sink,
        );
    }
}
