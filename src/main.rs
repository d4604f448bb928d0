//! Chem-Car Firmware — Main Entry Point
//!
//! Hexagonal architecture with a single-threaded, interrupt-free polling
//! loop:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                   │
//! │                                                            │
//! │   HardwareAdapter        LogEventSink      Esp32Time       │
//! │   (Sensor+Actuator)      (EventSink)       (uptime)        │
//! │                                                            │
//! │  ─────────────── Port Trait Boundary ──────────────────    │
//! │                                                            │
//! │  ┌──────────────────────────────────────────────────────┐  │
//! │  │          startup (once) · AppService (per tick)      │  │
//! │  │          rail check · calibration · run FSM          │  │
//! │  └──────────────────────────────────────────────────────┘  │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no event queue and no shutdown path: after the blocking init
//! phase the loop polls the switch and the optical sensor every cycle
//! until external power loss.
#![deny(unused_must_use)]

use std::thread;
use std::time::Duration;

use anyhow::Result;
use log::info;

use chemcar::adapters::hardware::HardwareAdapter;
use chemcar::adapters::log_sink::LogEventSink;
use chemcar::adapters::time::Esp32TimeAdapter;
use chemcar::app::service::AppService;
use chemcar::config::SystemConfig;
use chemcar::drivers::drive::DriveTrain;
use chemcar::drivers::hw_init;
use chemcar::drivers::indicator::HealthIndicator;
use chemcar::drivers::stirrer::StirMotor;
use chemcar::pins;
use chemcar::sensors::light::LightSensor;
use chemcar::sensors::power::PowerRails;
use chemcar::sensors::switch::StartSwitch;
use chemcar::sensors::SensorHub;
use chemcar::startup;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }

    info!("chemcar v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. One-shot peripheral init ───────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt; only a power
        // cycle recovers.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 3. Construct adapters ─────────────────────────────────
    let config = SystemConfig::default();

    let sensor_hub = SensorHub::new(
        LightSensor::new(pins::LIGHT_ADC_GPIO),
        StartSwitch::new(pins::START_SWITCH_GPIO),
        PowerRails::new(pins::BATTERY_ADC_GPIO, pins::FUELCELL_ADC_GPIO),
    );

    let mut hw = HardwareAdapter::new(
        sensor_hub,
        DriveTrain::new(&config),
        StirMotor::new(),
        HealthIndicator::new(pins::BATTERY_LED_GPIO),
        HealthIndicator::new(pins::FUELCELL_LED_GPIO),
    );

    let mut sink = LogEventSink::new();

    // ── 4. Blocking init phase: flash, rail check, stir, calibrate ──
    #[cfg(target_os = "espidf")]
    let mut delay = esp_idf_hal::delay::FreeRtos;
    #[cfg(not(target_os = "espidf"))]
    let mut delay = chemcar::adapters::time::StdDelay;

    let baseline = startup::run(&mut hw, &mut sink, &config, &mut delay);

    // ── 5. Steady-state control loop ──────────────────────────
    let mut app = AppService::new(config.clone(), baseline);
    app.start(&mut sink);

    let time = Esp32TimeAdapter::new();
    info!("System ready. Entering control loop.");

    loop {
        thread::sleep(Duration::from_millis(u64::from(
            config.control_loop_interval_ms,
        )));
        app.tick(time.uptime_ms(), &mut hw, &mut sink);
    }
}
