//! HeatLink Firmware: Main Entry Point
//!
//! One binary, two roles: built with `--features node-remote` it runs the
//! operator panel, otherwise the heater/fan node.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  LocalBoard / RemoteBoard   LogDisplay   LogEventSink  TwaiBus │
//! │  (Sensor+Input+Actuator)    (Display)    (EventSink)   (Bus)   │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │        LocalNode / RemoteNode (pure logic)             │    │
//! │  │  Sync · Hysteresis · Debounce                          │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Timers ──▶ Event Queue          TWAI RX task ──▶ RxBuffers    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, Input, PinDriver, Pull};
use log::{info, warn};

use heatlink::adapters::display::LogDisplay;
use heatlink::adapters::hardware::{LocalBoard, RemoteBoard};
use heatlink::adapters::log_sink::LogEventSink;
use heatlink::adapters::twai::{spawn_rx_task, TwaiBus};
use heatlink::app::events::AppEvent;
use heatlink::app::ports::EventSink;
use heatlink::app::{LocalNode, RemoteNode};
use heatlink::clock::ElapsedClock;
use heatlink::config::{NodeConfig, NodeRole};
use heatlink::events::{self, Event};
use heatlink::protocol::RxBuffers;
use heatlink::sensors::{SetpointInput, TemperatureSensor};
use heatlink::{diagnostics, drivers, pins};

// Shared between the control loop, the timer task and the bus RX task.
static RX_BUFFERS: RxBuffers = RxBuffers::new();
static BUS: TwaiBus = TwaiBus::new();
static CLOCK: ElapsedClock = ElapsedClock::new(0);

const ROLE: NodeRole = if cfg!(feature = "node-remote") {
    NodeRole::Remote
} else {
    NodeRole::Local
};

/// Compiled-in defaults, or a JSON override baked in at build time.
fn load_config() -> Result<NodeConfig> {
    match option_env!("HEATLINK_CONFIG") {
        Some(json) => {
            let config = NodeConfig::from_json(json.as_bytes())?;
            if config.role != ROLE {
                warn!("HEATLINK_CONFIG role {:?} ignored, binary is {:?}", config.role, ROLE);
            }
            info!("Config loaded from HEATLINK_CONFIG");
            Ok(NodeConfig { role: ROLE, ..config })
        }
        None => Ok(NodeConfig::for_role(ROLE)),
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  HeatLink v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    diagnostics::install_panic_handler();

    let config = load_config()?;
    info!("Role: {:?}", config.role);
    CLOCK.set_wrap(config.clock_wrap_secs);

    // ── 2. Peripherals, bus receive path, timers ──────────────
    drivers::hw_init::init_peripherals().map_err(heatlink::Error::from)?;
    spawn_rx_task(&BUS, &RX_BUFFERS)?;
    drivers::hw_timer::start_timers(
        config.control_loop_interval_ms,
        config.diagnostics_interval_secs,
        &CLOCK,
    );

    // ── 3. Run the node ───────────────────────────────────────
    match config.role {
        NodeRole::Local => run_local(config),
        NodeRole::Remote => run_remote(config),
    }
}

fn run_local(config: NodeConfig) -> Result<()> {
    // SAFETY: each GPIO number in `pins` is claimed exactly once, here.
    let heater = PinDriver::output(unsafe { AnyOutputPin::new(pins::HEATER_GPIO) })?;
    let fan = PinDriver::output(unsafe { AnyOutputPin::new(pins::FAN_GPIO) })?;

    let mut board = LocalBoard::new(
        TemperatureSensor::new(pins::TEMP_ADC_CHANNEL),
        heater,
        fan,
        LogDisplay::new(),
    );
    let mut sink = LogEventSink::new();
    let mut node = LocalNode::new(config, &BUS, &RX_BUFFERS);
    node.start(&mut board, &mut sink);

    info!("System ready. Entering event loop.");
    loop {
        events::drain_events(|event| match event {
            Event::ControlTick => node.tick(&mut board, &CLOCK, &mut sink),
            Event::DiagnosticsTick => sink.emit(&AppEvent::Diagnostics(node.stats())),
        });
        FreeRtos::delay_ms(1);
    }
}

fn run_remote(config: NodeConfig) -> Result<()> {
    let inputs = [
        button(pins::BUTTON_ENABLE_GPIO)?,
        button(pins::BUTTON_DISABLE_GPIO)?,
        button(pins::JOY_UP_GPIO)?,
        button(pins::JOY_DOWN_GPIO)?,
    ];

    let mut board = RemoteBoard::new(
        &config,
        SetpointInput::new(pins::POT_ADC_CHANNEL),
        inputs,
        LogDisplay::new(),
    );
    let mut sink = LogEventSink::new();
    let mut node = RemoteNode::new(config, &BUS, &RX_BUFFERS);
    node.start(&mut sink);

    info!("System ready. Entering event loop.");
    loop {
        events::drain_events(|event| match event {
            Event::ControlTick => node.tick(&mut board, &CLOCK, &mut sink),
            Event::DiagnosticsTick => sink.emit(&AppEvent::Diagnostics(node.stats())),
        });
        FreeRtos::delay_ms(1);
    }
}

/// Active-low push-button input with the internal pull-up enabled.
fn button(gpio: i32) -> Result<PinDriver<'static, AnyIOPin, Input>> {
    // SAFETY: each GPIO number in `pins` is claimed exactly once.
    let mut pin = PinDriver::input(unsafe { AnyIOPin::new(gpio) })?;
    pin.set_pull(Pull::Up)?;
    Ok(pin)
}
