//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements                         | Connects to            |
//! |-------------|------------------------------------|------------------------|
//! | `hardware`  | TemperaturePort, ActuatorPort      | ADC1, heater/fan GPIO  |
//! |             | SetpointPort, InputPort            | ADC1, button GPIO      |
//! | `display`   | DisplayPort                        | Serial log output      |
//! | `log_sink`  | EventSink                          | Serial log output      |
//! | `twai`      | BusPort                            | ESP32 TWAI controller  |
//! | `loopback`  | BusPort                            | In-memory bus pair     |

pub mod display;
pub mod hardware;
pub mod log_sink;
pub mod loopback;
pub mod twai;
