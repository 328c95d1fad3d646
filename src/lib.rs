pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::gpio::SimulatedGpio;
#[cfg(feature = "rpi")]
pub use adapters::gpio::RppalGpio;
pub use adapters::http::HttpNotifier;
pub use config::CliConfig;
pub use crate::core::{engine::WatchEngine, watcher::ButtonWatcher};
pub use domain::model::{PinBinding, Target, TriggerMode};
pub use utils::error::{ButtonError, Result};
