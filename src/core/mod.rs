pub mod detector;
pub mod engine;
pub mod in_flight;
pub mod watcher;

pub use crate::domain::model::{PinBinding, Target, TriggerMode};
pub use crate::domain::ports::{ConfigProvider, GpioBackend, Notifier};
pub use crate::utils::error::Result;
