use crate::domain::model::{NotifyResponse, Pull, ShutdownPolicy, Target, TriggerMode};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Digital input hardware. `read` returns the raw electrical level
/// (`true` = high), not the logical pressed state.
pub trait GpioBackend: Send + Sync {
    fn configure(&self, pin: u8, pull: Pull) -> Result<()>;
    fn read(&self, pin: u8) -> Result<bool>;
}

/// Tells the remote server a button was pressed.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, target: Target) -> Result<NotifyResponse>;
}

pub trait ConfigProvider: Send + Sync {
    fn server_url(&self) -> &str;
    fn trigger_mode(&self) -> TriggerMode;
    fn poll_interval(&self) -> Duration;
    fn shutdown_policy(&self) -> ShutdownPolicy;
}
