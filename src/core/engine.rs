use crate::core::watcher::{ButtonWatcher, WatcherReport};
use crate::domain::model::{default_bindings, PinBinding, ShutdownPolicy, TriggerMode};
use crate::domain::ports::{ConfigProvider, GpioBackend, Notifier};
use crate::utils::error::{ButtonError, Result};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinSet;

/// Runs one [`ButtonWatcher`] per pin binding as independent tasks on the
/// current runtime.
pub struct WatchEngine<G, N> {
    gpio: Arc<G>,
    notifier: Arc<N>,
    bindings: Vec<PinBinding>,
    mode: TriggerMode,
    interval: Duration,
    policy: ShutdownPolicy,
}

impl<G, N> WatchEngine<G, N>
where
    G: GpioBackend + 'static,
    N: Notifier + 'static,
{
    pub fn new<C: ConfigProvider>(gpio: Arc<G>, notifier: Arc<N>, config: &C) -> Self {
        Self {
            gpio,
            notifier,
            bindings: default_bindings().to_vec(),
            mode: config.trigger_mode(),
            interval: config.poll_interval(),
            policy: config.shutdown_policy(),
        }
    }

    pub fn with_bindings(mut self, bindings: Vec<PinBinding>) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn bindings(&self) -> &[PinBinding] {
        &self.bindings
    }

    /// Watches until `shutdown` resolves or a watcher fails.
    ///
    /// A failing watcher stops the others and its error is returned.
    pub async fn run<F>(self, shutdown: F) -> Result<Vec<WatcherReport>>
    where
        F: Future<Output = ()>,
    {
        let (stop_tx, stop_rx) = watch::channel(false);
        let mut watchers = JoinSet::new();

        for binding in &self.bindings {
            let watcher = ButtonWatcher::new(
                *binding,
                Arc::clone(&self.gpio),
                Arc::clone(&self.notifier),
                self.mode,
                self.interval,
            );
            watchers.spawn(watcher.run(stop_rx.clone(), self.policy));
        }
        drop(stop_rx);

        tracing::info!("🚀 Started {} button watcher(s)", self.bindings.len());

        tokio::pin!(shutdown);
        let mut stopping = false;
        let mut failure: Option<ButtonError> = None;
        let mut reports = Vec::with_capacity(self.bindings.len());

        loop {
            tokio::select! {
                _ = &mut shutdown, if !stopping => {
                    tracing::info!("🛑 Shutdown requested ({:?} in-flight requests)", self.policy);
                    stopping = true;
                    stop_tx.send_replace(true);
                }
                joined = watchers.join_next() => {
                    let Some(joined) = joined else { break };
                    match joined {
                        Ok(Ok(report)) => reports.push(report),
                        Ok(Err(e)) => {
                            tracing::error!("❌ Watcher failed: {}", e);
                            failure.get_or_insert(e);
                        }
                        Err(e) => {
                            tracing::error!("❌ Watcher task aborted: {}", e);
                            failure.get_or_insert(ButtonError::WatcherError {
                                message: e.to_string(),
                            });
                        }
                    }
                    if !stopping {
                        stopping = true;
                        stop_tx.send_replace(true);
                    }
                }
            }
        }

        match failure {
            Some(e) => Err(e),
            None => Ok(reports),
        }
    }
}
