use crate::core::detector::PressDetector;
use crate::core::in_flight::InFlight;
use crate::domain::model::{NotifyResponse, PinBinding, ShutdownPolicy, Target, TriggerMode};
use crate::domain::ports::{GpioBackend, Notifier};
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Outcome of a single poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub pressed: bool,
    pub fired: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatcherReport {
    pub binding: PinBinding,
    pub samples: u64,
    pub presses: u64,
    pub drained: usize,
    pub abandoned: usize,
}

/// Polls one pin and notifies the server about presses.
///
/// In [`TriggerMode::Edge`] requests are dispatched into the background and
/// the next sample follows immediately; in [`TriggerMode::Level`] each
/// request is awaited inline and any error ends the watcher.
pub struct ButtonWatcher<G, N> {
    binding: PinBinding,
    gpio: Arc<G>,
    notifier: Arc<N>,
    detector: PressDetector,
    interval: Duration,
    in_flight: InFlight,
    samples: u64,
    presses: u64,
}

impl<G, N> ButtonWatcher<G, N>
where
    G: GpioBackend + 'static,
    N: Notifier + 'static,
{
    pub fn new(
        binding: PinBinding,
        gpio: Arc<G>,
        notifier: Arc<N>,
        mode: TriggerMode,
        interval: Duration,
    ) -> Self {
        Self {
            binding,
            gpio,
            notifier,
            detector: PressDetector::new(mode),
            interval,
            in_flight: InFlight::new(),
            samples: 0,
            presses: 0,
        }
    }

    pub fn binding(&self) -> PinBinding {
        self.binding
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn samples(&self) -> u64 {
        self.samples
    }

    pub fn presses(&self) -> u64 {
        self.presses
    }

    pub async fn tick(&mut self) -> Result<Sample> {
        self.in_flight.reap();

        let raw_high = self.gpio.read(self.binding.pin)?;
        let (pressed, fired) = self.detector.sample_raw(raw_high);
        self.samples += 1;
        tracing::trace!(pin = self.binding.pin, pressed, "sample");

        if fired {
            self.presses += 1;
            tracing::debug!("🔘 {} pressed (pin {})", self.binding.target, self.binding.pin);

            match self.detector.mode() {
                TriggerMode::Edge => {
                    self.dispatch();
                    // 邊緣觸發後立即取下一個樣本
                    return Ok(Sample { pressed, fired });
                }
                TriggerMode::Level => {
                    let response = self.notifier.notify(self.binding.target).await?;
                    log_response(self.binding.target, &response);
                }
            }
        }

        tokio::time::sleep(self.interval).await;
        Ok(Sample { pressed, fired })
    }

    fn dispatch(&mut self) {
        let notifier = Arc::clone(&self.notifier);
        let target = self.binding.target;
        self.in_flight.spawn(async move {
            match notifier.notify(target).await {
                Ok(response) => log_response(target, &response),
                Err(e) => tracing::warn!("Dropped {} notification: {}", target, e),
            }
        });
    }

    /// Polls until `shutdown` flips (or its sender goes away), then applies
    /// `policy` to outstanding background requests.
    pub async fn run(
        mut self,
        mut shutdown: watch::Receiver<bool>,
        policy: ShutdownPolicy,
    ) -> Result<WatcherReport> {
        tracing::info!(
            "👀 Watching pin {} for {} ({:?}, every {:?})",
            self.binding.pin,
            self.binding.target,
            self.detector.mode(),
            self.interval
        );

        loop {
            if *shutdown.borrow_and_update() {
                break;
            }
            tokio::select! {
                sample = self.tick() => {
                    sample?;
                }
                _ = shutdown.changed() => break,
            }
        }

        let outstanding = self.in_flight.shutdown(policy).await;
        let (drained, abandoned) = match policy {
            ShutdownPolicy::Drain => (outstanding, 0),
            ShutdownPolicy::Abandon => (0, outstanding),
        };

        tracing::info!(
            "Stopped watching {}: {} samples, {} presses",
            self.binding.target,
            self.samples,
            self.presses
        );

        Ok(WatcherReport {
            binding: self.binding,
            samples: self.samples,
            presses: self.presses,
            drained,
            abandoned,
        })
    }
}

fn log_response(target: Target, response: &NotifyResponse) {
    match response.tally() {
        Some(tally) => tracing::info!(
            status = response.status,
            "{} {} (ninjas: {}, cowboys: {})",
            target,
            response.body,
            tally.ninjas,
            tally.cowboys
        ),
        None => tracing::info!(status = response.status, "{} {}", target, response.body),
    }
}
