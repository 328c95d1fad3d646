use crate::domain::model::ShutdownPolicy;
use std::future::Future;
use tokio::task::JoinSet;

/// Counted set of fire-and-forget requests owned by one watcher.
///
/// Tasks stay in the set until they are reaped, so dropping the watcher
/// (or calling [`InFlight::shutdown`]) is the only way they get cancelled.
#[derive(Default)]
pub struct InFlight {
    tasks: JoinSet<()>,
}

impl InFlight {
    pub fn new() -> Self {
        Self {
            tasks: JoinSet::new(),
        }
    }

    pub fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tasks.spawn(task);
    }

    /// Removes finished tasks. Returns how many were removed.
    pub fn reap(&mut self) -> usize {
        let mut reaped = 0;
        while let Some(joined) = self.tasks.try_join_next() {
            if let Err(e) = joined {
                if e.is_panic() {
                    tracing::error!("Background request panicked: {}", e);
                }
            }
            reaped += 1;
        }
        reaped
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Applies `policy` to every outstanding task and returns how many there were.
    pub async fn shutdown(&mut self, policy: ShutdownPolicy) -> usize {
        self.reap();
        let outstanding = self.tasks.len();
        match policy {
            ShutdownPolicy::Drain => {
                if outstanding > 0 {
                    tracing::info!("⏳ Waiting for {} in-flight request(s)", outstanding);
                }
                while let Some(joined) = self.tasks.join_next().await {
                    if let Err(e) = joined {
                        tracing::warn!("In-flight request ended abnormally: {}", e);
                    }
                }
            }
            ShutdownPolicy::Abandon => {
                if outstanding > 0 {
                    tracing::info!("Abandoning {} in-flight request(s)", outstanding);
                }
                self.tasks.shutdown().await;
            }
        }
        outstanding
    }
}
