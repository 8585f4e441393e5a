//! Rental sweeper
//!
//! Periodic background task that returns expired stations to the pool.
//! Registered as [`TaskKind::Periodic`](crate::core::TaskKind) at server
//! startup. It is just another client of the rental service's guarded
//! update, so it needs no locking of its own.

use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::rentals::RentalService;

pub struct RentalSweeper {
    service: RentalService,
    interval: Duration,
    shutdown: CancellationToken,
}

impl RentalSweeper {
    pub fn new(service: RentalService, interval: Duration, shutdown: CancellationToken) -> Self {
        Self {
            service,
            interval,
            shutdown,
        }
    }

    /// Main loop: sweep once per interval until shutdown.
    ///
    /// The first tick fires immediately, so leases that expired while the
    /// process was down are reclaimed right at startup. A failed cycle is
    /// logged and retried on the next tick; it never takes the loop down.
    pub async fn run(self) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "Rental sweeper started"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.service.sweep().await {
                        tracing::error!(error = %e, "Sweep cycle failed; retrying on next tick");
                    }
                }
                _ = self.shutdown.cancelled() => {
                    tracing::info!("Rental sweeper received shutdown signal");
                    break;
                }
            }
        }

        tracing::info!("Rental sweeper stopped");
    }
}
