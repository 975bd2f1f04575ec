//! Core update scheduler
//!
//! The UpdateScheduler is responsible for:
//! - Notifying the DnsProvider once immediately at startup
//! - Notifying it again on every tick of the update interval
//! - Counting successful updates and emitting periodic heartbeats
//!
//! ## Architecture
//!
//! ```text
//!   ┌─────────────────┐   update_domains()   ┌──────────────┐
//!   │ UpdateScheduler │ ───────────────────▶ │ DnsProvider  │
//!   └─────────────────┘                      └──────────────┘
//!            │
//!            ├──── tracing logs
//!            └──── EngineEvent channel (telemetry sink)
//! ```
//!
//! ## Tick Flow
//!
//! 1. Sleep until the next tick boundary
//! 2. Call DnsProvider::update_domains() and wait for it to finish
//! 3. Count the outcome
//! 4. Emit a heartbeat if the heartbeat interval has elapsed
//! 5. Arm the next boundary, skipping any that passed during step 2

use crate::config::DyndnsConfig;
use crate::error::Result;
use crate::traits::{DnsProvider, UpdateOutcome};
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

/// Events emitted by the UpdateScheduler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Scheduler started
    Started {
        domains_count: usize,
    },

    /// The provider accepted an update
    UpdateSucceeded,

    /// An update attempt failed
    UpdateFailed {
        error: String,
    },

    /// Periodic summary
    Heartbeat {
        /// Successful updates since the previous heartbeat
        successful_updates: u64,
    },
}

/// Summary produced when the heartbeat interval has elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heartbeat {
    /// Successful updates since the previous heartbeat
    pub successful_updates: u64,
}

/// Success counter and heartbeat clock
///
/// Owned by the scheduler's own loop; never shared.
#[derive(Debug)]
pub struct RunCounters {
    successes: u64,
    last_heartbeat: Instant,
}

impl RunCounters {
    /// Start a fresh heartbeat window at `now`
    pub fn new(now: Instant) -> Self {
        Self {
            successes: 0,
            last_heartbeat: now,
        }
    }

    /// Count an update outcome; failures leave the counter untouched
    pub fn record(&mut self, outcome: &UpdateOutcome) {
        if outcome.is_success() {
            self.successes += 1;
        }
    }

    /// Successful updates since the last heartbeat
    pub fn successes(&self) -> u64 {
        self.successes
    }

    /// Return a heartbeat and reset the window if `interval` has elapsed
    pub fn heartbeat_due(&mut self, now: Instant, interval: Duration) -> Option<Heartbeat> {
        if now.saturating_duration_since(self.last_heartbeat) < interval {
            return None;
        }

        let heartbeat = Heartbeat {
            successful_updates: self.successes,
        };

        self.successes = 0;
        self.last_heartbeat = now;

        Some(heartbeat)
    }
}

/// Deadline used when a boundary does not fit in an `Instant`
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// `from + period`, or a deadline decades away if that overflows
fn deadline_after(from: Instant, period: Duration) -> Instant {
    from.checked_add(period)
        .or_else(|| from.checked_add(FAR_FUTURE))
        .unwrap_or(from)
}

/// Fixed-period tick boundaries
///
/// Boundaries sit at `start + k * period`. Boundaries that pass while an
/// attempt is still running are dropped, so a slow attempt is followed by
/// one tick at the next boundary rather than a burst.
#[derive(Debug)]
pub(crate) struct TickSchedule {
    period: Duration,
    next: Instant,
}

impl TickSchedule {
    pub(crate) fn new(start: Instant, period: Duration) -> Self {
        Self {
            period,
            next: deadline_after(start, period),
        }
    }

    pub(crate) fn next_deadline(&self) -> Instant {
        self.next
    }

    /// Move to the first boundary strictly after `now`
    pub(crate) fn advance(&mut self, now: Instant) {
        self.next = deadline_after(self.next, self.period);
        while self.next <= now {
            let next = deadline_after(self.next, self.period);
            if next == self.next {
                // No representable boundary past `now`
                self.next = deadline_after(now, self.period);
                break;
            }
            self.next = next;
        }
    }
}

/// Core update scheduler
///
/// Drives the provider forever at a fixed cadence. Exactly one attempt is
/// in flight at a time; a slow provider delays the following tick but never
/// causes two attempts to overlap.
///
/// ## Lifecycle
///
/// 1. Create with [`UpdateScheduler::new()`]
/// 2. Start with [`UpdateScheduler::run()`]
/// 3. Runs until the process is terminated
pub struct UpdateScheduler {
    /// DNS provider for notifying the endpoint
    provider: Box<dyn DnsProvider>,

    /// Domains sent with every update
    domains: Vec<String>,

    /// Time between two update attempts
    update_interval: Duration,

    /// Time between two heartbeat summaries
    heartbeat_interval: Duration,

    /// Event sender for external monitoring
    event_tx: mpsc::Sender<EngineEvent>,
}

impl UpdateScheduler {
    /// Create a new scheduler
    ///
    /// # Parameters
    ///
    /// - `provider`: DNS provider implementation
    /// - `config`: Validated updater configuration
    ///
    /// # Returns
    ///
    /// A tuple of (scheduler, event_receiver) where event_receiver yields engine events
    pub fn new(
        provider: Box<dyn DnsProvider>,
        config: &DyndnsConfig,
    ) -> Result<(Self, mpsc::Receiver<EngineEvent>)> {
        config.validate()?;

        let (tx, rx) = mpsc::channel(config.engine.event_channel_capacity);

        let scheduler = Self {
            provider,
            domains: config.domains.clone(),
            update_interval: config.update_interval(),
            heartbeat_interval: config.heartbeat_interval(),
            event_tx: tx,
        };

        Ok((scheduler, rx))
    }

    /// Run the scheduler
    ///
    /// Performs one update immediately, then one per update interval,
    /// forever. There is no normal exit.
    pub async fn run(&self) -> Infallible {
        info!(
            provider = self.provider.provider_name(),
            domains = ?self.domains,
            "Update scheduler started"
        );
        self.emit_event(EngineEvent::Started {
            domains_count: self.domains.len(),
        });

        // The first attempt is logged but not counted toward the heartbeat
        self.attempt().await;

        let start = Instant::now();
        let mut counters = RunCounters::new(start);
        let mut schedule = TickSchedule::new(start, self.update_interval);

        loop {
            tokio::time::sleep_until(schedule.next_deadline()).await;

            let outcome = self.attempt().await;
            counters.record(&outcome);

            let now = Instant::now();
            if let Some(heartbeat) = counters.heartbeat_due(now, self.heartbeat_interval) {
                info!(
                    successful_updates_since_last = heartbeat.successful_updates,
                    "Heartbeat: service running"
                );
                self.emit_event(EngineEvent::Heartbeat {
                    successful_updates: heartbeat.successful_updates,
                });
            }

            schedule.advance(now);
        }
    }

    /// Perform a single update attempt
    async fn attempt(&self) -> UpdateOutcome {
        debug!(domains = ?self.domains, "Sending DNS update request");

        let outcome = UpdateOutcome::from(self.provider.update_domains(&self.domains).await);

        match &outcome {
            UpdateOutcome::Success => {
                debug!(domains = ?self.domains, "DNS updated successfully");
                self.emit_event(EngineEvent::UpdateSucceeded);
            }
            UpdateOutcome::Failure { detail } => {
                error!(error = %detail, "DNS update failed");
                self.emit_event(EngineEvent::UpdateFailed {
                    error: detail.clone(),
                });
            }
        }

        outcome
    }

    /// Emit an engine event
    fn emit_event(&self, event: EngineEvent) {
        match self.event_tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                warn!("Event channel full, dropping event. Consider increasing event_channel_capacity.");
            }
            // Nobody is listening; logs still carry everything
            Err(TrySendError::Closed(_)) => {}
        }
    }
}
