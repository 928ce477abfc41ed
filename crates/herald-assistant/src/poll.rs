//! Bounded polling of an assistant run until it reaches a terminal status.
//!
//! A run is cheap to finish shortly after submission but may occasionally
//! take minutes, so the poll cadence is tiered: tight at first, then
//! progressively sparser to spare request quota. The schedule is data, not
//! control flow — an ordered list of `(phase end, interval)` pairs plus an
//! overall deadline — and the loop that consumes it knows nothing about the
//! concrete provider.

use crate::api::AssistantApi;
use crate::error::AssistantError;
use herald_types::{RunId, RunStatus, ThreadId};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// One tier of the schedule: poll every `interval` while elapsed time is
/// below `until`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPhase {
    /// Elapsed time at which this phase ends, measured from the first poll.
    pub until: Duration,
    /// Sleep between consecutive polls within this phase.
    pub interval: Duration,
}

/// Tiered polling schedule with an overall deadline.
///
/// Phases must be ordered by ascending `until`; the deadline coincides with
/// the end of the last phase. Once elapsed time passes the deadline the
/// poller stops and reports [`AssistantError::PollTimeout`] — deliberately
/// distinct from the provider-reported `expired` status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSchedule {
    phases: Vec<PollPhase>,
}

impl Default for PollSchedule {
    /// 2s cadence for the first 20s, 5s until 50s, 15s until the 260s
    /// deadline.
    fn default() -> Self {
        Self::new(vec![
            PollPhase {
                until: Duration::from_secs(20),
                interval: Duration::from_secs(2),
            },
            PollPhase {
                until: Duration::from_secs(50),
                interval: Duration::from_secs(5),
            },
            PollPhase {
                until: Duration::from_secs(260),
                interval: Duration::from_secs(15),
            },
        ])
    }
}

impl PollSchedule {
    /// Builds a schedule from ordered phases.
    ///
    /// # Panics
    /// Panics if `phases` is empty or the phase ends are not strictly
    /// ascending; schedules are constructed once at startup from constants
    /// or validated config.
    pub fn new(phases: Vec<PollPhase>) -> Self {
        assert!(!phases.is_empty(), "schedule needs at least one phase");
        assert!(
            phases.windows(2).all(|w| w[0].until < w[1].until),
            "phase ends must be strictly ascending"
        );
        Self { phases }
    }

    /// Overall deadline: the end of the last phase.
    pub fn deadline(&self) -> Duration {
        self.phases.last().map(|p| p.until).unwrap_or_default()
    }

    /// Poll interval in effect at `elapsed`, or `None` past the deadline.
    pub fn interval_at(&self, elapsed: Duration) -> Option<Duration> {
        self.phases
            .iter()
            .find(|phase| elapsed < phase.until)
            .map(|phase| phase.interval)
    }
}

/// Polls `run` on `thread` until a terminal status or the schedule deadline.
///
/// The status is checked once up front, so a run that is already terminal
/// returns without sleeping. After that the task sleeps the interval of the
/// current phase, re-fetches, and exits as soon as a terminal status is
/// observed — it never waits out the remainder of a phase.
pub async fn await_completion(
    api: &dyn AssistantApi,
    thread: &ThreadId,
    run: &RunId,
    schedule: &PollSchedule,
) -> Result<RunStatus, AssistantError> {
    let started = Instant::now();

    let mut status = api.run_status(thread, run).await?;
    if status.is_terminal() {
        return Ok(status);
    }

    loop {
        let elapsed = started.elapsed();
        let Some(interval) = schedule.interval_at(elapsed) else {
            warn!(
                %thread,
                %run,
                elapsed_secs = elapsed.as_secs(),
                last_status = status.label(),
                "run polling deadline reached"
            );
            return Err(AssistantError::PollTimeout {
                run_id: run.clone(),
                deadline_secs: schedule.deadline().as_secs(),
            });
        };

        tokio::time::sleep(interval).await;
        status = api.run_status(thread, run).await?;
        debug!(%thread, %run, status = status.label(), "polled run status");
        if status.is_terminal() {
            return Ok(status);
        }
    }
}
