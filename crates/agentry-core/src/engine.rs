//! Execution engine - the three loops that drive an assembled agent
//!
//! Fail fast, no recovery: none of the loops catches or retries an error
//! from a role implementation. The first failure aborts the loop and
//! propagates to the caller unmodified.

use std::time::Duration;

use anyhow::{ensure, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};
use uuid::Uuid;

use crate::roles::Agent;

/// Pacing and termination bounds for the timed run loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopBudget {
    /// Target `advance()` frequency in Hz
    pub hz: u32,
    /// Hard stop after this many calls, independent of the agent's own
    /// completion signal
    pub max_iters: Option<u64>,
}

impl Default for LoopBudget {
    fn default() -> Self {
        Self {
            hz: 40,
            max_iters: None,
        }
    }
}

/// Why the timed run loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The agent signalled completion
    Completed,
    /// The iteration cap was reached first
    IterationLimit,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::Completed => write!(f, "completed"),
            StopReason::IterationLimit => write!(f, "iteration limit"),
        }
    }
}

/// Summary of one timed run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub steps: u64,
    pub stop: StopReason,
}

/// Call `agent.train()` exactly `iters` times, sequentially
pub fn train(agent: &mut dyn Agent, iters: u64) -> Result<()> {
    for iteration in 0..iters {
        debug!(iteration, "training");
        agent.train()?;
    }
    info!(iters, "training complete");
    Ok(())
}

/// Step the agent until it signals completion; returns the step count.
///
/// The count includes the final, completing call. No iteration bound is
/// imposed: an agent that never completes runs forever.
pub fn test(agent: &mut dyn Agent) -> Result<u64> {
    let mut steps: u64 = 0;
    loop {
        let done = agent.advance()?;
        steps += 1;
        if done {
            info!(steps, "agent finished");
            return Ok(steps);
        }
    }
}

/// Step the agent at a target frequency until it completes or the
/// iteration cap is reached, whichever comes first.
///
/// Pacing aims for a constant `1/hz` interval between advances. A slow
/// `advance()` causes drift; missed ticks are delayed, never compensated
/// for by bursting extra calls.
pub async fn run(agent: &mut dyn Agent, budget: &LoopBudget) -> Result<RunReport> {
    ensure!(budget.hz > 0, "run frequency must be positive");

    let run_id = Uuid::new_v4();
    let started_at = Utc::now();
    let period = Duration::from_secs_f64(1.0 / f64::from(budget.hz));
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(%run_id, hz = budget.hz, max_iters = ?budget.max_iters, "run started");

    let mut steps: u64 = 0;
    let stop = loop {
        if let Some(max_iters) = budget.max_iters {
            if steps >= max_iters {
                break StopReason::IterationLimit;
            }
        }
        ticker.tick().await;
        let done = agent.advance()?;
        steps += 1;
        if done {
            break StopReason::Completed;
        }
    };

    let report = RunReport {
        run_id,
        started_at,
        finished_at: Utc::now(),
        steps,
        stop,
    };
    info!(%run_id, steps, stop = ?stop, "run finished");
    Ok(report)
}
