// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parallel coverage runner with fault isolation.
//!
//! A fixed pool of workers pulls runs from a FIFO queue filled in plan
//! order. Each worker executes through the [`Sandbox`], classifies the
//! result, and sends the verdict to the calling thread, which is the only
//! writer of the [`Aggregator`].

use std::thread;

use crossbeam_channel::{Receiver, Sender};

use crate::cancel::CancellationToken;
use crate::classify::classify;
use crate::plan::{Plan, RunKey, TestRun};
use crate::report::Aggregator;
use crate::sandbox::Sandbox;
use crate::verdict::Verdict;

/// Prefix of worker thread names.
pub const WORKER_THREAD: &str = "conform-worker";

/// Configuration for the runner.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunnerConfig {
    /// Worker threads; 0 uses available parallelism.
    pub jobs: usize,
}

/// What a finished (or cancelled) run produced.
#[derive(Debug)]
pub struct RunOutcome {
    pub aggregator: Aggregator,
    /// Runs the plan contained, executed or not.
    pub planned: usize,
    /// Some planned runs never produced a verdict.
    pub cancelled: bool,
}

/// Drives a plan through the sandbox.
pub struct Runner {
    sandbox: Sandbox,
    config: RunnerConfig,
}

impl Runner {
    pub fn new(sandbox: Sandbox, config: RunnerConfig) -> Self {
        Self { sandbox, config }
    }

    /// Worker count for `runs` queued runs.
    pub fn worker_count(&self, runs: usize) -> usize {
        let jobs = match self.config.jobs {
            0 => thread::available_parallelism().map_or(1, |n| n.get()),
            n => n,
        };
        jobs.min(runs).max(1)
    }

    /// Execute every run in `plan`.
    ///
    /// On cancellation queued runs are dropped and in-flight runs are
    /// abandoned after their grace period; the outcome holds whatever
    /// finished.
    pub fn run(&self, plan: Plan, cancel: &CancellationToken) -> RunOutcome {
        let planned = plan.total();
        let mut aggregator = Aggregator::new();
        for (key, verdict) in plan.resolved {
            aggregator.record(key, verdict);
        }

        let workers = self.worker_count(plan.runs.len());
        let (job_tx, job_rx) = crossbeam_channel::unbounded::<TestRun>();
        for run in plan.runs {
            // Receiver is held below, so the send cannot fail.
            let _ = job_tx.send(run);
        }
        drop(job_tx);

        let (result_tx, result_rx) = crossbeam_channel::unbounded::<(RunKey, Verdict)>();
        thread::scope(|scope| {
            let mut spawned = 0;
            for index in 0..workers {
                let jobs = job_rx.clone();
                let results = result_tx.clone();
                let sandbox = &self.sandbox;
                let started = thread::Builder::new()
                    .name(format!("{WORKER_THREAD}-{index}"))
                    .spawn_scoped(scope, move || work(sandbox, &jobs, &results, cancel));
                match started {
                    Ok(_) => spawned += 1,
                    Err(e) => tracing::warn!("failed to start worker {}: {}", index, e),
                }
            }
            if spawned == 0 {
                tracing::warn!("no worker threads, running on the calling thread");
                work(&self.sandbox, &job_rx, &result_tx, cancel);
            }
            drop(result_tx);

            for (key, verdict) in result_rx {
                tracing::debug!(run = %key, verdict = %verdict.kind(), "finished");
                aggregator.record(key, verdict);
            }
        });

        let dropped = job_rx.try_iter().count();
        if dropped > 0 {
            tracing::info!("{} queued runs dropped after cancellation", dropped);
        }
        let cancelled = aggregator.len() < planned;
        RunOutcome {
            aggregator,
            planned,
            cancelled,
        }
    }
}

/// Worker loop: one run at a time until the queue drains or the run is
/// cancelled.
fn work(
    sandbox: &Sandbox,
    jobs: &Receiver<TestRun>,
    results: &Sender<(RunKey, Verdict)>,
    cancel: &CancellationToken,
) {
    while !cancel.is_cancelled() {
        let Ok(TestRun {
            key,
            expected,
            request,
        }) = jobs.recv()
        else {
            return;
        };
        let Ok(result) = sandbox.run(request, cancel) else {
            tracing::debug!(run = %key, "abandoned after cancellation");
            return;
        };
        if results.send((key, classify(&expected, &result))).is_err() {
            return;
        }
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
