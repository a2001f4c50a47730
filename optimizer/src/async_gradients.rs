use std::{collections::HashMap, sync::Arc, time::Instant};

use log::{debug, trace};
use transfer::TransferTag;
use worker::{LearnerStats, Weights, WorkerSet};

use crate::{
    aggregate::GradientAggregator,
    config::OptimizerConfig,
    error::{OptimizerErr, Result},
    stats::OptimizerStats,
    timer::TimerStat,
    waiter::{InFlightSet, TaskId},
};

/// Bookkeeping for one outstanding sample+compute task: the worker that owns
/// it and, in delegated mode, the transfer slot its gradient lands in.
struct TaskRecord {
    worker: usize,
    tag: Option<TransferTag>,
}

/// An asynchronous gradient optimizer, e.g. for driving A3C-style training.
///
/// Each [`step`](Self::step) pipelines gradient computation across the remote
/// workers: an initial wave of one task per worker, then a loop that waits
/// for a bounded batch of completions, reduces them through the configured
/// [`GradientAggregator`], applies the update to the local worker, and
/// re-dispatches to the freed workers until the per-step budget is spent.
///
/// Concurrency comes entirely from the worker pool; this type runs on a
/// single logical control thread and suspends only inside the completion
/// waiter. There is no retry and no deadline: a faulted task aborts the
/// current step, and a stuck worker stalls it.
pub struct AsyncGradientsOptimizer<A> {
    workers: WorkerSet,
    config: OptimizerConfig,
    aggregator: A,
    next_task: u64,
    num_steps_sampled: u64,
    num_steps_trained: u64,
    learner_stats: LearnerStats,
    wait_timer: TimerStat,
    apply_timer: TimerStat,
    dispatch_timer: TimerStat,
}

impl<A> std::fmt::Debug for AsyncGradientsOptimizer<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncGradientsOptimizer")
            .finish_non_exhaustive()
    }
}

impl<A: GradientAggregator> AsyncGradientsOptimizer<A> {
    /// Creates a new optimizer over `workers`.
    ///
    /// # Args
    /// * `workers` - The worker set; must hold at least one remote worker.
    /// * `config` - Immutable scheduling bounds.
    /// * `aggregator` - Reduction strategy, fixed for this instance.
    ///
    /// # Errors
    /// `OptimizerErr::NoRemoteWorkers` when the pool has no remote workers.
    pub fn new(workers: WorkerSet, config: OptimizerConfig, aggregator: A) -> Result<Self> {
        if workers.remote_workers().is_empty() {
            return Err(OptimizerErr::NoRemoteWorkers);
        }

        Ok(Self {
            workers,
            config,
            aggregator,
            next_task: 0,
            num_steps_sampled: 0,
            num_steps_trained: 0,
            learner_stats: LearnerStats::default(),
            wait_timer: TimerStat::default(),
            apply_timer: TimerStat::default(),
            dispatch_timer: TimerStat::default(),
        })
    }

    pub fn workers(&self) -> &WorkerSet {
        &self.workers
    }

    pub fn workers_mut(&mut self) -> &mut WorkerSet {
        &mut self.workers
    }

    /// Runs one full aggregation cycle and returns when its work graph has
    /// drained.
    pub async fn step(&mut self) -> Result<()> {
        let mut in_flight = InFlightSet::new();
        let mut pending: HashMap<TaskId, TaskRecord> = HashMap::new();
        let mut num_gradients = 0_usize;

        // Kick off the first wave: one task per remote worker, all against
        // the same snapshot.
        let weights = self.workers.local_worker().get_weights();
        for idx in 0..self.workers.num_remote_workers() {
            self.submit(idx, weights.clone(), &mut in_flight, &mut pending);
            num_gradients += 1;
        }

        while !pending.is_empty() {
            // Wait phase covers collection and reduction, matching how the
            // phase means are reported.
            let wait_start = Instant::now();
            let target = self.config.broadcast_interval.get().min(pending.len());
            let ready = in_flight.next_ready(target).await?;

            let mut gradients = Vec::with_capacity(ready.len());
            let mut reduce_tags = Vec::new();
            let mut finished_workers = Vec::with_capacity(ready.len());
            for completion in ready {
                let Some(record) = pending.remove(&completion.task) else {
                    unreachable!("completion for untracked task {}", completion.task);
                };
                gradients.push(completion.result);
                if let Some(tag) = record.tag {
                    reduce_tags.push(tag);
                }
                finished_workers.push(record.worker);
                // Last write wins: the snapshot reflects the latest finished
                // worker in this batch.
                self.learner_stats = completion.stats;
            }

            let collected = gradients.len();
            let gradient = self.aggregator.reduce(gradients);
            self.wait_timer.observe(wait_start.elapsed());

            if let Some(gradient) = gradient {
                let apply_start = Instant::now();
                self.workers
                    .local_worker_mut()
                    .apply_gradients(&gradient, &reduce_tags)?;
                self.apply_timer.observe(apply_start.elapsed());

                // The last record's batch_count stands in for every task in
                // the batch. Known approximation, kept as-is.
                let processed = (self.learner_stats.batch_count * collected) as u64;
                self.num_steps_sampled += processed;
                self.num_steps_trained += processed;
            }

            let dispatch_start = Instant::now();
            let mut weights: Option<Weights> = None;
            for worker_idx in finished_workers {
                if num_gradients < self.config.grads_per_step {
                    // Fetch the snapshot at most once per re-dispatch phase.
                    let weights = weights
                        .get_or_insert_with(|| self.workers.local_worker().get_weights())
                        .clone();
                    self.submit(worker_idx, weights, &mut in_flight, &mut pending);
                    num_gradients += 1;
                }
            }
            self.dispatch_timer.observe(dispatch_start.elapsed());

            trace!(
                pending = pending.len(),
                dispatched = num_gradients;
                "wait round finished"
            );
        }

        Ok(())
    }

    /// Pushes `weights` to one remote worker and registers a fresh
    /// sample+compute task for it.
    fn submit(
        &mut self,
        worker_idx: usize,
        weights: Weights,
        in_flight: &mut InFlightSet,
        pending: &mut HashMap<TaskId, TaskRecord>,
    ) {
        let task = TaskId(self.next_task);
        self.next_task += 1;

        let tag = self
            .aggregator
            .uses_transfer_tags()
            .then(TransferTag::random);
        let remote = Arc::clone(&self.workers.remote_workers()[worker_idx]);

        debug!(worker_id = worker_idx, task = task.0; "dispatching sample+compute task");
        in_flight.spawn(async move {
            remote.set_weights(weights).await?;
            let batch = remote.sample().await?;
            let (result, stats) = remote.compute_gradients(batch, tag).await?;
            Ok(crate::waiter::Completion {
                task,
                result,
                stats,
            })
        });

        pending.insert(task, TaskRecord {
            worker: worker_idx,
            tag,
        });
    }

    /// Snapshot of the throughput counters, phase means and the last learner
    /// record.
    pub fn stats(&self) -> OptimizerStats {
        OptimizerStats {
            num_steps_sampled: self.num_steps_sampled,
            num_steps_trained: self.num_steps_trained,
            wait_time_ms: self.wait_timer.mean_ms(),
            apply_time_ms: self.apply_timer.mean_ms(),
            dispatch_time_ms: self.dispatch_timer.mean_ms(),
            learner: self.learner_stats.clone(),
        }
    }
}
