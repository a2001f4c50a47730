use serde::Serialize;
use worker::LearnerStats;

/// Point-in-time snapshot of one optimizer's throughput counters and phase
/// timings. Produced by [`crate::AsyncGradientsOptimizer::stats`]; reading it
/// has no side effects.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizerStats {
    /// Samples consumed across all applied batches. Never decreases.
    pub num_steps_sampled: u64,
    /// Samples trained on across all applied batches. Never decreases.
    pub num_steps_trained: u64,
    pub wait_time_ms: f64,
    pub apply_time_ms: f64,
    pub dispatch_time_ms: f64,
    /// The most recently observed learner record, not an aggregate.
    pub learner: LearnerStats,
}
