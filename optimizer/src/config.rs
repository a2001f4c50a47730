use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

/// Which gradient-reduction strategy to construct the optimizer with.
///
/// `LocalMean` averages gradients on the driver; `Delegated` hands the
/// O(workers × parameters) reduction to the external transfer layer and the
/// driver only forwards transfer tags. The choice is made once, at
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationConfig {
    #[default]
    LocalMean,
    Delegated,
}

/// Immutable scheduling bounds for one optimizer instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Per-step task budget: tasks dispatched after the initial wave stop
    /// once this many have been submitted in total.
    pub grads_per_step: usize,
    /// Target batch size for each wait round. Fewer pending tasks than this
    /// shrink the wait target to whatever is outstanding.
    pub broadcast_interval: NonZeroUsize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            grads_per_step: 100,
            broadcast_interval: const { NonZeroUsize::new(4).unwrap() },
        }
    }
}
