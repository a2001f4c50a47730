use async_trait::async_trait;
use transfer::TransferTag;

use crate::{
    error::Result,
    gradient::{GradientResult, LearnerStats, SampleBatch, Weights},
};

/// Handle to an independently executing compute agent.
///
/// Every method is non-blocking from the optimizer's point of view: calls are
/// composed into a single spawned task per dispatch, and the optimizer only
/// ever suspends on the completion of whole tasks, never on individual
/// worker calls.
///
/// Implementations must tolerate concurrent calls from distinct tasks; the
/// optimizer guarantees at most one outstanding task per worker at a time.
#[async_trait]
pub trait RemoteWorker: Send + Sync {
    /// Replaces the worker's parameter snapshot.
    async fn set_weights(&self, weights: Weights) -> Result<()>;

    /// Collects a rollout batch with the current snapshot.
    async fn sample(&self) -> Result<SampleBatch>;

    /// Computes gradients over `batch`.
    ///
    /// # Args
    /// * `batch` - The rollout produced by this worker's own `sample` call.
    /// * `tag` - Transfer-layer slot to write the gradient into; `Some` only
    ///   when delegated aggregation is active.
    ///
    /// # Returns
    /// The gradient (or a marker when the transfer layer holds the real
    /// value) together with this batch's learner statistics.
    async fn compute_gradients(
        &self,
        batch: SampleBatch,
        tag: Option<TransferTag>,
    ) -> Result<(GradientResult, LearnerStats)>;
}
