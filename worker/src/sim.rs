use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use log::debug;
use parking_lot::Mutex;
use transfer::{TransferConfig, TransferTag};

use crate::{
    error::{Result, WorkerErr},
    gradient::{Gradient, GradientResult, LearnerStats, SampleBatch, Weights},
    remote::RemoteWorker,
};

/// Gradient rule of a simulated worker: current weights and rollout in,
/// gradient out.
pub type GradFn = Arc<dyn Fn(&Weights, &SampleBatch) -> Gradient + Send + Sync>;

/// In-process stand-in for a remote compute agent.
///
/// Drives the same trait surface a networked worker would, with a pluggable
/// gradient rule and optional artificial compute latency so tests can pin
/// down completion order. In delegated mode it reports a marker instead of
/// the gradient payload, as a transfer-layer-backed worker does.
pub struct SimWorker {
    worker_id: usize,
    batch_size: usize,
    grad_fn: GradFn,
    latency: Option<Duration>,
    transfer: Option<TransferConfig>,
    weights: Mutex<Weights>,
}

impl SimWorker {
    /// Creates a new `SimWorker`.
    ///
    /// # Args
    /// * `worker_id` - Identifier used for observability.
    /// * `batch_size` - Sample count reported per rollout.
    /// * `grad_fn` - Gradient rule applied to the last received weights.
    pub fn new<F>(worker_id: usize, batch_size: usize, grad_fn: F) -> Self
    where
        F: Fn(&Weights, &SampleBatch) -> Gradient + Send + Sync + 'static,
    {
        Self {
            worker_id,
            batch_size,
            grad_fn: Arc::new(grad_fn),
            latency: None,
            transfer: None,
            weights: Mutex::new(Weights::new()),
        }
    }

    /// Adds a fixed compute delay before each gradient is produced.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Report markers instead of gradient payloads, as if the value went
    /// through the transfer layer described by `transfer`.
    pub fn delegated(mut self, transfer: TransferConfig) -> Self {
        self.transfer = Some(transfer);
        self
    }

    pub fn worker_id(&self) -> usize {
        self.worker_id
    }
}

#[async_trait]
impl RemoteWorker for SimWorker {
    async fn set_weights(&self, weights: Weights) -> Result<()> {
        *self.weights.lock() = weights;
        Ok(())
    }

    async fn sample(&self) -> Result<SampleBatch> {
        Ok(SampleBatch::with_count(self.batch_size))
    }

    async fn compute_gradients(
        &self,
        batch: SampleBatch,
        tag: Option<TransferTag>,
    ) -> Result<(GradientResult, LearnerStats)> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let grad = {
            let weights = self.weights.lock();
            (self.grad_fn)(&weights, &batch)
        };

        let grad_norm = grad
            .iter()
            .map(|layer| layer.iter().map(|g| (*g as f64).powi(2)).sum::<f64>())
            .sum::<f64>()
            .sqrt();
        let stats = LearnerStats::new(batch.count).with_field("grad_norm", grad_norm);

        if let Some(transfer) = &self.transfer {
            let tag = tag.ok_or(WorkerErr::MissingTransferTag {
                worker_id: self.worker_id,
            })?;
            debug!(
                worker_id = self.worker_id,
                store = transfer.store_address.as_str();
                "wrote gradient to transfer slot {tag}"
            );
            return Ok((GradientResult::Marker, stats));
        }

        Ok((GradientResult::Gradient(grad), stats))
    }
}
