use transfer::TransferTag;

use crate::{
    error::{Result, WorkerErr},
    gradient::{GradientResult, Weights},
};

/// The process holding the authoritative parameter snapshot.
///
/// Unlike [`crate::RemoteWorker`], all calls here are synchronous: the local
/// worker lives on the optimizer's own control thread and is never shared.
pub trait LocalWorker: Send {
    fn get_weights(&self) -> Weights;

    /// Applies one aggregated update.
    ///
    /// # Args
    /// * `grad` - The reduced gradient, or a marker when the reduction
    ///   happened inside the transfer layer.
    /// * `tags` - Transfer tags of every task in the applied batch, so a
    ///   delegated backend knows which remote buffers to consume.
    fn apply_gradients(&mut self, grad: &GradientResult, tags: &[TransferTag]) -> Result<()>;

    fn set_weights(&mut self, weights: Weights);
}

/// A plain gradient-descent local worker: `w -= lr * g`.
#[derive(Debug)]
pub struct SgdLocalWorker {
    weights: Weights,
    learning_rate: f32,
}

impl SgdLocalWorker {
    /// Creates a new `SgdLocalWorker`.
    ///
    /// # Args
    /// * `weights` - Initial parameter snapshot.
    /// * `learning_rate` - The coefficient that modulates the amount of
    ///   training per update.
    pub fn new(weights: Weights, learning_rate: f32) -> Self {
        Self {
            weights,
            learning_rate,
        }
    }
}

impl LocalWorker for SgdLocalWorker {
    fn get_weights(&self) -> Weights {
        self.weights.clone()
    }

    fn apply_gradients(&mut self, grad: &GradientResult, _tags: &[TransferTag]) -> Result<()> {
        let Some(grad) = grad.as_gradient() else {
            // Marker update: the transfer layer owns the real reduction and
            // this worker holds no authoritative copy to move.
            return Ok(());
        };

        if grad.len() != self.weights.len() {
            return Err(WorkerErr::ShapeMismatch {
                got: grad.len(),
                expected: self.weights.len(),
            });
        }

        let lr = self.learning_rate;
        for (layer, g) in self.weights.iter_mut().zip(grad) {
            if g.len() != layer.len() {
                return Err(WorkerErr::ShapeMismatch {
                    got: g.len(),
                    expected: layer.len(),
                });
            }
            layer.scaled_add(-lr, g);
        }

        Ok(())
    }

    fn set_weights(&mut self, weights: Weights) {
        self.weights = weights;
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn sgd_applies_scaled_update() {
        let mut local = SgdLocalWorker::new(vec![array![1.0_f32, 2.0]], 0.5);
        let grad = GradientResult::Gradient(vec![array![2.0_f32, -2.0]]);
        local.apply_gradients(&grad, &[]).unwrap();
        assert_eq!(local.get_weights(), vec![array![0.0_f32, 3.0]]);
    }

    #[test]
    fn sgd_rejects_mismatched_layer_count() {
        let mut local = SgdLocalWorker::new(vec![array![1.0_f32]], 0.1);
        let grad = GradientResult::Gradient(vec![array![1.0_f32], array![1.0_f32]]);
        let err = local.apply_gradients(&grad, &[]).unwrap_err();
        assert!(matches!(err, WorkerErr::ShapeMismatch { got: 2, expected: 1 }));
    }

    #[test]
    fn sgd_ignores_marker_updates() {
        let mut local = SgdLocalWorker::new(vec![array![1.0_f32]], 0.1);
        local
            .apply_gradients(&GradientResult::Marker, &[])
            .unwrap();
        assert_eq!(local.get_weights(), vec![array![1.0_f32]]);
    }
}
