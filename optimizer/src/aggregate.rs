use worker::{Gradient, GradientResult};

/// Reduces one wait round's worth of gradient results into a single
/// applicable update.
///
/// The strategy is chosen once at optimizer construction; the dispatch loop
/// stays strategy-agnostic and only looks at whether a reduction came back
/// at all.
pub trait GradientAggregator: Send {
    /// True when each dispatched task needs a transfer-layer tag allocated.
    fn uses_transfer_tags(&self) -> bool;

    /// Reduces the collected batch.
    ///
    /// # Returns
    /// `None` only when the batch holds nothing to reduce; the apply phase
    /// is skipped in that case.
    fn reduce(&self, batch: Vec<GradientResult>) -> Option<GradientResult>;
}

/// Element-wise arithmetic mean across equal-shaped gradient sequences,
/// position by position, computed on the driver.
pub struct LocalMean;

impl GradientAggregator for LocalMean {
    fn uses_transfer_tags(&self) -> bool {
        false
    }

    fn reduce(&self, batch: Vec<GradientResult>) -> Option<GradientResult> {
        let mut grads = batch.into_iter().filter_map(|result| match result {
            GradientResult::Gradient(grad) => Some(grad),
            GradientResult::Marker => None,
        });

        let mut acc: Gradient = grads.next()?;
        let mut n = 1_usize;
        for grad in grads {
            for (sum, layer) in acc.iter_mut().zip(grad) {
                *sum += &layer;
            }
            n += 1;
        }

        if n > 1 {
            let scale = 1.0 / n as f32;
            for layer in acc.iter_mut() {
                *layer *= scale;
            }
        }

        Some(GradientResult::Gradient(acc))
    }
}

/// Pass-through strategy for transfer-layer reduction: the real value
/// movement happened out-of-band, so the first collected result is forwarded
/// untouched and the apply phase only consumes the batch's transfer tags.
pub struct Delegated;

impl GradientAggregator for Delegated {
    fn uses_transfer_tags(&self) -> bool {
        true
    }

    fn reduce(&self, mut batch: Vec<GradientResult>) -> Option<GradientResult> {
        if batch.is_empty() {
            None
        } else {
            Some(batch.swap_remove(0))
        }
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;
    use worker::GradientResult;

    use super::*;

    fn grad(values: &[f32]) -> GradientResult {
        GradientResult::Gradient(vec![array![values[0]], array![values[1]]])
    }

    #[test]
    fn mean_of_two_is_halfway() {
        let reduced = LocalMean
            .reduce(vec![grad(&[1.0, 10.0]), grad(&[2.0, 20.0])])
            .unwrap();
        assert_eq!(reduced, grad(&[1.5, 15.0]));
    }

    #[test]
    fn mean_of_one_is_itself() {
        let reduced = LocalMean.reduce(vec![grad(&[3.0, -4.0])]).unwrap();
        assert_eq!(reduced, grad(&[3.0, -4.0]));
    }

    #[test]
    fn mean_is_positionwise_across_three() {
        let reduced = LocalMean
            .reduce(vec![
                grad(&[1.0, 0.0]),
                grad(&[2.0, 3.0]),
                grad(&[3.0, 6.0]),
            ])
            .unwrap();
        assert_eq!(reduced, grad(&[2.0, 3.0]));
    }

    #[test]
    fn mean_of_empty_batch_is_none() {
        assert!(LocalMean.reduce(Vec::new()).is_none());
    }

    #[test]
    fn delegated_returns_first_untouched() {
        let first = grad(&[7.0, 8.0]);
        let reduced = Delegated
            .reduce(vec![first.clone(), grad(&[0.0, 0.0])])
            .unwrap();
        assert_eq!(reduced, first);
    }

    #[test]
    fn delegated_passes_markers_through() {
        let reduced = Delegated
            .reduce(vec![GradientResult::Marker, GradientResult::Marker])
            .unwrap();
        assert!(reduced.is_marker());
    }

    #[test]
    fn delegated_empty_batch_is_none() {
        assert!(Delegated.reduce(Vec::new()).is_none());
    }
}
