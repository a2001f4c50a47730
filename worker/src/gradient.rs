use std::collections::BTreeMap;

use ndarray::Array1;
use serde::Serialize;

/// A parameter snapshot: one array per layer, in model order.
pub type Weights = Vec<Array1<f32>>;

/// A gradient with the same layer layout as [`Weights`].
pub type Gradient = Vec<Array1<f32>>;

/// Value produced by one completed compute task.
///
/// `Marker` stands in when the actual reduction already happened inside the
/// external transfer layer; it is a present value, distinct from "nothing was
/// collected", so the apply guard can tell the two apart.
#[derive(Debug, Clone, PartialEq)]
pub enum GradientResult {
    Gradient(Gradient),
    Marker,
}

impl GradientResult {
    pub fn as_gradient(&self) -> Option<&Gradient> {
        match self {
            GradientResult::Gradient(grad) => Some(grad),
            GradientResult::Marker => None,
        }
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, GradientResult::Marker)
    }
}

/// Training metrics attached to one compute result.
///
/// The optimizer keeps only the most recently observed record, so readers see
/// the latest finished worker's numbers, not an average.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LearnerStats {
    /// Number of samples behind this gradient.
    pub batch_count: usize,
    /// Named scalar metrics (losses, norms).
    pub fields: BTreeMap<String, f64>,
}

impl LearnerStats {
    pub fn new(batch_count: usize) -> Self {
        Self {
            batch_count,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: &str, value: f64) -> Self {
        self.fields.insert(name.to_owned(), value);
        self
    }
}

/// Opaque rollout payload, produced and consumed by the same worker.
#[derive(Debug, Clone, Default)]
pub struct SampleBatch {
    pub count: usize,
    pub data: Vec<f32>,
}

impl SampleBatch {
    pub fn with_count(count: usize) -> Self {
        Self {
            count,
            data: Vec::new(),
        }
    }
}
