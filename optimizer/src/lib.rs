pub mod aggregate;
pub mod async_gradients;
pub mod config;
pub mod error;
pub mod stats;
pub mod timer;
pub mod waiter;

pub use aggregate::{Delegated, GradientAggregator, LocalMean};
pub use async_gradients::AsyncGradientsOptimizer;
pub use config::{AggregationConfig, OptimizerConfig};
pub use error::{OptimizerErr, Result};
pub use stats::OptimizerStats;
pub use waiter::{Completion, InFlightSet, TaskId};
