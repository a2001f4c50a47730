pub mod error;
pub mod gradient;
pub mod local;
pub mod remote;
pub mod set;
pub mod sim;

pub use error::{Result, WorkerErr};
pub use gradient::{Gradient, GradientResult, LearnerStats, SampleBatch, Weights};
pub use local::{LocalWorker, SgdLocalWorker};
pub use remote::RemoteWorker;
pub use set::WorkerSet;
pub use sim::SimWorker;
