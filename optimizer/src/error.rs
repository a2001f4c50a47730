use std::{error::Error, fmt};

use tokio::task::JoinError;
use worker::WorkerErr;

/// The optimizer module's result type.
pub type Result<T> = std::result::Result<T, OptimizerErr>;

/// Optimizer runtime failures.
#[derive(Debug)]
pub enum OptimizerErr {
    /// Invalid configuration — caught before any task is dispatched.
    NoRemoteWorkers,
    /// A remote task resolved to a worker fault; the step is aborted.
    Worker(WorkerErr),
    /// A dispatched task panicked or was cancelled underneath us.
    TaskPanicked(JoinError),
}

impl fmt::Display for OptimizerErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizerErr::NoRemoteWorkers => {
                write!(f, "async optimizer requires at least 1 remote worker")
            }
            OptimizerErr::Worker(e) => write!(f, "remote task failed: {e}"),
            OptimizerErr::TaskPanicked(e) => write!(f, "dispatched task panicked: {e}"),
        }
    }
}

impl Error for OptimizerErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            OptimizerErr::Worker(e) => Some(e),
            OptimizerErr::TaskPanicked(e) => Some(e),
            OptimizerErr::NoRemoteWorkers => None,
        }
    }
}

impl From<WorkerErr> for OptimizerErr {
    fn from(value: WorkerErr) -> Self {
        Self::Worker(value)
    }
}

impl From<JoinError> for OptimizerErr {
    fn from(value: JoinError) -> Self {
        Self::TaskPanicked(value)
    }
}
