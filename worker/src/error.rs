use std::{error::Error, fmt};

/// The worker module's result type.
pub type Result<T> = std::result::Result<T, WorkerErr>;

/// Worker boundary failures.
#[derive(Debug)]
pub enum WorkerErr {
    ShapeMismatch {
        got: usize,
        expected: usize,
    },
    /// A delegated-mode task was dispatched without a transfer tag.
    MissingTransferTag {
        worker_id: usize,
    },
    /// Opaque failure raised by a remote worker implementation.
    Remote {
        worker_id: usize,
        msg: String,
    },
}

impl fmt::Display for WorkerErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerErr::ShapeMismatch { got, expected } => {
                write!(f, "gradient shape mismatch: got {got}, expected {expected}")
            }
            WorkerErr::MissingTransferTag { worker_id } => {
                write!(f, "worker {worker_id}: delegated task dispatched without a transfer tag")
            }
            WorkerErr::Remote { worker_id, msg } => {
                write!(f, "worker {worker_id} failed: {msg}")
            }
        }
    }
}

impl Error for WorkerErr {}
