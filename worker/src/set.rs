use std::sync::Arc;

use crate::{local::LocalWorker, remote::RemoteWorker};

/// One local worker plus the fixed pool of remote compute agents.
///
/// The set is constructed once per training run; worker identity (the index
/// into `remote_workers`) is stable for its whole lifetime.
pub struct WorkerSet {
    local: Box<dyn LocalWorker>,
    remotes: Vec<Arc<dyn RemoteWorker>>,
}

impl WorkerSet {
    pub fn new(local: Box<dyn LocalWorker>, remotes: Vec<Arc<dyn RemoteWorker>>) -> Self {
        Self { local, remotes }
    }

    pub fn local_worker(&self) -> &dyn LocalWorker {
        self.local.as_ref()
    }

    pub fn local_worker_mut(&mut self) -> &mut dyn LocalWorker {
        self.local.as_mut()
    }

    pub fn remote_workers(&self) -> &[Arc<dyn RemoteWorker>] {
        &self.remotes
    }

    pub fn num_remote_workers(&self) -> usize {
        self.remotes.len()
    }
}
