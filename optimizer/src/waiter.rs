use std::fmt;

use tokio::task::JoinSet;
use worker::{GradientResult, LearnerStats};

use crate::error::Result;

/// Stable identifier for one in-flight task, unique within an optimizer's
/// lifetime. Bookkeeping is keyed by this id rather than by future identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

impl fmt::Debug for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TaskId({})", self.0)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Output of one resolved remote task.
#[derive(Debug)]
pub struct Completion {
    pub task: TaskId,
    pub result: GradientResult,
    pub stats: LearnerStats,
}

/// Tracks outstanding remote tasks and blocks for partial completion.
///
/// This is the only place the dispatch loop suspends: `next_ready` parks the
/// caller until the requested number of tasks have resolved, hands back
/// exactly the ready subset in completion order, and leaves the rest
/// outstanding. Tasks are consumed exactly once, never duplicated.
pub struct InFlightSet {
    tasks: JoinSet<worker::Result<Completion>>,
}

impl InFlightSet {
    pub fn new() -> Self {
        Self {
            tasks: JoinSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Submits a task to the runtime.
    pub fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = worker::Result<Completion>> + Send + 'static,
    {
        self.tasks.spawn(task);
    }

    /// Suspends until `min(num_returns, len)` tasks have resolved.
    ///
    /// # Returns
    /// The ready completions, in the order the tasks finished. A worker fault
    /// or a panicked task surfaces immediately as an error; remaining tasks
    /// stay in the set.
    pub async fn next_ready(&mut self, num_returns: usize) -> Result<Vec<Completion>> {
        let target = num_returns.min(self.tasks.len());
        let mut ready = Vec::with_capacity(target);

        while ready.len() < target {
            let Some(joined) = self.tasks.join_next().await else {
                break;
            };
            ready.push(joined??);
        }

        Ok(ready)
    }
}

impl Default for InFlightSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::sleep;
    use worker::WorkerErr;

    use super::*;
    use crate::error::OptimizerErr;

    fn completion(id: u64) -> worker::Result<Completion> {
        Ok(Completion {
            task: TaskId(id),
            result: GradientResult::Marker,
            stats: LearnerStats::default(),
        })
    }

    #[tokio::test]
    async fn returns_ready_subset_and_keeps_the_rest() {
        let mut set = InFlightSet::new();
        set.spawn(async {
            sleep(Duration::from_millis(10)).await;
            completion(0)
        });
        set.spawn(async {
            sleep(Duration::from_millis(30)).await;
            completion(1)
        });
        set.spawn(async {
            sleep(Duration::from_millis(200)).await;
            completion(2)
        });

        let ready = set.next_ready(2).await.unwrap();
        let ids: Vec<_> = ready.iter().map(|c| c.task).collect();
        assert_eq!(ids, vec![TaskId(0), TaskId(1)]);
        assert_eq!(set.len(), 1);

        let rest = set.next_ready(5).await.unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].task, TaskId(2));
        assert!(set.is_empty());
    }

    #[tokio::test]
    async fn target_larger_than_outstanding_drains_everything() {
        let mut set = InFlightSet::new();
        set.spawn(async { completion(7) });
        let ready = set.next_ready(4).await.unwrap();
        assert_eq!(ready.len(), 1);
        assert!(set.is_empty());
    }

    #[tokio::test]
    async fn worker_fault_surfaces_immediately() {
        let mut set = InFlightSet::new();
        set.spawn(async {
            Err(WorkerErr::Remote {
                worker_id: 0,
                msg: "socket closed".into(),
            })
        });
        let err = set.next_ready(1).await.unwrap_err();
        assert!(matches!(err, OptimizerErr::Worker(_)));
    }
}
