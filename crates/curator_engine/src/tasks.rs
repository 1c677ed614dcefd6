use std::future::Future;

use futures_util::future::{join_all, BoxFuture, FutureExt};

/// Fan-out/fan-in over independent futures polled on the caller's task.
///
/// Every task runs to completion; results come back in push order regardless
/// of completion order. There is no cancellation: dropping the group before
/// `join` simply never polls the tasks, dropping `join` mid-flight drops them
/// wherever they are.
pub(crate) struct TaskGroup<'a, T> {
    tasks: Vec<BoxFuture<'a, T>>,
}

impl<'a, T> TaskGroup<'a, T> {
    pub(crate) fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub(crate) fn push<F>(&mut self, task: F)
    where
        F: Future<Output = T> + Send + 'a,
    {
        self.tasks.push(task.boxed());
    }

    pub(crate) fn len(&self) -> usize {
        self.tasks.len()
    }

    pub(crate) async fn join(self) -> Vec<T> {
        join_all(self.tasks).await
    }
}
