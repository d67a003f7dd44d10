use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Owns every deferred task started on behalf of a session.
///
/// Tasks run on the tokio runtime; `cancel_all` aborts whatever has not
/// finished yet. Clones share the same set.
#[derive(Clone, Default)]
pub struct TaskRegistry {
    handles: Arc<Mutex<Vec<(&'static str, JoinHandle<()>)>>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `task` after `delay`.
    ///
    /// # Arguments
    ///
    /// * `label` - A name for logs.
    /// * `delay` - How long to wait before running the task.
    /// * `task` - The work to run.
    pub fn schedule<F>(&self, label: &'static str, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::debug!("⏱️ Scheduling '{}' in {:?}", label, delay);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
            tracing::debug!("✅ Scheduled task '{}' completed", label);
        });
        self.track(label, handle);
    }

    /// Runs `task` in the background until it finishes or is cancelled.
    pub fn spawn<F>(&self, label: &'static str, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::debug!("🚀 Spawning '{}'", label);
        let handle = tokio::spawn(task);
        self.track(label, handle);
    }

    /// Aborts every unfinished task.
    ///
    /// # Returns
    ///
    /// The number of tasks that were still running.
    pub fn cancel_all(&self) -> usize {
        let drained: Vec<_> = {
            let mut handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
            handles.drain(..).collect()
        };

        let mut cancelled = 0;
        for (label, handle) in drained {
            if !handle.is_finished() {
                handle.abort();
                cancelled += 1;
                tracing::debug!("🛑 Cancelled '{}'", label);
            }
        }
        if cancelled > 0 {
            tracing::info!("🛑 Cancelled {} pending task(s)", cancelled);
        }
        cancelled
    }

    /// Returns the number of tasks that have not finished.
    pub fn pending(&self) -> usize {
        let mut handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
        handles.retain(|(_, handle)| !handle.is_finished());
        handles.len()
    }

    fn track(&self, label: &'static str, handle: JoinHandle<()>) {
        let mut handles = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
        handles.retain(|(_, handle)| !handle.is_finished());
        handles.push((label, handle));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn scheduled_task_runs_after_delay() {
        let registry = TaskRegistry::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = hits.clone();
        registry.schedule("tick", Duration::from_millis(500), async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(registry.pending(), 1);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(registry.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_task_never_runs() {
        let registry = TaskRegistry::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = hits.clone();
        registry.schedule("tick", Duration::from_millis(500), async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(registry.cancel_all(), 1);
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert_eq!(registry.pending(), 0);
    }
}
