//! Background job execution
//!
//! A submitted job runs on tokio's blocking pool. The caller keeps a
//! [`JobHandle`] that yields progress events in emission order, followed by
//! exactly one `Finished` event carrying the terminal result.

use crate::cancel::CancellationFlag;
use crate::engine::{DigestEngine, HashJob, JobResult};
use crate::error::{Error, InternalError};
use crate::progress::{ProgressProvider, ProgressUpdate};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Event delivered from a running job to its submitter
#[derive(Debug)]
pub enum JobEvent {
    Progress(ProgressUpdate),
    /// Always the last event of a job
    Finished(JobResult),
}

/// Starts hashing jobs off the caller's thread
#[derive(Debug, Clone, Default)]
pub struct JobRunner {
    engine: Arc<DigestEngine>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_engine(engine: DigestEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Start a job in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&self, job: HashJob) -> JobHandle {
        let (tx, events) = mpsc::unbounded_channel();
        let cancel = CancellationFlag::new();
        let engine = Arc::clone(&self.engine);
        let worker_cancel = cancel.clone();

        log::debug!(
            "Submitting {} job for {}",
            job.algorithm,
            job.path.display()
        );

        let worker = tokio::task::spawn_blocking(move || {
            let provider = EventProvider::new(tx);
            let result = engine.run(&job, &worker_cancel, &provider);
            provider.finish(result);
        });

        JobHandle {
            cancel,
            events,
            worker: Some(worker),
            finished: false,
        }
    }
}

/// Caller-side handle to one running job
pub struct JobHandle {
    cancel: CancellationFlag,
    events: mpsc::UnboundedReceiver<JobEvent>,
    worker: Option<JoinHandle<()>>,
    finished: bool,
}

impl JobHandle {
    /// Request cancellation. Has no effect once the job has finished.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// A clone of the job's cancellation flag, e.g. for a signal handler
    pub fn cancellation(&self) -> CancellationFlag {
        self.cancel.clone()
    }

    /// Next event from the job, or `None` after `Finished` was delivered.
    ///
    /// If the worker dies without reporting, a `WorkerFailed` error is
    /// delivered as the terminal event instead.
    pub async fn next_event(&mut self) -> Option<JobEvent> {
        if self.finished {
            return None;
        }

        match self.events.recv().await {
            Some(event) => {
                if matches!(event, JobEvent::Finished(_)) {
                    self.finished = true;
                }
                Some(event)
            }
            None => {
                self.finished = true;
                let message = match self.worker.take() {
                    Some(worker) => match worker.await {
                        Err(join_err) => join_err.to_string(),
                        Ok(()) => "worker exited without a result".to_string(),
                    },
                    None => "worker exited without a result".to_string(),
                };
                log::error!("Hashing worker ended abnormally: {message}");
                Some(JobEvent::Finished(Err(Error::Internal(
                    InternalError::worker_failed(message),
                ))))
            }
        }
    }

    /// Discard progress and wait for the terminal result
    pub async fn wait(mut self) -> JobResult {
        while let Some(event) = self.next_event().await {
            if let JobEvent::Finished(result) = event {
                return result;
            }
        }

        Err(Error::Internal(InternalError::worker_failed(
            "result already consumed",
        )))
    }
}

/// Forwards engine updates into the job's event channel
struct EventProvider {
    tx: Mutex<Option<mpsc::UnboundedSender<JobEvent>>>,
}

impl EventProvider {
    fn new(tx: mpsc::UnboundedSender<JobEvent>) -> Self {
        Self {
            tx: Mutex::new(Some(tx)),
        }
    }

    fn send(&self, event: JobEvent) {
        let guard = self.tx.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(tx) = guard.as_ref() {
            // Receiver gone means nobody is listening any more
            let _ = tx.send(event);
        }
    }

    fn finish(&self, result: JobResult) {
        self.send(JobEvent::Finished(result));
        self.complete();
    }
}

impl ProgressProvider for EventProvider {
    fn report(&self, update: ProgressUpdate) {
        self.send(JobEvent::Progress(update));
    }

    fn complete(&self) {
        let mut guard = self.tx.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Outcome;
    use crate::hashing::HashAlgorithm;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_finished_is_last_and_unique() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("abc.txt");
        std::fs::write(&path, b"abc").unwrap();

        let mut handle = JobRunner::new().submit(HashJob::new(
            "900150983cd24fb0d6963f7d28e17f72",
            &path,
            HashAlgorithm::MD5,
        ));

        let mut finished = 0;
        let mut after_finished = 0;
        while let Some(event) = handle.next_event().await {
            match event {
                JobEvent::Finished(result) => {
                    finished += 1;
                    assert_eq!(result.unwrap().outcome, Outcome::Match);
                }
                JobEvent::Progress(_) if finished > 0 => after_finished += 1,
                JobEvent::Progress(_) => {}
            }
        }

        assert_eq!(finished, 1);
        assert_eq!(after_finished, 0);
        assert!(handle.next_event().await.is_none());
    }

    #[tokio::test]
    async fn test_wait_returns_error() {
        let dir = TempDir::new().unwrap();
        let handle = JobRunner::new().submit(HashJob::new(
            "",
            dir.path().join("missing"),
            HashAlgorithm::SHA1,
        ));

        let err = handle.wait().await.unwrap_err();
        assert!(err.is_io());
    }
}
