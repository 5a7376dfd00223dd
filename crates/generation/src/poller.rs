/// Job submission and completion polling
use crate::backends::{BackendConfig, VideoBackend};
use crate::error::{GenerationError, Result};
use crate::operation::{Operation, ResultHandle, VideoRequest};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// How long, and how often, to wait for a job to finish
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Wait between two status checks
    pub interval: Duration,

    /// Give up after this many status checks
    pub max_attempts: Option<u32>,

    /// Give up once this much time has passed since submission
    pub deadline: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            max_attempts: Some(90),
            deadline: None,
        }
    }
}

/// Turns a prompt into result handles for finished videos
#[async_trait::async_trait]
pub trait VideoJobs: Send + Sync {
    /// Submit a job and wait until it completes.
    ///
    /// Handles are returned in service order. Triggering `cancel` aborts the
    /// wait at the next suspension point.
    async fn submit_and_await(
        &self,
        prompt: &str,
        count: u32,
        cancel: &CancellationToken,
    ) -> Result<Vec<ResultHandle>>;
}

/// Polls a [`VideoBackend`] until a submitted job is done
pub struct JobPoller {
    backend: Arc<dyn VideoBackend>,
    model: String,
    aspect_ratio: String,
    policy: PollPolicy,
}

impl JobPoller {
    pub fn new(backend: Arc<dyn VideoBackend>, config: &BackendConfig) -> Self {
        Self {
            backend,
            model: config.video_model.clone(),
            aspect_ratio: config.aspect_ratio.clone(),
            policy: config.poll_policy(),
        }
    }

    pub fn with_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &PollPolicy {
        &self.policy
    }

    /// Next wait, or the reason polling has to stop
    fn next_wait(&self, attempts: u32, started: Instant) -> Result<Duration> {
        if let Some(max) = self.policy.max_attempts {
            if attempts >= max {
                return Err(GenerationError::PollLimitExceeded { attempts });
            }
        }

        match self.policy.deadline {
            Some(deadline) => {
                let elapsed = started.elapsed();
                if elapsed >= deadline {
                    return Err(GenerationError::DeadlineExceeded { elapsed });
                }
                Ok(self.policy.interval.min(deadline - elapsed))
            }
            None => Ok(self.policy.interval),
        }
    }
}

#[async_trait::async_trait]
impl VideoJobs for JobPoller {
    async fn submit_and_await(
        &self,
        prompt: &str,
        count: u32,
        cancel: &CancellationToken,
    ) -> Result<Vec<ResultHandle>> {
        if cancel.is_cancelled() {
            return Err(GenerationError::Cancelled);
        }

        let request = VideoRequest::new(&self.model, prompt)
            .with_count(count)
            .with_aspect_ratio(&self.aspect_ratio);
        let started = Instant::now();

        let mut operation = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(GenerationError::Cancelled),
            op = self.backend.submit_job(&request) => op?,
        };
        info!(backend = self.backend.name(), operation = %operation.name, "video job submitted");

        let mut attempts = 0u32;
        while !operation.done {
            let wait = self.next_wait(attempts, started)?;
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(GenerationError::Cancelled),
                _ = sleep(wait) => {}
            }

            attempts += 1;
            debug!(attempt = attempts, operation = %operation.name, "...Generating...");
            operation = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(GenerationError::Cancelled),
                op = self.backend.poll_job(&operation) => op?,
            };
        }

        info!(operation = %operation.name, attempts, "video job finished");
        take_results(operation)
    }
}

fn take_results(operation: Operation) -> Result<Vec<ResultHandle>> {
    if let Some(error) = operation.error {
        return Err(GenerationError::transport(format!("video job failed: {error}")));
    }

    match operation.results {
        Some(results) if !results.is_empty() => Ok(results),
        _ => Err(GenerationError::EmptyResult),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays a fixed sequence of poll responses
    struct ScriptedBackend {
        submitted: Operation,
        polls: Mutex<VecDeque<Operation>>,
        poll_count: Mutex<u32>,
        requests: Mutex<Vec<VideoRequest>>,
    }

    impl ScriptedBackend {
        fn new(submitted: Operation, polls: Vec<Operation>) -> Arc<Self> {
            Arc::new(Self {
                submitted,
                polls: Mutex::new(polls.into()),
                poll_count: Mutex::new(0),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn poll_count(&self) -> u32 {
            *self.poll_count.lock().unwrap()
        }
    }

    #[async_trait::async_trait]
    impl VideoBackend for ScriptedBackend {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn submit_job(&self, request: &VideoRequest) -> Result<Operation> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(self.submitted.clone())
        }

        async fn poll_job(&self, operation: &Operation) -> Result<Operation> {
            *self.poll_count.lock().unwrap() += 1;
            Ok(self
                .polls
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| operation.clone()))
        }
    }

    fn handles(uris: &[&str]) -> Vec<ResultHandle> {
        uris.iter().map(|u| ResultHandle::new(*u)).collect()
    }

    fn poller(backend: Arc<ScriptedBackend>) -> JobPoller {
        JobPoller::new(backend, &BackendConfig::new("k"))
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_every_interval_until_done() {
        let backend = ScriptedBackend::new(
            Operation::pending("op"),
            vec![
                Operation::pending("op"),
                Operation::pending("op"),
                Operation::completed("op", handles(&["a", "b"])),
            ],
        );
        let poller = poller(backend.clone());

        let start = Instant::now();
        let results = poller
            .submit_and_await("a cat surfing", 2, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(results, handles(&["a", "b"]));
        assert_eq!(backend.poll_count(), 3);
        assert_eq!(start.elapsed(), Duration::from_secs(30));

        let requests = backend.requests.lock().unwrap();
        assert_eq!(requests[0].prompt, "a cat surfing");
        assert_eq!(requests[0].number_of_videos, 2);
        assert_eq!(requests[0].model, "veo-2.0-generate-001");
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_done_operation_skips_polling() {
        let backend =
            ScriptedBackend::new(Operation::completed("op", handles(&["a"])), Vec::new());
        let results = poller(backend.clone())
            .submit_and_await("p", 1, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(backend.poll_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_results_fail() {
        let backend = ScriptedBackend::new(
            Operation::pending("op"),
            vec![Operation::completed("op", Vec::new())],
        );
        let err = poller(backend)
            .submit_and_await("p", 1, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::EmptyResult));
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_payload_fails() {
        let done_without_payload = Operation {
            name: "op".to_string(),
            done: true,
            ..Operation::default()
        };
        let backend = ScriptedBackend::new(done_without_payload, Vec::new());
        let err = poller(backend)
            .submit_and_await("p", 1, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::EmptyResult));
    }

    #[tokio::test(start_paused = true)]
    async fn test_service_error_is_transport() {
        let backend = ScriptedBackend::new(
            Operation::pending("op"),
            vec![Operation::failed("op", "quota exceeded")],
        );
        let err = poller(backend)
            .submit_and_await("p", 1, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Transport(msg) if msg.contains("quota exceeded")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_attempt_limit() {
        let backend = ScriptedBackend::new(Operation::pending("op"), Vec::new());
        let poller = poller(backend.clone()).with_policy(PollPolicy {
            interval: Duration::from_secs(10),
            max_attempts: Some(3),
            deadline: None,
        });

        let err = poller
            .submit_and_await("p", 1, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::PollLimitExceeded { attempts: 3 }));
        assert_eq!(backend.poll_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline() {
        let backend = ScriptedBackend::new(Operation::pending("op"), Vec::new());
        let poller = poller(backend.clone()).with_policy(PollPolicy {
            interval: Duration::from_secs(10),
            max_attempts: None,
            deadline: Some(Duration::from_secs(25)),
        });

        let start = Instant::now();
        let err = poller
            .submit_and_await("p", 1, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::DeadlineExceeded { .. }));
        assert_eq!(start.elapsed(), Duration::from_secs(25));
        assert_eq!(backend.poll_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_before_submit() {
        let backend = ScriptedBackend::new(Operation::pending("op"), Vec::new());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = poller(backend.clone())
            .submit_and_await("p", 1, &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Cancelled));
        assert!(backend.requests.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_interrupts_wait() {
        let backend = ScriptedBackend::new(Operation::pending("op"), Vec::new());
        let poller = poller(backend.clone()).with_policy(PollPolicy {
            interval: Duration::from_secs(10),
            max_attempts: None,
            deadline: None,
        });
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            sleep(Duration::from_secs(15)).await;
            trigger.cancel();
        });

        let start = Instant::now();
        let err = poller.submit_and_await("p", 1, &cancel).await.unwrap_err();
        assert!(matches!(err, GenerationError::Cancelled));
        assert_eq!(start.elapsed(), Duration::from_secs(15));
        assert_eq!(backend.poll_count(), 1);
    }
}
