//! Background fetching for interactive front ends.
//!
//! The worker runs lookups on the tokio runtime and hands results back over a channel,
//! so the thread that reads input never waits on the network. It never touches
//! [`PresentationState`](crate::presentation::PresentationState); the receiver applies results.

use anyhow::{Result, anyhow};
use std::sync::Arc;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{error::FetchError, model::WeatherReading, provider::WeatherProvider};

const CHANNEL_CAPACITY: usize = 8;

/// Result of one submitted lookup, tagged with the city as it was submitted.
#[derive(Debug)]
pub struct FetchCompleted {
    pub city: String,
    pub result: Result<WeatherReading, FetchError>,
}

#[derive(Debug)]
pub struct FetchWorker {
    requests: mpsc::Sender<String>,
    completions: mpsc::Receiver<FetchCompleted>,
    task: JoinHandle<()>,
}

impl FetchWorker {
    /// Start serving requests. Lookups run one at a time, in submission order.
    pub fn spawn(provider: Arc<dyn WeatherProvider>) -> Self {
        let (requests, mut incoming) = mpsc::channel::<String>(CHANNEL_CAPACITY);
        let (done, completions) = mpsc::channel(CHANNEL_CAPACITY);

        let task = tokio::spawn(async move {
            while let Some(city) = incoming.recv().await {
                let result = provider.fetch(&city).await;
                if let Err(err) = &result {
                    tracing::debug!(%city, error = %err, "Lookup failed");
                }

                if done.send(FetchCompleted { city, result }).await.is_err() {
                    tracing::debug!("Result receiver dropped, stopping fetch worker");
                    break;
                }
            }
        });

        Self { requests, completions, task }
    }

    pub async fn submit(&self, city: impl Into<String>) -> Result<()> {
        self.requests
            .send(city.into())
            .await
            .map_err(|_| anyhow!("Fetch worker has stopped"))
    }

    /// Wait for the next finished lookup. `None` once the worker has stopped.
    pub async fn next_completed(&mut self) -> Option<FetchCompleted> {
        self.completions.recv().await
    }

    /// Stop accepting requests and wait for in-flight lookups to finish.
    pub async fn shutdown(self) -> Result<()> {
        let Self { requests, completions, task } = self;
        drop(requests);
        drop(completions);
        task.await.map_err(|e| anyhow!("Fetch worker panicked: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::PresentationState;
    use crate::provider::testing::ScriptedProvider;
    use chrono::Local;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn delivers_results_in_submission_order() {
        let provider = Arc::new(ScriptedProvider::default());
        let mut worker = FetchWorker::spawn(provider.clone());

        worker.submit("Paris").await.expect("submit");
        worker.submit("Atlantis").await.expect("submit");
        worker.submit("  ").await.expect("submit");

        let first = worker.next_completed().await.expect("first result");
        assert_eq!(first.city, "Paris");
        assert!(first.result.is_ok());

        let second = worker.next_completed().await.expect("second result");
        assert!(matches!(second.result, Err(FetchError::ProviderError(404))));

        let third = worker.next_completed().await.expect("third result");
        assert!(matches!(third.result, Err(FetchError::InvalidInput)));

        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
        let seen = provider.seen.lock().expect("lock").clone();
        assert_eq!(seen, ["Paris", "Atlantis"]);

        worker.shutdown().await.expect("clean shutdown");
    }

    #[tokio::test]
    async fn receiver_applies_completions_to_state() {
        let provider = Arc::new(ScriptedProvider::default());
        let mut worker = FetchWorker::spawn(provider);
        let mut state = PresentationState::new("https://icons.test");

        for city in ["Paris", "Atlantis", "Tokyo"] {
            assert!(state.begin_fetch());
            worker.submit(city).await.expect("submit");
            let done = worker.next_completed().await.expect("result");
            let _ = state.complete(&done.city, done.result, Local::now());
        }

        let cities: Vec<&str> = state.history().map(|e| e.city.as_str()).collect();
        assert_eq!(cities, ["Tokyo", "Paris"]);

        worker.shutdown().await.expect("clean shutdown");
    }
}
