use std::time::Duration;

use reporter_core::{Phase, ProgressSnapshot};
use reporter_logging::{runner_debug, runner_warn};
use url::Url;

use crate::types::PollError;

const PROGRESS_PATH: &str = "/progress";

#[derive(Debug, Clone)]
pub struct RunnerSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl RunnerSettings {
    /// Settings for a job runner at `base_url`, with default timeouts.
    pub fn new(base_url: &str) -> Result<Self, PollError> {
        let base_url =
            Url::parse(base_url).map_err(|err| PollError::InvalidUrl(err.to_string()))?;
        Ok(Self {
            base_url,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        })
    }
}

/// Client seam to the external job runner.
#[async_trait::async_trait]
pub trait JobRunner: Send + Sync {
    /// Best-effort notification that `phase` should start. The response is
    /// ignored and failures are logged, never returned.
    async fn trigger(&self, phase: Phase);

    /// Fetch one progress snapshot.
    async fn poll(&self) -> Result<ProgressSnapshot, PollError>;
}

#[derive(Debug, Clone)]
pub struct HttpJobRunner {
    client: reqwest::Client,
    settings: RunnerSettings,
}

impl HttpJobRunner {
    pub fn new(settings: RunnerSettings) -> Result<Self, PollError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| PollError::Network(err.to_string()))?;
        Ok(Self { client, settings })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}{}",
            self.settings.base_url.as_str().trim_end_matches('/'),
            path
        )
    }
}

fn trigger_path(phase: Phase) -> &'static str {
    match phase {
        Phase::Dictionaries => "/startsetup",
        Phase::Reports => "/startreports",
    }
}

#[async_trait::async_trait]
impl JobRunner for HttpJobRunner {
    async fn trigger(&self, phase: Phase) {
        let url = self.endpoint(trigger_path(phase));
        match self.client.post(&url).send().await {
            Ok(response) => {
                runner_debug!("trigger {phase:?}: status {}", response.status());
            }
            Err(err) => {
                runner_warn!("trigger {phase:?} failed: {err}");
            }
        }
    }

    async fn poll(&self) -> Result<ProgressSnapshot, PollError> {
        let url = self.endpoint(PROGRESS_PATH);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PollError::HttpStatus(status.as_u16()));
        }

        response.json::<ProgressSnapshot>().await.map_err(|err| {
            if err.is_timeout() {
                PollError::Timeout
            } else {
                PollError::InvalidBody(err.to_string())
            }
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> PollError {
    if err.is_timeout() {
        return PollError::Timeout;
    }
    PollError::Network(err.to_string())
}
