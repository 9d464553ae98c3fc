//! Reporter engine: HTTP client for the external report-job runner.
mod client;
mod types;

pub use client::{HttpJobRunner, JobRunner, RunnerSettings};
pub use types::PollError;
