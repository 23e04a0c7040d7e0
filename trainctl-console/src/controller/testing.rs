//! Test doubles for the controller: a scripted training API and a view
//! that records everything pushed into it.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::Instant;
use trainctl_client::{ClientError, Result, TrainingApi};
use trainctl_core::domain::control::{ControlState, StopControl};
use trainctl_core::domain::status::JobStatus;
use trainctl_core::domain::video::VideoRecord;
use trainctl_core::dto::training::{Acknowledgment, StartTraining};

use crate::view::{StatusView, ViewState};

/// In-memory training server
///
/// Status responses are taken from a script first; once it runs out, the
/// current simulated state is returned. Successful start/stop commands
/// update the simulated state.
#[derive(Default)]
pub struct FakeApi {
    script: Mutex<VecDeque<Result<JobStatus>>>,
    running: AtomicBool,
    latency: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    status_calls: Mutex<Vec<Instant>>,
    start_calls: Mutex<Vec<StartTraining>>,
    stop_calls: AtomicUsize,
    fail_start: AtomicBool,
    fail_stop: AtomicBool,
    videos: Mutex<Option<Vec<VideoRecord>>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request takes `latency` to answer
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    pub fn push_status(&self, status: Result<JobStatus>) {
        self.script.lock().unwrap().push_back(status);
    }

    pub fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::SeqCst);
    }

    pub fn fail_start(&self) {
        self.fail_start.store(true, Ordering::SeqCst);
    }

    pub fn fail_stop(&self) {
        self.fail_stop.store(true, Ordering::SeqCst);
    }

    pub fn set_videos(&self, videos: Option<Vec<VideoRecord>>) {
        *self.videos.lock().unwrap() = videos;
    }

    /// Instants at which status requests were issued
    pub fn status_calls(&self) -> Vec<Instant> {
        self.status_calls.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn start_calls(&self) -> Vec<StartTraining> {
        self.start_calls.lock().unwrap().clone()
    }

    pub fn stop_calls(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }

    async fn respond(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl TrainingApi for FakeApi {
    async fn training_status(&self) -> Result<JobStatus> {
        self.status_calls.lock().unwrap().push(Instant::now());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        self.respond().await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        let scripted = self.script.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| Ok(JobStatus::new(self.running.load(Ordering::SeqCst))))
    }

    async fn start_training(&self, req: &StartTraining) -> Result<Acknowledgment> {
        self.start_calls.lock().unwrap().push(req.clone());
        self.respond().await;

        if self.fail_start.load(Ordering::SeqCst) {
            return Err(ClientError::api_error(400, "Invalid environment"));
        }
        self.set_running(true);
        Ok(Acknowledgment(serde_json::json!({ "status": "started" })))
    }

    async fn stop_training(&self) -> Result<Acknowledgment> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        self.respond().await;

        if self.fail_stop.load(Ordering::SeqCst) {
            return Err(ClientError::Timeout(self.latency));
        }
        let was_running = self.running.swap(false, Ordering::SeqCst);
        let status = if was_running { "stopped" } else { "not_running" };
        Ok(Acknowledgment(serde_json::json!({ "status": status })))
    }

    async fn list_videos(&self) -> Result<Vec<VideoRecord>> {
        self.respond().await;
        self.videos
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ClientError::api_error(500, "videos unavailable"))
    }
}

/// View that keeps its current state plus a history of every push
#[derive(Default)]
pub struct RecordingView {
    state: Mutex<ViewState>,
    presented: Mutex<Vec<ControlState>>,
    stop_controls: Mutex<Vec<StopControl>>,
}

impl RecordingView {
    pub fn state(&self) -> ViewState {
        *self.state.lock().unwrap()
    }

    pub fn presented(&self) -> Vec<ControlState> {
        self.presented.lock().unwrap().clone()
    }

    pub fn stop_controls(&self) -> Vec<StopControl> {
        self.stop_controls.lock().unwrap().clone()
    }
}

impl StatusView for RecordingView {
    fn show_controls(&self, controls: ControlState) {
        self.state.lock().unwrap().controls = Some(controls);
        self.presented.lock().unwrap().push(controls);
    }

    fn show_stop_control(&self, stop: StopControl) {
        self.state.lock().unwrap().stop_control = stop;
        self.stop_controls.lock().unwrap().push(stop);
    }
}
