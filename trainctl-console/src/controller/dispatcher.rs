//! Command dispatcher
//!
//! Start and stop follow a two-phase protocol: apply a provisional status to
//! the view as soon as the server acknowledges the command, then ask the
//! poller for an authoritative read. The read always happens after a stop,
//! whether or not the provisional value turned out to be right.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info};
use trainctl_client::TrainingApi;
use trainctl_core::domain::control::StopControl;
use trainctl_core::domain::status::JobStatus;
use trainctl_core::dto::training::Acknowledgment;

use super::poller::PollHandle;
use super::presenter::Presenter;
use crate::form::TrainingForm;
use crate::view::StatusView;

/// How a command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The server acknowledged the command
    Completed,
    /// The request was sent and failed
    Failed,
    /// The form was incomplete or invalid; nothing was sent
    Rejected,
    /// A stop was already outstanding; nothing was sent
    Ignored,
}

/// Handles operator start/stop commands
pub struct CommandDispatcher {
    api: Arc<dyn TrainingApi>,
    presenter: Presenter,
    view: Arc<dyn StatusView>,
    poll: PollHandle,
    stopping: AtomicBool,
}

impl CommandDispatcher {
    pub fn new(
        api: Arc<dyn TrainingApi>,
        presenter: Presenter,
        view: Arc<dyn StatusView>,
        poll: PollHandle,
    ) -> Self {
        Self {
            api,
            presenter,
            view,
            poll,
            stopping: AtomicBool::new(false),
        }
    }

    /// Starts a training run configured by `form`
    ///
    /// A failed start leaves the view as it was and does not resync.
    pub async fn start(&self, form: &TrainingForm) -> CommandOutcome {
        let req = match form.to_request() {
            Ok(req) => req,
            Err(e) => {
                error!("Cannot start training: {}", e);
                return CommandOutcome::Rejected;
            }
        };

        info!(
            "Starting training (environment: {}, default hyperparameters: {})",
            req.environment,
            req.uses_default_hyperparameters()
        );

        match self.api.start_training(&req).await {
            Ok(ack) => {
                info!(
                    "Training started: {}{}",
                    ack.status().unwrap_or("acknowledged"),
                    ack_detail(&ack)
                );
                self.presenter.present(JobStatus::RUNNING);
                self.poll.request_sync();
                CommandOutcome::Completed
            }
            Err(e) if e.is_client_error() => {
                error!("Server rejected training start: {}", e);
                CommandOutcome::Failed
            }
            Err(e) => {
                error!("Error starting training: {}", e);
                CommandOutcome::Failed
            }
        }
    }

    /// Stops the running training job
    ///
    /// The stop control shows `Stopping` until the request settles; a second
    /// stop in that window is ignored. The control is restored and a resync
    /// requested on every exit path, including cancellation.
    pub async fn stop(&self) -> CommandOutcome {
        if self.stopping.swap(true, Ordering::SeqCst) {
            debug!("Stop already in progress, ignoring");
            return CommandOutcome::Ignored;
        }

        self.view.show_stop_control(StopControl::Stopping);
        let _settle = StopSettle { dispatcher: self };

        match self.api.stop_training().await {
            Ok(ack) => {
                if ack.was_not_running() {
                    info!("No training job was running{}", ack_detail(&ack));
                } else {
                    info!(
                        "Training stopped: {}{}",
                        ack.status().unwrap_or("acknowledged"),
                        ack_detail(&ack)
                    );
                }
                self.presenter.present(JobStatus::IDLE);
                CommandOutcome::Completed
            }
            Err(e) => {
                error!("Error stopping training: {}", e);
                CommandOutcome::Failed
            }
        }
    }

    pub fn is_stopping(&self) -> bool {
        self.stopping.load(Ordering::SeqCst)
    }
}

/// Server-provided message appended to a log line, if any
fn ack_detail(ack: &Acknowledgment) -> String {
    ack.message().map(|m| format!(" ({})", m)).unwrap_or_default()
}

/// Restores the stop control and resyncs when a stop settles
struct StopSettle<'a> {
    dispatcher: &'a CommandDispatcher,
}

impl Drop for StopSettle<'_> {
    fn drop(&mut self) {
        let dispatcher = self.dispatcher;
        dispatcher.view.show_stop_control(StopControl::Ready);
        dispatcher.stopping.store(false, Ordering::SeqCst);
        dispatcher.poll.request_sync();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::testing::{FakeApi, RecordingView};
    use crate::controller::{Controller, PollIntervals, PollOutcome, PollPhase};
    use crate::form::TrainingArgs;
    use std::time::Duration;
    use tokio::time;
    use trainctl_core::domain::control::ControlState;

    fn controller(api: Arc<FakeApi>, view: Arc<RecordingView>) -> Controller {
        Controller::new(api, view, PollIntervals::default(), Duration::from_secs(10))
    }

    fn cartpole() -> TrainingForm {
        TrainingForm::from_args(&TrainingArgs {
            environment: Some("cartpole".to_string()),
            ..TrainingArgs::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_start_without_environment_sends_nothing() {
        let api = Arc::new(FakeApi::new());
        let view = Arc::new(RecordingView::default());
        let Controller { dispatcher, .. } = controller(api.clone(), view.clone());

        let outcome = dispatcher.start(&TrainingForm::default()).await;

        assert_eq!(outcome, CommandOutcome::Rejected);
        assert!(api.start_calls().is_empty());
        assert!(view.presented().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_applies_optimistic_status_then_resyncs() {
        let api = Arc::new(FakeApi::new());
        let view = Arc::new(RecordingView::default());
        let Controller { poller, dispatcher } = controller(api.clone(), view.clone());
        let handle = poller.handle();

        let task = tokio::spawn(async move { poller.run().await });
        time::sleep(Duration::from_secs(1)).await;
        assert_eq!(handle.phase(), PollPhase::ScheduledWait(Duration::from_secs(5)));
        assert_eq!(api.status_calls().len(), 1);

        assert_eq!(dispatcher.start(&cartpole()).await, CommandOutcome::Completed);
        let running = ControlState::from_status(JobStatus::RUNNING);
        assert_eq!(view.state().controls, Some(running));

        time::sleep(Duration::from_millis(10)).await;
        task.abort();

        // forced poll confirms the optimistic value: no visible change
        assert_eq!(api.status_calls().len(), 2);
        let presented = view.presented();
        assert_eq!(presented[presented.len() - 2..], [running, running]);
        assert_eq!(api.start_calls()[0].environment, "cartpole");
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_start_changes_nothing() {
        let api = Arc::new(FakeApi::new());
        api.fail_start();
        let view = Arc::new(RecordingView::default());
        let Controller { poller, dispatcher } = controller(api.clone(), view.clone());

        assert_eq!(poller.poll_once().await, PollOutcome::Presented(JobStatus::IDLE));
        let before = view.state();

        let task = tokio::spawn(async move { poller.run().await });
        time::sleep(Duration::from_secs(1)).await;
        let calls_before = api.status_calls().len();

        assert_eq!(dispatcher.start(&cartpole()).await, CommandOutcome::Failed);
        time::sleep(Duration::from_millis(10)).await;
        task.abort();

        assert_eq!(view.state(), before);
        assert_eq!(api.status_calls().len(), calls_before);
    }

    #[tokio::test]
    async fn test_stop_success() {
        let api = Arc::new(FakeApi::new());
        api.set_running(true);
        let view = Arc::new(RecordingView::default());
        let Controller { poller, dispatcher } = controller(api.clone(), view.clone());
        poller.poll_once().await;
        assert!(view.state().stop_enabled());

        assert_eq!(dispatcher.stop().await, CommandOutcome::Completed);

        let state = view.state();
        assert_eq!(state.controls, Some(ControlState::from_status(JobStatus::IDLE)));
        assert_eq!(state.stop_control, StopControl::Ready);
        assert_eq!(
            view.stop_controls(),
            vec![StopControl::Stopping, StopControl::Ready]
        );
        assert!(!dispatcher.is_stopping());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_success_resyncs() {
        let api = Arc::new(FakeApi::new());
        api.set_running(true);
        let view = Arc::new(RecordingView::default());
        let Controller { poller, dispatcher } = controller(api.clone(), view.clone());
        let handle = poller.handle();

        let task = tokio::spawn(async move { poller.run().await });
        time::sleep(Duration::from_millis(100)).await;
        assert_eq!(handle.phase(), PollPhase::ScheduledWait(Duration::from_secs(1)));
        let calls_before = api.status_calls().len();

        assert_eq!(dispatcher.stop().await, CommandOutcome::Completed);
        time::sleep(Duration::from_millis(10)).await;
        task.abort();

        assert_eq!(api.status_calls().len(), calls_before + 1);
        let state = view.state();
        assert_eq!(state.stop_control, StopControl::Ready);
        assert!(state.start_enabled());
        assert!(!state.stop_enabled());
    }

    #[test]
    fn test_ack_detail() {
        let ack = Acknowledgment(serde_json::json!({"status": "error", "message": "busy"}));
        assert_eq!(ack_detail(&ack), " (busy)");
        let ack = Acknowledgment(serde_json::json!({"status": "started"}));
        assert_eq!(ack_detail(&ack), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_failure_restores_control_and_resyncs() {
        let api = Arc::new(FakeApi::new());
        api.set_running(true);
        api.fail_stop();
        let view = Arc::new(RecordingView::default());
        let Controller { poller, dispatcher } = controller(api.clone(), view.clone());
        let handle = poller.handle();

        let task = tokio::spawn(async move { poller.run().await });
        time::sleep(Duration::from_millis(100)).await;
        assert_eq!(handle.phase(), PollPhase::ScheduledWait(Duration::from_secs(1)));
        let calls_before = api.status_calls().len();

        assert_eq!(dispatcher.stop().await, CommandOutcome::Failed);
        time::sleep(Duration::from_millis(10)).await;
        task.abort();

        let state = view.state();
        assert_eq!(state.stop_control, StopControl::Ready);
        assert!(state.stop_enabled());
        assert_eq!(api.status_calls().len(), calls_before + 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_stop_is_ignored_while_outstanding() {
        let api = Arc::new(FakeApi::with_latency(Duration::from_secs(2)));
        api.set_running(true);
        let view = Arc::new(RecordingView::default());
        let Controller { dispatcher, .. } = controller(api.clone(), view.clone());
        let dispatcher = Arc::new(dispatcher);

        let first = tokio::spawn({
            let dispatcher = Arc::clone(&dispatcher);
            async move { dispatcher.stop().await }
        });
        time::sleep(Duration::from_millis(500)).await;

        assert!(dispatcher.is_stopping());
        assert_eq!(view.state().stop_control, StopControl::Stopping);
        assert_eq!(dispatcher.stop().await, CommandOutcome::Ignored);

        assert_eq!(first.await.unwrap(), CommandOutcome::Completed);
        assert_eq!(api.stop_calls(), 1);
        assert_eq!(view.state().stop_control, StopControl::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_stop_still_settles() {
        let api = Arc::new(FakeApi::with_latency(Duration::from_secs(30)));
        let view = Arc::new(RecordingView::default());
        let Controller { dispatcher, .. } = controller(api.clone(), view.clone());

        let result = time::timeout(Duration::from_secs(1), dispatcher.stop()).await;

        assert!(result.is_err());
        assert_eq!(view.state().stop_control, StopControl::Ready);
        assert!(!dispatcher.is_stopping());
    }
}
