use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::{
    application::{
        handlers::attempt_executor::AttemptExecutor,
        services::{
            progress::ProgressSink,
            run_registry::{ActiveRuns, RunGuard},
        },
    },
    domain::{
        errors::DomainError,
        models::{
            DispatchReport, DispatchSummary, OperatorSession, ProgressEvent, RunState, SendRequest,
        },
    },
};

pub struct DispatchMessagesUseCase {
    executor: AttemptExecutor,
    runs: Arc<ActiveRuns>,
}

pub struct DispatchMessagesRequest {
    pub session: OperatorSession,
    pub request: SendRequest,
    /// Observed before every send and during every inter-attempt delay.
    pub cancel: CancellationToken,
}

/// A run that holds its recipient but has not sent anything yet.
/// Dropping it releases the recipient.
pub struct PendingRun {
    guard: RunGuard,
    request: DispatchMessagesRequest,
}

impl PendingRun {
    pub fn run_id(&self) -> Uuid {
        self.guard.run_id()
    }
}

impl DispatchMessagesUseCase {
    pub fn new(executor: AttemptExecutor, runs: Arc<ActiveRuns>) -> Self {
        Self { executor, runs }
    }

    pub fn runs(&self) -> &ActiveRuns {
        &self.runs
    }

    /// Sends the message `repeat_count` times, one after another, pausing
    /// `delay` between sends. Gateway failures never stop the run.
    pub async fn execute(
        &self,
        request: DispatchMessagesRequest,
        sink: &dyn ProgressSink,
    ) -> Result<DispatchReport, DomainError> {
        let run = self.begin(request)?;
        Ok(self.drive(run, sink).await)
    }

    /// Claims the recipient for a new run without sending anything yet.
    pub fn begin(&self, request: DispatchMessagesRequest) -> Result<PendingRun, DomainError> {
        let guard = self
            .runs
            .try_acquire(request.request.recipient(), request.cancel.clone())
            .ok_or_else(|| DomainError::Conflict(request.request.recipient().to_string()))?;

        Ok(PendingRun { guard, request })
    }

    pub async fn drive(&self, run: PendingRun, sink: &dyn ProgressSink) -> DispatchReport {
        let PendingRun { guard, request } = run;
        self.run(
            guard.run_id(),
            &request.session,
            &request.request,
            sink,
            &request.cancel,
        )
        .await
    }

    pub fn cancel(&self, session: &OperatorSession, recipient: &str) -> Option<Uuid> {
        let run_id = self.runs.cancel(recipient);
        if let Some(run_id) = run_id {
            tracing::info!(%run_id, operator = %session.operator, "dispatch run cancellation requested");
        }
        run_id
    }

    #[tracing::instrument(
        skip_all,
        fields(
            run_id = %run_id,
            operator = %session.operator,
            recipient = %request.recipient(),
            attempts = request.repeat_count(),
            gateway = self.executor.gateway_name(),
        )
    )]
    async fn run(
        &self,
        run_id: Uuid,
        session: &OperatorSession,
        request: &SendRequest,
        sink: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> DispatchReport {
        let total = request.repeat_count();
        let mut outcomes = Vec::with_capacity(total as usize);
        let mut state = RunState::Idle;

        tracing::info!(
            delay_ms = request.delay().as_millis() as u64,
            estimated_secs = request.estimated_duration().as_secs(),
            "dispatch run started"
        );
        state = transition(state, RunState::Running);

        for attempt in 1..=total {
            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    state = transition(state, RunState::Cancelled);
                    break;
                }
                outcome = self.executor.execute(attempt, request) => outcome,
            };
            outcomes.push(outcome);
            sink.publish(ProgressEvent {
                current: attempt,
                total,
            });

            if attempt < total {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        state = transition(state, RunState::Cancelled);
                        break;
                    }
                    _ = tokio::time::sleep(request.delay()) => {}
                }
            }
        }

        if state == RunState::Running {
            state = transition(state, RunState::Completed);
        }

        let summary = DispatchSummary::from_outcomes(&outcomes);
        tracing::info!(
            successful = summary.successful,
            failed = summary.failed,
            success_rate = summary.success_rate,
            verdict = ?summary.verdict(),
            state = ?state,
            "dispatch run finished"
        );

        DispatchReport {
            run_id,
            planned_attempts: total,
            estimated_duration: request.estimated_duration(),
            state,
            summary,
        }
    }
}

fn transition(from: RunState, to: RunState) -> RunState {
    tracing::debug!(from = ?from, to = ?to, "run state changed");
    to
}
