use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use whatsblaster::{
    application::{
        handlers::attempt_executor::AttemptExecutor,
        services::{
            gateway::{GatewayError, GatewayReceipt, MessageGateway, OutboundMessage},
            progress::ChannelProgressSink,
            run_registry::ActiveRuns,
        },
        usecases::dispatch_messages::{DispatchMessagesRequest, DispatchMessagesUseCase},
    },
    domain::{
        errors::DomainError,
        models::{DispatchVerdict, OperatorSession, ProgressEvent, RunState, SendRequestDraft},
        validation::RequestField,
    },
    infrastructure::gateways::{SimulatedGateway, SimulatedGatewayConfig},
};

/// Gateway that is unreachable for every attempt.
struct DownGateway {
    calls: AtomicU32,
}

#[async_trait]
impl MessageGateway for DownGateway {
    fn name(&self) -> &'static str {
        "down"
    }

    async fn send(&self, _message: &OutboundMessage) -> Result<GatewayReceipt, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(GatewayError::Network("connection refused".to_string()))
    }
}

fn ignore(_: ProgressEvent) {}

fn session() -> OperatorSession {
    OperatorSession {
        operator: "admin".to_string(),
        issued_at: Utc::now(),
        expires_at: Utc::now() + chrono::Duration::hours(1),
    }
}

fn draft(counter: i64) -> SendRequestDraft {
    SendRequestDraft {
        recipient: Some("+49 151 2345 6789".to_string()),
        country: Some("DE".to_string()),
        message: Some("Guten Tag".to_string()),
        repeat_count: Some(counter),
        delay_ms: Some(250),
    }
}

fn usecase(gateway: Arc<dyn MessageGateway>) -> DispatchMessagesUseCase {
    DispatchMessagesUseCase::new(
        AttemptExecutor::new(gateway, Duration::from_secs(30)),
        Arc::new(ActiveRuns::new()),
    )
}

#[tokio::test(start_paused = true)]
async fn mock_mode_run_reports_total_success() {
    let gateway = SimulatedGateway::new(SimulatedGatewayConfig {
        failure_rate: 0.0,
        latency: Duration::from_millis(50),
    });
    let usecase = usecase(gateway);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let sink = ChannelProgressSink::new(tx);

    let report = usecase
        .execute(
            DispatchMessagesRequest {
                session: session(),
                request: draft(10).validate().unwrap(),
                cancel: CancellationToken::new(),
            },
            &sink,
        )
        .await
        .unwrap();
    drop(sink);

    assert_eq!(report.state, RunState::Completed);
    assert_eq!(report.summary.verdict(), DispatchVerdict::TotalSuccess);
    assert_eq!(report.summary.success_rate, 100.0);
    assert_eq!(
        report.results().iter().map(|r| r.attempt).collect::<Vec<_>>(),
        (1..=10).collect::<Vec<_>>()
    );
    assert!(report.results().iter().all(|r| r.message_id.starts_with("mock-")));

    let mut seen = 0;
    while let Some(event) = rx.recv().await {
        seen += 1;
        assert_eq!(event.current, seen);
        assert_eq!(event.total, 10);
    }
    assert_eq!(seen, 10);
}

#[tokio::test(start_paused = true)]
async fn unreachable_gateway_is_total_failure_not_an_error() {
    let gateway = Arc::new(DownGateway {
        calls: AtomicU32::new(0),
    });
    let usecase = usecase(gateway.clone());

    let report = usecase
        .execute(
            DispatchMessagesRequest {
                session: session(),
                request: draft(4).validate().unwrap(),
                cancel: CancellationToken::new(),
            },
            &ignore,
        )
        .await
        .unwrap();

    assert_eq!(gateway.calls.load(Ordering::SeqCst), 4);
    assert_eq!(report.summary.verdict(), DispatchVerdict::TotalFailure);
    assert_eq!(report.summary.successful, 0);
    assert_eq!(report.errors().len(), 4);
    assert!(
        report
            .errors()
            .iter()
            .all(|e| e.error.starts_with("Network error"))
    );
}

#[test]
fn invalid_request_reports_every_violated_field() {
    let errors = SendRequestDraft {
        message: Some("x".repeat(1001)),
        ..draft(101)
    }
    .validate()
    .unwrap_err();

    assert_eq!(
        errors.fields(),
        vec![RequestField::Message, RequestField::Repeat]
    );
}

#[tokio::test(start_paused = true)]
async fn cancelled_run_releases_recipient_for_next_submission() {
    let gateway = Arc::new(DownGateway {
        calls: AtomicU32::new(0),
    });
    let usecase = Arc::new(usecase(gateway));

    let running = {
        let usecase = usecase.clone();
        tokio::spawn(async move {
            usecase
                .execute(
                    DispatchMessagesRequest {
                        session: session(),
                        request: draft(50).validate().unwrap(),
                        cancel: CancellationToken::new(),
                    },
                    &ignore,
                )
                .await
        })
    };
    tokio::time::sleep(Duration::from_millis(600)).await;

    let duplicate = usecase
        .execute(
            DispatchMessagesRequest {
                session: session(),
                request: draft(1).validate().unwrap(),
                cancel: CancellationToken::new(),
            },
            &ignore,
        )
        .await;
    assert!(matches!(duplicate, Err(DomainError::Conflict(_))));

    assert!(usecase.cancel(&session(), "+4915123456789").is_some());
    let report = running.await.unwrap().unwrap();

    assert_eq!(report.state, RunState::Cancelled);
    assert_eq!(report.summary.total_attempts, 3);
    assert!(usecase.runs().is_empty());
}
