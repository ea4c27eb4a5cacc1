use poem::web::sse::Event;
use poem_openapi::types::ToJSON;

use crate::{
    domain::{
        models::{Country, DispatchReport, ProgressEvent, SendRequestDraft},
        validation::ValidationErrors,
    },
    presentation::{
        http::{
            requests::SendMessagesRequestDto,
            responses::{
                CountryDto, DispatchStreamEventDto, DispatchSummaryDto, FailedAttemptDto,
                ProgressDto, SendMessagesResponseDto, SuccessfulAttemptDto, ValidationErrorDto,
            },
        },
        models::StreamEventKind,
    },
};

pub fn map_draft(request: &SendMessagesRequestDto) -> SendRequestDraft {
    SendRequestDraft {
        recipient: request.phone_number.clone(),
        country: request.country.clone(),
        message: request.message.clone(),
        repeat_count: request.counter,
        delay_ms: request.delay,
    }
}

pub fn map_country(country: &Country) -> CountryDto {
    CountryDto {
        code: country.code.clone(),
        name: country.name.clone(),
        dial_code: country.dial_code.clone(),
    }
}

pub fn map_validation_errors(errors: &ValidationErrors) -> ValidationErrorDto {
    ValidationErrorDto {
        success: false,
        error: "Validation failed".to_string(),
        fields: errors
            .iter()
            .map(|(field, reason)| (field.as_str().to_string(), reason.to_string()))
            .collect(),
    }
}

pub fn map_report(report: &DispatchReport) -> SendMessagesResponseDto {
    let summary = &report.summary;
    SendMessagesResponseDto {
        success: true,
        run_id: report.run_id,
        state: report.state.into(),
        planned_attempts: report.planned_attempts,
        estimated_seconds: (report.estimated_duration.as_secs_f64() * 10.0).round() / 10.0,
        summary: DispatchSummaryDto {
            total_attempts: summary.total_attempts,
            successful: summary.successful,
            failed: summary.failed,
            success_rate: summary.success_rate,
            verdict: summary.verdict().into(),
        },
        results: report
            .results()
            .iter()
            .map(|r| SuccessfulAttemptDto {
                attempt: r.attempt,
                message_id: r.message_id.clone(),
                timestamp: r.timestamp.to_rfc3339(),
            })
            .collect(),
        errors: report
            .errors()
            .iter()
            .map(|e| FailedAttemptDto {
                attempt: e.attempt,
                error: e.error.clone(),
                timestamp: e.timestamp.to_rfc3339(),
            })
            .collect(),
    }
}

pub fn map_progress_event(event: ProgressEvent) -> DispatchStreamEventDto {
    let percentage = if event.total == 0 {
        0.0
    } else {
        (event.current as f64 / event.total as f64 * 1000.0).round() / 10.0
    };

    DispatchStreamEventDto {
        event: StreamEventKind::Progress,
        progress: Some(ProgressDto {
            current: event.current,
            total: event.total,
            percentage,
        }),
        report: None,
    }
}

pub fn map_completed_event(report: &DispatchReport) -> DispatchStreamEventDto {
    DispatchStreamEventDto {
        event: StreamEventKind::Completed,
        progress: None,
        report: Some(map_report(report)),
    }
}

/// Named SSE event so clients can subscribe to `progress` and `completed`
/// separately.
pub fn map_sse_event(dto: DispatchStreamEventDto) -> Event {
    Event::message(dto.to_json_string()).event_type(dto.event.as_str())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use uuid::Uuid;

    use super::*;
    use crate::{
        domain::models::{AttemptOutcome, DispatchSummary, RunState},
        presentation::models::{DispatchVerdictKind, RunStateKind},
    };

    #[test]
    fn report_lists_match_summary_counts() {
        let outcomes = vec![
            AttemptOutcome::success(1, "A1"),
            AttemptOutcome::failure(2, "Too many requests. Please wait before trying again."),
            AttemptOutcome::success(3, "A3"),
        ];
        let report = DispatchReport {
            run_id: Uuid::new_v4(),
            planned_attempts: 3,
            estimated_duration: Duration::from_millis(2500),
            state: RunState::Completed,
            summary: DispatchSummary::from_outcomes(&outcomes),
        };

        let dto = map_report(&report);

        assert_eq!(dto.state, RunStateKind::Completed);
        assert_eq!(dto.estimated_seconds, 2.5);
        assert_eq!(dto.summary.verdict, DispatchVerdictKind::PartialSuccess);
        assert_eq!(dto.summary.success_rate, 66.7);
        assert_eq!(dto.results.len() as u32, dto.summary.successful);
        assert_eq!(dto.errors.len() as u32, dto.summary.failed);
        assert_eq!(dto.errors[0].attempt, 2);
        assert_eq!(dto.results[1].message_id, "A3");
    }

    #[test]
    fn validation_errors_are_keyed_by_field_name() {
        let errors = SendRequestDraft {
            recipient: Some(String::new()),
            country: Some("US".to_string()),
            message: Some("hi".to_string()),
            repeat_count: Some(1),
            delay_ms: Some(1000),
        }
        .validate()
        .unwrap_err();

        let dto = map_validation_errors(&errors);

        assert!(!dto.success);
        assert_eq!(dto.fields.len(), 1);
        assert_eq!(
            dto.fields.get("recipient").map(String::as_str),
            Some("Phone number is required")
        );
    }

    #[test]
    fn progress_percentage_has_one_decimal() {
        let dto = map_progress_event(ProgressEvent { current: 1, total: 3 });

        let progress = dto.progress.unwrap();
        assert_eq!(dto.event, StreamEventKind::Progress);
        assert_eq!(progress.percentage, 33.3);
        assert!(dto.report.is_none());
    }

    #[test]
    fn sse_events_are_named_after_their_kind() {
        let progress = map_sse_event(map_progress_event(ProgressEvent { current: 2, total: 4 }));
        let report = DispatchReport {
            run_id: Uuid::new_v4(),
            planned_attempts: 1,
            estimated_duration: Duration::ZERO,
            state: RunState::Completed,
            summary: DispatchSummary::from_outcomes(&[AttemptOutcome::success(1, "A1")]),
        };
        let completed = map_sse_event(map_completed_event(&report));

        match progress {
            Event::Message { event, data, .. } => {
                assert_eq!(event, "progress");
                assert!(data.contains("\"percentage\":50"));
            }
            other => panic!("unexpected event {other:?}"),
        }
        match completed {
            Event::Message { event, data, .. } => {
                assert_eq!(event, "completed");
                assert!(data.contains(&report.run_id.to_string()));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
}
