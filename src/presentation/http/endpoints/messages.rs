use std::sync::Arc;

use poem::{Result as PoemResult, http::StatusCode};
use poem_openapi::{
    OpenApi,
    payload::{EventStream, Json},
};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_util::sync::CancellationToken;

use crate::{
    application::{
        services::progress::LoggingProgressSink,
        usecases::dispatch_messages::{DispatchMessagesRequest, PendingRun},
    },
    domain::{errors::DomainError, models::ProgressEvent},
    presentation::http::{
        endpoints::root::{ApiState, EndpointsTags},
        mappers::{
            map_completed_event, map_draft, map_progress_event, map_report, map_sse_event,
            map_validation_errors,
        },
        requests::{CancelDispatchRequestDto, SendMessagesRequestDto},
        responses::{
            CancelDispatchResponseDto, ErrorDto, SendMessagesResponse, SendMessagesStreamResponse,
            ValidationErrorDto,
        },
        security::JwtAuth,
    },
};

#[derive(Clone)]
pub struct MessagesEndpoints {
    state: Arc<ApiState>,
}

impl MessagesEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }

    fn prepare(
        &self,
        auth: JwtAuth,
        request: &SendMessagesRequestDto,
    ) -> PoemResult<Result<PendingRun, Rejection>> {
        let session = auth.into_session(&self.state.jwt)?;

        let request = match map_draft(request).validate() {
            Ok(request) => request,
            Err(errors) => return Ok(Err(Rejection::Invalid(map_validation_errors(&errors)))),
        };

        let run = self.state.dispatch_usecase.begin(DispatchMessagesRequest {
            session,
            request,
            cancel: CancellationToken::new(),
        });

        match run {
            Ok(run) => Ok(Ok(run)),
            Err(DomainError::Conflict(recipient)) => Ok(Err(Rejection::Conflict(ErrorDto {
                success: false,
                error: format!("A dispatch to {recipient} is already running"),
            }))),
            Err(err) => Err(internal_error(err)),
        }
    }
}

enum Rejection {
    Invalid(ValidationErrorDto),
    Conflict(ErrorDto),
}

#[OpenApi]
impl MessagesEndpoints {
    /// Runs the whole dispatch and answers with the final report.
    #[oai(path = "/send-messages", method = "post", tag = EndpointsTags::Messages)]
    pub async fn send_messages(
        &self,
        auth: JwtAuth,
        request: Json<SendMessagesRequestDto>,
    ) -> PoemResult<SendMessagesResponse> {
        let run = match self.prepare(auth, &request)? {
            Ok(run) => run,
            Err(Rejection::Invalid(dto)) => return Ok(SendMessagesResponse::Invalid(Json(dto))),
            Err(Rejection::Conflict(dto)) => return Ok(SendMessagesResponse::Conflict(Json(dto))),
        };

        // Spawned so a dropped connection does not abort a run mid-way.
        let usecase = self.state.dispatch_usecase.clone();
        let report = tokio::spawn(async move { usecase.drive(run, &LoggingProgressSink).await })
            .await
            .map_err(|err| {
                poem::Error::from_string(err.to_string(), StatusCode::INTERNAL_SERVER_ERROR)
            })?;

        Ok(SendMessagesResponse::Ok(Json(map_report(&report))))
    }

    /// Same as `/send-messages`, streamed as server-sent events: one
    /// `progress` event per attempt, then a `completed` event with the report.
    #[oai(
        path = "/send-messages/stream",
        method = "post",
        tag = EndpointsTags::Messages
    )]
    pub async fn send_messages_stream(
        &self,
        auth: JwtAuth,
        request: Json<SendMessagesRequestDto>,
    ) -> PoemResult<SendMessagesStreamResponse> {
        let run = match self.prepare(auth, &request)? {
            Ok(run) => run,
            Err(Rejection::Invalid(dto)) => {
                return Ok(SendMessagesStreamResponse::Invalid(Json(dto)));
            }
            Err(Rejection::Conflict(dto)) => {
                return Ok(SendMessagesStreamResponse::Conflict(Json(dto)));
            }
        };

        tracing::info!(run_id = %run.run_id(), "streaming dispatch run");
        let (tx, rx) = mpsc::unbounded_channel();
        let usecase = self.state.dispatch_usecase.clone();
        tokio::spawn(async move {
            let progress_tx = tx.clone();
            let sink = move |event: ProgressEvent| {
                let _ = progress_tx.send(map_progress_event(event));
            };
            let report = usecase.drive(run, &sink).await;
            let _ = tx.send(map_completed_event(&report));
        });

        Ok(SendMessagesStreamResponse::Ok(
            EventStream::new(UnboundedReceiverStream::new(rx)).to_event(map_sse_event),
        ))
    }

    #[oai(
        path = "/send-messages/cancel",
        method = "post",
        tag = EndpointsTags::Messages
    )]
    pub async fn cancel_messages(
        &self,
        auth: JwtAuth,
        request: Json<CancelDispatchRequestDto>,
    ) -> PoemResult<Json<CancelDispatchResponseDto>> {
        let session = auth.into_session(&self.state.jwt)?;

        match self
            .state
            .dispatch_usecase
            .cancel(&session, &request.phone_number)
        {
            Some(run_id) => Ok(Json(CancelDispatchResponseDto {
                cancelled: true,
                run_id,
            })),
            None => Err(poem::Error::from_string(
                "no active dispatch for this phone number",
                StatusCode::NOT_FOUND,
            )),
        }
    }
}

fn internal_error(err: DomainError) -> poem::Error {
    poem::Error::from_string(err.to_string(), StatusCode::INTERNAL_SERVER_ERROR)
}
