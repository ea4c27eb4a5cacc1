use std::collections::HashMap;

use poem_openapi::{ApiResponse, Object, payload::EventStream, payload::Json};
use tokio_stream::wrappers::UnboundedReceiverStream;
use uuid::Uuid;

use crate::presentation::models::{DispatchVerdictKind, RunStateKind, StreamEventKind};

#[derive(Object)]
#[oai(rename_all = "camelCase")]
pub struct HealthDto {
    pub status: String,
    pub mock_mode: bool,
    pub active_runs: u32,
}

#[derive(Object)]
#[oai(rename_all = "camelCase")]
pub struct AuthResponseDto {
    pub access_token: String,
    pub expires_in: u64,
}

#[derive(Object)]
#[oai(rename_all = "camelCase")]
pub struct CountryDto {
    pub code: String,
    pub name: String,
    pub dial_code: String,
}

#[derive(Object)]
pub struct CountriesResponseDto {
    pub success: bool,
    pub countries: Vec<CountryDto>,
}

#[derive(Object)]
#[oai(rename_all = "camelCase")]
pub struct DispatchSummaryDto {
    pub total_attempts: u32,
    pub successful: u32,
    pub failed: u32,
    pub success_rate: f64,
    pub verdict: DispatchVerdictKind,
}

#[derive(Object)]
#[oai(rename_all = "camelCase")]
pub struct SuccessfulAttemptDto {
    pub attempt: u32,
    pub message_id: String,
    pub timestamp: String,
}

#[derive(Object)]
pub struct FailedAttemptDto {
    pub attempt: u32,
    pub error: String,
    pub timestamp: String,
}

#[derive(Object)]
#[oai(rename_all = "camelCase")]
pub struct SendMessagesResponseDto {
    pub success: bool,
    pub run_id: Uuid,
    pub state: RunStateKind,
    pub planned_attempts: u32,
    pub estimated_seconds: f64,
    pub summary: DispatchSummaryDto,
    pub results: Vec<SuccessfulAttemptDto>,
    pub errors: Vec<FailedAttemptDto>,
}

#[derive(Object)]
pub struct ValidationErrorDto {
    pub success: bool,
    pub error: String,
    pub fields: HashMap<String, String>,
}

#[derive(Object)]
pub struct ErrorDto {
    pub success: bool,
    pub error: String,
}

#[derive(Object)]
pub struct ProgressDto {
    pub current: u32,
    pub total: u32,
    pub percentage: f64,
}

#[derive(Object)]
pub struct DispatchStreamEventDto {
    pub event: StreamEventKind,
    pub progress: Option<ProgressDto>,
    pub report: Option<SendMessagesResponseDto>,
}

#[derive(Object)]
#[oai(rename_all = "camelCase")]
pub struct CancelDispatchResponseDto {
    pub cancelled: bool,
    pub run_id: Uuid,
}

#[derive(ApiResponse)]
pub enum SendMessagesResponse {
    #[oai(status = 200)]
    Ok(Json<SendMessagesResponseDto>),
    #[oai(status = 400)]
    Invalid(Json<ValidationErrorDto>),
    #[oai(status = 409)]
    Conflict(Json<ErrorDto>),
}

#[derive(ApiResponse)]
pub enum SendMessagesStreamResponse {
    #[oai(status = 200)]
    Ok(EventStream<UnboundedReceiverStream<DispatchStreamEventDto>>),
    #[oai(status = 400)]
    Invalid(Json<ValidationErrorDto>),
    #[oai(status = 409)]
    Conflict(Json<ErrorDto>),
}
