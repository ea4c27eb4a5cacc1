use std::sync::Arc;

use poem_openapi::Tags;

use crate::application::{
    services::jwt::JwtService,
    usecases::{
        authenticate_operator::AuthenticateOperatorUseCase,
        dispatch_messages::DispatchMessagesUseCase, list_countries::ListCountriesUseCase,
    },
};
use crate::presentation::http::endpoints::{
    auth::AuthEndpoints, countries::CountriesEndpoints, health::HealthEndpoints,
    messages::MessagesEndpoints,
};

#[derive(Clone)]
pub struct ApiState {
    pub auth_usecase: Arc<AuthenticateOperatorUseCase>,
    pub list_countries_usecase: Arc<ListCountriesUseCase>,
    pub dispatch_usecase: Arc<DispatchMessagesUseCase>,
    pub jwt: JwtService,
    pub mock_mode: bool,
}

/// Enum of API sections (tags)
#[derive(Tags)]
pub enum EndpointsTags {
    Health,
    Auth,
    Countries,
    Messages,
}

pub type Endpoints = (
    HealthEndpoints,
    AuthEndpoints,
    CountriesEndpoints,
    MessagesEndpoints,
);

pub fn endpoints(state: ApiState) -> Endpoints {
    let state = Arc::new(state);
    (
        HealthEndpoints::new(state.clone()),
        AuthEndpoints::new(state.clone()),
        CountriesEndpoints::new(state.clone()),
        MessagesEndpoints::new(state),
    )
}
