use std::sync::Arc;

use poem_openapi::{OpenApi, payload::Json};

use crate::{
    application::usecases::authenticate_operator::AuthRequest,
    domain::errors::DomainError,
    presentation::http::{
        endpoints::root::{ApiState, EndpointsTags},
        requests::LoginRequestDto,
        responses::AuthResponseDto,
    },
};

#[derive(Clone)]
pub struct AuthEndpoints {
    state: Arc<ApiState>,
}

impl AuthEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl AuthEndpoints {
    #[oai(path = "/auth/login", method = "post", tag = EndpointsTags::Auth)]
    pub async fn login(
        &self,
        request: Json<LoginRequestDto>,
    ) -> poem::Result<Json<AuthResponseDto>> {
        let payload = AuthRequest {
            username: request.username.clone(),
            password: request.password.clone(),
        };

        let response = self.state.auth_usecase.execute(payload).map_err(|err| match err {
            DomainError::Unauthorized(reason) => {
                poem::Error::from_string(reason, poem::http::StatusCode::UNAUTHORIZED)
            }
            other => internal_error(other),
        })?;

        Ok(Json(AuthResponseDto {
            access_token: response.access_token,
            expires_in: response.expires_in,
        }))
    }
}

fn internal_error(err: DomainError) -> poem::Error {
    poem::Error::from_string(
        err.to_string(),
        poem::http::StatusCode::INTERNAL_SERVER_ERROR,
    )
}
