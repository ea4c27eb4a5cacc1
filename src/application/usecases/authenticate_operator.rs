use subtle::ConstantTimeEq;

use crate::{
    application::services::jwt::{JwtService, JwtServiceConfig},
    domain::errors::DomainError,
};

#[derive(Clone)]
pub struct OperatorCredentials {
    pub username: String,
    pub password: String,
}

pub struct AuthenticateOperatorUseCase {
    credentials: OperatorCredentials,
    jwt: JwtService,
}

pub struct AuthRequest {
    pub username: String,
    pub password: String,
}

pub struct AuthResponse {
    pub access_token: String,
    pub expires_in: u64,
}

impl AuthenticateOperatorUseCase {
    pub fn new(credentials: OperatorCredentials, jwt_config: JwtServiceConfig) -> Self {
        let jwt = JwtService::new(jwt_config);
        Self { credentials, jwt }
    }

    pub fn execute(&self, request: AuthRequest) -> Result<AuthResponse, DomainError> {
        let matches = request
            .username
            .as_bytes()
            .ct_eq(self.credentials.username.as_bytes())
            & request
                .password
                .as_bytes()
                .ct_eq(self.credentials.password.as_bytes());
        if !bool::from(matches) {
            tracing::warn!(username = %request.username, "rejected operator login");
            return Err(DomainError::Unauthorized(
                "Invalid username or password. Please try again.".to_string(),
            ));
        }

        let access_token = self.jwt.issue(&request.username)?;
        tracing::info!(username = %request.username, "operator logged in");

        Ok(AuthResponse {
            access_token,
            expires_in: self.jwt.expiration().as_secs(),
        })
    }
}
