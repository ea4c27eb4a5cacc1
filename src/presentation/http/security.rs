use poem::{Error as PoemError, Result as PoemResult, http::StatusCode};
use poem_openapi::SecurityScheme;
use poem_openapi::auth::Bearer;

use crate::{application::services::jwt::JwtService, domain::models::OperatorSession};

#[derive(SecurityScheme)]
#[oai(ty = "bearer", bearer_format = "JWT")]
pub struct JwtAuth(pub Bearer);

impl JwtAuth {
    pub fn into_session(self, jwt: &JwtService) -> PoemResult<OperatorSession> {
        jwt.verify(&self.0.token).map_err(|_| {
            PoemError::from_string("invalid or expired token", StatusCode::UNAUTHORIZED)
        })
    }
}
