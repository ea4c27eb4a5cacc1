use std::sync::Arc;

use poem::Result as PoemResult;
use poem_openapi::{OpenApi, payload::Json};

use crate::presentation::http::{
    endpoints::root::{ApiState, EndpointsTags},
    mappers::map_country,
    responses::CountriesResponseDto,
};

#[derive(Clone)]
pub struct CountriesEndpoints {
    state: Arc<ApiState>,
}

impl CountriesEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl CountriesEndpoints {
    #[oai(path = "/countries", method = "get", tag = EndpointsTags::Countries)]
    pub async fn list_countries(&self) -> PoemResult<Json<CountriesResponseDto>> {
        let countries = self
            .state
            .list_countries_usecase
            .execute()
            .await
            .map_err(|err| {
                poem::Error::from_string(
                    err.to_string(),
                    poem::http::StatusCode::INTERNAL_SERVER_ERROR,
                )
            })?;

        Ok(Json(CountriesResponseDto {
            success: true,
            countries: countries.iter().map(map_country).collect(),
        }))
    }
}
