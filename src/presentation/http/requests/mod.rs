use poem_openapi::Object;

#[derive(Object, Debug)]
pub struct LoginRequestDto {
    #[oai(validator(min_length = 1))]
    pub username: String,
    pub password: String,
}

/// Every field is optional so that missing input reaches the validator and
/// is reported per field instead of as a parse error.
#[derive(Object, Debug, Clone)]
#[oai(rename_all = "camelCase")]
pub struct SendMessagesRequestDto {
    pub phone_number: Option<String>,
    pub country: Option<String>,
    pub message: Option<String>,
    pub counter: Option<i64>,
    pub delay: Option<i64>,
}

#[derive(Object, Debug)]
#[oai(rename_all = "camelCase")]
pub struct CancelDispatchRequestDto {
    #[oai(validator(min_length = 1))]
    pub phone_number: String,
}
