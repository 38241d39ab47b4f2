use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{role::Role, user::User};

#[derive(Deserialize, Serialize, ToSchema)]
pub struct LoginReqDto {
    #[schema(example = "sarah@dayflow.com")]
    pub email: String,
    /// Required, but not verified against any credential store
    #[schema(example = "password")]
    pub password: String,
    pub role: Role,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = "Logged in as Sarah Johnson")]
    pub message: String,
    pub access_token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Identity id
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub exp: usize,
    pub jti: String,
}
