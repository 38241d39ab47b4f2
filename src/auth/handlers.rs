use crate::{
    auth::{jwt::generate_access_token, jwt::verify_token, middleware::bearer_token},
    config::Config,
    error::StoreError,
    models::{LoginReqDto, LoginResponse},
    store::{DataStore, IdentityStore},
};
use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Sign in handler
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse),
        (status = 400, description = "Email or password missing"),
        (status = 401, description = "Invalid credentials", body = Object, example = json!({
            "message": "Invalid credentials"
        }))
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(identity, domain, config, user),
    fields(email = %user.email, role = %user.role)
)]
pub async fn login(
    user: web::Json<LoginReqDto>,
    identity: web::Data<IdentityStore>,
    domain: web::Data<DataStore>,
    config: web::Data<Config>,
) -> actix_web::Result<HttpResponse> {
    info!("Login request received");

    // 1️⃣ Basic validation
    if user.email.trim().is_empty() || user.password.is_empty() {
        info!("Validation failed: empty email or password");
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "Email and password are required"
        })));
    }

    // 2️⃣ Simulated latency
    if config.login_delay_ms > 0 {
        actix_web::rt::time::sleep(Duration::from_millis(config.login_delay_ms)).await;
    }

    // 3️⃣ Credential lookup
    let signed_in = match identity.sign_in(&user.email, user.role, &domain) {
        Ok(u) => u,
        Err(StoreError::InvalidCredentials) => {
            info!("Invalid credentials");
            return Err(StoreError::InvalidCredentials.into());
        }
        Err(e) => {
            error!(error = %e, "Sign-in failed");
            return Err(e.into());
        }
    };

    // 4️⃣ Access token
    debug!(user_id = %signed_in.id, "Generating access token");

    let access_token =
        generate_access_token(&signed_in, &config.jwt_secret, config.access_token_ttl).map_err(
            |e| {
                error!(error = %e, "Failed to generate access token");
                actix_web::error::ErrorInternalServerError("Internal Server Error")
            },
        )?;

    info!("Login successful");

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: format!("Logged in as {}", signed_in.name),
        access_token,
        user: signed_in,
    }))
}

/// Current identity
#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Signed-in identity", body = User),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
#[get("/me")]
pub async fn me(identity: web::Data<IdentityStore>) -> actix_web::Result<HttpResponse> {
    match identity.current()? {
        Some(user) => Ok(HttpResponse::Ok().json(user)),
        None => Ok(HttpResponse::Unauthorized().json(json!({"message": "No user"}))),
    }
}

/// Sign out handler. Always answers 204; only a token belonging to the
/// signed-in identity actually ends the session.
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 204, description = "Signed out")
    ),
    tag = "Auth"
)]
pub async fn logout(
    req: HttpRequest,
    identity: web::Data<IdentityStore>,
    config: web::Data<Config>,
) -> actix_web::Result<impl Responder> {
    // 1️⃣ extract Authorization header
    let Some(token) = bearer_token(&req) else {
        return Ok(HttpResponse::NoContent().finish());
    };

    // 2️⃣ verify JWT
    let Ok(claims) = verify_token(token, &config.jwt_secret) else {
        return Ok(HttpResponse::NoContent().finish());
    };

    // 3️⃣ only the signed-in identity can end its session
    let current = identity.current()?;
    if current.is_some_and(|u| u.id == claims.sub) {
        identity.sign_out()?;
    }

    Ok(HttpResponse::NoContent().finish())
}
