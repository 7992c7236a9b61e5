use crate::models::{ErrorResponse, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, SessionResponse};
use crate::routes::directory::{bearer_header, AppState};
use crate::services::CampusError;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

/// Configure authentication passthrough routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/auth/login", web::post().to(login))
        .route("/auth/register", web::post().to(register))
        .route("/auth/session", web::get().to(session_probe));
}

/// Forward a login to the backend and reshape its answer
///
/// POST /api/v1/auth/login
async fn login(state: web::Data<AppState>, req: web::Json<LoginRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "validation_failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state.campus.login(&req.username, &req.password).await {
        Ok(outcome) => {
            // A successful outcome carries both tokens; anything else was
            // already turned into CredentialsRejected by the client
            let (access_token, refresh_token) = match (outcome.access_token, outcome.refresh_token)
            {
                (Some(access), Some(refresh)) => (access, refresh),
                _ => {
                    tracing::error!("Backend login succeeded without tokens");
                    return HttpResponse::BadGateway().json(ErrorResponse {
                        error: "backend_unavailable".to_string(),
                        message: "login answer missing tokens".to_string(),
                        status_code: 502,
                    });
                }
            };

            HttpResponse::Ok().json(LoginResponse {
                success: true,
                access_token,
                refresh_token,
                username: outcome.username.unwrap_or_else(|| req.username.clone()),
                is_admin: outcome.es_admin.unwrap_or(0) != 0,
            })
        }
        Err(CampusError::CredentialsRejected(reason)) => {
            tracing::info!("Login rejected for {}: {}", req.username, reason);
            HttpResponse::Unauthorized().json(ErrorResponse {
                error: "invalid_credentials".to_string(),
                message: reason,
                status_code: 401,
            })
        }
        Err(err) => {
            tracing::error!("Login passthrough failed: {}", err);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "backend_unavailable".to_string(),
                message: err.to_string(),
                status_code: 502,
            })
        }
    }
}

/// Forward a registration to the backend
///
/// POST /api/v1/auth/register
async fn register(state: web::Data<AppState>, req: web::Json<RegisterRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "validation_failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state
        .campus
        .register(&req.username, &req.email, &req.password)
        .await
    {
        Ok(account) => HttpResponse::Created().json(RegisterResponse {
            success: true,
            username: account.username,
        }),
        Err(err) => {
            tracing::error!("Registration passthrough failed: {}", err);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "backend_unavailable".to_string(),
                message: err.to_string(),
                status_code: 502,
            })
        }
    }
}

/// Verify the caller's token and echo the session it carries
///
/// GET /api/v1/auth/session
async fn session_probe(state: web::Data<AppState>, http_req: HttpRequest) -> impl Responder {
    match state.sessions.verify_header(bearer_header(&http_req)) {
        Ok(session) => HttpResponse::Ok().json(SessionResponse {
            user_id: session.user_id,
            expires_at: session.expires_at,
        }),
        Err(err) => HttpResponse::Unauthorized().json(ErrorResponse {
            error: "unauthorized".to_string(),
            message: err.to_string(),
            status_code: 401,
        }),
    }
}
