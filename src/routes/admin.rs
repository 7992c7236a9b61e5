use crate::models::{DeletedResponse, ErrorResponse, Session, VenueDraftRequest, VenueSummary};
use crate::routes::directory::{bearer_header, campus_error_response, AppState};
use crate::services::VenueRecord;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

/// Configure admin venue CRUD routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/venues", web::post().to(create_venue))
        .route("/venues/{id}", web::put().to(update_venue))
        .route("/venues/{id}", web::delete().to(delete_venue));
}

/// Verify the session and require the account's admin flag.
///
/// The flag is resolved from the backend account record on every call; it
/// is never read from the token or the request body.
async fn authorize_admin(
    state: &AppState,
    http_req: &HttpRequest,
) -> Result<Session, HttpResponse> {
    let session = state
        .sessions
        .verify_header(bearer_header(http_req))
        .map_err(|err| {
            HttpResponse::Unauthorized().json(ErrorResponse {
                error: "unauthorized".to_string(),
                message: err.to_string(),
                status_code: 401,
            })
        })?;

    let account = state
        .campus
        .get_user(session.user_id)
        .await
        .map_err(|err| campus_error_response("checking the admin flag", err))?;

    if !account.is_admin() {
        tracing::info!("User {} denied admin access", session.user_id);
        return Err(HttpResponse::Forbidden().json(ErrorResponse {
            error: "forbidden".to_string(),
            message: "admin privileges required".to_string(),
            status_code: 403,
        }));
    }

    Ok(session)
}

fn to_record(draft: &VenueDraftRequest) -> VenueRecord {
    VenueRecord {
        name: draft.name.clone(),
        faculty_id: draft.faculty_id,
        address: draft.address.clone(),
        opens_at: draft.opens_at,
        closes_at: draft.closes_at,
        latitude: draft.latitude,
        longitude: draft.longitude,
        image_url: draft.image_url.clone(),
    }
}

/// Create a venue
///
/// POST /api/v1/venues
async fn create_venue(
    state: web::Data<AppState>,
    req: web::Json<VenueDraftRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    let session = match authorize_admin(&state, &http_req).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "validation_failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state.campus.create_venue(&to_record(&req)).await {
        Ok(venue) => {
            if let Err(err) = state.cache.invalidate_venue(venue.id).await {
                tracing::warn!("Cache invalidation failed after create: {}", err);
            }
            tracing::info!("Admin {} created venue {} ({})", session.user_id, venue.id, venue.name);
            HttpResponse::Created().json(VenueSummary::from(venue))
        }
        Err(err) => campus_error_response("creating a venue", err),
    }
}

/// Replace a venue
///
/// PUT /api/v1/venues/{id}
async fn update_venue(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: web::Json<VenueDraftRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    let id = path.into_inner();

    let session = match authorize_admin(&state, &http_req).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "validation_failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state.campus.update_venue(id, &to_record(&req)).await {
        Ok(venue) => {
            if let Err(err) = state.cache.invalidate_venue(id).await {
                tracing::warn!("Cache invalidation failed after update: {}", err);
            }
            tracing::info!("Admin {} updated venue {}", session.user_id, id);
            HttpResponse::Ok().json(VenueSummary::from(venue))
        }
        Err(err) => campus_error_response("updating a venue", err),
    }
}

/// Delete a venue
///
/// DELETE /api/v1/venues/{id}
async fn delete_venue(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    http_req: HttpRequest,
) -> impl Responder {
    let id = path.into_inner();

    let session = match authorize_admin(&state, &http_req).await {
        Ok(session) => session,
        Err(response) => return response,
    };

    match state.campus.delete_venue(id).await {
        Ok(()) => {
            if let Err(err) = state.cache.invalidate_venue(id).await {
                tracing::warn!("Cache invalidation failed after delete: {}", err);
            }
            tracing::info!("Admin {} deleted venue {}", session.user_id, id);
            HttpResponse::Ok().json(DeletedResponse { success: true, id })
        }
        Err(err) => campus_error_response("deleting a venue", err),
    }
}
