use crate::core::{
    classifier::{is_open_at, partition_by_hours},
    filters::{average_rating, filter_menu, filter_venues, PriceOrder},
    geo::sort_nearest_first,
    hours::TimeOfDay,
};
use crate::models::{
    CreateReviewRequest, DirectoryQuery, DirectoryResponse, ErrorResponse, FacultyView,
    HealthResponse, MenuItemView, MenuQuery, MenuResponse, Review, ReviewView, ReviewsResponse,
    Venue, VenueDetailResponse, VenueSummary,
};
use crate::services::{
    CacheError, CacheKey, CacheManager, CampusApiClient, CampusError, ReviewRecord,
    SessionVerifier,
};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub campus: Arc<CampusApiClient>,
    pub cache: Arc<CacheManager>,
    pub sessions: SessionVerifier,
}

/// Configure directory, venue, menu and review routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/directory", web::get().to(directory))
        .route("/faculties", web::get().to(list_faculties))
        .route("/venues", web::get().to(list_venues))
        .route("/venues/{id}", web::get().to(venue_detail))
        .route("/venues/{id}/menu", web::get().to(venue_menu))
        .route("/venues/{id}/reviews", web::get().to(venue_reviews))
        .route("/venues/{id}/reviews", web::post().to(create_review));
}

/// The Authorization header value, if the caller sent one
pub(crate) fn bearer_header(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(actix_web::http::header::AUTHORIZATION)?
        .to_str()
        .ok()
}

/// Map a backend failure onto this API's error shape
pub(crate) fn campus_error_response(context: &str, err: CampusError) -> HttpResponse {
    match err {
        CampusError::NotFound(what) => HttpResponse::NotFound().json(ErrorResponse {
            error: "not_found".to_string(),
            message: what,
            status_code: 404,
        }),
        other => {
            tracing::error!("Backend failure while {}: {}", context, other);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "backend_unavailable".to_string(),
                message: other.to_string(),
                status_code: 502,
            })
        }
    }
}

/// Read-through for the full venue snapshot. Cache trouble degrades to a
/// direct backend read; only the backend failing is an error.
pub(crate) async fn cached_venues(state: &AppState) -> Result<Vec<Venue>, CampusError> {
    let key = CacheKey::venues();
    match state.cache.get::<Vec<Venue>>(&key).await {
        Ok(venues) => return Ok(venues),
        Err(CacheError::CacheMiss(_)) => {}
        Err(err) => tracing::warn!("Cache read failed for {}: {}", key, err),
    }

    let venues = state.campus.list_venues(None).await?;
    if let Err(err) = state.cache.set(&key, &venues).await {
        tracing::warn!("Cache write failed for {}: {}", key, err);
    }
    Ok(venues)
}

pub(crate) async fn cached_venue(state: &AppState, id: i64) -> Result<Venue, CampusError> {
    let key = CacheKey::venue(id);
    match state.cache.get::<Venue>(&key).await {
        Ok(venue) => return Ok(venue),
        Err(CacheError::CacheMiss(_)) => {}
        Err(err) => tracing::warn!("Cache read failed for {}: {}", key, err),
    }

    let venue = state.campus.get_venue(id).await?;
    if let Err(err) = state.cache.set(&key, &venue).await {
        tracing::warn!("Cache write failed for {}: {}", key, err);
    }
    Ok(venue)
}

pub(crate) async fn cached_reviews(state: &AppState, venue_id: i64) -> Result<Vec<Review>, CampusError> {
    let key = CacheKey::reviews(venue_id);
    match state.cache.get::<Vec<Review>>(&key).await {
        Ok(reviews) => return Ok(reviews),
        Err(CacheError::CacheMiss(_)) => {}
        Err(err) => tracing::warn!("Cache read failed for {}: {}", key, err),
    }

    let reviews = state.campus.list_reviews(venue_id).await?;
    if let Err(err) = state.cache.set(&key, &reviews).await {
        tracing::warn!("Cache write failed for {}: {}", key, err);
    }
    Ok(reviews)
}

/// Resolve the reference instant: an explicit `at=HH:MM` override, else the
/// current wall clock
fn resolve_instant(at: Option<&str>) -> Result<TimeOfDay, HttpResponse> {
    match at {
        None => Ok(TimeOfDay::now()),
        Some(raw) => raw.parse().map_err(|err| {
            HttpResponse::BadRequest().json(ErrorResponse {
                error: "invalid_instant".to_string(),
                message: format!("{}", err),
                status_code: 400,
            })
        }),
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let backend_healthy = state.campus.health_check().await;
    let status = if backend_healthy { "healthy" } else { "degraded" };

    tracing::debug!("Cache stats: {:?}", state.cache.stats());

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Directory endpoint: the open/closed partition the landing page renders
///
/// GET /api/v1/directory?search=&faculty=&lat=&lon=&at=HH:MM
async fn directory(
    state: web::Data<AppState>,
    query: web::Query<DirectoryQuery>,
) -> impl Responder {
    let now = match resolve_instant(query.at.as_deref()) {
        Ok(now) => now,
        Err(response) => return response,
    };

    let venues = match cached_venues(&state).await {
        Ok(venues) => venues,
        Err(err) => return campus_error_response("fetching the venue snapshot", err),
    };

    let venues = filter_venues(venues, query.search.as_deref(), query.faculty);
    let total_venues = venues.len();

    let mut partition = partition_by_hours(venues, now);

    // Caller location reorders the open list only; the closed list keeps
    // snapshot order
    if let Some(from) = query.location() {
        sort_nearest_first(&mut partition.open, from);
    }

    tracing::debug!(
        "Directory as of {}: {} open, {} closed",
        now,
        partition.open.len(),
        partition.closed.len()
    );

    HttpResponse::Ok().json(DirectoryResponse {
        open: partition.open.into_iter().map(VenueSummary::from).collect(),
        closed: partition.closed.into_iter().map(VenueSummary::from).collect(),
        as_of: now,
        total_venues,
    })
}

/// Faculty listing for the SPA's filter dropdown
///
/// GET /api/v1/faculties
async fn list_faculties(state: web::Data<AppState>) -> impl Responder {
    let key = CacheKey::faculties();
    let faculties = match state.cache.get::<Vec<crate::models::Faculty>>(&key).await {
        Ok(faculties) => faculties,
        Err(cache_err) => {
            if !matches!(cache_err, CacheError::CacheMiss(_)) {
                tracing::warn!("Cache read failed for {}: {}", key, cache_err);
            }
            match state.campus.list_faculties().await {
                Ok(faculties) => {
                    if let Err(err) = state.cache.set(&key, &faculties).await {
                        tracing::warn!("Cache write failed for {}: {}", key, err);
                    }
                    faculties
                }
                Err(err) => return campus_error_response("fetching faculties", err),
            }
        }
    };

    let views: Vec<FacultyView> = faculties.into_iter().map(FacultyView::from).collect();
    HttpResponse::Ok().json(views)
}

/// Flat venue listing with the same filters as the directory
///
/// GET /api/v1/venues?search=&faculty=
async fn list_venues(
    state: web::Data<AppState>,
    query: web::Query<DirectoryQuery>,
) -> impl Responder {
    let venues = match cached_venues(&state).await {
        Ok(venues) => venues,
        Err(err) => return campus_error_response("fetching the venue snapshot", err),
    };

    let venues = filter_venues(venues, query.search.as_deref(), query.faculty);
    let summaries: Vec<VenueSummary> = venues.into_iter().map(VenueSummary::from).collect();

    HttpResponse::Ok().json(summaries)
}

/// Venue detail with live open/closed status and review aggregates
///
/// GET /api/v1/venues/{id}
async fn venue_detail(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();

    // Independent snapshots; no ordering between them matters
    let (venue, reviews) = tokio::join!(cached_venue(&state, id), cached_reviews(&state, id));

    let venue = match venue {
        Ok(venue) => venue,
        Err(err) => return campus_error_response("fetching a venue", err),
    };

    // Review aggregates are cosmetic; losing them should not lose the page
    let reviews = match reviews {
        Ok(reviews) => reviews,
        Err(err) => {
            tracing::warn!("Review aggregates unavailable for venue {}: {}", id, err);
            Vec::new()
        }
    };

    let is_open = is_open_at(&venue, TimeOfDay::now());

    HttpResponse::Ok().json(VenueDetailResponse {
        venue: VenueSummary::from(venue),
        is_open,
        average_rating: average_rating(&reviews),
        review_count: reviews.len(),
    })
}

/// Menu listing for one venue
///
/// GET /api/v1/venues/{id}/menu?category=&search=&order=price|-price
async fn venue_menu(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    query: web::Query<MenuQuery>,
) -> impl Responder {
    let id = path.into_inner();

    let order = match query.order.as_deref() {
        None => None,
        Some(raw) => match raw.parse::<PriceOrder>() {
            Ok(order) => Some(order),
            Err(()) => {
                return HttpResponse::BadRequest().json(ErrorResponse {
                    error: "invalid_order".to_string(),
                    message: "order must be \"price\" or \"-price\"".to_string(),
                    status_code: 400,
                });
            }
        },
    };

    let key = CacheKey::menu(id);
    let items = match state.cache.get::<Vec<crate::models::MenuItem>>(&key).await {
        Ok(items) => items,
        Err(cache_err) => {
            if !matches!(cache_err, CacheError::CacheMiss(_)) {
                tracing::warn!("Cache read failed for {}: {}", key, cache_err);
            }
            match state.campus.list_menu(id).await {
                Ok(items) => {
                    if let Err(err) = state.cache.set(&key, &items).await {
                        tracing::warn!("Cache write failed for {}: {}", key, err);
                    }
                    items
                }
                Err(err) => return campus_error_response("fetching a menu", err),
            }
        }
    };

    let items = filter_menu(items, query.category.as_deref(), query.search.as_deref(), order);
    let views: Vec<MenuItemView> = items.into_iter().map(MenuItemView::from).collect();
    let total = views.len();

    HttpResponse::Ok().json(MenuResponse { items: views, total })
}

/// Review listing for one venue (backend order: newest first)
///
/// GET /api/v1/venues/{id}/reviews
async fn venue_reviews(state: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();

    let reviews = match cached_reviews(&state, id).await {
        Ok(reviews) => reviews,
        Err(err) => return campus_error_response("fetching reviews", err),
    };

    let views: Vec<ReviewView> = reviews.into_iter().map(ReviewView::from).collect();
    let total = views.len();

    HttpResponse::Ok().json(ReviewsResponse { reviews: views, total })
}

/// Submit a review on behalf of the verified session
///
/// POST /api/v1/venues/{id}/reviews
///
/// Request body:
/// ```json
/// { "rating": 5, "comment": "..." }
/// ```
async fn create_review(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: web::Json<CreateReviewRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    let venue_id = path.into_inner();

    let session = match state.sessions.verify_header(bearer_header(&http_req)) {
        Ok(session) => session,
        Err(err) => {
            tracing::info!("Rejected review submission for venue {}: {}", venue_id, err);
            return HttpResponse::Unauthorized().json(ErrorResponse {
                error: "unauthorized".to_string(),
                message: err.to_string(),
                status_code: 401,
            });
        }
    };

    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "validation_failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let record = ReviewRecord {
        venue_id,
        user_id: session.user_id,
        rating: req.rating,
        comment: req.comment.clone(),
    };

    match state.campus.create_review(&record).await {
        Ok(review) => {
            if let Err(err) = state.cache.delete(&CacheKey::reviews(venue_id)).await {
                tracing::warn!("Failed to invalidate review cache: {}", err);
            }

            tracing::info!(
                "User {} reviewed venue {} ({} stars)",
                session.user_id,
                venue_id,
                req.rating
            );

            HttpResponse::Created().json(ReviewView::from(review))
        }
        Err(err) => campus_error_response("submitting a review", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_resolve_instant_accepts_override() {
        let t = resolve_instant(Some("09:15")).unwrap();
        assert_eq!(t.minutes_of_day(), 555);
    }

    #[test]
    fn test_resolve_instant_rejects_garbage() {
        assert!(resolve_instant(Some("quarter past nine")).is_err());
    }
}
