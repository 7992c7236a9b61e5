// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Coordinates, Faculty, MenuItem, Review, Session, UserAccount, Venue};
pub use requests::{
    CreateReviewRequest, DirectoryQuery, LoginRequest, MenuQuery, RegisterRequest,
    VenueDraftRequest,
};
pub use responses::{
    DeletedResponse, DirectoryResponse, ErrorResponse, FacultyView, HealthResponse,
    LoginResponse, MenuItemView, MenuResponse, RegisterResponse, ReviewView, ReviewsResponse,
    SessionResponse, VenueDetailResponse, VenueSummary,
};
