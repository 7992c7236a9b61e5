use crate::core::hours::TimeOfDay;
use crate::models::domain::{Coordinates, Faculty, MenuItem, Review, Venue};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Venue shape served by this API (camelCase, coordinates folded together)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueSummary {
    pub id: i64,
    pub name: String,
    #[serde(rename = "facultyId")]
    pub faculty_id: Option<i64>,
    pub address: Option<String>,
    #[serde(rename = "opensAt")]
    pub opens_at: Option<TimeOfDay>,
    #[serde(rename = "closesAt")]
    pub closes_at: Option<TimeOfDay>,
    pub coordinates: Option<Coordinates>,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

impl From<Venue> for VenueSummary {
    fn from(venue: Venue) -> Self {
        let coordinates = venue.coordinates();
        Self {
            id: venue.id,
            name: venue.name,
            faculty_id: venue.faculty_id,
            address: venue.address,
            opens_at: venue.opens_at,
            closes_at: venue.closes_at,
            coordinates,
            image_url: venue.image_url,
        }
    }
}

/// The classifier's output for the SPA landing page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryResponse {
    pub open: Vec<VenueSummary>,
    pub closed: Vec<VenueSummary>,
    #[serde(rename = "asOf")]
    pub as_of: TimeOfDay,
    #[serde(rename = "totalVenues")]
    pub total_venues: usize,
}

/// Venue detail with live status and review aggregates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueDetailResponse {
    #[serde(flatten)]
    pub venue: VenueSummary,
    #[serde(rename = "isOpen")]
    pub is_open: bool,
    #[serde(rename = "averageRating")]
    pub average_rating: Option<f64>,
    #[serde(rename = "reviewCount")]
    pub review_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemView {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<Decimal>,
}

impl From<MenuItem> for MenuItemView {
    fn from(item: MenuItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            category: item.category,
            price: item.price,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuResponse {
    pub items: Vec<MenuItemView>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewView {
    pub id: i64,
    pub rating: u8,
    pub comment: String,
    pub reviewer: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<Review> for ReviewView {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            rating: review.rating,
            comment: review.comment,
            reviewer: review.reviewer,
            created_at: review.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewsResponse {
    pub reviews: Vec<ReviewView>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacultyView {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
}

impl From<Faculty> for FacultyView {
    fn from(faculty: Faculty) -> Self {
        Self {
            id: faculty.id,
            name: faculty.name,
            description: faculty.description,
            location: faculty.location,
        }
    }
}

/// Login passthrough: the backend's tokens and admin flag, reshaped
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
    pub username: String,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub username: String,
}

/// The SPA's "am I logged in" probe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "expiresAt")]
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub id: i64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
