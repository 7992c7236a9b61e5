use crate::core::hours::TimeOfDay;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query parameters for the directory and flat venue listings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub faculty: Option<i64>,
    // Caller location; the open list is reordered nearest-first when both
    // are present
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    // Reference instant override ("HH:MM") for deterministic rendering
    #[serde(default)]
    pub at: Option<String>,
}

impl DirectoryQuery {
    pub fn location(&self) -> Option<crate::models::Coordinates> {
        match (self.lat, self.lon) {
            (Some(latitude), Some(longitude)) => {
                Some(crate::models::Coordinates { latitude, longitude })
            }
            _ => None,
        }
    }
}

/// Query parameters for a venue's menu listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    // "price" or "-price"
    #[serde(default)]
    pub order: Option<String>,
}

/// Body for review submission; the user id comes from the verified session,
/// never from the client
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,
    #[validate(length(min = 1, max = 2000))]
    pub comment: String,
}

/// Body for venue creation and replacement (admin)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VenueDraftRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(rename = "facultyId", default)]
    pub faculty_id: Option<i64>,
    #[serde(default)]
    pub address: Option<String>,
    // Strict times here: an admin typo should be rejected, not silently
    // degraded the way backend snapshots are
    #[serde(rename = "opensAt", default)]
    pub opens_at: Option<TimeOfDay>,
    #[serde(rename = "closesAt", default)]
    pub closes_at: Option<TimeOfDay>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
}
