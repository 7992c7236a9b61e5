use crate::core::hours::TimeOfDay;
use crate::models::{Faculty, MenuItem, Review, UserAccount, Venue};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the campus backend
#[derive(Debug, Error)]
pub enum CampusError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("backend returned error: {0}")]
    ApiError(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("credentials rejected: {0}")]
    CredentialsRejected(String),

    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

/// Client for the campus REST backend
///
/// All persistent data lives behind the backend's endpoints; this client
/// reads snapshots and forwards writes. Payloads are parsed into typed
/// records here, at the boundary, so the rest of the service never touches
/// loose JSON.
pub struct CampusApiClient {
    base_url: String,
    client: Client,
}

/// Wire payload for venue creation and replacement
#[derive(Debug, Clone, Serialize)]
pub struct VenueRecord {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "id_facultad", skip_serializing_if = "Option::is_none")]
    pub faculty_id: Option<i64>,
    #[serde(rename = "direccion", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "hora_apertura", skip_serializing_if = "Option::is_none")]
    pub opens_at: Option<TimeOfDay>,
    #[serde(rename = "hora_cierre", skip_serializing_if = "Option::is_none")]
    pub closes_at: Option<TimeOfDay>,
    #[serde(rename = "latitud", skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(rename = "longitud", skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(rename = "imagen_url", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Wire payload for review creation; `id_usuario` always comes from the
/// verified session, never from the client request
#[derive(Debug, Clone, Serialize)]
pub struct ReviewRecord {
    #[serde(rename = "id_tiendita")]
    pub venue_id: i64,
    #[serde(rename = "id_usuario")]
    pub user_id: i64,
    #[serde(rename = "calificacion")]
    pub rating: u8,
    #[serde(rename = "comentario")]
    pub comment: String,
}

/// What the backend's login endpoint answers with
#[derive(Debug, Clone, Deserialize)]
pub struct LoginOutcome {
    pub success: bool,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub es_admin: Option<i64>,
    #[serde(default)]
    pub error: Option<String>,
}

/// What the backend's register endpoint answers with
#[derive(Debug, Clone, Deserialize)]
pub struct RegisteredAccount {
    #[serde(rename = "nombre_usuario")]
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl CampusApiClient {
    /// Create a new backend client
    pub fn new(base_url: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { base_url, client }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Fetch the venue snapshot, optionally narrowed by the backend's
    /// name search
    pub async fn list_venues(&self, search: Option<&str>) -> Result<Vec<Venue>, CampusError> {
        let url = match search {
            Some(needle) => format!(
                "{}?search={}",
                self.url("/api/Tienditas/"),
                urlencoding::encode(needle)
            ),
            None => self.url("/api/Tienditas/"),
        };

        tracing::debug!("Fetching venue snapshot from {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(CampusError::ApiError(format!(
                "venue snapshot fetch failed: {}",
                response.status()
            )));
        }

        response
            .json::<Vec<Venue>>()
            .await
            .map_err(|e| CampusError::InvalidResponse(format!("venue snapshot: {}", e)))
    }

    /// Fetch a single venue
    pub async fn get_venue(&self, id: i64) -> Result<Venue, CampusError> {
        let url = self.url(&format!("/api/Tienditas/{}/", id));
        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CampusError::NotFound(format!("venue {}", id)));
        }
        if !response.status().is_success() {
            return Err(CampusError::ApiError(format!(
                "venue fetch failed: {}",
                response.status()
            )));
        }

        response
            .json::<Venue>()
            .await
            .map_err(|e| CampusError::InvalidResponse(format!("venue {}: {}", id, e)))
    }

    /// Create a venue (admin path)
    pub async fn create_venue(&self, record: &VenueRecord) -> Result<Venue, CampusError> {
        let url = self.url("/api/Tienditas/");
        let response = self.client.post(&url).json(record).send().await?;

        if !response.status().is_success() {
            return Err(CampusError::ApiError(format!(
                "venue creation failed: {}",
                response.status()
            )));
        }

        response
            .json::<Venue>()
            .await
            .map_err(|e| CampusError::InvalidResponse(format!("created venue: {}", e)))
    }

    /// Replace a venue (admin path)
    pub async fn update_venue(&self, id: i64, record: &VenueRecord) -> Result<Venue, CampusError> {
        let url = self.url(&format!("/api/Tienditas/{}/", id));
        let response = self.client.put(&url).json(record).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CampusError::NotFound(format!("venue {}", id)));
        }
        if !response.status().is_success() {
            return Err(CampusError::ApiError(format!(
                "venue update failed: {}",
                response.status()
            )));
        }

        response
            .json::<Venue>()
            .await
            .map_err(|e| CampusError::InvalidResponse(format!("updated venue {}: {}", id, e)))
    }

    /// Delete a venue (admin path)
    pub async fn delete_venue(&self, id: i64) -> Result<(), CampusError> {
        let url = self.url(&format!("/api/Tienditas/{}/", id));
        let response = self.client.delete(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CampusError::NotFound(format!("venue {}", id)));
        }
        if !response.status().is_success() {
            return Err(CampusError::ApiError(format!(
                "venue deletion failed: {}",
                response.status()
            )));
        }

        Ok(())
    }

    /// Fetch the faculty list (the SPA's filter dropdown)
    pub async fn list_faculties(&self) -> Result<Vec<Faculty>, CampusError> {
        let url = self.url("/api/Facultades/");
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(CampusError::ApiError(format!(
                "faculty fetch failed: {}",
                response.status()
            )));
        }

        response
            .json::<Vec<Faculty>>()
            .await
            .map_err(|e| CampusError::InvalidResponse(format!("faculty list: {}", e)))
    }

    /// Fetch a venue's menu snapshot
    pub async fn list_menu(&self, venue_id: i64) -> Result<Vec<MenuItem>, CampusError> {
        let url = format!("{}?id_tiendita={}", self.url("/api/Menus/"), venue_id);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(CampusError::ApiError(format!(
                "menu fetch failed: {}",
                response.status()
            )));
        }

        response
            .json::<Vec<MenuItem>>()
            .await
            .map_err(|e| CampusError::InvalidResponse(format!("menu of venue {}: {}", venue_id, e)))
    }

    /// Fetch a venue's reviews; the backend orders them newest-first
    pub async fn list_reviews(&self, venue_id: i64) -> Result<Vec<Review>, CampusError> {
        let url = format!("{}?id_tiendita={}", self.url("/api/Resenas/"), venue_id);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(CampusError::ApiError(format!(
                "review fetch failed: {}",
                response.status()
            )));
        }

        response
            .json::<Vec<Review>>()
            .await
            .map_err(|e| {
                CampusError::InvalidResponse(format!("reviews of venue {}: {}", venue_id, e))
            })
    }

    /// Submit a review on behalf of a verified session
    pub async fn create_review(&self, record: &ReviewRecord) -> Result<Review, CampusError> {
        let url = self.url("/api/Resenas/");
        let response = self.client.post(&url).json(record).send().await?;

        if !response.status().is_success() {
            return Err(CampusError::ApiError(format!(
                "review creation failed: {}",
                response.status()
            )));
        }

        response
            .json::<Review>()
            .await
            .map_err(|e| CampusError::InvalidResponse(format!("created review: {}", e)))
    }

    /// Fetch an account record (admin-flag checks)
    pub async fn get_user(&self, id: i64) -> Result<UserAccount, CampusError> {
        let url = self.url(&format!("/api/Usuarios/{}/", id));
        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CampusError::NotFound(format!("user {}", id)));
        }
        if !response.status().is_success() {
            return Err(CampusError::ApiError(format!(
                "user fetch failed: {}",
                response.status()
            )));
        }

        response
            .json::<UserAccount>()
            .await
            .map_err(|e| CampusError::InvalidResponse(format!("user {}: {}", id, e)))
    }

    /// Forward a login attempt
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, CampusError> {
        let url = self.url("/api/login/");
        let payload = serde_json::json!({ "username": username, "password": password });
        let response = self.client.post(&url).json(&payload).send().await?;

        let status = response.status();
        let outcome: LoginOutcome = response
            .json()
            .await
            .map_err(|e| CampusError::InvalidResponse(format!("login outcome: {}", e)))?;

        if status.is_success() && outcome.success {
            return Ok(outcome);
        }

        Err(CampusError::CredentialsRejected(
            outcome
                .error
                .unwrap_or_else(|| format!("login failed with status {}", status)),
        ))
    }

    /// Forward a registration
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<RegisteredAccount, CampusError> {
        let url = self.url("/api/register");
        let payload = serde_json::json!({
            "nombre_usuario": username,
            "email": email,
            "contrasena": password,
        });
        let response = self.client.post(&url).json(&payload).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CampusError::ApiError(format!(
                "registration failed: {} {}",
                status, body
            )));
        }

        response
            .json::<RegisteredAccount>()
            .await
            .map_err(|e| CampusError::InvalidResponse(format!("registered account: {}", e)))
    }

    /// Whether the backend answers at all
    pub async fn health_check(&self) -> bool {
        let url = self.url("/api/Tienditas/");
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                tracing::debug!("Backend health probe failed: {}", err);
                false
            }
        }
    }
}
