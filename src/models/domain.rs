use crate::core::hours::{self, TimeOfDay};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A cafeteria as served by the campus backend (`Tienditas` on the wire).
///
/// Opening hours arrive as `HH:MM[:SS]` strings; the lenient deserializer
/// turns anything unparseable into "no posted hours" so one bad row never
/// rejects a whole snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    #[serde(rename = "id_tiendita")]
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "id_facultad", default)]
    pub faculty_id: Option<i64>,
    #[serde(rename = "direccion", default)]
    pub address: Option<String>,
    #[serde(rename = "hora_apertura", default, deserialize_with = "hours::lenient")]
    pub opens_at: Option<TimeOfDay>,
    #[serde(rename = "hora_cierre", default, deserialize_with = "hours::lenient")]
    pub closes_at: Option<TimeOfDay>,
    #[serde(rename = "latitud", default)]
    pub latitude: Option<f64>,
    #[serde(rename = "longitud", default)]
    pub longitude: Option<f64>,
    #[serde(rename = "imagen_url", default)]
    pub image_url: Option<String>,
}

impl Venue {
    /// Both coordinates, when the backend has them.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates { latitude, longitude }),
            _ => None,
        }
    }
}

/// A dish or drink on a venue's menu (`Menus` on the wire).
///
/// The backend serializes decimal prices as strings; `Decimal` accepts both
/// string and numeric forms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(rename = "id_menu")]
    pub id: i64,
    #[serde(rename = "id_tiendita", default)]
    pub venue_id: Option<i64>,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "categoria", default)]
    pub category: Option<String>,
    #[serde(rename = "precio", default)]
    pub price: Option<Decimal>,
}

/// A user review of a venue (`Resenas` on the wire).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "id_resena")]
    pub id: i64,
    #[serde(rename = "id_tiendita")]
    pub venue_id: i64,
    #[serde(rename = "id_usuario", default)]
    pub user_id: Option<i64>,
    #[serde(rename = "calificacion")]
    pub rating: u8,
    #[serde(rename = "comentario", default)]
    pub comment: String,
    #[serde(rename = "fecha_registro", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    // Denormalized by the backend serializer; absent on older rows
    #[serde(rename = "nombre_usuario", default)]
    pub reviewer: Option<String>,
}

/// A campus faculty (`Facultades` on the wire).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faculty {
    #[serde(rename = "id_facultad")]
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "localizacion", default)]
    pub location: Option<String>,
}

/// A user account (`Usuarios` on the wire). The password hash column is
/// deliberately not modeled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    #[serde(rename = "id_usuarios")]
    pub id: i64,
    #[serde(rename = "nombre_usuario")]
    pub username: String,
    #[serde(rename = "es_admin", default)]
    pub admin_flag: Option<i64>,
    #[serde(rename = "fecha_registro", default)]
    pub registered_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl UserAccount {
    /// The backend encodes the admin flag as a nullable 0/1 integer.
    pub fn is_admin(&self) -> bool {
        self.admin_flag.unwrap_or(0) != 0
    }
}

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Verified identity decoded from a backend access token.
///
/// Always passed explicitly to whatever needs it; nothing in this service
/// reads authentication state from ambient storage.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub user_id: i64,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}
