//! Dashboard request and response bodies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 256))]
    pub password: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminProfile {
    pub id: Uuid,
    pub email: String,
}

/// Text entered once per language.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LocalizedInput {
    #[serde(default)]
    #[validate(length(max = 20000))]
    pub ar: String,
    #[serde(default)]
    #[validate(length(max = 20000))]
    pub en: String,
    #[serde(default)]
    #[validate(length(max = 20000))]
    pub tr: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CategoryInput {
    #[validate(length(min = 1, max = 120))]
    pub slug: String,
    #[validate(nested)]
    pub name: LocalizedInput,
    #[serde(default)]
    #[validate(nested)]
    pub description: LocalizedInput,
    #[validate(length(max = 500))]
    pub image_url: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SpecInput {
    #[validate(nested)]
    pub label: LocalizedInput,
    #[validate(length(min = 1, max = 200))]
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductInput {
    pub category_id: Uuid,
    #[validate(length(min = 1, max = 120))]
    pub slug: String,
    #[validate(nested)]
    pub name: LocalizedInput,
    #[serde(default)]
    #[validate(nested)]
    pub description: LocalizedInput,
    #[serde(default)]
    #[validate(nested)]
    pub specifications: Vec<SpecInput>,
    #[serde(default)]
    #[validate(length(max = 30))]
    pub images: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SolutionInput {
    #[validate(length(min = 1, max = 120))]
    pub slug: String,
    #[validate(nested)]
    pub title: LocalizedInput,
    #[serde(default)]
    #[validate(nested)]
    pub description: LocalizedInput,
    #[validate(length(max = 500))]
    pub image_url: Option<String>,
    #[validate(length(max = 500))]
    pub diagram_url: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewsInput {
    #[validate(length(min = 1, max = 160))]
    pub slug: String,
    #[validate(nested)]
    pub title: LocalizedInput,
    #[serde(default)]
    #[validate(nested)]
    pub summary: LocalizedInput,
    #[serde(default)]
    #[validate(nested)]
    pub content: LocalizedInput,
    #[validate(length(max = 500))]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub published: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExhibitionInput {
    #[validate(nested)]
    pub name: LocalizedInput,
    #[serde(default)]
    #[validate(nested)]
    pub location: LocalizedInput,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(length(max = 50))]
    pub booth: Option<String>,
    #[validate(length(max = 500))]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CertificateInput {
    #[validate(nested)]
    pub title: LocalizedInput,
    #[validate(length(max = 150))]
    pub issuer: Option<String>,
    #[validate(length(min = 1, max = 500))]
    pub image_url: String,
    pub issued_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClientInput {
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    #[validate(length(min = 1, max = 500))]
    pub logo_url: String,
    #[validate(url)]
    pub website: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

/// Query of `POST /api/admin/uploads/{folder}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadQuery {
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
    pub content_type: String,
    pub size: u64,
}
