//! Localized read models served by the public API.
//!
//! Every text field is already resolved to the requested locale.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryView {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRef {
    pub slug: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: Uuid,
    pub slug: String,
    pub category_id: Uuid,
    pub name: String,
    pub cover_image: Option<String>,
    pub featured: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecView {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductView {
    pub id: Uuid,
    pub slug: String,
    pub category: Option<CategoryRef>,
    pub name: String,
    pub description: String,
    pub specifications: Vec<SpecView>,
    pub images: Vec<String>,
    pub featured: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDetail {
    pub category: CategoryView,
    pub products: Vec<ProductSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionView {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    /// Large line diagram opened in the pan/zoom viewer.
    pub diagram_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsSummary {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub cover_image: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsView {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub cover_image: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExhibitionView {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub booth: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExhibitionsPage {
    pub upcoming: Vec<ExhibitionView>,
    pub past: Vec<ExhibitionView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateView {
    pub id: Uuid,
    pub title: String,
    pub issuer: Option<String>,
    pub image_url: String,
    pub issued_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientView {
    pub id: Uuid,
    pub name: String,
    pub logo_url: String,
    pub website: Option<String>,
}

/// Everything the landing page shows, for one locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomePage {
    pub locale: String,
    /// `rtl` for Arabic, `ltr` otherwise.
    pub dir: String,
    pub categories: Vec<CategoryView>,
    pub featured_products: Vec<ProductSummary>,
    pub latest_news: Vec<NewsSummary>,
    pub clients: Vec<ClientView>,
    pub upcoming_exhibitions: Vec<ExhibitionView>,
}
