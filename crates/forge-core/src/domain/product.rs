use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Identifiable, LocalizedText};

/// One row of a product's technical data sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSpec {
    pub label: LocalizedText,
    pub value: String,
}

/// A machine in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub category_id: Uuid,
    pub slug: String,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub specifications: Vec<ProductSpec>,
    pub images: Vec<String>,
    pub featured: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(category_id: Uuid, slug: String, name: LocalizedText) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            category_id,
            slug,
            name,
            description: LocalizedText::default(),
            specifications: Vec::new(),
            images: Vec::new(),
            featured: false,
            sort_order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// First gallery image, used as the listing thumbnail.
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

impl Identifiable for Product {
    fn id(&self) -> Uuid {
        self.id
    }
}
