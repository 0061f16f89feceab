use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Identifiable, LocalizedText};

/// A turnkey production line offered to customers.
///
/// `diagram_url` points at the large line diagram shown in the pan/zoom viewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    pub id: Uuid,
    pub slug: String,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub image_url: Option<String>,
    pub diagram_url: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Solution {
    pub fn new(slug: String, title: LocalizedText) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            slug,
            title,
            description: LocalizedText::default(),
            image_url: None,
            diagram_url: None,
            sort_order: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Identifiable for Solution {
    fn id(&self) -> Uuid {
        self.id
    }
}
