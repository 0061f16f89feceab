use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Identifiable, LocalizedText};

/// Quality or conformity certificate (ISO, CE, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certificate {
    pub id: Uuid,
    pub title: LocalizedText,
    pub issuer: Option<String>,
    pub image_url: String,
    pub issued_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Certificate {
    pub fn new(title: LocalizedText, image_url: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            issuer: None,
            image_url,
            issued_on: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Identifiable for Certificate {
    fn id(&self) -> Uuid {
        self.id
    }
}
