use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Identifiable, Locale};

/// Message submitted through the public contact form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub locale: Locale,
    pub ip_address: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContactMessage {
    pub fn new(name: String, email: String, message: String, locale: Locale, ip: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            phone: None,
            company: None,
            subject: None,
            message,
            locale,
            ip_address: ip,
            read: false,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Identifiable for ContactMessage {
    fn id(&self) -> Uuid {
        self.id
    }
}
