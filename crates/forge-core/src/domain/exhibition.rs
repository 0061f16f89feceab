use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Identifiable, LocalizedText};
use crate::error::DomainError;

/// Trade fair the company attends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exhibition {
    pub id: Uuid,
    pub name: LocalizedText,
    pub location: LocalizedText,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub booth: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Exhibition {
    pub fn new(
        name: LocalizedText,
        location: LocalizedText,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, DomainError> {
        Self::check_dates(start_date, end_date)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            location,
            start_date,
            end_date,
            booth: None,
            image_url: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn check_dates(start_date: NaiveDate, end_date: NaiveDate) -> Result<(), DomainError> {
        if end_date < start_date {
            return Err(DomainError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(())
    }

    /// Still running or not started yet on `today`.
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.end_date >= today
    }
}

impl Identifiable for Exhibition {
    fn id(&self) -> Uuid {
        self.id
    }
}
