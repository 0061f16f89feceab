use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Identifiable, LocalizedText};

/// Company news post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticle {
    pub id: Uuid,
    pub slug: String,
    pub title: LocalizedText,
    pub summary: LocalizedText,
    pub content: LocalizedText,
    pub cover_image: Option<String>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewsArticle {
    /// Create an unpublished draft.
    pub fn new(slug: String, title: LocalizedText) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            slug,
            title,
            summary: LocalizedText::default(),
            content: LocalizedText::default(),
            cover_image: None,
            published: false,
            published_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Toggle visibility. The first publication stamps `published_at`.
    pub fn set_published(&mut self, published: bool) {
        self.published = published;
        if published && self.published_at.is_none() {
            self.published_at = Some(Utc::now());
        }
    }
}

impl Identifiable for NewsArticle {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_stamps_date_once() {
        let mut article = NewsArticle::new("expo".into(), LocalizedText::default());
        assert!(article.published_at.is_none());

        article.set_published(true);
        let first = article.published_at;
        assert!(first.is_some());

        article.set_published(false);
        article.set_published(true);
        assert_eq!(article.published_at, first);
    }
}
