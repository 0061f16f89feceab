//! In-memory repositories, used when no database is configured and in tests.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use forge_core::domain::{
    AdminUser, Category, Certificate, Client, ContactMessage, Exhibition, Identifiable,
    NewsArticle, NewsletterSubscriber, Product, Solution,
};
use forge_core::error::RepoError;
use forge_core::ports::{
    AdminUserRepository, BaseRepository, CategoryRepository, CertificateRepository,
    ClientRepository, ContactMessageRepository, ExhibitionRepository, NewsRepository,
    NewsletterRepository, ProductRepository, SolutionRepository,
};

/// Entity stored by [`InMemoryRepository`].
pub trait MemoryRecord: Identifiable + Clone + Send + Sync + 'static {
    /// Ordering of `find_all`, matching the SQL repositories.
    fn display_cmp(&self, other: &Self) -> Ordering;

    /// Value that must be unique across records (slug or email), if any.
    fn unique_key(&self) -> Option<&str> {
        None
    }
}

impl MemoryRecord for Category {
    fn display_cmp(&self, other: &Self) -> Ordering {
        (self.sort_order, self.created_at).cmp(&(other.sort_order, other.created_at))
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.slug)
    }
}

impl MemoryRecord for Product {
    fn display_cmp(&self, other: &Self) -> Ordering {
        (self.sort_order, self.created_at).cmp(&(other.sort_order, other.created_at))
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.slug)
    }
}

impl MemoryRecord for Solution {
    fn display_cmp(&self, other: &Self) -> Ordering {
        (self.sort_order, self.created_at).cmp(&(other.sort_order, other.created_at))
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.slug)
    }
}

impl MemoryRecord for NewsArticle {
    fn display_cmp(&self, other: &Self) -> Ordering {
        other.created_at.cmp(&self.created_at)
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.slug)
    }
}

impl MemoryRecord for Exhibition {
    fn display_cmp(&self, other: &Self) -> Ordering {
        other.start_date.cmp(&self.start_date)
    }
}

impl MemoryRecord for Certificate {
    fn display_cmp(&self, other: &Self) -> Ordering {
        // Postgres sorts NULLs first on DESC.
        match (self.issued_on, other.issued_on) {
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (a, b) => b.cmp(&a).then_with(|| other.created_at.cmp(&self.created_at)),
        }
    }
}

impl MemoryRecord for Client {
    fn display_cmp(&self, other: &Self) -> Ordering {
        (self.sort_order, self.created_at).cmp(&(other.sort_order, other.created_at))
    }
}

impl MemoryRecord for ContactMessage {
    fn display_cmp(&self, other: &Self) -> Ordering {
        other.created_at.cmp(&self.created_at)
    }
}

impl MemoryRecord for NewsletterSubscriber {
    fn display_cmp(&self, other: &Self) -> Ordering {
        other.created_at.cmp(&self.created_at)
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.email)
    }
}

impl MemoryRecord for AdminUser {
    fn display_cmp(&self, other: &Self) -> Ordering {
        self.created_at.cmp(&other.created_at)
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.email)
    }
}

/// Records in a HashMap behind an async RwLock. Data is lost on restart.
pub struct InMemoryRepository<T> {
    records: RwLock<HashMap<Uuid, T>>,
}

impl<T: MemoryRecord> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Records matching `predicate`, in display order.
    async fn select(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        let records = self.records.read().await;
        let mut found: Vec<T> = records.values().filter(|r| predicate(*r)).cloned().collect();
        found.sort_by(T::display_cmp);
        found
    }

    async fn find_one(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.records
            .read()
            .await
            .values()
            .find(|r| predicate(*r))
            .cloned()
    }
}

impl<T: MemoryRecord> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: MemoryRecord> BaseRepository<T, Uuid> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<T>, RepoError> {
        Ok(self.select(|_| true).await)
    }

    async fn save(&self, entity: T) -> Result<T, RepoError> {
        let mut records = self.records.write().await;

        if let Some(key) = entity.unique_key() {
            let taken = records
                .values()
                .any(|r| r.id() != entity.id() && r.unique_key() == Some(key));
            if taken {
                return Err(RepoError::Constraint(format!("'{key}' already exists")));
            }
        }

        records.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.records
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryRepository<Category> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        Ok(self.find_one(|c| c.slug == slug).await)
    }
}

#[async_trait]
impl ProductRepository for InMemoryRepository<Product> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, RepoError> {
        Ok(self.find_one(|p| p.slug == slug).await)
    }

    async fn find_by_category(&self, category_id: Uuid) -> Result<Vec<Product>, RepoError> {
        Ok(self.select(|p| p.category_id == category_id).await)
    }

    async fn find_featured(&self) -> Result<Vec<Product>, RepoError> {
        Ok(self.select(|p| p.featured).await)
    }
}

#[async_trait]
impl SolutionRepository for InMemoryRepository<Solution> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Solution>, RepoError> {
        Ok(self.find_one(|s| s.slug == slug).await)
    }
}

#[async_trait]
impl NewsRepository for InMemoryRepository<NewsArticle> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<NewsArticle>, RepoError> {
        Ok(self.find_one(|n| n.slug == slug).await)
    }

    async fn find_published(&self) -> Result<Vec<NewsArticle>, RepoError> {
        let mut published = self.select(|n| n.published).await;
        published.sort_by(|a, b| {
            b.published_at
                .cmp(&a.published_at)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(published)
    }
}

#[async_trait]
impl ExhibitionRepository for InMemoryRepository<Exhibition> {
    async fn find_upcoming(&self, today: NaiveDate) -> Result<Vec<Exhibition>, RepoError> {
        let mut upcoming = self.select(|e| e.is_upcoming(today)).await;
        upcoming.sort_by_key(|e| e.start_date);
        Ok(upcoming)
    }
}

#[async_trait]
impl CertificateRepository for InMemoryRepository<Certificate> {}

#[async_trait]
impl ClientRepository for InMemoryRepository<Client> {}

#[async_trait]
impl ContactMessageRepository for InMemoryRepository<ContactMessage> {
    async fn mark_read(&self, id: Uuid) -> Result<ContactMessage, RepoError> {
        let mut records = self.records.write().await;
        let message = records.get_mut(&id).ok_or(RepoError::NotFound)?;
        message.read = true;
        message.updated_at = Utc::now();
        Ok(message.clone())
    }
}

#[async_trait]
impl NewsletterRepository for InMemoryRepository<NewsletterSubscriber> {
    async fn find_by_email(&self, email: &str) -> Result<Option<NewsletterSubscriber>, RepoError> {
        let email = email.trim().to_lowercase();
        Ok(self.find_one(|s| s.email == email).await)
    }
}

#[async_trait]
impl AdminUserRepository for InMemoryRepository<AdminUser> {
    async fn find_by_email(&self, email: &str) -> Result<Option<AdminUser>, RepoError> {
        let email = email.trim().to_lowercase();
        Ok(self.find_one(|a| a.email == email).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use forge_core::domain::{Locale, LocalizedText};

    fn category(slug: &str, sort_order: i32) -> Category {
        let mut c = Category::new(slug.to_string(), LocalizedText::new("", slug, ""));
        c.sort_order = sort_order;
        c
    }

    #[tokio::test]
    async fn test_crud_round() {
        let repo = InMemoryRepository::<Category>::new();
        let saved = repo.save(category("presses", 0)).await.unwrap();

        assert!(repo.find_by_id(saved.id).await.unwrap().is_some());
        assert_eq!(repo.find_by_slug("presses").await.unwrap().unwrap().id, saved.id);

        repo.delete(saved.id).await.unwrap();
        assert!(repo.find_by_id(saved.id).await.unwrap().is_none());
        assert!(matches!(repo.delete(saved.id).await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_find_all_uses_sort_order() {
        let repo = InMemoryRepository::<Category>::new();
        repo.save(category("b", 2)).await.unwrap();
        repo.save(category("a", 1)).await.unwrap();
        repo.save(category("c", 3)).await.unwrap();

        let slugs: Vec<_> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.slug)
            .collect();
        assert_eq!(slugs, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected_but_update_allowed() {
        let repo = InMemoryRepository::<Category>::new();
        let mut first = repo.save(category("lines", 0)).await.unwrap();

        assert!(matches!(
            repo.save(category("lines", 1)).await,
            Err(RepoError::Constraint(_))
        ));

        first.sort_order = 9;
        assert_eq!(repo.save(first).await.unwrap().sort_order, 9);
    }

    #[tokio::test]
    async fn test_published_news_newest_first() {
        let repo = InMemoryRepository::<NewsArticle>::new();
        let mut old = NewsArticle::new("old".into(), LocalizedText::default());
        old.set_published(true);
        old.published_at = old.published_at.map(|t| t - Duration::days(3));
        let mut new = NewsArticle::new("new".into(), LocalizedText::default());
        new.set_published(true);
        let draft = NewsArticle::new("draft".into(), LocalizedText::default());

        for article in [old, new, draft] {
            repo.save(article).await.unwrap();
        }

        let slugs: Vec<_> = repo
            .find_published()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.slug)
            .collect();
        assert_eq!(slugs, ["new", "old"]);
    }

    #[tokio::test]
    async fn test_upcoming_exhibitions() {
        let repo = InMemoryRepository::<Exhibition>::new();
        let day = |d| NaiveDate::from_ymd_opt(2026, 5, d).unwrap();
        let name = LocalizedText::new("", "Expo", "");

        let past = Exhibition::new(name.clone(), name.clone(), day(1), day(3)).unwrap();
        let running = Exhibition::new(name.clone(), name.clone(), day(9), day(12)).unwrap();
        let later = Exhibition::new(name.clone(), name, day(20), day(22)).unwrap();
        for e in [later, past, running] {
            repo.save(e).await.unwrap();
        }

        let upcoming = repo.find_upcoming(day(10)).await.unwrap();
        let starts: Vec<_> = upcoming.iter().map(|e| e.start_date).collect();
        assert_eq!(starts, [day(9), day(20)]);
    }

    #[tokio::test]
    async fn test_mark_read() {
        let repo = InMemoryRepository::<ContactMessage>::new();
        let message = ContactMessage::new(
            "Ayşe".into(),
            "ayse@example.com".into(),
            "Please send a quote.".into(),
            Locale::Tr,
            "203.0.113.7".into(),
        );
        let id = repo.save(message).await.unwrap().id;

        assert!(repo.mark_read(id).await.unwrap().read);
        assert!(repo.find_by_id(id).await.unwrap().unwrap().read);
        assert!(matches!(
            repo.mark_read(Uuid::new_v4()).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_subscriber_lookup_ignores_case() {
        let repo = InMemoryRepository::<NewsletterSubscriber>::new();
        repo.save(NewsletterSubscriber::new("Buyer@Example.com", Locale::Ar))
            .await
            .unwrap();

        assert!(repo.find_by_email(" BUYER@example.com ").await.unwrap().is_some());
        assert!(matches!(
            repo.save(NewsletterSubscriber::new("buyer@example.com", Locale::En))
                .await,
            Err(RepoError::Constraint(_))
        ));
    }
}
