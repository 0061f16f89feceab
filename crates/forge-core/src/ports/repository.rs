use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{
    AdminUser, Category, Certificate, Client, ContactMessage, Exhibition, NewsArticle,
    NewsletterSubscriber, Product, Solution,
};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Every stored entity, in the entity's natural display order.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError>;
}

#[async_trait]
pub trait ProductRepository: BaseRepository<Product, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, RepoError>;

    async fn find_by_category(&self, category_id: Uuid) -> Result<Vec<Product>, RepoError>;

    async fn find_featured(&self) -> Result<Vec<Product>, RepoError>;
}

#[async_trait]
pub trait SolutionRepository: BaseRepository<Solution, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Solution>, RepoError>;
}

#[async_trait]
pub trait NewsRepository: BaseRepository<NewsArticle, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<NewsArticle>, RepoError>;

    /// Published articles, newest first.
    async fn find_published(&self) -> Result<Vec<NewsArticle>, RepoError>;
}

#[async_trait]
pub trait ExhibitionRepository: BaseRepository<Exhibition, Uuid> {
    /// Exhibitions ending on or after `today`, soonest first.
    async fn find_upcoming(&self, today: NaiveDate) -> Result<Vec<Exhibition>, RepoError>;
}

#[async_trait]
pub trait CertificateRepository: BaseRepository<Certificate, Uuid> {}

#[async_trait]
pub trait ClientRepository: BaseRepository<Client, Uuid> {}

#[async_trait]
pub trait ContactMessageRepository: BaseRepository<ContactMessage, Uuid> {
    /// Flag a message as handled. Fails with `NotFound` for unknown ids.
    async fn mark_read(&self, id: Uuid) -> Result<ContactMessage, RepoError>;
}

#[async_trait]
pub trait NewsletterRepository: BaseRepository<NewsletterSubscriber, Uuid> {
    async fn find_by_email(&self, email: &str) -> Result<Option<NewsletterSubscriber>, RepoError>;
}

#[async_trait]
pub trait AdminUserRepository: BaseRepository<AdminUser, Uuid> {
    async fn find_by_email(&self, email: &str) -> Result<Option<AdminUser>, RepoError>;
}
