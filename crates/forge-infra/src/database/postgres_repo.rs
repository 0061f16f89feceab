//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use forge_core::domain::{
    AdminUser, Category, ContactMessage, Exhibition, NewsArticle, NewsletterSubscriber, Product,
    Solution,
};
use forge_core::error::RepoError;
use forge_core::ports::{
    AdminUserRepository, BaseRepository, CategoryRepository, CertificateRepository,
    ClientRepository, ContactMessageRepository, ExhibitionRepository, NewsRepository,
    NewsletterRepository, ProductRepository, SolutionRepository,
};

use super::entity::{
    admin_user, category, certificate, client, contact_message, exhibition, news_article,
    newsletter_subscriber, product, solution,
};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

pub type PostgresCategoryRepository = PostgresBaseRepository<category::Entity>;
pub type PostgresProductRepository = PostgresBaseRepository<product::Entity>;
pub type PostgresSolutionRepository = PostgresBaseRepository<solution::Entity>;
pub type PostgresNewsRepository = PostgresBaseRepository<news_article::Entity>;
pub type PostgresExhibitionRepository = PostgresBaseRepository<exhibition::Entity>;
pub type PostgresCertificateRepository = PostgresBaseRepository<certificate::Entity>;
pub type PostgresClientRepository = PostgresBaseRepository<client::Entity>;
pub type PostgresContactMessageRepository = PostgresBaseRepository<contact_message::Entity>;
pub type PostgresNewsletterRepository = PostgresBaseRepository<newsletter_subscriber::Entity>;
pub type PostgresAdminUserRepository = PostgresBaseRepository<admin_user::Entity>;

/// Mask an email for logging to avoid PII in logs.
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) if local.chars().count() > 1 => format!("{first}***@{domain}"),
            _ => format!("***@{domain}"),
        },
        None => "***".to_string(),
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let result = category::Entity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, RepoError> {
        let result = product::Entity::find()
            .filter(product::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_category(&self, category_id: Uuid) -> Result<Vec<Product>, RepoError> {
        let result = product::Entity::find()
            .filter(product::Column::CategoryId.eq(category_id))
            .order_by_asc(product::Column::SortOrder)
            .order_by_asc(product::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_featured(&self) -> Result<Vec<Product>, RepoError> {
        let result = product::Entity::find()
            .filter(product::Column::Featured.eq(true))
            .order_by_asc(product::Column::SortOrder)
            .order_by_asc(product::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl SolutionRepository for PostgresSolutionRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Solution>, RepoError> {
        let result = solution::Entity::find()
            .filter(solution::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl NewsRepository for PostgresNewsRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<NewsArticle>, RepoError> {
        let result = news_article::Entity::find()
            .filter(news_article::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_published(&self) -> Result<Vec<NewsArticle>, RepoError> {
        let result = news_article::Entity::find()
            .filter(news_article::Column::Published.eq(true))
            .order_by_desc(news_article::Column::PublishedAt)
            .order_by_desc(news_article::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl ExhibitionRepository for PostgresExhibitionRepository {
    async fn find_upcoming(&self, today: NaiveDate) -> Result<Vec<Exhibition>, RepoError> {
        let result = exhibition::Entity::find()
            .filter(exhibition::Column::EndDate.gte(today))
            .order_by_asc(exhibition::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl CertificateRepository for PostgresCertificateRepository {}

#[async_trait]
impl ClientRepository for PostgresClientRepository {}

#[async_trait]
impl ContactMessageRepository for PostgresContactMessageRepository {
    async fn mark_read(&self, id: Uuid) -> Result<ContactMessage, RepoError> {
        let mut message = BaseRepository::<ContactMessage, Uuid>::find_by_id(self, id)
            .await?
            .ok_or(RepoError::NotFound)?;
        message.read = true;
        message.updated_at = Utc::now();
        BaseRepository::<ContactMessage, Uuid>::save(self, message).await
    }
}

#[async_trait]
impl NewsletterRepository for PostgresNewsletterRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<NewsletterSubscriber>, RepoError> {
        let result = newsletter_subscriber::Entity::find()
            .filter(newsletter_subscriber::Column::Email.eq(email.trim().to_lowercase()))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl AdminUserRepository for PostgresAdminUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<AdminUser>, RepoError> {
        tracing::debug!(admin_email = %mask_email(email), "Finding admin by email");

        let result = admin_user::Entity::find()
            .filter(admin_user::Column::Email.eq(email.trim().to_lowercase()))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}
